//! Filter criteria
//!
//! Pure state transitions over the listing filters. Nothing here performs
//! I/O; the controller decides when a change warrants a fetch.

use std::collections::BTreeSet;
use std::str::FromStr;

use rust_decimal::Decimal;
use shared::ProductQuery;

use crate::error::CatalogError;

pub use shared::{SortDirection, SortKey};

/// User-facing sort choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOption {
    #[default]
    Newest,
    Oldest,
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
}

impl SortOption {
    pub const ALL: [SortOption; 6] = [
        SortOption::Newest,
        SortOption::Oldest,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
        SortOption::NameAsc,
        SortOption::NameDesc,
    ];

    /// The (key, direction) pair sent to the backend
    pub fn pair(self) -> (SortKey, SortDirection) {
        match self {
            SortOption::Newest => (SortKey::CreatedAt, SortDirection::Desc),
            SortOption::Oldest => (SortKey::CreatedAt, SortDirection::Asc),
            SortOption::PriceAsc => (SortKey::Price, SortDirection::Asc),
            SortOption::PriceDesc => (SortKey::Price, SortDirection::Desc),
            SortOption::NameAsc => (SortKey::Name, SortDirection::Asc),
            SortOption::NameDesc => (SortKey::Name, SortDirection::Desc),
        }
    }

    pub fn from_pair(key: SortKey, direction: SortDirection) -> Self {
        match (key, direction) {
            (SortKey::CreatedAt, SortDirection::Desc) => SortOption::Newest,
            (SortKey::CreatedAt, SortDirection::Asc) => SortOption::Oldest,
            (SortKey::Price, SortDirection::Asc) => SortOption::PriceAsc,
            (SortKey::Price, SortDirection::Desc) => SortOption::PriceDesc,
            (SortKey::Name, SortDirection::Asc) => SortOption::NameAsc,
            (SortKey::Name, SortDirection::Desc) => SortOption::NameDesc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Newest => "newest",
            SortOption::Oldest => "oldest",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
            SortOption::NameAsc => "name-asc",
            SortOption::NameDesc => "name-desc",
        }
    }
}

impl std::fmt::Display for SortOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        SortOption::ALL
            .into_iter()
            .find(|opt| opt.as_str() == normalized)
            .ok_or_else(|| CatalogError::InvalidSortOption(s.to_string()))
    }
}

/// Which end of the price range an edit applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceBound {
    Min,
    Max,
}

impl FromStr for PriceBound {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "min" => Ok(PriceBound::Min),
            "max" => Ok(PriceBound::Max),
            _ => Err(CatalogError::InvalidPriceBound(s.to_string())),
        }
    }
}

/// Optional lower/upper price bounds
///
/// `min <= max` is not enforced; an inverted range goes to the backend as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PriceRange {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

impl PriceRange {
    pub fn set(&mut self, bound: PriceBound, value: Option<Decimal>) {
        match bound {
            PriceBound::Min => self.min = value,
            PriceBound::Max => self.max = value,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Both bounds present and `min > max`
    pub fn is_inverted(&self) -> bool {
        matches!((self.min, self.max), (Some(min), Some(max)) if min > max)
    }
}

/// Active listing filters
///
/// Sizes and colors are kept ordered so equal selections compare and
/// serialize equally no matter the click order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterCriteria {
    pub category: Option<String>,
    pub sizes: BTreeSet<String>,
    pub colors: BTreeSet<String>,
    pub price: PriceRange,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        let (sort_key, sort_direction) = SortOption::default().pair();
        Self {
            category: None,
            sizes: BTreeSet::new(),
            colors: BTreeSet::new(),
            price: PriceRange::default(),
            sort_key,
            sort_direction,
        }
    }
}

impl FilterCriteria {
    /// Defaults with a category pre-selected
    pub fn with_category(category: Option<String>) -> Self {
        let mut criteria = Self::default();
        criteria.set_category(category);
        criteria
    }

    /// Blank names clear the category
    pub fn set_category(&mut self, category: Option<String>) {
        self.category = category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
    }

    /// Returns whether the size is selected afterwards
    pub fn toggle_size(&mut self, size: &str) -> bool {
        toggle(&mut self.sizes, size)
    }

    /// Returns whether the color is selected afterwards
    pub fn toggle_color(&mut self, color: &str) -> bool {
        toggle(&mut self.colors, color)
    }

    pub fn set_price_range(&mut self, price: PriceRange) {
        self.price = price;
    }

    pub fn set_sort(&mut self, key: SortKey, direction: SortDirection) {
        self.sort_key = key;
        self.sort_direction = direction;
    }

    pub fn sort_option(&self) -> SortOption {
        SortOption::from_pair(self.sort_key, self.sort_direction)
    }

    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Number of narrowing filters in effect (sort excluded)
    pub fn active_filter_count(&self) -> usize {
        usize::from(self.category.is_some())
            + self.sizes.len()
            + self.colors.len()
            + usize::from(self.price.min.is_some())
            + usize::from(self.price.max.is_some())
    }

    pub fn to_query(&self, limit: u32) -> ProductQuery {
        let mut query = ProductQuery::sorted(self.sort_key, self.sort_direction)
            .with_sizes(&self.sizes)
            .with_colors(&self.colors)
            .with_price_range(self.price.min, self.price.max)
            .with_limit(limit);
        if let Some(category) = &self.category {
            query = query.with_category(category.clone());
        }
        query
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) -> bool {
    let value = value.trim();
    if set.remove(value) {
        false
    } else {
        set.insert(value.to_string())
    }
}
