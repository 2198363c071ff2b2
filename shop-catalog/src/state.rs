//! View state published by the controller

use shared::{Category, ProductQuery, ProductSummary};

use crate::criteria::{FilterCriteria, PriceRange};

/// Shown when a fetch fails without a server-provided message
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch products. Please try again.";

/// Outcome of the most recently issued fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Error(String),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            FetchState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Snapshot of everything the listing view renders
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogView {
    /// Criteria in effect (debounced price included)
    pub criteria: FilterCriteria,
    /// Price inputs as typed
    pub price_input: PriceRange,
    pub products: Vec<ProductSummary>,
    pub categories: Vec<Category>,
    pub fetch_state: FetchState,
    /// Parameters of the most recently issued fetch
    pub last_query: Option<ProductQuery>,
    /// Fetches issued since mount
    pub fetch_count: u64,
}

impl CatalogView {
    pub fn active_filter_count(&self) -> usize {
        self.criteria.active_filter_count()
    }

    /// Categories worth showing in the filter sidebar
    pub fn active_categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(|c| c.is_active)
    }

    /// Loaded without error and nothing matched
    pub fn is_empty_result(&self) -> bool {
        self.fetch_state == FetchState::Idle && self.fetch_count > 0 && self.products.is_empty()
    }
}
