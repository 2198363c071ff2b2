//! Product Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Product image reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

/// Product as returned by the listing endpoint
///
/// Immutable snapshot; a listing fetch replaces the whole set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub price: Decimal,
    /// Price before markdown, present on discounted items
    #[serde(default)]
    pub original_price: Option<Decimal>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    /// Category name
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub is_new_arrival: bool,
    #[serde(default)]
    pub is_sale: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ProductSummary {
    /// URL of the image flagged primary, falling back to the first image
    pub fn primary_image_url(&self) -> Option<&str> {
        self.images
            .iter()
            .find(|img| img.is_primary)
            .or_else(|| self.images.first())
            .map(|img| img.url.as_str())
    }

    /// Rounded percentage saved against `original_price`
    pub fn discount_percent(&self) -> Option<u32> {
        let original = self.original_price?;
        if self.price <= Decimal::ZERO || original <= self.price {
            return None;
        }
        ((original - self.price) / original * Decimal::ONE_HUNDRED)
            .round()
            .to_u32()
    }

    pub fn is_on_sale(&self) -> bool {
        self.is_sale || self.discount_percent().is_some()
    }
}

/// `data` payload of the product listing endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListData {
    /// Missing `products` is an empty page, not an error
    #[serde(default)]
    pub products: Vec<ProductSummary>,
    #[serde(default)]
    pub total: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn product(price: &str, original: Option<&str>) -> ProductSummary {
        ProductSummary {
            id: "p1".to_string(),
            name: "Linen Shirt".to_string(),
            price: Decimal::from_str(price).unwrap(),
            original_price: original.map(|o| Decimal::from_str(o).unwrap()),
            images: Vec::new(),
            category: "Shirts".to_string(),
            colors: Vec::new(),
            sizes: Vec::new(),
            is_new_arrival: false,
            is_sale: false,
            is_featured: false,
            created_at: None,
        }
    }

    fn image(url: &str, is_primary: bool) -> ProductImage {
        ProductImage {
            url: url.to_string(),
            alt: None,
            is_primary,
        }
    }

    #[test]
    fn test_primary_image_prefers_flagged() {
        let mut p = product("10", None);
        p.images = vec![image("a.jpg", false), image("b.jpg", true)];
        assert_eq!(p.primary_image_url(), Some("b.jpg"));
    }

    #[test]
    fn test_primary_image_falls_back_to_first() {
        let mut p = product("10", None);
        assert_eq!(p.primary_image_url(), None);

        p.images = vec![image("a.jpg", false), image("b.jpg", false)];
        assert_eq!(p.primary_image_url(), Some("a.jpg"));
    }

    #[test]
    fn test_discount_percent() {
        assert_eq!(product("75", Some("100")).discount_percent(), Some(25));
        assert_eq!(product("19.99", Some("29.99")).discount_percent(), Some(33));
        assert_eq!(product("100", Some("100")).discount_percent(), None);
        assert_eq!(product("120", Some("100")).discount_percent(), None);
        assert_eq!(product("0", Some("100")).discount_percent(), None);
        assert_eq!(product("50", None).discount_percent(), None);
    }

    #[test]
    fn test_is_on_sale() {
        assert!(product("75", Some("100")).is_on_sale());
        assert!(!product("75", None).is_on_sale());

        let mut flagged = product("75", None);
        flagged.is_sale = true;
        assert!(flagged.is_on_sale());
    }

    #[test]
    fn test_deserialize_backend_document() {
        let json = r#"{
            "_id": "65b2",
            "name": "Wrap Dress",
            "price": 49.5,
            "originalPrice": 70,
            "images": [{"url": "front.jpg"}, {"url": "side.jpg", "isPrimary": true}],
            "category": "Dresses",
            "colors": ["red"],
            "sizes": ["S", "M"],
            "isSale": true,
            "createdAt": "2024-03-01T10:00:00Z"
        }"#;
        let p: ProductSummary = serde_json::from_str(json).unwrap();

        assert_eq!(p.id, "65b2");
        assert_eq!(p.price, Decimal::from_str("49.5").unwrap());
        assert_eq!(p.primary_image_url(), Some("side.jpg"));
        assert_eq!(p.discount_percent(), Some(29));
        assert!(!p.is_new_arrival);
        assert!(p.created_at.is_some());
    }

    #[test]
    fn test_list_data_without_products_is_empty() {
        let data: ProductListData = serde_json::from_str("{}").unwrap();
        assert!(data.products.is_empty());
        assert!(data.total.is_none());
    }
}
