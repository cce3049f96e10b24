//! Product model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ServiceError};

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Electronics,
    Clothing,
    Books,
    Home,
    Sports,
}

impl ProductCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Electronics => "electronics",
            ProductCategory::Clothing => "clothing",
            ProductCategory::Books => "books",
            ProductCategory::Home => "home",
            ProductCategory::Sports => "sports",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = ServiceError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "electronics" => Ok(ProductCategory::Electronics),
            "clothing" => Ok(ProductCategory::Clothing),
            "books" => Ok(ProductCategory::Books),
            "home" => Ok(ProductCategory::Home),
            "sports" => Ok(ProductCategory::Sports),
            other => Err(ServiceError::Validation(format!(
                "Unknown product category: {}",
                other
            ))),
        }
    }
}

/// A product record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub price: f64,
    pub category: ProductCategory,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Product {
    pub fn new(id: u64, name: impl Into<String>, price: f64, category: ProductCategory) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            category,
            description: None,
            tags: Vec::new(),
        }
    }

    /// Rejects empty names and negative or non-finite prices.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ServiceError::Validation(
                "Product name cannot be empty".to_string(),
            ));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ServiceError::Validation(format!(
                "Invalid product price: {}",
                self.price
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_from_str() {
        assert_eq!(
            "Books".parse::<ProductCategory>().unwrap(),
            ProductCategory::Books
        );
        assert!("toys".parse::<ProductCategory>().is_err());
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&ProductCategory::Electronics).unwrap();
        assert_eq!(json, r#""electronics""#);
        assert_eq!(ProductCategory::Home.to_string(), "home");
    }

    #[test]
    fn test_product_from_row_defaults() {
        let row = json!({
            "id": 4,
            "name": "Lamp",
            "price": 19.5,
            "category": "home"
        });

        let product: Product = serde_json::from_value(row).unwrap();
        assert_eq!(product.category, ProductCategory::Home);
        assert!(product.description.is_none());
        assert!(product.tags.is_empty());
    }

    #[test]
    fn test_product_validate() {
        assert!(Product::new(0, "Ball", 5.0, ProductCategory::Sports)
            .validate()
            .is_ok());
        assert!(Product::new(0, "  ", 5.0, ProductCategory::Sports)
            .validate()
            .is_err());
        assert!(Product::new(0, "Ball", -1.0, ProductCategory::Sports)
            .validate()
            .is_err());
        assert!(Product::new(0, "Ball", f64::NAN, ProductCategory::Sports)
            .validate()
            .is_err());
    }
}
