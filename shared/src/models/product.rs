//! Product catalog status model

use serde::{Deserialize, Serialize};

/// Product publication status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    /// Not yet published
    Draft,
    /// Visible and purchasable
    Active,
    /// Retired from the catalog
    Archived,
}

impl ProductStatus {
    /// Parse from database string value (lowercase)
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "active" => Some(Self::Active),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }

    /// Database string representation (lowercase)
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }

    /// Only active products can be added to an order
    pub fn is_sellable(&self) -> bool {
        matches!(self, Self::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_roundtrip() {
        for status in [
            ProductStatus::Draft,
            ProductStatus::Active,
            ProductStatus::Archived,
        ] {
            assert_eq!(ProductStatus::from_db(status.as_db()), Some(status));
        }
        assert_eq!(ProductStatus::from_db("deleted"), None);
    }

    #[test]
    fn test_only_active_is_sellable() {
        assert!(ProductStatus::Active.is_sellable());
        assert!(!ProductStatus::Draft.is_sellable());
        assert!(!ProductStatus::Archived.is_sellable());
    }
}
