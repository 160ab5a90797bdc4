//! Product categories offered by the listing form.

use serde::{Deserialize, Serialize};

/// Error returned when a category name is not one of the fixed set.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid category: {0}")]
pub struct CategoryError(pub String);

/// The fixed set of product categories.
///
/// Wire names are kebab-case (`shoes`, `women-bags`, `coats`) and are what
/// gets persisted in product records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Shoes,
    WomenBags,
    Coats,
}

impl Category {
    /// All categories, in form display order.
    pub const ALL: [Self; 3] = [Self::Shoes, Self::WomenBags, Self::Coats];

    /// The persisted wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shoes => "shoes",
            Self::WomenBags => "women-bags",
            Self::Coats => "coats",
        }
    }

    /// Human-readable label for form rendering.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Shoes => "Shoes",
            Self::WomenBags => "Women Bags",
            Self::Coats => "Coats",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shoes" => Ok(Self::Shoes),
            "women-bags" => Ok(Self::WomenBags),
            "coats" => Ok(Self::Coats),
            _ => Err(CategoryError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_wire_names_parse_back() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn test_category_rejects_unknown_and_label_text() {
        assert!("hats".parse::<Category>().is_err());
        assert!("Women Bags".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serde_uses_kebab_case() {
        let json = serde_json::to_string(&Category::WomenBags).unwrap();
        assert_eq!(json, "\"women-bags\"");
    }
}
