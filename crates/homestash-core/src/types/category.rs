//! Tag category: which table a scanned code resolves against.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// The kind of entity a QR label refers to.
///
/// Serialized in lowercase to match the label wire format
/// (`"category": "item" | "storage"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagCategory {
    /// A tracked physical item.
    Item,
    /// A storage cell inside a room/furniture pair.
    Storage,
}

impl TagCategory {
    /// The other side of a pairing: items pair with storage and vice versa.
    pub fn opposite(self) -> Self {
        match self {
            Self::Item => Self::Storage,
            Self::Storage => Self::Item,
        }
    }
}

impl fmt::Display for TagCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item => write!(f, "item"),
            Self::Storage => write!(f, "storage"),
        }
    }
}

impl FromStr for TagCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "item" => Ok(Self::Item),
            "storage" => Ok(Self::Storage),
            other => Err(AppError::validation(format!(
                "Unknown tag category '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TagCategory::Item).unwrap(), "\"item\"");
        assert_eq!(
            serde_json::to_string(&TagCategory::Storage).unwrap(),
            "\"storage\""
        );
    }

    #[test]
    fn opposite_flips() {
        assert_eq!(TagCategory::Item.opposite(), TagCategory::Storage);
        assert_eq!(TagCategory::Storage.opposite(), TagCategory::Item);
    }
}
