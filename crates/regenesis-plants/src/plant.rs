use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PlantError, PlantResult};

/// A native plant with its mature height and bloom colour.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Plant {
    pub name: String,
    /// Mature height in whole feet.
    #[serde(alias = "height")]
    pub height_ft: u32,
    pub color: String,
}

impl Plant {
    /// Creates a validated plant. Names and colours are trimmed and colours
    /// lower-cased.
    pub fn new(
        name: impl Into<String>,
        height_ft: u32,
        color: impl Into<String>,
    ) -> PlantResult<Self> {
        let plant = Self {
            name: name.into().trim().to_string(),
            height_ft,
            color: color.into().trim().to_lowercase(),
        };
        plant.validate()?;
        Ok(plant)
    }

    pub fn validate(&self) -> PlantResult<()> {
        let reason = if self.name.trim().is_empty() {
            "name must not be empty"
        } else if self.height_ft == 0 {
            "height must be at least 1 ft"
        } else if self.color.trim().is_empty() {
            "color must not be empty"
        } else {
            return Ok(());
        };
        Err(PlantError::InvalidPlant {
            name: self.name.clone(),
            reason: reason.to_string(),
        })
    }
}

impl fmt::Display for Plant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}ft, {})", self.name, self.height_ft, self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let plant = Plant::new("Purple Coneflower", 3, "Purple").unwrap();
        assert_eq!(plant.to_string(), "Purple Coneflower (3ft, purple)");
    }

    #[test]
    fn test_validation() {
        assert!(Plant::new("  ", 2, "white").is_err());
        assert!(Plant::new("Goldenrod", 0, "yellow").is_err());
        assert!(Plant::new("Goldenrod", 3, "").is_err());
    }

    #[test]
    fn test_equality_uses_all_fields() {
        let a = Plant::new("Goldenrod", 3, "yellow").unwrap();
        let b = Plant::new("Goldenrod", 4, "yellow").unwrap();
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_deserialize_accepts_height_alias() {
        let plant: Plant =
            serde_json::from_str(r#"{"name":"Blazing Star","height":3,"color":"purple"}"#)
                .unwrap();
        assert_eq!(plant.height_ft, 3);
    }
}
