//! Unit conversion utilities
//!
//! Projects are measured in feet or meters. World coordinates are always in
//! the project's own unit; conversion is only needed for display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const FEET_PER_METER: f64 = 3.280_839_895;

/// Length unit of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Imperial feet
    #[default]
    Feet,
    /// Metric meters
    Meters,
}

impl LengthUnit {
    /// All selectable units, in display order.
    pub const ALL: [LengthUnit; 2] = [LengthUnit::Feet, LengthUnit::Meters];

    /// Short suffix used on rulers ("ft" / "m").
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::Feet => "ft",
            Self::Meters => "m",
        }
    }

    /// Converts a value in this unit to feet.
    pub fn to_feet(&self, value: f64) -> f64 {
        match self {
            Self::Feet => value,
            Self::Meters => value * FEET_PER_METER,
        }
    }

    /// Converts a value in feet to this unit.
    pub fn from_feet(&self, feet: f64) -> f64 {
        match self {
            Self::Feet => feet,
            Self::Meters => feet / FEET_PER_METER,
        }
    }

    /// Converts a value in this unit to `target`.
    pub fn convert(&self, value: f64, target: LengthUnit) -> f64 {
        target.from_feet(self.to_feet(value))
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Feet => write!(f, "feet"),
            Self::Meters => write!(f, "meters"),
        }
    }
}

impl FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "feet" | "ft" | "foot" => Ok(Self::Feet),
            "meters" | "meter" | "metres" | "metre" | "m" => Ok(Self::Meters),
            _ => Err(format!("Unknown length unit: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_units() {
        assert_eq!("feet".parse::<LengthUnit>(), Ok(LengthUnit::Feet));
        assert_eq!(" FT ".parse::<LengthUnit>(), Ok(LengthUnit::Feet));
        assert_eq!("metres".parse::<LengthUnit>(), Ok(LengthUnit::Meters));
        assert!("furlongs".parse::<LengthUnit>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for unit in LengthUnit::ALL {
            assert_eq!(unit.to_string().parse::<LengthUnit>(), Ok(unit));
        }
    }

    #[test]
    fn test_conversion() {
        let feet = LengthUnit::Meters.convert(10.0, LengthUnit::Feet);
        assert!((feet - 32.808).abs() < 0.001);

        let meters = LengthUnit::Feet.convert(feet, LengthUnit::Meters);
        assert!((meters - 10.0).abs() < 1e-9);

        assert_eq!(LengthUnit::Feet.convert(12.0, LengthUnit::Feet), 12.0);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&LengthUnit::Meters).unwrap();
        assert_eq!(json, "\"meters\"");
    }
}
