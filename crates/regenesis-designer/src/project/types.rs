//! Node identities and the attribute types shown in the properties panel.

use std::fmt;
use std::str::FromStr;

use regenesis_core::LengthUnit;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identity of a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(Uuid);

impl NodeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Declares a kebab-case attribute enum with `ALL`, `as_str`, `Display` and
/// `FromStr`.
macro_rules! attribute_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $( $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "kebab-case")]
        pub enum $name {
            $( $variant ),+
        }

        impl $name {
            /// Every value, in drop-down order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $text ),+
                }
            }

            /// Values as strings, for drop-down models.
            pub fn options() -> Vec<String> {
                Self::ALL.iter().map(|v| v.as_str().to_string()).collect()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_lowercase().replace(['_', ' '], "-");
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| format!("Unknown {}: {}", $label, s))
            }
        }
    };
}

attribute_enum! {
    /// Planting style of a region.
    RegionType ("region type") {
        Meadow => "meadow",
        Layered => "layered",
        Pond => "pond",
        Stream => "stream",
        Woodland => "woodland",
        Hedgerow => "hedgerow",
        RainGarden => "rain-garden",
        Prairie => "prairie",
        Wetland => "wetland",
        RockGarden => "rock-garden",
    }
}

attribute_enum! {
    SoilMoisture ("soil moisture") {
        Dry => "dry",
        Medium => "medium",
        Wet => "wet",
    }
}

attribute_enum! {
    SoilType ("soil type") {
        Loam => "loam",
        Clay => "clay",
        Sand => "sand",
        Silt => "silt",
        Rocky => "rocky",
    }
}

attribute_enum! {
    SunExposure ("sun exposure") {
        FullSun => "full-sun",
        PartSun => "part-sun",
        PartShade => "part-shade",
        FullShade => "full-shade",
    }
}

/// Site data of a project (the root of a tree).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectProperties {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Extent along x, in `unit`.
    pub width: f64,
    /// Extent along y, in `unit`.
    pub length: f64,
    #[serde(default)]
    pub unit: LengthUnit,
}

impl Default for ProjectProperties {
    fn default() -> Self {
        Self {
            latitude: None,
            longitude: None,
            width: 100.0,
            length: 150.0,
            unit: LengthUnit::Feet,
        }
    }
}

/// Horticultural attributes of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionProperties {
    pub region_type: RegionType,
    pub soil_moisture: SoilMoisture,
    pub soil_type: SoilType,
    pub sun_exposure: SunExposure,
}

impl RegionProperties {
    pub fn of_type(region_type: RegionType) -> Self {
        Self {
            region_type,
            ..Self::default()
        }
    }
}

impl Default for RegionProperties {
    fn default() -> Self {
        Self {
            region_type: RegionType::Meadow,
            soil_moisture: SoilMoisture::Medium,
            soil_type: SoilType::Loam,
            sun_exposure: SunExposure::FullSun,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    Project(ProjectProperties),
    Region(RegionProperties),
}

impl NodeKind {
    pub fn is_project(&self) -> bool {
        matches!(self, Self::Project(_))
    }

    pub fn is_region(&self) -> bool {
        matches!(self, Self::Region(_))
    }

    /// Lowercase name used in the tree view ("project" / "region").
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Project(_) => "project",
            Self::Region(_) => "region",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_type_has_ten_values() {
        assert_eq!(RegionType::ALL.len(), 10);
        assert_eq!(RegionType::RainGarden.to_string(), "rain-garden");
    }

    #[test]
    fn test_from_str_is_lenient_about_separators() {
        assert_eq!("Rock Garden".parse::<RegionType>(), Ok(RegionType::RockGarden));
        assert_eq!("part_shade".parse::<SunExposure>(), Ok(SunExposure::PartShade));
        assert_eq!(" WET ".parse::<SoilMoisture>(), Ok(SoilMoisture::Wet));
        let err = "gravel".parse::<SoilType>().unwrap_err();
        assert_eq!(err, "Unknown soil type: gravel");
    }

    #[test]
    fn test_kebab_case_serde() {
        let json = serde_json::to_string(&SunExposure::FullShade).unwrap();
        assert_eq!(json, "\"full-shade\"");
        let props: RegionProperties = serde_json::from_str(
            r#"{"region_type":"rain-garden","soil_moisture":"wet","soil_type":"clay","sun_exposure":"part-sun"}"#,
        )
        .unwrap();
        assert_eq!(props.region_type, RegionType::RainGarden);
        assert_eq!(props.soil_type, SoilType::Clay);
    }

    #[test]
    fn test_node_kind_tagging() {
        let kind = NodeKind::Region(RegionProperties::default());
        let value = serde_json::to_value(&kind).unwrap();
        assert_eq!(value["type"], "region");
        assert_eq!(value["region_type"], "meadow");
    }
}
