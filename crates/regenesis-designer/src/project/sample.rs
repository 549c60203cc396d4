use regenesis_core::LengthUnit;

use super::types::{RegionProperties, RegionType, SoilMoisture, SoilType, SunExposure};
use super::{ProjectProperties, ProjectTree};

/// Demo tree loaded at start-up in development mode.
///
/// ```text
/// Smith Residence
/// ├── Front Yard   (meadow)
/// ├── Back Yard    (layered)
/// │   └── Patio    (rock-garden)
/// └── Side Yard    (hedgerow)
/// ```
pub fn sample_project() -> ProjectTree {
    let mut tree = ProjectTree::new();
    let project = tree.add_project(
        "Smith Residence",
        ProjectProperties {
            latitude: Some(42.3601),
            longitude: Some(-71.0589),
            width: 100.0,
            length: 150.0,
            unit: LengthUnit::Feet,
        },
    );

    let regions = [
        (
            "Front Yard",
            RegionProperties {
                region_type: RegionType::Meadow,
                soil_moisture: SoilMoisture::Medium,
                soil_type: SoilType::Loam,
                sun_exposure: SunExposure::FullSun,
            },
        ),
        (
            "Back Yard",
            RegionProperties {
                region_type: RegionType::Layered,
                soil_moisture: SoilMoisture::Wet,
                soil_type: SoilType::Clay,
                sun_exposure: SunExposure::PartShade,
            },
        ),
        (
            "Side Yard",
            RegionProperties {
                region_type: RegionType::Hedgerow,
                soil_moisture: SoilMoisture::Dry,
                soil_type: SoilType::Sand,
                sun_exposure: SunExposure::PartSun,
            },
        ),
    ];

    for (name, props) in regions {
        let Ok(region) = tree.add_region(project, name, props) else {
            continue;
        };
        if name == "Back Yard" {
            let patio = RegionProperties {
                region_type: RegionType::RockGarden,
                soil_moisture: SoilMoisture::Dry,
                soil_type: SoilType::Rocky,
                sun_exposure: SunExposure::FullSun,
            };
            let _ = tree.add_region(region, "Patio", patio);
        }
    }
    tree
}
