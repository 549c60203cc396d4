//! Properties-panel model: rows describing a node and validated edits.

use regenesis_core::{Error, LengthUnit, Result};

use super::types::{NodeKind, ProjectProperties, RegionType, SoilMoisture, SoilType, SunExposure};
use super::{NodeId, ProjectTree, TreeNode};
use crate::model::{Property, PropertyValue};

fn choice<T: ToString>(selected: T, options: Vec<String>) -> PropertyValue {
    PropertyValue::Choice {
        selected: selected.to_string(),
        options,
    }
}

impl TreeNode {
    /// Rows shown in the properties panel, in display order.
    pub fn properties(&self) -> Vec<Property> {
        let mut rows = vec![Property::new(
            "name",
            "Name",
            PropertyValue::Text(self.name.clone()),
        )];

        match &self.kind {
            NodeKind::Project(p) => {
                rows.push(Property::new(
                    "latitude",
                    "Latitude",
                    PropertyValue::Number(p.latitude),
                ));
                rows.push(Property::new(
                    "longitude",
                    "Longitude",
                    PropertyValue::Number(p.longitude),
                ));
                rows.push(Property::new(
                    "width",
                    "Width",
                    PropertyValue::Number(Some(p.width)),
                ));
                rows.push(Property::new(
                    "length",
                    "Length",
                    PropertyValue::Number(Some(p.length)),
                ));
                rows.push(Property::new(
                    "unit",
                    "Units",
                    choice(
                        p.unit,
                        LengthUnit::ALL.iter().map(|u| u.to_string()).collect(),
                    ),
                ));
            }
            NodeKind::Region(r) => {
                rows.push(Property::new(
                    "region_type",
                    "Region Type",
                    choice(r.region_type, RegionType::options()),
                ));
                rows.push(Property::new(
                    "soil_moisture",
                    "Soil Moisture",
                    choice(r.soil_moisture, SoilMoisture::options()),
                ));
                rows.push(Property::new(
                    "soil_type",
                    "Soil Type",
                    choice(r.soil_type, SoilType::options()),
                ));
                rows.push(Property::new(
                    "sun_exposure",
                    "Sun Exposure",
                    choice(r.sun_exposure, SunExposure::options()),
                ));
            }
        }
        rows
    }
}

fn parse_number(key: &str, raw: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| Error::invalid(key, format!("'{}' is not a number", raw.trim())))?;
    if !value.is_finite() {
        return Err(Error::invalid(key, "must be a finite number"));
    }
    Ok(value)
}

fn check_coordinate(key: &str, value: f64, limit: f64) -> Result<f64> {
    if !value.is_finite() || !(-limit..=limit).contains(&value) {
        return Err(Error::invalid(
            key,
            format!("must be between -{} and {}", limit, limit),
        ));
    }
    Ok(value)
}

fn check_dimension(key: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::invalid(key, "must be greater than zero"));
    }
    Ok(value)
}

/// Empty input clears the coordinate.
fn parse_coordinate(key: &str, raw: &str, limit: f64) -> Result<Option<f64>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    check_coordinate(key, parse_number(key, raw)?, limit).map(Some)
}

fn parse_dimension(key: &str, raw: &str) -> Result<f64> {
    check_dimension(key, parse_number(key, raw)?)
}

impl ProjectProperties {
    /// Applies the same range checks as editing through the properties panel.
    pub fn validate(&self) -> Result<()> {
        if let Some(latitude) = self.latitude {
            check_coordinate("latitude", latitude, 90.0)?;
        }
        if let Some(longitude) = self.longitude {
            check_coordinate("longitude", longitude, 180.0)?;
        }
        check_dimension("width", self.width)?;
        check_dimension("length", self.length)?;
        Ok(())
    }
}

impl ProjectTree {
    /// Checks every node's attributes, e.g. after reading a project file.
    pub fn validate(&self) -> Result<()> {
        for (_, node) in self.walk() {
            if node.name.trim().is_empty() {
                return Err(Error::invalid("name", format!("node {} has no name", node.id)));
            }
            if let NodeKind::Project(props) = &node.kind {
                props.validate()?;
            }
        }
        Ok(())
    }

    /// Parses `raw` for the property `key` of node `id` and applies it.
    ///
    /// Nothing changes when validation fails.
    pub fn set_property(&mut self, id: NodeId, key: &str, raw: &str) -> Result<()> {
        if key == "name" {
            return self.rename(id, raw.trim());
        }

        let node = self
            .get_mut(id)
            .ok_or_else(|| Error::NodeNotFound(id.to_string()))?;

        match &mut node.kind {
            NodeKind::Project(p) => match key {
                "latitude" => p.latitude = parse_coordinate(key, raw, 90.0)?,
                "longitude" => p.longitude = parse_coordinate(key, raw, 180.0)?,
                "width" => p.width = parse_dimension(key, raw)?,
                "length" => p.length = parse_dimension(key, raw)?,
                "unit" => p.unit = raw.parse().map_err(|e: String| Error::invalid(key, e))?,
                _ => return Err(Error::invalid(key, "unknown project property")),
            },
            NodeKind::Region(r) => match key {
                "region_type" => {
                    r.region_type = raw.parse().map_err(|e: String| Error::invalid(key, e))?
                }
                "soil_moisture" => {
                    r.soil_moisture = raw.parse().map_err(|e: String| Error::invalid(key, e))?
                }
                "soil_type" => {
                    r.soil_type = raw.parse().map_err(|e: String| Error::invalid(key, e))?
                }
                "sun_exposure" => {
                    r.sun_exposure = raw.parse().map_err(|e: String| Error::invalid(key, e))?
                }
                _ => return Err(Error::invalid(key, "unknown region property")),
            },
        }
        tracing::debug!("Set {} on {} to '{}'", key, id, raw);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::{ProjectProperties, RegionProperties};
    use super::*;

    #[test]
    fn test_project_rows() {
        let mut tree = ProjectTree::new();
        let id = tree.add_project("Plot", ProjectProperties::default());
        let rows = tree.get(id).unwrap().properties();
        let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["name", "latitude", "longitude", "width", "length", "unit"]
        );
        assert_eq!(rows[1].value, PropertyValue::Number(None));
        assert_eq!(rows[5].value.display_text(), "feet");
    }

    #[test]
    fn test_region_rows_offer_all_options() {
        let mut tree = ProjectTree::new();
        let project = tree.add_project("Plot", ProjectProperties::default());
        let region = tree
            .add_region(project, "Bed", RegionProperties::default())
            .unwrap();
        let rows = tree.get(region).unwrap().properties();
        match &rows[1].value {
            PropertyValue::Choice { selected, options } => {
                assert_eq!(selected, "meadow");
                assert_eq!(options.len(), 10);
            }
            other => panic!("expected a choice, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_value_leaves_node_unchanged() {
        let mut tree = ProjectTree::new();
        let id = tree.add_project("Plot", ProjectProperties::default());
        assert!(tree.set_property(id, "width", "-4").is_err());
        assert!(tree.set_property(id, "width", "abc").is_err());
        assert!(tree.set_property(id, "soil_type", "clay").is_err());
        assert_eq!(tree.get(id).unwrap().project_properties().unwrap().width, 100.0);
    }

    #[test]
    fn test_validate_project_properties() {
        assert!(ProjectProperties::default().validate().is_ok());

        let bad_width = ProjectProperties {
            width: -40.0,
            ..ProjectProperties::default()
        };
        assert!(matches!(
            bad_width.validate(),
            Err(Error::InvalidValue { ref field, .. }) if field == "width"
        ));

        let bad_latitude = ProjectProperties {
            latitude: Some(500.0),
            ..ProjectProperties::default()
        };
        assert!(matches!(
            bad_latitude.validate(),
            Err(Error::InvalidValue { ref field, .. }) if field == "latitude"
        ));
    }
}
