//! Plant database - manages the plant collection, the plot and the current
//! selection.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::STARTER_PLANTS;
use crate::error::{PlantError, PlantResult};
use crate::plant::Plant;

/// On-disk layout: `{"plants": [...]}`.
#[derive(Debug, Serialize, Deserialize)]
struct PlantFile {
    plants: Vec<Plant>,
}

#[derive(Debug, Clone, Default)]
pub struct PlantDatabase {
    plants: Vec<Plant>,
    selected: Vec<Plant>,
    plot: Option<(f64, f64)>,
}

impl PlantDatabase {
    /// Create a new empty database
    pub fn new() -> Self {
        Self::default()
    }

    /// Database pre-filled with the starter catalog.
    pub fn starter_catalog() -> Self {
        let mut db = Self::new();
        for (name, height, color) in STARTER_PLANTS {
            if let Err(e) = db.add_plant(*name, *height, *color) {
                tracing::warn!("Skipping starter plant: {}", e);
            }
        }
        db
    }

    /// Validates and appends a plant.
    pub fn add_plant(
        &mut self,
        name: impl Into<String>,
        height_ft: u32,
        color: impl Into<String>,
    ) -> PlantResult<&Plant> {
        let plant = Plant::new(name, height_ft, color)?;
        self.plants.push(plant);
        let index = self.plants.len() - 1;
        Ok(&self.plants[index])
    }

    /// Removes the first plant called `name`.
    pub fn remove_plant(&mut self, name: &str) -> Option<Plant> {
        let index = self.plants.iter().position(|p| p.name == name)?;
        Some(self.plants.remove(index))
    }

    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    pub fn len(&self) -> usize {
        self.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }

    /// Case-insensitive lookup by name.
    pub fn find(&self, name: &str) -> Option<&Plant> {
        let wanted = name.trim().to_lowercase();
        self.plants.iter().find(|p| p.name.to_lowercase() == wanted)
    }

    /// Plants whose height lies within the inclusive bounds; `None` leaves a
    /// side open.
    pub fn filter_by_height(&self, min: Option<u32>, max: Option<u32>) -> Vec<&Plant> {
        self.plants
            .iter()
            .filter(|p| min.is_none_or(|min| p.height_ft >= min))
            .filter(|p| max.is_none_or(|max| p.height_ft <= max))
            .collect()
    }

    /// Plants of the given colour (case-insensitive).
    pub fn filter_by_color(&self, color: &str) -> Vec<&Plant> {
        let wanted = color.trim().to_lowercase();
        self.plants
            .iter()
            .filter(|p| p.color.to_lowercase() == wanted)
            .collect()
    }

    /// Distinct colours, sorted.
    pub fn colors(&self) -> Vec<String> {
        self.plants
            .iter()
            .map(|p| p.color.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Sets the plot size in feet.
    pub fn set_plot_dimensions(&mut self, width: f64, length: f64) -> PlantResult<()> {
        if !(width > 0.0 && length > 0.0 && width.is_finite() && length.is_finite()) {
            return Err(PlantError::InvalidDimensions { width, length });
        }
        self.plot = Some((width, length));
        Ok(())
    }

    pub fn plot_dimensions(&self) -> Option<(f64, f64)> {
        self.plot
    }

    /// Adds a plant to the working selection; duplicates count separately.
    pub fn add_to_selection(&mut self, plant: Plant) {
        self.selected.push(plant);
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    pub fn selected(&self) -> &[Plant] {
        &self.selected
    }

    /// Number of selected plants per colour.
    pub fn color_distribution(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for plant in &self.selected {
            *counts.entry(plant.color.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Load plants from a JSON file. Every record is validated.
    pub fn load_from_file(path: impl AsRef<Path>) -> PlantResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let file: PlantFile = serde_json::from_str(&content)?;
        for plant in &file.plants {
            plant.validate()?;
        }
        tracing::info!(
            "Loaded {} plants from {}",
            file.plants.len(),
            path.as_ref().display()
        );
        Ok(Self {
            plants: file.plants,
            ..Self::default()
        })
    }

    /// Save plants to a pretty-printed JSON file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> PlantResult<()> {
        let file = PlantFile {
            plants: self.plants.clone(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }
}
