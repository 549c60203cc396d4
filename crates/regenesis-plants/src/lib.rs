//! # ReGenesis Plants
//!
//! A small database of native plants (name, height in feet, bloom colour)
//! with filtering, a working selection for a plot, and JSON persistence.
//!
//! ```rust
//! use regenesis_plants::PlantDatabase;
//!
//! let db = PlantDatabase::starter_catalog();
//! let short: Vec<_> = db.filter_by_height(None, Some(2));
//! assert!(short.iter().all(|p| p.height_ft <= 2));
//! ```

pub mod catalog;
pub mod database;
pub mod error;
pub mod plant;

pub use database::PlantDatabase;
pub use error::{PlantError, PlantResult};
pub use plant::Plant;
