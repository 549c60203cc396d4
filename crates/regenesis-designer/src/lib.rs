//! # ReGenesis Designer
//!
//! GUI-independent model behind the garden layout workspace. Everything the
//! desktop front-end shows or edits lives here so it can be tested without a
//! display.
//!
//! ## Core Components
//!
//! - **Project tree**: projects with nested regions and their horticultural
//!   attributes, plus the properties-panel model used to edit them
//! - **Region polygons**: editable boundaries stored in world units
//! - **Viewport**: pan/zoom mapping between screen pixels and world units,
//!   including the auto-zoom heuristic
//! - **Rulers**: "nice" tick interval selection and tick layout
//! - **Workspace**: the interaction controller that turns pointer events into
//!   vertex drags, insertions, deletions and pans
//! - **Project files**: JSON save/load of the tree and its boundaries
//!
//! ## Architecture
//!
//! ```text
//! WorkspaceState
//!   ├── ProjectTree (projects → regions)
//!   ├── RegionPolygon per region (world space)
//!   ├── Viewport (screen <-> world)
//!   └── Interaction (press / drag / release state)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use regenesis_designer::{sample_project, WorkspaceState};
//!
//! let mut workspace = WorkspaceState::new();
//! let project = workspace.load_tree(sample_project()).expect("sample has a project");
//! workspace.select_node(Some(project));
//! assert!(!workspace.drawing_mode());
//! ```

pub mod geometry;
pub mod model;
pub mod polygon;
pub mod project;
pub mod rulers;
pub mod serialization;
pub mod viewport;
pub mod workspace;

pub use geometry::{distance_point_to_segment, nearest_segment, SegmentProjection};
pub use model::{Bounds, Point, Property, PropertyValue};
pub use polygon::RegionPolygon;
pub use project::{
    sample_project, NodeId, NodeKind, ProjectProperties, ProjectTree, RegionProperties,
    RegionType, SoilMoisture, SoilType, SunExposure, TreeNode,
};
pub use rulers::{nice_tick_interval, ruler_ticks, RulerAxis, RulerTick};
pub use serialization::ProjectDocument;
pub use viewport::Viewport;
pub use workspace::{EditMode, PointerOutcome, WorkspaceState};
