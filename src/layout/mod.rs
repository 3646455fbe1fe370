//! Grid layout engine
//!
//! [`KoalaLayout`] maps per-component [`Constraint`]s to pixel rectangles;
//! [`infer_grid`] goes the other way, deriving a grid and constraints from
//! existing pixel rectangles.

pub mod config;
pub mod constraints;
pub mod engine;
pub mod error;
pub mod grid;
pub mod inference;
pub mod types;

pub use config::LayoutConfig;
pub use constraints::{Anchor, Constraint, ConstraintStore, Fill, GridPosition, GridSpan};
pub use engine::{KoalaLayout, LayoutChild, Placement, Widget};
pub use error::LayoutError;
pub use grid::{GridLattice, GridSpec};
pub use inference::{infer_grid, AxisSet, InferenceItem, InferredGrid};
pub use types::*;
