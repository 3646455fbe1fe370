//! Koala Layout - a cell-based grid layout manager
//!
//! Components are placed on a rectangular grid of cells whose lines divide
//! the container's client area evenly. Each component carries a
//! [`Constraint`] naming its cell range, how it fills that range and where it
//! sits when it does not fill it. The crate also works backwards: given
//! components that are already positioned by pixel, [`infer_grid`] finds a
//! grid and constraints that reproduce them.
//!
//! # Example
//!
//! ```rust
//! use koala_layout::{layout_scene, Rect, Scene};
//!
//! let scene: Scene = r#"
//! [container]
//! width = 200
//! height = 100
//!
//! [[component]]
//! name = "panel"
//! preferred = { width = 50, height = 20 }
//! "#
//! .parse()
//! .unwrap();
//!
//! let report = layout_scene(&scene).unwrap();
//! assert_eq!(report.placements[0].bounds, Rect::new(0, 0, 200, 100));
//! ```

pub mod designer;
pub mod layout;
pub mod scene;

use std::fmt;

pub use designer::{dropped_constraint, grid_cell_at, resized_constraint, GridCell};
pub use layout::{
    infer_grid, Anchor, AxisSet, Constraint, ConstraintStore, ContainerGeometry, Fill,
    GridLattice, GridPosition, GridSpan, GridSpec, InferenceItem, InferredGrid, Insets,
    KoalaLayout, LayoutChild, LayoutConfig, LayoutError, Placement, Point, Rect, Size, Widget,
};
pub use scene::{Scene, SceneComponent, SceneContainer, SceneError};

use thiserror::Error;

/// Errors that can occur while running a scene through the layout
#[derive(Debug, Error)]
pub enum Error {
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),
}

/// Outcome of laying out a scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneReport {
    /// Grid dimensions after growing to fit every constraint
    pub grid: GridSpec,
    /// One placement per component, in scene order
    pub placements: Vec<Placement<String>>,
    pub preferred: Size,
    pub minimum: Size,
}

impl fmt::Display for SceneReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "grid {}x{}", self.grid.columns(), self.grid.rows())?;
        for placement in &self.placements {
            let b = placement.bounds;
            writeln!(
                f,
                "{} x={} y={} w={} h={} {}",
                placement.key,
                b.x,
                b.y,
                b.width,
                b.height,
                if placement.changed { "changed" } else { "unchanged" }
            )?;
        }
        writeln!(f, "preferred {}x{}", self.preferred.width, self.preferred.height)?;
        write!(f, "minimum {}x{}", self.minimum.width, self.minimum.height)
    }
}

/// Lay out every component of a scene
pub fn layout_scene(scene: &Scene) -> Result<SceneReport, Error> {
    let mut layout = scene.layout()?;
    let widgets = scene.widgets();
    let placements = layout.solve(&scene.container.geometry(), &widgets);
    let preferred = layout.preferred_extent(&scene.container.insets, &widgets);
    let minimum = layout.minimum_extent(&widgets);
    Ok(SceneReport {
        grid: layout.grid(),
        placements,
        preferred,
        minimum,
    })
}

/// Replace a scene's grid and constraints with ones inferred from its
/// components' bounds
pub fn infer_scene(scene: &Scene) -> Result<Scene, Error> {
    Ok(scene.inferred()?)
}

/// Grid cell a drop at `position` would target in the scene's container.
///
/// Uses the grid as it stands once the scene's constraints have grown it.
pub fn snap_scene(scene: &Scene, position: Point) -> Result<GridCell, Error> {
    let mut layout = scene.layout()?;
    let geometry = scene.container.geometry();
    layout.solve(&geometry, &scene.widgets());
    Ok(grid_cell_at(position, &geometry, layout.grid()))
}
