//! Form-designer geometry
//!
//! When a component is dropped into or resized inside a grid container, the
//! designer snaps the pixel position to grid lines and derives the
//! constraint the component should get. This module holds that arithmetic;
//! painting the drag feedback is left to the host.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::layout::{Constraint, ContainerGeometry, GridLattice, GridSpan, GridSpec, Insets};
use crate::layout::{GridPosition, Point, Rect, Size};

/// A cell position on the grid, not necessarily inside it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub column: u32,
    pub row: u32,
}

impl GridCell {
    pub fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }
}

/// Snap a pixel position to the grid cell a drop at that position targets.
///
/// The position is nudged forward by half the width of the cell being
/// entered, so it snaps to the nearest grid line rather than the one to its
/// left. Reaching the far edge of the view yields the cell one past the
/// grid, which is how a drop grows the grid.
pub fn grid_cell_at(position: Point, container: &ContainerGeometry, grid: GridSpec) -> GridCell {
    let lattice = GridLattice::new(container.view(), grid);
    GridCell::new(
        snap(position.x, lattice.column_lines()),
        snap(position.y, lattice.row_lines()),
    )
}

fn snap(position: i32, lines: &[i32]) -> u32 {
    let (Some(&first), Some(&far)) = (lines.first(), lines.last()) else {
        return 0;
    };
    let mut previous = first;
    let mut cell = 0;
    let mut probe = 0;
    for (i, &line) in lines[..lines.len() - 1].iter().enumerate() {
        probe = position + (line - previous) / 2;
        if probe < line {
            break;
        }
        cell = i as u32;
        previous = line;
    }
    if probe >= far {
        cell += 1;
    }
    cell
}

/// Constraint for a component dropped with its top-left corner at `origin`.
///
/// The component's insets are kept around it while snapping. Without an
/// existing constraint the span covers the snapped extent of the component,
/// at least one cell; with one, spans, fill and anchor carry over.
pub fn dropped_constraint(
    origin: Point,
    size: Size,
    existing: Option<&Constraint>,
    container: &ContainerGeometry,
    grid: GridSpec,
) -> Constraint {
    let insets = existing.map_or_else(Insets::zero, |c| c.insets);
    let top_left = grid_cell_at(
        Point::new(origin.x - insets.left, origin.y - insets.top),
        container,
        grid,
    );
    let bottom_right = grid_cell_at(
        Point::new(
            origin.x + size.width + insets.right,
            origin.y + size.height + insets.bottom,
        ),
        container,
        grid,
    );
    debug!(?top_left, ?bottom_right, "snapped dropped component");

    let (grid_width, grid_height) = match existing {
        Some(c) => (c.grid_width, c.grid_height),
        None => (
            GridSpan::Cells(bottom_right.column.saturating_sub(top_left.column).max(1)),
            GridSpan::Cells(bottom_right.row.saturating_sub(top_left.row).max(1)),
        ),
    };
    snapped(top_left, grid_width, grid_height, insets, existing)
}

/// Constraint for a component resized from `original` by `changes`.
///
/// Each field of `changes` is how far that edge moved outward.
pub fn resized_constraint(
    original: Rect,
    changes: Insets,
    existing: Option<&Constraint>,
    container: &ContainerGeometry,
    grid: GridSpec,
) -> Constraint {
    let insets = existing.map_or_else(Insets::zero, |c| c.insets);
    let top_left = grid_cell_at(
        Point::new(
            original.x - changes.left - insets.left,
            original.y - changes.top - insets.top,
        ),
        container,
        grid,
    );
    let bottom_right = grid_cell_at(
        Point::new(
            original.right() + changes.right + insets.right,
            original.bottom() + changes.bottom + insets.bottom,
        ),
        container,
        grid,
    );
    debug!(?top_left, ?bottom_right, "snapped resized component");

    snapped(
        top_left,
        GridSpan::Cells(bottom_right.column.saturating_sub(top_left.column).max(1)),
        GridSpan::Cells(bottom_right.row.saturating_sub(top_left.row).max(1)),
        insets,
        existing,
    )
}

fn snapped(
    cell: GridCell,
    grid_width: GridSpan,
    grid_height: GridSpan,
    insets: Insets,
    existing: Option<&Constraint>,
) -> Constraint {
    let defaults = Constraint::default();
    Constraint {
        grid_x: GridPosition::At(cell.column),
        grid_y: GridPosition::At(cell.row),
        grid_width,
        grid_height,
        fill: existing.map_or(defaults.fill, |c| c.fill),
        anchor: existing.map_or(defaults.anchor, |c| c.anchor),
        insets,
        ..defaults
    }
}
