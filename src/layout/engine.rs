//! Grid layout computation
//!
//! [`KoalaLayout`] partitions a container's client area into a grid of
//! equally sized cells and places every child inside the cells its
//! [`Constraint`] names.
//!
//! ## Layout pass
//!
//! 1. **Extent discovery**: walk the children in order, resolving `Relative`
//!    origins from the flow cursor and counting `Remainder` spans as one cell,
//!    and grow the grid until every constraint fits.
//! 2. **Lattice**: precompute the pixel coordinate of every grid line once
//!    (see [`GridLattice`]), so neighbouring cells share boundary pixels.
//! 3. **Placement**: walk the children again with a fresh cursor, now with
//!    `Remainder` reaching the final grid edge, take the cell rectangle from
//!    the lattice, remove the constraint insets, then apply fill and anchor.
//!
//! The flow cursor moves on both axes at once: after each child it sits at
//! `(gridX + gridWidth, gridY + gridHeight)`.

use std::hash::Hash;

use tracing::{debug, trace};

use super::config::LayoutConfig;
use super::constraints::{Constraint, ConstraintStore, GridSpan};
use super::error::LayoutError;
use super::grid::{GridLattice, GridSpec};
use super::types::{ContainerGeometry, Insets, Rect, Size};

/// What the layout needs to know about a child component
///
/// Implemented by the toolkit adapter. The order children are handed to the
/// layout in decides how `Relative` and `Remainder` resolve, so it must be
/// stable across calls.
pub trait LayoutChild {
    type Key: Eq + Hash + Clone;

    /// Identity used to look up the child's constraint
    fn key(&self) -> &Self::Key;

    fn preferred_size(&self) -> Size;

    fn minimum_size(&self) -> Size;

    /// Current on-screen bounds
    fn bounds(&self) -> Rect;

    fn set_bounds(&mut self, bounds: Rect);
}

/// A plain child record, for adapters that snapshot their components
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Widget<K> {
    pub key: K,
    pub preferred: Size,
    pub minimum: Size,
    pub bounds: Rect,
}

impl<K> Widget<K> {
    /// A widget whose minimum size equals its preferred size, not yet placed
    pub fn new(key: K, preferred: Size) -> Self {
        Self {
            key,
            preferred,
            minimum: preferred,
            bounds: Rect::zero(),
        }
    }

    pub fn with_minimum(mut self, minimum: Size) -> Self {
        self.minimum = minimum;
        self
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }
}

impl<K: Eq + Hash + Clone> LayoutChild for Widget<K> {
    type Key = K;

    fn key(&self) -> &K {
        &self.key
    }

    fn preferred_size(&self) -> Size {
        self.preferred
    }

    fn minimum_size(&self) -> Size {
        self.minimum
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }
}

/// Target rectangle computed for one child
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement<K> {
    pub key: K,
    pub bounds: Rect,
    /// Whether `bounds` differs from the child's current bounds
    pub changed: bool,
}

/// Cells a child covers once its sentinels are resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellRange {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

impl CellRange {
    fn end_x(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    fn end_y(&self) -> u32 {
        self.y.saturating_add(self.height)
    }
}

/// Cursor that `Relative` origins are taken from
#[derive(Debug, Default)]
struct FlowCursor {
    x: u32,
    y: u32,
}

impl FlowCursor {
    /// Resolve `constraint` at the cursor and advance past it.
    ///
    /// Without a final grid, `Remainder` counts as a single cell.
    fn advance(&mut self, constraint: &Constraint, grid: Option<GridSpec>) -> CellRange {
        let x = constraint.grid_x.resolve(self.x);
        let y = constraint.grid_y.resolve(self.y);
        let (width, height) = match grid {
            Some(grid) => (
                constraint.grid_width.resolve(x, grid.columns()),
                constraint.grid_height.resolve(y, grid.rows()),
            ),
            None => (
                constraint.grid_width.provisional(),
                constraint.grid_height.provisional(),
            ),
        };
        let range = CellRange {
            x,
            y,
            width,
            height,
        };
        self.x = range.end_x();
        self.y = range.end_y();
        range
    }
}

/// Grid layout for one container
#[derive(Debug, Clone)]
pub struct KoalaLayout<K> {
    store: ConstraintStore<K>,
    grid: GridSpec,
}

impl<K: Eq + Hash + Clone> Default for KoalaLayout<K> {
    fn default() -> Self {
        Self {
            store: ConstraintStore::default(),
            grid: GridSpec::default(),
        }
    }
}

impl<K: Eq + Hash + Clone> KoalaLayout<K> {
    /// Create a layout with a `columns` × `rows` grid
    pub fn new(columns: u32, rows: u32) -> Result<Self, LayoutError> {
        Ok(Self {
            store: ConstraintStore::default(),
            grid: GridSpec::new(columns, rows)?,
        })
    }

    pub fn with_config(config: &LayoutConfig) -> Result<Self, LayoutError> {
        let grid = GridSpec::new(config.columns, config.rows)?;
        debug!(
            columns = grid.columns(),
            rows = grid.rows(),
            "creating koala layout"
        );
        Ok(Self {
            store: ConstraintStore::new(config.default_constraint.clone()),
            grid,
        })
    }

    pub fn grid(&self) -> GridSpec {
        self.grid
    }

    pub fn grid_columns(&self) -> u32 {
        self.grid.columns()
    }

    pub fn grid_rows(&self) -> u32 {
        self.grid.rows()
    }

    pub fn set_grid_columns(&mut self, columns: u32) -> Result<(), LayoutError> {
        self.grid.set_columns(columns)
    }

    pub fn set_grid_rows(&mut self, rows: u32) -> Result<(), LayoutError> {
        self.grid.set_rows(rows)
    }

    pub fn set_constraints(&mut self, key: K, constraint: Constraint) {
        self.store.set(key, constraint);
    }

    /// A copy of the child's constraint; unseen children get the default
    pub fn get_constraints(&mut self, key: &K) -> Constraint {
        self.store.get(key)
    }

    /// Forget a detached child
    pub fn remove_constraints(&mut self, key: &K) {
        self.store.remove(key);
    }

    pub fn constraints(&self) -> &ConstraintStore<K> {
        &self.store
    }

    /// Grow the grid until every child's cells fit
    fn discover_extent<C>(&mut self, children: &[C])
    where
        C: LayoutChild<Key = K>,
    {
        let mut cursor = FlowCursor::default();
        let mut columns = 0;
        let mut rows = 0;
        for child in children {
            let range = cursor.advance(self.store.lookup(child.key()), None);
            columns = columns.max(range.end_x());
            rows = rows.max(range.end_y());
        }
        if self.grid.grow_to(columns, rows) {
            debug!(
                columns = self.grid.columns(),
                rows = self.grid.rows(),
                "grid grew to fit constraints"
            );
        }
    }

    /// Compute the target rectangle of every child.
    ///
    /// Grows the grid when a constraint reaches past it.
    #[tracing::instrument(skip_all, fields(children = children.len()))]
    pub fn solve<C>(&mut self, container: &ContainerGeometry, children: &[C]) -> Vec<Placement<K>>
    where
        C: LayoutChild<Key = K>,
    {
        self.discover_extent(children);

        let grid = self.grid;
        let lattice = GridLattice::new(container.view(), grid);
        let mut cursor = FlowCursor::default();
        let mut placements = Vec::with_capacity(children.len());

        for child in children {
            let constraint = self.store.lookup(child.key());
            let range = cursor.advance(constraint, Some(grid));
            let bounds = place(&lattice, range, constraint, child.preferred_size());
            trace!(?range, ?bounds, "placed child");
            placements.push(Placement {
                key: child.key().clone(),
                bounds,
                changed: bounds != child.bounds(),
            });
        }
        placements
    }

    /// Rectangles for the children whose bounds must change
    pub fn compute_layout<C>(
        &mut self,
        container: &ContainerGeometry,
        children: &[C],
    ) -> Vec<Placement<K>>
    where
        C: LayoutChild<Key = K>,
    {
        self.solve(container, children)
            .into_iter()
            .filter(|placement| placement.changed)
            .collect()
    }

    /// Lay out the children in place. Returns how many were moved or resized.
    pub fn layout_container<C>(&mut self, container: &ContainerGeometry, children: &mut [C]) -> usize
    where
        C: LayoutChild<Key = K>,
    {
        let placements = self.solve(container, children);
        let mut moved = 0;
        for (child, placement) in children.iter_mut().zip(placements) {
            if placement.changed {
                child.set_bounds(placement.bounds);
                moved += 1;
            }
        }
        moved
    }

    /// Smallest container extent the children accept.
    ///
    /// Per child `((gridX + gridWidth) * minimum) / gridWidth`, maximum over
    /// children. Spans that are not a positive count contribute 1.
    pub fn minimum_extent<C>(&mut self, children: &[C]) -> Size
    where
        C: LayoutChild<Key = K>,
    {
        let mut cursor = FlowCursor::default();
        let mut extent = Size::zero();
        for child in children {
            let constraint = self.store.lookup(child.key());
            let range = cursor.advance(constraint, None);
            let minimum = child.minimum_size();
            let width = match constraint.grid_width.positive() {
                Some(span) => scale(range.end_x(), minimum.width, span),
                None => 1,
            };
            let height = match constraint.grid_height.positive() {
                Some(span) => scale(range.end_y(), minimum.height, span),
                None => 1,
            };
            extent.width = extent.width.max(width);
            extent.height = extent.height.max(height);
        }
        extent
    }

    /// Container extent at which every child gets its preferred size.
    ///
    /// Estimates one cell as the largest `preferred / span` plus constraint
    /// insets over all children, then multiplies by the grid dimension and
    /// adds the container insets. The estimate ignores how spans are mixed.
    pub fn preferred_extent<C>(&mut self, container_insets: &Insets, children: &[C]) -> Size
    where
        C: LayoutChild<Key = K>,
    {
        let mut cell_width = 0_i64;
        let mut cell_height = 0_i64;
        for child in children {
            let constraint = self.store.lookup(child.key());
            let preferred = constraint.padded(child.preferred_size());
            let width = per_cell(preferred.width, constraint.grid_width)
                + i64::from(constraint.insets.horizontal());
            let height = per_cell(preferred.height, constraint.grid_height)
                + i64::from(constraint.insets.vertical());
            cell_width = cell_width.max(width);
            cell_height = cell_height.max(height);
        }
        Size::new(
            saturate(
                cell_width * i64::from(self.grid.columns())
                    + i64::from(container_insets.horizontal()),
            ),
            saturate(
                cell_height * i64::from(self.grid.rows()) + i64::from(container_insets.vertical()),
            ),
        )
    }
}

/// One cell's share of `pixels`; 1 when the span is not a positive count
fn per_cell(pixels: i32, span: GridSpan) -> i64 {
    span.positive().map_or(1, |span| i64::from(pixels) / i64::from(span))
}

fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// `(cells * pixels) / span` without intermediate overflow
fn scale(cells: u32, pixels: i32, span: u32) -> i32 {
    saturate(i64::from(cells) * i64::from(pixels) / i64::from(span))
}

/// Fit a child inside its cells
fn place(lattice: &GridLattice, range: CellRange, constraint: &Constraint, preferred: Size) -> Rect {
    // A Remainder span can push later Relative children past the grid edge;
    // they collapse onto the edge instead of indexing outside the lattice.
    let x = range.x.min(lattice.columns());
    let y = range.y.min(lattice.rows());
    let end_x = range.end_x().clamp(x, lattice.columns());
    let end_y = range.end_y().clamp(y, lattice.rows());
    if end_x - x != range.width || end_y - y != range.height {
        debug!(?range, "constraint reaches past the grid, clamping");
    }

    let cell = lattice
        .cell(x, y, end_x - x, end_y - y)
        .inset(&constraint.insets);
    let size = constraint
        .fill
        .resolve(cell.size(), constraint.padded(preferred));
    let origin = constraint.anchor.position(cell, size);
    Rect::new(origin.x, origin.y, size.width, size.height)
}
