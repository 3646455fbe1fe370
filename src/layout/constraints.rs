//! Per-component placement constraints and the store that owns them

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{Insets, Point, Rect, Size};

/// Grid cell origin along one dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "CellRepr", into = "CellRepr")]
pub enum GridPosition {
    /// Place immediately after the previous component in child order
    Relative,
    /// An explicit zero-based cell index
    At(u32),
}

impl GridPosition {
    /// Substitute the flow cursor for `Relative`
    pub fn resolve(self, cursor: u32) -> u32 {
        match self {
            GridPosition::Relative => cursor,
            GridPosition::At(cell) => cell,
        }
    }
}

impl Default for GridPosition {
    fn default() -> Self {
        GridPosition::At(0)
    }
}

/// Number of cells a component covers along one dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "CellRepr", into = "CellRepr")]
pub enum GridSpan {
    /// Consume every cell up to the end of the grid
    Remainder,
    /// An explicit cell count
    Cells(u32),
}

impl GridSpan {
    /// Resolve against the grid extent. `Remainder` counts the cells from
    /// `start` to `extent`; it is never less than 1 for a start inside the grid.
    pub fn resolve(self, start: u32, extent: u32) -> u32 {
        match self {
            GridSpan::Remainder => extent.saturating_sub(start),
            GridSpan::Cells(cells) => cells,
        }
    }

    /// The span used while discovering the grid extent, before the extent is known
    pub fn provisional(self) -> u32 {
        match self {
            GridSpan::Remainder => 1,
            GridSpan::Cells(cells) => cells,
        }
    }

    /// A concrete, positive count; `None` for `Remainder` or zero
    pub fn positive(self) -> Option<u32> {
        match self {
            GridSpan::Cells(cells) if cells > 0 => Some(cells),
            _ => None,
        }
    }
}

impl Default for GridSpan {
    fn default() -> Self {
        GridSpan::Cells(1)
    }
}

/// Wire form shared by positions and spans: an integer or a keyword
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum CellRepr {
    Cell(u32),
    Keyword(CellKeyword),
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum CellKeyword {
    Relative,
    Remainder,
}

impl From<CellRepr> for GridPosition {
    fn from(repr: CellRepr) -> Self {
        match repr {
            CellRepr::Cell(cell) => GridPosition::At(cell),
            // "remainder" makes no sense as an origin; treat it as flow placement
            CellRepr::Keyword(_) => GridPosition::Relative,
        }
    }
}

impl From<GridPosition> for CellRepr {
    fn from(position: GridPosition) -> Self {
        match position {
            GridPosition::Relative => CellRepr::Keyword(CellKeyword::Relative),
            GridPosition::At(cell) => CellRepr::Cell(cell),
        }
    }
}

impl From<CellRepr> for GridSpan {
    fn from(repr: CellRepr) -> Self {
        match repr {
            CellRepr::Cell(cells) => GridSpan::Cells(cells),
            CellRepr::Keyword(_) => GridSpan::Remainder,
        }
    }
}

impl From<GridSpan> for CellRepr {
    fn from(span: GridSpan) -> Self {
        match span {
            GridSpan::Remainder => CellRepr::Keyword(CellKeyword::Remainder),
            GridSpan::Cells(cells) => CellRepr::Cell(cells),
        }
    }
}

/// How a component expands to fill its cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fill {
    None,
    Horizontal,
    Vertical,
    #[default]
    Both,
}

impl Fill {
    /// Size of the component inside a cell of extent `cell`
    pub fn resolve(self, cell: Size, preferred: Size) -> Size {
        let fit_width = preferred.width.min(cell.width);
        let fit_height = preferred.height.min(cell.height);
        match self {
            Fill::None => Size::new(fit_width, fit_height),
            Fill::Horizontal => Size::new(cell.width, fit_height),
            Fill::Vertical => Size::new(fit_width, cell.height),
            Fill::Both => cell,
        }
    }
}

/// Where an undersized component sits inside its cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    #[default]
    Center,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

/// Placement of a component along one axis of its cell
#[derive(Clone, Copy)]
enum Align {
    Start,
    Center,
    End,
}

impl Align {
    fn offset(self, free: i32) -> i32 {
        match self {
            Align::Start => 0,
            Align::Center => free / 2,
            Align::End => free,
        }
    }
}

impl Anchor {
    fn alignment(self) -> (Align, Align) {
        match self {
            Anchor::Center => (Align::Center, Align::Center),
            Anchor::North => (Align::Center, Align::Start),
            Anchor::NorthEast => (Align::End, Align::Start),
            Anchor::East => (Align::End, Align::Center),
            Anchor::SouthEast => (Align::End, Align::End),
            Anchor::South => (Align::Center, Align::End),
            Anchor::SouthWest => (Align::Start, Align::End),
            Anchor::West => (Align::Start, Align::Center),
            Anchor::NorthWest => (Align::Start, Align::Start),
        }
    }

    /// Origin of a component of `size` anchored inside `cell`
    pub fn position(self, cell: Rect, size: Size) -> Point {
        let (horizontal, vertical) = self.alignment();
        Point::new(
            cell.x + horizontal.offset(cell.width - size.width),
            cell.y + vertical.offset(cell.height - size.height),
        )
    }
}

/// Placement rule for one component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Constraint {
    pub grid_x: GridPosition,
    pub grid_y: GridPosition,
    pub grid_width: GridSpan,
    pub grid_height: GridSpan,
    pub fill: Fill,
    pub anchor: Anchor,
    pub insets: Insets,
    /// Carried for compatibility; the solver does not weigh cells
    pub weight_x: f64,
    pub weight_y: f64,
    /// Added to the preferred width
    pub pad_x: i32,
    /// Added to the preferred height
    pub pad_y: i32,
}

impl Default for Constraint {
    fn default() -> Self {
        Self {
            grid_x: GridPosition::At(0),
            grid_y: GridPosition::At(0),
            grid_width: GridSpan::Cells(1),
            grid_height: GridSpan::Cells(1),
            fill: Fill::Both,
            anchor: Anchor::Center,
            insets: Insets::zero(),
            weight_x: 0.0,
            weight_y: 0.0,
            pad_x: 0,
            pad_y: 0,
        }
    }
}

impl Constraint {
    /// A constraint covering `width` × `height` cells from (`x`, `y`)
    pub fn cell(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            grid_x: GridPosition::At(x),
            grid_y: GridPosition::At(y),
            grid_width: GridSpan::Cells(width),
            grid_height: GridSpan::Cells(height),
            ..Self::default()
        }
    }

    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    pub fn with_pad(mut self, pad_x: i32, pad_y: i32) -> Self {
        self.pad_x = pad_x;
        self.pad_y = pad_y;
        self
    }

    pub fn with_weights(mut self, weight_x: f64, weight_y: f64) -> Self {
        self.weight_x = weight_x;
        self.weight_y = weight_y;
        self
    }

    /// Preferred size grown by the pad, floored at zero
    pub fn padded(&self, preferred: Size) -> Size {
        Size::new(
            (preferred.width + self.pad_x).max(0),
            (preferred.height + self.pad_y).max(0),
        )
    }
}

/// Maps component keys to their constraints for one container
///
/// Looking up a component that was never registered silently registers a
/// copy of the default constraint.
#[derive(Debug, Clone)]
pub struct ConstraintStore<K> {
    entries: HashMap<K, Constraint>,
    default: Constraint,
}

impl<K: Eq + Hash + Clone> Default for ConstraintStore<K> {
    fn default() -> Self {
        Self::new(Constraint::default())
    }
}

impl<K: Eq + Hash + Clone> ConstraintStore<K> {
    pub fn new(default: Constraint) -> Self {
        Self {
            entries: HashMap::new(),
            default,
        }
    }

    /// Store `constraint` for `key`, replacing any previous entry
    pub fn set(&mut self, key: K, constraint: Constraint) {
        self.entries.insert(key, constraint);
    }

    /// A copy of the constraint for `key`, registering the default on first access
    pub fn get(&mut self, key: &K) -> Constraint {
        self.lookup(key).clone()
    }

    /// The live constraint for `key`, registering the default on first access
    pub(crate) fn lookup(&mut self, key: &K) -> &Constraint {
        if !self.entries.contains_key(key) {
            debug!("registering default constraint for unseen component");
            self.entries.insert(key.clone(), self.default.clone());
        }
        &self.entries[key]
    }

    /// Drop the entry for `key`; a missing entry is not an error
    pub fn remove<Q>(&mut self, key: &Q) -> Option<Constraint>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.remove(key)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
