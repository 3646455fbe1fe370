//! Grid dimensions and the precomputed grid-line lattice

use serde::{Deserialize, Serialize};

use super::error::LayoutError;
use super::types::{Point, Rect};

/// Number of columns and rows of a container's grid
///
/// Both dimensions are always positive. Layout passes grow the grid to fit
/// the constraints they see; nothing shrinks it except an explicit setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGridSpec")]
pub struct GridSpec {
    columns: u32,
    rows: u32,
}

#[derive(Deserialize)]
struct RawGridSpec {
    columns: u32,
    rows: u32,
}

impl TryFrom<RawGridSpec> for GridSpec {
    type Error = LayoutError;

    fn try_from(raw: RawGridSpec) -> Result<Self, Self::Error> {
        GridSpec::new(raw.columns, raw.rows)
    }
}

impl GridSpec {
    pub fn new(columns: u32, rows: u32) -> Result<Self, LayoutError> {
        if columns == 0 || rows == 0 {
            return Err(LayoutError::empty_grid(columns, rows));
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn set_columns(&mut self, columns: u32) -> Result<(), LayoutError> {
        *self = Self::new(columns, self.rows)?;
        Ok(())
    }

    pub fn set_rows(&mut self, rows: u32) -> Result<(), LayoutError> {
        *self = Self::new(self.columns, rows)?;
        Ok(())
    }

    /// Grow to at least `columns` × `rows`. Returns whether anything changed.
    pub fn grow_to(&mut self, columns: u32, rows: u32) -> bool {
        let before = *self;
        self.columns = self.columns.max(columns);
        self.rows = self.rows.max(rows);
        *self != before
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            columns: 1,
            rows: 1,
        }
    }
}

/// Pixel coordinates of every grid line of a view
///
/// Cells are always read from this lattice, so neighbouring cells share
/// their boundary pixel exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLattice {
    xs: Vec<i32>,
    ys: Vec<i32>,
}

impl GridLattice {
    /// Line `i` sits at `view.x + floor(i * view.width / columns)`
    pub fn new(view: Rect, grid: GridSpec) -> Self {
        Self {
            xs: grid_lines(view.x, view.width, grid.columns),
            ys: grid_lines(view.y, view.height, grid.rows),
        }
    }

    pub fn columns(&self) -> u32 {
        (self.xs.len() - 1) as u32
    }

    pub fn rows(&self) -> u32 {
        (self.ys.len() - 1) as u32
    }

    /// The vertical grid lines, left to right
    pub fn column_lines(&self) -> &[i32] {
        &self.xs
    }

    /// The horizontal grid lines, top to bottom
    pub fn row_lines(&self) -> &[i32] {
        &self.ys
    }

    /// Corner point where column line `i` meets row line `j`
    pub fn corner(&self, i: u32, j: u32) -> Point {
        Point::new(self.xs[i as usize], self.ys[j as usize])
    }

    /// Rectangle covering `width` × `height` cells from cell (`x`, `y`)
    ///
    /// Indices must lie within the lattice (`x + width <= columns`).
    pub fn cell(&self, x: u32, y: u32, width: u32, height: u32) -> Rect {
        let origin = self.corner(x, y);
        let far = self.corner(x + width, y + height);
        Rect::new(origin.x, origin.y, far.x - origin.x, far.y - origin.y)
    }
}

fn grid_lines(origin: i32, extent: i32, count: u32) -> Vec<i32> {
    let extent = i64::from(extent.max(0));
    let count = i64::from(count.max(1));
    (0..=count)
        .map(|i| origin + ((i * extent) / count) as i32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_grid() {
        assert!(GridSpec::new(0, 1).is_err());
        assert!(GridSpec::new(1, 0).is_err());
        assert!(GridSpec::new(3, 2).is_ok());
    }

    #[test]
    fn test_setters_keep_grid_positive() {
        let mut grid = GridSpec::new(2, 2).unwrap();
        assert!(grid.set_columns(0).is_err());
        assert_eq!(grid.columns(), 2);
        grid.set_rows(5).unwrap();
        assert_eq!(grid.rows(), 5);
    }

    #[test]
    fn test_grow_never_shrinks() {
        let mut grid = GridSpec::new(4, 4).unwrap();
        assert!(!grid.grow_to(2, 3));
        assert_eq!((grid.columns(), grid.rows()), (4, 4));
        assert!(grid.grow_to(6, 1));
        assert_eq!((grid.columns(), grid.rows()), (6, 4));
    }

    #[test]
    fn test_lattice_odd_width() {
        let lattice = GridLattice::new(Rect::new(0, 0, 201, 100), GridSpec::new(2, 1).unwrap());
        assert_eq!(lattice.column_lines(), &[0, 100, 201]);
        assert_eq!(lattice.row_lines(), &[0, 100]);
    }

    #[test]
    fn test_lattice_offsets_by_view_origin() {
        let lattice = GridLattice::new(Rect::new(5, 7, 30, 30), GridSpec::new(3, 2).unwrap());
        assert_eq!(lattice.column_lines(), &[5, 15, 25, 35]);
        assert_eq!(lattice.row_lines(), &[7, 22, 37]);
        assert_eq!(lattice.cell(1, 0, 2, 2), Rect::new(15, 7, 20, 30));
    }

    #[test]
    fn test_grid_spec_toml_validates() {
        let ok: GridSpec = toml::from_str("columns = 3\nrows = 2").unwrap();
        assert_eq!(ok, GridSpec::new(3, 2).unwrap());
        assert!(toml::from_str::<GridSpec>("columns = 0\nrows = 2").is_err());
    }
}
