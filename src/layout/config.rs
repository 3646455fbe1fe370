//! Configuration for the layout engine

use super::constraints::Constraint;

/// Configuration options for a container's layout
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Initial number of grid columns
    pub columns: u32,

    /// Initial number of grid rows
    pub rows: u32,

    /// Constraint copied for components that were never given one
    pub default_constraint: Constraint,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            columns: 1,
            rows: 1,
            default_constraint: Constraint::default(),
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial grid dimensions
    pub fn with_grid(mut self, columns: u32, rows: u32) -> Self {
        self.columns = columns;
        self.rows = rows;
        self
    }

    /// Set the constraint unregistered components start from
    pub fn with_default_constraint(mut self, constraint: Constraint) -> Self {
        self.default_constraint = constraint;
        self
    }
}
