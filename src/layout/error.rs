//! Error types for the layout engine

use thiserror::Error;

/// Errors that can occur while configuring a layout
///
/// Layout passes themselves never fail: degenerate input produces
/// degenerate output.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// A grid dimension or other argument outside its valid range
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },
}

impl LayoutError {
    /// Create an invalid argument error
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Error for a grid that would have no columns or no rows
    pub fn empty_grid(columns: u32, rows: u32) -> Self {
        Self::invalid_argument(format!(
            "grid dimensions must be positive, got {}x{}",
            columns, rows
        ))
    }
}
