//! Errors reported at the public boundary of a [`SegmentTree`](crate::SegmentTree).

use thiserror::Error;

/// Why a tree operation was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("region {region} is not inside the grid {bounds}")]
    OutOfBounds { region: String, bounds: String },
    #[error("expected {expected} initial values, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("extent {extent} on axis {axis} must be positive")]
    InvalidExtent { axis: usize, extent: i64 },
    #[error("grid has {actual} axes but the tree was requested with {expected}")]
    AxisCountMismatch { expected: usize, actual: usize },
    #[error("grid is too large to address")]
    CapacityOverflow,
}

/// Result alias for tree operations.
pub type Result<T> = std::result::Result<T, TreeError>;

impl TreeError {
    pub(crate) fn out_of_bounds(region: impl ToString, bounds: impl ToString) -> Self {
        Self::OutOfBounds {
            region: region.to_string(),
            bounds: bounds.to_string(),
        }
    }

    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        insta::assert_snapshot!(
            TreeError::out_of_bounds("[0, 5)", "[0, 4)").to_string(),
            @"region [0, 5) is not inside the grid [0, 4)"
        );
        insta::assert_snapshot!(
            TreeError::DimensionMismatch { expected: 16, actual: 15 }.to_string(),
            @"expected 16 initial values, got 15"
        );
        insta::assert_snapshot!(
            TreeError::InvalidExtent { axis: 1, extent: 0 }.to_string(),
            @"extent 0 on axis 1 must be positive"
        );
    }
}
