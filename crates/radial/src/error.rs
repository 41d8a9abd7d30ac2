use derive_more::Display;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Axis {
    #[display("sector")]
    Sector,
    #[display("ring")]
    Ring,
    #[display("band")]
    Band,
}

/// Indices are never wrapped: anything outside the layout's domain is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("{axis} index {index} is out of range (limit {limit})")]
    InvalidIndex { axis: Axis, index: f64, limit: usize },
    #[error("Invalid layout config: {0}")]
    InvalidConfig(&'static str),
    #[error("Expected {expected} day labels, got {actual}")]
    LabelCount { expected: usize, actual: usize },
}

impl LayoutError {
    pub(crate) fn sector(index: usize, limit: usize) -> Self {
        Self::InvalidIndex {
            axis: Axis::Sector,
            index: index as f64,
            limit,
        }
    }

    pub(crate) fn ring(index: f64, limit: usize) -> Self {
        Self::InvalidIndex {
            axis: Axis::Ring,
            index,
            limit,
        }
    }

    pub(crate) fn band(index: usize, limit: usize) -> Self {
        Self::InvalidIndex {
            axis: Axis::Band,
            index: index as f64,
            limit,
        }
    }
}
