use thiserror::Error;

/// Failures raised while generating a world. Unknown labels resolve to defaults and never
/// surface here.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WorldGenError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error(
        "grid dimensions differ: expected {expected_width}x{expected_height}, found {found_width}x{found_height}"
    )]
    DimensionMismatch {
        expected_width: u32,
        expected_height: u32,
        found_width: u32,
        found_height: u32,
    },
    #[error("grid of {width}x{height} needs {expected} values, got {found}")]
    GridLength {
        width: u32,
        height: u32,
        expected: usize,
        found: usize,
    },
}

impl WorldGenError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
