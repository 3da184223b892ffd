use ndarray_linalg::error::LinalgError;
use thiserror::Error;

/// Caller-side wiring problems detected while scoring a split.
///
/// Statistical degeneracies (an empty daughter, too few observations for
/// a decomposition, ...) are not errors: they score `0.0`.
#[derive(Debug, Error)]
pub enum SplitStatisticError {
    #[error("missing input: {0}")]
    MissingInput(&'static str),

    #[error("{field} has {found} entries, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{0} is out of ascending order")]
    Unordered(&'static str),

    #[error("factor level {level} outside 1..={max_level}")]
    LevelOutOfRange { level: f64, max_level: usize },

    #[error("event type {code} outside 1..={event_type_size}")]
    EventTypeOutOfRange { code: u32, event_type_size: usize },

    #[error(transparent)]
    Linalg(#[from] LinalgError),
}
