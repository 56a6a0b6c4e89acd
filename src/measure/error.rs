//! Error taxonomy for measurement operations.
//!
//! All variants are sequencing or programming errors. None of them are retried.

/// Failure raised by the measurement core or by a render surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeasureError {
    /// Source or style missing: `initialize` was skipped or the layers were torn down.
    #[error("render surface not ready: {0}")]
    SurfaceNotReady(String),

    #[error("source '{0}' is already registered")]
    DuplicateSource(String),

    #[error("layer '{0}' is already registered")]
    DuplicateLayer(String),

    /// A layer referenced, or a removal targeted, a source that does not exist.
    #[error("source '{0}' does not exist")]
    MissingSource(String),

    #[error("layer '{0}' does not exist")]
    MissingLayer(String),

    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

pub type MeasureResult<T> = Result<T, MeasureError>;
