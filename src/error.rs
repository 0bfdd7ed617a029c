//! Error types for the simulation core.

use thiserror::Error;

/// Errors surfaced by the simulation entry points.
///
/// The taxonomy is narrow on purpose: malformed geometry and coefficients are
/// rejected at construction time so that nothing in the tick loop can fail.
#[derive(Debug, Error)]
pub enum RippleError {
    /// Wall endpoints coincide (or nearly so), leaving the normal undefined.
    #[error("degenerate wall: segment length {length} is below the minimum")]
    DegenerateWall { length: f32 },

    /// A reflection or transmission coefficient outside `[0, 1]`.
    #[error("coefficient {name} = {value} is outside [0, 1]")]
    CoefficientOutOfRange { name: &'static str, value: f32 },

    /// A source handle that does not refer to a live source.
    #[error("unknown source handle: {0}")]
    UnknownSource(usize),
}

/// Convenience alias for `Result<T, RippleError>`.
pub type RippleResult<T> = Result<T, RippleError>;
