//! Error types for the cfep-flux crate.

/// Error type for all fallible operations in the cfep-flux crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FluxError {
    /// Returned when input data is empty.
    #[error("input data is empty")]
    EmptyData,

    /// Returned when there are too few samples.
    #[error("insufficient data: got {n} samples, need at least {min}")]
    InsufficientData {
        /// Number of samples provided.
        n: usize,
        /// Minimum required.
        min: usize,
    },

    /// Returned when input contains NaN or infinity.
    #[error("input data contains non-finite values")]
    NonFiniteData,

    /// Returned when a grid spacing is not finite and positive.
    #[error("invalid grid spacing: {dx} (must be finite and > 0)")]
    InvalidSpacing {
        /// The rejected spacing.
        dx: f64,
    },

    /// Returned when a lag is zero.
    #[error("invalid lag: {lag} (must be >= 1)")]
    InvalidLag {
        /// The rejected lag.
        lag: usize,
    },

    /// Returned when the absorbing boundaries are not ordered `x0 < x1`.
    #[error("invalid boundaries: x0 = {x0}, x1 = {x1} (need x0 < x1)")]
    InvalidBoundaries {
        /// Lower boundary.
        x0: f64,
        /// Upper boundary.
        x1: f64,
    },

    /// Returned when an estimator parameter is out of range.
    #[error("invalid parameter: {reason}")]
    InvalidParameter {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a logarithm or division would leave the real domain.
    #[error("numeric domain error: {reason}")]
    Domain {
        /// Description of the offending quantity.
        reason: String,
    },

    /// Returned when a position is absent from a tabulated curve.
    #[error("no tabulated value at position {x}")]
    MissingPosition {
        /// The position that was looked up.
        x: f64,
    },
}

/// Rejects slices containing NaN or infinity.
pub(crate) fn ensure_finite(data: &[f64]) -> Result<(), FluxError> {
    if data.iter().all(|x| x.is_finite()) {
        Ok(())
    } else {
        Err(FluxError::NonFiniteData)
    }
}
