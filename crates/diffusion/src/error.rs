//! Error types for the cfep-diffusion crate.

/// Error type for all fallible operations in the cfep-diffusion crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DiffusionError {
    /// Returned when the time step is not finite and positive.
    #[error("invalid time step: {dt} (must be finite and > 0)")]
    InvalidTimeStep {
        /// The rejected step.
        dt: f64,
    },

    /// Returned when the number of substeps is zero.
    #[error("substeps must be at least 1")]
    ZeroSubsteps,

    /// Returned when the initial value is not finite.
    #[error("initial value is not finite: {x0}")]
    NonFiniteStart {
        /// The rejected initial value.
        x0: f64,
    },

    /// Returned when the diffusion coefficient is negative or not finite.
    #[error("invalid diffusion coefficient {d} at x = {x}")]
    InvalidDiffusion {
        /// Position at which it was evaluated.
        x: f64,
        /// The offending coefficient.
        d: f64,
    },

    /// Returned when the integrated state leaves the finite reals.
    #[error("trajectory diverged at step {step}")]
    Diverged {
        /// Outer step at which the state became non-finite.
        step: usize,
    },

    /// Returned when a force-field parameter is out of range.
    #[error("invalid force field: {reason}")]
    InvalidForceField {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a pre-allocated buffer has the wrong length.
    #[error("buffer length mismatch: expected {expected}, got {got}")]
    BufferLengthMismatch {
        /// Expected buffer length.
        expected: usize,
        /// Actual buffer length.
        got: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_time_step() {
        let e = DiffusionError::InvalidTimeStep { dt: 0.0 };
        assert_eq!(e.to_string(), "invalid time step: 0 (must be finite and > 0)");
    }

    #[test]
    fn error_invalid_diffusion() {
        let e = DiffusionError::InvalidDiffusion { x: 1.5, d: -2.0 };
        assert_eq!(e.to_string(), "invalid diffusion coefficient -2 at x = 1.5");
    }

    #[test]
    fn error_diverged() {
        let e = DiffusionError::Diverged { step: 12 };
        assert_eq!(e.to_string(), "trajectory diverged at step 12");
    }

    #[test]
    fn error_buffer_length_mismatch() {
        let e = DiffusionError::BufferLengthMismatch {
            expected: 100,
            got: 99,
        };
        assert_eq!(e.to_string(), "buffer length mismatch: expected 100, got 99");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<DiffusionError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<DiffusionError>();
    }
}
