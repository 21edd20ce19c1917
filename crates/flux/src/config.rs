//! Configuration shared by the flux estimators.

use crate::error::FluxError;
use crate::grid::Grid;

/// How a cumulative curve represents the jump at each key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepMode {
    /// One point per key carrying the value before the jump.
    Collapsed,
    /// Two points per key: `(x, before)` and `(x + offset, after)`.
    ///
    /// The post-jump value is set to exactly 0 when it falls below `zcmin`.
    /// An offset of 0 draws a vertical step.
    Step {
        /// Horizontal distance between the pre- and post-jump points.
        offset: f64,
    },
}

/// Options for the profile estimators.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use cfep_flux::{ProfileOptions, StepMode};
///
/// let options = ProfileOptions::new()
///     .with_dx(Some(0.01))
///     .with_lag(4)
///     .with_step(StepMode::Step { offset: 0.0 });
///
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileOptions {
    dx: Option<f64>,
    lag: usize,
    step: StepMode,
    zcmin: f64,
    mindx: f64,
    clamp_first: bool,
}

impl ProfileOptions {
    /// Creates options with defaults.
    ///
    /// Defaults: `dx = Some(1e-3)`, `lag = 1`, `step = Collapsed`,
    /// `zcmin = 1e-8`, `mindx = 1e-3`, `clamp_first = true`.
    pub fn new() -> Self {
        Self {
            dx: Some(1e-3),
            lag: 1,
            step: StepMode::Collapsed,
            zcmin: 1e-8,
            mindx: 1e-3,
            clamp_first: true,
        }
    }

    /// Exact step-function output: raw positions as keys, a vertical step at
    /// every key and no first-point clamp.
    pub fn strict() -> Self {
        Self::new()
            .with_dx(None)
            .with_step(StepMode::Step { offset: 0.0 })
            .with_clamp_first(false)
    }

    /// Sets the grid spacing; `None` keys the flux map by raw values.
    pub fn with_dx(mut self, dx: Option<f64>) -> Self {
        self.dx = dx;
        self
    }

    /// Sets the lag between compared samples.
    pub fn with_lag(mut self, lag: usize) -> Self {
        self.lag = lag;
        self
    }

    /// Sets the step representation.
    pub fn with_step(mut self, step: StepMode) -> Self {
        self.step = step;
        self
    }

    /// Sets the threshold below which post-jump values are zeroed.
    pub fn with_zcmin(mut self, zcmin: f64) -> Self {
        self.zcmin = zcmin;
        self
    }

    /// Sets the displacement floor applied for negative exponents.
    pub fn with_mindx(mut self, mindx: f64) -> Self {
        self.mindx = mindx;
        self
    }

    /// Sets whether the first curve value is overwritten by the second.
    ///
    /// The first value of a collapsed curve is always 0; downstream ratios
    /// and logarithms expect the neighbouring non-zero value instead.
    pub fn with_clamp_first(mut self, clamp_first: bool) -> Self {
        self.clamp_first = clamp_first;
        self
    }

    // --- Accessors ---

    /// Returns the grid spacing.
    pub fn dx(&self) -> Option<f64> {
        self.dx
    }

    /// Returns the lag.
    pub fn lag(&self) -> usize {
        self.lag
    }

    /// Returns the step representation.
    pub fn step(&self) -> StepMode {
        self.step
    }

    /// Returns the post-jump zero threshold.
    pub fn zcmin(&self) -> f64 {
        self.zcmin
    }

    /// Returns the displacement floor for negative exponents.
    pub fn mindx(&self) -> f64 {
        self.mindx
    }

    /// Returns whether the first-point clamp is applied.
    pub fn clamp_first(&self) -> bool {
        self.clamp_first
    }

    /// Returns the grid for the configured spacing, if any.
    ///
    /// # Errors
    ///
    /// Returns [`FluxError::InvalidSpacing`] if `dx` is set but not finite
    /// and positive.
    pub fn grid(&self) -> Result<Option<Grid>, FluxError> {
        self.dx.map(Grid::new).transpose()
    }

    /// Validates these options.
    ///
    /// Checks that `dx` (when set) and `mindx` are finite and positive, the
    /// lag is at least 1, `zcmin` is finite, and a step offset is finite and
    /// non-negative.
    pub fn validate(&self) -> Result<(), FluxError> {
        self.grid()?;
        if self.lag == 0 {
            return Err(FluxError::InvalidLag { lag: self.lag });
        }
        if !self.zcmin.is_finite() {
            return Err(FluxError::InvalidParameter {
                reason: format!("zcmin must be finite, got {}", self.zcmin),
            });
        }
        if !self.mindx.is_finite() || self.mindx <= 0.0 {
            return Err(FluxError::InvalidParameter {
                reason: format!("mindx must be finite and positive, got {}", self.mindx),
            });
        }
        if let StepMode::Step { offset } = self.step {
            if !offset.is_finite() || offset < 0.0 {
                return Err(FluxError::InvalidParameter {
                    reason: format!("step offset must be finite and non-negative, got {offset}"),
                });
            }
        }
        Ok(())
    }
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self::new()
    }
}
