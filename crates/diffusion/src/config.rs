//! Configuration for the Euler-Maruyama integrator.

use crate::error::DiffusionError;

/// Integration settings.
///
/// # Example
///
/// ```
/// use cfep_diffusion::EulerConfig;
///
/// let config = EulerConfig::new(0.01, 10_000)
///     .with_substeps(20)
///     .with_x0(-1.0);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerConfig {
    dt: f64,
    n_steps: usize,
    substeps: usize,
    x0: f64,
}

impl EulerConfig {
    /// Creates a configuration sampling `n_steps` values `dt` apart.
    ///
    /// Defaults: `substeps = 10`, `x0 = 0.0`.
    pub fn new(dt: f64, n_steps: usize) -> Self {
        Self {
            dt,
            n_steps,
            substeps: 10,
            x0: 0.0,
        }
    }

    /// Sets the number of integration substeps per saved sample.
    pub fn with_substeps(mut self, substeps: usize) -> Self {
        self.substeps = substeps;
        self
    }

    /// Sets the initial value.
    pub fn with_x0(mut self, x0: f64) -> Self {
        self.x0 = x0;
        self
    }

    /// Returns the sampling interval.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Returns the number of saved samples.
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns the substeps per saved sample.
    pub fn substeps(&self) -> usize {
        self.substeps
    }

    /// Returns the initial value.
    pub fn x0(&self) -> f64 {
        self.x0
    }

    /// Returns the integration step `dt / substeps`.
    pub fn inner_dt(&self) -> f64 {
        self.dt / self.substeps as f64
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), DiffusionError> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(DiffusionError::InvalidTimeStep { dt: self.dt });
        }
        if self.substeps == 0 {
            return Err(DiffusionError::ZeroSubsteps);
        }
        if !self.x0.is_finite() {
            return Err(DiffusionError::NonFiniteStart { x0: self.x0 });
        }
        Ok(())
    }
}
