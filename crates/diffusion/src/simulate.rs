//! Euler-Maruyama integration of `dx = F(x) dt + sqrt(2 D(x)) dW`.

use rand::Rng;
use rand_distr::StandardNormal;
use tracing::debug;

use crate::config::EulerConfig;
use crate::error::DiffusionError;

/// Simulates an overdamped diffusion trajectory.
///
/// Integrates with step `dt / substeps` and saves the state after every
/// `substeps` inner steps; the initial value itself is not saved.
///
/// # Arguments
///
/// * `force` - Drift `F(x)`.
/// * `diffusion` - Diffusion coefficient `D(x)`, must be non-negative.
/// * `config` - Step size, sample count, substeps and initial value.
/// * `rng` - Random number generator.
///
/// # Returns
///
/// A vector of `config.n_steps()` samples.
///
/// # Errors
///
/// Returns [`DiffusionError`] if the configuration is invalid, `D(x)` is
/// negative or not finite, or the state diverges.
pub fn simulate_euler<F, D>(
    force: F,
    diffusion: D,
    config: &EulerConfig,
    rng: &mut impl Rng,
) -> Result<Vec<f64>, DiffusionError>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    let mut out = vec![0.0; config.n_steps()];
    simulate_euler_into(force, diffusion, config, rng, &mut out)?;
    Ok(out)
}

/// Simulates into a pre-allocated buffer.
///
/// # Errors
///
/// Returns [`DiffusionError::BufferLengthMismatch`] if
/// `out.len() != config.n_steps()`, plus every error of [`simulate_euler`].
#[tracing::instrument(skip(force, diffusion, rng, out), fields(n_steps = config.n_steps()))]
pub fn simulate_euler_into<F, D>(
    force: F,
    diffusion: D,
    config: &EulerConfig,
    rng: &mut impl Rng,
    out: &mut [f64],
) -> Result<(), DiffusionError>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    config.validate()?;
    if out.len() != config.n_steps() {
        return Err(DiffusionError::BufferLengthMismatch {
            expected: config.n_steps(),
            got: out.len(),
        });
    }

    let h = config.inner_dt();
    let mut x = config.x0();
    for (step, slot) in out.iter_mut().enumerate() {
        for _ in 0..config.substeps() {
            let d = diffusion(x);
            if !d.is_finite() || d < 0.0 {
                return Err(DiffusionError::InvalidDiffusion { x, d });
            }
            let z: f64 = rng.sample(StandardNormal);
            x += force(x) * h + (2.0 * d * h).sqrt() * z;
        }
        if !x.is_finite() {
            return Err(DiffusionError::Diverged { step });
        }
        *slot = x;
    }
    debug!(x_final = x, "trajectory integrated");
    Ok(())
}
