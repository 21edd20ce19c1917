//! Relaxation rate and the survival-factor profile.

use tracing::debug;

use crate::config::{ProfileOptions, StepMode};
use crate::crossing::{crossing_profile, origin_profile};
use crate::error::{FluxError, ensure_finite};
use crate::profile::Profile;

/// Relaxation rate `mu = -ln(Σ x[i+lag]·x[i] / Σ x[i]²) / lag`.
///
/// # Errors
///
/// Returns [`FluxError::InvalidLag`] for a zero lag,
/// [`FluxError::EmptyData`] for an empty trajectory,
/// [`FluxError::InsufficientData`] unless the trajectory is longer than the
/// lag, and [`FluxError::Domain`] when `Σ x[i]²` is zero, either sum
/// overflows, or the autocorrelation ratio is not a positive finite number.
pub fn relaxation_rate(traj: &[f64], lag: usize) -> Result<f64, FluxError> {
    if lag == 0 {
        return Err(FluxError::InvalidLag { lag });
    }
    if traj.is_empty() {
        return Err(FluxError::EmptyData);
    }
    if traj.len() <= lag {
        return Err(FluxError::InsufficientData {
            n: traj.len(),
            min: lag + 1,
        });
    }
    ensure_finite(traj)?;

    let (xx, xx_lag) = cfep_stats::lagged_products(traj, lag);
    if !(xx.is_finite() && xx_lag.is_finite()) {
        return Err(FluxError::Domain {
            reason: format!("lagged product sums overflow ({xx}, {xx_lag})"),
        });
    }
    if xx == 0.0 {
        return Err(FluxError::Domain {
            reason: "sum of squares is zero".to_string(),
        });
    }
    let ratio = xx_lag / xx;
    if !(ratio.is_finite() && ratio > 0.0) {
        return Err(FluxError::Domain {
            reason: format!("lag-{lag} autocorrelation ratio {ratio} is not positive"),
        });
    }
    let mu = -ratio.ln() / lag as f64;
    if !mu.is_finite() {
        return Err(FluxError::Domain {
            reason: format!("relaxation rate {mu} at lag {lag}"),
        });
    }
    Ok(mu)
}

/// Survival-factor profiles `theta(x) = -ln(Z_C1 / Z_0C1 / sc)`, one per lag.
///
/// `Z_C1` is the lag-`dt` crossing profile with `a = 1`, `Z_0C1` the origin
/// profile, and `sc = (1 - exp(-mu·dt)) / dt` with `mu` the relaxation rate
/// at lag `tinf`. The two profiles are aligned by position. Both use the
/// grid spacing and `mindx` of `options` with collapsed output and the
/// first-point clamp.
///
/// # Errors
///
/// Returns [`FluxError`] if the relaxation rate cannot be computed, a lag
/// is zero, `sc` is not positive, an origin-profile position is missing,
/// or any ratio is not a positive finite number.
#[tracing::instrument(skip(traj, options), fields(n = traj.len()))]
pub fn survival_factor(
    traj: &[f64],
    lags: &[usize],
    tinf: usize,
    options: &ProfileOptions,
) -> Result<Vec<Profile>, FluxError> {
    let mu = relaxation_rate(traj, tinf)?;
    debug!(mu, "relaxation rate");

    let base = options
        .with_step(StepMode::Collapsed)
        .with_clamp_first(true);
    let z0c1 = origin_profile(traj, &base)?;

    let mut out = Vec::with_capacity(lags.len());
    for &dt in lags {
        if dt == 0 {
            return Err(FluxError::InvalidLag { lag: dt });
        }
        let zc1 = crossing_profile(traj, 1.0, &base.with_lag(dt))?;
        let dtf = dt as f64;
        // The 1/dt rescales Z_0C1 to the lag of Z_C1.
        let sc = (1.0 - (-mu * dtf).exp()) / dtf;
        if sc <= 0.0 {
            return Err(FluxError::Domain {
                reason: format!("scale factor {sc} at lag {dt} is not positive (mu = {mu})"),
            });
        }

        let mut positions = Vec::with_capacity(zc1.len());
        let mut values = Vec::with_capacity(zc1.len());
        for (x, z) in zc1.iter() {
            let z0 = z0c1.value_at(x).ok_or(FluxError::MissingPosition { x })?;
            let ratio = z / z0 / sc;
            if !(ratio.is_finite() && ratio > 0.0) {
                return Err(FluxError::Domain {
                    reason: format!("log of {ratio} at position {x}, lag {dt}"),
                });
            }
            positions.push(x);
            values.push(-ratio.ln());
        }
        out.push(Profile::from_parts(positions, values));
    }
    Ok(out)
}
