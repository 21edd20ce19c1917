//! Zero-crossing flux profiles built directly from a trajectory.

use tracing::debug;

use crate::config::ProfileOptions;
use crate::error::{FluxError, ensure_finite};
use crate::flux_map::FluxMap;
use crate::grid::discretize;
use crate::profile::Profile;

/// Weight of a single displacement `step = |Δx|` for exponent `a`.
///
/// `a == 0` counts crossings (weight 1). For `a < 0` the displacement is
/// floored at `mindx` before exponentiation.
pub(crate) fn displacement_weight(step: f64, a: f64, mindx: f64) -> f64 {
    if a == 0.0 {
        return 1.0;
    }
    let step = if a < 0.0 && step < mindx { mindx } else { step };
    step.powf(a)
}

/// Cumulative displacement-weighted crossing profile `Z_{C,a}`.
///
/// Each pair `(traj[i], traj[i + lag])` contributes `|Δx|^a` to every
/// position it spans. Values are normalised by `2 * lag`, since every
/// crossing is seen once going up and once coming back.
///
/// Returns an empty profile when the trajectory is not longer than the lag.
///
/// # Errors
///
/// Returns [`FluxError`] if the options are invalid, `a` is not finite, or the
/// trajectory contains non-finite values, and [`FluxError::Domain`] if a
/// crossing weight or the cumulative sum overflows.
#[tracing::instrument(skip(traj, options), fields(n = traj.len(), lag = options.lag()))]
pub fn crossing_profile(
    traj: &[f64],
    a: f64,
    options: &ProfileOptions,
) -> Result<Profile, FluxError> {
    options.validate()?;
    if !a.is_finite() {
        return Err(FluxError::InvalidParameter {
            reason: format!("exponent must be finite, got {a}"),
        });
    }
    ensure_finite(traj)?;

    let lag = options.lag();
    if traj.len() <= lag {
        debug!("trajectory not longer than lag: empty profile");
        return Ok(Profile::default());
    }
    let grid = options.grid()?;

    let mut map = FluxMap::new();
    for (&last, &next) in traj.iter().zip(&traj[lag..]) {
        let (from, to) = (discretize(last, grid), discretize(next, grid));
        // Same-key pairs carry no flux, so their weight is never formed.
        let d = if from == to {
            0.0
        } else {
            displacement_weight((next - last).abs(), a, options.mindx())
        };
        if !d.is_finite() {
            return Err(FluxError::Domain {
                reason: format!("crossing weight |{next} - {last}|^{a} overflows"),
            });
        }
        map.add_crossing(from, to, d);
    }
    debug!(n_keys = map.len(), "flux map accumulated");

    map.sweep(2.0 * lag as f64, options)
        .into_finite("crossing profile")
}

/// Cumulative profile of displacements measured from the origin, `Z_{0,C1}`.
///
/// Every sample `x` contributes `|x|` to each position between 0 and `x`.
/// The profile is not normalised; callers comparing it against a lag-`dt`
/// crossing profile rescale by `1 / dt` themselves. The lag setting is
/// ignored.
///
/// Returns an empty profile for an empty trajectory.
///
/// # Errors
///
/// Returns [`FluxError`] if the options are invalid or the trajectory
/// contains non-finite values, and [`FluxError::Domain`] if the cumulative
/// sum overflows.
#[tracing::instrument(skip(traj, options), fields(n = traj.len()))]
pub fn origin_profile(traj: &[f64], options: &ProfileOptions) -> Result<Profile, FluxError> {
    options.validate()?;
    ensure_finite(traj)?;
    let grid = options.grid()?;

    let origin = discretize(0.0, grid);
    let mut map = FluxMap::new();
    for &x in traj {
        map.add_crossing(origin, discretize(x, grid), x.abs());
    }
    debug!(n_keys = map.len(), "origin flux map accumulated");

    map.sweep(1.0, options).into_finite("origin profile")
}
