//! Binned density of trajectory values.

use std::collections::BTreeMap;

use crate::error::{FluxError, ensure_finite};
use crate::grid::{Grid, Position};
use crate::profile::Profile;

/// Histogram `Z_H` with bins of width `dx` centred on grid points.
///
/// Each value is assigned to the nearest multiple of `dx`; the returned
/// value at each occupied bin is `count / dx`. Empty bins are omitted and an
/// empty trajectory yields an empty profile.
///
/// # Errors
///
/// Returns [`FluxError::InvalidSpacing`] for a bad `dx` and
/// [`FluxError::NonFiniteData`] for NaN or infinite samples.
pub fn histogram(traj: &[f64], dx: f64) -> Result<Profile, FluxError> {
    let grid = Grid::new(dx)?;
    ensure_finite(traj)?;

    let mut counts: BTreeMap<Position, usize> = BTreeMap::new();
    for &x in traj {
        *counts.entry(Position::new(grid.snap_centered(x))).or_insert(0) += 1;
    }

    let (positions, values) = counts
        .into_iter()
        .map(|(p, c)| (p.get(), c as f64 / dx))
        .unzip();
    Ok(Profile::from_parts(positions, values))
}
