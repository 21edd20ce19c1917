//! Committor estimate from the displacement-weighted crossing profile.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::{ProfileOptions, StepMode};
use crate::crossing::crossing_profile;
use crate::error::{FluxError, ensure_finite};
use crate::grid::{Grid, Position};

/// Tabulated committor between boundaries `x0 < x1`.
///
/// Each grid point strictly between the boundaries stores its cumulative
/// index `q` (the sum of `1 / Z_C1` over the grid points below it) and its
/// increment `1 / Z_C1`. Values inside a cell are interpolated linearly and
/// divided by the total so the result runs from 0 to 1.
#[derive(Debug, Clone)]
pub struct CommittorTable {
    grid: Grid,
    x0: f64,
    x1: f64,
    cells: BTreeMap<Position, (f64, f64)>,
    total: f64,
}

impl CommittorTable {
    /// Builds the table from a trajectory.
    ///
    /// The crossing profile is taken with `a = 1`, lag 1 and collapsed
    /// output, using the spacing and `mindx` of `options`.
    ///
    /// # Errors
    ///
    /// Returns [`FluxError`] if `options` has no grid spacing, the boundaries
    /// are not ordered, the trajectory is empty, has a single sample or
    /// non-finite values, or the crossing profile vanishes or overflows at an
    /// interior grid point.
    #[tracing::instrument(skip(traj, options), fields(n = traj.len()))]
    pub fn build(
        traj: &[f64],
        x0: f64,
        x1: f64,
        options: &ProfileOptions,
    ) -> Result<Self, FluxError> {
        let grid = options.grid()?.ok_or_else(|| FluxError::InvalidParameter {
            reason: "committor requires a grid spacing".to_string(),
        })?;
        if !(x0.is_finite() && x1.is_finite() && x0 < x1) {
            return Err(FluxError::InvalidBoundaries { x0, x1 });
        }
        if traj.is_empty() {
            return Err(FluxError::EmptyData);
        }
        if traj.len() < 2 {
            return Err(FluxError::InsufficientData {
                n: traj.len(),
                min: 2,
            });
        }
        ensure_finite(traj)?;

        let zc1_options = options
            .with_lag(1)
            .with_step(StepMode::Collapsed)
            .with_clamp_first(true);
        let zc1 = crossing_profile(traj, 1.0, &zc1_options)?;

        let mut cells = BTreeMap::new();
        let mut q = 0.0;
        for (x, z) in zc1.iter() {
            if x <= x0 || x >= x1 {
                continue;
            }
            if z <= 0.0 {
                return Err(FluxError::Domain {
                    reason: format!("crossing flux is {z} at interior position {x}"),
                });
            }
            let slope = 1.0 / z;
            cells.insert(Position::new(x), (q, slope));
            q += slope;
        }
        if !q.is_finite() {
            return Err(FluxError::Domain {
                reason: format!("committor normalisation {q} overflows"),
            });
        }
        debug!(n_cells = cells.len(), total = q, "committor table built");

        Ok(Self {
            grid,
            x0,
            x1,
            cells,
            total: q,
        })
    }

    /// Number of interior grid points.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no grid point lies strictly between the boundaries.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Committor at `x`: exactly 0 at or below `x0`, exactly 1 at or above
    /// `x1`.
    ///
    /// # Errors
    ///
    /// Returns [`FluxError::MissingPosition`] if `x` falls in an interior
    /// cell the trajectory never visited.
    pub fn evaluate(&self, x: f64) -> Result<f64, FluxError> {
        let xi = self.grid.snap(x);
        if x <= self.x0 || xi <= self.x0 {
            return Ok(0.0);
        }
        if x >= self.x1 || xi >= self.x1 {
            return Ok(1.0);
        }
        let &(q, slope) = self
            .cells
            .get(&Position::new(xi))
            .ok_or(FluxError::MissingPosition { x: xi })?;
        // Values snapped up onto a grid line sit a rounding error below it.
        let frac = ((x - xi) / self.grid.dx()).clamp(0.0, 1.0);
        Ok((q + frac * slope) / self.total)
    }
}

/// Committor of every trajectory sample, estimated from the trajectory
/// itself.
///
/// # Errors
///
/// See [`CommittorTable::build`].
pub fn committor(
    traj: &[f64],
    x0: f64,
    x1: f64,
    options: &ProfileOptions,
) -> Result<Vec<f64>, FluxError> {
    let table = CommittorTable::build(traj, x0, x1, options)?;
    traj.iter().map(|&x| table.evaluate(x)).collect()
}
