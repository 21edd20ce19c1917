//! Transition-path counting between two absorbing boundaries.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::ProfileOptions;
use crate::error::{FluxError, ensure_finite};
use crate::flux_map::FluxMap;
use crate::grid::{Position, discretize};
use crate::profile::Profile;

/// Lagged transition counts `(from, to) -> rate`.
///
/// Counts are divided by the lag, so every value is a rate per unit time.
#[derive(Debug, Clone)]
pub struct TransitionCounts {
    counts: BTreeMap<(Position, Position), f64>,
    lag: usize,
}

impl TransitionCounts {
    fn new(lag: usize) -> Self {
        Self {
            counts: BTreeMap::new(),
            lag,
        }
    }

    fn add(&mut self, from: f64, to: f64, count: f64) {
        *self
            .counts
            .entry((Position::new(from), Position::new(to)))
            .or_insert(0.0) += count;
    }

    /// Records the lagged pairs of one excursion.
    ///
    /// Every step `i` pairs with the sample `lag` steps earlier (clamped to
    /// the start). Steps within `lag` of the end additionally pair with the
    /// final sample, and a path shorter than the lag credits the remaining
    /// `lag - (n - 1)` waits to `(first, last)`. Paths with fewer than two
    /// samples are ignored.
    fn tally(&mut self, path: &[f64]) {
        let n = path.len();
        if n < 2 {
            return;
        }
        let lag = self.lag;
        let last = path[n - 1];
        for i in 1..n {
            self.add(path[i.saturating_sub(lag)], path[i], 1.0);
        }
        for &x in &path[n.saturating_sub(lag).max(1)..n - 1] {
            self.add(x, last, 1.0);
        }
        if lag > n - 1 {
            self.add(path[0], last, (lag - (n - 1)) as f64);
        }
    }

    fn normalize(&mut self) {
        let lag = self.lag as f64;
        for c in self.counts.values_mut() {
            *c /= lag;
        }
    }

    /// Returns the rate for `(from, to)`, or 0.0 if never observed.
    pub fn get(&self, from: f64, to: f64) -> f64 {
        self.counts
            .get(&(Position::new(from), Position::new(to)))
            .copied()
            .unwrap_or(0.0)
    }

    /// Sum of all rates.
    pub fn total(&self) -> f64 {
        self.counts.values().sum()
    }

    /// Number of distinct `(from, to)` pairs.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no pair was observed.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The lag the counts were taken at.
    pub fn lag(&self) -> usize {
        self.lag
    }

    /// Iterates over `(from, to, rate)` ordered by `from`, then `to`.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.counts.iter().map(|(&(a, b), &c)| (a.get(), b.get(), c))
    }
}

/// Counts lagged transitions along excursions between `x0` and `x1`.
///
/// Samples (and the boundaries) are snapped to `options.dx()` when set. A
/// sample at or beyond a boundary closes the current excursion, clamped to
/// that boundary, and opens the next one there. Samples before the first
/// boundary visit are discarded; the segment after the last visit is
/// counted as is, and so is the whole trajectory if it never reaches a
/// boundary. Counts are divided by `options.lag()`.
///
/// # Errors
///
/// Returns [`FluxError::EmptyData`] for an empty trajectory, and
/// [`FluxError`] for invalid options, a single sample, non-finite data, or
/// boundaries that are not ordered after snapping.
#[tracing::instrument(skip(traj, options), fields(n = traj.len(), lag = options.lag()))]
pub fn count_transition_paths(
    traj: &[f64],
    x0: f64,
    x1: f64,
    options: &ProfileOptions,
) -> Result<TransitionCounts, FluxError> {
    options.validate()?;
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
    if !x0.is_finite() || !x1.is_finite() {
        return Err(FluxError::InvalidBoundaries { x0, x1 });
    }

    let grid = options.grid()?;
    let x0 = discretize(x0, grid);
    let x1 = discretize(x1, grid);
    if x0 >= x1 {
        return Err(FluxError::InvalidBoundaries { x0, x1 });
    }

    let mut counts = TransitionCounts::new(options.lag());
    let mut path: Vec<f64> = Vec::new();
    let mut tracking = false;
    let mut n_excursions = 0usize;

    for &raw in traj {
        let x = discretize(raw, grid);
        let boundary = if x <= x0 {
            Some(x0)
        } else if x >= x1 {
            Some(x1)
        } else {
            None
        };
        match boundary {
            Some(b) => {
                path.push(b);
                if tracking {
                    counts.tally(&path);
                    n_excursions += 1;
                }
                path.clear();
                path.push(b);
                tracking = true;
            }
            None => path.push(x),
        }
    }
    counts.tally(&path);
    counts.normalize();

    debug!(n_excursions, n_pairs = counts.len(), "transition paths counted");
    Ok(counts)
}

/// Cumulative crossing profile built from transition counts.
///
/// Each pair `(x, y)` contributes `|y - x|^a * rate` to every position it
/// spans. The exponent uses the stored positions; the map keys are snapped
/// to `options.dx()` when set. Values are halved, the lag having already
/// been divided out of the counts. `options.lag()` and `options.mindx()`
/// are not used.
///
/// # Errors
///
/// Returns [`FluxError`] for invalid options or a non-finite exponent, and
/// [`FluxError::Domain`] if a pair weight or the cumulative sum overflows.
#[tracing::instrument(skip(counts, options), fields(n_pairs = counts.len()))]
pub fn transition_profile(
    counts: &TransitionCounts,
    a: f64,
    options: &ProfileOptions,
) -> Result<Profile, FluxError> {
    options.validate()?;
    if !a.is_finite() {
        return Err(FluxError::InvalidParameter {
            reason: format!("exponent must be finite, got {a}"),
        });
    }
    let grid = options.grid()?;

    let mut map = FluxMap::new();
    for (x, y, rate) in counts.iter() {
        let (from, to) = (discretize(x, grid), discretize(y, grid));
        let d = if from == to {
            0.0
        } else {
            (y - x).abs().powf(a) * rate
        };
        if !d.is_finite() {
            return Err(FluxError::Domain {
                reason: format!("transition weight |{y} - {x}|^{a} * {rate} overflows"),
            });
        }
        map.add_crossing(from, to, d);
    }
    debug!(n_keys = map.len(), "transition flux map accumulated");

    map.sweep(2.0, options).into_finite("transition profile")
}
