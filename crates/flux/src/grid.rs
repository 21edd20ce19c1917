//! Discretization of trajectory values onto a uniform grid.

use std::cmp::Ordering;

use crate::error::FluxError;

/// Relative tolerance within which a quotient `x / dx` is treated as lying
/// exactly on a grid line.
const SNAP_TOL: f64 = 1e-9;

/// A uniform grid with spacing `dx`, anchored at zero.
///
/// Values are mapped to grid points by flooring toward negative infinity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    dx: f64,
}

impl Grid {
    /// Creates a grid with the given spacing.
    ///
    /// # Errors
    ///
    /// Returns [`FluxError::InvalidSpacing`] unless `dx` is finite and positive.
    pub fn new(dx: f64) -> Result<Self, FluxError> {
        if !dx.is_finite() || dx <= 0.0 {
            return Err(FluxError::InvalidSpacing { dx });
        }
        Ok(Self { dx })
    }

    /// Returns the grid spacing.
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Returns the (integral, `f64`-valued) index of the cell containing `x`.
    ///
    /// Quotients within a relative `1e-9` of an integer are taken to be that
    /// integer, so grid points themselves always map to their own cell even
    /// when `x / dx` is off by a rounding error.
    pub fn index(&self, x: f64) -> f64 {
        let q = x / self.dx;
        let r = q.round();
        if (q - r).abs() <= SNAP_TOL * r.abs().max(1.0) {
            r
        } else {
            q.floor()
        }
    }

    /// Maps `x` to the lower edge of its grid cell: `floor(x / dx) * dx`.
    pub fn snap(&self, x: f64) -> f64 {
        positive_zero(self.index(x) * self.dx)
    }

    /// Maps `x` to the nearest grid point: `floor(x / dx + 0.5) * dx`.
    ///
    /// Used for centred histogram bins.
    pub fn snap_centered(&self, x: f64) -> f64 {
        self.snap(x + 0.5 * self.dx)
    }
}

/// Snaps `x` to `grid` when one is given, otherwise returns `x` unchanged.
pub fn discretize(x: f64, grid: Option<Grid>) -> f64 {
    match grid {
        Some(g) => g.snap(x),
        None => positive_zero(x),
    }
}

fn positive_zero(x: f64) -> f64 {
    if x == 0.0 { 0.0 } else { x }
}

/// Totally ordered map key for a real position.
///
/// Negative zero is folded into positive zero so that both land on the same
/// key. Callers are expected to pass finite values.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Position(f64);

impl Position {
    pub(crate) fn new(x: f64) -> Self {
        Self(positive_zero(x))
    }

    pub(crate) fn get(self) -> f64 {
        self.0
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Position {}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}
