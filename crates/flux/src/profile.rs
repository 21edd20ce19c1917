//! Ordered `(position, value)` curves produced by the estimators.

use serde::Serialize;

use crate::error::FluxError;

/// A curve sampled at non-decreasing positions.
///
/// Positions repeat only in step output, where each key carries a pre- and
/// post-jump value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Profile {
    positions: Vec<f64>,
    values: Vec<f64>,
}

impl Profile {
    /// Constructs a profile from parallel vectors of equal length.
    pub(crate) fn from_parts(positions: Vec<f64>, values: Vec<f64>) -> Self {
        debug_assert_eq!(positions.len(), values.len());
        Self { positions, values }
    }

    /// Returns the positions.
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Returns the values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the curve has no points.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterates over `(position, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.positions.iter().copied().zip(self.values.iter().copied())
    }

    /// Returns the value at the first point whose position equals `x`.
    ///
    /// For step output this is the pre-jump value.
    pub fn value_at(&self, x: f64) -> Option<f64> {
        let i = self.positions.partition_point(|&p| p < x);
        match self.positions.get(i) {
            Some(&p) if p == x => Some(self.values[i]),
            _ => None,
        }
    }

    /// Rejects a curve whose cumulative values overflowed.
    pub(crate) fn into_finite(self, estimator: &str) -> Result<Self, FluxError> {
        let bad = self.iter().find(|(_, v)| !v.is_finite());
        match bad {
            Some((x, v)) => Err(FluxError::Domain {
                reason: format!("{estimator} is {v} at position {x}"),
            }),
            None => Ok(self),
        }
    }

    /// Splits the profile into `(positions, values)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.positions, self.values)
    }
}
