//! Sparse signed-flux accumulation and the cumulative sweep.

use std::collections::BTreeMap;

use crate::config::{ProfileOptions, StepMode};
use crate::grid::Position;
use crate::profile::Profile;

/// Signed flux accumulated at discrete positions.
///
/// Every crossing between two positions adds `+w` at the lower one and `-w`
/// at the upper one, so the running sum over sorted keys counts the weight
/// of crossings spanning each position and the map total stays at zero.
#[derive(Debug, Clone, Default)]
pub struct FluxMap {
    flux: BTreeMap<Position, f64>,
}

impl FluxMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a crossing between `from` and `to` with weight `weight`.
    ///
    /// When both ends share a key the position is registered with no net
    /// flux, and the weight is not evaluated.
    pub fn add_crossing(&mut self, from: f64, to: f64, weight: f64) {
        let a = Position::new(from);
        let b = Position::new(to);
        if a == b {
            self.flux.entry(a).or_insert(0.0);
            return;
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        *self.flux.entry(lo).or_insert(0.0) += weight;
        *self.flux.entry(hi).or_insert(0.0) -= weight;
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.flux.len()
    }

    /// Whether no crossing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.flux.is_empty()
    }

    /// Sum of all signed flux; zero up to rounding.
    pub fn total(&self) -> f64 {
        self.flux.values().sum()
    }

    /// Iterates over `(position, flux)` in ascending position order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.flux.iter().map(|(p, &f)| (p.get(), f))
    }

    /// Sweeps the sorted keys into a cumulative curve divided by `norm`.
    ///
    /// The running sum starts at 0 and each emitted value is taken before the
    /// key's own flux is added. Step output additionally emits the post-jump
    /// value, zeroed below `options.zcmin()`. With `options.clamp_first()` the
    /// first value is overwritten by the second.
    pub fn sweep(&self, norm: f64, options: &ProfileOptions) -> Profile {
        let per_key = match options.step() {
            StepMode::Collapsed => 1,
            StepMode::Step { .. } => 2,
        };
        let mut positions = Vec::with_capacity(self.flux.len() * per_key);
        let mut values = Vec::with_capacity(self.flux.len() * per_key);

        let mut z = 0.0;
        for (x, flux) in self.iter() {
            positions.push(x);
            values.push(z / norm);
            z += flux;
            if let StepMode::Step { offset } = options.step() {
                let mut y = z / norm;
                if y < options.zcmin() {
                    y = 0.0;
                }
                positions.push(x + offset);
                values.push(y);
            }
        }

        if options.clamp_first() && values.len() >= 2 {
            values[0] = values[1];
        }

        Profile::from_parts(positions, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn up_and_back() -> FluxMap {
        let mut m = FluxMap::new();
        m.add_crossing(0.0, 1.0, 1.0);
        m.add_crossing(1.0, 2.0, 1.0);
        m.add_crossing(2.0, 1.0, 1.0);
        m.add_crossing(1.0, 0.0, 1.0);
        m
    }

    #[test]
    fn lower_end_gains_upper_end_loses() {
        let mut m = FluxMap::new();
        m.add_crossing(3.0, -1.0, 2.5);
        let entries: Vec<(f64, f64)> = m.iter().collect();
        assert_eq!(entries, vec![(-1.0, 2.5), (3.0, -2.5)]);
    }

    #[test]
    fn equal_ends_register_without_flux() {
        let mut m = FluxMap::new();
        m.add_crossing(0.5, 0.5, f64::INFINITY);
        assert_eq!(m.len(), 1);
        assert_eq!(m.total(), 0.0);
        assert_eq!(m.iter().next(), Some((0.5, 0.0)));
    }

    #[test]
    fn conservation() {
        let mut m = FluxMap::new();
        let xs = [0.3, -1.2, 4.4, 0.0, 2.2, -3.1, 0.3];
        for w in xs.windows(2) {
            m.add_crossing(w[0], w[1], (w[1] - w[0]).abs().powf(1.5));
        }
        assert_relative_eq!(m.total(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn collapsed_sweep_with_clamp() {
        let p = up_and_back().sweep(2.0, &ProfileOptions::new());
        assert_eq!(p.positions(), &[0.0, 1.0, 2.0]);
        assert_eq!(p.values(), &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn collapsed_sweep_starts_at_zero_without_clamp() {
        let p = up_and_back().sweep(2.0, &ProfileOptions::new().with_clamp_first(false));
        assert_eq!(p.values(), &[0.0, 1.0, 1.0]);
    }

    #[test]
    fn step_sweep_duplicates_keys() {
        let options = ProfileOptions::strict();
        let p = up_and_back().sweep(2.0, &options);
        assert_eq!(p.positions(), &[0.0, 0.0, 1.0, 1.0, 2.0, 2.0]);
        assert_eq!(p.values(), &[0.0, 1.0, 1.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn step_sweep_offset_and_zcmin() {
        let mut m = FluxMap::new();
        m.add_crossing(0.0, 1.0, 1.0);
        m.add_crossing(1.0, 2.0, 1e-10);
        let options = ProfileOptions::new()
            .with_step(StepMode::Step { offset: 0.25 })
            .with_clamp_first(false);
        let p = m.sweep(1.0, &options);
        assert_eq!(p.positions(), &[0.0, 0.25, 1.0, 1.25, 2.0, 2.25]);
        assert_eq!(p.values()[0], 0.0);
        assert_eq!(p.values()[1], 1.0);
        assert_eq!(p.values()[2], 1.0);
        // Post-jump values below zcmin are zeroed; pre-jump values are not.
        assert_eq!(p.values()[3], 0.0);
        assert_relative_eq!(p.values()[4], 1e-10, epsilon = 1e-15);
        assert_eq!(p.values()[5], 0.0);
    }

    #[test]
    fn empty_map_sweeps_to_empty_profile() {
        let p = FluxMap::new().sweep(1.0, &ProfileOptions::new());
        assert!(p.is_empty());
    }

    #[test]
    fn single_key_is_left_unclamped() {
        let mut m = FluxMap::new();
        m.add_crossing(1.0, 1.0, 1.0);
        let p = m.sweep(1.0, &ProfileOptions::new());
        assert_eq!(p.positions(), &[1.0]);
        assert_eq!(p.values(), &[0.0]);
    }
}
