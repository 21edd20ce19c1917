//! Built-in force fields `F(x) = -U'(x)`.

use crate::error::DiffusionError;

/// A one-dimensional force field derived from a potential.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ForceField {
    /// No force; pure Brownian motion.
    Free,
    /// `U = k/2 (x - center)²`.
    Harmonic {
        /// Spring constant.
        k: f64,
        /// Minimum of the well.
        center: f64,
    },
    /// `U = barrier ((x/width)² - 1)²`, minima at `±width`.
    DoubleWell {
        /// Barrier height at `x = 0`.
        barrier: f64,
        /// Distance of the minima from the origin.
        width: f64,
    },
    /// `U = -slope · x`, a constant force.
    Linear {
        /// The constant force.
        slope: f64,
    },
}

impl ForceField {
    /// Force at `x`.
    pub fn force(&self, x: f64) -> f64 {
        match *self {
            ForceField::Free => 0.0,
            ForceField::Harmonic { k, center } => -k * (x - center),
            ForceField::DoubleWell { barrier, width } => {
                let u = x / width;
                -4.0 * barrier * u * (u * u - 1.0) / width
            }
            ForceField::Linear { slope } => slope,
        }
    }

    /// Potential at `x`, zero at the minimum (or at the origin for `Free`
    /// and `Linear`).
    pub fn potential(&self, x: f64) -> f64 {
        match *self {
            ForceField::Free => 0.0,
            ForceField::Harmonic { k, center } => 0.5 * k * (x - center) * (x - center),
            ForceField::DoubleWell { barrier, width } => {
                let u = x / width;
                barrier * (u * u - 1.0) * (u * u - 1.0)
            }
            ForceField::Linear { slope } => -slope * x,
        }
    }

    /// Checks that all parameters are finite and that the double-well
    /// width is positive.
    pub fn validate(&self) -> Result<(), DiffusionError> {
        let ok = match *self {
            ForceField::Free => true,
            ForceField::Harmonic { k, center } => k.is_finite() && center.is_finite(),
            ForceField::DoubleWell { barrier, width } => {
                barrier.is_finite() && width.is_finite() && width > 0.0
            }
            ForceField::Linear { slope } => slope.is_finite(),
        };
        if ok {
            Ok(())
        } else {
            Err(DiffusionError::InvalidForceField {
                reason: format!("{self:?}"),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn numeric_force(f: &ForceField, x: f64) -> f64 {
        let h = 1e-6;
        -(f.potential(x + h) - f.potential(x - h)) / (2.0 * h)
    }

    #[test]
    fn force_is_minus_gradient() {
        let fields = [
            ForceField::Free,
            ForceField::Harmonic { k: 2.0, center: 0.5 },
            ForceField::DoubleWell {
                barrier: 3.0,
                width: 1.5,
            },
            ForceField::Linear { slope: -0.7 },
        ];
        for f in &fields {
            for &x in &[-2.0, -0.3, 0.0, 0.8, 1.9] {
                assert_relative_eq!(f.force(x), numeric_force(f, x), epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn double_well_minima() {
        let f = ForceField::DoubleWell {
            barrier: 2.0,
            width: 1.0,
        };
        assert_eq!(f.force(1.0), 0.0);
        assert_eq!(f.force(-1.0), 0.0);
        assert_eq!(f.potential(0.0), 2.0);
        assert_eq!(f.potential(1.0), 0.0);
    }

    #[test]
    fn validation() {
        assert!(ForceField::Free.validate().is_ok());
        assert!(
            ForceField::DoubleWell {
                barrier: 1.0,
                width: 0.0
            }
            .validate()
            .is_err()
        );
        assert!(
            ForceField::Harmonic {
                k: f64::NAN,
                center: 0.0
            }
            .validate()
            .is_err()
        );
    }
}
