//! Euler-Maruyama trajectory source for one-dimensional diffusion.
//!
//! Produces the trajectories analysed by `cfep-flux`:
//!
//! ```rust
//! use cfep_diffusion::{EulerConfig, ForceField, simulate_euler};
//! use rand::SeedableRng;
//!
//! let well = ForceField::DoubleWell { barrier: 2.0, width: 1.0 };
//! let config = EulerConfig::new(0.01, 1_000).with_x0(-1.0);
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//!
//! let traj = simulate_euler(|x| well.force(x), |_| 1.0, &config, &mut rng).unwrap();
//! assert_eq!(traj.len(), 1_000);
//! ```

pub mod config;
pub mod error;
pub mod force;
pub mod simulate;

pub use config::EulerConfig;
pub use error::DiffusionError;
pub use force::ForceField;
pub use simulate::{simulate_euler, simulate_euler_into};
