//! Zero-crossing flux estimators for one-dimensional trajectories.
//!
//! Every estimator accumulates signed contributions into a sparse map keyed
//! by (optionally discretized) positions, then sweeps the sorted keys into a
//! cumulative [`Profile`].
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────┐     ┌──────────────────┐
//!  │  grid        │────▶│  flux_map      │────▶│  sweep → Profile │
//!  │  (snap x)    │     │  (+w lo, -w hi)│     │  (cumulative sum)│
//!  └──────────────┘     └────────────────┘     └──────────────────┘
//!          ▲                    ▲                       │
//!          │             crossing / origin /            ▼
//!          │             transition profiles    committor, theta
//!          └── transition-path counter (excursions between x0 and x1)
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use cfep_flux::{ProfileOptions, crossing_profile};
//!
//! let traj = [0.0, 1.0, 2.0, 1.0, 0.0];
//! let options = ProfileOptions::new().with_dx(Some(0.5));
//!
//! // a = 0 counts crossings regardless of step size.
//! let zc = crossing_profile(&traj, 0.0, &options).unwrap();
//! assert_eq!(zc.positions(), &[0.0, 1.0, 2.0]);
//! ```

pub mod committor;
pub mod config;
pub mod crossing;
pub mod error;
pub mod flux_map;
pub mod grid;
pub mod histogram;
pub mod profile;
pub mod relaxation;
pub mod transition;

pub use committor::{CommittorTable, committor};
pub use config::{ProfileOptions, StepMode};
pub use crossing::{crossing_profile, origin_profile};
pub use error::FluxError;
pub use flux_map::FluxMap;
pub use grid::{Grid, discretize};
pub use histogram::histogram;
pub use profile::Profile;
pub use relaxation::{relaxation_rate, survival_factor};
pub use transition::{TransitionCounts, count_transition_paths, transition_profile};
