//! End-to-end properties of the flux estimators on hand-built and simulated
//! trajectories.

use approx::assert_relative_eq;
use cfep_diffusion::{EulerConfig, ForceField, simulate_euler};
use cfep_flux::{
    CommittorTable, FluxError, FluxMap, Grid, ProfileOptions, StepMode, committor,
    count_transition_paths, crossing_profile, discretize, histogram, origin_profile,
    relaxation_rate, survival_factor, transition_profile,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn double_well_traj(n: usize, seed: u64) -> Vec<f64> {
    let well = ForceField::DoubleWell {
        barrier: 1.5,
        width: 1.0,
    };
    let config = EulerConfig::new(0.02, n).with_substeps(10).with_x0(-1.0);
    let mut rng = StdRng::seed_from_u64(seed);
    simulate_euler(|x| well.force(x), |_| 1.0, &config, &mut rng).expect("simulation failed")
}

fn harmonic_traj(n: usize, k: f64, dt: f64, seed: u64) -> Vec<f64> {
    let well = ForceField::Harmonic { k, center: 0.0 };
    let config = EulerConfig::new(dt, n).with_substeps(10);
    let mut rng = StdRng::seed_from_u64(seed);
    simulate_euler(|x| well.force(x), |_| 1.0, &config, &mut rng).expect("simulation failed")
}

// ---------------------------------------------------------------------------
// 1. up_and_back_example
// ---------------------------------------------------------------------------
#[test]
fn up_and_back_example() {
    let traj = [0.0, 1.0, 2.0, 1.0, 0.0];
    let options = ProfileOptions::new()
        .with_dx(Some(0.5))
        .with_clamp_first(false);
    let p = crossing_profile(&traj, 0.0, &options).unwrap();
    assert_eq!(p.positions(), &[0.0, 1.0, 2.0]);
    // Rises from the baseline and is symmetric: one crossing each way.
    assert_eq!(p.values(), &[0.0, 1.0, 1.0]);

    let strict = crossing_profile(&traj, 0.0, &ProfileOptions::strict()).unwrap();
    assert_eq!(strict.values().first(), Some(&0.0));
    assert_eq!(strict.values().last(), Some(&0.0));
}

// ---------------------------------------------------------------------------
// 2. flux_conservation
// ---------------------------------------------------------------------------
#[test]
fn flux_conservation() {
    let traj = double_well_traj(5000, 1);
    let grid = Grid::new(0.01).unwrap();
    let mut map = FluxMap::new();
    for w in traj.windows(2) {
        let d = (w[1] - w[0]).abs();
        map.add_crossing(grid.snap(w[0]), grid.snap(w[1]), d);
    }
    assert!(!map.is_empty());
    let gross: f64 = map.iter().map(|(_, f)| f.abs()).sum();
    assert!(map.total().abs() < 1e-9 * gross.max(1.0));

    let p = map.sweep(2.0, &ProfileOptions::new().with_clamp_first(false));
    assert_eq!(p.values()[0], 0.0);
}

// ---------------------------------------------------------------------------
// 3. crossing_count_independent_of_scale
// ---------------------------------------------------------------------------
#[test]
fn crossing_count_independent_of_scale() {
    let traj = double_well_traj(2000, 2);
    let scaled: Vec<f64> = traj.iter().map(|x| x * 10.0).collect();
    let options = ProfileOptions::new().with_dx(None);
    let a = crossing_profile(&traj, 0.0, &options).unwrap();
    let b = crossing_profile(&scaled, 0.0, &options).unwrap();
    assert_eq!(a.len(), b.len());
    for (u, v) in a.values().iter().zip(b.values()) {
        assert_relative_eq!(*u, *v, epsilon = 1e-12);
    }
}

// ---------------------------------------------------------------------------
// 4. discretize_idempotent
// ---------------------------------------------------------------------------
#[test]
fn discretize_idempotent() {
    let traj = double_well_traj(2000, 3);
    for &dx in &[1e-3, 0.05, 0.3] {
        let grid = Some(Grid::new(dx).unwrap());
        for &x in &traj {
            let once = discretize(x, grid);
            assert_eq!(discretize(once, grid), once);
        }
    }
}

// ---------------------------------------------------------------------------
// 5. committor_bounds_and_monotonicity
// ---------------------------------------------------------------------------
#[test]
fn committor_bounds_and_monotonicity() {
    let traj = double_well_traj(20_000, 4);
    let options = ProfileOptions::new().with_dx(Some(0.02));
    let q = committor(&traj, -1.0, 1.0, &options).unwrap();
    assert_eq!(q.len(), traj.len());

    for (i, (&x, &qi)) in traj.iter().zip(&q).enumerate() {
        assert!((0.0..=1.0).contains(&qi), "q[{i}] = {qi} out of range");
        if x <= -1.0 {
            assert_eq!(qi, 0.0);
        }
        if x >= 1.0 {
            assert_eq!(qi, 1.0);
        }
    }
    for i in 1..traj.len() {
        if traj[i] > traj[i - 1] {
            assert!(q[i] >= q[i - 1], "committor decreased at step {i}");
        }
    }
}

#[test]
fn committor_table_is_increasing_in_position() {
    let traj = double_well_traj(20_000, 5);
    let options = ProfileOptions::new().with_dx(Some(0.05));
    let table = CommittorTable::build(&traj, -1.0, 1.0, &options).unwrap();
    assert!(!table.is_empty());
    let mut sorted = traj.clone();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mut last = 0.0;
    for &x in &sorted {
        let q = table.evaluate(x).unwrap();
        assert!(q >= last);
        last = q;
    }
    assert_eq!(last, 1.0);
}

// ---------------------------------------------------------------------------
// 6. transition_counts_example
// ---------------------------------------------------------------------------
#[test]
fn transition_counts_example() {
    let traj = [-1.0, 0.0, 0.5, 1.0, 1.0, 0.0, -1.0];
    let options = ProfileOptions::new().with_dx(None);
    let counts = count_transition_paths(&traj, -1.0, 1.0, &options).unwrap();
    assert!(!counts.is_empty());
    // 3 steps up, 1 boundary revisit, 2 steps down.
    assert_relative_eq!(counts.total() * counts.lag() as f64, 6.0, epsilon = 1e-12);
}

#[test]
fn transition_profile_on_simulated_paths() {
    let traj = double_well_traj(20_000, 6);
    let options = ProfileOptions::new().with_dx(Some(0.05)).with_lag(3);
    let counts = count_transition_paths(&traj, -1.0, 1.0, &options).unwrap();
    assert!(counts.len() > 10);

    let p = transition_profile(&counts, 1.0, &options).unwrap();
    assert!(!p.is_empty());
    assert!(p.positions().windows(2).all(|w| w[0] <= w[1]));
    assert!(p.values().iter().all(|v| *v >= -1e-9));

    let step = options.with_step(StepMode::Step { offset: 0.0 });
    let ps = transition_profile(&counts, 1.0, &step).unwrap();
    assert_eq!(ps.len(), 2 * p.len());
}

// ---------------------------------------------------------------------------
// 7. relaxation
// ---------------------------------------------------------------------------
#[test]
fn oscillation_has_no_relaxation_rate() {
    let traj: Vec<f64> = (0..100).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
    assert!(matches!(
        relaxation_rate(&traj, 1),
        Err(FluxError::Domain { .. })
    ));
}

#[test]
fn huge_values_never_yield_nan() {
    let traj = [1e200, 2e200, 1e200, 2e200];
    let options = ProfileOptions::new().with_dx(None);
    assert!(matches!(
        relaxation_rate(&traj, 1),
        Err(FluxError::Domain { .. })
    ));
    assert!(matches!(
        crossing_profile(&[0.0, 1e200, 0.0], 2.0, &options),
        Err(FluxError::Domain { .. })
    ));
}

#[test]
fn harmonic_relaxation_rate() {
    // Autocorrelation of the OU process decays as exp(-k t).
    let k = 1.0;
    let dt = 0.05;
    let traj = harmonic_traj(100_000, k, dt, 7);
    let lag = 10;
    let mu = relaxation_rate(&traj, lag).unwrap();
    let expected = k * dt;
    assert!(
        (mu - expected).abs() < 0.2 * expected,
        "mu = {mu}, expected about {expected}"
    );
}

#[test]
fn survival_factor_on_simulated_data() {
    let traj = harmonic_traj(20_000, 1.0, 0.05, 8);
    let options = ProfileOptions::new().with_dx(Some(0.25));
    match survival_factor(&traj, &[1, 2], 10, &options) {
        Ok(thetas) => {
            assert_eq!(thetas.len(), 2);
            for theta in &thetas {
                assert!(theta.values().iter().all(|v| v.is_finite()));
            }
        }
        // Sparse tail bins can leave a lagged crossing count at zero.
        Err(FluxError::Domain { .. }) => {}
        Err(e) => panic!("unexpected error: {e}"),
    }
}

// ---------------------------------------------------------------------------
// 8. histogram_and_origin
// ---------------------------------------------------------------------------
#[test]
fn histogram_normalises_to_sample_count() {
    let traj = double_well_traj(5000, 9);
    let dx = 0.1;
    let h = histogram(&traj, dx).unwrap();
    let mass: f64 = h.values().iter().sum::<f64>() * dx;
    assert_relative_eq!(mass, 5000.0, epsilon = 1e-6);
}

#[test]
fn origin_profile_covers_crossing_positions() {
    let traj = harmonic_traj(5000, 1.0, 0.05, 10);
    let options = ProfileOptions::new().with_dx(Some(0.1));
    let z0 = origin_profile(&traj, &options).unwrap();
    let zc = crossing_profile(&traj, 1.0, &options).unwrap();
    for &x in zc.positions() {
        assert!(z0.value_at(x).is_some(), "origin profile lacks {x}");
    }
}

// ---------------------------------------------------------------------------
// 9. empty_and_short_inputs
// ---------------------------------------------------------------------------
#[test]
fn empty_and_short_inputs() {
    let options = ProfileOptions::new();
    assert!(crossing_profile(&[], 1.0, &options).unwrap().is_empty());
    assert!(origin_profile(&[], &options).unwrap().is_empty());
    assert!(histogram(&[], 0.1).unwrap().is_empty());
    assert!(matches!(
        count_transition_paths(&[], -1.0, 1.0, &options),
        Err(FluxError::EmptyData)
    ));
    assert!(matches!(
        count_transition_paths(&[0.5], -1.0, 1.0, &options),
        Err(FluxError::InsufficientData { n: 1, min: 2 })
    ));
    assert!(matches!(relaxation_rate(&[], 1), Err(FluxError::EmptyData)));
    assert!(matches!(
        relaxation_rate(&[0.5], 1),
        Err(FluxError::InsufficientData { .. })
    ));
    assert!(matches!(
        committor(&[0.5], -1.0, 1.0, &options),
        Err(FluxError::InsufficientData { .. })
    ));
}
