//! Simulate command: integrate a diffusion trajectory and write it to disk.

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, info_span};

use cfep_diffusion::simulate_euler;

use crate::cli::SimulateArgs;
use crate::config::CfepConfig;
use crate::convert;
use crate::trajectory::write_trajectory;

/// Run the simulation pipeline.
pub fn run(args: SimulateArgs) -> Result<()> {
    let _cmd = info_span!("simulate").entered();

    // Step 1: Load config and apply CLI overrides
    let mut config = CfepConfig::load(&args.config)?;
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(output) = args.output {
        config.simulate.output = Some(output);
    }
    let output = config.simulate.output.as_ref().ok_or_else(|| {
        anyhow::anyhow!("no output path: set [simulate].output in config or use --output")
    })?;

    // Step 2: Build integrator inputs
    let force = convert::parse_force(&config.simulate.force)?;
    let euler_cfg = convert::build_euler_config(&config.simulate)?;
    let d = config.simulate.diffusion;
    info!(
        ?force,
        dt = euler_cfg.dt(),
        n_steps = euler_cfg.n_steps(),
        substeps = euler_cfg.substeps(),
        "configuration loaded"
    );

    // Step 3: Create seeded RNG
    let mut rng = match config.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };

    // Step 4: Integrate and write
    let traj = simulate_euler(|x| force.force(x), |_| d, &euler_cfg, &mut rng)
        .context("simulation failed")?;
    write_trajectory(output, &traj)?;
    info!(path = %output.display(), n = traj.len(), "trajectory written");

    Ok(())
}
