//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};

use cfep_diffusion::{EulerConfig, ForceField};
use cfep_flux::{ProfileOptions, StepMode};

use crate::config::{AnalyzeToml, ForceToml, SimulateToml};

/// Parses a step-mode name into a [`StepMode`].
pub fn parse_step(s: &str, offset: f64) -> Result<StepMode> {
    match s.to_lowercase().as_str() {
        "collapsed" => Ok(StepMode::Collapsed),
        "step" => Ok(StepMode::Step { offset }),
        other => bail!("unknown step mode: {other:?}"),
    }
}

/// Converts the TOML force settings into a [`ForceField`].
pub fn parse_force(f: &ForceToml) -> Result<ForceField> {
    let field = match f.kind.to_lowercase().as_str() {
        "free" => ForceField::Free,
        "harmonic" => ForceField::Harmonic {
            k: f.k,
            center: f.center,
        },
        "double_well" | "double-well" => ForceField::DoubleWell {
            barrier: f.barrier,
            width: f.width,
        },
        "linear" => ForceField::Linear { slope: f.slope },
        other => bail!("unknown force field: {other:?}"),
    };
    field.validate()?;
    Ok(field)
}

/// Builds [`ProfileOptions`] from the `[analyze]` section.
pub fn build_profile_options(a: &AnalyzeToml) -> Result<ProfileOptions> {
    let options = ProfileOptions::new()
        .with_dx(a.dx)
        .with_lag(a.lag)
        .with_step(parse_step(&a.step, a.step_offset)?)
        .with_zcmin(a.zcmin)
        .with_mindx(a.mindx)
        .with_clamp_first(a.clamp_first);
    options.validate()?;
    Ok(options)
}

/// Builds an [`EulerConfig`] from the `[simulate]` section.
pub fn build_euler_config(s: &SimulateToml) -> Result<EulerConfig> {
    let config = EulerConfig::new(s.dt, s.n_steps)
        .with_substeps(s.substeps)
        .with_x0(s.x0);
    config.validate()?;
    if !(s.diffusion.is_finite() && s.diffusion >= 0.0) {
        bail!("diffusion coefficient must be finite and non-negative, got {}", s.diffusion);
    }
    Ok(config)
}
