//! Analyze command: run the flux estimators on a trajectory and write a JSON
//! report.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{info, info_span, warn};

use cfep_flux::{
    FluxError, Profile, ProfileOptions, committor, count_transition_paths, crossing_profile,
    histogram, origin_profile, relaxation_rate, survival_factor, transition_profile,
};

use crate::cli::AnalyzeArgs;
use crate::config::{AnalyzeToml, CfepConfig};
use crate::convert;
use crate::trajectory::read_trajectory;

#[derive(Debug, Serialize)]
pub struct Report {
    pub summary: Summary,
    pub histogram: Option<Profile>,
    pub crossing: Vec<CrossingEntry>,
    pub origin: Option<Profile>,
    pub relaxation_rate: Option<f64>,
    pub survival: Vec<SurvivalEntry>,
    pub transition: Option<TransitionReport>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub n: usize,
    pub mean: f64,
    pub sd: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Uncentred autocorrelation at the relaxation lag.
    pub autocorrelation: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct CrossingEntry {
    pub exponent: f64,
    pub profile: Profile,
}

#[derive(Debug, Serialize)]
pub struct SurvivalEntry {
    pub lag: usize,
    pub profile: Profile,
}

#[derive(Debug, Serialize)]
pub struct TransitionReport {
    pub x0: f64,
    pub x1: f64,
    pub lag: usize,
    pub n_pairs: usize,
    pub total_rate: f64,
    pub profile: Option<Profile>,
    pub committor: Option<Vec<f64>>,
}

/// Run the analysis pipeline.
pub fn run(args: AnalyzeArgs) -> Result<()> {
    let _cmd = info_span!("analyze").entered();

    // 1. Load config and apply CLI overrides
    let mut config = CfepConfig::load(&args.config)?;
    if let Some(input) = args.input {
        config.analyze.input = Some(input);
    }
    if let Some(output) = args.output {
        config.analyze.output = Some(output);
    }
    let input = config.analyze.input.as_ref().ok_or_else(|| {
        anyhow::anyhow!("no input path: set [analyze].input in config or use --input")
    })?;

    // 2. Read trajectory
    info!(path = %input.display(), "reading trajectory");
    let traj = read_trajectory(input)?;
    if traj.is_empty() {
        bail!("trajectory is empty: {}", input.display());
    }
    info!(n = traj.len(), "trajectory loaded");

    // 3. Estimate
    let report = analyze(&traj, &config.analyze)?;
    if !report.warnings.is_empty() {
        warn!(n = report.warnings.len(), "some estimators failed");
    }

    // 4. Write report
    let json = serde_json::to_string_pretty(&report).context("failed to serialise report")?;
    match &config.analyze.output {
        Some(path) => write_report(path, &json)?,
        None => println!("{json}"),
    }

    info!("analysis complete");
    Ok(())
}

fn write_report(path: &Path, json: &str) -> Result<()> {
    std::fs::write(path, json)
        .with_context(|| format!("failed to write report: {}", path.display()))?;
    info!(path = %path.display(), "report written");
    Ok(())
}

/// Runs every configured estimator over `traj`.
///
/// Estimator failures are recorded in [`Report::warnings`] and the affected
/// section is left empty; only invalid configuration is an error.
pub fn analyze(traj: &[f64], cfg: &AnalyzeToml) -> Result<Report> {
    let options = convert::build_profile_options(cfg)?;
    let mut warnings = Vec::new();

    let (min, max) = match cfep_stats::min_max(traj) {
        Some((lo, hi)) => (Some(lo), Some(hi)),
        None => (None, None),
    };
    let summary = Summary {
        n: traj.len(),
        mean: cfep_stats::mean(traj),
        sd: cfep_stats::sd(traj),
        min,
        max,
        autocorrelation: cfep_stats::autocorrelation(traj, cfg.relaxation_lag),
    };

    let histogram = record(
        "histogram",
        histogram(traj, cfg.histogram_dx),
        &mut warnings,
    );

    let mut crossing = Vec::with_capacity(cfg.exponents.len());
    for &a in &cfg.exponents {
        let name = format!("crossing profile (a = {a})");
        if let Some(profile) = record(&name, crossing_profile(traj, a, &options), &mut warnings) {
            crossing.push(CrossingEntry {
                exponent: a,
                profile,
            });
        }
    }

    let origin = record("origin profile", origin_profile(traj, &options), &mut warnings);

    let relaxation_rate = record(
        "relaxation rate",
        relaxation_rate(traj, cfg.relaxation_lag),
        &mut warnings,
    );

    let survival = if cfg.theta_lags.is_empty() {
        Vec::new()
    } else {
        record(
            "survival factor",
            survival_factor(traj, &cfg.theta_lags, cfg.relaxation_lag, &options),
            &mut warnings,
        )
        .map(|profiles| {
            cfg.theta_lags
                .iter()
                .zip(profiles)
                .map(|(&lag, profile)| SurvivalEntry { lag, profile })
                .collect()
        })
        .unwrap_or_default()
    };

    let transition = match cfg.boundaries {
        Some([x0, x1]) => transition_report(traj, x0, x1, cfg, &options, &mut warnings),
        None => None,
    };

    Ok(Report {
        summary,
        histogram,
        crossing,
        origin,
        relaxation_rate,
        survival,
        transition,
        warnings,
    })
}

fn transition_report(
    traj: &[f64],
    x0: f64,
    x1: f64,
    cfg: &AnalyzeToml,
    options: &ProfileOptions,
    warnings: &mut Vec<String>,
) -> Option<TransitionReport> {
    let counts = record(
        "transition paths",
        count_transition_paths(traj, x0, x1, options),
        warnings,
    )?;
    info!(n_pairs = counts.len(), total = counts.total(), "transition paths counted");

    let profile = record(
        "transition profile",
        transition_profile(&counts, cfg.transition_exponent, options),
        warnings,
    );
    let committor = if cfg.committor {
        record("committor", committor(traj, x0, x1, options), warnings)
    } else {
        None
    };

    Some(TransitionReport {
        x0,
        x1,
        lag: counts.lag(),
        n_pairs: counts.len(),
        total_rate: counts.total(),
        profile,
        committor,
    })
}

fn record<T>(name: &str, result: Result<T, FluxError>, warnings: &mut Vec<String>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(estimator = name, error = %e, "estimator failed");
            warnings.push(format!("{name}: {e}"));
            None
        }
    }
}
