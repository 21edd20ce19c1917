use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level cfep configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct CfepConfig {
    /// Global RNG seed.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Trajectory simulation settings.
    #[serde(default)]
    pub simulate: SimulateToml,

    /// Analysis settings.
    #[serde(default)]
    pub analyze: AnalyzeToml,
}

impl CfepConfig {
    /// Reads and parses a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulateToml {
    pub output: Option<PathBuf>,
    #[serde(default = "default_sim_dt")]
    pub dt: f64,
    #[serde(default = "default_n_steps")]
    pub n_steps: usize,
    #[serde(default = "default_substeps")]
    pub substeps: usize,
    #[serde(default)]
    pub x0: f64,
    #[serde(default = "default_diffusion")]
    pub diffusion: f64,
    #[serde(default)]
    pub force: ForceToml,
}

impl Default for SimulateToml {
    fn default() -> Self {
        Self {
            output: None,
            dt: default_sim_dt(),
            n_steps: default_n_steps(),
            substeps: default_substeps(),
            x0: 0.0,
            diffusion: default_diffusion(),
            force: ForceToml::default(),
        }
    }
}

fn default_sim_dt() -> f64 {
    0.01
}
fn default_n_steps() -> usize {
    100_000
}
fn default_substeps() -> usize {
    10
}
fn default_diffusion() -> f64 {
    1.0
}

/// Force field selection; only the parameters of the chosen `kind` are read.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForceToml {
    #[serde(default = "default_force_kind")]
    pub kind: String,
    #[serde(default = "default_one")]
    pub k: f64,
    #[serde(default)]
    pub center: f64,
    #[serde(default = "default_one")]
    pub barrier: f64,
    #[serde(default = "default_one")]
    pub width: f64,
    #[serde(default)]
    pub slope: f64,
}

impl Default for ForceToml {
    fn default() -> Self {
        Self {
            kind: default_force_kind(),
            k: 1.0,
            center: 0.0,
            barrier: 1.0,
            width: 1.0,
            slope: 0.0,
        }
    }
}

fn default_force_kind() -> String {
    "double_well".to_string()
}
fn default_one() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalyzeToml {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    #[serde(default = "default_dx")]
    pub dx: Option<f64>,
    #[serde(default = "default_histogram_dx")]
    pub histogram_dx: f64,
    #[serde(default = "default_exponents")]
    pub exponents: Vec<f64>,
    #[serde(default = "default_lag")]
    pub lag: usize,
    #[serde(default = "default_step")]
    pub step: String,
    #[serde(default)]
    pub step_offset: f64,
    #[serde(default = "default_zcmin")]
    pub zcmin: f64,
    #[serde(default = "default_mindx")]
    pub mindx: f64,
    #[serde(default = "default_true")]
    pub clamp_first: bool,
    #[serde(default = "default_lag")]
    pub relaxation_lag: usize,
    #[serde(default)]
    pub theta_lags: Vec<usize>,
    #[serde(default)]
    pub boundaries: Option<[f64; 2]>,
    #[serde(default = "default_one")]
    pub transition_exponent: f64,
    #[serde(default = "default_true")]
    pub committor: bool,
}

impl Default for AnalyzeToml {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            dx: default_dx(),
            histogram_dx: default_histogram_dx(),
            exponents: default_exponents(),
            lag: default_lag(),
            step: default_step(),
            step_offset: 0.0,
            zcmin: default_zcmin(),
            mindx: default_mindx(),
            clamp_first: true,
            relaxation_lag: default_lag(),
            theta_lags: Vec::new(),
            boundaries: None,
            transition_exponent: 1.0,
            committor: true,
        }
    }
}

fn default_dx() -> Option<f64> {
    Some(1e-3)
}
fn default_histogram_dx() -> f64 {
    0.05
}
fn default_exponents() -> Vec<f64> {
    vec![0.0, 1.0]
}
fn default_lag() -> usize {
    1
}
fn default_step() -> String {
    "collapsed".to_string()
}
fn default_zcmin() -> f64 {
    1e-8
}
fn default_mindx() -> f64 {
    1e-3
}
fn default_true() -> bool {
    true
}
