use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Zero-crossing flux analysis of one-dimensional trajectories.
#[derive(Parser)]
#[command(
    name = "cfep",
    version,
    about = "Zero-crossing flux, committor and relaxation estimators for 1-D trajectories"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Generate a trajectory with the Euler-Maruyama integrator.
    Simulate(SimulateArgs),
    /// Compute flux profiles and derived quantities for a trajectory.
    Analyze(AnalyzeArgs),
}

/// Arguments for the `simulate` subcommand.
#[derive(clap::Args)]
pub struct SimulateArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "cfep.toml")]
    pub config: PathBuf,

    /// Override output trajectory path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override global RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Arguments for the `analyze` subcommand.
#[derive(clap::Args)]
pub struct AnalyzeArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "cfep.toml")]
    pub config: PathBuf,

    /// Override input trajectory path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override JSON report path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
