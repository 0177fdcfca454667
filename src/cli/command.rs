//! Command-line interface definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Solve and characterize two-variable linear programs
#[derive(Parser, Debug)]
#[command(name = "planar-lp")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file [default: planar-lp.toml if present]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve a problem file and print the optimum
    Solve(ProblemArgs),

    /// Print the feasible region polygon of a problem file
    Region(RegionArgs),

    /// Print the composed result: optimum, region, boundaries, contour levels
    Report(ReportArgs),

    /// Validate a configuration file
    Check(CheckArgs),
}

/// Arguments for commands that only need a problem file.
#[derive(Args, Debug)]
pub struct ProblemArgs {
    /// Path to the problem file (TOML)
    pub problem: PathBuf,
}

/// Bounding box overrides shared by geometry commands.
#[derive(Args, Debug, Default)]
pub struct BoxArgs {
    /// Override bounding box width
    #[arg(long)]
    pub max_x: Option<f64>,

    /// Override bounding box height
    #[arg(long)]
    pub max_y: Option<f64>,
}

#[derive(Args, Debug)]
pub struct RegionArgs {
    /// Path to the problem file (TOML)
    pub problem: PathBuf,

    #[command(flatten)]
    pub bbox: BoxArgs,
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Path to the problem file (TOML)
    pub problem: PathBuf,

    #[command(flatten)]
    pub bbox: BoxArgs,

    /// Include every field sample in JSON output
    #[arg(long)]
    pub samples: bool,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Configuration file to validate
    pub file: PathBuf,
}
