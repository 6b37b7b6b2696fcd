//! Command-line parsing for `msolve`.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the numerical code.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::domain::{FitMethod, SolverKind};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "msolve",
    version,
    about = "Exponential least-squares fits and small linear-system solvers"
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit N = alpha * 10^(beta * x) (built-in Moore's-law data unless --csv/--synthetic).
    Fit(FitArgs),
    /// Evaluate a fitted model at the given x values.
    Predict(PredictArgs),
    /// Solve A x = b with the direct or the Gauss-Seidel method.
    Solve(SolveArgs),
    /// Tabulate Gauss-Seidel sweeps needed for a range of tolerances.
    Study(StudyArgs),
}

/// Options for fitting.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Two-column CSV with x and y (headers: x/year, y/count/transistors).
    #[arg(long, value_name = "CSV", conflicts_with = "synthetic")]
    pub csv: Option<PathBuf>,

    /// Fit method.
    #[arg(long, value_enum, default_value_t = FitMethod::Centered)]
    pub method: FitMethod,

    /// Also run the other method and print the differences.
    #[arg(long)]
    pub compare: bool,

    /// Generate a noisy synthetic sample set instead of reading data.
    #[arg(long)]
    pub synthetic: bool,

    #[command(flatten)]
    pub synthetic_opts: SyntheticArgs,

    /// x values to predict at (repeatable). Moore's-law data defaults to 2010 and 2020.
    #[arg(long = "predict", value_name = "X", allow_negative_numbers = true)]
    pub predict: Vec<f64>,

    /// Export the fit to JSON.
    #[arg(long = "export-fit", value_name = "JSON")]
    pub export_fit: Option<PathBuf>,

    /// Export predictions to CSV.
    #[arg(long = "export-predictions", value_name = "CSV")]
    pub export_predictions: Option<PathBuf>,
}

/// Parameters of the synthetic generator (only used with `--synthetic`).
#[derive(Debug, Args, Clone)]
pub struct SyntheticArgs {
    /// True alpha of the synthetic curve.
    #[arg(long, default_value_t = 5.0)]
    pub alpha: f64,

    /// True beta of the synthetic curve.
    #[arg(long, default_value_t = 0.1, allow_negative_numbers = true)]
    pub beta: f64,

    /// Smallest synthetic x.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub x_min: f64,

    /// Largest synthetic x.
    #[arg(long, default_value_t = 20.0, allow_negative_numbers = true)]
    pub x_max: f64,

    /// Number of synthetic samples.
    #[arg(long, default_value_t = 20)]
    pub count: usize,

    /// Standard deviation of the noise on log10(y).
    #[arg(long, default_value_t = 0.05)]
    pub noise: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Options for `predict`.
#[derive(Debug, Parser, Clone)]
pub struct PredictArgs {
    /// Fit JSON produced by `msolve fit --export-fit`.
    #[arg(long, value_name = "JSON", conflicts_with_all = ["alpha", "beta"])]
    pub fit: Option<PathBuf>,

    /// Model alpha (requires --beta).
    #[arg(long, requires = "beta")]
    pub alpha: Option<f64>,

    /// Model beta (requires --alpha).
    #[arg(long, requires = "alpha", allow_negative_numbers = true)]
    pub beta: Option<f64>,

    /// Query points.
    #[arg(required = true, allow_negative_numbers = true)]
    pub x: Vec<f64>,
}

/// Where the linear system comes from.
#[derive(Debug, Args, Clone)]
pub struct SystemArgs {
    /// JSON file `{"a": [[...]], "b": [...]}`. Defaults to the built-in 3x3 mines system.
    #[arg(long, value_name = "JSON", conflicts_with = "random")]
    pub system: Option<PathBuf>,

    /// Generate a random diagonally dominant N x N system.
    #[arg(long, value_name = "N")]
    pub random: Option<usize>,

    /// Seed for --random.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Options for `solve`.
#[derive(Debug, Parser, Clone)]
pub struct SolveArgs {
    #[command(flatten)]
    pub source: SystemArgs,

    /// Solver to use.
    #[arg(long, value_enum, default_value_t = SolverKind::Direct)]
    pub method: SolverKind,

    /// Gauss-Seidel tolerance on the max-norm of the update.
    #[arg(long = "tol", env = "MSOLVE_TOL", default_value_t = 1e-4)]
    pub tolerance: f64,

    /// Gauss-Seidel iteration budget.
    #[arg(long = "max-iter", env = "MSOLVE_MAX_ITER", default_value_t = 1000)]
    pub max_iterations: usize,

    /// Largest accepted system size.
    #[arg(long, env = "MSOLVE_MAX_SIZE", default_value_t = 10)]
    pub max_size: usize,

    /// Write the system and its solution to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

/// Options for `study`.
#[derive(Debug, Parser, Clone)]
pub struct StudyArgs {
    #[command(flatten)]
    pub source: SystemArgs,

    /// Tolerances to try (repeatable). Defaults to 1e-1 ... 1e-10.
    #[arg(long = "tol", value_name = "TOL")]
    pub tolerances: Vec<f64>,

    /// Gauss-Seidel iteration budget per tolerance.
    #[arg(long = "max-iter", env = "MSOLVE_MAX_ITER", default_value_t = 1000)]
    pub max_iterations: usize,
}
