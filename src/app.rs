//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - installs the logger
//! - runs fits / solves through the shared pipeline
//! - prints reports and writes optional exports

use clap::Parser;

use crate::cli::{Cli, Command, FitArgs, PredictArgs, SolveArgs, StudyArgs, SystemArgs};
use crate::data::SyntheticConfig;
use crate::domain::FitMethod;
use crate::error::AppError;
use crate::solve::{SolverOptions, convergence_study, decade_tolerances, solve};

pub mod pipeline;

use pipeline::{SampleSource, SystemSource};

/// Entry point for the `msolve` binary.
pub fn run() -> Result<(), AppError> {
    // Solver defaults may come from a local `.env` (MSOLVE_TOL, MSOLVE_MAX_ITER, ...).
    dotenvy::dotenv().ok();

    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);
    init_logging(cli.verbose);

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Predict(args) => handle_predict(args),
        Command::Solve(args) => handle_solve(args),
        Command::Study(args) => handle_study(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    // A second initialization (e.g. from tests) is harmless.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let source = sample_source_from_args(&args);
    let run = pipeline::run_fit(&source, args.method, &args.predict)?;

    println!("{}", crate::report::format_fit_summary(&run.fit, &run.source_label));
    let skipped = crate::report::format_row_errors(&run.row_errors);
    if !skipped.is_empty() {
        println!("{skipped}");
    }
    if !run.predictions.is_empty() {
        println!("{}", crate::report::format_predictions(&run.predictions));
    }

    if args.compare {
        let other = match args.method {
            FitMethod::Centered => FitMethod::Uncentered,
            FitMethod::Uncentered => FitMethod::Centered,
        };
        let alt = crate::fit::fit_with(&run.samples, other)?;
        println!("Comparison with the {} method:", other.display_name());
        println!("  beta       : {:.12e} (diff {:.3e})", alt.beta, alt.beta - run.fit.beta);
        println!(
            "  log10 alpha: {:.12} (diff {:.3e})",
            alt.log_alpha(),
            alt.log_alpha() - run.fit.log_alpha()
        );
    }

    if let Some(path) = &args.export_fit {
        crate::io::fitfile::write_fit_json(path, &run.fit)?;
    }
    if let Some(path) = &args.export_predictions {
        crate::io::export::write_predictions_csv(path, &run.predictions)?;
    }

    Ok(())
}

fn handle_predict(args: PredictArgs) -> Result<(), AppError> {
    let (alpha, beta) = match (&args.fit, args.alpha, args.beta) {
        (Some(path), _, _) => {
            let file = crate::io::fitfile::read_fit_json(path)?;
            (file.fit.alpha, file.fit.beta)
        }
        (None, Some(alpha), Some(beta)) => (alpha, beta),
        _ => return Err(AppError::new(2, "Provide either --fit JSON or both --alpha and --beta.")),
    };

    let values = crate::models::predict_many(&args.x, alpha, beta)?;
    let table: Vec<(f64, f64)> = args.x.iter().copied().zip(values).collect();
    println!("{}", crate::report::format_predictions(&table));
    Ok(())
}

fn handle_solve(args: SolveArgs) -> Result<(), AppError> {
    let system = pipeline::load_system(&system_source_from_args(&args.source))?;
    let options = SolverOptions {
        method: args.method,
        tolerance: args.tolerance,
        max_iterations: args.max_iterations,
        max_size: args.max_size,
        x0: None,
    };

    let solution = solve(&system, &options)?;
    println!("=== {} ===", options.method.display_name());
    println!("{}", crate::report::format_solution(&system, &solution));

    if let Some(path) = &args.export {
        crate::io::system::write_solution_json(path, &system, &solution)?;
    }
    Ok(())
}

fn handle_study(args: StudyArgs) -> Result<(), AppError> {
    let system = pipeline::load_system(&system_source_from_args(&args.source))?;
    let tolerances = if args.tolerances.is_empty() {
        decade_tolerances(10)
    } else {
        args.tolerances.clone()
    };

    let rows = convergence_study(&system, &tolerances, args.max_iterations)?;
    println!("=== Gauss-Seidel convergence study ({0}x{0}) ===", system.size());
    println!("{}", crate::report::format_study(&rows));
    Ok(())
}

fn sample_source_from_args(args: &FitArgs) -> SampleSource {
    if let Some(path) = &args.csv {
        return SampleSource::Csv(path.clone());
    }
    if args.synthetic {
        let s = &args.synthetic_opts;
        return SampleSource::Synthetic(SyntheticConfig {
            alpha: s.alpha,
            beta: s.beta,
            x_min: s.x_min,
            x_max: s.x_max,
            count: s.count,
            noise_log10: s.noise,
            seed: s.seed,
        });
    }
    SampleSource::Moore
}

fn system_source_from_args(args: &SystemArgs) -> SystemSource {
    match (&args.system, args.random) {
        (Some(path), _) => SystemSource::File(path.clone()),
        (None, Some(n)) => SystemSource::Random { n, seed: args.seed },
        (None, None) => SystemSource::Mines,
    }
}

/// Rewrite argv so `msolve` defaults to `msolve fit`.
///
/// Only the first token after any leading `-v`/`--verbose` flags is inspected,
/// so flag values that happen to match a subcommand name are left alone.
///
/// Rules:
/// - `msolve`                       -> `msolve fit`
/// - `msolve --csv data.csv ...`    -> `msolve fit --csv data.csv ...`
/// - `msolve -v --csv study`        -> `msolve -v fit --csv study`
/// - `msolve --help/--version/-h`   -> unchanged (show top-level help/version)
/// - `msolve -v solve ...`          -> unchanged (global flag before a subcommand)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let first = argv
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, a)| !is_verbosity_flag(a))
        .map(|(i, a)| (i, a.clone()));

    let Some((idx, arg)) = first else {
        argv.push("fit".to_string());
        return argv;
    };

    let is_subcommand_or_help = matches!(
        arg.as_str(),
        "fit" | "predict" | "solve" | "study" | "help" | "-h" | "--help" | "-V" | "--version"
    );
    if is_subcommand_or_help {
        return argv;
    }

    // If the first token is a flag, treat it as "fit flags".
    if arg.starts_with('-') {
        argv.insert(idx, "fit".to_string());
    }

    argv
}

fn is_verbosity_flag(arg: &str) -> bool {
    arg == "--verbose" || (arg.len() > 1 && arg.starts_with('-') && arg[1..].chars().all(|c| c == 'v'))
}
