//! HeuriGeo CLI
//!
//! Loads a JSON problem file, runs the solver and prints the report as
//! JSON on stdout. Exit code 0 means proved, 1 means not proved, 2 means
//! the problem file was unusable.

use clap::Parser;
use heurigeo_core::config::{DEFAULT_CANDIDATE_BUDGET, DEFAULT_MAX_ROUNDS};
use heurigeo_core::{Family, InputError, ProblemFile, SolveReport, Solver, SolverConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "heurigeo")]
#[command(about = "Prove Euclidean geometry statements by deductive closure with auxiliary points")]
struct Args {
    /// Input problem file (JSON)
    problem: PathBuf,

    /// Seed for the candidate shuffle
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Maximum number of auxiliary candidates to try
    #[arg(long, default_value_t = DEFAULT_CANDIDATE_BUDGET)]
    budget: usize,

    /// Cap on closure rounds per attempt
    #[arg(long, default_value_t = DEFAULT_MAX_ROUNDS)]
    max_rounds: usize,

    /// Comma-separated heuristic families to enable (default: all)
    #[arg(long, value_delimiter = ',')]
    families: Option<Vec<Family>>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(report) => {
            if report.proved {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args) -> Result<SolveReport, InputError> {
    let config = SolverConfig {
        seed: args.seed,
        candidate_budget: args.budget,
        max_rounds: args.max_rounds,
        families: args.families.clone().unwrap_or_else(Family::all),
        ..SolverConfig::default()
    };

    tracing::debug!(
        seed = config.seed,
        budget = config.candidate_budget,
        "solver configured"
    );

    let file = ProblemFile::load(&args.problem)?;
    let state = file.into_state(&config)?;
    let report = Solver::new(config).solve(state);

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);
    Ok(report)
}
