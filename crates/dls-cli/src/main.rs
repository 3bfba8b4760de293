use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dls_solver::demo::{self, DemoConfig, DemoOutcome};
use dls_solver::{DlsError, RunReport, SolverFactory, SolverParams};

/// Above this `‖x - x_ex‖₁` a solve is reported as suspicious.
const RESIDUAL_WARN_THRESHOLD: f64 = 1e-6;

#[derive(Parser, Debug)]
#[command(
    name = "dls-cli",
    about = "Solve the 1-D Laplacian with a named direct solver and report the error"
)]
struct Cli {
    /// Solver key (use --list to see available options)
    #[arg(long, default_value = "sparse-lu")]
    solver: String,

    /// Number of unknowns
    #[arg(short = 'n', long = "size", default_value_t = 10)]
    n: usize,

    /// JSON file with solver parameters (defaults to the verbose preset)
    #[arg(long)]
    params: Option<PathBuf>,

    /// Print a JSON run report after the console output
    #[arg(long)]
    json: bool,

    /// List available solvers and exit
    #[arg(long)]
    list: bool,
}

fn load_params(path: Option<&PathBuf>) -> Result<SolverParams, DlsError> {
    match path {
        Some(path) => {
            log::debug!("loading solver parameters from {}", path.display());
            SolverParams::from_json_file(path)
        }
        None => Ok(SolverParams::verbose()),
    }
}

fn list_solvers(json: bool) -> Result<(), DlsError> {
    let names = SolverFactory::new().available();
    if json {
        println!("{}", serde_json::to_string_pretty(&names)?);
    } else {
        for name in names {
            println!("{name}");
        }
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<(), DlsError> {
    if cli.list {
        return list_solvers(cli.json);
    }

    let config = DemoConfig {
        n: cli.n,
        params: load_params(cli.params.as_ref())?,
    };

    let outcome = demo::run(&cli.solver, &config, &mut io::stdout().lock())?;

    if let DemoOutcome::Solved(run) = &outcome {
        if run.residual_l1 > RESIDUAL_WARN_THRESHOLD {
            log::warn!(
                "{}: ||x - x_ex||_1 = {:e} exceeds {:e}",
                run.solver,
                run.residual_l1,
                RESIDUAL_WARN_THRESHOLD
            );
        }
    }

    if cli.json {
        let report = RunReport::from_outcome(
            &cli.solver,
            cli.n,
            &outcome,
            chrono::Utc::now().to_rfc3339(),
        );
        println!("{}", report.to_json()?);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}
