use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use lp_models::report::{render, ReportOptions};
use lp_models::scenarios::{self, ScenarioSpec, SCENARIOS};
use lp_models::{Backend, ProblemModel, Solution, SolveMode, Solver, SolverConfig};

#[derive(Parser, Debug)]
#[command(
    name = "lp-models",
    version,
    about = "Build, solve and print small linear and mixed-integer programs"
)]
struct Cli {
    /// Scenarios to run; all of them when omitted
    scenarios: Vec<String>,

    /// Solver engine: native, cbc, glpk, gurobi, cplex or auto
    #[arg(long, env = "LP_MODELS_BACKEND", default_value = "native")]
    backend: String,

    /// Solve the continuous relaxation instead of the integer program
    #[arg(long)]
    relax: bool,

    /// Wall-clock limit handed to the solver
    #[arg(long, value_name = "SECONDS")]
    time_limit: Option<u64>,

    /// Threads for engines that accept a thread count
    #[arg(long, value_name = "N")]
    threads: Option<u32>,

    /// Solver executable to run instead of the backend's default
    #[arg(long, value_name = "PATH")]
    command: Option<String>,

    /// Also print the activity of every constraint
    #[arg(long)]
    constraints: bool,

    /// List the available scenarios and exit
    #[arg(long)]
    list: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.list {
        for scenario in SCENARIOS {
            println!("{:20} {}", scenario.name, scenario.description);
        }
        return ExitCode::SUCCESS;
    }

    let selected: Vec<&ScenarioSpec> = if cli.scenarios.is_empty() {
        SCENARIOS.iter().collect()
    } else {
        let mut selected = Vec::with_capacity(cli.scenarios.len());
        for name in &cli.scenarios {
            match scenarios::find(name) {
                Some(scenario) => selected.push(scenario),
                None => {
                    eprintln!("Unknown scenario `{}` (see --list)", name);
                    return ExitCode::FAILURE;
                }
            }
        }
        selected
    };

    let backend: Backend = match cli.backend.parse() {
        Ok(backend) => backend,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let relax = cli.relax;
    let mut config = SolverConfig::new().with_backend(backend);
    if relax {
        config = config.with_mode(SolveMode::Relaxation);
    }
    if let Some(seconds) = cli.time_limit {
        config = config.with_time_limit(Duration::from_secs(seconds));
    }
    if let Some(threads) = cli.threads {
        config = config.with_threads(threads);
    }
    if let Some(command) = cli.command {
        config = config.with_command(command);
    }
    let solver = match Solver::new(config) {
        Ok(solver) => solver,
        Err(e) => {
            error!(error = %e, "solver configuration failed");
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let options = ReportOptions {
        show_constraints: cli.constraints,
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (idx, scenario) in selected.into_iter().enumerate() {
        let model = match scenario.build() {
            // report values with the domains they were solved with
            Ok(model) if relax => model.relaxed(),
            Ok(model) => model,
            Err(e) => {
                eprintln!("Model error in `{}`: {}", scenario.name, e);
                return ExitCode::FAILURE;
            }
        };
        let solution = solver.solve(&model);
        if let Err(e) = print_scenario(&mut out, idx > 0, scenario, &solver, &model, &solution, options) {
            eprintln!("Cannot write report: {}", e);
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

fn print_scenario<W: Write>(
    out: &mut W,
    separate: bool,
    scenario: &ScenarioSpec,
    solver: &Solver,
    model: &ProblemModel,
    solution: &Solution,
    options: ReportOptions,
) -> io::Result<()> {
    if separate {
        writeln!(out)?;
    }
    writeln!(out, "== {} ({})", scenario.name, solver.backend())?;
    writeln!(out, "{}", scenario.description)?;
    render(model, solution, out, options)
}
