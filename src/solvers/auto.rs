//! Finding which engines are installed on the user's computer.
//! [detect] tries every supported engine, in [Backend::AUTO_ORDER].

use tracing::{debug, warn};

use crate::config::{Backend, SolverConfig};
use crate::error::{ModelError, SolveError};
use crate::model::{Comparison, Domain, LinearExpr, ProblemModel, Sense};
#[cfg(feature = "cplex")]
use crate::solvers::cplex::Cplex;
use crate::solvers::{CbcSolver, GlpkSolver, GurobiSolver, NativeSolver, SolverTrait, Status};

/// The engine behind a concrete backend, set up with the thread count and
/// executable of `config`. [Backend::Auto] is resolved by [detect].
pub fn engine_for(backend: Backend, config: &SolverConfig) -> Result<Box<dyn SolverTrait>, SolveError> {
    let threads = config.threads;
    let command = config.command.clone();
    match backend {
        Backend::Native => {
            if threads.is_some() || command.is_some() {
                warn!("the native solver runs in process on one thread; ignoring threads and command");
            }
            Ok(Box::new(NativeSolver::new()))
        }
        Backend::Cbc => {
            let mut solver = CbcSolver::new();
            if let Some(command) = command {
                solver = solver.command_name(command);
            }
            if let Some(threads) = threads {
                solver = solver.with_nb_threads(threads);
            }
            Ok(Box::new(solver))
        }
        Backend::Glpk => {
            if threads.is_some() {
                warn!("glpsol is single-threaded; ignoring threads");
            }
            let solver = GlpkSolver::new();
            Ok(Box::new(match command {
                Some(command) => solver.command_name(command),
                None => solver,
            }))
        }
        Backend::Gurobi => {
            let mut solver = GurobiSolver::new();
            if let Some(command) = command {
                solver = solver.command_name(command);
            }
            if let Some(threads) = threads {
                solver = solver.with_nb_threads(threads);
            }
            Ok(Box::new(solver))
        }
        #[cfg(feature = "cplex")]
        Backend::Cplex => {
            let solver = match command {
                Some(command) => Cplex::with_command(command),
                None => Cplex::default(),
            };
            Ok(Box::new(match threads {
                Some(threads) => solver.with_nb_threads(threads),
                None => solver,
            }))
        }
        #[cfg(not(feature = "cplex"))]
        Backend::Cplex => Err(SolveError::BackendUnavailable {
            backend,
            reason: "this build does not include the `cplex` feature".to_string(),
        }),
        Backend::Auto => detect(config).map(|(_, engine)| engine),
    }
}

/// The first available engine. Each one runs its default executable.
pub fn detect(config: &SolverConfig) -> Result<(Backend, Box<dyn SolverTrait>), SolveError> {
    let config = SolverConfig {
        command: None,
        ..config.clone()
    };
    for backend in Backend::AUTO_ORDER {
        let engine = match engine_for(backend, &config) {
            Ok(engine) => engine,
            Err(e) => {
                debug!(%backend, error = %e, "skipping backend");
                continue;
            }
        };
        if is_available(engine.as_ref()) {
            return Ok((backend, engine));
        }
    }
    Err(SolveError::BackendUnavailable {
        backend: Backend::Auto,
        reason: "no supported solver could be run".to_string(),
    })
}

// Small enough to avoid writing a large problem to disk for nothing
fn probe_model() -> Result<ProblemModel, ModelError> {
    let mut model = ProblemModel::new("probe");
    let x = model.add_variable("x", Domain::Continuous, 0.0, 1.0)?;
    model.add_constraint(LinearExpr::new().term(x, 1.0), Comparison::GreaterOrEqual, 0.0)?;
    model.set_objective(LinearExpr::new().term(x, 1.0), Sense::Minimize)?;
    Ok(model)
}

/// Whether the engine can solve a trivial problem
pub fn is_available(engine: &dyn SolverTrait) -> bool {
    let probe = match probe_model() {
        Ok(probe) => probe,
        Err(_) => return false,
    };
    match engine.run(&probe, None) {
        Ok(solution) => solution.status == Status::Optimal,
        Err(e) => {
            debug!(engine = engine.name(), error = %e, "solver probe failed");
            false
        }
    }
}
