//! The solver facade: one entry point in front of every engine.
//!
//! ```
//! use lp_models::config::SolverConfig;
//! use lp_models::model::{Comparison, Domain, LinearExpr, ProblemModel, Sense};
//! use lp_models::solve::Solver;
//! use lp_models::solvers::Status;
//!
//! let mut model = ProblemModel::new("tiny");
//! let x = model.add_variable("x", Domain::Integer, 0., 10.)?;
//! model.add_constraint(LinearExpr::new().term(x, 2.), Comparison::LessOrEqual, 7.)?;
//! model.set_objective(LinearExpr::new().term(x, 1.), Sense::Maximize)?;
//!
//! let solver = Solver::new(SolverConfig::new())?;
//! let solution = solver.solve(&model);
//! assert_eq!(solution.status(), Status::Optimal);
//! assert!((solution.value("x").unwrap() - 3.).abs() < 1e-6);
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use std::borrow::Cow;

use tracing::{debug, info, warn};

use crate::config::{Backend, SolveMode, SolverConfig};
use crate::error::SolveError;
use crate::model::ProblemModel;
use crate::solution::Solution;
use crate::solvers::auto::{detect, engine_for, is_available};
use crate::solvers::SolverTrait;

/// A configured, available engine
pub struct Solver {
    backend: Backend,
    engine: Box<dyn SolverTrait>,
    config: SolverConfig,
}

impl std::fmt::Debug for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Solver")
            .field("backend", &self.backend)
            .field("engine", &self.engine.name())
            .field("config", &self.config)
            .finish()
    }
}

impl Solver {
    /// Resolve the configured backend and check that it can be run.
    pub fn new(config: SolverConfig) -> Result<Solver, SolveError> {
        let (backend, engine) = match config.backend {
            Backend::Auto => detect(&config)?,
            backend => {
                let engine = engine_for(backend, &config)?;
                if !is_available(engine.as_ref()) {
                    return Err(SolveError::BackendUnavailable {
                        backend,
                        reason: format!("`{}` could not be run", engine.name()),
                    });
                }
                (backend, engine)
            }
        };
        info!(%backend, engine = engine.name(), mode = ?config.mode, "solver ready");
        Ok(Solver {
            backend,
            engine,
            config,
        })
    }

    /// The concrete backend in use. Never [Backend::Auto].
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// The configuration this solver was built from
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve the model. Engine failures are reported as [crate::solvers::Status::Error].
    pub fn solve(&self, model: &ProblemModel) -> Solution {
        let target = match self.config.mode {
            SolveMode::Exact => Cow::Borrowed(model),
            SolveMode::Relaxation => Cow::Owned(model.relaxed()),
        };
        debug!(
            model = model.name(),
            variables = model.num_variables(),
            constraints = model.num_constraints(),
            "submitting model"
        );
        match self.engine.run(&target, self.config.time_limit) {
            Ok(raw) => {
                let solution = Solution::from_engine(&target, raw, self.backend);
                info!(model = model.name(), status = %solution.status(), "solve finished");
                solution
            }
            Err(e) => {
                warn!(model = model.name(), error = %e, "solver failed");
                Solution::failed(self.backend, e.to_string())
            }
        }
    }
}

/// Build a [Solver] for `config` and solve `model` with it
pub fn solve(model: &ProblemModel, config: &SolverConfig) -> Result<Solution, SolveError> {
    Ok(Solver::new(config.clone())?.solve(model))
}
