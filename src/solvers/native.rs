//! In-process engine: the model is translated to a [good_lp] problem and
//! solved by the pure Rust `microlp` backend.
use std::collections::HashMap;
use std::time::Duration;

use good_lp::{constraint, microlp, variable, Expression, ProblemVariables, ResolutionError};
use good_lp::{Solution as _, SolverModel};
use tracing::warn;

use crate::error::EngineError;
use crate::model::{Comparison, Domain, LinearExpr, ProblemModel, Sense, Variable};
use crate::solvers::{EngineSolution, SolverTrait, Status};

/// The microlp solver, linked into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeSolver;

impl NativeSolver {
    /// Create the solver
    pub fn new() -> Self {
        NativeSolver
    }
}

fn definition(v: &Variable) -> good_lp::variable::VariableDefinition {
    let mut def = variable().name(v.name());
    match v.domain() {
        Domain::Binary => return def.binary(),
        Domain::Integer => def = def.integer(),
        Domain::Continuous => {}
    }
    if v.lower_bound().is_finite() {
        def = def.min(v.lower_bound());
    }
    if v.upper_bound().is_finite() {
        def = def.max(v.upper_bound());
    }
    def
}

fn expression(expr: &LinearExpr, columns: &[good_lp::Variable]) -> Expression {
    expr.terms()
        .map(|(v, coefficient)| coefficient * columns[v.index()])
        .sum()
}

impl SolverTrait for NativeSolver {
    fn name(&self) -> &str {
        "microlp"
    }

    fn run(
        &self,
        model: &ProblemModel,
        time_limit: Option<Duration>,
    ) -> Result<EngineSolution, EngineError> {
        if let Some(limit) = time_limit {
            warn!(?limit, "the native solver does not support time limits; ignoring");
        }
        let mut vars = ProblemVariables::new();
        let columns: Vec<good_lp::Variable> =
            model.variables().map(|v| vars.add(definition(v))).collect();

        let objective = expression(model.objective().expr(), &columns);
        let unsolved = match model.objective().sense() {
            Sense::Maximize => vars.maximise(objective),
            Sense::Minimize => vars.minimise(objective),
        };
        let mut problem = unsolved.using(microlp);
        for c in model.constraints() {
            let lhs = expression(c.expr(), &columns);
            problem = problem.with(match c.operator() {
                Comparison::LessOrEqual => constraint::leq(lhs, c.rhs()),
                Comparison::GreaterOrEqual => constraint::geq(lhs, c.rhs()),
                Comparison::Equal => constraint::eq(lhs, c.rhs()),
            });
        }

        match problem.solve() {
            Ok(solution) => {
                let results = model
                    .variables()
                    .zip(&columns)
                    .map(|(v, &column)| (v.name().to_string(), solution.value(column)))
                    .collect();
                Ok(EngineSolution::new(Status::Optimal, results))
            }
            Err(ResolutionError::Infeasible) => {
                Ok(EngineSolution::new(Status::Infeasible, HashMap::new()))
            }
            Err(ResolutionError::Unbounded) => {
                Ok(EngineSolution::new(Status::Unbounded, HashMap::new()))
            }
            Err(other) => Err(EngineError::Native(other.to_string())),
        }
    }
}
