//! The result of a solve, checked against the model.
use std::collections::HashMap;

use tracing::warn;

use crate::config::Backend;
use crate::model::{ProblemModel, VariableHandle, DEFAULT_TOLERANCE};
use crate::solvers::{EngineSolution, Status};

/// The result of one solve. Values are only present when the status is
/// [Status::Optimal] or [Status::Feasible], and then for every variable of the model.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    status: Status,
    values: HashMap<String, f64>,
    objective_value: Option<f64>,
    message: Option<String>,
    backend: Backend,
}

impl Solution {
    /// Check what an engine returned against the model it solved. The
    /// objective value is recomputed from the assignment; an assignment that
    /// breaks a constraint beyond [DEFAULT_TOLERANCE] becomes [Status::Error].
    pub(crate) fn from_engine(model: &ProblemModel, raw: EngineSolution, backend: Backend) -> Self {
        if !raw.status.is_success() {
            return Solution {
                status: raw.status,
                values: HashMap::new(),
                objective_value: None,
                message: None,
                backend,
            };
        }
        let mut values = HashMap::with_capacity(model.num_variables());
        for variable in model.variables() {
            match raw.results.get(variable.name()) {
                Some(&value) => values.insert(variable.name().to_string(), value),
                None => {
                    return Solution::failed(
                        backend,
                        format!("{} returned no value for `{}`", backend, variable.name()),
                    )
                }
            };
        }
        let violated = model.violated_constraints(&values, DEFAULT_TOLERANCE);
        if !violated.is_empty() {
            warn!(model = model.name(), ?violated, "solution violates constraints beyond tolerance");
            let labels: Vec<String> = violated
                .iter()
                .map(|&idx| match model.constraints().nth(idx).and_then(|c| c.label()) {
                    Some(label) => label.to_string(),
                    None => format!("c{}", idx),
                })
                .collect();
            return Solution::failed(
                backend,
                format!(
                    "{} returned an assignment violating {}",
                    backend,
                    labels.join(", ")
                ),
            );
        }
        let objective_value = model.evaluate(model.objective().expr(), &values);
        Solution {
            status: raw.status,
            values,
            objective_value,
            message: None,
            backend,
        }
    }

    /// A solve that produced no usable answer
    pub(crate) fn failed(backend: Backend, message: String) -> Self {
        Solution {
            status: Status::Error,
            values: HashMap::new(),
            objective_value: None,
            message: Some(message),
            backend,
        }
    }

    /// Outcome of the solve
    pub fn status(&self) -> Status {
        self.status
    }

    /// Whether the solution carries an assignment
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Value assigned to every variable, keyed by name
    pub fn values(&self) -> &HashMap<String, f64> {
        &self.values
    }

    /// Value assigned to the named variable
    pub fn value(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Value assigned to a variable of `model`
    pub fn value_of(&self, model: &ProblemModel, variable: VariableHandle) -> Option<f64> {
        self.value(model.get(variable)?.name())
    }

    /// Objective evaluated at the assignment
    pub fn objective_value(&self) -> Option<f64> {
        self.objective_value
    }

    /// Diagnostic from a failed solve
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Engine that produced the solution
    pub fn backend(&self) -> Backend {
        self.backend
    }
}
