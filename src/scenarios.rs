//! Built-in problems, each one a table of literals.
//!
//! A scenario only names its variables, constraints and objective;
//! [ScenarioSpec::build] turns it into a [ProblemModel].

use crate::error::ModelError;
use crate::model::Comparison::{self, Equal, GreaterOrEqual, LessOrEqual};
use crate::model::Domain::{self, Binary, Continuous, Integer};
use crate::model::{LinearExpr, ProblemModel, Sense};

/// One decision variable of a scenario
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableSpec {
    /// unique name
    pub name: &'static str,
    /// allowed values
    pub domain: Domain,
    /// lower bound, may be -INFINITY
    pub lower: f64,
    /// upper bound, may be INFINITY
    pub upper: f64,
}

/// One labeled constraint of a scenario
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintSpec {
    /// name shown in reports
    pub label: &'static str,
    /// (variable name, coefficient) pairs
    pub terms: &'static [(&'static str, f64)],
    /// comparison operator
    pub operator: Comparison,
    /// right-hand side
    pub rhs: f64,
}

/// The objective of a scenario
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectiveSpec {
    /// maximize or minimize
    pub sense: Sense,
    /// (variable name, coefficient) pairs
    pub terms: &'static [(&'static str, f64)],
}

/// A complete problem, as data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioSpec {
    /// name used on the command line
    pub name: &'static str,
    /// one-line summary
    pub description: &'static str,
    /// variables, in output order
    pub variables: &'static [VariableSpec],
    /// constraints
    pub constraints: &'static [ConstraintSpec],
    /// objective
    pub objective: ObjectiveSpec,
}

impl ScenarioSpec {
    /// Build the model described by this scenario
    pub fn build(&self) -> Result<ProblemModel, ModelError> {
        let mut model = ProblemModel::new(self.name);
        for v in self.variables {
            model.add_variable(v.name, v.domain, v.lower, v.upper)?;
        }
        for c in self.constraints {
            let expr = expression(&model, c.terms)?;
            model.add_labeled_constraint(c.label, expr, c.operator, c.rhs)?;
        }
        let objective = expression(&model, self.objective.terms)?;
        model.set_objective(objective, self.objective.sense)?;
        Ok(model)
    }
}

fn expression(model: &ProblemModel, terms: &[(&str, f64)]) -> Result<LinearExpr, ModelError> {
    terms
        .iter()
        .map(|&(name, coefficient)| {
            model
                .variable(name)
                .map(|handle| (handle, coefficient))
                .ok_or_else(|| ModelError::UnknownVariable {
                    variable: format!("`{}`", name),
                    model: model.name().to_string(),
                })
        })
        .collect()
}

const fn var(name: &'static str, domain: Domain, lower: f64, upper: f64) -> VariableSpec {
    VariableSpec {
        name,
        domain,
        lower,
        upper,
    }
}

const fn row(
    label: &'static str,
    terms: &'static [(&'static str, f64)],
    operator: Comparison,
    rhs: f64,
) -> ConstraintSpec {
    ConstraintSpec {
        label,
        terms,
        operator,
        rhs,
    }
}

const INF: f64 = f64::INFINITY;

/// Every built-in scenario, in the order they run by default
pub const SCENARIOS: &[ScenarioSpec] = &[
    ScenarioSpec {
        name: "knapsack",
        description: "0/1 knapsack: two items of value 10 and 20, sizes 8 and 6, capacity 10",
        variables: &[var("item_1", Binary, 0., 1.), var("item_2", Binary, 0., 1.)],
        constraints: &[row("capacity", &[("item_1", 8.), ("item_2", 6.)], LessOrEqual, 10.)],
        objective: ObjectiveSpec {
            sense: Sense::Maximize,
            terms: &[("item_1", 10.), ("item_2", 20.)],
        },
    },
    ScenarioSpec {
        name: "coin-plating",
        description: "Coins of type A and B plated with limited gold and wire, maximizing value",
        variables: &[var("x_A", Integer, 1., INF), var("x_B", Integer, 1., INF)],
        constraints: &[
            row("gold", &[("x_A", 3.), ("x_B", 5.)], LessOrEqual, 500.),
            row("wires", &[("x_A", 2.), ("x_B", 3.)], LessOrEqual, 300.),
        ],
        objective: ObjectiveSpec {
            sense: Sense::Maximize,
            terms: &[("x_A", 5.), ("x_B", 7.)],
        },
    },
    ScenarioSpec {
        name: "moment-bounds",
        description: "Largest fourth moment of a distribution on 0..6 with mean 3 and second moment 10",
        variables: &[
            var("p_0", Continuous, 0., 1.),
            var("p_1", Continuous, 0., 1.),
            var("p_2", Continuous, 0., 1.),
            var("p_3", Continuous, 0., 1.),
            var("p_4", Continuous, 0., 1.),
            var("p_5", Continuous, 0., 1.),
            var("p_6", Continuous, 0., 1.),
        ],
        constraints: &[
            row(
                "total_probability",
                &[("p_0", 1.), ("p_1", 1.), ("p_2", 1.), ("p_3", 1.), ("p_4", 1.), ("p_5", 1.), ("p_6", 1.)],
                Equal,
                1.,
            ),
            row(
                "first_moment",
                &[("p_0", 0.), ("p_1", 1.), ("p_2", 2.), ("p_3", 3.), ("p_4", 4.), ("p_5", 5.), ("p_6", 6.)],
                Equal,
                3.,
            ),
            row(
                "second_moment",
                &[("p_0", 0.), ("p_1", 1.), ("p_2", 4.), ("p_3", 9.), ("p_4", 16.), ("p_5", 25.), ("p_6", 36.)],
                Equal,
                10.,
            ),
        ],
        objective: ObjectiveSpec {
            sense: Sense::Maximize,
            terms: &[("p_0", 0.), ("p_1", 1.), ("p_2", 16.), ("p_3", 81.), ("p_4", 256.), ("p_5", 625.), ("p_6", 1296.)],
        },
    },
    ScenarioSpec {
        name: "resource-allocation",
        description: "Split plant hours between doors and windows for the largest weekly profit",
        variables: &[var("doors", Continuous, 0., INF), var("windows", Continuous, 0., INF)],
        constraints: &[
            row("plant_1", &[("doors", 1.)], LessOrEqual, 4.),
            row("plant_2", &[("windows", 2.)], LessOrEqual, 12.),
            row("plant_3", &[("doors", 3.), ("windows", 2.)], LessOrEqual, 18.),
        ],
        objective: ObjectiveSpec {
            sense: Sense::Maximize,
            terms: &[("doors", 3.), ("windows", 5.)],
        },
    },
    ScenarioSpec {
        name: "contradiction",
        description: "A variable required to be both at least 5 and at most 1",
        variables: &[var("x", Continuous, -INF, INF)],
        constraints: &[
            row("at_least_5", &[("x", 1.)], GreaterOrEqual, 5.),
            row("at_most_1", &[("x", 1.)], LessOrEqual, 1.),
        ],
        objective: ObjectiveSpec {
            sense: Sense::Minimize,
            terms: &[("x", 1.)],
        },
    },
];

/// Look a scenario up by name
pub fn find(name: &str) -> Option<&'static ScenarioSpec> {
    SCENARIOS.iter().find(|s| s.name == name)
}
