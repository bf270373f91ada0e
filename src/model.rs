//! The problem being optimized: variables, linear constraints and one objective.
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering as AtomicOrdering};

use crate::error::ModelError;

/// Absolute tolerance used when checking an assignment against the model.
/// It is scaled by the magnitude of the right-hand side.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Position of a constraint in its model, in insertion order
pub type ConstraintIndex = usize;

static NEXT_MODEL_ID: AtomicU32 = AtomicU32::new(0);

/// The set of values a variable may take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    /// any real number within the bounds
    Continuous,
    /// any integer within the bounds
    Integer,
    /// 0 or 1
    Binary,
}

impl Domain {
    /// Whether the solver must return a whole number for this variable
    pub fn is_integral(self) -> bool {
        !matches!(self, Domain::Continuous)
    }
}

/// Reference to a variable of one specific model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableHandle {
    model: u32,
    index: usize,
}

impl VariableHandle {
    /// Position of the variable in its model, in insertion order
    pub fn index(self) -> usize {
        self.index
    }
}

impl fmt::Display for VariableHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

/// A decision variable
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    name: String,
    domain: Domain,
    /// -INFINITY if there is no lower bound
    lower_bound: f64,
    /// INFINITY if there is no upper bound
    upper_bound: f64,
}

impl Variable {
    /// Unique name within the model
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Allowed kind of values
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Minimum allowed value for the variable
    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    /// Maximum allowed value for the variable
    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }
}

/// A sparse weighted sum of variables. Variables that do not appear have a
/// coefficient of 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(VariableHandle, f64)>,
}

impl LinearExpr {
    /// The empty expression, equal to 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [LinearExpr::add_term]
    pub fn term(mut self, variable: VariableHandle, coefficient: f64) -> Self {
        self.add_term(variable, coefficient);
        self
    }

    /// Add `coefficient * variable`. Repeated variables are summed.
    pub fn add_term(&mut self, variable: VariableHandle, coefficient: f64) {
        match self.terms.iter_mut().find(|(v, _)| *v == variable) {
            Some((_, c)) => *c += coefficient,
            None => self.terms.push((variable, coefficient)),
        }
    }

    /// Coefficient of the given variable
    pub fn coefficient(&self, variable: VariableHandle) -> f64 {
        self.terms
            .iter()
            .find(|(v, _)| *v == variable)
            .map_or(0.0, |(_, c)| *c)
    }

    /// Terms in the order they were first added
    pub fn terms(&self) -> impl Iterator<Item = (VariableHandle, f64)> + '_ {
        self.terms.iter().copied()
    }

    /// Number of distinct variables in the expression
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether no variable appears in the expression
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl FromIterator<(VariableHandle, f64)> for LinearExpr {
    fn from_iter<I: IntoIterator<Item = (VariableHandle, f64)>>(iter: I) -> Self {
        let mut expr = LinearExpr::new();
        for (variable, coefficient) in iter {
            expr.add_term(variable, coefficient);
        }
        expr
    }
}

/// How the left-hand side of a constraint relates to its right-hand side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `<=`
    LessOrEqual,
    /// `>=`
    GreaterOrEqual,
    /// `=`
    Equal,
}

impl Comparison {
    /// Operator as written in .lp files and reports
    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::LessOrEqual => "<=",
            Comparison::GreaterOrEqual => ">=",
            Comparison::Equal => "=",
        }
    }

    /// Whether `lhs <op> rhs` holds, allowing an error of `tolerance`
    pub fn holds(self, lhs: f64, rhs: f64, tolerance: f64) -> bool {
        match self {
            Comparison::LessOrEqual => lhs <= rhs + tolerance,
            Comparison::GreaterOrEqual => lhs >= rhs - tolerance,
            Comparison::Equal => (lhs - rhs).abs() <= tolerance,
        }
    }
}

/// Optimization sense
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// min
    Minimize,
    /// max
    Maximize,
}

/// A linear constraint `expr <op> rhs`
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    label: Option<String>,
    expr: LinearExpr,
    operator: Comparison,
    rhs: f64,
}

impl Constraint {
    /// Name shown in reports, if one was given
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// left hand side of the constraint
    pub fn expr(&self) -> &LinearExpr {
        &self.expr
    }

    /// '<=' '=' or '>='
    pub fn operator(&self) -> Comparison {
        self.operator
    }

    /// Right-hand side of the constraint
    pub fn rhs(&self) -> f64 {
        self.rhs
    }
}

/// The expression to optimize and the direction to push it in
#[derive(Debug, Clone, PartialEq)]
pub struct Objective {
    expr: LinearExpr,
    sense: Sense,
}

impl Objective {
    /// Target expression
    pub fn expr(&self) -> &LinearExpr {
        &self.expr
    }

    /// Whether to maximize or minimize the expression
    pub fn sense(&self) -> Sense {
        self.sense
    }
}

/// Minimizing 0: any feasible assignment is optimal.
impl Default for Objective {
    fn default() -> Self {
        Objective {
            expr: LinearExpr::new(),
            sense: Sense::Minimize,
        }
    }
}

/// A linear or mixed-integer program under construction.
///
/// ```
/// use lp_models::model::{Comparison, Domain, LinearExpr, ProblemModel, Sense};
///
/// let mut model = ProblemModel::new("knapsack");
/// let a = model.add_variable("a", Domain::Binary, 0., 1.)?;
/// let b = model.add_variable("b", Domain::Binary, 0., 1.)?;
/// model.add_constraint(LinearExpr::new().term(a, 8.).term(b, 6.), Comparison::LessOrEqual, 10.)?;
/// model.set_objective(LinearExpr::new().term(a, 10.).term(b, 20.), Sense::Maximize)?;
/// assert_eq!(model.num_variables(), 2);
/// # Ok::<_, lp_models::error::ModelError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ProblemModel {
    id: u32,
    name: String,
    variables: Vec<Variable>,
    by_name: HashMap<String, usize>,
    constraints: Vec<Constraint>,
    objective: Objective,
}

impl ProblemModel {
    /// Create an empty model. Handles of this model are rejected by every other model.
    pub fn new(name: impl Into<String>) -> Self {
        ProblemModel {
            id: NEXT_MODEL_ID.fetch_add(1, AtomicOrdering::Relaxed),
            name: name.into(),
            variables: Vec::new(),
            by_name: HashMap::new(),
            constraints: Vec::new(),
            objective: Objective::default(),
        }
    }

    /// Model name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a new variable.
    pub fn add_variable(
        &mut self,
        name: impl Into<String>,
        domain: Domain,
        lower_bound: f64,
        upper_bound: f64,
    ) -> Result<VariableHandle, ModelError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(ModelError::DuplicateName {
                name,
                model: self.name.clone(),
            });
        }
        let invalid = |reason| ModelError::InvalidBounds {
            name: name.clone(),
            lower: lower_bound,
            upper: upper_bound,
            reason,
        };
        if lower_bound.is_nan() || upper_bound.is_nan() {
            return Err(invalid("bounds must not be NaN"));
        }
        if lower_bound > upper_bound {
            return Err(invalid("lower bound exceeds upper bound"));
        }
        if domain == Domain::Binary && (lower_bound != 0.0 || upper_bound != 1.0) {
            return Err(invalid("binary variables must have bounds exactly [0, 1]"));
        }

        let handle = VariableHandle {
            model: self.id,
            index: self.variables.len(),
        };
        self.by_name.insert(name.clone(), handle.index);
        self.variables.push(Variable {
            name,
            domain,
            lower_bound,
            upper_bound,
        });
        Ok(handle)
    }

    /// Add `expr <operator> rhs`. Returns the position of the new constraint.
    pub fn add_constraint(
        &mut self,
        expr: LinearExpr,
        operator: Comparison,
        rhs: f64,
    ) -> Result<ConstraintIndex, ModelError> {
        self.push_constraint(None, expr, operator, rhs)
    }

    /// Same as [ProblemModel::add_constraint], with a name used in reports
    pub fn add_labeled_constraint(
        &mut self,
        label: impl Into<String>,
        expr: LinearExpr,
        operator: Comparison,
        rhs: f64,
    ) -> Result<ConstraintIndex, ModelError> {
        self.push_constraint(Some(label.into()), expr, operator, rhs)
    }

    fn push_constraint(
        &mut self,
        label: Option<String>,
        expr: LinearExpr,
        operator: Comparison,
        rhs: f64,
    ) -> Result<ConstraintIndex, ModelError> {
        self.validate(&expr)?;
        if !rhs.is_finite() {
            return Err(ModelError::NonFiniteValue {
                what: "right-hand side",
                value: rhs,
                model: self.name.clone(),
            });
        }
        self.constraints.push(Constraint {
            label,
            expr,
            operator,
            rhs,
        });
        Ok(self.constraints.len() - 1)
    }

    /// Replace the objective. The last call wins.
    pub fn set_objective(&mut self, expr: LinearExpr, sense: Sense) -> Result<(), ModelError> {
        self.validate(&expr)?;
        self.objective = Objective { expr, sense };
        Ok(())
    }

    fn validate(&self, expr: &LinearExpr) -> Result<(), ModelError> {
        for (variable, coefficient) in expr.terms() {
            if self.get(variable).is_none() {
                return Err(ModelError::UnknownVariable {
                    variable: variable.to_string(),
                    model: self.name.clone(),
                });
            }
            if !coefficient.is_finite() {
                return Err(ModelError::NonFiniteValue {
                    what: "coefficient",
                    value: coefficient,
                    model: self.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Look a variable up by name
    pub fn variable(&self, name: &str) -> Option<VariableHandle> {
        self.by_name.get(name).map(|&index| VariableHandle {
            model: self.id,
            index,
        })
    }

    /// The variable behind a handle, if the handle belongs to this model
    pub fn get(&self, handle: VariableHandle) -> Option<&Variable> {
        if handle.model != self.id {
            return None;
        }
        self.variables.get(handle.index)
    }

    /// Variables in insertion order
    pub fn variables(&self) -> std::slice::Iter<'_, Variable> {
        self.variables.iter()
    }

    /// Constraints in insertion order
    pub fn constraints(&self) -> std::slice::Iter<'_, Constraint> {
        self.constraints.iter()
    }

    /// The current objective
    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    /// Number of variables
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Number of constraints
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Value of `expr` under an assignment keyed by variable name.
    /// `None` if a variable of the expression has no value.
    pub fn evaluate(&self, expr: &LinearExpr, values: &HashMap<String, f64>) -> Option<f64> {
        expr.terms().try_fold(0.0, |acc, (variable, coefficient)| {
            let value = values.get(self.get(variable)?.name())?;
            Some(acc + coefficient * value)
        })
    }

    /// Positions of the constraints not satisfied by `values` within `tolerance`
    /// (scaled by the magnitude of the right-hand side). A constraint whose
    /// variables are missing from `values` counts as violated.
    pub fn violated_constraints(&self, values: &HashMap<String, f64>, tolerance: f64) -> Vec<usize> {
        self.constraints
            .iter()
            .enumerate()
            .filter(|(_, c)| {
                let scaled = tolerance * c.rhs.abs().max(1.0);
                match self.evaluate(&c.expr, values) {
                    Some(lhs) => !c.operator.holds(lhs, c.rhs, scaled),
                    None => true,
                }
            })
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Copy of the model with integrality dropped. Handles stay valid.
    pub fn relaxed(&self) -> ProblemModel {
        let mut relaxed = self.clone();
        for variable in relaxed.variables.iter_mut() {
            variable.domain = Domain::Continuous;
        }
        relaxed
    }
}
