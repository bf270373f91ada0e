//! Plain text rendering of a solved model.
use std::io::{self, Write};

use crate::model::{Domain, ProblemModel};
use crate::solution::Solution;
use crate::solvers::Status;

/// What to include besides status, values and objective
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// Print the activity of every constraint
    pub show_constraints: bool,
}

/// Write the outcome of solving `model` to `sink`. Only I/O errors of the
/// sink are returned; every status renders.
pub fn render<W: Write>(
    model: &ProblemModel,
    solution: &Solution,
    sink: &mut W,
    options: ReportOptions,
) -> io::Result<()> {
    writeln!(sink, "Status: {}", solution.status())?;
    match solution.status() {
        Status::Optimal | Status::Feasible => {}
        Status::Infeasible => {
            return writeln!(sink, "No assignment satisfies every constraint.");
        }
        Status::Unbounded => {
            return writeln!(sink, "The objective can be improved without limit.");
        }
        Status::Error => {
            return match solution.message() {
                Some(message) => writeln!(sink, "The solver failed: {}", message),
                None => writeln!(sink, "The solver failed without a diagnostic."),
            };
        }
    }
    if solution.status() == Status::Feasible {
        writeln!(sink, "Optimality was not proven; this is the best assignment found.")?;
    }

    let width = model.variables().map(|v| v.name().len()).max().unwrap_or(0);
    for variable in model.variables() {
        let value = solution.value(variable.name()).unwrap_or(f64::NAN);
        writeln!(
            sink,
            "  {:width$} = {}",
            variable.name(),
            format_value(value, variable.domain()),
            width = width
        )?;
    }

    if options.show_constraints {
        writeln!(sink, "Constraints:")?;
        for (idx, constraint) in model.constraints().enumerate() {
            let label = match constraint.label() {
                Some(label) => label.to_string(),
                None => format!("c{}", idx),
            };
            let activity = model
                .evaluate(constraint.expr(), solution.values())
                .unwrap_or(f64::NAN);
            writeln!(
                sink,
                "  {}: {} {} {}",
                label,
                format_value(activity, Domain::Continuous),
                constraint.operator().symbol(),
                format_value(constraint.rhs(), Domain::Continuous)
            )?;
        }
    }

    match solution.objective_value() {
        Some(objective) => writeln!(
            sink,
            "Objective value: {}",
            format_value(objective, Domain::Continuous)
        ),
        None => writeln!(sink, "Objective value: unavailable"),
    }
}

/// Integral domains print as whole numbers; continuous values keep up to six
/// decimals, without trailing zeros.
pub fn format_value(value: f64, domain: Domain) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if domain.is_integral() {
        return format!("{}", value.round() as i64);
    }
    let text = format!("{:.6}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" | "" => "0".to_string(),
        _ => text.to_string(),
    }
}
