//! Writing a [ProblemModel] in the .lp file format read by external solvers
//!
use std::collections::HashMap;
use std::fmt;
use std::fmt::Formatter;
use std::io::prelude::*;
use std::io::Result;

use tempfile::NamedTempFile;

use crate::model::{Domain, LinearExpr, ProblemModel, Sense};
use crate::util::UniqueNameGenerator;

/// A model paired with the .lp column name of each of its variables.
/// Its `Display` implementation outputs valid .lp syntax.
pub struct LpFile<'a> {
    model: &'a ProblemModel,
    columns: Vec<String>,
}

impl<'a> LpFile<'a> {
    /// Assign a column name to every variable of the model
    pub fn new(model: &'a ProblemModel) -> Self {
        let mut gen = UniqueNameGenerator::default();
        let columns = model
            .variables()
            .map(|v| gen.add_variable(v.name()).into_owned())
            .collect();
        LpFile { model, columns }
    }

    /// Column names, in variable insertion order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Re-key values reported per column by the model's variable names.
    /// Columns that are not part of the model are dropped.
    pub fn to_model_names(&self, values: HashMap<String, f64>) -> HashMap<String, f64> {
        let by_column: HashMap<&str, &str> = self
            .columns
            .iter()
            .map(String::as_str)
            .zip(self.model.variables().map(|v| v.name()))
            .collect();
        values
            .into_iter()
            .filter_map(|(column, value)| {
                by_column
                    .get(column.as_str())
                    .map(|name| (name.to_string(), value))
            })
            .collect()
    }

    /// Write the problem to a temporary file
    pub fn to_tmp_file(&self) -> Result<NamedTempFile> {
        let mut f = tempfile::Builder::new()
            .prefix("lp_models_")
            .suffix(".lp")
            .tempfile()?;
        write!(f, "{}", self)?;
        f.flush()?;
        Ok(f)
    }

    fn write_expression(&self, expr: &LinearExpr, f: &mut Formatter) -> fmt::Result {
        let mut first = true;
        for (variable, coefficient) in expr.terms() {
            if coefficient == 0.0 {
                continue;
            }
            match (first, coefficient < 0.0) {
                (true, false) => {}
                (true, true) => f.write_str("- ")?,
                (false, false) => f.write_str(" + ")?,
                (false, true) => f.write_str(" - ")?,
            }
            let magnitude = coefficient.abs();
            if magnitude != 1.0 {
                write!(f, "{} ", magnitude)?;
            }
            f.write_str(&self.columns[variable.index()])?;
            first = false;
        }
        // an empty row still needs a term to be parsed
        if first {
            if let Some(column) = self.columns.first() {
                write!(f, "0 {}", column)?;
            }
        }
        Ok(())
    }

    fn write_objective_block(&self, f: &mut Formatter) -> fmt::Result {
        let obj_type = match self.model.objective().sense() {
            Sense::Maximize => "Maximize\n  ",
            Sense::Minimize => "Minimize\n  ",
        };
        write!(f, "{}obj: ", obj_type)?;
        self.write_expression(self.model.objective().expr(), f)
    }

    fn write_constraints_block(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "\n\nSubject To\n")?;
        for (idx, constraint) in self.model.constraints().enumerate() {
            write!(f, "  c{}: ", idx)?;
            self.write_expression(constraint.expr(), f)?;
            writeln!(f, " {} {}", constraint.operator().symbol(), constraint.rhs())?;
        }
        Ok(())
    }

    fn write_bounds_block(&self, f: &mut Formatter) -> fmt::Result {
        let mut integers = vec![];
        let mut binaries = vec![];
        write!(f, "\nBounds\n")?;
        for (variable, name) in self.model.variables().zip(&self.columns) {
            let low = variable.lower_bound();
            let up = variable.upper_bound();
            write!(f, "  ")?;
            if low.is_infinite() && up.is_infinite() {
                write!(f, "{} free", name)?;
            } else {
                // the .lp default lower bound is 0, not -infinity
                if low > f64::NEG_INFINITY {
                    write!(f, "{} <= ", low)?;
                } else {
                    write!(f, "-inf <= ")?;
                }
                write!(f, "{}", name)?;
                if up < f64::INFINITY {
                    write!(f, " <= {}", up)?;
                }
            }
            writeln!(f)?;
            match variable.domain() {
                Domain::Integer => integers.push(name),
                Domain::Binary => binaries.push(name),
                Domain::Continuous => {}
            }
        }
        for (header, names) in [("Generals", integers), ("Binaries", binaries)] {
            if !names.is_empty() {
                writeln!(f, "\n{}", header)?;
                for name in names {
                    writeln!(f, "  {}", name)?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for LpFile<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "\\ {}\n\n", self.model.name())?;
        self.write_objective_block(f)?;
        self.write_constraints_block(f)?;
        self.write_bounds_block(f)?;
        write!(f, "\nEnd\n")
    }
}
