//! The GNU Linear Programming Kit command line solver, `glpsol`
use std::collections::HashMap;
use std::ffi::OsString;
use std::io::BufRead;
use std::path::Path;
use std::time::Duration;

use crate::error::EngineError;
use crate::solvers::{format_seconds, EngineSolution, SolverProgram, SolverWithSolutionParsing, Status};

/// The GLPK solver
#[derive(Debug, Clone)]
pub struct GlpkSolver {
    command_name: String,
}

impl Default for GlpkSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl GlpkSolver {
    /// Use the `glpsol` executable from `PATH`
    pub fn new() -> GlpkSolver {
        GlpkSolver {
            command_name: "glpsol".to_string(),
        }
    }

    /// Use another executable
    pub fn command_name(&self, command_name: String) -> GlpkSolver {
        GlpkSolver { command_name }
    }
}

fn format_error(message: &str) -> EngineError {
    EngineError::Format(message.to_string())
}

fn read_size(line: Option<std::io::Result<String>>) -> Result<usize, EngineError> {
    let line = line.ok_or_else(|| format_error("truncated glpk header"))??;
    line.split_whitespace()
        .nth(1)
        .and_then(|value| value.parse::<usize>().ok())
        .ok_or_else(|| format_error("incorrect glpk size line"))
}

impl SolverWithSolutionParsing for GlpkSolver {
    fn read_specific_solution<R: BufRead>(
        &self,
        reader: R,
        _columns: Option<&[String]>,
    ) -> Result<EngineSolution, EngineError> {
        let mut vars_value: HashMap<_, _> = HashMap::new();

        let mut iter = reader.lines();
        read_size(iter.nth(1))?;
        let col = read_size(iter.next())?;
        let status_line = match iter.nth(1) {
            Some(line) => line?,
            None => return Err(format_error("no solution status found")),
        };
        let status_text = status_line.trim_start_matches("Status:").trim();
        let status = match status_text {
            "INTEGER OPTIMAL" | "OPTIMAL" => Status::Optimal,
            "INTEGER NON-OPTIMAL" | "FEASIBLE" => Status::Feasible,
            "INFEASIBLE (FINAL)" | "INTEGER EMPTY" | "EMPTY" => Status::Infeasible,
            // glpsol reports a MIP with an unbounded relaxation as undefined
            "INTEGER UNDEFINED" | "UNBOUNDED" => Status::Unbounded,
            "UNDEFINED" | "INFEASIBLE (INTERMEDIATE)" => Status::Error,
            other => return Err(EngineError::Format(format!("unknown glpk status {:?}", other))),
        };
        let integer_report = status_text.starts_with("INTEGER");

        // row names may wrap too, so look for the column table header
        // instead of counting lines
        loop {
            let line = match iter.next() {
                Some(line) => line?,
                None => return Err(format_error("no column table found")),
            };
            if line.trim_start().starts_with("No. Column name") {
                break;
            }
        }
        let mut result_lines = iter.skip(1);
        for _ in 0..col {
            let mut fields = next_fields(&mut result_lines)?;
            if fields.len() < 2 {
                return Err(format_error("column specification has too few fields"));
            }
            // names longer than 12 characters are alone on their line
            if fields.len() == 2 {
                fields.extend(next_fields(&mut result_lines)?);
            }
            // LP reports have a status column after the name; MIP reports
            // only mark integer columns with '*'
            let value_idx = if !integer_report || fields.get(2).map(String::as_str) == Some("*") {
                3
            } else {
                2
            };
            let value = fields
                .get(value_idx)
                .ok_or_else(|| format_error("column specification has too few fields"))?;
            let value = value.parse::<f64>().map_err(|e| {
                EngineError::Format(format!("invalid value for {}: {}", fields[1], e))
            })?;
            vars_value.insert(fields[1].clone(), value);
        }
        Ok(EngineSolution::new(status, vars_value))
    }
}

fn next_fields<I>(lines: &mut I) -> Result<Vec<String>, EngineError>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    let line = match lines.next() {
        Some(line) => line?,
        None => return Err(format_error("not all columns are present")),
    };
    Ok(line.split_whitespace().map(str::to_string).collect())
}

impl SolverProgram for GlpkSolver {
    fn command_name(&self) -> &str {
        &self.command_name
    }

    fn arguments(
        &self,
        lp_file: &Path,
        solution_file: &Path,
        time_limit: Option<Duration>,
    ) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["--lp".into(), lp_file.into(), "-o".into(), solution_file.into()];
        if let Some(limit) = time_limit {
            args.push("--tmlim".into());
            args.push(format_seconds(limit).into());
        }
        args
    }
}
