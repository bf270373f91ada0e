//! The proprietary gurobi solver
use std::collections::HashMap;
use std::ffi::OsString;
use std::io::BufRead;
use std::path::Path;
use std::time::Duration;

use crate::error::EngineError;
use crate::solvers::{buf_contains, format_seconds, EngineSolution, SolverProgram, SolverWithSolutionParsing, Status};

/// The proprietary gurobi solver
#[derive(Debug, Clone)]
pub struct GurobiSolver {
    command_name: String,
    threads: Option<u32>,
}

impl Default for GurobiSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl GurobiSolver {
    /// Use the `gurobi_cl` executable from `PATH`
    pub fn new() -> GurobiSolver {
        GurobiSolver {
            command_name: "gurobi_cl".to_string(),
            threads: None,
        }
    }

    /// set the name of the commandline gurobi executable to use
    pub fn command_name(&self, command_name: String) -> GurobiSolver {
        GurobiSolver {
            command_name,
            ..self.clone()
        }
    }

    /// Number of threads gurobi may use
    pub fn with_nb_threads(&self, threads: u32) -> GurobiSolver {
        GurobiSolver {
            threads: Some(threads),
            ..self.clone()
        }
    }
}

impl SolverWithSolutionParsing for GurobiSolver {
    fn read_specific_solution<R: BufRead>(
        &self,
        reader: R,
        _columns: Option<&[String]>,
    ) -> Result<EngineSolution, EngineError> {
        let mut vars_value: HashMap<_, _> = HashMap::new();
        for line in reader.lines() {
            let l = line?;
            // Gurobi version 7 add comments on the header file
            if l.starts_with('#') || l.trim().is_empty() {
                continue;
            }
            let result_line: Vec<_> = l.split_whitespace().collect();
            if result_line.len() != 2 {
                return Err(EngineError::Format(format!("unexpected gurobi line {:?}", l)));
            }
            let value = result_line[1].parse::<f64>().map_err(|e| {
                EngineError::Format(format!("invalid value for {}: {}", result_line[0], e))
            })?;
            vars_value.insert(result_line[0].to_string(), value);
        }
        // the solution file has no status; it comes from stdout
        Ok(EngineSolution::new(Status::Optimal, vars_value))
    }
}

impl SolverProgram for GurobiSolver {
    fn command_name(&self) -> &str {
        &self.command_name
    }

    fn arguments(
        &self,
        lp_file: &Path,
        solution_file: &Path,
        time_limit: Option<Duration>,
    ) -> Vec<OsString> {
        let mut result_file: OsString = "ResultFile=".into();
        result_file.push(solution_file.as_os_str());
        let mut args = vec![result_file];
        if let Some(limit) = time_limit {
            args.push(format!("TimeLimit={}", format_seconds(limit)).into());
        }
        if let Some(threads) = self.threads {
            args.push(format!("Threads={}", threads).into());
        }
        args.push(lp_file.into());
        args
    }

    fn parse_stdout_status(&self, stdout: &[u8]) -> Option<Status> {
        if buf_contains(stdout, "Optimal solution found") {
            Some(Status::Optimal)
        } else if buf_contains(stdout, "Time limit reached") {
            if buf_contains(stdout, "Best objective -") {
                Some(Status::Error)
            } else {
                Some(Status::Feasible)
            }
        } else if buf_contains(stdout, "Unbounded model") {
            Some(Status::Unbounded)
        } else if buf_contains(stdout, "nfeasible") {
            Some(Status::Infeasible)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_from_stdout() {
        let solver = GurobiSolver::new();
        assert_eq!(
            solver.parse_stdout_status(b"Optimal solution found (tolerance 1.00e-04)"),
            Some(Status::Optimal)
        );
        assert_eq!(
            solver.parse_stdout_status(b"Model is infeasible\nInfeasible model"),
            Some(Status::Infeasible)
        );
        assert_eq!(solver.parse_stdout_status(b"Unbounded model"), Some(Status::Unbounded));
        assert_eq!(
            solver.parse_stdout_status(b"Time limit reached\nBest objective 7.49e+02"),
            Some(Status::Feasible)
        );
        assert_eq!(
            solver.parse_stdout_status(b"Time limit reached\nBest objective -, best bound 7.5e+02"),
            Some(Status::Error)
        );
        assert_eq!(solver.parse_stdout_status(b"Set parameter Username"), None);
    }

    #[test]
    fn time_limit_argument() {
        let args = GurobiSolver::new().arguments(
            Path::new("m.lp"),
            Path::new("m.sol"),
            Some(Duration::from_secs(12)),
        );
        assert_eq!(args, vec![OsString::from("ResultFile=m.sol"), "TimeLimit=12".into(), "m.lp".into()]);
    }

    #[test]
    fn threads_and_command() {
        let solver = GurobiSolver::new().with_nb_threads(4).command_name("gurobi_cl11".to_string());
        assert_eq!(SolverProgram::command_name(&solver), "gurobi_cl11");
        let args = solver.arguments(Path::new("m.lp"), Path::new("m.sol"), None);
        assert_eq!(args, vec![OsString::from("ResultFile=m.sol"), "Threads=4".into(), "m.lp".into()]);
    }
}
