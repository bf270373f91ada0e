//! The COIN-OR cbc solver
use std::collections::HashMap;
use std::ffi::OsString;
use std::io::BufRead;
use std::path::Path;
use std::time::Duration;

use crate::error::EngineError;
use crate::solvers::{format_seconds, EngineSolution, SolverProgram, SolverWithSolutionParsing, Status};

/// The COIN-OR cbc command line solver
#[derive(Debug, Clone)]
pub struct CbcSolver {
    command_name: String,
    threads: Option<u32>,
}

impl Default for CbcSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CbcSolver {
    /// Use the `cbc` executable from `PATH`
    pub fn new() -> CbcSolver {
        CbcSolver {
            command_name: "cbc".to_string(),
            threads: None,
        }
    }

    /// Use another executable
    pub fn command_name(&self, command_name: String) -> CbcSolver {
        CbcSolver {
            command_name,
            ..self.clone()
        }
    }

    /// Number of threads cbc may use
    pub fn with_nb_threads(&self, threads: u32) -> CbcSolver {
        CbcSolver {
            threads: Some(threads),
            ..self.clone()
        }
    }
}

impl SolverWithSolutionParsing for CbcSolver {
    fn read_specific_solution<R: BufRead>(
        &self,
        mut reader: R,
        columns: Option<&[String]>,
    ) -> Result<EngineSolution, EngineError> {
        let mut vars_value: HashMap<String, f64> = HashMap::new();

        // CBC keeps only non-zero values from a number of variables
        if let Some(columns) = columns {
            for column in columns {
                vars_value.insert(column.clone(), 0.0);
            }
        }

        let mut buffer = String::new();
        reader.read_line(&mut buffer)?;

        let status = match buffer.split_whitespace().next() {
            Some("Optimal") => Status::Optimal,
            // Infeasible status is either "Infeasible" or "Integer infeasible"
            Some("Infeasible") | Some("Integer") => Status::Infeasible,
            Some("Unbounded") => Status::Unbounded,
            // "Stopped" can be "on time", "on iterations", "on difficulties" or "on ctrl-c"
            Some("Stopped") if buffer.contains("no integer solution") => Status::Error,
            Some("Stopped") => Status::Feasible,
            Some(_) => Status::Error,
            None => return Err(EngineError::Format("missing cbc status line".to_string())),
        };
        for line in reader.lines() {
            let l = line?;
            let mut result_line: Vec<_> = l.split_whitespace().collect();
            if result_line.is_empty() {
                continue;
            }
            // infeasible rows are flagged with a leading "**"
            if result_line[0] == "**" {
                result_line.remove(0);
            }
            if result_line.len() != 4 {
                return Err(EngineError::Format(format!("unexpected cbc line {:?}", l)));
            }
            let value = result_line[2].parse::<f64>().map_err(|e| {
                EngineError::Format(format!("invalid value for {}: {}", result_line[1], e))
            })?;
            vars_value.insert(result_line[1].to_string(), value);
        }
        Ok(EngineSolution::new(status, vars_value))
    }
}

impl SolverProgram for CbcSolver {
    fn command_name(&self) -> &str {
        &self.command_name
    }

    fn arguments(
        &self,
        lp_file: &Path,
        solution_file: &Path,
        time_limit: Option<Duration>,
    ) -> Vec<OsString> {
        let mut args = vec![lp_file.as_os_str().to_owned()];
        for (name, value) in [
            ("seconds", time_limit.map(format_seconds)),
            ("threads", self.threads.map(|t| t.to_string())),
        ] {
            if let Some(val) = value {
                args.push(name.into());
                args.push(val.into());
            }
        }
        args.extend_from_slice(&["solve".into(), "solution".into(), solution_file.into()]);
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_include_limits() {
        let args = CbcSolver::new().with_nb_threads(2).arguments(
            Path::new("model.lp"),
            Path::new("model.sol"),
            Some(Duration::from_secs(5)),
        );
        let args: Vec<_> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(
            args,
            ["model.lp", "seconds", "5", "threads", "2", "solve", "solution", "model.sol"]
        );
    }

    #[test]
    fn arguments_without_limits() {
        let args = CbcSolver::new().arguments(Path::new("a.lp"), Path::new("a.sol"), None);
        assert_eq!(args.len(), 4);
    }
}
