//! This module provides the interface to the different solver engines.
//!
//! The [native](NativeSolver) engine runs in process through
//! [`good_lp`](https://docs.rs/good_lp) and its pure Rust `microlp` backend,
//! so it needs nothing installed on the machine.
//!
//! The other engines are external programs that need to be installed on the
//! system and reachable through `PATH`. The model is written to a temporary
//! `.lp` file, the program is run on it, and the solution file it writes is
//! parsed back. CPLEX solution files are XML and need the `cplex` feature.

use std::collections::HashMap;
use std::ffi::OsString;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::Command;
use std::time::Duration;

use tempfile::TempPath;
use tracing::debug;

use crate::error::EngineError;
use crate::lp_format::LpFile;
use crate::model::ProblemModel;

pub use self::cbc::*;
#[cfg(feature = "cplex")]
pub use self::cplex::*;
pub use self::glpk::*;
pub use self::gurobi::*;
pub use self::native::*;

pub mod auto;
pub mod cbc;
#[cfg(feature = "cplex")]
pub mod cplex;
pub mod glpk;
pub mod gurobi;
pub mod native;

/// Outcome of a solve
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Status {
    /// A proven optimal assignment was found
    Optimal,
    /// An assignment satisfying every constraint was found, but optimality
    /// was not proven (typically because of a time limit)
    Feasible,
    /// No assignment satisfies every constraint
    Infeasible,
    /// The objective can be improved without limit
    Unbounded,
    /// The engine failed or returned something unusable
    Error,
}

impl Status {
    /// Whether the solution carries an assignment
    pub fn is_success(self) -> bool {
        matches!(self, Status::Optimal | Status::Feasible)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Optimal => "OPTIMAL",
            Status::Feasible => "FEASIBLE",
            Status::Infeasible => "INFEASIBLE",
            Status::Unbounded => "UNBOUNDED",
            Status::Error => "ERROR",
        })
    }
}

/// What an engine reports, before it is checked against the model
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSolution {
    /// engine status
    pub status: Status,
    /// value per variable name
    pub results: HashMap<String, f64>,
}

impl EngineSolution {
    /// Create an engine solution
    pub fn new(status: Status, results: HashMap<String, f64>) -> EngineSolution {
        EngineSolution { status, results }
    }
}

/// An engine able to solve a [ProblemModel]
pub trait SolverTrait {
    /// Short name used in logs
    fn name(&self) -> &str;
    /// Solve the model, returning values keyed by the model's variable names
    fn run(
        &self,
        model: &ProblemModel,
        time_limit: Option<Duration>,
    ) -> Result<EngineSolution, EngineError>;
}

/// An external program that reads an .lp file and writes a solution file
pub trait SolverProgram {
    /// Executable to run
    fn command_name(&self) -> &str;
    /// Command line for the given problem and solution files
    fn arguments(
        &self,
        lp_file: &Path,
        solution_file: &Path,
        time_limit: Option<Duration>,
    ) -> Vec<OsString>;
    /// Some engines only report their status on stdout
    fn parse_stdout_status(&self, _stdout: &[u8]) -> Option<Status> {
        None
    }
    /// Extension of the solution file, for engines that pick a format from it
    fn solution_suffix(&self) -> Option<&str> {
        None
    }
}

/// Parse the solution file of an engine
pub trait SolverWithSolutionParsing {
    /// Open and parse the solution file
    fn read_solution(
        &self,
        solution_file: &Path,
        columns: Option<&[String]>,
    ) -> Result<EngineSolution, EngineError> {
        let f = File::open(solution_file).map_err(|source| EngineError::SolutionFile {
            path: solution_file.to_path_buf(),
            source,
        })?;
        self.read_specific_solution(BufReader::new(f), columns)
    }
    /// Parse a solution. `columns` lists every column of the problem, for
    /// engines that omit zero values. Values are keyed by column name.
    fn read_specific_solution<R: BufRead>(
        &self,
        reader: R,
        columns: Option<&[String]>,
    ) -> Result<EngineSolution, EngineError>;
}

impl<T: SolverProgram + SolverWithSolutionParsing> SolverTrait for T {
    fn name(&self) -> &str {
        self.command_name()
    }

    fn run(
        &self,
        model: &ProblemModel,
        time_limit: Option<Duration>,
    ) -> Result<EngineSolution, EngineError> {
        let command_name = self.command_name();
        let lp = LpFile::new(model);
        let file_model = lp
            .to_tmp_file()
            .map_err(|source| EngineError::ProblemFile {
                solver: command_name.to_string(),
                source,
            })?;

        let solution_file: TempPath = tempfile::Builder::new()
            .prefix("lp_models_")
            .suffix(self.solution_suffix().unwrap_or(".sol"))
            .tempfile()?
            .into_temp_path();

        let arguments = self.arguments(file_model.path(), &solution_file, time_limit);
        debug!(command = command_name, ?arguments, "running external solver");
        let output = Command::new(command_name)
            .args(&arguments)
            .output()
            .map_err(|source| EngineError::Spawn {
                command: command_name.to_string(),
                source,
            })?;
        if !output.status.success() {
            return Err(EngineError::Exit {
                command: command_name.to_string(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        match self.parse_stdout_status(&output.stdout) {
            Some(status) if !status.is_success() => Ok(EngineSolution::new(status, HashMap::new())),
            stdout_status => {
                let mut solution = self.read_solution(&solution_file, Some(lp.columns()))?;
                if let Some(status) = stdout_status {
                    solution.status = status;
                }
                solution.results = lp.to_model_names(solution.results);
                Ok(solution)
            }
        }
    }
}

fn buf_contains(haystack: &[u8], needle: &str) -> bool {
    let needle = needle.as_bytes();
    haystack
        .windows(needle.len())
        .any(|window| window == needle)
}

fn format_seconds(limit: Duration) -> String {
    // engines take whole seconds; never round a positive limit down to 0
    limit.as_secs().max(1).to_string()
}
