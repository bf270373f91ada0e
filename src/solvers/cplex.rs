//! The IBM CPLEX optimizer.
//! You need to activate the "cplex" feature of this crate to use this solver.

use std::collections::HashMap;
use std::ffi::OsString;
use std::io::BufRead;
use std::path::Path;
use std::time::Duration;

use xml::reader::XmlEvent;
use xml::EventReader;

use crate::error::EngineError;
use crate::solvers::{buf_contains, format_seconds, EngineSolution, SolverProgram, SolverWithSolutionParsing, Status};

/// IBM cplex optimizer
#[derive(Debug, Clone)]
pub struct Cplex {
    command: String,
    threads: Option<u32>,
}

impl Default for Cplex {
    fn default() -> Self {
        Self {
            command: "cplex".into(),
            threads: None,
        }
    }
}

impl Cplex {
    /// Create a cplex solver from the given binary
    pub fn with_command(command: String) -> Self {
        Self {
            command,
            threads: None,
        }
    }

    /// Number of threads cplex may use
    pub fn with_nb_threads(self, threads: u32) -> Self {
        Self {
            threads: Some(threads),
            ..self
        }
    }
}

macro_rules! format_osstr {
    ($($parts:expr)*) => {{
        let mut s = OsString::new();
        $(s.push($parts);)*
        s
    }}
}

fn status_from_header(status: &str) -> Status {
    let status = status.to_ascii_lowercase();
    if status.contains("infeasible") {
        Status::Infeasible
    } else if status.contains("unbounded") {
        Status::Unbounded
    } else if status.contains("optimal") {
        Status::Optimal
    } else if status.contains("limit") || status.contains("feasible") {
        Status::Feasible
    } else {
        Status::Error
    }
}

impl SolverProgram for Cplex {
    fn command_name(&self) -> &str {
        &self.command
    }

    fn arguments(
        &self,
        lp_file: &Path,
        solution_file: &Path,
        time_limit: Option<Duration>,
    ) -> Vec<OsString> {
        let mut args = vec!["-c".into(), format_osstr!("READ \"" lp_file "\"")];
        if let Some(limit) = time_limit {
            args.push(format!("set timelimit {}", format_seconds(limit)).into());
        }
        if let Some(threads) = self.threads {
            args.push(format!("set threads {}", threads).into());
        }
        args.push("optimize".into());
        args.push(format_osstr!("WRITE \"" solution_file "\""));
        args
    }

    fn parse_stdout_status(&self, stdout: &[u8]) -> Option<Status> {
        if buf_contains(stdout, "No solution exists") {
            Some(Status::Infeasible)
        } else {
            None
        }
    }

    fn solution_suffix(&self) -> Option<&str> {
        Some(".sol")
    }
}

impl SolverWithSolutionParsing for Cplex {
    fn read_specific_solution<R: BufRead>(
        &self,
        reader: R,
        columns: Option<&[String]>,
    ) -> Result<EngineSolution, EngineError> {
        let len = columns.map_or(0, |c| c.len());
        let parser = EventReader::new(reader);
        let mut solution = EngineSolution::new(Status::Optimal, HashMap::with_capacity(len));
        for e in parser {
            match e {
                Ok(XmlEvent::StartElement {
                    name, attributes, ..
                }) => match name.local_name.as_str() {
                    "header" => {
                        if let Some(attr) = attributes
                            .iter()
                            .find(|a| a.name.local_name == "solutionStatusString")
                        {
                            solution.status = status_from_header(&attr.value);
                        }
                    }
                    "variable" => {
                        let mut name = None;
                        let mut value = None;
                        for attr in attributes {
                            match attr.name.local_name.as_str() {
                                "name" => name = Some(attr.value),
                                "value" => {
                                    let parsed = attr.value.parse::<f64>().map_err(|e| {
                                        EngineError::Format(format!(
                                            "invalid variable value for {:?}: {}",
                                            name, e
                                        ))
                                    })?;
                                    value = Some(parsed)
                                }
                                _ => {}
                            };
                        }
                        if let (Some(name), Some(value)) = (name, value) {
                            solution.results.insert(name, value);
                        }
                    }
                    _ => {}
                },
                Err(e) => return Err(EngineError::Format(format!("xml error: {}", e))),
                _ => {}
            }
        }
        Ok(solution)
    }
}
