//! Error types for model construction and solver invocation.
//!
//! Infeasible, unbounded and failed solves are not errors: they are reported
//! through [`crate::solvers::Status`] on the returned solution.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use crate::config::Backend;

/// Rejection of a model-building call. The model is left unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// A variable with this name already exists in the model
    #[error("variable `{name}` is already defined in model `{model}`")]
    DuplicateName {
        /// name of the offending variable
        name: String,
        /// name of the model
        model: String,
    },
    /// The bounds are empty, NaN, or not `{0, 1}` for a binary variable
    #[error("invalid bounds [{lower}, {upper}] for variable `{name}`: {reason}")]
    InvalidBounds {
        /// name of the offending variable
        name: String,
        /// requested lower bound
        lower: f64,
        /// requested upper bound
        upper: f64,
        /// what is wrong with them
        reason: &'static str,
    },
    /// An expression refers to a variable that is not part of the model
    #[error("variable {variable} does not belong to model `{model}`")]
    UnknownVariable {
        /// the variable name, or its handle when the name is not known
        variable: String,
        /// name of the model
        model: String,
    },
    /// A coefficient or right-hand side is NaN or infinite
    #[error("non-finite {what} ({value}) in model `{model}`")]
    NonFiniteValue {
        /// which number was rejected
        what: &'static str,
        /// the rejected number
        value: f64,
        /// name of the model
        model: String,
    },
}

/// Fatal configuration problem detected before any solve is attempted.
#[derive(Debug, Error)]
pub enum SolveError {
    /// The selected engine cannot be used on this machine
    #[error("solver backend `{backend}` is not available: {reason}")]
    BackendUnavailable {
        /// requested backend
        backend: Backend,
        /// why it was rejected
        reason: String,
    },
    /// The backend name is not recognized
    #[error("unknown solver backend `{0}` (expected one of native, cbc, glpk, gurobi, cplex, auto)")]
    UnknownBackend(String),
}

/// Failure while running one engine. The solver facade turns these into an
/// `ERROR` status rather than propagating them.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The .lp file could not be written
    #[error("unable to create the {solver} problem file: {source}")]
    ProblemFile {
        /// engine command name
        solver: String,
        /// underlying error
        #[source]
        source: io::Error,
    },
    /// The engine executable could not be started
    #[error("error running {command}: {source}")]
    Spawn {
        /// engine command name
        command: String,
        /// underlying error
        #[source]
        source: io::Error,
    },
    /// The engine executable exited with a failure code
    #[error("{command} exited with {status}: {stderr}")]
    Exit {
        /// engine command name
        command: String,
        /// exit status of the process
        status: ExitStatus,
        /// captured standard error, trimmed
        stderr: String,
    },
    /// The solution file written by the engine could not be opened
    #[error("cannot open solution file {}: {source}", path.display())]
    SolutionFile {
        /// location of the solution file
        path: PathBuf,
        /// underlying error
        #[source]
        source: io::Error,
    },
    /// The solution file does not follow the engine's format
    #[error("incorrect solution format: {0}")]
    Format(String),
    /// The in-process engine reported a failure
    #[error("native solver failure: {0}")]
    Native(String),
    /// Other I/O failure
    #[error(transparent)]
    Io(#[from] io::Error),
}
