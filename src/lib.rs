#![deny(missing_docs)]
//! Small linear and mixed-integer programs: build a [ProblemModel], hand it to
//! a [Solver] backed by a native or external LP/MIP engine, and print the
//! [Solution].

pub mod config;
pub mod error;
pub mod lp_format;
pub mod model;
pub mod report;
pub mod scenarios;
pub mod solution;
pub mod solve;
pub mod solvers;
pub mod util;

pub use config::{Backend, SolveMode, SolverConfig};
pub use error::{ModelError, SolveError};
pub use model::{Comparison, Domain, LinearExpr, ProblemModel, Sense, VariableHandle};
pub use solution::Solution;
pub use solve::{solve, Solver};
pub use solvers::Status;
