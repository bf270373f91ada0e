//! Solver selection and run options.
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::SolveError;

/// Which numerical engine solves the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Backend {
    /// In-process pure Rust engine (microlp through good_lp). Always available.
    #[default]
    Native,
    /// COIN-OR `cbc` executable
    Cbc,
    /// GNU `glpsol` executable
    Glpk,
    /// Gurobi `gurobi_cl` executable
    Gurobi,
    /// IBM `cplex` executable. Requires the `cplex` feature.
    Cplex,
    /// The first available of gurobi, cplex, cbc, glpk and native
    Auto,
}

impl Backend {
    /// Order in which [Backend::Auto] tries the concrete backends
    pub const AUTO_ORDER: [Backend; 5] = [
        Backend::Gurobi,
        Backend::Cplex,
        Backend::Cbc,
        Backend::Glpk,
        Backend::Native,
    ];

    /// Lowercase name, as accepted by [FromStr]
    pub fn as_str(self) -> &'static str {
        match self {
            Backend::Native => "native",
            Backend::Cbc => "cbc",
            Backend::Glpk => "glpk",
            Backend::Gurobi => "gurobi",
            Backend::Cplex => "cplex",
            Backend::Auto => "auto",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = SolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native" | "microlp" => Ok(Backend::Native),
            "cbc" => Ok(Backend::Cbc),
            "glpk" | "glpsol" => Ok(Backend::Glpk),
            "gurobi" => Ok(Backend::Gurobi),
            "cplex" => Ok(Backend::Cplex),
            "auto" => Ok(Backend::Auto),
            _ => Err(SolveError::UnknownBackend(s.to_string())),
        }
    }
}

/// Whether integrality restrictions are enforced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolveMode {
    /// Solve the mixed-integer program as stated
    #[default]
    Exact,
    /// Solve the continuous relaxation
    Relaxation,
}

/// Options passed to [crate::solve::Solver::new].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverConfig {
    /// Engine to invoke
    pub backend: Backend,
    /// Exact MIP or continuous relaxation
    pub mode: SolveMode,
    /// Wall-clock limit forwarded to the engine. `None` means no limit.
    pub time_limit: Option<Duration>,
    /// Thread count for engines that accept one (cbc, gurobi, cplex)
    pub threads: Option<u32>,
    /// Executable to run instead of the backend's default one.
    /// Not used when the backend is resolved by [Backend::Auto].
    pub command: Option<String>,
}

impl SolverConfig {
    /// Native backend, exact mode, no time limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the engine
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Set exact or relaxed solving
    pub fn with_mode(mut self, mode: SolveMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the time limit
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Set the number of threads
    pub fn with_threads(mut self, threads: u32) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Run another executable, e.g. a solver outside `PATH`
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }
}
