use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;

use lp_models::error::EngineError;
use lp_models::solvers::{
    CbcSolver, EngineSolution, GlpkSolver, GurobiSolver, SolverWithSolutionParsing, Status,
};

macro_rules! solution_file {
    ($name:literal) => {
        concat!(env!("CARGO_MANIFEST_DIR"), "/tests/solution_files/", $name)
    };
}

fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn cbc_optimal() {
    let columns = columns(&["a", "b", "c"]);
    let EngineSolution {
        status,
        results: mut variables,
    } = CbcSolver::new()
        .read_solution(Path::new(solution_file!("cbc_optimal.sol")), Some(&columns))
        .unwrap();
    assert_eq!(status, Status::Optimal);
    assert_eq!(variables.remove("a"), Some(5.));
    assert_eq!(variables.remove("b"), Some(6.));
    // omitted by cbc because it is zero
    assert_eq!(variables.remove("c"), Some(0.));
    assert!(variables.is_empty());
}

#[test]
fn cbc_infeasible() {
    let EngineSolution { status, results } = CbcSolver::new()
        .read_solution(Path::new(solution_file!("cbc_infeasible.sol")), None)
        .unwrap();
    assert_eq!(status, Status::Infeasible);
    assert_eq!(results.get("b"), Some(&-1.));
}

#[test]
// created from:
// minimize
//   obj: a + b
// subject to
//   c1: a + b <= 1
//   c2: a + b >= 2
// binaries
//   a b
// end
fn cbc_infeasible_alternative_format() {
    let columns = columns(&["a", "b"]);
    let EngineSolution {
        status,
        results: mut variables,
    } = CbcSolver::new()
        .read_solution(
            Path::new(solution_file!("cbc_infeasible_alternative_format.sol")),
            Some(&columns),
        )
        .unwrap();
    assert_eq!(status, Status::Infeasible);
    assert_eq!(variables.remove("a"), Some(2.));
    assert_eq!(variables.remove("b"), Some(0.));
}

#[test]
fn cbc_unbounded() {
    let EngineSolution { status, .. } = CbcSolver::new()
        .read_solution(Path::new(solution_file!("cbc_unbounded.sol")), None)
        .unwrap();
    assert_eq!(status, Status::Unbounded);
}

#[test]
fn cbc_stopped_on_time_is_feasible() {
    let EngineSolution { status, results } = CbcSolver::new()
        .read_solution(Path::new(solution_file!("cbc_stopped_on_time.sol")), None)
        .unwrap();
    assert_eq!(status, Status::Feasible);
    assert_eq!(results.get("x_A"), Some(&148.));
    assert_eq!(results.get("x_B"), Some(&1.));
}

#[test]
fn cbc_stopped_without_integer_solution() {
    let text = "Stopped on time (no integer solution - continuous used) - objective value 3.5\n";
    let EngineSolution { status, .. } = CbcSolver::new()
        .read_specific_solution(Cursor::new(text), None)
        .unwrap();
    assert_eq!(status, Status::Error);
}

#[test]
fn cbc_rejects_malformed_lines() {
    let text = "Optimal - objective value 1\n      0 a 1\n";
    let err = CbcSolver::new()
        .read_specific_solution(Cursor::new(text), None)
        .unwrap_err();
    assert!(matches!(err, EngineError::Format(_)));
}

#[test]
fn cbc_rejects_empty_file() {
    let err = CbcSolver::new()
        .read_specific_solution(Cursor::new(""), None)
        .unwrap_err();
    assert!(matches!(err, EngineError::Format(_)));
}

#[test]
fn glpk_optimal() {
    let EngineSolution {
        status,
        results: mut variables,
    } = GlpkSolver::new()
        .read_solution(Path::new(solution_file!("glpk_optimal.sol")), None)
        .unwrap();
    assert_eq!(status, Status::Optimal);
    assert_eq!(variables.remove("a"), Some(0.));
    assert_eq!(variables.remove("b"), Some(5.));
    assert_eq!(variables.remove("c"), Some(0.));
}

#[test]
fn glpk_integer_optimal() {
    let file = File::open(solution_file!("glpk_integer_optimal.sol")).unwrap();
    let EngineSolution { status, results } = GlpkSolver::new()
        .read_specific_solution(BufReader::new(file), None)
        .unwrap();
    assert_eq!(status, Status::Optimal);
    assert_eq!(results.get("item_1"), Some(&0.));
    assert_eq!(results.get("item_2"), Some(&1.));
}

#[test]
fn glpk_mixed_integer_reads_continuous_activity() {
    let EngineSolution { status, results } = GlpkSolver::new()
        .read_solution(Path::new(solution_file!("glpk_mixed_integer.sol")), None)
        .unwrap();
    assert_eq!(status, Status::Optimal);
    assert_eq!(results.len(), 3);
    assert_eq!(results.get("x"), Some(&3.));
    // continuous columns of a MIP report have no '*' marker
    assert_eq!(results.get("y"), Some(&2.5));
    // wrapped name, integer marker on the next line
    assert_eq!(results.get("units_shipped_to_depot"), Some(&4.));
}

#[test]
fn glpk_long_names_wrap() {
    let EngineSolution { status, results } = GlpkSolver::new()
        .read_solution(Path::new(solution_file!("glpk_wrapped_names.sol")), None)
        .unwrap();
    assert_eq!(status, Status::Optimal);
    assert_eq!(results.len(), 2);
    assert_eq!(results.get("total_probability"), Some(&1.));
    assert_eq!(results.get("p_0"), Some(&0.));
}

#[test]
fn glpk_wrapped_name_without_values() {
    let text = "Problem:\nRows:       0\nColumns:    1\nNon-zeros:  0\nStatus:     OPTIMAL\n\n   No. Column name  St   Activity\n------ ------------ -- -------------\n     1 total_probability\n";
    let err = GlpkSolver::new()
        .read_specific_solution(Cursor::new(text), None)
        .unwrap_err();
    assert!(matches!(err, EngineError::Format(_)));
}

#[test]
fn glpk_infeasible() {
    let EngineSolution { status, .. } = GlpkSolver::new()
        .read_solution(Path::new(solution_file!("glpk_infeasible.sol")), None)
        .unwrap();
    assert_eq!(status, Status::Infeasible);
}

#[test]
fn glpk_unbounded() {
    let EngineSolution { status, .. } = GlpkSolver::new()
        .read_solution(Path::new(solution_file!("glpk_unbounded.sol")), None)
        .unwrap();
    assert_eq!(status, Status::Unbounded);
}

#[test]
fn glpk_unknown_status() {
    let text = "Problem:\nRows:       0\nColumns:    0\nNon-zeros:  0\nStatus:     SOMETHING NEW\n";
    let err = GlpkSolver::new()
        .read_specific_solution(Cursor::new(text), None)
        .unwrap_err();
    assert!(err.to_string().contains("SOMETHING NEW"), "{}", err);
}

#[test]
fn glpk_truncated_columns() {
    let text = "Problem:\nRows:       0\nColumns:    2\nNon-zeros:  0\nStatus:     OPTIMAL\n";
    let err = GlpkSolver::new()
        .read_specific_solution(Cursor::new(text), None)
        .unwrap_err();
    assert!(matches!(err, EngineError::Format(_)));
}

#[test]
fn gurobi_solution_skips_comments() {
    let EngineSolution { status, results } = GurobiSolver::new()
        .read_solution(Path::new(solution_file!("gurobi_optimal.sol")), None)
        .unwrap();
    assert_eq!(status, Status::Optimal);
    assert_eq!(results.len(), 2);
    assert_eq!(results.get("x_A"), Some(&147.));
    assert_eq!(results.get("x_B"), Some(&2.));
}

#[test]
fn missing_solution_file() {
    let err = GurobiSolver::new()
        .read_solution(Path::new(solution_file!("does_not_exist.sol")), None)
        .unwrap_err();
    assert!(matches!(err, EngineError::SolutionFile { .. }));
}

#[cfg(feature = "cplex")]
#[test]
fn cplex_optimal() {
    use lp_models::solvers::Cplex;

    let EngineSolution { status, results } = Cplex::default()
        .read_solution(Path::new(solution_file!("cplex_optimal.sol")), None)
        .unwrap();
    assert_eq!(status, Status::Optimal);
    assert_eq!(results.get("item_1"), Some(&0.));
    assert_eq!(results.get("item_2"), Some(&1.));
}
