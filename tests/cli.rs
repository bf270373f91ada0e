use std::process::{Command, Output};

fn lp_models(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lp-models"))
        .args(args)
        .env_remove("LP_MODELS_BACKEND")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn list_scenarios() {
    let output = lp_models(&["--list"]);
    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    for name in ["knapsack", "coin-plating", "moment-bounds", "resource-allocation", "contradiction"] {
        assert!(text.contains(name), "{}", text);
    }
}

#[test]
fn knapsack_report() {
    let output = lp_models(&["knapsack"]);
    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.starts_with("== knapsack (native)\n"), "{}", text);
    assert!(text.contains("Status: OPTIMAL\n"), "{}", text);
    assert!(text.contains("  item_1 = 0\n  item_2 = 1\n"), "{}", text);
    assert!(text.ends_with("Objective value: 20\n"), "{}", text);
}

#[test]
fn scenarios_are_separated_by_a_blank_line() {
    let output = lp_models(&["knapsack", "contradiction"]);
    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.contains("Objective value: 20\n\n== contradiction (native)\n"), "{}", text);
    assert!(text.ends_with("Status: INFEASIBLE\nNo assignment satisfies every constraint.\n"));
}

#[test]
fn unknown_scenario_fails() {
    let output = lp_models(&["no-such-scenario"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn unknown_backend_fails_with_configuration_error() {
    let output = lp_models(&["--backend", "simplex", "knapsack"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown solver backend `simplex`"), "{}", stderr);
}

#[test]
fn backend_from_environment() {
    let output = Command::new(env!("CARGO_BIN_EXE_lp-models"))
        .arg("knapsack")
        .env("LP_MODELS_BACKEND", "simplex")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn missing_solver_command_fails() {
    let output = lp_models(&["--backend", "cbc", "--command", "lp-models-no-such-solver", "knapsack"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("lp-models-no-such-solver"), "{}", stderr);
}

#[test]
fn relaxed_knapsack() {
    let output = lp_models(&["--relax", "--threads", "2", "knapsack"]);
    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.contains("  item_1 = 0.5\n"), "{}", text);
    assert!(text.ends_with("Objective value: 25\n"), "{}", text);
}
