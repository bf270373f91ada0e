use std::collections::HashMap;
use std::fs;

use lp_models::lp_format::LpFile;
use lp_models::model::{Comparison, Domain, LinearExpr, ProblemModel, Sense};

#[test]
fn simple_problem() {
    let mut pb = ProblemModel::new("my_problem");
    let x = pb
        .add_variable("x", Domain::Continuous, f64::NEG_INFINITY, f64::INFINITY)
        .unwrap();
    let y = pb
        .add_variable("y", Domain::Continuous, 0.0, f64::INFINITY)
        .unwrap();
    let z = pb.add_variable("z", Domain::Continuous, 1., 10.).unwrap();
    pb.set_objective(LinearExpr::new().term(x, 2.).term(y, 1.), Sense::Minimize)
        .unwrap();
    pb.add_constraint(
        LinearExpr::new().term(x, 1.).term(y, 1.).term(z, 1.),
        Comparison::GreaterOrEqual,
        5.0,
    )
    .unwrap();
    let expected_str = "\\ my_problem

Minimize
  obj: 2 x + y

Subject To
  c0: x + y + z >= 5

Bounds
  x free
  0 <= y
  1 <= z <= 10

End
";
    assert_eq!(LpFile::new(&pb).to_string(), expected_str);
}

#[test]
fn with_integers() {
    let mut pb = ProblemModel::new("int_problem");
    let x = pb.add_variable("x", Domain::Integer, -10., 10.).unwrap();
    let y = pb
        .add_variable("y", Domain::Integer, f64::NEG_INFINITY, 16.5)
        .unwrap();
    pb.set_objective(LinearExpr::new().term(x, 1.).term(y, -1.), Sense::Maximize)
        .unwrap();
    pb.add_constraint(
        LinearExpr::new().term(x, 1.).term(y, -1.),
        Comparison::LessOrEqual,
        -5.0,
    )
    .unwrap();
    let expected_str = "\\ int_problem

Maximize
  obj: x - y

Subject To
  c0: x - y <= -5

Bounds
  -10 <= x <= 10
  -inf <= y <= 16.5

Generals
  x
  y

End
";
    assert_eq!(LpFile::new(&pb).to_string(), expected_str);
}

#[test]
fn binaries_and_sanitized_names() {
    let mut pb = ProblemModel::new("picks");
    let a = pb.add_variable("item[1]", Domain::Binary, 0., 1.).unwrap();
    let b = pb.add_variable("item[2]", Domain::Binary, 0., 1.).unwrap();
    pb.add_constraint(
        LinearExpr::new().term(a, -1.).term(b, 0.).term(b, 2.5),
        Comparison::GreaterOrEqual,
        -3.,
    )
    .unwrap();
    let lp = LpFile::new(&pb);
    assert_eq!(lp.columns(), ["item1", "item2"]);
    let expected_str = "\\ picks

Minimize
  obj: 0 item1

Subject To
  c0: - item1 + 2.5 item2 >= -3

Bounds
  0 <= item1 <= 1
  0 <= item2 <= 1

Binaries
  item1
  item2

End
";
    assert_eq!(lp.to_string(), expected_str);
}

#[test]
fn equality_and_zero_coefficients() {
    let mut pb = ProblemModel::new("eq");
    let p = pb.add_variable("p", Domain::Continuous, 0., 1.).unwrap();
    let q = pb.add_variable("q", Domain::Continuous, 0., 1.).unwrap();
    pb.add_constraint(
        LinearExpr::new().term(p, 0.).term(q, 3.),
        Comparison::Equal,
        1.5,
    )
    .unwrap();
    let text = LpFile::new(&pb).to_string();
    assert!(text.contains("  c0: 3 q = 1.5\n"), "{}", text);
}

#[test]
fn column_values_map_back_to_model_names() {
    let mut pb = ProblemModel::new("names");
    pb.add_variable("x[0]", Domain::Continuous, 0., 1.).unwrap();
    pb.add_variable("x0", Domain::Continuous, 0., 1.).unwrap();
    let lp = LpFile::new(&pb);
    assert_eq!(lp.columns(), ["x0", "x0_2"]);

    let by_column: HashMap<String, f64> = vec![
        ("x0".to_string(), 0.25),
        ("x0_2".to_string(), 0.75),
        ("slack".to_string(), 3.),
    ]
    .into_iter()
    .collect();
    let by_name = lp.to_model_names(by_column);
    assert_eq!(by_name.len(), 2);
    assert_eq!(by_name["x[0]"], 0.25);
    assert_eq!(by_name["x0"], 0.75);
}

#[test]
fn temporary_file_holds_the_problem() {
    let mut pb = ProblemModel::new("on_disk");
    let x = pb.add_variable("x", Domain::Integer, 0., 3.).unwrap();
    pb.set_objective(LinearExpr::new().term(x, 1.), Sense::Maximize)
        .unwrap();
    let lp = LpFile::new(&pb);
    let file = lp.to_tmp_file().unwrap();
    assert!(file.path().extension().map_or(false, |ext| ext == "lp"));
    assert_eq!(fs::read_to_string(file.path()).unwrap(), lp.to_string());
}

#[test]
fn keyword_names_are_renamed() {
    let mut pb = ProblemModel::new("keywords");
    let free = pb.add_variable("free", Domain::Continuous, 0., 1.).unwrap();
    let st = pb.add_variable("st", Domain::Integer, 0., 4.).unwrap();
    pb.set_objective(LinearExpr::new().term(free, 1.).term(st, 1.), Sense::Maximize)
        .unwrap();
    let lp = LpFile::new(&pb);
    assert_eq!(lp.columns(), ["free_2", "st_2"]);
    let text = lp.to_string();
    assert!(text.contains("  obj: free_2 + st_2\n"), "{}", text);
    assert!(text.contains("\nGenerals\n  st_2\n"), "{}", text);

    let by_column: HashMap<String, f64> =
        vec![("free_2".to_string(), 1.), ("st_2".to_string(), 4.)].into_iter().collect();
    let by_name = lp.to_model_names(by_column);
    assert_eq!(by_name["free"], 1.);
    assert_eq!(by_name["st"], 4.);
}
