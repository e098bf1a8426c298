//! End-to-end solver tests
//!
//! Problem file loading, base closure, the auxiliary retry loop and proof
//! rendering, exercised together.

use heurigeo_core::{Family, ProblemFile, SolveReport, Solver, SolverConfig};

fn load_problem(name: &str) -> ProblemFile {
    let path = format!("tests/fixtures/problems/{}.json", name);
    ProblemFile::load(&path).expect("failed to load problem fixture")
}

fn solve_with(file: ProblemFile, config: SolverConfig) -> SolveReport {
    let state = file.into_state(&config).expect("failed to build state");
    Solver::new(config).solve(state)
}

#[test]
fn test_midsegment_falls_to_base_closure() {
    let report = solve_with(load_problem("midsegment"), SolverConfig::default());

    assert!(report.proved);
    assert!(report.base_closure_only);
    assert!(report.used_auxiliary.is_none());
    assert_eq!(report.candidates_tried, 0);

    let proof = report.proof.expect("materialized goal should carry a chain");
    assert!(proof.iter().any(|l| l.contains("midsegment_parallel")));
    assert!(proof.iter().any(|l| l.contains("[given]")));
}

#[test]
fn test_thales_needs_midpoint_auxiliary() {
    let report = solve_with(load_problem("thales_diameter"), SolverConfig::default());

    assert!(report.proved);
    assert!(!report.base_closure_only);

    let aux = report.used_auxiliary.expect("proof should name its auxiliary point");
    assert_eq!(aux.family, Family::H3);
    assert_eq!(aux.point, "H_mid_A_B");
    assert_eq!(aux.parents, vec!["A".to_string(), "B".to_string()]);

    // only the two surviving midpoint candidates can be tried
    assert!(report.candidates_tried >= 1 && report.candidates_tried <= 2);

    let proof = report.proof.expect("goal fact should be materialized");
    assert!(proof.iter().any(|l| l.contains("[auxiliary]")));
    assert!(proof.iter().any(|l| l.contains("right_triangle_median")));
    assert!(proof.iter().any(|l| l.contains("equidistant_concyclic")));
    assert!(proof.last().unwrap().contains("cyclic(A,B,C,D)"));
}

#[test]
fn test_same_seed_reproduces_report() {
    let config = SolverConfig {
        seed: 42,
        ..SolverConfig::default()
    };

    let first = solve_with(load_problem("thales_diameter"), config.clone());
    let second = solve_with(load_problem("thales_diameter"), config);

    let a = serde_json::to_string(&first).unwrap();
    let b = serde_json::to_string(&second).unwrap();
    assert_eq!(a, b, "Same seed must reproduce the whole report");
}

#[test]
fn test_zero_budget_blocks_auxiliary_proof() {
    let config = SolverConfig {
        candidate_budget: 0,
        ..SolverConfig::default()
    };
    let report = solve_with(load_problem("thales_diameter"), config);

    assert!(!report.proved);
    assert_eq!(report.candidates_tried, 0);
    assert!(report.proof.is_none());
}

#[test]
fn test_disabled_family_blocks_auxiliary_proof() {
    // the only surviving candidates are midpoints
    let config = SolverConfig {
        families: vec![Family::H2, Family::H4, Family::H5],
        ..SolverConfig::default()
    };
    let report = solve_with(load_problem("thales_diameter"), config);

    assert!(!report.proved);
}

#[test]
fn test_linear_goal_proved_without_chain() {
    let json = r#"{
        "points": [
            {"label": "A", "x": 0.0, "y": 0.0},
            {"label": "B", "x": 1.0, "y": 0.0},
            {"label": "C", "x": 0.0, "y": 1.0},
            {"label": "D", "x": 1.0, "y": 1.0},
            {"label": "E", "x": 0.0, "y": 2.0},
            {"label": "F", "x": 1.0, "y": 2.0}
        ],
        "facts": ["para A B C D", "para C D E F"],
        "goal": "para A B E F"
    }"#;
    let file: ProblemFile = serde_json::from_str(json).unwrap();
    let report = solve_with(file, SolverConfig::default());

    assert!(report.proved);
    assert!(report.base_closure_only);
    assert_eq!(report.facts_added, 0);
    assert!(report.proof.is_none(), "implied goals carry no materialized chain");
}

#[test]
fn test_report_round_trips_through_json() {
    let report = solve_with(load_problem("thales_diameter"), SolverConfig::default());

    let json = serde_json::to_string_pretty(&report).unwrap();
    let back: SolveReport = serde_json::from_str(&json).unwrap();

    assert_eq!(back.proved, report.proved);
    assert_eq!(back.candidates_tried, report.candidates_tried);
    assert_eq!(back.proof, report.proof);
}
