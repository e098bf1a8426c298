//! Problem files
//!
//! Problems arrive as JSON: labeled coordinates, given facts as predicate
//! strings, one goal string. Loading interns the points, parses every
//! fact, verifies the givens against the coordinates and produces the
//! initial proof state.

use crate::config::SolverConfig;
use crate::elim::Contradiction;
use crate::ir::{Justification, Predicate, ProofState, SymbolTable};
use crate::num::{NumericModel, Vec2};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Problem loading and validation errors
#[derive(Debug, Error)]
pub enum InputError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed problem file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown predicate in {0:?}")]
    UnknownPredicate(String),

    #[error("{name} takes {expected} points, got {got}")]
    BadArity {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("unknown point label: {0}")]
    UnknownPoint(String),

    #[error("duplicate point label: {0}")]
    DuplicatePoint(String),

    #[error("given fact is false in the supplied coordinates: {0}")]
    NumericallyFalse(String),

    #[error("given facts are contradictory: {0}")]
    Contradictory(#[from] Contradiction),
}

/// A labeled coordinate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointSpec {
    pub label: String,
    pub x: f64,
    pub y: f64,
}

/// On-disk problem description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Every point of the configuration with its coordinates
    pub points: Vec<PointSpec>,

    /// Given facts, one predicate string each
    pub facts: Vec<String>,

    /// The predicate to prove
    pub goal: String,
}

impl ProblemFile {
    /// Read and parse a problem file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Build the initial proof state
    ///
    /// Points are interned in file order. Every given must hold in the
    /// supplied coordinates; a numerically false given is a modeling error
    /// in the problem file, not something to prove around.
    pub fn into_state(self, config: &SolverConfig) -> Result<ProofState, InputError> {
        let symbols = SymbolTable::new();
        let mut model = NumericModel::new(config.epsilon);
        for spec in &self.points {
            if symbols.lookup(&spec.label).is_some() {
                return Err(InputError::DuplicatePoint(spec.label.clone()));
            }
            let id = symbols.intern_given(&spec.label);
            model.assign(id, Vec2::new(spec.x, spec.y));
        }

        let goal = parse_predicate(&self.goal, &symbols)?;
        let mut state = ProofState::new(symbols, model, goal);

        for text in &self.facts {
            let pred = parse_predicate(text, &state.symbols)?;
            if !state.model.check(&pred) {
                return Err(InputError::NumericallyFalse(text.clone()));
            }
            state.add_fact(pred, Justification::Given)?;
        }
        Ok(state)
    }
}

/// Parse a whitespace-separated predicate string like `"coll A B C"`
pub fn parse_predicate(text: &str, symbols: &SymbolTable) -> Result<Predicate, InputError> {
    let mut tokens = text.split_whitespace();
    let name = tokens
        .next()
        .ok_or_else(|| InputError::UnknownPredicate(text.to_string()))?;

    let mut ids = Vec::new();
    for label in tokens {
        ids.push(
            symbols
                .lookup(label)
                .ok_or_else(|| InputError::UnknownPoint(label.to_string()))?,
        );
    }

    let expect = |n: usize| {
        if ids.len() == n {
            Ok(())
        } else {
            Err(InputError::BadArity {
                name: name.to_string(),
                expected: n,
                got: ids.len(),
            })
        }
    };

    match name.to_ascii_lowercase().as_str() {
        "coll" => {
            expect(3)?;
            Ok(Predicate::Coll(ids[0], ids[1], ids[2]))
        }
        "para" => {
            expect(4)?;
            Ok(Predicate::Para(ids[0], ids[1], ids[2], ids[3]))
        }
        "perp" => {
            expect(4)?;
            Ok(Predicate::Perp(ids[0], ids[1], ids[2], ids[3]))
        }
        "cong" => {
            expect(4)?;
            Ok(Predicate::Cong(ids[0], ids[1], ids[2], ids[3]))
        }
        "cyclic" => {
            expect(4)?;
            Ok(Predicate::Cyclic(ids[0], ids[1], ids[2], ids[3]))
        }
        "midp" => {
            expect(3)?;
            Ok(Predicate::Midp(ids[0], ids[1], ids[2]))
        }
        "eqangle" => {
            expect(8)?;
            Ok(Predicate::EqAngle(
                ids[0], ids[1], ids[2], ids[3], ids[4], ids[5], ids[6], ids[7],
            ))
        }
        "eqratio" => {
            expect(8)?;
            Ok(Predicate::EqRatio(
                ids[0], ids[1], ids[2], ids[3], ids[4], ids[5], ids[6], ids[7],
            ))
        }
        _ => Err(InputError::UnknownPredicate(text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols_abc() -> SymbolTable {
        let symbols = SymbolTable::new();
        for label in ["A", "B", "C", "D"] {
            symbols.intern_given(label);
        }
        symbols
    }

    #[test]
    fn test_parse_predicate() {
        let symbols = symbols_abc();
        let a = symbols.lookup("A").unwrap();
        let b = symbols.lookup("B").unwrap();
        let c = symbols.lookup("C").unwrap();

        let pred = parse_predicate("coll A B C", &symbols).unwrap();
        assert_eq!(pred, Predicate::Coll(a, b, c));

        let pred = parse_predicate("midp  A B  C", &symbols).unwrap();
        assert_eq!(pred, Predicate::Midp(a, b, c));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        let symbols = symbols_abc();

        assert!(matches!(
            parse_predicate("coll A B", &symbols),
            Err(InputError::BadArity { expected: 3, got: 2, .. })
        ));
        assert!(matches!(
            parse_predicate("coll A B Z", &symbols),
            Err(InputError::UnknownPoint(_))
        ));
        assert!(matches!(
            parse_predicate("between A B C", &symbols),
            Err(InputError::UnknownPredicate(_))
        ));
    }

    fn midsegment_json() -> &'static str {
        r#"{
            "name": "midsegment",
            "points": [
                {"label": "A", "x": 0.0, "y": 4.0},
                {"label": "B", "x": -2.0, "y": 0.0},
                {"label": "C", "x": 4.0, "y": 0.0},
                {"label": "M", "x": -1.0, "y": 2.0},
                {"label": "N", "x": 2.0, "y": 2.0}
            ],
            "facts": ["midp M A B", "midp N A C"],
            "goal": "para M N B C"
        }"#
    }

    #[test]
    fn test_into_state() {
        let file: ProblemFile = serde_json::from_str(midsegment_json()).unwrap();
        let state = file.into_state(&SolverConfig::default()).unwrap();

        assert_eq!(state.symbols.len(), 5);
        assert_eq!(state.facts.len(), 2);

        let m = state.symbols.lookup("M").unwrap();
        let a = state.symbols.lookup("A").unwrap();
        let b = state.symbols.lookup("B").unwrap();
        assert!(state.contains(&Predicate::Midp(m, a, b)));
    }

    #[test]
    fn test_numerically_false_given_rejected() {
        let mut file: ProblemFile = serde_json::from_str(midsegment_json()).unwrap();
        file.facts.push("cong A B A C".to_string());

        let err = file.into_state(&SolverConfig::default()).unwrap_err();
        assert!(matches!(err, InputError::NumericallyFalse(_)));
    }

    #[test]
    fn test_duplicate_point_rejected() {
        let mut file: ProblemFile = serde_json::from_str(midsegment_json()).unwrap();
        file.points.push(PointSpec {
            label: "A".to_string(),
            x: 9.0,
            y: 9.0,
        });

        let err = file.into_state(&SolverConfig::default()).unwrap_err();
        assert!(matches!(err, InputError::DuplicatePoint(_)));
    }

    #[test]
    fn test_goal_with_unknown_point_rejected() {
        let mut file: ProblemFile = serde_json::from_str(midsegment_json()).unwrap();
        file.goal = "para M N B Z".to_string();

        let err = file.into_state(&SolverConfig::default()).unwrap_err();
        assert!(matches!(err, InputError::UnknownPoint(_)));
    }
}
