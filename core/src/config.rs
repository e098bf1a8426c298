//! Solver configuration
//!
//! Central knobs for the closure engine and the heuristic retry controller.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default number of auxiliary candidates tried per problem
pub const DEFAULT_CANDIDATE_BUDGET: usize = 10;

/// Default numeric tolerance for the coordinate model
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Default cap on closure rounds
pub const DEFAULT_MAX_ROUNDS: usize = 64;

/// Heuristic construction family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Family {
    /// Intersection of a known line with a known circle
    H2,
    /// Midpoint of a segment
    H3,
    /// Reflection of a point across another point
    H4,
    /// Foot of the perpendicular from a point to a line
    H5,
}

impl Family {
    /// All families in priority order
    pub fn all() -> Vec<Family> {
        vec![Family::H2, Family::H3, Family::H4, Family::H5]
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Family::H2 => "H2",
            Family::H3 => "H3",
            Family::H4 => "H4",
            Family::H5 => "H5",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Family {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "H2" => Ok(Family::H2),
            "H3" => Ok(Family::H3),
            "H4" => Ok(Family::H4),
            "H5" => Ok(Family::H5),
            other => Err(format!("unknown heuristic family: {}", other)),
        }
    }
}

/// Configuration for a solve run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Maximum number of auxiliary candidates to try
    pub candidate_budget: usize,

    /// Numeric tolerance for coordinate checks
    pub epsilon: f64,

    /// Seed for the candidate shuffle
    pub seed: u64,

    /// Heuristic families enabled for candidate generation
    pub families: Vec<Family>,

    /// Cap on closure rounds per attempt
    pub max_rounds: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            candidate_budget: DEFAULT_CANDIDATE_BUDGET,
            epsilon: DEFAULT_EPSILON,
            seed: 0,
            families: Family::all(),
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}
