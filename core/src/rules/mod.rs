//! Deduction rules
//!
//! Each rule scans the current state for a premise pattern and emits the
//! conclusions the pattern licenses. Rules return only conclusions that are
//! not yet materialized; the engine certifies each conclusion against the
//! numeric model before inserting it.

pub mod circle;
pub mod incidence;
pub mod midpoint;
pub mod triangle;

use crate::ir::{FactId, Predicate, ProofState};

/// A rule conclusion with the facts that license it
#[derive(Debug, Clone)]
pub struct Derivation {
    pub conclusion: Predicate,
    pub premises: Vec<FactId>,
}

impl Derivation {
    pub fn new(conclusion: Predicate, premises: Vec<FactId>) -> Self {
        Self {
            conclusion,
            premises,
        }
    }
}

/// Rule trait - all deduction rules implement this
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Apply rule to state, producing derivations
    ///
    /// Returns only derivations whose conclusion is not already
    /// materialized in the state.
    fn apply(&self, state: &ProofState) -> Vec<Derivation>;
}

/// The stable rule catalog, in application order
pub fn all_rules() -> Vec<Box<dyn Rule>> {
    let mut rules: Vec<Box<dyn Rule>> = Vec::new();

    // incidence closure (2)
    rules.push(Box::new(incidence::LineClosure));
    rules.push(Box::new(incidence::CircleClosure));

    // midpoint rules (3)
    rules.push(Box::new(midpoint::MidpointRecognition));
    rules.push(Box::new(midpoint::MidpointUnfold));
    rules.push(Box::new(midpoint::MidsegmentParallel));

    // circle rules (2)
    rules.push(Box::new(circle::EquidistantConcyclic));
    rules.push(Box::new(circle::InscribedAngle));

    // triangle rules (3)
    rules.push(Box::new(triangle::RightTriangleMedian));
    rules.push(Box::new(triangle::IsoscelesBaseAngles));
    rules.push(Box::new(triangle::IsoscelesFromBaseAngles));

    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rule_ids_unique() {
        let rules = all_rules();
        let ids: HashSet<&'static str> = rules.iter().map(|r| r.id()).collect();
        assert_eq!(ids.len(), rules.len());
    }

    #[test]
    fn test_catalog_order_stable() {
        let first: Vec<&'static str> = all_rules().iter().map(|r| r.id()).collect();
        let second: Vec<&'static str> = all_rules().iter().map(|r| r.id()).collect();
        assert_eq!(first, second);
    }
}
