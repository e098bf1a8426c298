//! Proof state
//!
//! A `ProofState` bundles everything one deduction attempt works on: the
//! symbol table, the fact arena, the two elimination spaces, the numeric
//! model and the goal. Retry attempts operate on forks; there is no
//! rollback, a failed attempt is simply dropped.

use super::predicates::Predicate;
use super::store::{AddOutcome, FactStore, Justification};
use super::symbols::SymbolTable;
use crate::elim::{AngleSpace, Contradiction, RatioSpace};
use crate::num::NumericModel;

/// Full state of one deduction attempt
#[derive(Debug, Clone)]
pub struct ProofState {
    pub symbols: SymbolTable,
    pub facts: FactStore,
    pub angles: AngleSpace,
    pub ratios: RatioSpace,
    pub model: NumericModel,
    pub goal: Predicate,
}

impl ProofState {
    /// Create a state with no facts
    pub fn new(symbols: SymbolTable, model: NumericModel, goal: Predicate) -> Self {
        Self {
            symbols,
            facts: FactStore::new(),
            angles: AngleSpace::new(),
            ratios: RatioSpace::new(),
            model,
            goal: goal.normalize(),
        }
    }

    /// Add a fact: materialize it and feed its linear content to the spaces
    ///
    /// Duplicates are detected on the materialized form only; re-adding a
    /// fact that is merely implied still materializes it.
    pub fn add_fact(
        &mut self,
        predicate: Predicate,
        justification: Justification,
    ) -> Result<AddOutcome, Contradiction> {
        let predicate = predicate.normalize();
        let outcome = self.facts.insert(predicate, justification);
        if outcome.is_new() {
            self.angles.record(&predicate)?;
            self.ratios.record(&predicate)?;
        }
        Ok(outcome)
    }

    /// Materialized-only membership test
    pub fn contains(&self, predicate: &Predicate) -> bool {
        self.facts.contains(predicate)
    }

    /// Membership test including linear consequences
    ///
    /// A predicate holds when it is materialized, or when the elimination
    /// spaces imply it. Midpoints additionally decompose into their
    /// collinearity and half-length content; concyclicity has no linear
    /// form and is answered by materialized facts alone.
    pub fn has_fact(&self, predicate: &Predicate) -> bool {
        let predicate = predicate.normalize();
        if self.facts.contains(&predicate) {
            return true;
        }
        match predicate {
            Predicate::Coll(..) | Predicate::Para(..) | Predicate::Perp(..)
            | Predicate::EqAngle(..) => self.angles.implied(&predicate),
            Predicate::Cong(..) | Predicate::EqRatio(..) => self.ratios.implied(&predicate),
            Predicate::Midp(..) => {
                self.angles.implied(&predicate) && self.ratios.implied(&predicate)
            }
            Predicate::Cyclic(..) => false,
        }
    }

    /// Check whether the goal holds
    pub fn goal_reached(&self) -> bool {
        self.has_fact(&self.goal)
    }

    /// Independent copy for a retry attempt
    ///
    /// The symbol table is deep-copied; everything else derives `Clone`
    /// with value semantics already.
    pub fn fork(&self) -> Self {
        Self {
            symbols: self.symbols.fork(),
            facts: self.facts.clone(),
            angles: self.angles.clone(),
            ratios: self.ratios.clone(),
            model: self.model.clone(),
            goal: self.goal,
        }
    }
}
