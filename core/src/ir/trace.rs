//! Derivation traces
//!
//! The closure engine records one step per fact it materializes. A trace
//! can be replayed against the store's justification DAG to extract the
//! chain of steps actually supporting the goal.

use super::predicates::Predicate;
use super::store::{FactId, FactStore, Justification};
use super::symbols::SymbolTable;
use serde::{Deserialize, Serialize};

/// One materialized derivation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionStep {
    /// Arena ID of the derived fact
    pub fact: FactId,

    /// Rule that produced it
    pub rule_id: String,

    /// Premise fact IDs
    pub premises: Vec<FactId>,

    /// The derived predicate
    pub conclusion: Predicate,
}

/// Ordered record of a closure run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trace {
    pub steps: Vec<DeductionStep>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: DeductionStep) {
        self.steps.push(step);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Render the derivation chain supporting one fact
    ///
    /// Walks the justification DAG under `root` and renders each fact on
    /// its own line, premises before conclusions.
    pub fn render_chain(store: &FactStore, symbols: &SymbolTable, root: FactId) -> Vec<String> {
        store
            .premise_closure(root)
            .into_iter()
            .map(|id| {
                let entry = store.entry(id);
                let rendered = entry.predicate.render(symbols);
                match &entry.justification {
                    Justification::Given => format!("{} {} [given]", id, rendered),
                    Justification::Auxiliary => format!("{} {} [auxiliary]", id, rendered),
                    Justification::Derived { rule_id, premises } => {
                        let deps: Vec<String> = premises.iter().map(|p| p.to_string()).collect();
                        format!("{} {} [{} <- {}]", id, rendered, rule_id, deps.join(","))
                    }
                }
            })
            .collect()
    }
}
