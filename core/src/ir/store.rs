//! Append-only fact storage
//!
//! Facts live in an arena indexed by `FactId`. Justifications reference
//! premise facts by ID, so the derivation history forms a DAG over arena
//! indices with no reference cycles. Facts are normalized on insertion and
//! deduplicated through a reverse index.

use super::predicates::{Predicate, PredicateKind};
use super::symbols::PointId;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Arena index of a stored fact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FactId(pub u32);

impl fmt::Display for FactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}", self.0)
    }
}

/// Why a fact is in the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Justification {
    /// Stated in the problem
    Given,

    /// Defining predicate of an auxiliary point
    Auxiliary,

    /// Produced by a deduction rule from premise facts
    Derived {
        rule_id: String,
        premises: Vec<FactId>,
    },
}

/// A stored fact with its justification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactEntry {
    pub predicate: Predicate,
    pub justification: Justification,
}

/// Outcome of inserting a fact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The fact was new; its arena ID is returned
    Inserted(FactId),
    /// An equal fact (after normalization) already exists
    Duplicate(FactId),
}

impl AddOutcome {
    pub fn id(&self) -> FactId {
        match *self {
            AddOutcome::Inserted(id) | AddOutcome::Duplicate(id) => id,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, AddOutcome::Inserted(_))
    }
}

/// Arena of normalized facts with kind-based indexing
#[derive(Debug, Clone, Default)]
pub struct FactStore {
    entries: Vec<FactEntry>,
    index: FxHashMap<Predicate, FactId>,
    kind_index: FxHashMap<PredicateKind, Vec<FactId>>,
}

impl FactStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fact, normalizing first
    pub fn insert(&mut self, predicate: Predicate, justification: Justification) -> AddOutcome {
        let predicate = predicate.normalize();
        if let Some(&id) = self.index.get(&predicate) {
            return AddOutcome::Duplicate(id);
        }
        let id = FactId(self.entries.len() as u32);
        self.entries.push(FactEntry {
            predicate,
            justification,
        });
        self.index.insert(predicate, id);
        self.kind_index.entry(predicate.kind()).or_default().push(id);
        AddOutcome::Inserted(id)
    }

    /// Check for a materialized fact
    pub fn contains(&self, predicate: &Predicate) -> bool {
        self.index.contains_key(&predicate.normalize())
    }

    /// Find the arena ID of a materialized fact
    pub fn find(&self, predicate: &Predicate) -> Option<FactId> {
        self.index.get(&predicate.normalize()).copied()
    }

    /// Get a stored entry
    pub fn entry(&self, id: FactId) -> &FactEntry {
        &self.entries[id.0 as usize]
    }

    /// All fact IDs of one family, in insertion order
    pub fn of_kind(&self, kind: PredicateKind) -> &[FactId] {
        self.kind_index
            .get(&kind)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// All entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (FactId, &FactEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| (FactId(i as u32), e))
    }

    /// Number of stored facts
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// IDs of all facts whose premise closure includes the given fact
    ///
    /// Walks the justification DAG from `root` back to given facts,
    /// returning the visited IDs in topological (dependency-first) order.
    pub fn premise_closure(&self, root: FactId) -> Vec<FactId> {
        let mut visited = vec![false; self.entries.len()];
        let mut order = Vec::new();
        self.walk(root, &mut visited, &mut order);
        order
    }

    fn walk(&self, id: FactId, visited: &mut Vec<bool>, order: &mut Vec<FactId>) {
        if visited[id.0 as usize] {
            return;
        }
        visited[id.0 as usize] = true;
        if let Justification::Derived { premises, .. } = &self.entry(id).justification {
            for &p in premises {
                self.walk(p, visited, order);
            }
        }
        order.push(id);
    }

    /// All points mentioned by any stored fact, sorted and deduplicated
    pub fn mentioned_points(&self) -> Vec<PointId> {
        let mut pts: Vec<PointId> = self
            .entries
            .iter()
            .flat_map(|e| e.predicate.points())
            .collect();
        pts.sort();
        pts.dedup();
        pts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(i: u32) -> PointId {
        PointId(i)
    }

    #[test]
    fn test_insert_and_dedup() {
        let mut store = FactStore::new();
        let out1 = store.insert(Predicate::Para(p(0), p(1), p(2), p(3)), Justification::Given);
        let out2 = store.insert(Predicate::Para(p(3), p(2), p(1), p(0)), Justification::Given);

        assert!(out1.is_new());
        assert!(!out2.is_new());
        assert_eq!(out1.id(), out2.id());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_contains_normalizes() {
        let mut store = FactStore::new();
        store.insert(Predicate::Coll(p(2), p(0), p(1)), Justification::Given);

        assert!(store.contains(&Predicate::Coll(p(1), p(2), p(0))));
        assert!(!store.contains(&Predicate::Coll(p(0), p(1), p(3))));
    }

    #[test]
    fn test_kind_index_order() {
        let mut store = FactStore::new();
        let a = store
            .insert(Predicate::Coll(p(0), p(1), p(2)), Justification::Given)
            .id();
        store.insert(Predicate::Para(p(0), p(1), p(2), p(3)), Justification::Given);
        let b = store
            .insert(Predicate::Coll(p(3), p(4), p(5)), Justification::Given)
            .id();

        assert_eq!(store.of_kind(PredicateKind::Coll), &[a, b]);
        assert_eq!(store.of_kind(PredicateKind::Cyclic), &[] as &[FactId]);
    }

    #[test]
    fn test_premise_closure_order() {
        let mut store = FactStore::new();
        let g1 = store
            .insert(Predicate::Coll(p(0), p(1), p(2)), Justification::Given)
            .id();
        let g2 = store
            .insert(Predicate::Cong(p(0), p(1), p(0), p(2)), Justification::Given)
            .id();
        let mid = store
            .insert(
                Predicate::Midp(p(0), p(1), p(2)),
                Justification::Derived {
                    rule_id: "midpoint_recognition".to_string(),
                    premises: vec![g1, g2],
                },
            )
            .id();

        let chain = store.premise_closure(mid);
        assert_eq!(chain.last(), Some(&mid));
        assert!(chain.contains(&g1));
        assert!(chain.contains(&g2));
        // premises come before their conclusion
        let pos = |id| chain.iter().position(|&x| x == id).unwrap();
        assert!(pos(g1) < pos(mid));
        assert!(pos(g2) < pos(mid));
    }

    #[test]
    fn test_mentioned_points() {
        let mut store = FactStore::new();
        store.insert(Predicate::Coll(p(5), p(1), p(3)), Justification::Given);
        store.insert(Predicate::Cong(p(1), p(2), p(1), p(5)), Justification::Given);

        assert_eq!(store.mentioned_points(), vec![p(1), p(2), p(3), p(5)]);
    }
}
