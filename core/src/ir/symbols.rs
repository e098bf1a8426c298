//! Point symbol interning
//!
//! This module provides the type-safe point identifier and a symbol table
//! mapping textual labels to identifiers. Every geometric object in the
//! system is described by points; lines and circles are equivalence classes
//! recovered from the fact store, so points are the only interned symbols.

use crate::config::Family;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

/// Newtype wrapper for point identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointId(pub u32);

/// How a point entered the configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Construction {
    /// Declared in the problem statement, coordinates supplied by the user
    Given,

    /// Introduced by a heuristic family during a retry attempt
    Auxiliary {
        family: Family,
        parents: Vec<PointId>,
    },
}

/// Thread-safe symbol table for interning point labels
///
/// The table maintains bidirectional mappings between string labels and
/// numeric IDs, ensuring each unique label maps to exactly one ID, and
/// records how each point was constructed.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    inner: Arc<RwLock<SymbolTableInner>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SymbolTableInner {
    point_map: FxHashMap<String, PointId>,
    point_labels: Vec<String>,
    constructions: Vec<Construction>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// Create a new empty symbol table
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(SymbolTableInner {
                point_map: FxHashMap::default(),
                point_labels: Vec::new(),
                constructions: Vec::new(),
            })),
        }
    }

    /// Intern a given point label, returning its ID (idempotent)
    pub fn intern_given(&self, label: &str) -> PointId {
        self.intern(label, Construction::Given)
    }

    /// Intern an auxiliary point produced by a heuristic family
    pub fn intern_auxiliary(&self, label: &str, family: Family, parents: Vec<PointId>) -> PointId {
        self.intern(label, Construction::Auxiliary { family, parents })
    }

    fn intern(&self, label: &str, construction: Construction) -> PointId {
        let mut inner = self.inner.write().unwrap();
        if let Some(&id) = inner.point_map.get(label) {
            return id;
        }
        let id = PointId(inner.point_labels.len() as u32);
        inner.point_map.insert(label.to_string(), id);
        inner.point_labels.push(label.to_string());
        inner.constructions.push(construction);
        id
    }

    /// Look up a label without interning
    pub fn lookup(&self, label: &str) -> Option<PointId> {
        let inner = self.inner.read().unwrap();
        inner.point_map.get(label).copied()
    }

    /// Get the label for a point ID
    pub fn label(&self, id: PointId) -> Option<String> {
        let inner = self.inner.read().unwrap();
        inner.point_labels.get(id.0 as usize).cloned()
    }

    /// Get the construction record for a point ID
    pub fn construction(&self, id: PointId) -> Option<Construction> {
        let inner = self.inner.read().unwrap();
        inner.constructions.get(id.0 as usize).cloned()
    }

    /// Get the number of interned points
    pub fn len(&self) -> usize {
        self.inner.read().unwrap().point_labels.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All point IDs in interning order
    pub fn all_points(&self) -> Vec<PointId> {
        let n = self.len() as u32;
        (0..n).map(PointId).collect()
    }

    /// Deep copy of the table with independent interior state
    ///
    /// `Clone` shares the inner table through the `Arc`; retry attempts need
    /// a private table so auxiliary points do not leak between attempts.
    pub fn fork(&self) -> Self {
        let inner = self.inner.read().unwrap();
        Self {
            inner: Arc::new(RwLock::new(inner.clone())),
        }
    }
}

// Custom Serialize/Deserialize for SymbolTable to handle Arc<RwLock<>>
impl Serialize for SymbolTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let inner = self.inner.read().unwrap();
        inner.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SymbolTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let inner = SymbolTableInner::deserialize(deserializer)?;
        Ok(SymbolTable {
            inner: Arc::new(RwLock::new(inner)),
        })
    }
}
