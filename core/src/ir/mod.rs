//! Intermediate representation
//!
//! Symbols, typed predicates, the append-only fact store and derivation
//! traces. Everything downstream (elimination, rules, heuristics) works in
//! terms of these types.

pub mod predicates;
pub mod state;
pub mod store;
pub mod symbols;
pub mod trace;

pub use predicates::{pair, Predicate, PredicateKind};
pub use state::ProofState;
pub use store::{AddOutcome, FactEntry, FactId, FactStore, Justification};
pub use symbols::{Construction, PointId, SymbolTable};
pub use trace::{DeductionStep, Trace};
