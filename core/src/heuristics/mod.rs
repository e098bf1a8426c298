//! Auxiliary point heuristics
//!
//! When base closure exhausts without reaching the goal, candidate points
//! are generated from closed-form construction families, filtered for
//! novelty and nontrivial incidence, shuffled under the run seed and
//! tried one at a time on forked states.

pub mod generate;

pub use generate::{generate_candidates, Candidate, CandidateKind, CircleWitness};
