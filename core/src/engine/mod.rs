//! Deductive closure engine

pub mod closure;

pub use closure::{run_closure, ClosureOutcome, ClosureStatus};
