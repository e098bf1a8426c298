//! Algebraic closure via Gaussian elimination
//!
//! The deductive power behind `has_fact`: angle and ratio statements embed
//! as linear equations, and a statement holds when the accumulated
//! equations imply it. A reduction to `0 = c` with nonzero `c` surfaces as
//! a `Contradiction`.

pub mod spaces;
pub mod system;

pub use spaces::{AngleSpace, RatioSpace};
pub use system::{Contradiction, Equation, InsertOutcome, LinearSystem};
