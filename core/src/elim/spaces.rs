//! Coefficient spaces over line directions and segment lengths
//!
//! Two elimination systems back the algebraic side of the closure:
//!
//! - `AngleSpace` works in directions of lines mod pi. A variable is the
//!   direction of the line through a canonical point pair; collinearity,
//!   parallelism, perpendicularity and angle equalities are linear
//!   equations over these variables.
//! - `RatioSpace` works in log segment lengths. Congruence and ratio
//!   equalities are linear equations; midpoints contribute the constant
//!   log 2 between a segment and its half.

use super::system::{Contradiction, Equation, LinearSystem};
use crate::ir::predicates::{pair, Predicate};
use crate::ir::symbols::PointId;
use rustc_hash::FxHashMap;
use std::f64::consts::{LN_2, PI};

type Pair = (PointId, PointId);

/// Accumulate signed pair terms, cancelling duplicates
fn gather(terms: &[(Pair, f64)]) -> Vec<(Pair, f64)> {
    let mut out: Vec<(Pair, f64)> = Vec::new();
    for &(p, c) in terms {
        if let Some(slot) = out.iter_mut().find(|(q, _)| *q == p) {
            slot.1 += c;
        } else {
            out.push((p, c));
        }
    }
    out.retain(|(_, c)| c.abs() > 1e-12);
    out
}

#[derive(Debug, Clone)]
struct PairSpace {
    sys: LinearSystem,
    vars: FxHashMap<Pair, usize>,
}

impl PairSpace {
    fn new(modulus: Option<f64>) -> Self {
        Self {
            sys: match modulus {
                Some(m) => LinearSystem::with_modulus(m),
                None => LinearSystem::new(),
            },
            vars: FxHashMap::default(),
        }
    }

    fn var(&mut self, p: Pair) -> usize {
        if let Some(&v) = self.vars.get(&p) {
            return v;
        }
        let v = self.sys.new_var();
        self.vars.insert(p, v);
        v
    }

    fn insert(&mut self, terms: &[(Pair, f64)], constant: f64) -> Result<(), Contradiction> {
        let mut eq = Equation::new().with_constant(constant);
        for (p, c) in gather(terms) {
            eq.add_term(self.var(p), c);
        }
        self.sys.insert(&eq).map(|_| ())
    }

    fn implies(&self, terms: &[(Pair, f64)], constant: f64) -> bool {
        let mut eq = Equation::new().with_constant(constant);
        for (p, c) in gather(terms) {
            // a pair never seen by any recorded fact cannot be constrained
            match self.vars.get(&p) {
                Some(&v) => {
                    eq.add_term(v, c);
                }
                None => return false,
            }
        }
        self.sys.implies(&eq)
    }
}

/// Linear system over line directions mod pi
#[derive(Debug, Clone)]
pub struct AngleSpace {
    space: PairSpace,
}

impl AngleSpace {
    pub fn new() -> Self {
        Self {
            space: PairSpace::new(Some(PI)),
        }
    }

    fn equations(pred: &Predicate) -> Vec<(Vec<(Pair, f64)>, f64)> {
        match *pred {
            Predicate::Coll(a, b, c) | Predicate::Midp(a, b, c) => vec![
                (vec![(pair(a, b), 1.0), (pair(a, c), -1.0)], 0.0),
                (vec![(pair(a, b), 1.0), (pair(b, c), -1.0)], 0.0),
            ],
            Predicate::Para(a, b, c, d) => {
                vec![(vec![(pair(a, b), 1.0), (pair(c, d), -1.0)], 0.0)]
            }
            Predicate::Perp(a, b, c, d) => {
                vec![(vec![(pair(a, b), 1.0), (pair(c, d), -1.0)], PI / 2.0)]
            }
            Predicate::EqAngle(a, b, c, d, e, f, g, h) => vec![(
                vec![
                    (pair(c, d), 1.0),
                    (pair(a, b), -1.0),
                    (pair(g, h), -1.0),
                    (pair(e, f), 1.0),
                ],
                0.0,
            )],
            Predicate::Cong(..) | Predicate::EqRatio(..) | Predicate::Cyclic(..) => Vec::new(),
        }
    }

    /// Record the angle content of a fact
    pub fn record(&mut self, pred: &Predicate) -> Result<(), Contradiction> {
        for (terms, constant) in Self::equations(pred) {
            self.space.insert(&terms, constant)?;
        }
        Ok(())
    }

    /// Check whether recorded facts linearly imply the predicate
    ///
    /// Families with no angle content are never implied here.
    pub fn implied(&self, pred: &Predicate) -> bool {
        let eqs = Self::equations(pred);
        if eqs.is_empty() {
            return false;
        }
        eqs.iter().all(|(terms, c)| self.space.implies(terms, *c))
    }
}

impl Default for AngleSpace {
    fn default() -> Self {
        Self::new()
    }
}

/// Linear system over log segment lengths
#[derive(Debug, Clone)]
pub struct RatioSpace {
    space: PairSpace,
}

impl RatioSpace {
    pub fn new() -> Self {
        Self {
            space: PairSpace::new(None),
        }
    }

    fn equations(pred: &Predicate) -> Vec<(Vec<(Pair, f64)>, f64)> {
        match *pred {
            Predicate::Cong(a, b, c, d) => {
                vec![(vec![(pair(a, b), 1.0), (pair(c, d), -1.0)], 0.0)]
            }
            Predicate::EqRatio(a, b, c, d, e, f, g, h) => vec![(
                vec![
                    (pair(a, b), 1.0),
                    (pair(c, d), -1.0),
                    (pair(e, f), -1.0),
                    (pair(g, h), 1.0),
                ],
                0.0,
            )],
            Predicate::Midp(m, a, b) => vec![
                (vec![(pair(m, a), 1.0), (pair(m, b), -1.0)], 0.0),
                (vec![(pair(a, b), 1.0), (pair(m, a), -1.0)], LN_2),
            ],
            Predicate::Coll(..)
            | Predicate::Para(..)
            | Predicate::Perp(..)
            | Predicate::EqAngle(..)
            | Predicate::Cyclic(..) => Vec::new(),
        }
    }

    /// Record the length content of a fact
    pub fn record(&mut self, pred: &Predicate) -> Result<(), Contradiction> {
        for (terms, constant) in Self::equations(pred) {
            self.space.insert(&terms, constant)?;
        }
        Ok(())
    }

    /// Check whether recorded facts linearly imply the predicate
    pub fn implied(&self, pred: &Predicate) -> bool {
        let eqs = Self::equations(pred);
        if eqs.is_empty() {
            return false;
        }
        eqs.iter().all(|(terms, c)| self.space.implies(terms, *c))
    }
}

impl Default for RatioSpace {
    fn default() -> Self {
        Self::new()
    }
}
