//! Typed geometric predicates
//!
//! Predicates range over point identifiers only. Each family carries a
//! `normalize` transform that maps all symmetric spellings of the same
//! statement to one canonical representative, so the fact store can
//! deduplicate by equality.

use super::symbols::{PointId, SymbolTable};
use serde::{Deserialize, Serialize};

/// Atomic geometric statement over points
///
/// Pair arguments denote the line through (or segment between) two points:
/// `Para(a, b, c, d)` reads "line ab is parallel to line cd", and
/// `Cong(a, b, c, d)` reads "|ab| = |cd|".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Predicate {
    /// Three points lie on one line
    Coll(PointId, PointId, PointId),

    /// Line ab is parallel to line cd
    Para(PointId, PointId, PointId, PointId),

    /// Line ab is perpendicular to line cd
    Perp(PointId, PointId, PointId, PointId),

    /// Segments ab and cd have equal length
    Cong(PointId, PointId, PointId, PointId),

    /// Four points lie on one circle
    Cyclic(PointId, PointId, PointId, PointId),

    /// First point is the midpoint of the segment between the other two
    Midp(PointId, PointId, PointId),

    /// Directed angle from ab to cd equals directed angle from ef to gh (mod pi)
    #[allow(clippy::too_many_arguments)]
    EqAngle(
        PointId,
        PointId,
        PointId,
        PointId,
        PointId,
        PointId,
        PointId,
        PointId,
    ),

    /// |ab| / |cd| = |ef| / |gh|
    #[allow(clippy::too_many_arguments)]
    EqRatio(
        PointId,
        PointId,
        PointId,
        PointId,
        PointId,
        PointId,
        PointId,
        PointId,
    ),
}

/// Enumeration of predicate families for indexing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredicateKind {
    Coll,
    Para,
    Perp,
    Cong,
    Cyclic,
    Midp,
    EqAngle,
    EqRatio,
}

/// Canonical unordered spelling of a point pair
pub fn pair(a: PointId, b: PointId) -> (PointId, PointId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn sort2(a: PointId, b: PointId) -> (PointId, PointId) {
    pair(a, b)
}

impl Predicate {
    /// Normalize the predicate to canonical form for deduplication
    ///
    /// Symmetric families sort their arguments. The eight-point families
    /// canonicalize the signed multiset of pairs appearing in their linear
    /// form, picking the lexicographically smaller of the statement and its
    /// global negation.
    pub fn normalize(self) -> Self {
        match self {
            Predicate::Coll(a, b, c) => {
                let mut pts = [a, b, c];
                pts.sort();
                Predicate::Coll(pts[0], pts[1], pts[2])
            }
            Predicate::Para(a, b, c, d) => {
                let p = sort2(a, b);
                let q = sort2(c, d);
                let (p, q) = if p <= q { (p, q) } else { (q, p) };
                Predicate::Para(p.0, p.1, q.0, q.1)
            }
            Predicate::Perp(a, b, c, d) => {
                let p = sort2(a, b);
                let q = sort2(c, d);
                let (p, q) = if p <= q { (p, q) } else { (q, p) };
                Predicate::Perp(p.0, p.1, q.0, q.1)
            }
            Predicate::Cong(a, b, c, d) => {
                let p = sort2(a, b);
                let q = sort2(c, d);
                let (p, q) = if p <= q { (p, q) } else { (q, p) };
                Predicate::Cong(p.0, p.1, q.0, q.1)
            }
            Predicate::Cyclic(a, b, c, d) => {
                let mut pts = [a, b, c, d];
                pts.sort();
                Predicate::Cyclic(pts[0], pts[1], pts[2], pts[3])
            }
            Predicate::Midp(m, a, b) => {
                let (a, b) = sort2(a, b);
                Predicate::Midp(m, a, b)
            }
            // dir(cd) - dir(ab) = dir(gh) - dir(ef): positive pairs {cd, ef},
            // negative pairs {ab, gh}; negating both sides swaps the sets.
            Predicate::EqAngle(a, b, c, d, e, f, g, h) => {
                let mut pos = [sort2(c, d), sort2(e, f)];
                let mut neg = [sort2(a, b), sort2(g, h)];
                pos.sort();
                neg.sort();
                if neg < pos {
                    std::mem::swap(&mut pos, &mut neg);
                }
                Predicate::EqAngle(
                    neg[0].0, neg[0].1, pos[0].0, pos[0].1, pos[1].0, pos[1].1, neg[1].0, neg[1].1,
                )
            }
            // log|ab| - log|cd| = log|ef| - log|gh|: positive pairs {ab, gh},
            // negative pairs {cd, ef}; inverting both ratios swaps the sets.
            Predicate::EqRatio(a, b, c, d, e, f, g, h) => {
                let mut pos = [sort2(a, b), sort2(g, h)];
                let mut neg = [sort2(c, d), sort2(e, f)];
                pos.sort();
                neg.sort();
                if neg < pos {
                    std::mem::swap(&mut pos, &mut neg);
                }
                Predicate::EqRatio(
                    pos[0].0, pos[0].1, neg[0].0, neg[0].1, neg[1].0, neg[1].1, pos[1].0, pos[1].1,
                )
            }
        }
    }

    /// Get the family of this predicate for indexing
    pub fn kind(&self) -> PredicateKind {
        match self {
            Predicate::Coll(..) => PredicateKind::Coll,
            Predicate::Para(..) => PredicateKind::Para,
            Predicate::Perp(..) => PredicateKind::Perp,
            Predicate::Cong(..) => PredicateKind::Cong,
            Predicate::Cyclic(..) => PredicateKind::Cyclic,
            Predicate::Midp(..) => PredicateKind::Midp,
            Predicate::EqAngle(..) => PredicateKind::EqAngle,
            Predicate::EqRatio(..) => PredicateKind::EqRatio,
        }
    }

    /// All points mentioned by this predicate, in argument order
    pub fn points(&self) -> Vec<PointId> {
        match *self {
            Predicate::Coll(a, b, c) | Predicate::Midp(a, b, c) => vec![a, b, c],
            Predicate::Para(a, b, c, d)
            | Predicate::Perp(a, b, c, d)
            | Predicate::Cong(a, b, c, d)
            | Predicate::Cyclic(a, b, c, d) => vec![a, b, c, d],
            Predicate::EqAngle(a, b, c, d, e, f, g, h)
            | Predicate::EqRatio(a, b, c, d, e, f, g, h) => vec![a, b, c, d, e, f, g, h],
        }
    }

    /// Render with point labels for reports and diagnostics
    pub fn render(&self, symbols: &SymbolTable) -> String {
        let lbl = |p: PointId| symbols.label(p).unwrap_or_else(|| format!("?{}", p.0));
        let name = match self.kind() {
            PredicateKind::Coll => "coll",
            PredicateKind::Para => "para",
            PredicateKind::Perp => "perp",
            PredicateKind::Cong => "cong",
            PredicateKind::Cyclic => "cyclic",
            PredicateKind::Midp => "midp",
            PredicateKind::EqAngle => "eqangle",
            PredicateKind::EqRatio => "eqratio",
        };
        let args: Vec<String> = self.points().into_iter().map(lbl).collect();
        format!("{}({})", name, args.join(","))
    }
}
