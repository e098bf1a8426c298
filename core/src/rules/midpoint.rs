//! Midpoint rules

use super::{Derivation, Rule};
use crate::ir::{PointId, Predicate, PredicateKind, ProofState};
#[cfg(test)]
use crate::ir::Justification;

/// Collinear and equidistant means midpoint:
/// coll(m,x,y) + cong(m,x,m,y) => midp(m,x,y)
///
/// The congruence premise may be a linear consequence; when it is also
/// materialized its fact ID joins the premise list.
pub struct MidpointRecognition;

impl Rule for MidpointRecognition {
    fn id(&self) -> &'static str {
        "midpoint_recognition"
    }

    fn apply(&self, state: &ProofState) -> Vec<Derivation> {
        let mut out = Vec::new();
        for &coll_id in state.facts.of_kind(PredicateKind::Coll) {
            let pts = state.facts.entry(coll_id).predicate.points();
            for mid in 0..3 {
                let m = pts[mid];
                let x = pts[(mid + 1) % 3];
                let y = pts[(mid + 2) % 3];
                let cong = Predicate::Cong(m, x, m, y);
                if !state.has_fact(&cong) {
                    continue;
                }
                let conclusion = Predicate::Midp(m, x, y).normalize();
                if state.contains(&conclusion) {
                    continue;
                }
                let mut premises = vec![coll_id];
                if let Some(cong_id) = state.facts.find(&cong) {
                    premises.push(cong_id);
                }
                out.push(Derivation::new(conclusion, premises));
            }
        }
        out
    }
}

/// midp(m,a,b) => coll(m,a,b) and cong(m,a,m,b)
pub struct MidpointUnfold;

impl Rule for MidpointUnfold {
    fn id(&self) -> &'static str {
        "midpoint_unfold"
    }

    fn apply(&self, state: &ProofState) -> Vec<Derivation> {
        let mut out = Vec::new();
        for &midp_id in state.facts.of_kind(PredicateKind::Midp) {
            let pts = state.facts.entry(midp_id).predicate.points();
            let (m, a, b) = (pts[0], pts[1], pts[2]);
            for pred in [Predicate::Coll(m, a, b), Predicate::Cong(m, a, m, b)] {
                if !state.contains(&pred) {
                    out.push(Derivation::new(pred, vec![midp_id]));
                }
            }
        }
        out
    }
}

/// Midsegment theorem:
/// midp(m,v,x) + midp(n,v,y) => para(m,n,x,y)
///
/// Skipped when v, x, y are numerically collinear; the segment mn would
/// lie on the line xy and the parallelism is vacuous.
pub struct MidsegmentParallel;

impl Rule for MidsegmentParallel {
    fn id(&self) -> &'static str {
        "midsegment_parallel"
    }

    fn apply(&self, state: &ProofState) -> Vec<Derivation> {
        let mut out = Vec::new();
        let midps = state.facts.of_kind(PredicateKind::Midp);
        for (i, &id1) in midps.iter().enumerate() {
            let p1 = state.facts.entry(id1).predicate.points();
            for &id2 in &midps[i + 1..] {
                let p2 = state.facts.entry(id2).predicate.points();
                let (m, n) = (p1[0], p2[0]);
                if m == n {
                    continue;
                }
                let Some((v, x, y)) = shared_vertex([p1[1], p1[2]], [p2[1], p2[2]]) else {
                    continue;
                };
                if x == y || degenerate_triangle(state, v, x, y) {
                    continue;
                }
                let pred = Predicate::Para(m, n, x, y);
                if !state.contains(&pred) {
                    out.push(Derivation::new(pred, vec![id1, id2]));
                }
            }
        }
        out
    }
}

/// Exactly one shared endpoint between two segments
fn shared_vertex(a: [PointId; 2], b: [PointId; 2]) -> Option<(PointId, PointId, PointId)> {
    let shared: Vec<PointId> = a.iter().copied().filter(|p| b.contains(p)).collect();
    if shared.len() != 1 {
        return None;
    }
    let v = shared[0];
    let x = if a[0] == v { a[1] } else { a[0] };
    let y = if b[0] == v { b[1] } else { b[0] };
    Some((v, x, y))
}

fn degenerate_triangle(state: &ProofState, v: PointId, x: PointId, y: PointId) -> bool {
    match (state.model.pos(v), state.model.pos(x), state.model.pos(y)) {
        (Some(v), Some(x), Some(y)) => state.model.collinear(&v, &x, &y),
        _ => true,
    }
}
