//! Triangle rules

use super::{Derivation, Rule};
use crate::ir::{PointId, Predicate, PredicateKind, ProofState};

/// Median to the hypotenuse:
/// perp(v,x,v,y) + midp(m,x,y) => cong(m,v,m,x)
///
/// The second half, cong(m,v,m,y), follows from the midpoint congruence
/// through the ratio space and is not emitted.
pub struct RightTriangleMedian;

impl Rule for RightTriangleMedian {
    fn id(&self) -> &'static str {
        "right_triangle_median"
    }

    fn apply(&self, state: &ProofState) -> Vec<Derivation> {
        let mut out = Vec::new();
        for &perp_id in state.facts.of_kind(PredicateKind::Perp) {
            let pts = state.facts.entry(perp_id).predicate.points();
            let Some((v, x, y)) = common_endpoint([pts[0], pts[1]], [pts[2], pts[3]]) else {
                continue;
            };
            for &midp_id in state.facts.of_kind(PredicateKind::Midp) {
                let mp = state.facts.entry(midp_id).predicate.points();
                let m = mp[0];
                if !is_pair([mp[1], mp[2]], x, y) || m == v {
                    continue;
                }
                let leg = x.min(y);
                let pred = Predicate::Cong(m, v, m, leg).normalize();
                if !state.contains(&pred) {
                    out.push(Derivation::new(pred, vec![perp_id, midp_id]));
                }
            }
        }
        out
    }
}

/// Isosceles triangle base angles:
/// cong(a,b,a,c) => eqangle(b,a,b,c,c,b,c,a)
pub struct IsoscelesBaseAngles;

impl Rule for IsoscelesBaseAngles {
    fn id(&self) -> &'static str {
        "isosceles_base_angles"
    }

    fn apply(&self, state: &ProofState) -> Vec<Derivation> {
        let mut out = Vec::new();
        for &cong_id in state.facts.of_kind(PredicateKind::Cong) {
            let pts = state.facts.entry(cong_id).predicate.points();
            let Some((a, b, c)) = common_endpoint([pts[0], pts[1]], [pts[2], pts[3]]) else {
                continue;
            };
            let pred = Predicate::EqAngle(b, a, b, c, c, b, c, a).normalize();
            if !state.contains(&pred) {
                out.push(Derivation::new(pred, vec![cong_id]));
            }
        }
        out
    }
}

/// Converse of the base angle theorem:
/// eqangle(b,a,b,c,c,b,c,a) => cong(a,b,a,c)
///
/// An angle fact over exactly three points is matched against the base
/// angle pattern for every choice of apex.
pub struct IsoscelesFromBaseAngles;

impl Rule for IsoscelesFromBaseAngles {
    fn id(&self) -> &'static str {
        "isosceles_from_base_angles"
    }

    fn apply(&self, state: &ProofState) -> Vec<Derivation> {
        let mut out = Vec::new();
        for &angle_id in state.facts.of_kind(PredicateKind::EqAngle) {
            let stored = state.facts.entry(angle_id).predicate;
            let mut uniq: Vec<PointId> = stored.points();
            uniq.sort();
            uniq.dedup();
            if uniq.len() != 3 {
                continue;
            }
            for i in 0..3 {
                let a = uniq[i];
                let b = uniq[(i + 1) % 3];
                let c = uniq[(i + 2) % 3];
                let pattern = Predicate::EqAngle(b, a, b, c, c, b, c, a).normalize();
                if pattern != stored {
                    continue;
                }
                let pred = Predicate::Cong(a, b, a, c).normalize();
                if !state.contains(&pred) {
                    out.push(Derivation::new(pred, vec![angle_id]));
                }
                break;
            }
        }
        out
    }
}

/// Split two segments into (shared endpoint, other, other)
fn common_endpoint(s: [PointId; 2], t: [PointId; 2]) -> Option<(PointId, PointId, PointId)> {
    let shared: Vec<PointId> = s.iter().copied().filter(|p| t.contains(p)).collect();
    if shared.len() != 1 {
        return None;
    }
    let v = shared[0];
    let x = if s[0] == v { s[1] } else { s[0] };
    let y = if t[0] == v { t[1] } else { t[0] };
    if x == y {
        return None;
    }
    Some((v, x, y))
}

fn is_pair(segment: [PointId; 2], x: PointId, y: PointId) -> bool {
    (segment[0] == x && segment[1] == y) || (segment[0] == y && segment[1] == x)
}
