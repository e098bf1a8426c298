//! Circle rules

use super::{Derivation, Rule};
use crate::ir::{FactId, PointId, Predicate, PredicateKind, ProofState};
use crate::objects::extract_circles;
use std::collections::{BTreeMap, BTreeSet};

/// Equal distances from a common point put the far endpoints on a circle:
/// cong(o,a,o,b) + cong(o,b,o,c) + cong(o,c,o,d) => cyclic(a,b,c,d)
///
/// Spokes from the same center are chained through shared endpoints, so
/// the premises of each conclusion are the congruences that connect the
/// four points, not every spoke of the class.
pub struct EquidistantConcyclic;

impl Rule for EquidistantConcyclic {
    fn id(&self) -> &'static str {
        "equidistant_concyclic"
    }

    fn apply(&self, state: &ProofState) -> Vec<Derivation> {
        let mut out = Vec::new();
        for class in spoke_classes(state) {
            if class.rim.len() < 4 {
                continue;
            }
            let rim: Vec<PointId> = class.rim.iter().copied().collect();
            for window in rim.windows(4) {
                let pred = Predicate::Cyclic(window[0], window[1], window[2], window[3]);
                if !state.contains(&pred) {
                    out.push(Derivation::new(pred, class.sources.clone()));
                }
            }
        }
        out
    }
}

struct SpokeClass {
    rim: BTreeSet<PointId>,
    sources: Vec<FactId>,
}

/// Group congruence spokes by center and chain them through shared rim
/// endpoints
///
/// A congruence counts as a spoke pair when its two segments share exactly
/// one point. That point is the center; the other endpoints join the rim.
/// Two spoke pairs of the same center only tie their radii together when
/// they share a rim point, so pairs without a common endpoint stay in
/// separate classes.
fn spoke_classes(state: &ProofState) -> Vec<SpokeClass> {
    let mut by_center: BTreeMap<PointId, Vec<SpokeClass>> = BTreeMap::new();
    for &cong_id in state.facts.of_kind(PredicateKind::Cong) {
        let pts = state.facts.entry(cong_id).predicate.points();
        let Some((center, r1, r2)) = spoke_split([pts[0], pts[1]], [pts[2], pts[3]]) else {
            continue;
        };
        let incoming: BTreeSet<PointId> = [r1, r2].into_iter().collect();
        let classes = by_center.entry(center).or_default();
        let matching: Vec<usize> = classes
            .iter()
            .enumerate()
            .filter(|(_, c)| c.rim.intersection(&incoming).next().is_some())
            .map(|(i, _)| i)
            .collect();
        match matching.split_first() {
            None => classes.push(SpokeClass {
                rim: incoming,
                sources: vec![cong_id],
            }),
            Some((&first, rest)) => {
                classes[first].rim.extend(incoming);
                classes[first].sources.push(cong_id);
                for &i in rest.iter().rev() {
                    let absorbed = classes.remove(i);
                    classes[first].rim.extend(absorbed.rim);
                    classes[first].sources.extend(absorbed.sources);
                }
            }
        }
    }
    by_center.into_values().flatten().collect()
}

fn spoke_split(a: [PointId; 2], b: [PointId; 2]) -> Option<(PointId, PointId, PointId)> {
    let shared: Vec<PointId> = a.iter().copied().filter(|p| b.contains(p)).collect();
    if shared.len() != 1 {
        return None;
    }
    let center = shared[0];
    let r1 = if a[0] == center { a[1] } else { a[0] };
    let r2 = if b[0] == center { b[1] } else { b[0] };
    if r1 == r2 {
        return None;
    }
    Some((center, r1, r2))
}

/// Inscribed angle theorem:
/// cyclic(a,b,c,d) => eqangle(u,x,u,y,v,x,v,y) for each chord xy
///
/// Every pair of members subtending the same chord sees it under the same
/// directed angle mod pi. One cyclic fact licenses six angle equalities.
pub struct InscribedAngle;

impl Rule for InscribedAngle {
    fn id(&self) -> &'static str {
        "inscribed_angle"
    }

    fn apply(&self, state: &ProofState) -> Vec<Derivation> {
        let mut out = Vec::new();
        for circle in extract_circles(state) {
            if circle.members.len() < 4 {
                continue;
            }
            let n = circle.members.len();
            for i in 0..n {
                for j in (i + 1)..n {
                    let (x, y) = (circle.members[i], circle.members[j]);
                    let rest: Vec<PointId> = circle
                        .members
                        .iter()
                        .copied()
                        .filter(|&p| p != x && p != y)
                        .collect();
                    for (k, &u) in rest.iter().enumerate() {
                        for &v in &rest[k + 1..] {
                            let pred =
                                Predicate::EqAngle(u, x, u, y, v, x, v, y).normalize();
                            if !state.contains(&pred) {
                                out.push(Derivation::new(pred, circle.sources.clone()));
                            }
                        }
                    }
                }
            }
        }
        out
    }
}
