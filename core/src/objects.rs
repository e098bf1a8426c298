//! Lines and circles as equivalence classes
//!
//! The store never holds line or circle objects; it holds `Coll` and
//! `Cyclic` facts. Classes are recovered on demand: collinearity triples
//! merge when they share two points, concyclicity quadruples when they
//! share three. Each class carries the fact IDs it was built from and a
//! numeric realization taken from member coordinates.

use crate::ir::{FactId, PointId, Predicate, PredicateKind, ProofState};
use crate::num::{circumcircle, NumCircle, NumLine};
use std::collections::BTreeSet;

/// A maximal set of known-collinear points
#[derive(Debug, Clone)]
pub struct LineClass {
    /// Member points, sorted by ID
    pub members: Vec<PointId>,

    /// Collinearity facts that built this class
    pub sources: Vec<FactId>,

    /// Numeric line through the members, when coordinates permit
    pub num: Option<NumLine>,
}

/// A maximal set of known-concyclic points
#[derive(Debug, Clone)]
pub struct CircleClass {
    /// Member points, sorted by ID
    pub members: Vec<PointId>,

    /// Concyclicity facts that built this class
    pub sources: Vec<FactId>,

    /// A point equidistant from the members, when one is known
    pub center: Option<PointId>,

    /// Numeric circle through the members, when coordinates permit
    pub num: Option<NumCircle>,
}

struct RawClass {
    members: BTreeSet<PointId>,
    sources: Vec<FactId>,
}

/// Merge point tuples into classes, joining on `overlap` shared points
fn merge_classes(
    tuples: impl Iterator<Item = (FactId, Vec<PointId>)>,
    overlap: usize,
) -> Vec<RawClass> {
    let mut classes: Vec<RawClass> = Vec::new();
    for (fact, points) in tuples {
        let incoming: BTreeSet<PointId> = points.into_iter().collect();
        let matching: Vec<usize> = classes
            .iter()
            .enumerate()
            .filter(|(_, c)| c.members.intersection(&incoming).count() >= overlap)
            .map(|(i, _)| i)
            .collect();

        match matching.split_first() {
            None => classes.push(RawClass {
                members: incoming,
                sources: vec![fact],
            }),
            Some((&first, rest)) => {
                // absorb the tuple and any other overlapping classes
                for p in incoming {
                    classes[first].members.insert(p);
                }
                classes[first].sources.push(fact);
                for &i in rest.iter().rev() {
                    let absorbed = classes.remove(i);
                    classes[first].members.extend(absorbed.members);
                    classes[first].sources.extend(absorbed.sources);
                }
            }
        }
    }
    classes
}

/// Rebuild line classes from the current `Coll` facts
pub fn extract_lines(state: &ProofState) -> Vec<LineClass> {
    let tuples = state.facts.of_kind(PredicateKind::Coll).iter().map(|&id| {
        let pts = state.facts.entry(id).predicate.points();
        (id, pts)
    });

    merge_classes(tuples, 2)
        .into_iter()
        .map(|raw| {
            let members: Vec<PointId> = raw.members.into_iter().collect();
            let num = realize_line(state, &members);
            LineClass {
                members,
                sources: raw.sources,
                num,
            }
        })
        .collect()
}

fn realize_line(state: &ProofState, members: &[PointId]) -> Option<NumLine> {
    let first = state.model.pos(*members.first()?)?;
    for &m in &members[1..] {
        let other = state.model.pos(m)?;
        if let Some(line) = NumLine::through(&first, &other) {
            return Some(line);
        }
    }
    None
}

/// Rebuild circle classes from the current `Cyclic` facts
pub fn extract_circles(state: &ProofState) -> Vec<CircleClass> {
    let tuples = state
        .facts
        .of_kind(PredicateKind::Cyclic)
        .iter()
        .map(|&id| {
            let pts = state.facts.entry(id).predicate.points();
            (id, pts)
        });

    merge_classes(tuples, 3)
        .into_iter()
        .map(|raw| {
            let members: Vec<PointId> = raw.members.into_iter().collect();
            let num = realize_circle(state, &members);
            let center = find_center(state, &members);
            CircleClass {
                members,
                sources: raw.sources,
                center,
                num,
            }
        })
        .collect()
}

fn realize_circle(state: &ProofState, members: &[PointId]) -> Option<NumCircle> {
    if members.len() < 3 {
        return None;
    }
    let a = state.model.pos(members[0])?;
    let b = state.model.pos(members[1])?;
    let c = state.model.pos(members[2])?;
    circumcircle(&a, &b, &c, state.model.eps())
}

/// A symbolic center: a point the ratio space knows to be equidistant
/// from the first three members
fn find_center(state: &ProofState, members: &[PointId]) -> Option<PointId> {
    if members.len() < 3 {
        return None;
    }
    let (m0, m1, m2) = (members[0], members[1], members[2]);
    state
        .symbols
        .all_points()
        .into_iter()
        .filter(|p| !members.contains(p))
        .find(|&p| {
            state.has_fact(&Predicate::Cong(p, m0, p, m1))
                && state.has_fact(&Predicate::Cong(p, m0, p, m2))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Justification, SymbolTable};
    use crate::num::{NumericModel, Vec2};

    fn build_state(pts: &[(&str, f64, f64)]) -> ProofState {
        let symbols = SymbolTable::new();
        let mut model = NumericModel::new(1e-6);
        for &(label, x, y) in pts {
            let id = symbols.intern_given(label);
            model.assign(id, Vec2::new(x, y));
        }
        let goal = Predicate::Coll(PointId(0), PointId(0), PointId(0));
        ProofState::new(symbols, model, goal)
    }

    #[test]
    fn test_lines_merge_on_two_shared() {
        let mut st = build_state(&[
            ("A", 0.0, 0.0),
            ("B", 1.0, 0.0),
            ("C", 2.0, 0.0),
            ("D", 3.0, 0.0),
            ("E", 0.0, 1.0),
            ("F", 0.0, 2.0),
        ]);
        let ids: Vec<PointId> = (0..6).map(PointId).collect();

        st.add_fact(Predicate::Coll(ids[0], ids[1], ids[2]), Justification::Given)
            .unwrap();
        st.add_fact(Predicate::Coll(ids[1], ids[2], ids[3]), Justification::Given)
            .unwrap();
        st.add_fact(Predicate::Coll(ids[0], ids[4], ids[5]), Justification::Given)
            .unwrap();

        let lines = extract_lines(&st);
        assert_eq!(lines.len(), 2);

        let long = lines.iter().find(|l| l.members.len() == 4).unwrap();
        assert_eq!(long.members, vec![ids[0], ids[1], ids[2], ids[3]]);
        assert_eq!(long.sources.len(), 2);
        assert!(long.num.is_some());
    }

    #[test]
    fn test_lines_sharing_one_point_stay_apart() {
        let mut st = build_state(&[
            ("A", 0.0, 0.0),
            ("B", 1.0, 0.0),
            ("C", 2.0, 0.0),
            ("D", 0.0, 1.0),
            ("E", 0.0, 2.0),
        ]);
        let ids: Vec<PointId> = (0..5).map(PointId).collect();

        st.add_fact(Predicate::Coll(ids[0], ids[1], ids[2]), Justification::Given)
            .unwrap();
        st.add_fact(Predicate::Coll(ids[0], ids[3], ids[4]), Justification::Given)
            .unwrap();

        assert_eq!(extract_lines(&st).len(), 2);
    }

    #[test]
    fn test_circles_merge_on_three_shared() {
        // six points on the unit circle
        let coords: Vec<(String, f64, f64)> = (0..6)
            .map(|i| {
                let t = i as f64 * std::f64::consts::PI / 3.5;
                (format!("P{}", i), t.cos(), t.sin())
            })
            .collect();
        let as_refs: Vec<(&str, f64, f64)> =
            coords.iter().map(|(s, x, y)| (s.as_str(), *x, *y)).collect();
        let mut st = build_state(&as_refs);
        let ids: Vec<PointId> = (0..6).map(PointId).collect();

        st.add_fact(
            Predicate::Cyclic(ids[0], ids[1], ids[2], ids[3]),
            Justification::Given,
        )
        .unwrap();
        st.add_fact(
            Predicate::Cyclic(ids[1], ids[2], ids[3], ids[4]),
            Justification::Given,
        )
        .unwrap();
        st.add_fact(
            Predicate::Cyclic(ids[0], ids[1], ids[4], ids[5]),
            Justification::Given,
        )
        .unwrap();

        let circles = extract_circles(&st);
        assert_eq!(circles.len(), 2, "Third quadruple shares only two points");

        let big = circles.iter().find(|c| c.members.len() == 5).unwrap();
        let num = big.num.unwrap();
        assert!(num.center.dist(&Vec2::new(0.0, 0.0)) < 1e-6);
        assert!((num.radius - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_center_detection() {
        let mut st = build_state(&[
            ("O", 0.0, 0.0),
            ("A", 1.0, 0.0),
            ("B", 0.0, 1.0),
            ("C", -1.0, 0.0),
            ("D", 0.0, -1.0),
        ]);
        let o = PointId(0);
        let ids: Vec<PointId> = (1..5).map(PointId).collect();

        st.add_fact(
            Predicate::Cyclic(ids[0], ids[1], ids[2], ids[3]),
            Justification::Given,
        )
        .unwrap();
        st.add_fact(Predicate::Cong(o, ids[0], o, ids[1]), Justification::Given)
            .unwrap();
        st.add_fact(Predicate::Cong(o, ids[1], o, ids[2]), Justification::Given)
            .unwrap();

        let circles = extract_circles(&st);
        assert_eq!(circles.len(), 1);
        // cong(O,A,O,B) and cong(O,B,O,C) chain through the ratio space
        assert_eq!(circles[0].center, Some(o));
    }

    #[test]
    fn test_no_center_without_cong() {
        let mut st = build_state(&[
            ("A", 1.0, 0.0),
            ("B", 0.0, 1.0),
            ("C", -1.0, 0.0),
            ("D", 0.0, -1.0),
        ]);
        let ids: Vec<PointId> = (0..4).map(PointId).collect();

        st.add_fact(
            Predicate::Cyclic(ids[0], ids[1], ids[2], ids[3]),
            Justification::Given,
        )
        .unwrap();

        assert_eq!(extract_circles(&st)[0].center, None);
    }
}
