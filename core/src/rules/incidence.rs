//! Incidence closure rules
//!
//! Merged line and circle classes license collinearity and concyclicity
//! statements over member subsets that no single stored fact spells out.
//! Materializing them keeps pattern scans and the angle space complete:
//! without `line_closure`, chained collinearity would leave direction
//! variables of distant member pairs untied.

use super::{Derivation, Rule};
use crate::ir::{PointId, Predicate, ProofState};
use crate::objects::{extract_circles, extract_lines};

/// Emit every missing collinearity triple of a merged line class
pub struct LineClosure;

impl Rule for LineClosure {
    fn id(&self) -> &'static str {
        "line_closure"
    }

    fn apply(&self, state: &ProofState) -> Vec<Derivation> {
        let mut out = Vec::new();
        for line in extract_lines(state) {
            if line.members.len() < 4 {
                continue;
            }
            for triple in triples(&line.members) {
                let pred = Predicate::Coll(triple[0], triple[1], triple[2]);
                if !state.contains(&pred) {
                    out.push(Derivation::new(pred, line.sources.clone()));
                }
            }
        }
        out
    }
}

/// Emit missing concyclicity quadruples of a merged circle class
///
/// Consecutive quadruples of the sorted member list are enough: each pair
/// of neighbours shares three points, so extraction re-merges the class.
pub struct CircleClosure;

impl Rule for CircleClosure {
    fn id(&self) -> &'static str {
        "circle_closure"
    }

    fn apply(&self, state: &ProofState) -> Vec<Derivation> {
        let mut out = Vec::new();
        for circle in extract_circles(state) {
            if circle.members.len() < 5 {
                continue;
            }
            for window in circle.members.windows(4) {
                let pred = Predicate::Cyclic(window[0], window[1], window[2], window[3]);
                if !state.contains(&pred) {
                    out.push(Derivation::new(pred, circle.sources.clone()));
                }
            }
        }
        out
    }
}

fn triples(members: &[PointId]) -> Vec<[PointId; 3]> {
    let mut out = Vec::new();
    for i in 0..members.len() {
        for j in (i + 1)..members.len() {
            for k in (j + 1)..members.len() {
                out.push([members[i], members[j], members[k]]);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Justification, SymbolTable};
    use crate::num::{NumericModel, Vec2};

    fn state_on_x_axis(n: u32) -> ProofState {
        let symbols = SymbolTable::new();
        let mut model = NumericModel::new(1e-6);
        for i in 0..n {
            let id = symbols.intern_given(&format!("P{}", i));
            model.assign(id, Vec2::new(i as f64, 0.0));
        }
        let goal = Predicate::Coll(PointId(0), PointId(1), PointId(2));
        ProofState::new(symbols, model, goal)
    }

    #[test]
    fn test_line_closure_completes_class() {
        let mut st = state_on_x_axis(4);
        let ids: Vec<PointId> = (0..4).map(PointId).collect();

        st.add_fact(Predicate::Coll(ids[0], ids[1], ids[2]), Justification::Given)
            .unwrap();
        st.add_fact(Predicate::Coll(ids[1], ids[2], ids[3]), Justification::Given)
            .unwrap();

        let derivs = LineClosure.apply(&st);
        let preds: Vec<Predicate> = derivs.iter().map(|d| d.conclusion).collect();

        // four points hold four triples, two are stored
        assert_eq!(preds.len(), 2);
        assert!(preds.contains(&Predicate::Coll(ids[0], ids[1], ids[3])));
        assert!(preds.contains(&Predicate::Coll(ids[0], ids[2], ids[3])));
    }

    #[test]
    fn test_line_closure_quiet_on_small_classes() {
        let mut st = state_on_x_axis(3);
        let ids: Vec<PointId> = (0..3).map(PointId).collect();
        st.add_fact(Predicate::Coll(ids[0], ids[1], ids[2]), Justification::Given)
            .unwrap();

        assert!(LineClosure.apply(&st).is_empty());
    }

    #[test]
    fn test_circle_closure_completes_class() {
        let symbols = SymbolTable::new();
        let mut model = NumericModel::new(1e-6);
        for i in 0..5u32 {
            let id = symbols.intern_given(&format!("P{}", i));
            let t = i as f64;
            model.assign(id, Vec2::new(t.cos(), t.sin()));
        }
        let goal = Predicate::Coll(PointId(0), PointId(1), PointId(2));
        let mut st = ProofState::new(symbols, model, goal);
        let ids: Vec<PointId> = (0..5).map(PointId).collect();

        st.add_fact(
            Predicate::Cyclic(ids[0], ids[1], ids[2], ids[3]),
            Justification::Given,
        )
        .unwrap();
        st.add_fact(
            Predicate::Cyclic(ids[0], ids[1], ids[2], ids[4]),
            Justification::Given,
        )
        .unwrap();

        let derivs = CircleClosure.apply(&st);
        let preds: Vec<Predicate> = derivs.iter().map(|d| d.conclusion).collect();

        // the merged class {0..4} is missing its second window
        assert_eq!(preds, vec![Predicate::Cyclic(ids[1], ids[2], ids[3], ids[4])]);
    }
}
