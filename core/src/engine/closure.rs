//! Fixpoint saturation
//!
//! Rounds of rule application run until the goal is reached, a round adds
//! nothing, or the round cap trips. Every conclusion is certified against
//! the numeric model before insertion; a certification failure drops the
//! conclusion and leaves the state untouched.

use crate::ir::{AddOutcome, DeductionStep, Justification, ProofState, Trace};
use crate::rules::Rule;

/// How a closure run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosureStatus {
    /// Goal materialized or became a linear consequence
    Proved,

    /// A full round added no facts, or the round cap was hit
    Exhausted,

    /// A certified conclusion contradicted the coefficient spaces
    Inconsistent,
}

/// Closure result
#[derive(Debug, Clone)]
pub struct ClosureOutcome {
    pub status: ClosureStatus,

    /// Rounds completed before stopping
    pub rounds: usize,

    /// Facts inserted across all rounds
    pub facts_added: usize,

    /// One step per inserted fact, in insertion order
    pub trace: Trace,
}

/// Saturate the state under the rule catalog
pub fn run_closure(
    state: &mut ProofState,
    rules: &[Box<dyn Rule>],
    max_rounds: usize,
) -> ClosureOutcome {
    let mut trace = Trace::new();
    let mut facts_added = 0;

    if state.goal_reached() {
        return ClosureOutcome {
            status: ClosureStatus::Proved,
            rounds: 0,
            facts_added,
            trace,
        };
    }

    for round in 0..max_rounds {
        let mut added_this_round = 0;

        for rule in rules {
            for derivation in rule.apply(state) {
                if state.contains(&derivation.conclusion) {
                    continue;
                }
                if !state.model.check(&derivation.conclusion) {
                    tracing::warn!(
                        rule = rule.id(),
                        conclusion = %derivation.conclusion.render(&state.symbols),
                        "conclusion failed numeric certification, dropping"
                    );
                    continue;
                }
                let justification = Justification::Derived {
                    rule_id: rule.id().to_string(),
                    premises: derivation.premises.clone(),
                };
                let outcome = match state.add_fact(derivation.conclusion, justification) {
                    Ok(outcome) => outcome,
                    Err(contradiction) => {
                        tracing::warn!(
                            rule = rule.id(),
                            residual = contradiction.residual,
                            "derived fact contradicts linear state"
                        );
                        return ClosureOutcome {
                            status: ClosureStatus::Inconsistent,
                            rounds: round + 1,
                            facts_added,
                            trace,
                        };
                    }
                };
                if let AddOutcome::Inserted(fact_id) = outcome {
                    added_this_round += 1;
                    facts_added += 1;
                    trace.push(DeductionStep {
                        fact: fact_id,
                        rule_id: rule.id().to_string(),
                        premises: derivation.premises,
                        conclusion: derivation.conclusion.normalize(),
                    });
                    if state.goal_reached() {
                        return ClosureOutcome {
                            status: ClosureStatus::Proved,
                            rounds: round + 1,
                            facts_added,
                            trace,
                        };
                    }
                }
            }
        }

        tracing::debug!(round, added = added_this_round, "closure round finished");
        if added_this_round == 0 {
            return ClosureOutcome {
                status: ClosureStatus::Exhausted,
                rounds: round + 1,
                facts_added,
                trace,
            };
        }
    }

    ClosureOutcome {
        status: ClosureStatus::Exhausted,
        rounds: max_rounds,
        facts_added,
        trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Justification, PointId, Predicate, SymbolTable};
    use crate::num::{NumericModel, Vec2};
    use crate::rules::all_rules;

    fn build_state(pts: &[(&str, f64, f64)], goal: Predicate) -> ProofState {
        let symbols = SymbolTable::new();
        let mut model = NumericModel::new(1e-6);
        for &(label, x, y) in pts {
            let id = symbols.intern_given(label);
            model.assign(id, Vec2::new(x, y));
        }
        ProofState::new(symbols, model, goal)
    }

    #[test]
    fn test_goal_given_up_front() {
        let mut st = build_state(
            &[("A", 0.0, 0.0), ("B", 1.0, 0.0), ("C", 2.0, 0.0)],
            Predicate::Coll(PointId(0), PointId(1), PointId(2)),
        );
        st.add_fact(
            Predicate::Coll(PointId(0), PointId(1), PointId(2)),
            Justification::Given,
        )
        .unwrap();

        let outcome = run_closure(&mut st, &all_rules(), 8);
        assert_eq!(outcome.status, ClosureStatus::Proved);
        assert_eq!(outcome.rounds, 0);
        assert_eq!(outcome.facts_added, 0);
    }

    #[test]
    fn test_midsegment_chain_proves_parallel() {
        // midpoints of two triangle sides, goal is the midsegment parallel
        let mut st = build_state(
            &[
                ("A", 0.0, 4.0),
                ("B", -2.0, 0.0),
                ("C", 4.0, 0.0),
                ("M", -1.0, 2.0),
                ("N", 2.0, 2.0),
            ],
            Predicate::Para(PointId(3), PointId(4), PointId(1), PointId(2)),
        );
        let ids: Vec<PointId> = (0..5).map(PointId).collect();

        st.add_fact(
            Predicate::Midp(ids[3], ids[0], ids[1]),
            Justification::Given,
        )
        .unwrap();
        st.add_fact(
            Predicate::Midp(ids[4], ids[0], ids[2]),
            Justification::Given,
        )
        .unwrap();

        let outcome = run_closure(&mut st, &all_rules(), 8);
        assert_eq!(outcome.status, ClosureStatus::Proved);
        assert!(outcome.facts_added >= 1);
        assert!(st.goal_reached());
    }

    #[test]
    fn test_exhausted_without_rules_to_fire() {
        let mut st = build_state(
            &[("A", 0.0, 0.0), ("B", 1.0, 0.0), ("C", 2.0, 1.0)],
            Predicate::Coll(PointId(0), PointId(1), PointId(2)),
        );

        let outcome = run_closure(&mut st, &all_rules(), 8);
        assert_eq!(outcome.status, ClosureStatus::Exhausted);
        assert_eq!(outcome.facts_added, 0);
    }

    #[test]
    fn test_saturated_state_stays_fixed() {
        // second run over a saturated state must add nothing
        let mut st = build_state(
            &[
                ("A", 0.0, 4.0),
                ("B", -2.0, 0.0),
                ("C", 4.0, 0.0),
                ("M", -1.0, 2.0),
                ("N", 2.0, 2.0),
            ],
            Predicate::Coll(PointId(0), PointId(1), PointId(2)),
        );
        let ids: Vec<PointId> = (0..5).map(PointId).collect();

        st.add_fact(
            Predicate::Midp(ids[3], ids[0], ids[1]),
            Justification::Given,
        )
        .unwrap();
        st.add_fact(
            Predicate::Midp(ids[4], ids[0], ids[2]),
            Justification::Given,
        )
        .unwrap();

        let first = run_closure(&mut st, &all_rules(), 16);
        assert_eq!(first.status, ClosureStatus::Exhausted);
        assert!(first.facts_added >= 1);

        let second = run_closure(&mut st, &all_rules(), 16);
        assert_eq!(second.status, ClosureStatus::Exhausted);
        assert_eq!(second.facts_added, 0);
        assert_eq!(second.rounds, 1);
    }

    #[test]
    fn test_certification_blocks_false_conclusions() {
        // the stored congruence is numerically false, so the base angle
        // rule fires but its conclusion never certifies
        let symbols = SymbolTable::new();
        let mut model = NumericModel::new(1e-6);
        for (label, x, y) in [("A", 0.0, 2.0), ("B", -1.0, 0.0), ("C", 3.0, 0.0)] {
            let id = symbols.intern_given(label);
            model.assign(id, Vec2::new(x, y));
        }
        let (a, b, c) = (PointId(0), PointId(1), PointId(2));
        let mut st = ProofState::new(symbols, model, Predicate::EqAngle(b, a, b, c, c, b, c, a));
        st.add_fact(Predicate::Cong(a, b, a, c), Justification::Given)
            .unwrap();

        let outcome = run_closure(&mut st, &all_rules(), 8);
        assert_eq!(outcome.status, ClosureStatus::Exhausted);
        assert!(!st.goal_reached());
    }

    #[test]
    fn test_trace_matches_inserted_facts() {
        let mut st = build_state(
            &[("M", 1.0, 0.0), ("A", 0.0, 0.0), ("B", 2.0, 0.0)],
            Predicate::Midp(PointId(0), PointId(1), PointId(2)),
        );
        let (m, a, b) = (PointId(0), PointId(1), PointId(2));

        st.add_fact(Predicate::Coll(m, a, b), Justification::Given)
            .unwrap();
        st.add_fact(Predicate::Cong(m, a, m, b), Justification::Given)
            .unwrap();

        let outcome = run_closure(&mut st, &all_rules(), 8);
        assert_eq!(outcome.status, ClosureStatus::Proved);
        assert_eq!(outcome.trace.len(), outcome.facts_added);
        let last = outcome.trace.steps.last().unwrap();
        assert_eq!(last.conclusion, Predicate::Midp(m, a, b).normalize());
        assert_eq!(last.rule_id, "midpoint_recognition");
    }
}
