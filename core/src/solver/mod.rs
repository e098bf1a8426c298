//! Retry controller
//!
//! One base closure run, then candidate auxiliary points tried on forked
//! states until one attempt proves the goal or the budget runs out. Failed
//! attempts are dropped whole; nothing they derived survives into the next
//! attempt.

use crate::config::SolverConfig;
use crate::engine::{run_closure, ClosureStatus};
use crate::heuristics::generate_candidates;
use crate::ir::{Justification, ProofState, Trace};
use crate::rules::{all_rules, Rule};
use serde::{Deserialize, Serialize};

/// The auxiliary point a successful attempt used
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuxiliaryInfo {
    pub family: crate::config::Family,

    /// Label of the interned point
    pub point: String,

    /// Labels of the construction parents
    pub parents: Vec<String>,
}

/// Outcome of a solve run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveReport {
    pub proved: bool,

    /// Goal fell to closure over the given facts alone
    pub base_closure_only: bool,

    /// Set when the proof needed an auxiliary point
    pub used_auxiliary: Option<AuxiliaryInfo>,

    /// Candidates attempted before success or exhaustion
    pub candidates_tried: usize,

    /// The given facts contradicted each other linearly
    pub inconsistent: bool,

    /// Closure rounds of the base run
    pub base_rounds: usize,

    /// Facts materialized by the base run plus the winning attempt
    pub facts_added: usize,

    /// Rendered derivation chain when the goal fact is materialized;
    /// absent when the goal is only a linear consequence
    pub proof: Option<Vec<String>>,
}

/// Theorem prover over one problem state
pub struct Solver {
    config: SolverConfig,
    rules: Vec<Box<dyn Rule>>,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            rules: all_rules(),
        }
    }

    /// Run base closure, then the auxiliary retry loop
    pub fn solve(&self, mut state: ProofState) -> SolveReport {
        let base = run_closure(&mut state, &self.rules, self.config.max_rounds);
        tracing::info!(
            status = ?base.status,
            rounds = base.rounds,
            facts = base.facts_added,
            "base closure finished"
        );

        match base.status {
            ClosureStatus::Proved => SolveReport {
                proved: true,
                base_closure_only: true,
                used_auxiliary: None,
                candidates_tried: 0,
                inconsistent: false,
                base_rounds: base.rounds,
                facts_added: base.facts_added,
                proof: render_proof(&state),
            },
            ClosureStatus::Inconsistent => SolveReport {
                proved: false,
                base_closure_only: false,
                used_auxiliary: None,
                candidates_tried: 0,
                inconsistent: true,
                base_rounds: base.rounds,
                facts_added: base.facts_added,
                proof: None,
            },
            ClosureStatus::Exhausted => self.retry_with_auxiliary(state, base.rounds, base.facts_added),
        }
    }

    fn retry_with_auxiliary(
        &self,
        state: ProofState,
        base_rounds: usize,
        base_facts: usize,
    ) -> SolveReport {
        let candidates = generate_candidates(&state, &self.config);
        tracing::info!(count = candidates.len(), "auxiliary candidates generated");

        let mut tried = 0;
        for cand in candidates {
            tried += 1;
            tracing::debug!(label = %cand.label, family = %cand.family, "trying candidate");

            let mut attempt = state.fork();
            let pt = attempt
                .symbols
                .intern_auxiliary(&cand.label, cand.family, cand.parents.clone());
            attempt.model.assign(pt, cand.pos);

            let mut defining_ok = true;
            for pred in cand.defining(pt) {
                if let Err(contradiction) = attempt.add_fact(pred, Justification::Auxiliary) {
                    tracing::warn!(
                        label = %cand.label,
                        residual = contradiction.residual,
                        "defining predicate contradicts state, skipping candidate"
                    );
                    defining_ok = false;
                    break;
                }
            }
            if !defining_ok {
                continue;
            }

            let outcome = run_closure(&mut attempt, &self.rules, self.config.max_rounds);
            if outcome.status == ClosureStatus::Proved {
                let parents = cand
                    .parents
                    .iter()
                    .filter_map(|&p| attempt.symbols.label(p))
                    .collect();
                return SolveReport {
                    proved: true,
                    base_closure_only: false,
                    used_auxiliary: Some(AuxiliaryInfo {
                        family: cand.family,
                        point: cand.label,
                        parents,
                    }),
                    candidates_tried: tried,
                    inconsistent: false,
                    base_rounds,
                    facts_added: base_facts + outcome.facts_added,
                    proof: render_proof(&attempt),
                };
            }
            tracing::debug!(label = %cand.label, status = ?outcome.status, "attempt failed");
        }

        SolveReport {
            proved: false,
            base_closure_only: false,
            used_auxiliary: None,
            candidates_tried: tried,
            inconsistent: false,
            base_rounds,
            facts_added: base_facts,
            proof: None,
        }
    }
}

/// Render the chain under the goal fact, when it is materialized
fn render_proof(state: &ProofState) -> Option<Vec<String>> {
    let root = state.facts.find(&state.goal)?;
    Some(Trace::render_chain(&state.facts, &state.symbols, root))
}
