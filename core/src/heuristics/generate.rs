//! Candidate generation and filtering

use crate::config::{Family, SolverConfig};
use crate::ir::{PointId, Predicate, ProofState};
use crate::num::{line_circle_intersections, midpoint, perpendicular_foot, reflect, Vec2};
use crate::objects::{extract_circles, extract_lines, CircleClass, LineClass};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// A candidate position closer than this to an existing point is the same
/// point, not a new one
pub const IS_NEW_THRESHOLD: f64 = 5e-4;

/// Maximum distance at which a candidate counts as incident to a line or
/// circle class
pub const INCIDENCE_THRESHOLD: f64 = 5e-4;

/// How a candidate relates to its parent points
#[derive(Debug, Clone, PartialEq)]
pub enum CandidateKind {
    /// Midpoint of segment ab
    Midpoint { a: PointId, b: PointId },

    /// Image of a under point reflection across b
    Reflection { a: PointId, b: PointId },

    /// Foot of the perpendicular from p onto the line through l1, l2
    Foot {
        p: PointId,
        l1: PointId,
        l2: PointId,
    },

    /// Intersection of the line through l1, l2 with a known circle
    OnCircleLine {
        l1: PointId,
        l2: PointId,
        witness: CircleWitness,
    },
}

/// How circle membership of an intersection candidate is stated
#[derive(Debug, Clone, PartialEq)]
pub enum CircleWitness {
    /// A known center and one rim point
    Center { o: PointId, m: PointId },

    /// Three members of the circle class
    Members { a: PointId, b: PointId, c: PointId },
}

/// A filtered auxiliary point proposal
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Label the point is interned under when tried
    pub label: String,

    pub family: Family,

    /// Closed-form position
    pub pos: Vec2,

    /// Existing points the construction depends on
    pub parents: Vec<PointId>,

    pub kind: CandidateKind,
}

impl Candidate {
    /// Defining predicates of the candidate, stated over its interned ID
    pub fn defining(&self, pt: PointId) -> Vec<Predicate> {
        match self.kind {
            CandidateKind::Midpoint { a, b } => vec![Predicate::Midp(pt, a, b)],
            CandidateKind::Reflection { a, b } => vec![Predicate::Midp(b, a, pt)],
            CandidateKind::Foot { p, l1, l2 } => vec![
                Predicate::Coll(pt, l1, l2),
                Predicate::Perp(p, pt, l1, l2),
            ],
            CandidateKind::OnCircleLine { l1, l2, ref witness } => {
                let membership = match *witness {
                    CircleWitness::Center { o, m } => Predicate::Cong(o, pt, o, m),
                    CircleWitness::Members { a, b, c } => Predicate::Cyclic(pt, a, b, c),
                };
                vec![Predicate::Coll(pt, l1, l2), membership]
            }
        }
    }
}

/// Generate, filter, shuffle and cap auxiliary candidates
///
/// Raw candidates are produced family by family in enabled-family order,
/// each family enumerating its parents in point ID order. Filtering keeps
/// a candidate only when it is a genuinely new point and lies on a line or
/// circle class that took no part in its construction. The surviving list
/// is shuffled under the run seed and truncated to the budget.
pub fn generate_candidates(state: &ProofState, config: &SolverConfig) -> Vec<Candidate> {
    let lines = extract_lines(state);
    let circles = extract_circles(state);

    let mut families = config.families.clone();
    families.sort();
    families.dedup();

    let mut raw = Vec::new();
    for family in families {
        match family {
            Family::H2 => raw.extend(line_circle_candidates(state, &lines, &circles)),
            Family::H3 => raw.extend(midpoint_candidates(state)),
            Family::H4 => raw.extend(reflection_candidates(state)),
            Family::H5 => raw.extend(foot_candidates(state, &lines)),
        }
    }

    let existing: Vec<Vec2> = state
        .symbols
        .all_points()
        .into_iter()
        .filter_map(|p| state.model.pos(p))
        .collect();

    let mut accepted: Vec<Candidate> = Vec::new();
    for cand in raw {
        if state.symbols.lookup(&cand.label).is_some() {
            continue;
        }
        let taken = existing
            .iter()
            .chain(accepted.iter().map(|c| &c.pos))
            .any(|p| p.dist(&cand.pos) < IS_NEW_THRESHOLD);
        if taken {
            continue;
        }
        if !nontrivial_incidence(&cand, &lines, &circles) {
            continue;
        }
        accepted.push(cand);
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    accepted.shuffle(&mut rng);
    accepted.truncate(config.candidate_budget);
    accepted
}

/// A candidate must land on a class none of its parents belong to
fn nontrivial_incidence(cand: &Candidate, lines: &[LineClass], circles: &[CircleClass]) -> bool {
    let disjoint = |members: &[PointId]| members.iter().all(|m| !cand.parents.contains(m));

    let on_line = lines.iter().any(|l| {
        l.num
            .map(|n| n.signed_dist(&cand.pos).abs() < INCIDENCE_THRESHOLD)
            .unwrap_or(false)
            && disjoint(&l.members)
    });
    if on_line {
        return true;
    }
    circles.iter().any(|c| {
        c.num
            .map(|n| (n.center.dist(&cand.pos) - n.radius).abs() < INCIDENCE_THRESHOLD)
            .unwrap_or(false)
            && disjoint(&c.members)
    })
}

fn label_of(state: &ProofState, p: PointId) -> String {
    state.symbols.label(p).unwrap_or_else(|| format!("p{}", p.0))
}

fn midpoint_candidates(state: &ProofState) -> Vec<Candidate> {
    let points = state.symbols.all_points();
    let mut out = Vec::new();
    for (i, &a) in points.iter().enumerate() {
        for &b in &points[i + 1..] {
            let (Some(pa), Some(pb)) = (state.model.pos(a), state.model.pos(b)) else {
                continue;
            };
            out.push(Candidate {
                label: format!("H_mid_{}_{}", label_of(state, a), label_of(state, b)),
                family: Family::H3,
                pos: midpoint(&pa, &pb),
                parents: vec![a, b],
                kind: CandidateKind::Midpoint { a, b },
            });
        }
    }
    out
}

fn reflection_candidates(state: &ProofState) -> Vec<Candidate> {
    let points = state.symbols.all_points();
    let mut out = Vec::new();
    for &a in &points {
        for &b in &points {
            if a == b {
                continue;
            }
            let (Some(pa), Some(pb)) = (state.model.pos(a), state.model.pos(b)) else {
                continue;
            };
            out.push(Candidate {
                label: format!("H_ref_{}_{}", label_of(state, a), label_of(state, b)),
                family: Family::H4,
                pos: reflect(&pa, &pb),
                parents: vec![a, b],
                kind: CandidateKind::Reflection { a, b },
            });
        }
    }
    out
}

fn foot_candidates(state: &ProofState, lines: &[LineClass]) -> Vec<Candidate> {
    let points = state.symbols.all_points();
    let mut out = Vec::new();
    for &p in &points {
        let Some(pp) = state.model.pos(p) else {
            continue;
        };
        for line in lines {
            let Some(num) = line.num else {
                continue;
            };
            if line.members.contains(&p) || line.members.len() < 2 {
                continue;
            }
            let (l1, l2) = (line.members[0], line.members[1]);
            out.push(Candidate {
                label: format!(
                    "H_foot_{}_on_{}_{}",
                    label_of(state, p),
                    label_of(state, l1),
                    label_of(state, l2)
                ),
                family: Family::H5,
                pos: perpendicular_foot(&pp, &num),
                parents: vec![p, l1, l2],
                kind: CandidateKind::Foot { p, l1, l2 },
            });
        }
    }
    out
}

fn line_circle_candidates(
    state: &ProofState,
    lines: &[LineClass],
    circles: &[CircleClass],
) -> Vec<Candidate> {
    let mut out = Vec::new();
    let mut counter = 0usize;
    for line in lines {
        let Some(line_num) = line.num else {
            continue;
        };
        if line.members.len() < 2 {
            continue;
        }
        let (l1, l2) = (line.members[0], line.members[1]);
        for circle in circles {
            let Some(circle_num) = circle.num else {
                continue;
            };
            if circle.members.len() < 3 {
                continue;
            }
            let witness = match circle.center {
                Some(o) => CircleWitness::Center {
                    o,
                    m: circle.members[0],
                },
                None => CircleWitness::Members {
                    a: circle.members[0],
                    b: circle.members[1],
                    c: circle.members[2],
                },
            };
            let mut parents = vec![l1, l2];
            match witness {
                CircleWitness::Center { o, m } => parents.extend([o, m]),
                CircleWitness::Members { a, b, c } => parents.extend([a, b, c]),
            }
            for pos in line_circle_intersections(&line_num, &circle_num, state.model.eps()) {
                out.push(Candidate {
                    label: format!("H_inter_LC_{}", counter),
                    family: Family::H2,
                    pos,
                    parents: parents.clone(),
                    kind: CandidateKind::OnCircleLine {
                        l1,
                        l2,
                        witness: witness.clone(),
                    },
                });
                counter += 1;
            }
        }
    }
    out
}
