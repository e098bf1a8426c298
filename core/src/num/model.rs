//! Numeric coordinate model
//!
//! Every point in a configuration carries fixed coordinates: given points
//! from the problem statement, auxiliary points from their closed-form
//! construction. The model answers epsilon-tolerance checks used to certify
//! derived facts and to filter heuristic candidates. It is never solved or
//! perturbed; coordinates only ever accumulate.

use crate::ir::predicates::Predicate;
use crate::ir::symbols::PointId;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Two-dimensional point or vector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub(&self, other: &Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }

    pub fn scale(&self, k: f64) -> Vec2 {
        Vec2::new(self.x * k, self.y * k)
    }

    pub fn dot(&self, other: &Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the cross product, treating both as 3D vectors
    pub fn cross(&self, other: &Vec2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn dist(&self, other: &Vec2) -> f64 {
        self.sub(other).norm()
    }
}

/// Line in unit-normal form: points p with n . p = c
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumLine {
    pub normal: Vec2,
    pub offset: f64,
}

impl NumLine {
    /// Line through two distinct points
    pub fn through(a: &Vec2, b: &Vec2) -> Option<NumLine> {
        let d = b.sub(a);
        let len = d.norm();
        if len < 1e-12 {
            return None;
        }
        let normal = Vec2::new(-d.y / len, d.x / len);
        Some(NumLine {
            normal,
            offset: normal.dot(a),
        })
    }

    /// Signed distance from a point to the line
    pub fn signed_dist(&self, p: &Vec2) -> f64 {
        self.normal.dot(p) - self.offset
    }

    /// Unit direction along the line
    pub fn direction(&self) -> Vec2 {
        Vec2::new(self.normal.y, -self.normal.x)
    }
}

/// Circle with center and radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumCircle {
    pub center: Vec2,
    pub radius: f64,
}

/// Circumcircle of three non-collinear points
pub fn circumcircle(a: &Vec2, b: &Vec2, c: &Vec2, eps: f64) -> Option<NumCircle> {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d.abs() < eps {
        return None;
    }
    let a2 = a.dot(a);
    let b2 = b.dot(b);
    let c2 = c.dot(c);
    let ux = (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d;
    let uy = (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d;
    let center = Vec2::new(ux, uy);
    Some(NumCircle {
        radius: center.dist(a),
        center,
    })
}

/// Frozen coordinate assignment with tolerance checks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericModel {
    coords: FxHashMap<PointId, Vec2>,
    eps: f64,
}

impl NumericModel {
    pub fn new(eps: f64) -> Self {
        Self {
            coords: FxHashMap::default(),
            eps,
        }
    }

    pub fn eps(&self) -> f64 {
        self.eps
    }

    /// Assign coordinates to a point
    pub fn assign(&mut self, p: PointId, pos: Vec2) {
        self.coords.insert(p, pos);
    }

    /// Coordinates of a point, if assigned
    pub fn pos(&self, p: PointId) -> Option<Vec2> {
        self.coords.get(&p).copied()
    }

    /// Number of assigned points
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    fn pos4(&self, a: PointId, b: PointId, c: PointId, d: PointId) -> Option<[Vec2; 4]> {
        Some([self.pos(a)?, self.pos(b)?, self.pos(c)?, self.pos(d)?])
    }

    pub fn collinear(&self, a: &Vec2, b: &Vec2, c: &Vec2) -> bool {
        b.sub(a).cross(&c.sub(a)).abs() < self.eps
    }

    pub fn parallel(&self, a: &Vec2, b: &Vec2, c: &Vec2, d: &Vec2) -> bool {
        b.sub(a).cross(&d.sub(c)).abs() < self.eps
    }

    pub fn perpendicular(&self, a: &Vec2, b: &Vec2, c: &Vec2, d: &Vec2) -> bool {
        b.sub(a).dot(&d.sub(c)).abs() < self.eps
    }

    pub fn cong(&self, a: &Vec2, b: &Vec2, c: &Vec2, d: &Vec2) -> bool {
        (a.dist(b) - c.dist(d)).abs() < self.eps
    }

    pub fn concyclic(&self, a: &Vec2, b: &Vec2, c: &Vec2, d: &Vec2) -> bool {
        match circumcircle(a, b, c, self.eps) {
            Some(circle) => (circle.center.dist(d) - circle.radius).abs() < self.eps,
            None => false,
        }
    }

    /// Directed angle from ab to cd equals directed angle from ef to gh, mod pi
    #[allow(clippy::too_many_arguments)]
    pub fn eq_angle(
        &self,
        a: &Vec2,
        b: &Vec2,
        c: &Vec2,
        d: &Vec2,
        e: &Vec2,
        f: &Vec2,
        g: &Vec2,
        h: &Vec2,
    ) -> bool {
        let dir = |p: &Vec2, q: &Vec2| {
            let v = q.sub(p);
            v.y.atan2(v.x).rem_euclid(std::f64::consts::PI)
        };
        let lhs = (dir(c, d) - dir(a, b)).rem_euclid(std::f64::consts::PI);
        let rhs = (dir(g, h) - dir(e, f)).rem_euclid(std::f64::consts::PI);
        let diff = (lhs - rhs).abs();
        diff < self.eps || (std::f64::consts::PI - diff) < self.eps
    }

    /// Certify a predicate against the coordinates
    ///
    /// Returns false when any referenced point has no coordinates.
    pub fn check(&self, pred: &Predicate) -> bool {
        match *pred {
            Predicate::Coll(a, b, c) => match (self.pos(a), self.pos(b), self.pos(c)) {
                (Some(a), Some(b), Some(c)) => self.collinear(&a, &b, &c),
                _ => false,
            },
            Predicate::Para(a, b, c, d) => match self.pos4(a, b, c, d) {
                Some([a, b, c, d]) => self.parallel(&a, &b, &c, &d),
                None => false,
            },
            Predicate::Perp(a, b, c, d) => match self.pos4(a, b, c, d) {
                Some([a, b, c, d]) => self.perpendicular(&a, &b, &c, &d),
                None => false,
            },
            Predicate::Cong(a, b, c, d) => match self.pos4(a, b, c, d) {
                Some([a, b, c, d]) => self.cong(&a, &b, &c, &d),
                None => false,
            },
            Predicate::Cyclic(a, b, c, d) => match self.pos4(a, b, c, d) {
                Some([a, b, c, d]) => self.concyclic(&a, &b, &c, &d),
                None => false,
            },
            Predicate::Midp(m, a, b) => match (self.pos(m), self.pos(a), self.pos(b)) {
                (Some(m), Some(a), Some(b)) => {
                    m.dist(&a.add(&b).scale(0.5)) < self.eps
                }
                _ => false,
            },
            Predicate::EqAngle(a, b, c, d, e, f, g, h) => {
                match (self.pos4(a, b, c, d), self.pos4(e, f, g, h)) {
                    (Some([a, b, c, d]), Some([e, f, g, h])) => {
                        self.eq_angle(&a, &b, &c, &d, &e, &f, &g, &h)
                    }
                    _ => false,
                }
            }
            Predicate::EqRatio(a, b, c, d, e, f, g, h) => {
                match (self.pos4(a, b, c, d), self.pos4(e, f, g, h)) {
                    (Some([a, b, c, d]), Some([e, f, g, h])) => {
                        let (ab, cd) = (a.dist(&b), c.dist(&d));
                        let (ef, gh) = (e.dist(&f), g.dist(&h));
                        cd > self.eps && gh > self.eps && (ab / cd - ef / gh).abs() < self.eps
                    }
                    _ => false,
                }
            }
        }
    }
}
