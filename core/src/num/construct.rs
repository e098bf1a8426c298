//! Closed-form constructions for auxiliary points
//!
//! Each heuristic family places its candidate with an exact formula over
//! existing coordinates. No solving or sampling: a candidate either has a
//! closed-form position or it is not generated.

use super::model::{NumCircle, NumLine, Vec2};

/// Midpoint of a segment
pub fn midpoint(a: &Vec2, b: &Vec2) -> Vec2 {
    a.add(b).scale(0.5)
}

/// Reflection of `p` across `center`
pub fn reflect(p: &Vec2, center: &Vec2) -> Vec2 {
    center.scale(2.0).sub(p)
}

/// Foot of the perpendicular from `p` onto `line`
pub fn perpendicular_foot(p: &Vec2, line: &NumLine) -> Vec2 {
    p.sub(&line.normal.scale(line.signed_dist(p)))
}

/// Intersection points of a line and a circle
///
/// Returns zero points when the line misses the circle, one at tangency
/// (within `eps`), two otherwise. The discriminant is clamped at zero so a
/// grazing line cannot produce NaN coordinates.
pub fn line_circle_intersections(line: &NumLine, circle: &NumCircle, eps: f64) -> Vec<Vec2> {
    let e = line.signed_dist(&circle.center);
    let disc = circle.radius * circle.radius - e * e;
    if disc < -eps {
        return Vec::new();
    }
    let foot = circle.center.sub(&line.normal.scale(e));
    let h = disc.max(0.0).sqrt();
    if h < eps {
        return vec![foot];
    }
    let along = line.direction().scale(h);
    vec![foot.sub(&along), foot.add(&along)]
}
