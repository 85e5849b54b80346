// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Pure geometric functions on 2D points: direction angles, edge lengths,
// the shoelace area and the crossing-number point-in-polygon test.

use core::f64::consts::TAU;
use core::fmt;

use crate::error::{DcelError, DcelResult};

pub type Real = f64;

/// A 2D coordinate.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: Real,
    pub y: Real,
}

impl Point {
    #[inline]
    pub const fn new(x: Real, y: Real) -> Self {
        Point { x, y }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[Real; 2]> for Point {
    fn from(p: [Real; 2]) -> Self {
        Point::new(p[0], p[1])
    }
}

impl From<(Real, Real)> for Point {
    fn from((x, y): (Real, Real)) -> Self {
        Point::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Angle of the direction (dx, dy), counter-clockwise from +x, in [0, 2π).
/// Returns None for a zero or non-finite length.
pub fn hangle(dx: Real, dy: Real) -> Option<Real> {
    let len = (dx * dx + dy * dy).sqrt();
    if len == 0.0 || !len.is_finite() {
        return None;
    }
    // sqrt rounding can push |dx| / len just past 1.
    let c = (dx / len).clamp(-1.0, 1.0);
    let angle = if dy > 0.0 { c.acos() } else { TAU - c.acos() };
    Some(if angle >= TAU { 0.0 } else { angle })
}

/// Direction angle of the edge `from -> to`.
pub fn edge_angle(from: Point, to: Point) -> DcelResult<Real> {
    hangle(to.x - from.x, to.y - from.y).ok_or(DcelError::DegenerateEdge {
        x: from.x,
        y: from.y,
    })
}

#[inline]
pub fn edge_length(from: Point, to: Point) -> Real {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    (dx * dx + dy * dy).sqrt()
}

/// Signed area of the closed polygon through `points` (shoelace formula).
/// Positive for counter-clockwise order.
pub fn shoelace<I>(points: I) -> Real
where
    I: IntoIterator<Item = Point>,
{
    let mut iter = points.into_iter();
    let first = match iter.next() {
        Some(p) => p,
        None => return 0.0,
    };
    let mut sum = 0.0;
    let mut p1 = first;
    for p2 in iter {
        sum += p1.x * p2.y - p2.x * p1.y;
        p1 = p2;
    }
    sum += p1.x * first.y - first.x * p1.y;
    sum / 2.0
}

/// Crossing-number test: casts a ray from `q` in the +y direction and counts
/// the polygon edges it crosses. Inside iff the count is odd.
pub fn point_in_polygon(polygon: &[Point], q: Point) -> bool {
    let n = polygon.len();
    if n == 0 {
        return false;
    }
    let mut crossings = 0u32;
    let mut p1 = polygon[0];
    for i in 1..=n {
        let p2 = polygon[i % n];
        if q.x > p1.x.min(p2.x) && q.x <= p1.x.max(p2.x) && q.y <= p1.y.max(p2.y) && p1.x != p2.x {
            let y_inters = (q.x - p1.x) * (p2.y - p1.y) / (p2.x - p1.x) + p1.y;
            if p1.y == p2.y || q.y <= y_inters {
                crossings += 1;
            }
        }
        p1 = p2;
    }
    crossings % 2 == 1
}

/// True if every point of `points` is inside `polygon`.
pub fn points_in_polygon(polygon: &[Point], points: &[Point]) -> bool {
    points.iter().all(|&q| point_in_polygon(polygon, q))
}
