// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Axis-aligned bounding box used to prune hole candidates before the
// point-in-polygon test.

use crate::geom::{Point, Real};

/// Axis-aligned bounding box. Starts empty (min = +inf, max = -inf) and
/// only grows until `reset`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    pub min_x: Real,
    pub min_y: Real,
    pub max_x: Real,
    pub max_y: Real,
}

impl Aabb {
    pub const EMPTY: Aabb = Aabb {
        min_x: Real::INFINITY,
        min_y: Real::INFINITY,
        max_x: Real::NEG_INFINITY,
        max_y: Real::NEG_INFINITY,
    };

    pub fn new() -> Self {
        Self::EMPTY
    }

    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point>,
    {
        let mut b = Self::EMPTY;
        b.expand_all(points);
        b
    }

    pub fn reset(&mut self) {
        *self = Self::EMPTY;
    }

    /// True until the first point is added.
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn expand(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    pub fn expand_all<'a, I>(&mut self, points: I)
    where
        I: IntoIterator<Item = &'a Point>,
    {
        for p in points {
            self.expand(*p);
        }
    }

    pub fn width(&self) -> Real {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> Real {
        self.max_y - self.min_y
    }

    /// Boundary points count as contained.
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    pub fn contains_points<'a, I>(&self, points: I) -> bool
    where
        I: IntoIterator<Item = &'a Point>,
    {
        points.into_iter().all(|p| self.contains_point(*p))
    }

    /// True if `other` lies entirely inside `self`. An empty box is contained
    /// in everything.
    pub fn contains(&self, other: &Aabb) -> bool {
        other.is_empty()
            || (other.min_x >= self.min_x
                && other.max_x <= self.max_x
                && other.min_y >= self.min_y
                && other.max_y <= self.max_y)
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        !(other.max_x < self.min_x
            || other.min_x > self.max_x
            || other.max_y < self.min_y
            || other.min_y > self.max_y)
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::new()
    }
}
