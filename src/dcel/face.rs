// Copyright 2025 Lars Brubaker
// Derived face properties: area, boundary, bounding box and holes.
//
// Each property is memoized on the face and recomputed only after an edit
// clears it. The accessors take `&mut self` because a read may fill a cache.

use super::Dcel;
use crate::aabb::Aabb;
use crate::geom::{points_in_polygon, shoelace, Point, Real};
use crate::mesh::{FaceIdx, Mesh, Ring, VertIdx};

impl Dcel {
    /// Signed area of the face boundary: positive when traced
    /// counter-clockwise.
    pub fn area(&mut self, f: FaceIdx) -> Real {
        if let Some(a) = self.mesh.faces[f].cache.area {
            return a;
        }
        let mesh = &self.mesh;
        let wedge = mesh.faces[f].wedge;
        let a = shoelace(mesh.ring(wedge).map(|e| mesh.point(mesh.edges[e].origin)));
        self.mesh.faces[f].cache.area = Some(a);
        a
    }

    /// Area with the (non-positive) areas of the face's holes added in.
    pub fn area_except_holes(&mut self, f: FaceIdx) -> Real {
        let holes = self.holes(f).to_vec();
        let mut area = self.area(f);
        for h in holes {
            area += self.area(h);
        }
        area
    }

    /// Area > 0: a bounded region traced counter-clockwise.
    pub fn is_internal(&mut self, f: FaceIdx) -> bool {
        self.area(f) > 0.0
    }

    /// Area <= 0: the unbounded face, a hole boundary or a degenerate face.
    pub fn is_external(&mut self, f: FaceIdx) -> bool {
        self.area(f) <= 0.0
    }

    /// Boundary vertices in traversal order, starting at the wedge's origin.
    /// Spurs visit their tip once and their base twice.
    pub fn boundary(&mut self, f: FaceIdx) -> &[VertIdx] {
        let mesh: &mut Mesh = &mut self.mesh;
        let edges = &mesh.edges;
        let face = &mut mesh.faces[f];
        let wedge = face.wedge;
        face.cache
            .boundary
            .get_or_insert_with(|| Ring::new(edges, wedge).map(|e| edges[e].origin).collect())
            .as_slice()
    }

    pub fn boundary_points(&mut self, f: FaceIdx) -> Vec<Point> {
        self.boundary(f);
        let mesh = &self.mesh;
        mesh.faces[f]
            .cache
            .boundary
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .map(|&v| mesh.point(v))
            .collect()
    }

    pub fn bounding_box(&mut self, f: FaceIdx) -> Aabb {
        if let Some(b) = self.mesh.faces[f].cache.bbox {
            return b;
        }
        let b = Aabb::from_points(&self.boundary_points(f));
        self.mesh.faces[f].cache.bbox = Some(b);
        b
    }

    /// External faces nested inside this face. Always empty for external
    /// faces.
    pub fn holes(&mut self, f: FaceIdx) -> &[FaceIdx] {
        if self.mesh.faces[f].cache.holes.is_none() {
            let holes = self.find_holes(f);
            self.mesh.faces[f].cache.holes = Some(holes);
        }
        self.mesh.faces[f].cache.holes.as_deref().unwrap_or(&[])
    }

    /// The hole test: `candidate` is external, strictly smaller than `outer`,
    /// boxed inside `outer`'s bounding box, and all its boundary vertices
    /// pass the crossing-number test against `outer`'s boundary.
    pub fn is_hole_of(&mut self, outer: FaceIdx, candidate: FaceIdx) -> bool {
        if outer == candidate || !self.is_external(candidate) {
            return false;
        }
        if self.area(outer) <= self.area(candidate).abs() {
            return false;
        }
        let outer_box = self.bounding_box(outer);
        if !outer_box.contains(&self.bounding_box(candidate)) {
            return false;
        }
        let polygon = self.boundary_points(outer);
        let points = self.boundary_points(candidate);
        points_in_polygon(&polygon, &points)
    }

    /// True when both boundaries are the same cyclic vertex sequence.
    pub fn faces_equal(&mut self, a: FaceIdx, b: FaceIdx) -> bool {
        let first = self.boundary(a).to_vec();
        cyclic_eq(&first, self.boundary(b))
    }

    /// Faces usable as polygons: internal faces plus zero-area faces.
    pub fn polygon_faces(&mut self) -> Vec<FaceIdx> {
        let faces: Vec<FaceIdx> = self.mesh.faces.handles().collect();
        faces.into_iter().filter(|&f| self.area(f) >= 0.0).collect()
    }

    pub(crate) fn invalidate_all_holes(&mut self) {
        for (_, face) in self.mesh.faces.iter_mut() {
            face.invalidate_holes();
        }
    }

    fn find_holes(&mut self, f: FaceIdx) -> Vec<FaceIdx> {
        if !self.is_internal(f) {
            return Vec::new();
        }
        let candidates: Vec<FaceIdx> = self.mesh.faces.handles().collect();
        let mut holes: Vec<FaceIdx> = candidates
            .iter()
            .copied()
            .filter(|&g| self.is_hole_of(f, g))
            .collect();

        if self.nearest_ancestor_holes && !holes.is_empty() {
            // Nested regions of a planar subdivision never cross, so a smaller
            // internal face that also accepts the hole sits between it and f.
            let area = self.area(f);
            let closer: Vec<FaceIdx> = candidates
                .into_iter()
                .filter(|&g| g != f && self.is_internal(g) && self.area(g) < area)
                .collect();
            holes.retain(|&h| !closer.iter().any(|&g| self.is_hole_of(g, h)));
        }
        holes
    }
}

/// Equality of `a` and `b` as cyclic sequences. Every rotation is tried, so
/// boundaries with repeated vertices compare correctly.
pub fn cyclic_eq<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let n = a.len();
    if n == 0 {
        return true;
    }
    (0..n).any(|offset| (0..n).all(|i| a[i] == b[(offset + i) % n]))
}
