// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Element storage for the half-edge structure.
//
// All references between vertices, half-edges and faces are u32 handles into
// the three arenas owned by `Mesh`.
//
// Design:
//   - INVALID: u32::MAX marks a link that has not been set yet.
//   - Half-edges are allocated in pairs: edges[i] and edges[i ^ 1] are twins.
//     sym(e) = e ^ 1.  Even index = e, odd index = eSym.
//   - Vertex::incident lists the half-edges leaving the vertex, sorted by
//     descending direction angle once the rings are linked.
//   - Walking `next` from any half-edge returns to it; each such cycle is the
//     boundary of exactly one face.

use smallvec::SmallVec;
use tracing::trace;

use crate::aabb::Aabb;
use crate::arena::Arena;
use crate::error::{DcelError, DcelResult};
use crate::geom::{edge_angle, edge_length, Point, Real};

pub const INVALID: u32 = u32::MAX;

/// Handle of a vertex in `Mesh::verts`.
pub type VertIdx = u32;
/// Handle of a half-edge in `Mesh::edges`.
pub type EdgeIdx = u32;
/// Handle of a face in `Mesh::faces`.
pub type FaceIdx = u32;

/// The twin half-edge (always the other element of the pair).
#[inline(always)]
pub fn sym(e: EdgeIdx) -> EdgeIdx {
    e ^ 1
}

pub type Incidence = SmallVec<[EdgeIdx; 4]>;

#[derive(Clone, Debug)]
pub struct Vertex {
    pub point: Point,
    pub(crate) incident: Incidence,
}

impl Vertex {
    pub fn new(point: Point) -> Self {
        Vertex {
            point,
            incident: Incidence::new(),
        }
    }

    /// Half-edges leaving this vertex, in ring order.
    pub fn incident(&self) -> &[EdgeIdx] {
        &self.incident
    }

    pub fn degree(&self) -> usize {
        self.incident.len()
    }
}

#[derive(Clone, Debug)]
pub struct HalfEdge {
    /// Vertex this half-edge leaves from.
    pub origin: VertIdx,
    pub face: FaceIdx,
    /// Next half-edge along the face boundary.
    pub next: EdgeIdx,
    /// Previous half-edge along the face boundary.
    pub prev: EdgeIdx,
    /// Direction angle in [0, 2π).
    pub angle: Real,
    pub length: Real,
}

impl HalfEdge {
    fn new(origin: VertIdx, angle: Real, length: Real) -> Self {
        HalfEdge {
            origin,
            face: INVALID,
            next: INVALID,
            prev: INVALID,
            angle,
            length,
        }
    }
}

/// Lazily derived face properties. `None` means dirty.
#[derive(Clone, Debug, Default)]
pub(crate) struct FaceCache {
    pub(crate) area: Option<Real>,
    pub(crate) boundary: Option<Vec<VertIdx>>,
    pub(crate) bbox: Option<Aabb>,
    pub(crate) holes: Option<Vec<FaceIdx>>,
}

#[derive(Clone, Debug)]
pub struct Face {
    /// Representative half-edge; its `next` cycle is the face boundary.
    pub wedge: EdgeIdx,
    pub(crate) cache: FaceCache,
}

impl Face {
    pub fn new(wedge: EdgeIdx) -> Self {
        Face {
            wedge,
            cache: FaceCache::default(),
        }
    }

    pub fn cached_area(&self) -> Option<Real> {
        self.cache.area
    }

    pub fn cached_boundary(&self) -> Option<&[VertIdx]> {
        self.cache.boundary.as_deref()
    }

    pub fn cached_bounding_box(&self) -> Option<Aabb> {
        self.cache.bbox
    }

    pub fn cached_holes(&self) -> Option<&[FaceIdx]> {
        self.cache.holes.as_deref()
    }

    /// Drop everything derived from the boundary ring.
    pub(crate) fn invalidate_boundary(&mut self) {
        self.cache.area = None;
        self.cache.boundary = None;
        self.cache.bbox = None;
    }

    pub(crate) fn invalidate_holes(&mut self) {
        self.cache.holes = None;
    }
}

/// Iterator over a `next` cycle, starting at (and yielding) `start`.
///
/// Stops after at most `edges.len()` steps so a damaged ring cannot loop
/// forever.
pub struct Ring<'a> {
    edges: &'a Arena<HalfEdge>,
    start: EdgeIdx,
    cur: EdgeIdx,
    remaining: usize,
}

impl<'a> Ring<'a> {
    pub fn new(edges: &'a Arena<HalfEdge>, start: EdgeIdx) -> Self {
        Ring {
            edges,
            start,
            cur: start,
            remaining: edges.len(),
        }
    }
}

impl<'a> Iterator for Ring<'a> {
    type Item = EdgeIdx;

    fn next(&mut self) -> Option<EdgeIdx> {
        if self.remaining == 0 || self.cur == INVALID {
            return None;
        }
        let e = self.cur;
        let next = self.edges.get(e)?.next;
        self.remaining -= 1;
        self.cur = if next == self.start { INVALID } else { next };
        Some(e)
    }
}

/// The half-edge structure.
#[derive(Debug)]
pub struct Mesh {
    pub verts: Arena<Vertex>,
    pub edges: Arena<HalfEdge>,
    pub faces: Arena<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Mesh {
            verts: Arena::new(),
            edges: Arena::new(),
            faces: Arena::new(),
        }
    }

    // ──────────────── Navigation helpers ────────────────

    /// Destination vertex of e (= origin of its twin).
    #[inline]
    pub fn dst(&self, e: EdgeIdx) -> VertIdx {
        self.edges[sym(e)].origin
    }

    #[inline]
    pub fn point(&self, v: VertIdx) -> Point {
        self.verts[v].point
    }

    pub fn ring(&self, start: EdgeIdx) -> Ring<'_> {
        Ring::new(&self.edges, start)
    }

    // ──────────────── Allocation ────────────────

    pub fn make_vertex(&mut self, point: Point) -> VertIdx {
        self.verts.alloc(Vertex::new(point))
    }

    /// Allocate the pair `org -> dst` / `dst -> org`. Returns the half-edge
    /// leaving `org`; its twin is `e ^ 1`. Incidence lists are left untouched.
    pub fn make_edge_pair(&mut self, org: VertIdx, dst: VertIdx) -> DcelResult<EdgeIdx> {
        let p = self.point(org);
        let q = self.point(dst);
        let forward = edge_angle(p, q)?;
        let backward = edge_angle(q, p)?;
        let length = edge_length(p, q);

        debug_assert!(self.edges.next_handle() % 2 == 0, "half-edge pairs out of step");
        let e = self.edges.alloc(HalfEdge::new(org, forward, length));
        self.edges.alloc(HalfEdge::new(dst, backward, length));
        Ok(e)
    }

    /// Create a face for the cycle through `wedge` and claim every half-edge
    /// on it.
    pub fn make_face(&mut self, wedge: EdgeIdx) -> FaceIdx {
        let f = self.faces.alloc(Face::new(wedge));
        let mut e = wedge;
        loop {
            self.edges[e].face = f;
            e = self.edges[e].next;
            if e == wedge {
                break;
            }
        }
        trace!(face = f, wedge, "face created");
        f
    }

    pub fn kill_face(&mut self, f: FaceIdx) {
        self.faces.free(f);
    }

    pub fn kill_vertex(&mut self, v: VertIdx) {
        self.verts.free(v);
    }

    /// Free the pair containing `e`.
    pub fn kill_edge_pair(&mut self, e: EdgeIdx) {
        self.edges.free(e);
        self.edges.free(sym(e));
    }

    // ──────────────── Ring construction ────────────────

    /// Sort the vertex's outgoing half-edges by descending angle.
    pub fn sort_incident(&mut self, v: VertIdx) {
        let edges = &self.edges;
        self.verts[v]
            .incident
            .sort_by(|&a, &b| edges[b].angle.total_cmp(&edges[a].angle));
    }

    /// Link `twin(h_i).next = h_{i+1}` around the vertex. A single outgoing
    /// half-edge becomes a spur: its twin turns straight back into it.
    pub fn link_vertex_ring(&mut self, v: VertIdx) {
        let incident = self.verts[v].incident.clone();
        let k = incident.len();
        for i in 0..k {
            let h = incident[i];
            let h_next = incident[(i + 1) % k];
            self.edges[sym(h)].next = h_next;
            self.edges[h_next].prev = sym(h);
        }
    }

    /// Remove `e` from its origin's incidence list and close the gap in the
    /// ring. Deletes the vertex (returning false) when nothing else leaves it.
    pub fn detach_from_origin(&mut self, e: EdgeIdx) -> bool {
        let v = self.edges[e].origin;
        let neighbours = {
            let incident = &mut self.verts[v].incident;
            match incident.iter().position(|&h| h == e) {
                Some(idx) => {
                    incident.remove(idx);
                    let len = incident.len();
                    if len == 0 {
                        None
                    } else {
                        Some((incident[(idx + len - 1) % len], incident[idx % len]))
                    }
                }
                None => return true,
            }
        };

        match neighbours {
            Some((before, after)) => {
                self.edges[sym(before)].next = after;
                self.edges[after].prev = sym(before);
                true
            }
            None => {
                self.kill_vertex(v);
                false
            }
        }
    }

    /// Replace `old` with `new` in the incidence list of `v`, keeping its slot.
    pub fn replace_incident(&mut self, v: VertIdx, old: EdgeIdx, new: EdgeIdx) {
        for h in self.verts[v].incident.iter_mut() {
            if *h == old {
                *h = new;
            }
        }
    }

    // ──────────────── Lookup ────────────────

    pub fn find_vertex(&self, p: Point) -> Option<VertIdx> {
        self.verts
            .iter()
            .find(|(_, v)| v.point.x == p.x && v.point.y == p.y)
            .map(|(i, _)| i)
    }

    pub fn find_half_edge(&self, from: Point, to: Point) -> Option<EdgeIdx> {
        self.edges
            .iter()
            .find(|&(e, h)| {
                let p = self.point(h.origin);
                let q = self.point(self.dst(e));
                p.x == from.x && p.y == from.y && q.x == to.x && q.y == to.y
            })
            .map(|(e, _)| e)
    }

    pub fn clear(&mut self) {
        self.verts.clear();
        self.edges.clear();
        self.faces.clear();
    }

    // ──────────────── Consistency ────────────────

    /// Check every structural invariant, reporting the first violation.
    pub fn validate(&self) -> DcelResult<()> {
        fn fail<T>(reason: String) -> DcelResult<T> {
            Err(DcelError::Inconsistent { reason })
        }

        for (e, h) in self.edges.iter() {
            let twin = sym(e);
            if !self.edges.contains(twin) {
                return fail(format!("half-edge {} has no twin", e));
            }
            if !self.verts.contains(h.origin) {
                return fail(format!("half-edge {} leaves dead vertex {}", e, h.origin));
            }
            if !self.edges.contains(h.next) || !self.edges.contains(h.prev) {
                return fail(format!("half-edge {} has a dead ring link", e));
            }
            if self.edges[h.next].prev != e || self.edges[h.prev].next != e {
                return fail(format!("ring links around half-edge {} disagree", e));
            }
            if self.edges[h.next].origin != self.dst(e) {
                return fail(format!("half-edge {} is not followed from its destination", e));
            }
            if !self.faces.contains(h.face) {
                return fail(format!("half-edge {} belongs to dead face {}", e, h.face));
            }
            if !self.verts[h.origin].incident.contains(&e) {
                return fail(format!("half-edge {} missing from vertex {}", e, h.origin));
            }
        }

        // Isolated input points are legal vertices with an empty list.
        for (v, vert) in self.verts.iter() {
            for (i, &h) in vert.incident.iter().enumerate() {
                match self.edges.get(h) {
                    Some(he) if he.origin == v => {}
                    _ => return fail(format!("vertex {} lists foreign half-edge {}", v, h)),
                }
                if vert.incident[..i].contains(&h) {
                    return fail(format!("vertex {} lists half-edge {} twice", v, h));
                }
            }
        }

        let mut walked = 0usize;
        for (f, face) in self.faces.iter() {
            match self.edges.get(face.wedge) {
                Some(h) if h.face == f => {}
                _ => return fail(format!("face {} has a foreign wedge {}", f, face.wedge)),
            }
            let mut len = 0usize;
            let mut last = face.wedge;
            for e in self.ring(face.wedge) {
                if self.edges[e].face != f {
                    return fail(format!("half-edge {} on face {} claims another face", e, f));
                }
                len += 1;
                last = e;
            }
            if self.edges[last].next != face.wedge {
                return fail(format!("face {} boundary does not close", f));
            }
            walked += len;
        }
        if walked != self.edges.len() {
            return fail(format!(
                "faces cover {} of {} half-edges",
                walked,
                self.edges.len()
            ));
        }
        Ok(())
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
