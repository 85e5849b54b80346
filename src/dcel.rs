// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// The DCEL container: builds the half-edge structure from a planar
// straight-line graph and owns it for lookups, derived face properties and
// structural edits.
//
// Construction runs in four steps:
//   1. one vertex per input point
//   2. one half-edge pair per input edge, registered with both endpoints
//   3. per vertex: sort outgoing half-edges by descending angle, then link
//      twin(h_i).next = h_{i+1}
//   4. walk every unclaimed `next` cycle and make it a face
//
// With the descending sort, faces of positive area are traced
// counter-clockwise and the unbounded face and holes clockwise.

use tracing::debug;

use crate::error::{DcelError, DcelResult};
use crate::geom::{Point, Real};
use crate::mesh::{sym, EdgeIdx, Face, FaceIdx, HalfEdge, Mesh, VertIdx, Vertex, INVALID};

mod edit;
mod face;

pub use face::cyclic_eq;

// ─────────────────────────────── Public types ──────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DcelOption {
    /// Attach each hole only to the smallest internal face containing it,
    /// instead of to every containing face.
    NearestAncestorHoles,
}

// ─────────────────────────────── Dcel ──────────────────────────────────────────

#[derive(Debug)]
pub struct Dcel {
    mesh: Mesh,
    nearest_ancestor_holes: bool,
}

impl Dcel {
    /// An empty graph.
    pub fn new() -> Self {
        Dcel {
            mesh: Mesh::new(),
            nearest_ancestor_holes: false,
        }
    }

    /// Build the subdivision of `points` joined by `edges` (pairs of indices
    /// into `points`).
    pub fn from_points_edges<P>(points: &[P], edges: &[[usize; 2]]) -> DcelResult<Self>
    where
        P: Copy + Into<Point>,
    {
        let mut dcel = Dcel::new();
        dcel.set_data(points, edges)?;
        Ok(dcel)
    }

    /// Replace the whole graph. On error the previous contents are kept.
    pub fn set_data<P>(&mut self, points: &[P], edges: &[[usize; 2]]) -> DcelResult<()>
    where
        P: Copy + Into<Point>,
    {
        let points: Vec<Point> = points.iter().map(|&p| p.into()).collect();
        let mesh = build_mesh(&points, edges)?;
        debug!(
            vertices = mesh.verts.len(),
            half_edges = mesh.edges.len(),
            faces = mesh.faces.len(),
            "subdivision built"
        );
        self.mesh = mesh;
        Ok(())
    }

    pub fn set_option(&mut self, option: DcelOption, value: bool) {
        match option {
            DcelOption::NearestAncestorHoles => self.nearest_ancestor_holes = value,
        }
        self.invalidate_all_holes();
    }

    pub fn option(&self, option: DcelOption) -> bool {
        match option {
            DcelOption::NearestAncestorHoles => self.nearest_ancestor_holes,
        }
    }

    /// Drop every vertex, half-edge and face.
    pub fn clear(&mut self) {
        self.mesh.clear();
    }

    // ─────── Collections ──────────────────────────────────────────────────────

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn vertex_count(&self) -> usize { self.mesh.verts.len() }
    pub fn half_edge_count(&self) -> usize { self.mesh.edges.len() }
    pub fn face_count(&self) -> usize { self.mesh.faces.len() }

    pub fn vertex_ids(&self) -> impl Iterator<Item = VertIdx> + '_ {
        self.mesh.verts.handles()
    }

    pub fn half_edge_ids(&self) -> impl Iterator<Item = EdgeIdx> + '_ {
        self.mesh.edges.handles()
    }

    pub fn face_ids(&self) -> impl Iterator<Item = FaceIdx> + '_ {
        self.mesh.faces.handles()
    }

    // ─────── Element access ───────────────────────────────────────────────────
    //
    // These panic on a handle that is not live, like slice indexing.

    pub fn vertex(&self, v: VertIdx) -> &Vertex { &self.mesh.verts[v] }
    pub fn half_edge(&self, e: EdgeIdx) -> &HalfEdge { &self.mesh.edges[e] }
    pub fn face(&self, f: FaceIdx) -> &Face { &self.mesh.faces[f] }
    pub fn point(&self, v: VertIdx) -> Point { self.mesh.point(v) }

    pub fn twin(&self, e: EdgeIdx) -> EdgeIdx {
        debug_assert!(self.mesh.edges.contains(sym(e)));
        sym(e)
    }

    pub fn next(&self, e: EdgeIdx) -> EdgeIdx { self.mesh.edges[e].next }
    pub fn prev(&self, e: EdgeIdx) -> EdgeIdx { self.mesh.edges[e].prev }
    pub fn origin(&self, e: EdgeIdx) -> VertIdx { self.mesh.edges[e].origin }
    pub fn destination(&self, e: EdgeIdx) -> VertIdx { self.mesh.dst(e) }
    pub fn face_of(&self, e: EdgeIdx) -> FaceIdx { self.mesh.edges[e].face }

    /// Half-edges of the boundary of `f`, starting at its wedge.
    pub fn face_half_edges(&self, f: FaceIdx) -> Vec<EdgeIdx> {
        self.mesh.ring(self.mesh.faces[f].wedge).collect()
    }

    // ─────── Lookup ───────────────────────────────────────────────────────────

    /// Vertex at exactly (x, y).
    pub fn find_vertex(&self, x: Real, y: Real) -> DcelResult<VertIdx> {
        self.mesh
            .find_vertex(Point::new(x, y))
            .ok_or(DcelError::VertexNotFound { x, y })
    }

    /// Half-edge running from exactly (x1, y1) to exactly (x2, y2).
    pub fn find_half_edge(&self, x1: Real, y1: Real, x2: Real, y2: Real) -> DcelResult<EdgeIdx> {
        let from = Point::new(x1, y1);
        let to = Point::new(x2, y2);
        self.mesh
            .find_half_edge(from, to)
            .ok_or(DcelError::EdgeNotFound { from, to })
    }

    /// Check every structural invariant of the graph.
    pub fn validate(&self) -> DcelResult<()> {
        self.mesh.validate()
    }
}

impl Default for Dcel {
    fn default() -> Self {
        Self::new()
    }
}

fn build_mesh(points: &[Point], edges: &[[usize; 2]]) -> DcelResult<Mesh> {
    let mut mesh = Mesh::new();

    // Step 1: vertices
    let mut verts = Vec::with_capacity(points.len());
    for (i, &p) in points.iter().enumerate() {
        if !p.is_finite() {
            return Err(DcelError::InvalidInput {
                reason: format!("point {} has a non-finite coordinate {}", i, p),
            });
        }
        verts.push(mesh.make_vertex(p));
    }

    // Step 2: half-edge pairs
    for (i, &[a, b]) in edges.iter().enumerate() {
        let (va, vb) = match (verts.get(a), verts.get(b)) {
            (Some(&va), Some(&vb)) => (va, vb),
            _ => {
                return Err(DcelError::InvalidInput {
                    reason: format!(
                        "edge {} ({}, {}) is out of range for {} points",
                        i,
                        a,
                        b,
                        points.len()
                    ),
                })
            }
        };
        let e = mesh.make_edge_pair(va, vb)?;
        mesh.verts[va].incident.push(e);
        mesh.verts[vb].incident.push(sym(e));
    }

    // Step 3: angular order and next/prev rings
    for &v in &verts {
        mesh.sort_incident(v);
        mesh.link_vertex_ring(v);
    }

    // Step 4: one face per cycle
    let half_edges: Vec<EdgeIdx> = mesh.edges.handles().collect();
    for e in half_edges {
        if mesh.edges[e].face == INVALID {
            mesh.make_face(e);
        }
    }

    Ok(mesh)
}
