// Copyright 2025 Lars Brubaker
// Structural edits: removing and splitting edges.
//
// Both edits locate and validate their target before touching the graph, so
// a failed call leaves it exactly as it was.

use smallvec::SmallVec;
use tracing::debug;

use super::Dcel;
use crate::error::{DcelError, DcelResult};
use crate::geom::{edge_angle, Point, Real};
use crate::mesh::{sym, EdgeIdx, FaceIdx, Mesh, VertIdx};

impl Dcel {
    /// Remove the undirected edge between (x1, y1) and (x2, y2).
    ///
    /// The one or two faces bordering the edge are replaced by faces
    /// re-derived from the rings that continued past it. An endpoint left
    /// without edges is deleted.
    pub fn remove_edge(&mut self, x1: Real, y1: Real, x2: Real, y2: Real) -> DcelResult<()> {
        let e = self.find_half_edge(x1, y1, x2, y2).map_err(|err| {
            debug!(x1, y1, x2, y2, "remove_edge: no such edge");
            err
        })?;
        let t = sym(e);
        let mesh = &mut self.mesh;

        let head1 = mesh.edges[e].next;
        let head2 = mesh.edges[t].next;

        let f1 = mesh.edges[e].face;
        let f2 = mesh.edges[t].face;
        mesh.kill_face(f1);
        if f2 != f1 {
            mesh.kill_face(f2);
        }

        // head2 leaves e's origin and head1 leaves t's origin.
        let keep_head2 = mesh.detach_from_origin(e);
        let keep_head1 = mesh.detach_from_origin(t);
        mesh.kill_edge_pair(e);

        let mut created: SmallVec<[FaceIdx; 2]> = SmallVec::new();
        if keep_head1 {
            created.push(mesh.make_face(head1));
        }
        if keep_head2 {
            match created.first() {
                // Both heads on one ring: the two old boundaries merged, and
                // the second face would be boundary-equal to the first.
                Some(&face1) if mesh.edges[head2].face == face1 => {}
                _ => created.push(mesh.make_face(head2)),
            }
        }

        self.invalidate_all_holes();
        debug!(
            from = %Point::new(x1, y1),
            to = %Point::new(x2, y2),
            removed_faces = if f1 == f2 { 1 } else { 2 },
            created_faces = created.len(),
            "edge removed"
        );
        Ok(())
    }

    /// Insert a vertex at (x, y) on the edge between (x1, y1) and (x2, y2),
    /// replacing its two half-edges with four. Faces keep their identity.
    /// Returns the new vertex.
    pub fn split_edge(
        &mut self,
        x1: Real,
        y1: Real,
        x2: Real,
        y2: Real,
        x: Real,
        y: Real,
    ) -> DcelResult<VertIdx> {
        let e = self.find_half_edge(x1, y1, x2, y2).map_err(|err| {
            debug!(x1, y1, x2, y2, "split_edge: no such edge");
            err
        })?;
        let split = Point::new(x, y);
        if !split.is_finite() {
            debug!(x, y, "split_edge: split point is not finite");
            return Err(DcelError::InvalidInput {
                reason: format!("split point {} is not finite", split),
            });
        }
        let t = sym(e);
        let a = self.mesh.edges[e].origin;
        let b = self.mesh.edges[t].origin;
        edge_angle(self.mesh.point(a), split)
            .and_then(|_| edge_angle(split, self.mesh.point(b)))
            .map_err(|err| {
                debug!(x, y, "split_edge: split point is an endpoint");
                err
            })?;
        if let Some(other) = self.mesh.find_vertex(split) {
            debug!(x, y, vertex = other, "split_edge: split point is an existing vertex");
            return Err(DcelError::InvalidInput {
                reason: format!("split point {} is already vertex {}", split, other),
            });
        }

        let mesh = &mut self.mesh;
        let s = mesh.make_vertex(split);
        // h1: a -> s, h4: s -> a, h2: s -> b, h3: b -> s
        let h1 = mesh.make_edge_pair(a, s)?;
        let h2 = mesh.make_edge_pair(s, b)?;
        let h3 = sym(h2);
        let h4 = sym(h1);

        let fe = mesh.edges[e].face;
        let ft = mesh.edges[t].face;
        if mesh.faces[fe].wedge == e {
            mesh.faces[fe].wedge = h1;
        }
        if mesh.faces[ft].wedge == t {
            mesh.faces[ft].wedge = h3;
        }
        mesh.edges[h1].face = fe;
        mesh.edges[h2].face = fe;
        mesh.edges[h3].face = ft;
        mesh.edges[h4].face = ft;

        // A ring link pointing at the other half of the old edge means a spur
        // at that end; the new pair turns back through the split vertex.
        let e_prev = mesh.edges[e].prev;
        let e_next = mesh.edges[e].next;
        let t_prev = mesh.edges[t].prev;
        let t_next = mesh.edges[t].next;

        link(mesh, h1, h2);
        link(mesh, h3, h4);
        link(mesh, if e_prev != t { e_prev } else { h4 }, h1);
        link(mesh, h2, if e_next != t { e_next } else { h3 });
        link(mesh, if t_prev != e { t_prev } else { h2 }, h3);
        link(mesh, h4, if t_next != e { t_next } else { h1 });

        mesh.verts[s].incident.push(h2);
        mesh.verts[s].incident.push(h4);
        mesh.sort_incident(s);
        mesh.replace_incident(a, e, h1);
        mesh.replace_incident(b, t, h3);
        mesh.kill_edge_pair(e);

        mesh.faces[fe].invalidate_boundary();
        mesh.faces[ft].invalidate_boundary();
        self.invalidate_all_holes();

        debug!(
            from = %Point::new(x1, y1),
            to = %Point::new(x2, y2),
            at = %split,
            vertex = s,
            "edge split"
        );
        Ok(s)
    }
}

#[inline]
fn link(mesh: &mut Mesh, from: EdgeIdx, to: EdgeIdx) {
    mesh.edges[from].next = to;
    mesh.edges[to].prev = from;
}
