// Copyright 2025 Lars Brubaker
// Structural invariants under random sequences of edits on grid graphs.

mod helpers;

use std::collections::HashMap;

use dcel_rust::geom::shoelace;
use dcel_rust::{Dcel, FaceIdx, VertIdx};
use helpers::{assert_invariants, grid, total_signed_area};
use proptest::prelude::*;

#[derive(Clone, Copy, Debug)]
enum Edit {
    Remove(usize),
    Split(usize),
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (0usize..1000).prop_map(Edit::Remove),
        (0usize..1000).prop_map(Edit::Split),
    ]
}

/// Connected components among vertices that have at least one edge.
fn component_count(dcel: &Dcel) -> usize {
    let verts: Vec<VertIdx> = dcel
        .vertex_ids()
        .filter(|&v| dcel.vertex(v).degree() > 0)
        .collect();
    let slot: HashMap<VertIdx, usize> = verts.iter().enumerate().map(|(i, &v)| (v, i)).collect();
    let mut parent: Vec<usize> = (0..verts.len()).collect();

    fn root(parent: &mut [usize], mut i: usize) -> usize {
        while parent[i] != i {
            parent[i] = parent[parent[i]];
            i = parent[i];
        }
        i
    }

    for e in dcel.half_edge_ids() {
        let a = root(&mut parent, slot[&dcel.origin(e)]);
        let b = root(&mut parent, slot[&dcel.destination(e)]);
        parent[a] = b;
    }
    (0..verts.len()).filter(|&i| root(&mut parent, i) == i).count()
}

fn check(dcel: &mut Dcel) {
    assert_invariants(dcel);

    let edges = dcel.half_edge_count() / 2;
    let verts = dcel
        .vertex_ids()
        .filter(|&v| dcel.vertex(v).degree() > 0)
        .count();
    // Euler per component: V - E + F = 2, each with its own unbounded face.
    assert_eq!(
        dcel.face_count() + verts,
        edges + 2 * component_count(dcel),
        "Euler relation broken"
    );

    assert!(total_signed_area(dcel).abs() < 1e-9);

    // Cached areas match a fresh walk of the boundary.
    let faces: Vec<FaceIdx> = dcel.face_ids().collect();
    for f in faces {
        let cached = dcel.area(f);
        let fresh = shoelace(dcel.boundary_points(f));
        assert!((cached - fresh).abs() < 1e-9, "stale area on face {}", f);
        for h in dcel.holes(f).to_vec() {
            assert!(dcel.is_external(h));
            assert!(dcel.is_internal(f));
        }
    }
}

fn apply(dcel: &mut Dcel, edit: Edit) {
    let ids: Vec<_> = dcel.half_edge_ids().collect();
    if ids.is_empty() {
        return;
    }
    let pick = match edit {
        Edit::Remove(i) | Edit::Split(i) => ids[i % ids.len()],
    };
    let p = dcel.point(dcel.origin(pick));
    let q = dcel.point(dcel.destination(pick));
    match edit {
        Edit::Remove(_) => dcel.remove_edge(p.x, p.y, q.x, q.y).unwrap(),
        Edit::Split(_) => {
            let mid = ((p.x + q.x) / 2.0, (p.y + q.y) / 2.0);
            let s = dcel.split_edge(p.x, p.y, q.x, q.y, mid.0, mid.1).unwrap();
            assert_eq!(dcel.vertex(s).degree(), 2);
        }
    }
}

#[test]
fn grid_starts_consistent() {
    let (points, edges) = grid(3, 2);
    let mut dcel = Dcel::from_points_edges(&points, &edges).unwrap();
    assert_eq!(dcel.face_count(), 7);
    check(&mut dcel);
}

proptest! {
    #[test]
    fn random_edits_keep_the_structure_valid(
        n in 1usize..4,
        m in 1usize..4,
        edits in prop::collection::vec(edit(), 0..16),
    ) {
        let (points, edges) = grid(n, m);
        let mut dcel = Dcel::from_points_edges(&points, &edges).unwrap();
        check(&mut dcel);
        for e in edits {
            apply(&mut dcel, e);
            check(&mut dcel);
        }
    }

    #[test]
    fn removing_every_edge_empties_the_graph(n in 1usize..4, m in 1usize..4, seed in 0usize..1000) {
        let (points, edges) = grid(n, m);
        let mut dcel = Dcel::from_points_edges(&points, &edges).unwrap();
        let mut k = seed;
        while dcel.half_edge_count() > 0 {
            apply(&mut dcel, Edit::Remove(k));
            k = k.wrapping_mul(31).wrapping_add(7);
        }
        check(&mut dcel);
        prop_assert_eq!(dcel.vertex_count(), 0);
        prop_assert_eq!(dcel.face_count(), 0);
    }
}
