// Copyright 2025 Lars Brubaker
// Shared test utilities for dcel-rust tests.

#![allow(dead_code)]

use std::collections::HashSet;

use dcel_rust::{Dcel, FaceIdx, Real};

/// The 4x4 square (0,0)-(4,4).
pub fn square() -> Dcel {
    Dcel::from_points_edges(
        &[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]],
        &[[0, 1], [1, 2], [2, 3], [3, 0]],
    )
    .expect("square builds")
}

/// A 10x10 square with a disjoint 2x2 square inside it.
pub fn square_with_hole() -> Dcel {
    Dcel::from_points_edges(
        &[
            [0.0, 0.0],
            [10.0, 0.0],
            [10.0, 10.0],
            [0.0, 10.0],
            [4.0, 4.0],
            [6.0, 4.0],
            [6.0, 6.0],
            [4.0, 6.0],
        ],
        &[
            [0, 1],
            [1, 2],
            [2, 3],
            [3, 0],
            [4, 5],
            [5, 6],
            [6, 7],
            [7, 4],
        ],
    )
    .expect("square with hole builds")
}

/// Three disjoint concentric squares with half-widths 6, 4 and 1 around the
/// origin: areas 144, 64 and 4.
pub fn nested_squares() -> Dcel {
    let mut points = Vec::new();
    let mut edges = Vec::new();
    for r in [6.0, 4.0, 1.0] {
        let base = points.len();
        points.extend_from_slice(&[[-r, -r], [r, -r], [r, r], [-r, r]]);
        for i in 0..4 {
            edges.push([base + i, base + (i + 1) % 4]);
        }
    }
    Dcel::from_points_edges(&points, &edges).expect("nested squares build")
}

/// Points and edges of an n x m grid of unit cells.
pub fn grid(n: usize, m: usize) -> (Vec<[Real; 2]>, Vec<[usize; 2]>) {
    let idx = |i: usize, j: usize| j * (n + 1) + i;
    let mut points = Vec::new();
    for j in 0..=m {
        for i in 0..=n {
            points.push([i as Real, j as Real]);
        }
    }
    let mut edges = Vec::new();
    for j in 0..=m {
        for i in 0..=n {
            if i < n {
                edges.push([idx(i, j), idx(i + 1, j)]);
            }
            if j < m {
                edges.push([idx(i, j), idx(i, j + 1)]);
            }
        }
    }
    (points, edges)
}

/// The single face whose area is `area` (within 1e-9).
pub fn face_with_area(dcel: &mut Dcel, area: Real) -> FaceIdx {
    let faces: Vec<FaceIdx> = dcel.face_ids().collect();
    let matching: Vec<FaceIdx> = faces
        .into_iter()
        .filter(|&f| (dcel.area(f) - area).abs() < 1e-9)
        .collect();
    assert_eq!(matching.len(), 1, "expected exactly one face with area {}", area);
    matching[0]
}

/// Sorted face areas.
pub fn face_areas(dcel: &mut Dcel) -> Vec<Real> {
    let faces: Vec<FaceIdx> = dcel.face_ids().collect();
    let mut areas: Vec<Real> = faces.into_iter().map(|f| dcel.area(f)).collect();
    areas.sort_by(|a, b| a.total_cmp(b));
    areas
}

/// Check the structural invariants through the public API.
pub fn assert_invariants(dcel: &Dcel) {
    if let Err(err) = dcel.validate() {
        panic!("validate failed: {}", err);
    }

    for e in dcel.half_edge_ids() {
        let t = dcel.twin(e);
        assert_ne!(t, e, "half-edge {} is its own twin", e);
        assert_eq!(dcel.twin(t), e, "twin is not an involution at {}", e);
        assert_eq!(dcel.prev(dcel.next(e)), e, "next/prev disagree at {}", e);
        assert_eq!(
            dcel.origin(dcel.next(e)),
            dcel.destination(e),
            "ring of {} is not contiguous",
            e
        );
        assert_ne!(
            dcel.point(dcel.origin(e)),
            dcel.point(dcel.destination(e)),
            "half-edge {} is degenerate",
            e
        );
    }

    // Every half-edge lies on exactly one face boundary.
    let mut seen = HashSet::new();
    for f in dcel.face_ids() {
        for e in dcel.face_half_edges(f) {
            assert_eq!(dcel.face_of(e), f, "half-edge {} claims the wrong face", e);
            assert!(seen.insert(e), "half-edge {} on two boundaries", e);
        }
    }
    assert_eq!(seen.len(), dcel.half_edge_count(), "faces do not cover the half-edges");

    // Incidence lists: outgoing, in descending angle order.
    for v in dcel.vertex_ids() {
        let incident = dcel.vertex(v).incident();
        for &h in incident {
            assert_eq!(dcel.origin(h), v);
        }
        for w in incident.windows(2) {
            assert!(
                dcel.half_edge(w[0]).angle >= dcel.half_edge(w[1]).angle,
                "vertex {} is not sorted",
                v
            );
        }
    }
}

/// Sum of the areas of every face. Each half-edge contributes to exactly one
/// face and its twin cancels it, so this is zero for any valid subdivision.
pub fn total_signed_area(dcel: &mut Dcel) -> Real {
    face_areas(dcel).into_iter().sum()
}
