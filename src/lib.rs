// dcel-rust: doubly-connected edge list for planar straight-line graphs
// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)

pub mod aabb;
pub mod arena;
pub mod dcel;
pub mod error;
pub mod geom;
pub mod mesh;

pub use aabb::Aabb;
pub use dcel::{cyclic_eq, Dcel, DcelOption};
pub use error::{DcelError, DcelResult};
pub use geom::{Point, Real};
pub use mesh::{EdgeIdx, FaceIdx, VertIdx};
