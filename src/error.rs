// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Error type shared by construction, lookups and edits.

use thiserror::Error;

use crate::geom::{Point, Real};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DcelError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("degenerate edge: both endpoints at ({x}, {y})")]
    DegenerateEdge { x: Real, y: Real },

    #[error("no half-edge from {from} to {to}")]
    EdgeNotFound { from: Point, to: Point },

    #[error("no vertex at ({x}, {y})")]
    VertexNotFound { x: Real, y: Real },

    #[error("inconsistent structure: {reason}")]
    Inconsistent { reason: String },
}

pub type DcelResult<T> = Result<T, DcelError>;
