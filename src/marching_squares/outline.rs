//! Boundary contour extraction.
//!
//! Walks the adjacency index along edges used by exactly one triangle and
//! collects each connected run into a closed loop of floor vertex indices.

use std::collections::HashSet;

use crate::error::MeshGenError;

use super::adjacency::AdjacencyIndex;
use super::types::VertexIndex;

/// Closed loop of floor vertex indices; the first index is repeated last.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outline {
    indices: Vec<VertexIndex>,
}

impl Outline {
    pub fn new(indices: Vec<VertexIndex>) -> Self {
        Self { indices }
    }

    pub fn indices(&self) -> &[VertexIndex] {
        &self.indices
    }

    pub fn is_closed(&self) -> bool {
        self.indices.len() >= 2 && self.indices.first() == self.indices.last()
    }

    /// Consecutive pairs, including the closing edge back to the start.
    pub fn edges(&self) -> impl Iterator<Item = (VertexIndex, VertexIndex)> + '_ {
        self.indices.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn edge_count(&self) -> usize {
        self.indices.len().saturating_sub(1)
    }
}

/// First unchecked vertex that shares an outline edge with `vertex`, scanning
/// triangles in registration order and each triangle's vertices in order.
fn connected_outline_vertex(
    adjacency: &AdjacencyIndex,
    checked: &HashSet<VertexIndex>,
    vertex: VertexIndex,
) -> Result<Option<VertexIndex>, MeshGenError> {
    for triangle in adjacency.triangles_for(vertex)? {
        for candidate in triangle.vertices() {
            if candidate == vertex || checked.contains(&candidate) {
                continue;
            }
            if adjacency.is_outline_edge(vertex, candidate)? {
                return Ok(Some(candidate));
            }
        }
    }
    Ok(None)
}

/// Trace every boundary contour of the floor mesh.
///
/// `interior` pre-seeds the checked set with vertices known to have no
/// outline edges. Vertices are scanned in ascending order; each unchecked
/// vertex with an outline neighbour starts a new loop that is followed until
/// no unchecked neighbour remains, then closed by repeating its start.
pub fn trace_outlines(
    adjacency: &AdjacencyIndex,
    vertex_count: usize,
    interior: &HashSet<VertexIndex>,
) -> Result<Vec<Outline>, MeshGenError> {
    let mut checked = interior.clone();
    let mut outlines = Vec::new();

    for start in 0..vertex_count as VertexIndex {
        if checked.contains(&start) {
            continue;
        }
        checked.insert(start);

        let Some(mut current) = connected_outline_vertex(adjacency, &checked, start)? else {
            continue;
        };

        let mut loop_indices = vec![start];
        loop {
            loop_indices.push(current);
            checked.insert(current);
            match connected_outline_vertex(adjacency, &checked, current)? {
                Some(next) => current = next,
                None => break,
            }
        }
        loop_indices.push(start);
        outlines.push(Outline::new(loop_indices));
    }

    Ok(outlines)
}
