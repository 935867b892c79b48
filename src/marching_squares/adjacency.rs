use std::collections::HashMap;

use crate::error::MeshGenError;

use super::types::{Triangle, VertexIndex};

/// Vertex index -> every triangle that references it.
///
/// Append-only; built while triangles are emitted.
#[derive(Clone, Debug, Default)]
pub struct AdjacencyIndex {
    triangles: HashMap<VertexIndex, Vec<Triangle>>,
}

impl AdjacencyIndex {
    pub fn new() -> Self {
        Self {
            triangles: HashMap::new(),
        }
    }

    /// Register `triangle` under each of its three vertices.
    pub fn register(&mut self, triangle: Triangle) {
        for vertex in triangle.vertices() {
            self.triangles.entry(vertex).or_default().push(triangle);
        }
    }

    /// Triangles touching `vertex`, in registration order.
    pub fn triangles_for(&self, vertex: VertexIndex) -> Result<&[Triangle], MeshGenError> {
        self.triangles
            .get(&vertex)
            .map(Vec::as_slice)
            .ok_or_else(|| {
                MeshGenError::internal_invariant(format!(
                    "vertex {} is missing from the adjacency index",
                    vertex
                ))
            })
    }

    /// How many triangles use the edge `(a, b)`, capped at 2.
    pub fn shared_triangle_count(&self, a: VertexIndex, b: VertexIndex) -> Result<usize, MeshGenError> {
        let mut shared = 0;
        for triangle in self.triangles_for(a)? {
            if triangle.contains(b) {
                shared += 1;
                if shared > 1 {
                    break;
                }
            }
        }
        Ok(shared)
    }

    /// An edge is on the outline when exactly one triangle uses it.
    pub fn is_outline_edge(&self, a: VertexIndex, b: VertexIndex) -> Result<bool, MeshGenError> {
        Ok(self.shared_triangle_count(a, b)? == 1)
    }
}
