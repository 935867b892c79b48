use std::collections::HashMap;

use super::types::VertexIndex;

/// Edge usage summary for an indexed triangle list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgeReport {
    /// Edges used by exactly one triangle, as `(min, max)` pairs, sorted.
    pub boundary_edges: Vec<(VertexIndex, VertexIndex)>,
    /// Edges shared by exactly two triangles.
    pub interior_edge_count: usize,
    /// Edges used by three or more triangles.
    pub non_manifold_edges: Vec<(VertexIndex, VertexIndex)>,
}

impl EdgeReport {
    pub fn is_manifold(&self) -> bool {
        self.non_manifold_edges.is_empty()
    }

    pub fn boundary_edge_count(&self) -> usize {
        self.boundary_edges.len()
    }
}

/// Canonical edge key: (A,B) == (B,A).
fn edge_key(a: VertexIndex, b: VertexIndex) -> (VertexIndex, VertexIndex) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Count how many triangles use each edge of `indices`.
///
/// A trailing partial triangle is ignored.
pub fn validate_edges(indices: &[VertexIndex]) -> EdgeReport {
    let mut edge_counts: HashMap<(VertexIndex, VertexIndex), u32> = HashMap::new();

    for tri in indices.chunks_exact(3) {
        let (v0, v1, v2) = (tri[0], tri[1], tri[2]);
        for (a, b) in [(v0, v1), (v1, v2), (v2, v0)] {
            *edge_counts.entry(edge_key(a, b)).or_insert(0) += 1;
        }
    }

    let mut report = EdgeReport::default();
    for (edge, count) in edge_counts {
        match count {
            1 => report.boundary_edges.push(edge),
            2 => report.interior_edge_count += 1,
            _ => report.non_manifold_edges.push(edge),
        }
    }
    report.boundary_edges.sort_unstable();
    report.non_manifold_edges.sort_unstable();
    report
}
