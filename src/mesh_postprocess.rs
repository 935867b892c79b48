use godot::prelude::*;

use crate::error::MeshGenError;

/// Indexed triangle mesh handed to the renderer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffers {
    pub vertices: Vec<Vector3>,
    /// Per-vertex normals; empty when the mesh does not carry them.
    pub normals: Vec<Vector3>,
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            normals: Vec::new(),
            indices: Vec::with_capacity(index_count),
        }
    }

    pub fn from_parts(vertices: Vec<Vector3>, indices: Vec<u32>) -> Self {
        Self {
            vertices,
            normals: Vec::new(),
            indices,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    fn validate_indices(&self) -> Result<(), MeshGenError> {
        if self.indices.len() % 3 != 0 {
            return Err(MeshGenError::internal_invariant(format!(
                "index buffer length {} is not a multiple of 3",
                self.indices.len()
            )));
        }
        let vertex_count = self.vertices.len();
        if let Some(&bad) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(MeshGenError::internal_invariant(format!(
                "triangle references vertex {} but the mesh has {} vertices",
                bad, vertex_count
            )));
        }
        Ok(())
    }
}

/// Recompute per-vertex normals from triangle geometry.
///
/// Each face contributes its raw cross product, so larger faces weigh more.
/// Vertices with no (or only degenerate) faces get the up vector.
pub fn recompute_normals(mesh: &mut MeshBuffers) -> Result<(), MeshGenError> {
    mesh.validate_indices()?;

    let mut accumulated = vec![Vector3::ZERO; mesh.vertices.len()];
    for tri in mesh.indices.chunks_exact(3) {
        let i0 = tri[0] as usize;
        let i1 = tri[1] as usize;
        let i2 = tri[2] as usize;

        let v0 = mesh.vertices[i0];
        let edge1 = mesh.vertices[i1] - v0;
        let edge2 = mesh.vertices[i2] - v0;

        // Cross product magnitude = 2x triangle area
        let weighted = edge1.cross(edge2);
        accumulated[i0] += weighted;
        accumulated[i1] += weighted;
        accumulated[i2] += weighted;
    }

    mesh.normals = accumulated.into_iter().map(normalize).collect();
    Ok(())
}

/// Index buffer in the engine's winding.
///
/// Triangles are built counter-clockwise (right-handed); Godot treats
/// clockwise as the front face, so the last two indices of each triangle swap.
pub fn clockwise_indices(indices: &[u32]) -> Vec<i32> {
    indices
        .chunks_exact(3)
        .flat_map(|tri| [tri[0] as i32, tri[2] as i32, tri[1] as i32])
        .collect()
}

/// Epsilon for near-zero length checks (appropriate for f32 precision)
const NORMAL_EPSILON: f32 = 1e-6;

fn normalize(v: Vector3) -> Vector3 {
    let len = v.length();
    if len > NORMAL_EPSILON {
        v / len
    } else {
        Vector3::UP // Default up vector for degenerate normals
    }
}
