use godot::prelude::*;

use crate::error::MeshGenError;
use crate::mesh_postprocess::MeshBuffers;

use super::outline::Outline;
use super::types::VertexIndex;

/// Vertices emitted per outline edge.
pub const WALL_VERTICES_PER_EDGE: usize = 4;
/// Triangles emitted per outline edge (two quads, one per side).
pub const WALL_TRIANGLES_PER_EDGE: usize = 4;

// Quad corners: 0 top-left, 1 top-right, 2 bottom-left, 3 bottom-right.
const FRONT_FACE: [u32; 6] = [0, 2, 3, 3, 1, 0];
const BACK_FACE: [u32; 6] = [3, 2, 0, 0, 1, 3];

fn floor_position(floor_vertices: &[Vector3], index: VertexIndex) -> Result<Vector3, MeshGenError> {
    floor_vertices.get(index as usize).copied().ok_or_else(|| {
        MeshGenError::internal_invariant(format!(
            "outline references vertex {} but the floor has {} vertices",
            index,
            floor_vertices.len()
        ))
    })
}

/// Extrude every outline edge into a double-sided quad hanging `wall_height`
/// below the floor.
///
/// Quads are not welded: each edge gets four fresh vertices. The returned
/// mesh has no normals.
pub fn extrude_walls(
    outlines: &[Outline],
    floor_vertices: &[Vector3],
    wall_height: f32,
) -> Result<MeshBuffers, MeshGenError> {
    if !wall_height.is_finite() || wall_height <= 0.0 {
        return Err(MeshGenError::invalid_argument(format!(
            "wall height must be positive, got {}",
            wall_height
        )));
    }

    let edge_count: usize = outlines.iter().map(Outline::edge_count).sum();
    let mut walls = MeshBuffers::with_capacity(
        edge_count * WALL_VERTICES_PER_EDGE,
        edge_count * WALL_TRIANGLES_PER_EDGE * 3,
    );
    let drop = Vector3::UP * wall_height;

    for outline in outlines {
        if !outline.is_closed() {
            return Err(MeshGenError::internal_invariant(format!(
                "outline {:?} does not return to its start",
                outline.indices()
            )));
        }
        for (from, to) in outline.edges() {
            let top_left = floor_position(floor_vertices, from)?;
            let top_right = floor_position(floor_vertices, to)?;

            let start = walls.vertices.len() as u32;
            walls.vertices.push(top_left);
            walls.vertices.push(top_right);
            walls.vertices.push(top_left - drop);
            walls.vertices.push(top_right - drop);

            walls
                .indices
                .extend(FRONT_FACE.iter().chain(BACK_FACE.iter()).map(|&i| start + i));
        }
    }

    Ok(walls)
}
