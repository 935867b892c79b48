//! Full floor + wall generation pipeline.
//!
//! Every call builds a fresh [`GenerationContext`], so repeated or concurrent
//! calls never observe each other's buffers.

use std::collections::HashSet;

use godot::prelude::*;

use crate::debug_log::{compute_normal_stats, count_duplicate_positions, debug_log};
use crate::error::MeshGenError;
use crate::mesh_postprocess::{recompute_normals, MeshBuffers};
use crate::shared_params::MeshGenParams;

use super::adjacency::AdjacencyIndex;
use super::cases::generate_cell;
use super::grid::SquareGrid;
use super::occupancy::OccupancyMap;
use super::outline::{trace_outlines, Outline};
use super::types::{Triangle, VertexIndex};
use super::validator::validate_edges;
use super::vertex::SampleArena;
use super::walls::extrude_walls;

/// Working buffers for one triangulation pass.
pub(crate) struct GenerationContext {
    pub(crate) arena: SampleArena,
    pub(crate) vertices: Vec<Vector3>,
    pub(crate) indices: Vec<VertexIndex>,
    pub(crate) adjacency: AdjacencyIndex,
    /// Vertices known to carry no outline edge.
    pub(crate) interior: HashSet<VertexIndex>,
}

impl GenerationContext {
    pub(crate) fn new(arena: SampleArena) -> Self {
        Self {
            arena,
            vertices: Vec::new(),
            indices: Vec::new(),
            adjacency: AdjacencyIndex::new(),
            interior: HashSet::new(),
        }
    }

    /// Append a triangle to the index buffer and register it for adjacency.
    pub(crate) fn add_triangle(&mut self, triangle: Triangle) {
        self.indices.extend_from_slice(&triangle.vertices());
        self.adjacency.register(triangle);
    }
}

/// Output of one generation call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CaveMesh {
    /// Floor triangles with recomputed per-vertex normals.
    pub floor: MeshBuffers,
    /// Double-sided wall quads, no normals.
    pub walls: MeshBuffers,
    pub outlines: Vec<Outline>,
}

/// Triangulate every cell of the map into a fresh context.
pub(crate) fn triangulate(map: &OccupancyMap, cell_size: f32) -> Result<GenerationContext, MeshGenError> {
    let grid = SquareGrid::new(map, cell_size)?;
    let full_cells = grid.cells().iter().filter(|c| c.config().is_full()).count();
    let empty_cells = grid.cells().iter().filter(|c| c.config().is_empty()).count();
    let (arena, cells) = grid.into_parts();
    let mut ctx = GenerationContext::new(arena);

    for cell in &cells {
        generate_cell(&mut ctx, cell);
    }

    debug_log(&format!(
        "[generate] {}x{} map ({} solid): {} cells ({} full, {} empty) -> {} vertices, {} triangles, {} interior",
        map.width(),
        map.height(),
        map.solid_count(),
        cells.len(),
        full_cells,
        empty_cells,
        ctx.vertices.len(),
        ctx.indices.len() / 3,
        ctx.interior.len()
    ));
    Ok(ctx)
}

/// Run the whole pipeline: triangulate, trace outlines, finalize the floor,
/// extrude walls.
pub fn generate(map: &OccupancyMap, params: &MeshGenParams) -> Result<CaveMesh, MeshGenError> {
    params.validate()?;

    let ctx = triangulate(map, params.cell_size)?;
    let outlines = trace_outlines(&ctx.adjacency, ctx.vertices.len(), &ctx.interior)?;
    debug_log(&format!(
        "[generate] {} outlines, {} outline edges",
        outlines.len(),
        outlines.iter().map(Outline::edge_count).sum::<usize>()
    ));

    let mut floor = MeshBuffers::from_parts(ctx.vertices, ctx.indices);
    recompute_normals(&mut floor)?;

    if cfg!(debug_assertions) {
        let report = validate_edges(&floor.indices);
        let stats = compute_normal_stats(&floor.normals);
        debug_log(&format!(
            "[generate] floor edges: {} boundary, {} interior, {} non-manifold (manifold: {})",
            report.boundary_edge_count(),
            report.interior_edge_count,
            report.non_manifold_edges.len(),
            report.is_manifold()
        ));
        debug_log(&format!(
            "[generate] floor duplicate positions: {}",
            count_duplicate_positions(&floor.vertices, 1e-4)
        ));
        debug_log(&format!(
            "[generate] floor normals: len [{:.4}, {:.4}], {} degenerate",
            stats.min_len, stats.max_len, stats.degenerate_count
        ));
    }

    let walls = extrude_walls(&outlines, &floor.vertices, params.wall_height)?;
    debug_log(&format!(
        "[generate] walls: {} vertices, {} triangles",
        walls.vertex_count(),
        walls.triangle_count()
    ));

    Ok(CaveMesh {
        floor,
        walls,
        outlines,
    })
}
