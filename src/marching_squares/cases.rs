use super::cell_context::Cell;
use super::generator::GenerationContext;
use super::types::CellPoint::*;
use super::types::{CellConfig, CellPoint, Triangle, VertexIndex};

/// Longest boundary polygon in the table (config 10).
pub const MAX_CASE_POINTS: usize = 6;

/// Boundary polygon per configuration code, counter-clockwise seen from +Y
/// (right-handed), so `(b - a) x (c - a)` of each fan triangle points up.
/// The engine upload swaps to clockwise.
///
/// Every polygon is convex, so a fan from the first point covers it exactly.
/// Config 10 takes the connected hexagon. Config 5 skips the right midpoint,
/// so its pentagon leaves the top-right corner joined to the rest of the cell
/// only through the bottom midpoint.
const CASE_TABLE: [&[CellPoint]; 16] = [
    // 0
    &[],
    // 1
    &[LeftMid, BottomMid, BottomLeft],
    // 2
    &[BottomRight, BottomMid, RightMid],
    // 3
    &[RightMid, BottomRight, BottomLeft, LeftMid],
    // 4
    &[TopRight, RightMid, TopMid],
    // 5
    &[TopMid, TopRight, BottomMid, BottomLeft, LeftMid],
    // 6
    &[TopMid, TopRight, BottomRight, BottomMid],
    // 7
    &[TopMid, TopRight, BottomRight, BottomLeft, LeftMid],
    // 8
    &[TopLeft, TopMid, LeftMid],
    // 9
    &[TopLeft, TopMid, BottomMid, BottomLeft],
    // 10
    &[TopLeft, TopMid, RightMid, BottomRight, BottomMid, LeftMid],
    // 11
    &[TopLeft, TopMid, RightMid, BottomRight, BottomLeft],
    // 12
    &[TopLeft, TopRight, RightMid, LeftMid],
    // 13
    &[TopLeft, TopRight, RightMid, BottomMid, BottomLeft],
    // 14
    &[TopLeft, TopRight, BottomRight, BottomMid, LeftMid],
    // 15
    &[TopLeft, TopRight, BottomRight, BottomLeft],
];

/// Ordered boundary points for a configuration.
pub fn case_points(config: CellConfig) -> &'static [CellPoint] {
    CASE_TABLE[(config.code() & 0x0F) as usize]
}

/// Triangulate a single cell into the shared buffers.
///
/// Unassigned points get the next vertex index, then the polygon is fanned
/// from its first point. Full cells also record their non-border corners as
/// interior so the outline tracer can skip them.
pub fn generate_cell(ctx: &mut GenerationContext, cell: &Cell) {
    let points = case_points(cell.config());
    if points.len() < 3 {
        return;
    }

    let mut indices = [0 as VertexIndex; MAX_CASE_POINTS];
    for (slot, &point) in indices.iter_mut().zip(points) {
        *slot = ctx.arena.assign_vertex(cell.point(point), &mut ctx.vertices);
    }
    let polygon = &indices[..points.len()];

    for i in 1..polygon.len() - 1 {
        ctx.add_triangle(Triangle::new(polygon[0], polygon[i], polygon[i + 1]));
    }

    if cell.config().is_full() {
        for corner in cell.corners() {
            if ctx.arena.is_on_border(corner) {
                continue;
            }
            if let Some(vertex) = ctx.arena.vertex(corner) {
                ctx.interior.insert(vertex);
            }
        }
    }
}
