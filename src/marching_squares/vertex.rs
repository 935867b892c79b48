use godot::prelude::*;

use super::occupancy::OccupancyMap;
use super::types::VertexIndex;

/// Which of a lattice point's three samples a handle refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleKind {
    /// The lattice point itself.
    Corner,
    /// Midpoint of the grid edge towards `y + 1`.
    Above,
    /// Midpoint of the grid edge towards `x + 1`.
    Right,
}

/// Stable handle into a [`SampleArena`]. Two cells that share a grid edge
/// hold equal handles for that edge's samples, which is what welds them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SampleHandle {
    kind: SampleKind,
    lattice: usize,
}

/// A world position plus the floor vertex assigned to it, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub position: Vector3,
    pub vertex: Option<VertexIndex>,
}

impl SamplePoint {
    fn new(position: Vector3) -> Self {
        Self {
            position,
            vertex: None,
        }
    }
}

/// Corner and midpoint samples for every lattice point of a map.
///
/// Each lattice point eagerly owns its "above" and "right" midpoints, so every
/// cell touching that point reuses the same slots.
#[derive(Debug, Clone)]
pub struct SampleArena {
    width: usize,
    height: usize,
    active: Vec<bool>,
    corners: Vec<SamplePoint>,
    above: Vec<SamplePoint>,
    right: Vec<SamplePoint>,
}

impl SampleArena {
    /// Sample the map, centring it on the origin in the XZ plane.
    pub fn from_map(map: &OccupancyMap, cell_size: f32) -> Self {
        let width = map.width();
        let height = map.height();
        let map_width = width as f32 * cell_size;
        let map_height = height as f32 * cell_size;
        let half = cell_size / 2.0;

        let count = width * height;
        let mut active = Vec::with_capacity(count);
        let mut corners = Vec::with_capacity(count);
        let mut above = Vec::with_capacity(count);
        let mut right = Vec::with_capacity(count);

        for y in 0..height {
            for x in 0..width {
                let position = Vector3::new(
                    -map_width / 2.0 + x as f32 * cell_size + half,
                    0.0,
                    -map_height / 2.0 + y as f32 * cell_size + half,
                );
                active.push(map.is_solid(x, y));
                corners.push(SamplePoint::new(position));
                above.push(SamplePoint::new(position + Vector3::new(0.0, 0.0, half)));
                right.push(SamplePoint::new(position + Vector3::new(half, 0.0, 0.0)));
            }
        }

        Self {
            width,
            height,
            active,
            corners,
            above,
            right,
        }
    }

    #[inline]
    fn lattice_index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    pub fn corner(&self, x: usize, y: usize) -> SampleHandle {
        SampleHandle {
            kind: SampleKind::Corner,
            lattice: self.lattice_index(x, y),
        }
    }

    pub fn above(&self, x: usize, y: usize) -> SampleHandle {
        SampleHandle {
            kind: SampleKind::Above,
            lattice: self.lattice_index(x, y),
        }
    }

    pub fn right(&self, x: usize, y: usize) -> SampleHandle {
        SampleHandle {
            kind: SampleKind::Right,
            lattice: self.lattice_index(x, y),
        }
    }

    /// Lattice coordinates of the point that owns this sample.
    pub fn lattice_coords(&self, handle: SampleHandle) -> (usize, usize) {
        (handle.lattice % self.width, handle.lattice / self.width)
    }

    /// Solid flag of a corner sample. Midpoints carry no flag of their own.
    pub fn is_active(&self, handle: SampleHandle) -> bool {
        handle.kind == SampleKind::Corner && self.active[handle.lattice]
    }

    /// Whether the owning lattice point lies on the outer edge of the map.
    pub fn is_on_border(&self, handle: SampleHandle) -> bool {
        let (x, y) = self.lattice_coords(handle);
        x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height
    }

    fn slot(&self, handle: SampleHandle) -> &SamplePoint {
        match handle.kind {
            SampleKind::Corner => &self.corners[handle.lattice],
            SampleKind::Above => &self.above[handle.lattice],
            SampleKind::Right => &self.right[handle.lattice],
        }
    }

    fn slot_mut(&mut self, handle: SampleHandle) -> &mut SamplePoint {
        match handle.kind {
            SampleKind::Corner => &mut self.corners[handle.lattice],
            SampleKind::Above => &mut self.above[handle.lattice],
            SampleKind::Right => &mut self.right[handle.lattice],
        }
    }

    pub fn position(&self, handle: SampleHandle) -> Vector3 {
        self.slot(handle).position
    }

    pub fn vertex(&self, handle: SampleHandle) -> Option<VertexIndex> {
        self.slot(handle).vertex
    }

    /// Return the sample's vertex, appending its position to `vertices` the
    /// first time it is referenced. An assigned index never changes.
    pub fn assign_vertex(&mut self, handle: SampleHandle, vertices: &mut Vec<Vector3>) -> VertexIndex {
        if let Some(index) = self.vertex(handle) {
            return index;
        }
        // Map size is capped in OccupancyMap::new so this cannot truncate.
        let index = vertices.len() as VertexIndex;
        vertices.push(self.position(handle));
        self.slot_mut(handle).vertex = Some(index);
        index
    }
}
