use super::types::{CellConfig, CellPoint};
use super::vertex::{SampleArena, SampleHandle};

/// One grid square: handles to its four corners and four edge midpoints,
/// plus the configuration code computed once at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    // TopLeft, TopRight, BottomRight, BottomLeft
    corners: [SampleHandle; 4],
    // TopMid, RightMid, BottomMid, LeftMid
    mids: [SampleHandle; 4],
    config: CellConfig,
}

impl Cell {
    /// Assemble the cell whose bottom-left lattice point is `(x, y)`.
    ///
    /// Midpoints are borrowed from the corners that own them, so neighbouring
    /// cells resolve a shared edge to the same handles.
    pub fn new(arena: &SampleArena, x: usize, y: usize) -> Self {
        let top_left = arena.corner(x, y + 1);
        let top_right = arena.corner(x + 1, y + 1);
        let bottom_right = arena.corner(x + 1, y);
        let bottom_left = arena.corner(x, y);

        let top_mid = arena.right(x, y + 1);
        let right_mid = arena.above(x + 1, y);
        let bottom_mid = arena.right(x, y);
        let left_mid = arena.above(x, y);

        let config = CellConfig::from_corners(
            arena.is_active(top_left),
            arena.is_active(top_right),
            arena.is_active(bottom_right),
            arena.is_active(bottom_left),
        );

        Self {
            corners: [top_left, top_right, bottom_right, bottom_left],
            mids: [top_mid, right_mid, bottom_mid, left_mid],
            config,
        }
    }

    pub fn config(&self) -> CellConfig {
        self.config
    }

    pub fn point(&self, point: CellPoint) -> SampleHandle {
        match point {
            CellPoint::TopLeft => self.corners[0],
            CellPoint::TopRight => self.corners[1],
            CellPoint::BottomRight => self.corners[2],
            CellPoint::BottomLeft => self.corners[3],
            CellPoint::TopMid => self.mids[0],
            CellPoint::RightMid => self.mids[1],
            CellPoint::BottomMid => self.mids[2],
            CellPoint::LeftMid => self.mids[3],
        }
    }

    pub fn corners(&self) -> [SampleHandle; 4] {
        self.corners
    }
}
