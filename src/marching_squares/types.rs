// =====================
// ===== Constants =====
// =====================

pub const DEFAULT_CELL_SIZE: f32 = 1.0;
pub const DEFAULT_WALL_HEIGHT: f32 = 20.0;

/// Smallest lattice extent along either axis that still yields one cell.
pub const MIN_GRID_DIMENSION: usize = 2;

pub(super) const TOP_LEFT_WEIGHT: u8 = 8;
pub(super) const TOP_RIGHT_WEIGHT: u8 = 4;
pub(super) const BOTTOM_RIGHT_WEIGHT: u8 = 2;
pub(super) const BOTTOM_LEFT_WEIGHT: u8 = 1;

// =====================
// ===== Types  ========
// =====================

/// Index into the floor vertex buffer.
pub type VertexIndex = u32;

/// The eight sample points of a cell: four corners plus four edge midpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellPoint {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
    TopMid,
    RightMid,
    BottomMid,
    LeftMid,
}

/// Marching squares configuration code (0-15), one bit per solid corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct CellConfig(pub u8);

impl CellConfig {
    pub const EMPTY: CellConfig = CellConfig(0);
    pub const FULL: CellConfig = CellConfig(15);

    #[must_use]
    pub fn from_corners(top_left: bool, top_right: bool, bottom_right: bool, bottom_left: bool) -> Self {
        let mut code = 0;
        if top_left {
            code += TOP_LEFT_WEIGHT;
        }
        if top_right {
            code += TOP_RIGHT_WEIGHT;
        }
        if bottom_right {
            code += BOTTOM_RIGHT_WEIGHT;
        }
        if bottom_left {
            code += BOTTOM_LEFT_WEIGHT;
        }
        Self(code)
    }

    #[must_use]
    pub fn code(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Self::EMPTY
    }

    #[must_use]
    pub fn is_full(self) -> bool {
        self == Self::FULL
    }
}

/// Three floor vertex indices; winding defines the outward normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle {
    pub a: VertexIndex,
    pub b: VertexIndex,
    pub c: VertexIndex,
}

impl Triangle {
    pub fn new(a: VertexIndex, b: VertexIndex, c: VertexIndex) -> Self {
        Self { a, b, c }
    }

    #[inline]
    pub fn vertices(&self) -> [VertexIndex; 3] {
        [self.a, self.b, self.c]
    }

    #[inline]
    pub fn contains(&self, vertex: VertexIndex) -> bool {
        vertex == self.a || vertex == self.b || vertex == self.c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_weights() {
        assert_eq!(CellConfig::from_corners(true, false, false, false).code(), 8);
        assert_eq!(CellConfig::from_corners(false, true, false, false).code(), 4);
        assert_eq!(CellConfig::from_corners(false, false, true, false).code(), 2);
        assert_eq!(CellConfig::from_corners(false, false, false, true).code(), 1);
        assert!(CellConfig::from_corners(true, true, true, true).is_full());
        assert!(CellConfig::from_corners(false, false, false, false).is_empty());
    }

    #[test]
    fn test_config_diagonals() {
        let five = CellConfig::from_corners(false, true, false, true);
        let ten = CellConfig::from_corners(true, false, true, false);
        assert_eq!(five.code(), 5);
        assert_eq!(ten.code(), 10);
        assert!(!five.is_full() && !five.is_empty());
    }

    #[test]
    fn test_triangle_contains() {
        let tri = Triangle::new(3, 7, 9);
        assert!(tri.contains(3));
        assert!(tri.contains(9));
        assert!(!tri.contains(4));
        assert_eq!(tri.vertices(), [3, 7, 9]);
    }
}
