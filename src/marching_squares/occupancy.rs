use crate::error::MeshGenError;

use super::types::MIN_GRID_DIMENSION;

/// Integer value marking a solid cell in raw integer maps.
pub const SOLID_VALUE: i32 = 1;

/// Upper bound on lattice points so every vertex index fits in a `u32`
/// (each lattice point owns one corner and two midpoint samples).
const MAX_LATTICE_POINTS: usize = (u32::MAX / 3) as usize;

/// Immutable rectangular grid of solid/empty flags.
///
/// Stored row-major: `cells[y * width + x]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyMap {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl OccupancyMap {
    pub fn new(width: usize, height: usize, cells: Vec<bool>) -> Result<Self, MeshGenError> {
        if width < MIN_GRID_DIMENSION || height < MIN_GRID_DIMENSION {
            return Err(MeshGenError::invalid_argument(format!(
                "map must be at least {}x{}, got {}x{}",
                MIN_GRID_DIMENSION, MIN_GRID_DIMENSION, width, height
            )));
        }
        let expected = width.checked_mul(height).filter(|&n| n <= MAX_LATTICE_POINTS);
        let Some(expected) = expected else {
            return Err(MeshGenError::invalid_argument(format!(
                "map of {}x{} is too large",
                width, height
            )));
        };
        if cells.len() != expected {
            return Err(MeshGenError::invalid_argument(format!(
                "map of {}x{} needs {} cells, got {}",
                width,
                height,
                expected,
                cells.len()
            )));
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Build from rows, `rows[y][x]`. Every row must have the same length.
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self, MeshGenError> {
        let width = rows.first().map_or(0, Vec::len);
        if let Some((y, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
            return Err(MeshGenError::invalid_argument(format!(
                "map is not rectangular: row {} has {} cells, expected {}",
                y,
                row.len(),
                width
            )));
        }
        let cells = rows.iter().flat_map(|row| row.iter().copied()).collect();
        Self::new(width, rows.len(), cells)
    }

    /// Build from a flat row-major integer buffer where `1` is solid.
    pub fn from_ints(width: usize, height: usize, values: &[i32]) -> Result<Self, MeshGenError> {
        let cells = values.iter().map(|&v| v == SOLID_VALUE).collect();
        Self::new(width, height, cells)
    }

    /// Parse an ASCII map: `#` is solid, `.` is empty, the first line is `y = 0`.
    /// Blank lines and surrounding whitespace are ignored.
    pub fn from_ascii(text: &str) -> Result<Self, MeshGenError> {
        let mut rows = Vec::new();
        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let mut row = Vec::with_capacity(line.len());
            for ch in line.chars() {
                match ch {
                    '#' => row.push(true),
                    '.' => row.push(false),
                    other => {
                        return Err(MeshGenError::invalid_argument(format!(
                            "unexpected map character '{}'",
                            other
                        )))
                    }
                }
            }
            rows.push(row);
        }
        Self::from_rows(&rows)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Solid flag at lattice point `(x, y)`. Out-of-range points are empty.
    pub fn is_solid(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[y * self.width + x]
    }

    pub fn solid_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}
