use crate::error::MeshGenError;

use super::cell_context::Cell;
use super::occupancy::OccupancyMap;
use super::vertex::SampleArena;

/// The sampled lattice plus the `(W-1) x (H-1)` cells assembled over it.
#[derive(Debug, Clone)]
pub struct SquareGrid {
    arena: SampleArena,
    cells: Vec<Cell>,
}

impl SquareGrid {
    pub fn new(map: &OccupancyMap, cell_size: f32) -> Result<Self, MeshGenError> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(MeshGenError::invalid_argument(format!(
                "cell size must be positive, got {}",
                cell_size
            )));
        }

        let arena = SampleArena::from_map(map, cell_size);
        let cells_x = map.width() - 1;
        let cells_y = map.height() - 1;

        // x outer, y inner: this is the generation order and fixes vertex numbering.
        let mut cells = Vec::with_capacity(cells_x * cells_y);
        for x in 0..cells_x {
            for y in 0..cells_y {
                cells.push(Cell::new(&arena, x, y));
            }
        }

        Ok(Self { arena, cells })
    }

    /// Cells in generation order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn into_parts(self) -> (SampleArena, Vec<Cell>) {
        (self.arena, self.cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marching_squares::types::CellPoint;

    /// Lattice coordinates of each cell's bottom-left corner, in generation order.
    fn cell_origins(grid: SquareGrid) -> Vec<(usize, usize)> {
        let (arena, cells) = grid.into_parts();
        cells
            .iter()
            .map(|c| arena.lattice_coords(c.point(CellPoint::BottomLeft)))
            .collect()
    }

    #[test]
    fn test_cell_count_and_order() {
        let map = OccupancyMap::from_ascii("....\n....\n....").unwrap();
        let grid = SquareGrid::new(&map, 1.0).unwrap();
        assert_eq!(grid.cells().len(), 6);
        assert_eq!(
            cell_origins(grid),
            vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]
        );
    }

    #[test]
    fn test_rejects_bad_cell_size() {
        let map = OccupancyMap::from_ascii("..\n..").unwrap();
        assert!(matches!(
            SquareGrid::new(&map, 0.0),
            Err(MeshGenError::InvalidArgument { .. })
        ));
        assert!(SquareGrid::new(&map, -2.0).is_err());
    }

    #[test]
    fn test_isolated_solid_point_configs() {
        // Solid lattice point at (1, 1) in a 4x4 map.
        let map = OccupancyMap::from_ascii(
            "
            ....
            .#..
            ....
            ....
            ",
        )
        .unwrap();
        let grid = SquareGrid::new(&map, 1.0).unwrap();
        // 3x3 cells, x outer: index = x * 3 + y
        let code = |x: usize, y: usize| grid.cells()[x * 3 + y].config().code();
        assert_eq!(code(0, 0), 4);
        assert_eq!(code(1, 0), 8);
        assert_eq!(code(0, 1), 2);
        assert_eq!(code(1, 1), 1);
        // cells not touching (1, 1)
        for (x, y) in [(2, 0), (2, 1), (0, 2), (1, 2), (2, 2)] {
            assert_eq!(code(x, y), 0, "cell ({}, {})", x, y);
        }
    }
}
