//! Generation parameters shared by the synchronous path, the worker pool and the Godot node.
//! Adding a field here propagates to every generation entry point.

use crate::error::MeshGenError;
use crate::marching_squares::{DEFAULT_CELL_SIZE, DEFAULT_WALL_HEIGHT};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshGenParams {
    /// World-space edge length of one grid cell.
    pub cell_size: f32,
    /// Depth the walls are extruded downward from the floor.
    pub wall_height: f32,
}

impl Default for MeshGenParams {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            wall_height: DEFAULT_WALL_HEIGHT,
        }
    }
}

impl MeshGenParams {
    pub fn new(cell_size: f32, wall_height: f32) -> Self {
        Self {
            cell_size,
            wall_height,
        }
    }

    pub fn validate(&self) -> Result<(), MeshGenError> {
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(MeshGenError::invalid_argument(format!(
                "cell size must be positive, got {}",
                self.cell_size
            )));
        }
        if !self.wall_height.is_finite() || self.wall_height <= 0.0 {
            return Err(MeshGenError::invalid_argument(format!(
                "wall height must be positive, got {}",
                self.wall_height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_are_valid() {
        let params = MeshGenParams::default();
        assert_eq!(params.cell_size, 1.0);
        assert_eq!(params.wall_height, 20.0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_values() {
        for (cell_size, wall_height) in [(0.0, 5.0), (-1.0, 5.0), (1.0, 0.0), (1.0, -3.0)] {
            let result = MeshGenParams::new(cell_size, wall_height).validate();
            assert!(
                matches!(result, Err(MeshGenError::InvalidArgument { .. })),
                "({}, {}) should be rejected",
                cell_size,
                wall_height
            );
        }
    }

    #[test]
    fn test_rejects_non_finite_values() {
        assert!(MeshGenParams::new(f32::NAN, 1.0).validate().is_err());
        assert!(MeshGenParams::new(1.0, f32::INFINITY).validate().is_err());
    }
}
