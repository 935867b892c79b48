// Marching squares floor triangulation, outline tracing and wall extrusion
mod adjacency;
mod cases;
mod cell_context;
mod generator;
mod grid;
mod occupancy;
mod outline;
mod types;
pub mod validator;
mod vertex;
mod walls;

pub use adjacency::*;
pub use cases::*;
pub use cell_context::*;
pub use generator::*;
pub use grid::*;
pub use occupancy::*;
pub use outline::*;
pub use types::*;
pub use vertex::*;
pub use walls::*;
