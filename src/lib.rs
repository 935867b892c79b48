use godot::prelude::*;

mod cave_mesh;
mod debug_log;
mod error;
mod marching_squares;
mod mesh_postprocess;
mod mesh_worker;
mod shared_params;

struct PixyCavesExtension;

#[gdextension]
unsafe impl ExtensionLibrary for PixyCavesExtension {}
