use std::sync::Arc;

use godot::classes::mesh::PrimitiveType;
use godot::classes::rendering_server::ArrayType;
use godot::classes::{ArrayMesh, IMeshInstance3D, MeshInstance3D};
use godot::prelude::*;

use crate::debug_log::init_debug_log;
use crate::error::MeshGenError;
use crate::marching_squares::{
    generate, CaveMesh, OccupancyMap, Outline, DEFAULT_CELL_SIZE, DEFAULT_WALL_HEIGHT,
};
use crate::mesh_postprocess::{clockwise_indices, MeshBuffers};
use crate::mesh_worker::{MeshRequest, MeshWorkerPool};
use crate::shared_params::MeshGenParams;

type VariantArray = Array<Variant>;

/// Floor mesh on this node, wall mesh on a child `MeshInstance3D`.
#[derive(GodotClass)]
#[class(base=MeshInstance3D, init, tool)]
pub struct PixyCaveMesh {
    base: Base<MeshInstance3D>,

    /// Size of each map cell in world units
    #[export]
    #[init(val = DEFAULT_CELL_SIZE)]
    cell_size: f32,

    /// How far walls extend below the floor
    #[export]
    #[init(val = DEFAULT_WALL_HEIGHT)]
    wall_height: f32,

    /// Write generation details to debug_caves.log
    #[export]
    #[init(val = false)]
    debug_logging: bool,

    walls: Option<Gd<MeshInstance3D>>,
    worker_pool: Option<MeshWorkerPool>,
    next_request_id: u64,
    /// Only the newest request's result is applied.
    pending_request: Option<u64>,
    outlines: Vec<Outline>,
}

#[godot_api]
impl IMeshInstance3D for PixyCaveMesh {
    fn ready(&mut self) {
        if self.debug_logging {
            init_debug_log();
        }
        self.ensure_walls_instance();
    }

    fn process(&mut self, _delta: f64) {
        let Some(pool) = self.worker_pool.as_ref() else {
            self.base_mut().set_process(false);
            return;
        };

        let mut latest = None;
        while let Ok(result) = pool.result_receiver().try_recv() {
            if Some(result.id) == self.pending_request {
                latest = Some(result);
            }
        }

        if let Some(result) = latest {
            self.pending_request = None;
            match result.mesh {
                Ok(mesh) => self.apply_mesh(&mesh),
                Err(e) => godot_error!("PixyCaveMesh: background generation failed: {}", e),
            }
        }
        if self.pending_request.is_none() {
            self.base_mut().set_process(false);
        }
    }
}

#[godot_api]
impl PixyCaveMesh {
    /// Generate synchronously from a row-major map (1 = solid). Returns false
    /// and keeps the current meshes on invalid input.
    #[func]
    fn generate_mesh(&mut self, map: PackedInt32Array, width: i32, height: i32) -> bool {
        let map = self.build_map(&map, width, height);
        self.generate_from(map)
    }

    /// Generate synchronously from ASCII rows (`#` solid, `.` empty), first
    /// row at y = 0.
    #[func]
    fn generate_mesh_from_ascii(&mut self, text: GString) -> bool {
        let map = OccupancyMap::from_ascii(&text.to_string());
        self.generate_from(map)
    }

    /// Queue generation on the worker pool; the meshes update from `process`.
    /// Returns the request id, or -1 on invalid input.
    #[func]
    fn request_generation(&mut self, map: PackedInt32Array, width: i32, height: i32) -> i64 {
        let map = match self.build_map(&map, width, height) {
            Ok(map) => Arc::new(map),
            Err(e) => {
                godot_error!("PixyCaveMesh: {}", e);
                return -1;
            }
        };

        let id = self.next_request_id;
        self.next_request_id += 1;
        let request = MeshRequest {
            id,
            map,
            params: self.params(),
        };

        let pool = self.worker_pool.get_or_insert_with(|| {
            let pool = MeshWorkerPool::default();
            godot_print!("PixyCaveMesh: worker pool with {} threads", pool.thread_count());
            pool
        });
        if pool.request_sender().try_send(request).is_err() {
            godot_warn!("PixyCaveMesh: request queue full, dropping request {}", id);
            return -1;
        }
        pool.process_requests();

        self.pending_request = Some(id);
        self.base_mut().set_process(true);
        id as i64
    }

    /// Whether a queued request has not been applied yet
    #[func]
    fn is_generation_pending(&self) -> bool {
        self.pending_request.is_some()
    }

    #[func]
    fn get_outline_count(&self) -> i64 {
        self.outlines.len() as i64
    }

    /// Floor vertex indices of one outline, closing index included. Empty when
    /// `index` is out of range.
    #[func]
    fn get_outline(&self, index: i64) -> PackedInt32Array {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.outlines.get(i))
            .map(|outline| outline.indices().iter().map(|&v| v as i32).collect())
            .unwrap_or_default()
    }

    /// Remove floor and wall meshes
    #[func]
    fn clear(&mut self) {
        self.pending_request = None;
        if let Some(pool) = self.worker_pool.as_mut() {
            pool.shutdown();
        }
        self.outlines.clear();
        self.base_mut().set_mesh(&Gd::<ArrayMesh>::default());
        if let Some(walls) = self.walls.as_mut() {
            walls.set_mesh(&Gd::<ArrayMesh>::default());
        }
        godot_print!("PixyCaveMesh cleared");
    }
}

impl PixyCaveMesh {
    fn params(&self) -> MeshGenParams {
        MeshGenParams::new(self.cell_size, self.wall_height)
    }

    /// Apply a synchronous generation; false keeps the current meshes.
    fn generate_from(&mut self, map: Result<OccupancyMap, MeshGenError>) -> bool {
        let result = map.and_then(|map| generate(&map, &self.params()));
        match result {
            Ok(mesh) => {
                self.apply_mesh(&mesh);
                true
            }
            Err(e) => {
                godot_error!("PixyCaveMesh: {}", e);
                false
            }
        }
    }

    fn build_map(&self, map: &PackedInt32Array, width: i32, height: i32) -> Result<OccupancyMap, MeshGenError> {
        if width < 0 || height < 0 {
            return Err(MeshGenError::invalid_argument(format!(
                "map dimensions must be non-negative, got {}x{}",
                width, height
            )));
        }
        OccupancyMap::from_ints(width as usize, height as usize, map.as_slice())
    }

    fn ensure_walls_instance(&mut self) -> Gd<MeshInstance3D> {
        if let Some(walls) = &self.walls {
            return walls.clone();
        }
        let mut walls = MeshInstance3D::new_alloc();
        walls.set_name("Walls");
        self.base_mut().add_child(&walls);
        self.walls = Some(walls.clone());
        walls
    }

    fn apply_mesh(&mut self, mesh: &CaveMesh) {
        let floor = build_array_mesh(&mesh.floor);
        self.base_mut().set_mesh(&floor);

        let mut walls = self.ensure_walls_instance();
        walls.set_mesh(&build_array_mesh(&mesh.walls));

        godot_print!(
            "PixyCaveMesh: {} floor triangles, {} wall triangles, {} outlines",
            mesh.floor.triangle_count(),
            mesh.walls.triangle_count(),
            mesh.outlines.len()
        );
        self.outlines = mesh.outlines.clone();
    }
}

/// Single-surface `ArrayMesh`; empty buffers give a mesh with no surfaces.
fn build_array_mesh(buffers: &MeshBuffers) -> Gd<ArrayMesh> {
    let mut mesh = ArrayMesh::new_gd();
    if buffers.is_empty() {
        return mesh;
    }

    let vertices = PackedVector3Array::from(buffers.vertices.as_slice());
    let normals = PackedVector3Array::from(buffers.normals.as_slice());
    let indices = PackedInt32Array::from(clockwise_indices(&buffers.indices).as_slice());

    // Build the mesh arrays - need to fill all slots up to MAX
    let num_arrays = ArrayType::MAX.ord() as usize;
    let mut arrays: VariantArray = VariantArray::new();

    for i in 0..num_arrays {
        if i == ArrayType::VERTEX.ord() as usize {
            arrays.push(&vertices.to_variant());
        } else if i == ArrayType::NORMAL.ord() as usize && !normals.is_empty() {
            arrays.push(&normals.to_variant());
        } else if i == ArrayType::INDEX.ord() as usize {
            arrays.push(&indices.to_variant());
        } else {
            arrays.push(&Variant::nil());
        }
    }

    mesh.add_surface_from_arrays(PrimitiveType::TRIANGLES, &arrays);
    mesh
}
