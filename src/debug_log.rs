//! Debug logging infrastructure for cave mesh investigation
//!
//! Writes to `debug_caves.log` in the working directory.
//! The log file is recreated on each `init_debug_log()` call; until then
//! `debug_log` is a no-op.

use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::sync::Mutex;

use godot::builtin::Vector3;

const DEBUG_LOG_PATH: &str = "debug_caves.log";

lazy_static::lazy_static! {
    static ref DEBUG_LOG: Mutex<Option<File>> = Mutex::new(None);
}

/// Log a debug message to the cave debug log file
pub fn debug_log(msg: &str) {
    if let Ok(mut guard) = DEBUG_LOG.lock() {
        if let Some(ref mut file) = *guard {
            let _ = writeln!(file, "{}", msg);
            let _ = file.flush();
        }
    }
}

/// Initialize the debug log file (overwrites any existing log)
pub fn init_debug_log() {
    if let Ok(mut guard) = DEBUG_LOG.lock() {
        *guard = File::create(DEBUG_LOG_PATH).ok();
        if let Some(ref mut file) = *guard {
            let _ = writeln!(file, "=== PIXY CAVES DEBUG LOG ===");
            let _ = writeln!(file, "Timestamp: {:?}", std::time::SystemTime::now());
            let _ = writeln!(file);
        }
    }
}

/// Statistics about normals in a mesh
#[derive(Debug)]
pub struct NormalStats {
    pub min_len: f32,
    pub max_len: f32,
    pub degenerate_count: usize,
}

/// Compute statistics about normal vectors
/// A normal is considered degenerate if its length is not close to 1.0
pub fn compute_normal_stats(normals: &[Vector3]) -> NormalStats {
    if normals.is_empty() {
        return NormalStats {
            min_len: 0.0,
            max_len: 0.0,
            degenerate_count: 0,
        };
    }

    let mut min_len = f32::MAX;
    let mut max_len = f32::MIN;
    let mut degenerate_count = 0;

    for n in normals {
        let len = n.length();
        min_len = min_len.min(len);
        max_len = max_len.max(len);

        if !(0.99..=1.01).contains(&len) {
            degenerate_count += 1;
        }
    }

    NormalStats {
        min_len,
        max_len,
        degenerate_count,
    }
}

/// Count vertices that appear at identical positions (within epsilon)
/// Returns the number of duplicate position groups found
pub fn count_duplicate_positions(vertices: &[Vector3], epsilon: f32) -> usize {
    // Quantize positions to grid cells for fast lookup
    let scale = 1.0 / epsilon;
    let mut position_counts: HashMap<(i32, i32, i32), usize> = HashMap::new();

    for v in vertices {
        let key = (
            (v.x * scale).round() as i32,
            (v.y * scale).round() as i32,
            (v.z * scale).round() as i32,
        );
        *position_counts.entry(key).or_insert(0) += 1;
    }

    position_counts.values().filter(|&&count| count > 1).count()
}
