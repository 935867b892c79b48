//! Parallel cave mesh generation worker pool.
//!
//! Worker threads perform pure Rust computation.
//! Results are sent via crossbeam channels to the main thread.

use crossbeam::channel::{bounded, Receiver, Sender};
use std::sync::Arc;

use crate::error::MeshGenError;
use crate::marching_squares::{generate, CaveMesh, OccupancyMap};
use crate::shared_params::MeshGenParams;

/// Fraction of detected CPUs to use for mesh worker threads (numerator).
const THREAD_CPU_NUMERATOR: usize = 3;
/// Fraction of detected CPUs to use for mesh worker threads (denominator).
const THREAD_CPU_DENOMINATOR: usize = 4;
/// Minimum number of mesh worker threads.
const MIN_WORKER_THREADS: usize = 2;
/// Minimum batch size for processing mesh requests.
const MIN_BATCH_SIZE: usize = 16;
/// Default channel capacity for mesh request/result channels.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Request sent from main thread to workers
pub struct MeshRequest {
    /// Caller-chosen id echoed back in the result; callers order results by it.
    pub id: u64,
    pub map: Arc<OccupancyMap>,
    pub params: MeshGenParams,
}

/// Finished generation, successful or not
#[derive(Debug)]
pub struct MeshResult {
    pub id: u64,
    pub mesh: Result<CaveMesh, MeshGenError>,
}

/// Worker pool for parallel mesh generation
pub struct MeshWorkerPool {
    thread_count: usize,
    request_tx: Sender<MeshRequest>,
    request_rx: Receiver<MeshRequest>,
    result_tx: Sender<MeshResult>,
    result_rx: Receiver<MeshResult>,
}

impl MeshWorkerPool {
    pub fn new(num_threads: usize, channel_capacity: usize) -> Self {
        let detected_cpus = num_cpus::get();
        let threads = if num_threads == 0 {
            ((detected_cpus * THREAD_CPU_NUMERATOR) / THREAD_CPU_DENOMINATOR)
                .max(MIN_WORKER_THREADS)
        } else {
            num_threads
        };

        let (request_tx, request_rx) = bounded(channel_capacity);
        let (result_tx, result_rx) = bounded(channel_capacity);

        Self {
            thread_count: threads,
            request_tx,
            request_rx,
            result_tx,
            result_rx,
        }
    }

    pub fn request_sender(&self) -> Sender<MeshRequest> {
        self.request_tx.clone()
    }

    pub fn result_receiver(&self) -> Receiver<MeshResult> {
        self.result_rx.clone()
    }

    /// Drain up to one batch of pending requests and hand each to the rayon
    /// pool. Returns immediately; results arrive on the result channel.
    pub fn process_requests(&self) {
        let batch_size = rayon::current_num_threads().max(MIN_BATCH_SIZE);
        let mut batch = Vec::with_capacity(batch_size);

        while batch.len() < batch_size {
            match self.request_rx.try_recv() {
                Ok(req) => batch.push(req),
                Err(_) => break,
            }
        }

        if batch.is_empty() {
            return;
        }

        for request in batch {
            let tx = self.result_tx.clone();
            rayon::spawn(move || {
                let result = generate_mesh_for_request(&request);
                let _ = tx.try_send(result);
            });
        }
    }

    pub fn thread_count(&self) -> usize {
        self.thread_count
    }

    pub fn shutdown(&mut self) {
        while self.request_rx.try_recv().is_ok() {}
        while self.result_rx.try_recv().is_ok() {}
    }
}

impl Default for MeshWorkerPool {
    fn default() -> Self {
        Self::new(0, DEFAULT_CHANNEL_CAPACITY)
    }
}

fn generate_mesh_for_request(request: &MeshRequest) -> MeshResult {
    MeshResult {
        id: request.id,
        mesh: generate(&request.map, &request.params),
    }
}

#[cfg(test)]
mod tests {
    use crossbeam::channel::TrySendError;

    use super::*;
    use std::time::Duration;

    fn test_map() -> Arc<OccupancyMap> {
        Arc::new(OccupancyMap::from_ascii("....\n.##.\n.##.\n....").unwrap())
    }

    fn request(id: u64, map: &Arc<OccupancyMap>) -> MeshRequest {
        MeshRequest {
            id,
            map: Arc::clone(map),
            params: MeshGenParams::default(),
        }
    }

    #[test]
    fn test_worker_pool_creation() {
        let pool = MeshWorkerPool::new(2, 64);
        assert!(pool.thread_count() >= 1);
    }

    #[test]
    fn test_worker_pool_default() {
        let pool = MeshWorkerPool::default();
        assert!(pool.thread_count() >= MIN_WORKER_THREADS);
    }

    #[test]
    fn test_thread_count_matches_requested() {
        let requested = 4;
        let pool = MeshWorkerPool::new(requested, 64);

        assert_eq!(
            pool.thread_count(),
            requested,
            "Thread count should match requested"
        );
    }

    #[test]
    fn test_send_and_receive_mesh() {
        let pool = MeshWorkerPool::new(2, 64);
        let map = test_map();

        pool.request_sender()
            .send(request(7, &map))
            .expect("Should send request");

        pool.process_requests();

        let result = pool
            .result_receiver()
            .recv_timeout(Duration::from_secs(5))
            .expect("Should receive result");

        assert_eq!(result.id, 7);
        let mesh = result.mesh.expect("generation should succeed");
        assert_eq!(mesh, generate(&map, &MeshGenParams::default()).unwrap());
        assert_eq!(mesh.outlines.len(), 1);
    }

    #[test]
    fn test_multiple_requests_parallel() {
        let pool = MeshWorkerPool::new(4, 64);
        let map = test_map();

        for id in 0..4 {
            pool.request_sender().send(request(id, &map)).unwrap();
        }

        pool.process_requests();

        let results = pool.result_receiver();
        let mut received = Vec::new();
        for _ in 0..4 {
            let result = results
                .recv_timeout(Duration::from_secs(5))
                .expect("Should receive result");
            assert!(result.mesh.is_ok());
            received.push(result.id);
        }
        received.sort_unstable();

        assert_eq!(received, vec![0, 1, 2, 3], "Should receive all 4 results");
    }

    #[test]
    fn test_errors_are_returned_not_dropped() {
        let pool = MeshWorkerPool::new(1, 8);
        let map = test_map();
        let mut bad = request(3, &map);
        bad.params.wall_height = 0.0;
        pool.request_sender().send(bad).unwrap();

        pool.process_requests();

        let result = pool
            .result_receiver()
            .recv_timeout(Duration::from_secs(5))
            .unwrap();
        assert_eq!(result.id, 3);
        assert!(matches!(
            result.mesh,
            Err(MeshGenError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_process_requests_returns_before_mesh_is_ready() {
        let pool = MeshWorkerPool::new(2, 8);
        let map = Arc::new(OccupancyMap::new(512, 512, vec![true; 512 * 512]).unwrap());
        pool.request_sender().send(request(11, &map)).unwrap();

        pool.process_requests();
        // a 511x511 cell map takes far longer than returning from the call
        assert!(pool.result_receiver().try_recv().is_err());

        let result = pool
            .result_receiver()
            .recv_timeout(Duration::from_secs(60))
            .expect("Should receive result");
        assert_eq!(result.id, 11);
        assert_eq!(result.mesh.unwrap().outlines.len(), 1);
    }

    #[test]
    fn test_bounded_channels_dont_block() {
        let pool = MeshWorkerPool::new(1, 64);
        let map = test_map();

        let mut sent = 0;
        for id in 0..100 {
            match pool.request_sender().try_send(request(id, &map)) {
                Ok(_) => sent += 1,
                Err(TrySendError::Full(_)) => break,
                Err(TrySendError::Disconnected(_)) => panic!("Channel disconnected"),
            }
        }

        assert!(sent <= 64, "Should stop at channel capacity");
        assert!(sent > 0, "Should have sent some requests");
    }

    #[test]
    fn test_shutdown_drains_channels() {
        let mut pool = MeshWorkerPool::new(1, 8);
        let map = test_map();
        pool.request_sender().send(request(1, &map)).unwrap();
        pool.shutdown();
        pool.process_requests();
        assert!(pool.result_receiver().try_recv().is_err());
    }
}
