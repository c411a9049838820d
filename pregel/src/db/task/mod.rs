use std::sync::Arc;

use once_cell::sync::Lazy;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::core::utils::errors::GraphError;

pub mod config;
pub mod context;
pub mod spread;
pub mod task;
pub mod task_runner;
pub mod vertex;

/// Number of workers of the global pool, `PREGEL_MAX_THREADS` or the available parallelism.
pub fn default_num_threads() -> usize {
    std::env::var("PREGEL_MAX_THREADS")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
}

pub static POOL: Lazy<Arc<ThreadPool>> = Lazy::new(|| {
    let num_threads = default_num_threads();
    let pool = ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(|i| format!("pregel-worker-{i}"))
        .build()
        .or_else(|_| ThreadPoolBuilder::new().num_threads(1).build())
        .unwrap_or_else(|err| panic!("failed to build the global thread pool: {err}"));

    Arc::new(pool)
});

pub fn custom_pool(n_threads: usize) -> Result<Arc<ThreadPool>, GraphError> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .thread_name(|i| format!("pregel-worker-{i}"))
        .build()?;

    Ok(Arc::new(pool))
}
