/// Morsel size handed to one worker at a time.
pub const DEFAULT_CHUNK_SIZE: usize = 16_000;

/// Knobs of a run, built with the `with_*` methods.
///
/// ```rust
/// use pregel::prelude::*;
///
/// let config = EngineConfig::default()
///     .with_num_threads(4)
///     .with_spread(false)
///     .with_max_supersteps(20);
/// assert_eq!(config.num_threads, Some(4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Run on a dedicated pool of this many workers instead of the global one.
    pub num_threads: Option<usize>,
    /// Track the active vertices explicitly instead of scanning every vertex.
    pub spread: bool,
    /// Cap on the supersteps of one meta-superstep.
    pub max_supersteps: usize,
    /// Overrides [`Program::meta_superstep_count`](super::task::Program::meta_superstep_count).
    pub meta_superstep_count: Option<usize>,
    pub chunk_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            num_threads: None,
            spread: true,
            max_supersteps: usize::MAX,
            meta_superstep_count: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl EngineConfig {
    pub fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    pub fn with_spread(mut self, spread: bool) -> Self {
        self.spread = spread;
        self
    }

    pub fn with_max_supersteps(mut self, max_supersteps: usize) -> Self {
        self.max_supersteps = max_supersteps;
        self
    }

    pub fn with_meta_superstep_count(mut self, count: usize) -> Self {
        self.meta_superstep_count = Some(count);
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }
}
