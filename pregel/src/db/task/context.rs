/// Execution state shared read-only with the workers during a superstep and
/// advanced by the runner at each barrier.
#[derive(Debug, Clone, Default)]
pub struct Context {
    ss: usize,
    meta_ss: usize,
    meta_count: usize,
    num_vertices: usize,
    active: usize,
    in_flight: usize,
}

impl Context {
    pub(crate) fn new(num_vertices: usize, meta_count: usize) -> Self {
        Self {
            num_vertices,
            meta_count,
            active: num_vertices,
            ..Default::default()
        }
    }

    pub fn ss(&self) -> usize {
        self.ss
    }

    pub fn meta_ss(&self) -> usize {
        self.meta_ss
    }

    pub fn meta_count(&self) -> usize {
        self.meta_count
    }

    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Vertices that run in the current superstep.
    pub fn active(&self) -> usize {
        self.active
    }

    /// Messages sent during the previous superstep.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub(crate) fn increment_ss(&mut self) {
        self.ss += 1;
    }

    pub(crate) fn reset_ss(&mut self) {
        self.ss = 0;
    }

    pub(crate) fn set_meta_ss(&mut self, meta_ss: usize) {
        self.meta_ss = meta_ss;
    }

    pub(crate) fn set_counts(&mut self, active: usize, in_flight: usize) {
        self.active = active;
        self.in_flight = in_flight;
    }
}
