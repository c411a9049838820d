//! Active-vertex tracking.
//!
//! While a superstep runs every worker fills its own [`Shard`] with the
//! vertices it activates, either as message targets or by asking to continue.
//! The shards are concatenated at the barrier into the [`WorkingSet`] of the
//! next superstep. A vertex enters a shard only if it flips its `scheduled`
//! flag, so the merged list holds each location at most once.

use pregel_api::core::entities::VID;

/// The vertices a superstep runs on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WorkingSet {
    /// Every vertex that has not voted to halt.
    #[default]
    All,
    /// Exactly these locations, in no particular order.
    Set(Vec<VID>),
}

impl WorkingSet {
    pub fn len(&self, num_vertices: usize) -> usize {
        match self {
            WorkingSet::All => num_vertices,
            WorkingSet::Set(set) => set.len(),
        }
    }

    pub fn is_empty(&self, num_vertices: usize) -> bool {
        self.len(num_vertices) == 0
    }
}

/// Per-worker partial results of one superstep.
#[derive(Debug, Default)]
pub struct Shard {
    pub(crate) activated: Vec<VID>,
    pub(crate) messages: usize,
    pub(crate) executed: usize,
}

impl Shard {
    pub(crate) fn merge(mut self, mut other: Shard) -> Shard {
        if self.activated.len() < other.activated.len() {
            std::mem::swap(&mut self.activated, &mut other.activated);
        }
        self.activated.append(&mut other.activated);
        self.messages += other.messages;
        self.executed += other.executed;
        self
    }
}
