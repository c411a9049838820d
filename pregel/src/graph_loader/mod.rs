//! Loaders that populate the vertex store.
//!
//! Two input formats are understood:
//!
//! * a text edge list ([`TextLoader`](source::text_loader::TextLoader)): a
//!   `<vertex_count> <edge_count>` header followed by one
//!   `<source_id> <destination_id>` pair per line,
//! * a binary, per-vertex format ([`BinaryLoader`](source::binary_loader::BinaryLoader)):
//!   a vertex count, then for every vertex its id and its adjacency lists.
//!
//! Both take the same [`LoadOptions`].

use pregel_api::core::{entities::VertexId, storage::lock::LockStrategy};

pub mod source;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadOptions {
    /// Smallest vertex id, ids are dense from here.
    pub id_offset: VertexId,
    pub lock_strategy: LockStrategy,
    /// Text input only: add the reverse of every edge.
    pub undirected: bool,
    /// Keep in-neighbour lists. In binary input, every record carries one.
    pub in_neighbours: bool,
    /// Binary input only: every adjacency list is followed by one weight per neighbour.
    pub weighted: bool,
}

impl LoadOptions {
    pub fn with_id_offset(mut self, id_offset: VertexId) -> Self {
        self.id_offset = id_offset;
        self
    }

    pub fn with_lock_strategy(mut self, lock_strategy: LockStrategy) -> Self {
        self.lock_strategy = lock_strategy;
        self
    }

    pub fn with_undirected(mut self, undirected: bool) -> Self {
        self.undirected = undirected;
        self
    }

    pub fn with_in_neighbours(mut self, in_neighbours: bool) -> Self {
        self.in_neighbours = in_neighbours;
        self
    }

    pub fn with_weighted(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }
}
