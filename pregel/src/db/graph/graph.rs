//! Defines the `Graph` struct, the vertex store every superstep runs over.
//!
//! Vertices live in a single array ordered by location. Ids are dense, so the
//! location of a vertex is its id minus the configured id offset.
//!
//! # Examples
//!
//! ```rust
//! use pregel::prelude::*;
//!
//! let graph: Graph<HashMin> =
//!     Graph::from_edges(3, [(0, 1), (1, 2)], &LoadOptions::default()).unwrap();
//! assert_eq!(graph.count(), 3);
//! assert_eq!(graph.get(1).unwrap().out_neighbours(), &[2]);
//! ```

use std::fmt;

use pregel_api::core::{
    entities::{VertexId, VID},
    storage::lock::LockStrategy,
};

use crate::{
    core::utils::errors::{try_alloc, GraphError},
    db::{
        graph::vertex::{Adjacency, Vertex},
        task::task::Program,
    },
    graph_loader::LoadOptions,
};

/// Fails unless the ids `offset..offset + count` all fit in a [`VertexId`].
pub(crate) fn check_id_range(count: usize, offset: VertexId) -> Result<(), GraphError> {
    let fits = count == 0
        || VertexId::try_from(count - 1)
            .ok()
            .and_then(|last| offset.checked_add(last))
            .is_some();
    if fits {
        Ok(())
    } else {
        Err(GraphError::IdRangeOverflow { offset, count })
    }
}

pub struct Graph<P: Program> {
    id_offset: VertexId,
    lock_strategy: LockStrategy,
    num_edges: usize,
    vertices: Vec<Vertex<P>>,
}

impl<P: Program> Graph<P> {
    pub(crate) fn from_vertices(
        vertices: Vec<Vertex<P>>,
        id_offset: VertexId,
        lock_strategy: LockStrategy,
    ) -> Self {
        let num_edges = vertices.iter().map(|v| v.out_neighbours().len()).sum();
        Self {
            id_offset,
            lock_strategy,
            num_edges,
            vertices,
        }
    }

    /// Builds a graph of `count` vertices from directed `(source, destination)` pairs.
    ///
    /// With `options.undirected` the reverse of every edge is added as well, and with
    /// `options.in_neighbours` the in-neighbour lists are materialised.
    pub fn from_edges<E>(count: usize, edges: E, options: &LoadOptions) -> Result<Self, GraphError>
    where
        E: IntoIterator<Item = (VertexId, VertexId)>,
    {
        let offset = options.id_offset;
        check_id_range(count, offset)?;
        let mut outs: Vec<Vec<VertexId>> = try_alloc(count)?;
        let mut ins: Option<Vec<Vec<VertexId>>> = if options.in_neighbours {
            Some(try_alloc(count)?)
        } else {
            None
        };

        let location = |id: VertexId| -> Result<usize, GraphError> {
            id.checked_sub(offset)
                .map(|l| l as usize)
                .filter(|&l| l < count)
                .ok_or(GraphError::VertexOutOfRange { id, offset, count })
        };

        let mut add = |src: VertexId, dst: VertexId| -> Result<(), GraphError> {
            let (s, d) = (location(src)?, location(dst)?);
            outs[s].push(dst);
            if let Some(ins) = ins.as_mut() {
                ins[d].push(src);
            }
            Ok(())
        };

        for (src, dst) in edges {
            add(src, dst)?;
            if options.undirected && src != dst {
                add(dst, src)?;
            }
        }

        let mut ins = ins.map(|ins| ins.into_iter());
        let vertices = outs
            .into_iter()
            .enumerate()
            .map(|(l, out)| {
                let inn = ins
                    .as_mut()
                    .and_then(|it| it.next())
                    .map(|inn| Adjacency::new(inn, None));
                // in range, checked above
                Vertex::new(
                    offset + l as VertexId,
                    Adjacency::new(out, None),
                    inn,
                    options.lock_strategy,
                )
            })
            .collect();

        Ok(Self::from_vertices(vertices, offset, options.lock_strategy))
    }

    pub fn count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of stored out-edges, reverse edges of an undirected load included.
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn id_offset(&self) -> VertexId {
        self.id_offset
    }

    pub fn lock_strategy(&self) -> LockStrategy {
        self.lock_strategy
    }

    /// Maps an id onto its location.
    pub fn vid(&self, id: VertexId) -> Result<VID, GraphError> {
        id.checked_sub(self.id_offset)
            .map(|l| l as usize)
            .filter(|&l| l < self.vertices.len())
            .map(VID)
            .ok_or(GraphError::VertexOutOfRange {
                id,
                offset: self.id_offset,
                count: self.vertices.len(),
            })
    }

    pub fn get(&self, id: VertexId) -> Result<&Vertex<P>, GraphError> {
        let vid = self.vid(id)?;
        Ok(&self.vertices[vid.index()])
    }

    pub fn get_mut(&mut self, id: VertexId) -> Result<&mut Vertex<P>, GraphError> {
        let vid = self.vid(id)?;
        Ok(&mut self.vertices[vid.index()])
    }

    /// # Panics
    /// If `vid` is not a location of this graph.
    pub fn vertex(&self, vid: VID) -> &Vertex<P> {
        &self.vertices[vid.index()]
    }

    pub fn vertices(&self) -> &[Vertex<P>] {
        &self.vertices
    }

    /// Ids paired with their payload, in location order.
    pub fn states(&self) -> impl Iterator<Item = (VertexId, &P::State)> + '_ {
        self.vertices.iter().map(|v| (v.id(), v.state()))
    }

    pub(crate) fn vertices_mut(&mut self) -> &mut [Vertex<P>] {
        &mut self.vertices
    }
}

impl<P: Program> fmt::Debug for Graph<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Graph(vertices={}, edges={}, id_offset={}, lock={})",
            self.count(),
            self.num_edges,
            self.id_offset,
            self.lock_strategy
        )
    }
}
