//! Loads a graph from the binary per-vertex format.
//!
//! All integers are native-endian `u32`, weights native-endian `f32`:
//!
//! ```text
//! vertex_count
//! repeated vertex_count times, in any order:
//!     id
//!     out_count, out_count ids [, out_count weights]
//!     [in_count, in_count ids [, in_count weights]]
//! ```
//!
//! Weights are present when [`LoadOptions::weighted`] is set, in-neighbour
//! lists when [`LoadOptions::in_neighbours`] is set.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
    time::Instant,
};

use pregel_api::core::entities::{EdgeWeight, VertexId};
use tracing::info;

use crate::{
    core::utils::errors::GraphError,
    db::{
        graph::{
            graph::{check_id_range, Graph},
            vertex::{Adjacency, Vertex},
        },
        task::task::Program,
    },
    graph_loader::LoadOptions,
    serialise::{read_pod, read_pod_vec},
};

#[derive(Debug, Clone)]
pub struct BinaryLoader {
    path: PathBuf,
    options: LoadOptions,
}

impl BinaryLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            options: LoadOptions::default(),
        }
    }

    pub fn with_options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    pub fn load<P: Program>(&self) -> Result<Graph<P>, GraphError> {
        let now = Instant::now();
        let file = File::open(&self.path).map_err(|source| GraphError::FileOpen {
            path: self.path.clone(),
            source,
        })?;
        let graph = load_binary(BufReader::new(file), &self.options)?;
        info!(
            path = %self.path.display(),
            vertices = graph.count(),
            edges = graph.num_edges(),
            "loaded binary graph in {:?}",
            now.elapsed()
        );
        Ok(graph)
    }
}

struct RecordReader<'o, R> {
    reader: R,
    options: &'o LoadOptions,
    count: usize,
}

impl<R: Read> RecordReader<'_, R> {
    fn check(&self, id: VertexId) -> Result<usize, GraphError> {
        let offset = self.options.id_offset;
        id.checked_sub(offset)
            .map(|l| l as usize)
            .filter(|&l| l < self.count)
            .ok_or(GraphError::VertexOutOfRange {
                id,
                offset,
                count: self.count,
            })
    }

    fn adjacency(&mut self, what: &'static str) -> Result<Adjacency, GraphError> {
        let len: u32 = read_pod(&mut self.reader, what)?;
        let ids: Vec<VertexId> = read_pod_vec(&mut self.reader, len as usize, what)?;
        for &id in &ids {
            self.check(id)?;
        }
        let weights = if self.options.weighted {
            Some(read_pod_vec::<EdgeWeight, _>(
                &mut self.reader,
                len as usize,
                "edge weights",
            )?)
        } else {
            None
        };
        Ok(Adjacency::new(ids, weights))
    }
}

/// Reads the binary format from any reader.
pub fn load_binary<P: Program, R: Read>(
    reader: R,
    options: &LoadOptions,
) -> Result<Graph<P>, GraphError> {
    let mut reader = reader;
    let count = read_pod::<u32, _>(&mut reader, "vertex count")? as usize;
    check_id_range(count, options.id_offset)?;

    let mut slots: Vec<Option<Vertex<P>>> = Vec::new();
    slots
        .try_reserve_exact(count)
        .map_err(|_| GraphError::Allocation { requested: count })?;
    slots.resize_with(count, || None);

    let mut records = RecordReader {
        reader,
        options,
        count,
    };
    for _ in 0..count {
        let id: VertexId = read_pod(&mut records.reader, "vertex id")?;
        let loc = records.check(id)?;
        let out = records.adjacency("out-neighbours")?;
        let inn = if options.in_neighbours {
            Some(records.adjacency("in-neighbours")?)
        } else {
            None
        };
        let slot = &mut slots[loc];
        if slot.is_some() {
            return Err(GraphError::DuplicateVertex { id });
        }
        *slot = Some(Vertex::new(id, out, inn, options.lock_strategy));
    }

    let vertices = slots
        .into_iter()
        .enumerate()
        .map(|(l, v)| {
            v.ok_or(GraphError::MissingVertex {
                id: options.id_offset + l as VertexId,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Graph::from_vertices(
        vertices,
        options.id_offset,
        options.lock_strategy,
    ))
}
