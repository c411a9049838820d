//! Loads a graph from a text edge list.
//!
//! ```text
//! 4 3
//! 0 1
//! 1 2
//! 2 3
//! ```
//!
//! The first line holds the vertex and edge counts, every following line one
//! directed edge. Blank lines are ignored. The number of edge lines must match
//! the declared count.
//!
//! # Example
//! ```no_run
//! use pregel::prelude::*;
//!
//! let graph: Graph<HashMin> = TextLoader::new("graph.txt")
//!     .with_options(LoadOptions::default().with_undirected(true))
//!     .load()
//!     .expect("failed to load graph");
//! ```

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    str::FromStr,
    time::Instant,
};

use pregel_api::core::entities::VertexId;
use tracing::info;

use crate::{
    core::utils::errors::GraphError,
    db::{graph::graph::Graph, task::task::Program},
    graph_loader::LoadOptions,
};

#[derive(Debug, Clone)]
pub struct TextLoader {
    path: PathBuf,
    options: LoadOptions,
}

impl TextLoader {
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
        let graph = load_edge_list(BufReader::new(file), &self.options)?;
        info!(
            path = %self.path.display(),
            vertices = graph.count(),
            edges = graph.num_edges(),
            "loaded text graph in {:?}",
            now.elapsed()
        );
        Ok(graph)
    }
}

fn parse_pair<T: FromStr>(line: &str, line_no: usize) -> Result<(T, T), GraphError> {
    let mut fields = line.split_whitespace();
    let mut next = |name: &str| -> Result<T, GraphError> {
        let field = fields
            .next()
            .ok_or_else(|| GraphError::malformed(line_no, format!("missing {name}")))?;
        field
            .parse()
            .map_err(|_| GraphError::malformed(line_no, format!("invalid {name} '{field}'")))
    };
    let pair = (next("first value")?, next("second value")?);
    if fields.next().is_some() {
        return Err(GraphError::malformed(line_no, "trailing values"));
    }
    Ok(pair)
}

/// Reads an edge list from any buffered reader.
pub fn load_edge_list<P: Program, R: BufRead>(
    reader: R,
    options: &LoadOptions,
) -> Result<Graph<P>, GraphError> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| line.as_ref().map_or(true, |l| !l.trim().is_empty()));

    let (line_no, header) = lines
        .next()
        .ok_or_else(|| GraphError::malformed(1, "missing '<vertex_count> <edge_count>' header"))?;
    let (num_vertices, num_edges): (usize, usize) = parse_pair(&header?, line_no)?;

    let mut edges: Vec<(VertexId, VertexId)> = Vec::new();
    edges
        .try_reserve_exact(num_edges)
        .map_err(|_| GraphError::Allocation {
            requested: num_edges,
        })?;

    let mut last_line = line_no;
    for (line_no, line) in lines {
        last_line = line_no;
        let edge = parse_pair(&line?, line_no)?;
        if edges.len() == num_edges {
            return Err(GraphError::malformed(
                line_no,
                format!("more edges than the {num_edges} declared"),
            ));
        }
        edges.push(edge);
    }
    if edges.len() != num_edges {
        return Err(GraphError::malformed(
            last_line + 1,
            format!("expected {num_edges} edges, found {}", edges.len()),
        ));
    }

    Graph::from_edges(num_vertices, edges, options)
}
