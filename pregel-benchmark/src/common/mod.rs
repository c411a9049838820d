#![allow(dead_code)]

use std::io::Write;

use criterion::{measurement::WallTime, Bencher, BenchmarkGroup, BenchmarkId};
use pregel::prelude::*;
use pregel_api::core::utils::logging::init_logging;
use rand::{distributions::Uniform, rngs::StdRng, Rng, SeedableRng};
use tracing::info;

/// `num_edges` uniformly random directed edges over `num_vertices` vertices.
pub fn random_edges(num_vertices: usize, num_edges: usize, seed: u64) -> Vec<(VertexId, VertexId)> {
    let rng = StdRng::seed_from_u64(seed);
    let range = Uniform::new(0, num_vertices as VertexId);
    let mut ids = rng.sample_iter(range);
    (0..num_edges)
        .filter_map(|_| Some((ids.next()?, ids.next()?)))
        .collect()
}

pub fn bootstrap_graph<P: Program>(
    num_vertices: usize,
    avg_degree: usize,
    options: &LoadOptions,
) -> Graph<P> {
    let edges = random_edges(num_vertices, num_vertices * avg_degree, 42);
    let graph = Graph::from_edges(num_vertices, edges, options).expect("random edges are in range");
    info!(
        vertices = graph.count(),
        edges = graph.num_edges(),
        "generated benchmark graph"
    );
    graph
}

/// Writes `edges` in the text edge-list format.
pub fn write_edge_list<W: Write>(
    writer: &mut W,
    num_vertices: usize,
    edges: &[(VertexId, VertexId)],
) -> std::io::Result<()> {
    writeln!(writer, "{} {}", num_vertices, edges.len())?;
    for (src, dst) in edges {
        writeln!(writer, "{src} {dst}")?;
    }
    writer.flush()
}

pub fn bench<F>(
    group: &mut BenchmarkGroup<WallTime>,
    name: &str,
    parameter: Option<usize>,
    mut task: F,
) where
    F: FnMut(&mut Bencher<'_, WallTime>),
{
    match parameter {
        Some(parameter) => group.bench_with_input(
            BenchmarkId::new(name, parameter),
            &parameter,
            |b: &mut Bencher, _| task(b),
        ),
        None => group.bench_function(name, task),
    };
}

pub fn quiet_logging() {
    init_logging("WARN");
}
