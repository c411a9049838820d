#![allow(dead_code)]

use pregel::prelude::*;

/// Every scheduling and locking combination a run must be insensitive to.
pub fn configs() -> Vec<(LockStrategy, EngineConfig)> {
    let mut out = vec![];
    for lock in [LockStrategy::Mutex, LockStrategy::Spin] {
        for spread in [true, false] {
            for threads in [1, 4] {
                let config = EngineConfig::default()
                    .with_spread(spread)
                    .with_num_threads(threads)
                    .with_chunk_size(3);
                out.push((lock, config));
            }
        }
    }
    out
}

/// Runs `program` on a graph built from `edges` and returns the final payloads.
pub fn run_states<P>(
    n: usize,
    edges: &[(VertexId, VertexId)],
    options: LoadOptions,
    program: P,
    config: EngineConfig,
) -> (Vec<P::State>, RunSummary)
where
    P: Program,
    P::State: Clone,
{
    let mut graph: Graph<P> = Graph::from_edges(n, edges.iter().copied(), &options).unwrap();
    let summary = TaskRunner::new(&mut graph, program, config).unwrap().run();
    let states = graph.states().map(|(_, s)| s.clone()).collect();
    (states, summary)
}

/// Smallest id of every vertex's undirected component.
pub fn union_find_labels(n: usize, edges: &[(VertexId, VertexId)]) -> Vec<VertexId> {
    let mut parent: Vec<usize> = (0..n).collect();

    fn find(parent: &mut [usize], mut x: usize) -> usize {
        while parent[x] != x {
            parent[x] = parent[parent[x]];
            x = parent[x];
        }
        x
    }

    for &(a, b) in edges {
        let ra = find(&mut parent, a as usize);
        let rb = find(&mut parent, b as usize);
        // the smaller root wins so every root is its component's minimum
        if ra < rb {
            parent[rb] = ra;
        } else {
            parent[ra] = rb;
        }
    }
    (0..n)
        .map(|x| find(&mut parent, x) as VertexId)
        .collect()
}
