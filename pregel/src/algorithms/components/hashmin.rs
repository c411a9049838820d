//! Connected components by minimum-label propagation.

use std::{fmt, marker::PhantomData};

use pregel_api::core::{entities::VertexId, state::agg::MinDef};

use crate::{
    core::state::inbox::{Combined, Inbox},
    db::task::{
        task::{Program, Step},
        vertex::eval_vertex::EvalVertexView,
    },
};

/// Labels every vertex with the smallest id it can reach.
///
/// In the first superstep a vertex takes the minimum of its own id and its
/// out-neighbour ids and broadcasts it. Afterwards it folds the received
/// labels and broadcasts again only when its label dropped. Every vertex
/// always votes to halt.
///
/// On a graph loaded as undirected the labels are the connected components.
/// `I` picks the message delivery, combined with a minimum by default. Use
/// `HashMin::<Mailbox<VertexId>>::with_inbox()` to receive every message.
pub struct HashMin<I = Combined<VertexId, MinDef<VertexId>>> {
    _inbox: PhantomData<fn() -> I>,
}

impl HashMin {
    pub fn new() -> Self {
        Self::with_inbox()
    }
}

impl Default for HashMin {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> HashMin<I> {
    pub fn with_inbox() -> Self {
        Self {
            _inbox: PhantomData,
        }
    }
}

impl<I> Clone for HashMin<I> {
    fn clone(&self) -> Self {
        Self::with_inbox()
    }
}

impl<I> fmt::Debug for HashMin<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HashMin<{}>", std::any::type_name::<I>())
    }
}

impl<I: Inbox<VertexId>> Program for HashMin<I> {
    type State = VertexId;
    type Message = VertexId;
    type Inbox = I;

    fn compute(&self, vv: &mut EvalVertexView<'_, Self>) -> Step {
        if vv.is_first_superstep() {
            let label = vv.out_neighbours().iter().copied().fold(vv.id(), VertexId::min);
            *vv.get_mut() = label;
            vv.broadcast(label);
        } else {
            let current = *vv.get();
            let label = vv.messages().fold(current, VertexId::min);
            if label < current {
                *vv.get_mut() = label;
                vv.broadcast(label);
            }
        }
        Step::Done
    }
}

#[cfg(test)]
mod hashmin_test {
    use super::*;
    use crate::{
        core::state::inbox::Mailbox,
        db::{
            graph::graph::Graph,
            task::{config::EngineConfig, task_runner::TaskRunner},
        },
        graph_loader::LoadOptions,
    };
    use pretty_assertions::assert_eq;

    fn run<I: Inbox<VertexId>>(
        n: usize,
        edges: &[(VertexId, VertexId)],
        config: EngineConfig,
    ) -> Vec<VertexId> {
        let opts = LoadOptions::default().with_undirected(true);
        let mut g: Graph<HashMin<I>> = Graph::from_edges(n, edges.iter().copied(), &opts).unwrap();
        TaskRunner::new(&mut g, HashMin::with_inbox(), config)
            .unwrap()
            .run();
        g.states().map(|(_, s)| *s).collect()
    }

    #[test]
    fn two_components() {
        let edges = [(1, 2), (2, 3), (3, 4), (3, 5), (6, 5), (7, 8), (8, 7)];
        let expected = vec![0, 1, 1, 1, 1, 1, 1, 7, 7];
        assert_eq!(
            run::<Combined<VertexId, MinDef<VertexId>>>(9, &edges, EngineConfig::default()),
            expected
        );
        assert_eq!(
            run::<Mailbox<VertexId>>(9, &edges, EngineConfig::default()),
            expected
        );
    }

    #[test]
    fn isolated_vertex_keeps_its_id() {
        let opts = LoadOptions::default();
        let mut g: Graph<HashMin> = Graph::from_edges(3, [(0, 1)], &opts).unwrap();
        let summary = TaskRunner::new(&mut g, HashMin::new(), EngineConfig::default())
            .unwrap()
            .run();
        assert_eq!(*g.get(2).unwrap().state(), 2);
        assert!(g.get(2).unwrap().is_halted());
        assert!(summary.converged());
    }

    #[test]
    fn directed_labels_only_flow_forward() {
        let mut g: Graph<HashMin> =
            Graph::from_edges(3, [(2, 1), (1, 0)], &LoadOptions::default()).unwrap();
        TaskRunner::new(&mut g, HashMin::new(), EngineConfig::default())
            .unwrap()
            .run();
        // labels travel along out-edges only, so 2 never hears of 0
        let labels: Vec<_> = g.states().map(|(_, s)| *s).collect();
        assert_eq!(labels, vec![0, 0, 1]);
    }
}
