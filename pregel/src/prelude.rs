pub use crate::{
    algorithms::{
        centrality::pagerank::PageRank,
        components::{
            hashmin::HashMin,
            scc::{Scc, SccState},
        },
        pathing::sssp::Sssp,
    },
    core::{state::inbox::{Combined, Inbox, Mailbox}, utils::errors::GraphError},
    db::{
        graph::{graph::Graph, vertex::Vertex},
        task::{
            config::EngineConfig,
            task::{Program, Step},
            task_runner::{EngineState, PhaseSummary, RunSummary, TaskRunner},
            vertex::eval_vertex::EvalVertexView,
        },
    },
    graph_loader::{
        source::{binary_loader::BinaryLoader, text_loader::TextLoader},
        LoadOptions,
    },
    serialise::{dump, dump_to_path, read_dump, VertexCodec},
};
pub use pregel_api::core::{
    entities::{EdgeWeight, VertexId, VID},
    state::agg::{Combiner, MaxDef, MinDef, SumDef},
    storage::lock::LockStrategy,
    Direction,
};
