//! # pregel
//!
//! A vertex-centric, bulk-synchronous-parallel graph engine.
//!
//! A graph is loaded once into a vertex store, then a user supplied
//! [`Program`](crate::db::task::task::Program) runs on every active vertex in
//! synchronised rounds (supersteps). Vertices exchange messages along edges;
//! a message sent in superstep `n` is visible to its target in superstep
//! `n + 1`. A run converges when every vertex has voted to halt and no
//! message is in flight. Several independent runs (meta-supersteps) can be
//! chained over the same vertex state for multi-phase algorithms.
//!
//! Messages are either delivered into an unbounded mailbox or reduced on
//! arrival with a [`Combiner`](pregel_api::core::state::agg::Combiner); the
//! choice is made at compile time through the program's `Inbox` type.
//!
//! ```no_run
//! use pregel::prelude::*;
//!
//! let mut graph: Graph<HashMin> = TextLoader::new("graph.txt")
//!     .with_options(LoadOptions::default().with_undirected(true))
//!     .load()
//!     .expect("failed to load graph");
//!
//! let summary = TaskRunner::new(&mut graph, HashMin::new(), EngineConfig::default())
//!     .expect("failed to build thread pool")
//!     .run();
//! println!("converged after {} supersteps", summary.supersteps());
//!
//! dump_to_path(&graph, "components.bin", false).expect("failed to dump");
//! ```

pub mod algorithms;
pub mod cli;
pub mod core;
pub mod db;
pub mod graph_loader;
pub mod prelude;
pub mod serialise;
