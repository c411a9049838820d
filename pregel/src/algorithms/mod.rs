//! Vertex programs that ship with the engine.
//!
//! Each one is a [`Program`](crate::db::task::task::Program) run through a
//! [`TaskRunner`](crate::db::task::task_runner::TaskRunner).
//!
//! # Examples
//!
//! ```rust
//! use pregel::prelude::*;
//!
//! let opts = LoadOptions::default().with_undirected(true);
//! let mut g: Graph<HashMin> = Graph::from_edges(5, [(0, 1), (1, 2), (3, 4)], &opts).unwrap();
//! TaskRunner::new(&mut g, HashMin::new(), EngineConfig::default())
//!     .unwrap()
//!     .run();
//!
//! let components: Vec<_> = g.states().map(|(_, c)| *c).collect();
//! assert_eq!(components, vec![0, 0, 0, 3, 3]);
//! ```

pub mod centrality;
pub mod components;
pub mod pathing;
