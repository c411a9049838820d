//! Shared command-line surface of the bundled binaries.
//!
//! Every binary takes `<input_path> <output_path>`, loads the graph, runs its
//! program to convergence and dumps the vertex payloads. Any failure ends the
//! process with a diagnostic on stderr and a non-zero exit status.

use std::{fmt::Display, path::PathBuf, process::ExitCode};

use clap::{Args, ValueEnum};
use pregel_api::core::{
    entities::VertexId,
    storage::lock::LockStrategy,
    utils::logging::{init_logging, DEFAULT_LOG_LEVEL},
};
use tracing::info;

use crate::{
    core::utils::errors::GraphError,
    db::{
        graph::graph::Graph,
        task::{
            config::EngineConfig,
            task::Program,
            task_runner::{RunSummary, TaskRunner},
        },
    },
    graph_loader::{
        source::{binary_loader::BinaryLoader, text_loader::TextLoader},
        LoadOptions,
    },
    serialise::{dump_to_path, VertexCodec},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// `<vertex_count> <edge_count>` header, then one edge per line
    Text,
    /// per-vertex adjacency records
    Binary,
}

#[derive(Args, Debug, Clone)]
pub struct EngineArgs {
    /// Graph to load
    pub input: PathBuf,

    /// File the binary dump is written to
    pub output: PathBuf,

    #[arg(long, value_enum, env = "PREGEL_FORMAT", default_value_t = InputFormat::Text)]
    pub format: InputFormat,

    /// Worker threads, defaults to PREGEL_MAX_THREADS or the available parallelism
    #[arg(long, env = "PREGEL_THREADS")]
    pub threads: Option<usize>,

    /// Per-vertex lock, `mutex` or `spin`
    #[arg(long, env = "PREGEL_LOCK", default_value_t = LockStrategy::Mutex)]
    pub lock: LockStrategy,

    /// Scan every vertex each superstep instead of tracking the active ones
    #[arg(long, env = "PREGEL_NO_SPREAD")]
    pub no_spread: bool,

    /// Smallest vertex id of the input
    #[arg(long, env = "PREGEL_ID_OFFSET", default_value_t = 0)]
    pub id_offset: VertexId,

    /// Add the reverse of every text edge
    #[arg(long, env = "PREGEL_UNDIRECTED")]
    pub undirected: bool,

    /// Binary adjacency lists carry edge weights
    #[arg(long, env = "PREGEL_WEIGHTED")]
    pub weighted: bool,

    /// Cap on the supersteps of each meta-superstep
    #[arg(long, env = "PREGEL_MAX_SUPERSTEPS")]
    pub max_supersteps: Option<usize>,

    #[arg(long, env = "PREGEL_LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    /// Show a progress bar while dumping
    #[arg(long, env = "PREGEL_PROGRESS")]
    pub progress: bool,
}

impl EngineArgs {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions::default()
            .with_id_offset(self.id_offset)
            .with_lock_strategy(self.lock)
            .with_undirected(self.undirected)
            .with_weighted(self.weighted)
    }

    pub fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig::default().with_spread(!self.no_spread);
        if let Some(threads) = self.threads {
            config = config.with_num_threads(threads);
        }
        if let Some(max) = self.max_supersteps {
            config = config.with_max_supersteps(max);
        }
        config
    }

    pub fn load<P: Program>(&self, options: &LoadOptions) -> Result<Graph<P>, GraphError> {
        match self.format {
            InputFormat::Text => TextLoader::new(&self.input).with_options(*options).load(),
            InputFormat::Binary => BinaryLoader::new(&self.input).with_options(*options).load(),
        }
    }
}

/// Load, run to convergence, dump.
pub fn run_program<P>(
    args: &EngineArgs,
    program: P,
    options: LoadOptions,
) -> Result<RunSummary, GraphError>
where
    P: Program,
    P::State: VertexCodec,
{
    init_logging(&args.log_level);

    let mut graph: Graph<P> = args.load(&options)?;
    let summary = TaskRunner::new(&mut graph, program, args.engine_config())?.run();
    info!(
        supersteps = summary.supersteps(),
        messages = summary.messages(),
        "computation finished in {:?}",
        summary.elapsed
    );

    dump_to_path(&graph, &args.output, args.progress)?;
    Ok(summary)
}

/// Maps the outcome of a binary onto its exit status.
pub fn exit_code<T, E: Display>(res: Result<T, E>) -> ExitCode {
    match res {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod cli_test {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        engine: EngineArgs,
    }

    #[test]
    fn defaults() {
        let cli = TestCli::try_parse_from(["prog", "in.txt", "out.bin"]).unwrap();
        let args = cli.engine;
        assert_eq!(args.input, PathBuf::from("in.txt"));
        assert_eq!(args.format, InputFormat::Text);
        assert_eq!(args.load_options(), LoadOptions::default());
        assert_eq!(args.engine_config(), EngineConfig::default());
    }

    #[test]
    fn flags_reach_the_options() {
        let cli = TestCli::try_parse_from([
            "prog",
            "in.bin",
            "out.bin",
            "--format",
            "binary",
            "--lock",
            "spin",
            "--no-spread",
            "--id-offset",
            "1",
            "--threads",
            "3",
            "--max-supersteps",
            "7",
        ])
        .unwrap();
        let args = cli.engine;
        assert_eq!(args.format, InputFormat::Binary);
        let opts = args.load_options();
        assert_eq!(opts.lock_strategy, LockStrategy::Spin);
        assert_eq!(opts.id_offset, 1);
        let config = args.engine_config();
        assert!(!config.spread);
        assert_eq!(config.num_threads, Some(3));
        assert_eq!(config.max_supersteps, 7);
    }

    #[test]
    fn wrong_arity_is_an_argument_error() {
        assert!(TestCli::try_parse_from(["prog", "only-input"]).is_err());
        assert!(TestCli::try_parse_from(["prog", "a", "b", "c"]).is_err());
        assert!(TestCli::try_parse_from(["prog", "a", "b", "--lock", "futex"]).is_err());
    }
}
