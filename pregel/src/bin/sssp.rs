use std::process::ExitCode;

use clap::Parser;
use pregel::{
    cli::{exit_code, run_program, EngineArgs},
    prelude::*,
};

#[derive(Parser)]
#[command(about = "Shortest path distances from a single source")]
struct Args {
    #[command(flatten)]
    engine: EngineArgs,

    /// Id of the source vertex
    #[arg(long, env = "PREGEL_SOURCE", default_value_t = 0)]
    source: VertexId,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let options = args.engine.load_options();
    exit_code(run_program(&args.engine, Sssp::new(args.source), options))
}
