use std::process::ExitCode;

use clap::Parser;
use pregel::{
    algorithms::centrality::pagerank::DEFAULT_DAMPING,
    cli::{exit_code, run_program, EngineArgs},
    prelude::*,
};

#[derive(Parser)]
#[command(about = "PageRank over a fixed number of iterations")]
struct Args {
    #[command(flatten)]
    engine: EngineArgs,

    #[arg(long, env = "PREGEL_ITERATIONS", default_value_t = 20)]
    iterations: usize,

    #[arg(long, env = "PREGEL_DAMPING", default_value_t = DEFAULT_DAMPING)]
    damping: f64,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let options = args.engine.load_options();
    let program = PageRank::new(args.iterations).with_damping(args.damping);
    exit_code(run_program(&args.engine, program, options))
}
