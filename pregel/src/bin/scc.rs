use std::process::ExitCode;

use clap::Parser;
use pregel::{
    cli::{exit_code, run_program, EngineArgs},
    prelude::*,
};

#[derive(Parser)]
#[command(about = "Colour strongly connected components in two meta-supersteps")]
struct Args {
    #[command(flatten)]
    engine: EngineArgs,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let options = args.engine.load_options().with_in_neighbours(true);
    exit_code(run_program(&args.engine, Scc, options))
}
