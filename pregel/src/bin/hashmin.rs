use std::process::ExitCode;

use clap::Parser;
use pregel::{
    cli::{exit_code, run_program, EngineArgs},
    prelude::*,
};

#[derive(Parser)]
#[command(about = "Label every vertex with the smallest id that reaches it")]
struct Args {
    #[command(flatten)]
    engine: EngineArgs,

    /// Deliver every message instead of combining them on arrival
    #[arg(long, env = "PREGEL_DIRECT")]
    direct: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let options = args.engine.load_options();
    let res = if args.direct {
        run_program(&args.engine, HashMin::<Mailbox<VertexId>>::with_inbox(), options)
    } else {
        run_program(&args.engine, HashMin::new(), options)
    };
    exit_code(res)
}
