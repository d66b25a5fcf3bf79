//! CLI entry point for the ring cellular automaton tool

use clap::Parser;
use ringca::io::cli::{Cli, CommandRunner};

fn main() -> ringca::Result<()> {
    let cli = Cli::parse();
    cli.init_logging();
    let runner = CommandRunner::new(cli);
    runner.run()
}
