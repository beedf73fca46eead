use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use modpack_patcher::{cli, commands, logging};

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    logging::init_subscriber(args.verbose);
    let log = Arc::new(logging::Logger::new());

    match args.command {
        cli::Command::Apply(opts) => commands::apply::run(&args.global, &opts, &log),
        cli::Command::Version => {
            commands::version::run();
            Ok(())
        }
    }
}
