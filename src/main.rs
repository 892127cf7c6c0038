//! `recurse-directory` command-line entry point.
use anyhow::Result;
use clap::Parser;

use recurse_directory::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    logging::init_subscriber(args.verbose);

    commands::run(&args, &mut std::io::stdout().lock())
}
