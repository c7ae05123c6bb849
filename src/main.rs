use anyhow::Context;
use clap::Parser;

use jsonshape::cli::{self, Args, CliConfig};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Set up logging
    cli::init_logging(args.verbose, args.quiet);

    let config = CliConfig::from_args(args).context("Invalid command-line options")?;

    if let Err(e) = cli::run(&config) {
        cli::handle_error(&e);
        std::process::exit(1);
    }

    Ok(())
}
