//! CLI entry point for the shape search tool

use clap::Parser;
use shapesearch::io::cli::{Cli, Runner};

fn main() -> shapesearch::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    Runner::new(cli).run()
}
