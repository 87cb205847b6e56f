//! PartnerBoard CLI — partner profile parsing and domain mapping.
//!
//! Reads markdown partner profiles from a data directory and renders a
//! per-partner detail view or a cross-document domain mapping.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
