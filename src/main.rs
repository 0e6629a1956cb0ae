mod cli;
mod errors;
mod logging;

use chunked_fizzbuzz::{sink, Emitter};
use clap::Parser;

use crate::cli::Cli;

fn main() -> color_eyre::Result<()> {
    crate::errors::init()?;
    crate::logging::init()?;

    let cli = Cli::parse();
    let mut stdout = sink::Stdout::new();

    match Emitter::new(cli.chunk).run(&cli.length, &mut stdout) {
        Ok(summary) => {
            tracing::info!(chunks = %summary.chunks, lines = %summary.lines, "finished");
            Ok(())
        }
        Err(e) if e.is_broken_pipe() => {
            tracing::debug!("stdout closed by reader");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
