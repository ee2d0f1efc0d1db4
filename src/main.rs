use anyhow::Result;
use clap::Parser;
use folder_sorter::cli::{Cli, run_cli};
use folder_sorter::output::OutputFormatter;
use std::process::exit;
use tracing::Level;

fn main() {
    if let Err(err) = inner_main() {
        OutputFormatter::error(&format!("Error: {err}"));
        exit(1);
    }
}

/// Parses arguments, sets up diagnostics and runs the organizer.
///
/// Per-file failures are reported by the run itself and do not make this
/// function fail; only bad input and unexpected I/O errors do.
fn inner_main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_level());
    OutputFormatter::set_color(!cli.no_color);

    run_cli(&cli)?;
    Ok(())
}

fn init_tracing(level: Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
