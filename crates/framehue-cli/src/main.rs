#![forbid(unsafe_code)]

//! # Framehue
//!
//! Window theme allocation from the command line.
//!
//! ## Usage
//!
//! ```bash
//! framehue palette                  # Palette for the detected mode
//! framehue --mode dark detect       # Show the resolved mode
//! echo "open 1" | framehue replay   # Replay events from stdin
//! ```

use std::io;

use framehue_cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    init_tracing(&cli);

    let stdout = io::stdout();
    framehue_cli::run(&cli, &mut stdout.lock())
}

/// Logs go to stderr; `FRAMEHUE_LOG` then `RUST_LOG` override `-v`.
fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::try_from_env("FRAMEHUE_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
