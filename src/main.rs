//! check-node-types CLI entry point.

use std::io::Write;
use std::process::ExitCode;

use check_node_types::cli::{Cli, CommandDispatcher};
use check_node_types::ui::should_use_colors;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
///
/// Logs go to stderr so stdout only carries the report.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("check_node_types=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("check_node_types=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("check-node-types starting with args: {:?}", cli);

    let dispatcher = CommandDispatcher::new(should_use_colors());
    let mut stdout = std::io::stdout().lock();

    match dispatcher.dispatch(&cli, &mut stdout) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            let _ = stdout.flush();
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
