//! `tasks`: interactive task manager shell.
//!
//! # Usage
//!
//! ```bash
//! # Talk to a server on the default origin (http://127.0.0.1:8080)
//! cargo run --bin tasks
//!
//! # Or point it elsewhere
//! cargo run --bin tasks -- --base-url http://tasks.local:9000
//! TASKS_BASE_URL=http://tasks.local:9000 cargo run --bin tasks
//! ```

use clap::Parser;
use task_cli::config::{CliArgs, Config};
use task_cli::shell::Shell;
use task_cli::transport::UreqTransport;
use task_core::{TaskApi, TaskClient, TaskController};

fn main() {
    let cli = CliArgs::parse();

    let config = match Config::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    // Logs go to stderr so they never interleave with the rendered view.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(base_url = %config.base_url, "starting task shell");

    let api = TaskApi::new(TaskClient::new(&config.base_url), UreqTransport::new());
    let mut shell = Shell::new(TaskController::new(api));

    let stdin = std::io::stdin();
    if let Err(e) = shell.run(stdin.lock(), std::io::stdout()) {
        tracing::error!(error = %e, "terminal I/O failed");
        std::process::exit(1);
    }
}
