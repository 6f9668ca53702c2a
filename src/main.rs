//! ddlforge
//!
//! Dialect-aware DDL migration generator for declarative table catalogs.
//!
//! This is the command-line entry point; all work happens in `ddlforge_cli`.

use clap::Parser;
use ddlforge_cli::Cli;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so generated SQL on stdout stays clean
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    ddlforge_cli::run(cli)
}
