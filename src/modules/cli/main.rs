//! shellcomp CLI
//!
//! Generates shell completion scripts from a declarative CLI description.

use clap::Parser;
use shellcomp_cli::{Cli, Commands};
use shellcomp_core::CompletionError;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_code(&e));
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; scripts go to stdout so diagnostics stay on stderr
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Generate(cmd) => cmd.execute(&cli.file)?,
        Commands::Markdown(cmd) => cmd.execute(&cli.file)?,
        Commands::Check(cmd) => cmd.execute(&cli.file)?,
        Commands::Completion(cmd) => cmd.execute()?,
    }

    Ok(())
}

fn exit_code(error: &anyhow::Error) -> i32 {
    error
        .downcast_ref::<CompletionError>()
        .map_or(1, CompletionError::exit_code)
}
