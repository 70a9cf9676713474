//! md2confl CLI - Markdown to Confluence wiki markup converter.
//!
//! Provides commands for:
//! - `convert`: Convert a markdown file (or stdin) to wiki markup
//! - `languages`: List code block languages or resolve a fence hint

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ConvertArgs, LanguagesArgs};
use output::Output;

/// md2confl - Markdown to Confluence wiki markup converter.
#[derive(Parser)]
#[command(name = "md2confl", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert markdown to Confluence wiki markup.
    Convert(ConvertArgs),
    /// List supported code block languages.
    Languages(LanguagesArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Convert(args) if args.verbose);

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN.
    // Logs go to stderr so stdout carries only markup.
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Convert(args) => args.execute(&output),
        Commands::Languages(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
