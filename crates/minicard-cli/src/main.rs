//! Minicard CLI - note cards on a stage, driven from the terminal
//!
//! Every invocation loads the persisted state, runs one interaction and
//! persists the result.

mod cli;
mod clipboard;
mod commands;
mod editor;
mod error;
mod prompt;

#[cfg(test)]
mod tests;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::cards::{run_add, run_delete, run_drag, run_edit};
use crate::commands::common::CommandContext;
use crate::commands::completions::run_completions;
use crate::commands::data::{run_copy, run_export, run_import, run_reset};
use crate::commands::modes::{run_resize, run_secret};
use crate::commands::show::run_show;
use crate::commands::topic::run_topic;
use crate::error::CliError;

const DEFAULT_LOG_FILTER: &str = "minicard=warn,minicard_core=warn";

fn main() {
    if let Err(error) = run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    if let Some(Commands::Completions { shell, output }) = &cli.command {
        return run_completions(*shell, output.as_deref());
    }

    let context = CommandContext::resolve(cli.data_dir, cli.config.as_deref())?;
    match cli.command {
        Some(Commands::Show) => run_show(&context)?,
        Some(Commands::Add { content }) => run_add(&content, &context)?,
        Some(Commands::Rm { card }) => run_delete(card, &context)?,
        Some(Commands::Edit { card, text }) => run_edit(card, text, &context)?,
        Some(Commands::Drag { card, to, from }) => run_drag(card, to, from, &context)?,
        Some(Commands::Topic { command }) => run_topic(command, &context)?,
        Some(Commands::Secret) => run_secret(&context)?,
        Some(Commands::Resize { delta }) => run_resize(delta, &context)?,
        Some(Commands::Export {
            format,
            output,
            clipboard,
            pretty,
        }) => run_export(format, output.as_deref(), clipboard, pretty, &context)?,
        Some(Commands::Import { path }) => run_import(path.as_deref(), &context)?,
        Some(Commands::Copy { stdout }) => run_copy(stdout, &context)?,
        Some(Commands::Reset { confirm }) => run_reset(confirm, &context)?,
        Some(Commands::Completions { .. }) => {}
        None => {
            // Quick capture mode: minicard "my card"
            if cli.card.is_empty() {
                run_show(&context)?;
            } else {
                run_add(&cli.card, &context)?;
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
