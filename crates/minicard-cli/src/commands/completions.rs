use std::fs::File;
use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::error::CliError;

/// Write the completion script for `shell` to `output_path`, or stdout
pub fn run_completions(shell: Shell, output_path: Option<&Path>) -> Result<(), CliError> {
    let mut command = Cli::command();
    let bin_name = command.get_name().to_string();

    match output_path {
        Some(path) => {
            let mut file = File::create(path)?;
            generate(shell, &mut command, bin_name, &mut file);
            println!("{}", path.display());
        }
        None => generate(shell, &mut command, bin_name, &mut io::stdout()),
    }

    Ok(())
}
