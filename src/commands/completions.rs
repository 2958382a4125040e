//! # Completions Command
//!
//! Prints a completion script for `datacatalog-custom-entries` to stdout.
//!
//! Input and catalog file options carry a file-path hint, so shells that
//! understand hints complete paths after `--csv-file`, `--json-file` and
//! `--catalog-file`. `--color` completes to its three accepted values.
//!
//! ```bash
//! datacatalog-custom-entries completions bash > ~/.local/share/bash-completion/completions/datacatalog-custom-entries
//! datacatalog-custom-entries completions zsh > ~/.zfunc/_datacatalog-custom-entries
//! ```

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io::{self, Write};

use crate::cli::Cli;

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Execute the `completions` command.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(&render(args.shell))?;
    stdout.flush()?;
    Ok(())
}

/// Renders the completion script for `shell`.
fn render(shell: Shell) -> Vec<u8> {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    let mut script = Vec::new();
    generate(shell, &mut cmd, bin_name, &mut script);
    script
}
