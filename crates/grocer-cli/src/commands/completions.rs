use std::io::{self, Write};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::aot::Generator;
use clap_complete::{generate, shells};

use crate::cli::{Cli, CompletionShell};
use crate::error::CliError;

const BIN_NAME: &str = "grocer";

pub fn run_completions(shell: CompletionShell, output_path: Option<&Path>) -> Result<(), CliError> {
    let script = completion_script(shell);

    if let Some(path) = output_path {
        std::fs::write(path, &script)?;
        println!("{}", path.display());
    } else {
        io::stdout().write_all(&script)?;
    }

    Ok(())
}

pub fn completion_script(shell: CompletionShell) -> Vec<u8> {
    let mut command = Cli::command();
    let mut script = Vec::new();
    match shell {
        CompletionShell::Bash => write_script(shells::Bash, &mut command, &mut script),
        CompletionShell::Zsh => write_script(shells::Zsh, &mut command, &mut script),
        CompletionShell::Fish => write_script(shells::Fish, &mut command, &mut script),
    }
    script
}

fn write_script<G: Generator>(generator: G, command: &mut clap::Command, script: &mut Vec<u8>) {
    generate(generator, command, BIN_NAME, script);
}
