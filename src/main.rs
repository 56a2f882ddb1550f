mod commands;

use std::process::ExitCode;

use crate::commands::base_commands::{CliArgs, Commands};
use crate::commands::completions_cmd::completions_command;
use crate::commands::run_cmd::run_command;
use crate::commands::sample_cmd::sample_command;
use clap::Parser;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    match args.command {
        cmd @ (Commands::Triangular { .. } | Commands::Pert { .. }) => sample_command(cmd),
        cmd @ Commands::Run { .. } => run_command(cmd),
        Commands::Completions { shell } => {
            completions_command(shell);
            ExitCode::SUCCESS
        }
    }
}
