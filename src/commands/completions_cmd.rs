use std::io;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::commands::base_commands::CliArgs;

pub fn completions_command(shell: Shell) {
    let mut command = CliArgs::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut io::stdout());
}
