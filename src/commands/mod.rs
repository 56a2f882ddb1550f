pub mod base_commands;
pub mod completions_cmd;
pub mod run_cmd;
pub mod sample_cmd;
