use std::process::ExitCode;

use threepoint::services::plan_runner::run_plan_from_yaml_file;

use crate::commands::base_commands::Commands;
use crate::commands::sample_cmd::write_report;

pub fn run_command(cmd: Commands) -> ExitCode {
    if let Commands::Run {
        input,
        output,
        format,
    } = cmd
    {
        let report = match run_plan_from_yaml_file(&input) {
            Ok(report) => report,
            Err(e) => {
                eprintln!("Failed to run sampling plan: {e:?}");
                return ExitCode::FAILURE;
            }
        };
        return write_report(&report, output.as_deref(), format);
    }
    ExitCode::FAILURE
}
