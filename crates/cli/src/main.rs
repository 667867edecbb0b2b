use clap::Parser;
use log::{debug, info, warn};
use shell_launcher_cli::cli_args::Args;
use shell_launcher_cli::command_selection::{
    prompt_for_command_choice, CommandChoice, InteractionController,
};
use shell_launcher_core::error::Result;
use shell_launcher_core::execution::{self, ExecutionReport};
use shell_launcher_core::file_handling;
use std::process::ExitCode;

fn execute() -> Result<ExitCode> {
    let args = Args::parse();
    let config = args.launcher_config()?;
    debug!("Source path: `{}`", config.source_path);

    let commands = file_handling::load_commands(&config)?;
    let controller = InteractionController::new(&commands, config.edit_before_run);

    let raw = match prompt_for_command_choice(controller)? {
        CommandChoice::Quit => {
            info!("No command chosen");
            return Ok(ExitCode::SUCCESS);
        }
        CommandChoice::Run(raw) => raw,
    };

    let handoff_path = config.handoff_path.as_deref();
    if handoff_path.is_none() {
        println!("Executing: {raw}");
        println!("{}", "-".repeat(40));
    }

    let report = execution::execute(&raw, handoff_path, &config.shell)?;

    Ok(report_outcome(&report))
}

/// Print what the command did to the launcher and pick the exit code.
fn report_outcome(report: &ExecutionReport) -> ExitCode {
    if let Some(directory_change) = &report.directory_change {
        println!("{directory_change}");
    }

    if report.is_success() {
        return ExitCode::SUCCESS;
    }

    match report.exit_status.and_then(|status| status.code()) {
        Some(code) => {
            eprintln!("Command exited with code {code}");
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
        None => {
            warn!("Command was terminated by a signal");
            eprintln!("Command was terminated by a signal");
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
