//! Main application entry point and high-level flow coordination.
//!
//! This module dispatches the parsed command line:
//!
//! - `args`: Command-line argument parsing and help/version display
//! - `AgentRunner`: configuration, bus connection, registration, dispatch loop
//!   and unregistering
//!
//! Exit status is 0 for a normal run, `--help` and `--version`, and 1 for any
//! argument or setup failure. A failure while unregistering at shutdown is
//! reported but does not change the exit status.

use service_agent::args::{self, CliAction, ParsedArgs};
use service_agent::common::constants::{EXIT_FAILURE, EXIT_SUCCESS};
use service_agent::{AgentRunner, log_error_exit, log_indented};

fn main() {
    // Parse command-line arguments
    let parsed_args = ParsedArgs::from_env();

    let exit_code = match parsed_args.action {
        CliAction::ShowVersion => {
            args::display_version_info();
            EXIT_SUCCESS
        }
        CliAction::ShowHelp => {
            args::display_help();
            EXIT_SUCCESS
        }
        CliAction::ShowHelpDueToError => {
            args::display_help();
            EXIT_FAILURE
        }
        CliAction::InvalidPath(path) => {
            log_error_exit!("Invalid path: {path}");
            log_indented!("The service path must start with '/'");
            EXIT_FAILURE
        }
        CliAction::Run {
            name,
            description,
            path,
            debug_enabled,
            config_dir,
        } => {
            let result = AgentRunner::new(debug_enabled)
                .with_name(name)
                .with_description(description)
                .with_path(path)
                .with_config_dir(config_dir)
                .run();

            match result {
                Ok(()) => EXIT_SUCCESS,
                Err(e) => {
                    log_error_exit!("{e}");
                    // Print the error chain in the default format
                    eprintln!("{e:?}");
                    EXIT_FAILURE
                }
            }
        }
    };

    std::process::exit(exit_code);
}
