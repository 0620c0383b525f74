//! Command-line argument parsing and processing.
//!
//! This module handles parsing of command-line arguments and provides a clean
//! interface for the main application logic. Options are processed strictly in
//! order: the first `--help`, `--version`, invalid path or unknown option
//! decides the action, and parsing stops at the first non-option argument.

use crate::common::constants::DEFAULT_PATH_PREFIX;

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run the agent with these settings. `None` fields fall back to the
    /// configuration file and then to built-in defaults.
    Run {
        name: Option<String>,
        description: Option<String>,
        path: Option<String>,
        debug_enabled: bool,
        config_dir: Option<String>,
    },
    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown or incomplete arguments and exit with failure
    ShowHelpDueToError,
    /// `--path` was given something that is not an absolute object path
    InvalidPath(String),
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

/// Options that consume a value.
#[derive(Debug, Clone, Copy)]
enum ValueOption {
    Name,
    Description,
    Path,
    Config,
}

impl ValueOption {
    fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            "--name" | "-n" => Some(Self::Name),
            "--description" | "-d" => Some(Self::Description),
            "--path" | "-p" => Some(Self::Path),
            "--config" | "-c" => Some(Self::Config),
            _ => None,
        }
    }

    fn usage(self) -> &'static str {
        match self {
            Self::Name => "--name <service-name>",
            Self::Description => "--description <service-description>",
            Self::Path => "--path <service-path>",
            Self::Config => "--config <directory>",
        }
    }
}

/// Split `--flag=value` and `-Xvalue` forms into flag and inline value.
fn split_inline_value(arg: &str) -> (&str, Option<&str>) {
    if arg.starts_with("--") {
        match arg.split_once('=') {
            Some((flag, value)) => (flag, Some(value)),
            None => (arg, None),
        }
    } else if arg.len() > 2 && arg.is_char_boundary(2) {
        let (flag, value) = arg.split_at(2);
        if ValueOption::from_flag(flag).is_some() {
            (flag, Some(value))
        } else {
            (arg, None)
        }
    } else {
        (arg, None)
    }
}

/// Check that a service path is usable as an object path root.
pub fn is_valid_service_path(path: &str) -> bool {
    path.starts_with('/')
}

/// Build the default object path for a process id.
pub fn default_service_path(pid: u32) -> String {
    format!("{DEFAULT_PATH_PREFIX}{pid}")
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// # Arguments
    /// * `args` - Iterator over command-line arguments (typically from std::env::args()),
    ///   including the program name
    ///
    /// # Returns
    /// ParsedArgs containing the determined action
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut name: Option<String> = None;
        let mut description: Option<String> = None;
        let mut path: Option<String> = None;
        let mut config_dir: Option<String> = None;
        let mut debug_enabled = false;

        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut i = 0;
        while i < args_vec.len() {
            let arg = args_vec[i].as_str();

            // Option processing ends at "--" or the first operand
            if arg == "--" || arg == "-" || !arg.starts_with('-') {
                break;
            }

            let (flag, inline_value) = split_inline_value(arg);

            match flag {
                "--help" | "-h" => {
                    return ParsedArgs {
                        action: CliAction::ShowHelp,
                    };
                }
                "--version" | "-V" => {
                    return ParsedArgs {
                        action: CliAction::ShowVersion,
                    };
                }
                "--debug" if inline_value.is_none() => debug_enabled = true,
                _ => {
                    let Some(option) = ValueOption::from_flag(flag) else {
                        log_warning!("Unknown option: {arg}");
                        return ParsedArgs {
                            action: CliAction::ShowHelpDueToError,
                        };
                    };

                    let value = match inline_value {
                        Some(value) => value.to_string(),
                        None if i + 1 < args_vec.len() => {
                            i += 1;
                            args_vec[i].clone()
                        }
                        None => {
                            log_warning!("Missing value for {flag}. Usage: {}", option.usage());
                            return ParsedArgs {
                                action: CliAction::ShowHelpDueToError,
                            };
                        }
                    };

                    match option {
                        ValueOption::Name => name = Some(value),
                        ValueOption::Description => description = Some(value),
                        ValueOption::Config => config_dir = Some(value),
                        ValueOption::Path => {
                            if !is_valid_service_path(&value) {
                                return ParsedArgs {
                                    action: CliAction::InvalidPath(value),
                                };
                            }
                            path = Some(value);
                        }
                    }
                }
            }
            i += 1;
        }

        ParsedArgs {
            action: CliAction::Run {
                name,
                description,
                path,
                debug_enabled,
                config_dir,
            },
        }
    }

    /// Convenience method to parse from std::env::args()
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    println!("┗ {}", env!("CARGO_PKG_DESCRIPTION"));
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    log_version!();
    log_block_start!(env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!(
        "service-agent [--name service-name] [--description service-description] [--path service-path]"
    );
    log_block_start!("Options:");
    log_indented!("-n, --name <name>          Service name (default: \"Example service\")");
    log_indented!("-d, --description <text>   Service description");
    log_indented!("-p, --path <path>          Object path, must start with '/'");
    log_indented!("                           (default: /org/bluez/service_agent_<pid>)");
    log_indented!("-c, --config <dir>         Use custom configuration directory");
    log_indented!("    --debug                Enable detailed debug output");
    log_indented!("-h, --help                 Print help information");
    log_indented!("-V, --version              Print version information");
    log_end!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn run_action(
        name: Option<&str>,
        description: Option<&str>,
        path: Option<&str>,
        debug_enabled: bool,
    ) -> CliAction {
        CliAction::Run {
            name: name.map(String::from),
            description: description.map(String::from),
            path: path.map(String::from),
            debug_enabled,
            config_dir: None,
        }
    }

    #[test]
    fn test_parse_no_args() {
        let parsed = ParsedArgs::parse(vec!["service-agent"]);
        assert_eq!(parsed.action, run_action(None, None, None, false));
    }

    #[test]
    fn test_parse_all_long_options() {
        let parsed = ParsedArgs::parse(vec![
            "service-agent",
            "--name",
            "Serial",
            "--description",
            "A serial port",
            "--path",
            "/org/example/serial",
        ]);
        assert_eq!(
            parsed.action,
            run_action(
                Some("Serial"),
                Some("A serial port"),
                Some("/org/example/serial"),
                false
            )
        );
    }

    #[test]
    fn test_parse_short_and_inline_forms() {
        let parsed = ParsedArgs::parse(vec![
            "service-agent",
            "-nSerial",
            "--description=A serial port",
            "-p",
            "/org/example/serial",
        ]);
        assert_eq!(
            parsed.action,
            run_action(
                Some("Serial"),
                Some("A serial port"),
                Some("/org/example/serial"),
                false
            )
        );
    }

    #[test]
    fn test_parse_help_flag() {
        let parsed = ParsedArgs::parse(vec!["service-agent", "--help"]);
        assert_eq!(parsed.action, CliAction::ShowHelp);

        let parsed = ParsedArgs::parse(vec!["service-agent", "-h"]);
        assert_eq!(parsed.action, CliAction::ShowHelp);
    }

    #[test]
    fn test_parse_version_flag() {
        let parsed = ParsedArgs::parse(vec!["service-agent", "-V"]);
        assert_eq!(parsed.action, CliAction::ShowVersion);
    }

    #[test]
    fn test_relative_path_is_invalid() {
        let parsed = ParsedArgs::parse(vec!["service-agent", "--path", "org/bluez/agent"]);
        assert_eq!(
            parsed.action,
            CliAction::InvalidPath("org/bluez/agent".to_string())
        );
    }

    #[test]
    fn test_invalid_path_before_help_wins() {
        // Options are processed in order
        let parsed = ParsedArgs::parse(vec!["service-agent", "-p", "relative", "--help"]);
        assert_eq!(parsed.action, CliAction::InvalidPath("relative".to_string()));

        let parsed = ParsedArgs::parse(vec!["service-agent", "--help", "-p", "relative"]);
        assert_eq!(parsed.action, CliAction::ShowHelp);
    }

    #[test]
    fn test_parse_unknown_flag() {
        let parsed = ParsedArgs::parse(vec!["service-agent", "--unknown"]);
        assert_eq!(parsed.action, CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_missing_value() {
        let parsed = ParsedArgs::parse(vec!["service-agent", "--name"]);
        assert_eq!(parsed.action, CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_option_value_may_start_with_dash() {
        let parsed = ParsedArgs::parse(vec!["service-agent", "--description", "-x-"]);
        assert_eq!(parsed.action, run_action(None, Some("-x-"), None, false));
    }

    #[test]
    fn test_stops_at_first_operand() {
        let parsed = ParsedArgs::parse(vec!["service-agent", "-n", "A", "extra", "--bogus"]);
        assert_eq!(parsed.action, run_action(Some("A"), None, None, false));
    }

    #[test]
    fn test_debug_and_config_dir() {
        let parsed = ParsedArgs::parse(vec!["service-agent", "--debug", "-c", "/tmp/agent"]);
        assert_eq!(
            parsed.action,
            CliAction::Run {
                name: None,
                description: None,
                path: None,
                debug_enabled: true,
                config_dir: Some("/tmp/agent".to_string()),
            }
        );
    }

    #[test]
    fn test_default_service_path_contains_pid() {
        assert_eq!(default_service_path(4242), "/org/bluez/service_agent_4242");
        assert!(is_valid_service_path(&default_service_path(1)));
    }

    proptest! {
        #[test]
        fn prop_path_acceptance_follows_leading_slash(path in "[a-z/_0-9]{1,24}") {
            let parsed = ParsedArgs::parse(vec!["service-agent", "--path", path.as_str()]);
            if path.starts_with('/') {
                prop_assert_eq!(parsed.action, run_action(None, None, Some(&path), false));
            } else {
                prop_assert_eq!(parsed.action, CliAction::InvalidPath(path.clone()));
            }
        }
    }
}
