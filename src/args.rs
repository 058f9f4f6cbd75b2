//! Command-line argument parsing and processing.
//!
//! Hand-rolled parser supporting subcommand syntax plus the standard help,
//! version, and debug flags, gracefully handling unknown options by showing
//! usage instead of panicking.

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run the HTTP API server
    Serve {
        debug_enabled: bool,
        config_dir: Option<String>,
    },
    /// One-shot CSV import into the place store
    Import {
        debug_enabled: bool,
        csv_path: String,
        config_dir: Option<String>,
    },
    /// Evaluate and print sun/shade for one or all stored places
    Check {
        debug_enabled: bool,
        place_id: Option<String>,
        /// Wall-clock time `HH:MM`; None means now
        at: Option<String>,
        config_dir: Option<String>,
    },

    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown arguments and exit with failure
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// The first non-flag argument selects the subcommand; flags may appear
    /// in any position after it.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut debug_enabled = false;
        let mut config_dir: Option<String> = None;
        let mut subcommand: Option<String> = None;
        let mut positionals: Vec<String> = Vec::new();
        let mut at: Option<String> = None;

        let mut i = 0;
        while i < args_vec.len() {
            let arg = args_vec[i].as_str();
            match arg {
                "-h" | "--help" => {
                    return ParsedArgs {
                        action: CliAction::ShowHelp,
                    };
                }
                "-V" | "--version" => {
                    return ParsedArgs {
                        action: CliAction::ShowVersion,
                    };
                }
                "-d" | "--debug" => debug_enabled = true,
                "--config-dir" => {
                    i += 1;
                    match args_vec.get(i) {
                        Some(dir) => config_dir = Some(dir.clone()),
                        None => {
                            return ParsedArgs {
                                action: CliAction::ShowHelpDueToError,
                            };
                        }
                    }
                }
                "--at" => {
                    i += 1;
                    match args_vec.get(i) {
                        Some(time) => at = Some(time.clone()),
                        None => {
                            return ParsedArgs {
                                action: CliAction::ShowHelpDueToError,
                            };
                        }
                    }
                }
                _ if arg.starts_with('-') => {
                    return ParsedArgs {
                        action: CliAction::ShowHelpDueToError,
                    };
                }
                _ if subcommand.is_none() => subcommand = Some(arg.to_string()),
                _ => positionals.push(arg.to_string()),
            }
            i += 1;
        }

        let action = match subcommand.as_deref() {
            Some("serve") | None if positionals.is_empty() && at.is_none() => CliAction::Serve {
                debug_enabled,
                config_dir,
            },
            Some("import") => match positionals.as_slice() {
                [csv_path] => CliAction::Import {
                    debug_enabled,
                    csv_path: csv_path.clone(),
                    config_dir,
                },
                _ => CliAction::ShowHelpDueToError,
            },
            Some("check") if positionals.len() <= 1 => CliAction::Check {
                debug_enabled,
                place_id: positionals.first().cloned(),
                at,
                config_dir,
            },
            _ => CliAction::ShowHelpDueToError,
        };

        ParsedArgs { action }
    }
}

/// Print usage information.
pub fn display_help() {
    log_version!();
    log_block_start!("Usage: sunnyside [COMMAND] [OPTIONS]");
    log_indented!("serve                 Run the HTTP API (default)");
    log_indented!("import <places.csv>   Import places from a CSV file");
    log_indented!("check [PLACE_ID]      Print sun/shade for stored places");
    log_block_start!("Options:");
    log_indented!("--at HH:MM            Evaluate at a wall-clock time (check)");
    log_indented!("--config-dir <DIR>    Use an alternate configuration directory");
    log_indented!("-d, --debug           Enable debug output");
    log_indented!("-h, --help            Show this help");
    log_indented!("-V, --version         Show version");
    log_end!();
}

/// Print version information.
pub fn display_version() {
    log_version!();
    log_block_start!("Sun-or-shade evaluation for mapped outdoor places");
    log_end!();
}
