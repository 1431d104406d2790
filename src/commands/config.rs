//! Configuration command definitions.
//!
//! This module defines CLI commands related to configuration management.

use crate::commands::params::{
    format_parameter, format_pretty_parameter, COMMAND_CONFIG, COMMAND_PATH, COMMAND_SHOW,
};
use clap::Command;

/// Create the config command with all its subcommands.
pub fn config_command() -> Command {
    Command::new(COMMAND_CONFIG)
        .about("Configuration management")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_SHOW)
                .about("Show the active configuration (the token is masked)")
                .arg(format_parameter())
                .arg(format_pretty_parameter()),
        )
        .subcommand(Command::new(COMMAND_PATH).about("Show configuration file path"))
}
