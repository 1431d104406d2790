//! CLI command definitions and argument parsing.
//!
//! This module defines all the CLI commands and their arguments using the clap crate.
//! Each command group lives in its own file.

use clap::Command;

pub mod cache_settings;
pub mod config;
pub mod edge_applications;
pub mod params;

/// Build the whole command-line interface.
pub fn build_cli() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .propagate_version(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(params::verbose_parameter())
        .subcommand(cache_settings::cache_settings_command())
        .subcommand(edge_applications::edge_applications_command())
        .subcommand(config::config_command())
}
