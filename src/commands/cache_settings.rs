//! Cache settings command definitions.

use crate::commands::params::{
    application_id_parameter, cache_setting_field_parameters, cache_settings_id_parameter,
    format_parameter, format_pretty_parameter, input_file_parameter, output_file_parameter,
    COMMAND_CACHE_SETTINGS, COMMAND_DESCRIBE, COMMAND_UPDATE,
};
use clap::Command;

/// Create the `cache-settings update` subcommand.
pub fn update_command() -> Command {
    Command::new(COMMAND_UPDATE)
        .about("Updates an existing cache setting")
        .long_about(
            "Updates an existing cache setting of an edge application.\n\n\
             Only the fields you pass are changed. Either pass the fields as flags \
             together with --cache-settings-id, or pass --in with a JSON file that \
             carries the cache setting \"id\" and the fields to change.",
        )
        .arg(application_id_parameter())
        .arg(cache_settings_id_parameter())
        .arg(input_file_parameter())
        .args(cache_setting_field_parameters())
}

/// Create the `cache-settings describe` subcommand.
pub fn describe_command() -> Command {
    Command::new(COMMAND_DESCRIBE)
        .about("Shows a cache setting")
        .arg(application_id_parameter())
        .arg(cache_settings_id_parameter())
        .arg(format_parameter())
        .arg(format_pretty_parameter())
        .arg(output_file_parameter())
}

/// Create the cache-settings command with all its subcommands.
pub fn cache_settings_command() -> Command {
    Command::new(COMMAND_CACHE_SETTINGS)
        .about("Cache settings of edge applications")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(update_command())
        .subcommand(describe_command())
}
