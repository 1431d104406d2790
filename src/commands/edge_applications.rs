//! Edge application command definitions.

use crate::commands::params::{
    application_id_parameter, format_parameter, format_pretty_parameter, output_file_parameter,
    COMMAND_DESCRIBE, COMMAND_EDGE_APPLICATIONS,
};
use clap::Command;

/// Create the edge-applications command with all its subcommands.
pub fn edge_applications_command() -> Command {
    Command::new(COMMAND_EDGE_APPLICATIONS)
        .about("Edge applications")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new(COMMAND_DESCRIBE)
                .about("Shows an edge application")
                .arg(application_id_parameter())
                .arg(format_parameter())
                .arg(format_pretty_parameter())
                .arg(output_file_parameter()),
        )
}
