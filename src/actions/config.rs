use crate::{
    commands::params::{COMMAND_PATH, COMMAND_SHOW},
    configuration::Configuration,
    error::CliError,
    format_utils::FormatParams,
};
use clap::ArgMatches;
use tracing::trace;

pub fn execute(matches: &ArgMatches) -> Result<String, CliError> {
    match matches.subcommand() {
        Some((COMMAND_SHOW, sub_matches)) => {
            trace!("Executing 'config show' command");
            let configuration = Configuration::load_or_default()?;
            let params = FormatParams::from_args(sub_matches)?;
            Ok(params.render(&configuration)?.message())
        }
        Some((COMMAND_PATH, _)) => {
            trace!("Executing 'config path' command");
            let path = Configuration::get_default_configuration_file_path()?;
            Ok(path.display().to_string())
        }
        Some((other, _)) => Err(CliError::UnsupportedSubcommand(other.to_string())),
        None => Err(CliError::UnsupportedSubcommand(String::from("config"))),
    }
}
