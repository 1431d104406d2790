use crate::{
    commands::params::{COMMAND_DESCRIBE, PARAMETER_APPLICATION_ID},
    edge_api::EdgeApiClient,
    error::CliError,
    format_utils::FormatParams,
    http_utils::HttpClient,
    input::InputError,
};
use clap::ArgMatches;
use tracing::trace;

pub async fn execute<C: HttpClient>(
    api: &EdgeApiClient<C>,
    matches: &ArgMatches,
) -> Result<String, CliError> {
    match matches.subcommand() {
        Some((COMMAND_DESCRIBE, sub_matches)) => describe_edge_application(api, sub_matches).await,
        Some((other, _)) => Err(CliError::UnsupportedSubcommand(other.to_string())),
        None => Err(CliError::UnsupportedSubcommand(String::from("edge-applications"))),
    }
}

async fn describe_edge_application<C: HttpClient>(
    api: &EdgeApiClient<C>,
    sub_matches: &ArgMatches,
) -> Result<String, CliError> {
    trace!("Executing 'edge-applications describe' command");

    let application_id = sub_matches
        .get_one::<u64>(PARAMETER_APPLICATION_ID)
        .copied()
        .ok_or_else(|| InputError::MandatoryFlagsMissing("--application-id".to_string()))?;

    let params = FormatParams::from_args(sub_matches)?;
    let application = api.get_edge_application(application_id).await?;
    Ok(params.render(&application)?.message())
}
