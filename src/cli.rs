//! Top-level command dispatch.

use crate::{
    actions,
    commands::params::{COMMAND_CACHE_SETTINGS, COMMAND_CONFIG, COMMAND_EDGE_APPLICATIONS},
    configuration::Configuration,
    edge_api::EdgeApiClient,
    error::CliError,
    validation::RuleSet,
};
use clap::ArgMatches;
use std::future::Future;

fn extract_subcommand_name(matches: &ArgMatches) -> String {
    match matches.subcommand() {
        Some((name, _)) => name.to_string(),
        None => "unknown".to_string(),
    }
}

/// Executes the parsed command and returns the line to print on success.
///
/// The configuration is only loaded for commands that talk to the API, so
/// `config path` keeps working with a broken configuration file.
pub async fn execute_command(matches: &ArgMatches, rules: &RuleSet) -> Result<String, CliError> {
    match matches.subcommand() {
        Some((COMMAND_CONFIG, sub_matches)) => actions::config::execute(sub_matches),
        Some((COMMAND_CACHE_SETTINGS, sub_matches)) => {
            let configuration = Configuration::load_or_default()?;
            let api = EdgeApiClient::from_configuration(&configuration)?;
            actions::cache_settings::execute(&api, rules, sub_matches).await
        }
        Some((COMMAND_EDGE_APPLICATIONS, sub_matches)) => {
            let configuration = Configuration::load_or_default()?;
            let api = EdgeApiClient::from_configuration(&configuration)?;
            actions::edge_applications::execute(&api, sub_matches).await
        }
        _ => Err(CliError::UnsupportedSubcommand(extract_subcommand_name(
            matches,
        ))),
    }
}

/// Runs `command` until it completes or `interrupt` fires.
///
/// An interrupt future that fails (no signal handler could be installed)
/// disables interruption instead of aborting the command.
pub async fn run_interruptible<F, S>(command: F, interrupt: S) -> Result<String, CliError>
where
    F: Future<Output = Result<String, CliError>>,
    S: Future<Output = std::io::Result<()>>,
{
    tokio::select! {
        result = command => result,
        Ok(()) = interrupt => Err(CliError::Interrupted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::pending;

    #[tokio::test]
    async fn test_interrupt_cancels_pending_command() {
        let result = run_interruptible(pending(), async { Ok(()) }).await;
        assert!(matches!(result, Err(CliError::Interrupted)));
    }

    #[tokio::test]
    async fn test_failed_signal_handler_does_not_abort_command() {
        let result = run_interruptible(async { Ok("done".to_string()) }, async {
            Err(std::io::Error::other("no signal handler"))
        })
        .await;
        assert_eq!(result.unwrap(), "done");
    }
}
