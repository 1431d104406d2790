//! The `cache-settings` actions, including the partial-update flow.

use crate::{
    commands::params::{
        PARAMETER_APPLICATION_ID, PARAMETER_CACHE_SETTINGS_ID, COMMAND_DESCRIBE, COMMAND_UPDATE,
    },
    edge_api::EdgeApiClient,
    error::CliError,
    format_utils::FormatParams,
    http_utils::HttpClient,
    input::{resolve_update, InputError, ResolvedUpdate},
    model::CacheSetting,
    patch::{CacheSettingsPatch, UpdateTarget},
    validation::{RuleSet, Validator},
};
use clap::ArgMatches;
use tracing::{debug, trace};

/// Dispatches a `cache-settings` subcommand and returns the line to print.
pub async fn execute<C: HttpClient>(
    api: &EdgeApiClient<C>,
    rules: &RuleSet,
    matches: &ArgMatches,
) -> Result<String, CliError> {
    match matches.subcommand() {
        Some((COMMAND_UPDATE, sub_matches)) => update_cache_setting(api, rules, sub_matches).await,
        Some((COMMAND_DESCRIBE, sub_matches)) => describe_cache_setting(api, sub_matches).await,
        Some((other, _)) => Err(CliError::UnsupportedSubcommand(other.to_string())),
        None => Err(CliError::UnsupportedSubcommand(String::from("cache-settings"))),
    }
}

/// Runs `cache-settings update`.
///
/// Local input problems are reported before any request is made. The edge
/// application is then fetched once, the change set is validated against it
/// and exactly one `PATCH` is sent.
pub async fn update_cache_setting<C: HttpClient>(
    api: &EdgeApiClient<C>,
    rules: &RuleSet,
    sub_matches: &ArgMatches,
) -> Result<String, CliError> {
    trace!("Executing 'cache-settings update' command");

    let update = resolve_update(sub_matches)?;
    let updated = apply_update(api, rules, update).await?;

    Ok(format!(
        "Cache setting {} was successfully updated",
        updated.id
    ))
}

/// Validates a resolved update against the live application and sends it.
pub async fn apply_update<C: HttpClient>(
    api: &EdgeApiClient<C>,
    rules: &RuleSet,
    update: ResolvedUpdate,
) -> Result<CacheSetting, CliError> {
    let ResolvedUpdate {
        target,
        change_set,
        source,
    } = update;
    debug!("Updating cache setting {} from {}", target.cache_setting_id, source);

    let application = api.get_edge_application(target.application_id).await?;
    trace!(
        "Edge application {} (acceleration: {})",
        application.id,
        application.acceleration_enabled()
    );

    let change_set = Validator::new(rules).validate(change_set, &application)?;
    let patch = CacheSettingsPatch::from_validated(&change_set);
    debug!(
        "Sending {} field(s) to {}",
        change_set.present_fields().len(),
        target.path()
    );

    Ok(api.update_cache_setting(&target, &patch).await?)
}

async fn describe_cache_setting<C: HttpClient>(
    api: &EdgeApiClient<C>,
    sub_matches: &ArgMatches,
) -> Result<String, CliError> {
    trace!("Executing 'cache-settings describe' command");

    let application_id = sub_matches.get_one::<u64>(PARAMETER_APPLICATION_ID).copied();
    let cache_setting_id = sub_matches.get_one::<u64>(PARAMETER_CACHE_SETTINGS_ID).copied();
    let target = match (application_id, cache_setting_id) {
        (Some(application_id), Some(cache_setting_id)) => UpdateTarget {
            application_id,
            cache_setting_id,
        },
        _ => {
            return Err(InputError::MandatoryFlagsMissing(
                "--application-id and --cache-settings-id".to_string(),
            )
            .into())
        }
    };

    let params = FormatParams::from_args(sub_matches)?;
    let cache_setting = api.get_cache_setting(&target).await?;
    Ok(params.render(&cache_setting)?.message())
}
