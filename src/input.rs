//! Turns the `cache-settings update` arguments into an [`UpdateTarget`] and a
//! [`ChangeSet`].
//!
//! There are two mutually exclusive sources of field values: a JSON document
//! given with `--in`, or the individual field flags. When both are given the
//! document wins and the flags are ignored. The application identifier always
//! comes from `--application-id`.

use crate::change_set::{parse_bool_token, split_list, ChangeSet, Field};
use crate::commands::params::{PARAMETER_APPLICATION_ID, PARAMETER_CACHE_SETTINGS_ID, PARAMETER_IN};
use crate::patch::UpdateTarget;
use clap::ArgMatches;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use strum::IntoEnumIterator;
use thiserror::Error;
use tracing::{debug, trace, warn};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("required flags are missing: {0}")]
    MandatoryFlagsMissing(String),

    #[error("no field to update was supplied; pass at least one field flag or --in <file>")]
    NothingToUpdate,

    #[error("invalid value '{value}' for {field}")]
    InvalidFieldValue { field: Field, value: String },

    #[error("failed to read input file {path}: {source}")]
    ReadDocument {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse input file {path}: {source}")]
    Unmarshal {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Where the field values of a resolved update came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Document(PathBuf),
    Flags,
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Document(path) => write!(f, "document {}", path.display()),
            InputSource::Flags => write!(f, "command line flags"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedUpdate {
    pub target: UpdateTarget,
    pub change_set: ChangeSet,
    pub source: InputSource,
}

/// Shape of an `--in` document: the cache setting id plus any updatable field.
#[derive(Debug, Deserialize)]
struct UpdateDocument {
    id: Option<u64>,
    #[serde(flatten)]
    changes: ChangeSet,
}

const MISSING_IDS: &str = "--application-id and --cache-settings-id, or --application-id and a file with --in";

/// Resolves the update request from the parsed command line.
///
/// Performs no network access.
pub fn resolve_update(matches: &ArgMatches) -> Result<ResolvedUpdate, InputError> {
    let application_id = matches
        .get_one::<u64>(PARAMETER_APPLICATION_ID)
        .copied()
        .ok_or_else(|| InputError::MandatoryFlagsMissing(MISSING_IDS.to_string()))?;

    match matches.get_one::<PathBuf>(PARAMETER_IN) {
        Some(path) => {
            let ignored = given_field_flags(matches);
            if !ignored.is_empty() {
                let names: Vec<String> = ignored.iter().map(Field::to_string).collect();
                warn!(
                    "Reading fields from {}; ignoring {}",
                    path.display(),
                    names.join(", ")
                );
            }
            if matches.get_one::<u64>(PARAMETER_CACHE_SETTINGS_ID).is_some() {
                warn!("--cache-settings-id is ignored; the id is read from the file");
            }
            resolve_from_document(application_id, path)
        }
        None => resolve_from_flags(application_id, matches),
    }
}

/// Reads and parses an `--in` document.
pub fn read_document(path: &Path) -> Result<(Option<u64>, ChangeSet), InputError> {
    trace!("Reading update document from {}", path.display());
    let content = fs::read_to_string(path).map_err(|source| InputError::ReadDocument {
        path: path.to_path_buf(),
        source,
    })?;
    let document: UpdateDocument =
        serde_json::from_str(&content).map_err(|source| InputError::Unmarshal {
            path: path.to_path_buf(),
            source,
        })?;
    Ok((document.id, document.changes))
}

fn resolve_from_document(application_id: u64, path: &Path) -> Result<ResolvedUpdate, InputError> {
    let (id, change_set) = read_document(path)?;
    let cache_setting_id = id.ok_or_else(|| {
        InputError::MandatoryFlagsMissing(format!(
            "the file {} must contain the cache setting \"id\"",
            path.display()
        ))
    })?;
    if change_set.is_empty() {
        return Err(InputError::NothingToUpdate);
    }

    debug!(
        "Resolved {} field(s) from {}",
        change_set.present_fields().len(),
        path.display()
    );
    Ok(ResolvedUpdate {
        target: UpdateTarget {
            application_id,
            cache_setting_id,
        },
        change_set,
        source: InputSource::Document(path.to_path_buf()),
    })
}

fn resolve_from_flags(application_id: u64, matches: &ArgMatches) -> Result<ResolvedUpdate, InputError> {
    let cache_setting_id = matches
        .get_one::<u64>(PARAMETER_CACHE_SETTINGS_ID)
        .copied()
        .ok_or_else(|| InputError::MandatoryFlagsMissing(MISSING_IDS.to_string()))?;

    let change_set = change_set_from_flags(matches)?;
    if change_set.is_empty() {
        return Err(InputError::NothingToUpdate);
    }

    debug!(
        "Resolved {} field(s) from flags",
        change_set.present_fields().len()
    );
    Ok(ResolvedUpdate {
        target: UpdateTarget {
            application_id,
            cache_setting_id,
        },
        change_set,
        source: InputSource::Flags,
    })
}

/// Field flags explicitly present on the command line.
fn given_field_flags(matches: &ArgMatches) -> Vec<Field> {
    Field::iter()
        .filter(|field| matches!(matches.try_contains_id(field.flag()), Ok(true)))
        .collect()
}

fn text(matches: &ArgMatches, field: Field) -> Option<String> {
    matches.get_one::<String>(field.flag()).cloned()
}

fn number(matches: &ArgMatches, field: Field) -> Option<u32> {
    matches.get_one::<u32>(field.flag()).copied()
}

fn mode<T: FromStr>(matches: &ArgMatches, field: Field) -> Result<Option<T>, InputError> {
    text(matches, field)
        .map(|value| {
            value
                .parse::<T>()
                .map_err(|_| InputError::InvalidFieldValue { field, value })
        })
        .transpose()
}

fn device_groups(matches: &ArgMatches) -> Result<Option<Vec<u64>>, InputError> {
    text(matches, Field::DeviceGroup)
        .map(|raw| {
            split_list(&raw)
                .into_iter()
                .map(|item| {
                    item.parse::<u64>().map_err(|_| InputError::InvalidFieldValue {
                        field: Field::DeviceGroup,
                        value: item,
                    })
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()
}

/// Builds a change set out of the field flags.
pub fn change_set_from_flags(matches: &ArgMatches) -> Result<ChangeSet, InputError> {
    let boolean = |field: Field| text(matches, field).map(|token| parse_bool_token(&token));
    let list = |field: Field| text(matches, field).map(|raw| split_list(&raw));

    Ok(ChangeSet {
        name: text(matches, Field::Name),
        browser_cache_settings: mode(matches, Field::BrowserCacheSettings)?,
        browser_cache_settings_maximum_ttl: number(matches, Field::BrowserCacheSettingsMaximumTtl),
        cdn_cache_settings: mode(matches, Field::CdnCacheSettings)?,
        cdn_cache_settings_maximum_ttl: number(matches, Field::CdnCacheSettingsMaximumTtl),
        cache_by_query_string: mode(matches, Field::CacheByQueryString)?,
        query_string_fields: list(Field::QueryStringFields),
        enable_query_string_sort: boolean(Field::EnableQueryStringSort),
        cache_by_cookies: mode(matches, Field::CacheByCookies)?,
        cookie_names: list(Field::CookieNames),
        adaptive_delivery_action: mode(matches, Field::AdaptiveDeliveryAction)?,
        device_group: device_groups(matches)?,
        enable_caching_for_post: boolean(Field::EnableCachingForPost),
        enable_caching_for_options: boolean(Field::EnableCachingForOptions),
        l2_caching_enabled: boolean(Field::L2CachingEnabled),
        slice_configuration_enabled: boolean(Field::SliceConfigurationEnabled),
        slice_l2_caching_enabled: boolean(Field::SliceL2CachingEnabled),
        slice_configuration_range: number(matches, Field::SliceConfigurationRange),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change_set::TriState;
    use crate::commands::cache_settings::update_command;
    use crate::model::{BrowserCacheMode, CacheByMode};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn matches(args: &[&str]) -> ArgMatches {
        let mut argv = vec!["update"];
        argv.extend_from_slice(args);
        update_command().try_get_matches_from(argv).unwrap()
    }

    fn document(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_flags_are_resolved_into_a_change_set() {
        let resolved = resolve_update(&matches(&[
            "-a",
            "1673635841",
            "-c",
            "112233",
            "--name",
            "fast",
            "--browser-cache-settings",
            "override",
            "--browser-cache-settings-maximum-ttl",
            "60",
            "--cache-by-cookies",
            "whitelist",
            "--cookie-names",
            "aa,123",
            "--device-group",
            "1,2",
            "--l2-caching-enabled",
            "troo",
        ]))
        .unwrap();

        assert_eq!(resolved.source, InputSource::Flags);
        assert_eq!(resolved.target.application_id, 1673635841);
        assert_eq!(resolved.target.cache_setting_id, 112233);

        let change_set = resolved.change_set;
        assert_eq!(change_set.name.as_deref(), Some("fast"));
        assert_eq!(change_set.browser_cache_settings, Some(BrowserCacheMode::Override));
        assert_eq!(change_set.browser_cache_settings_maximum_ttl, Some(60));
        assert_eq!(change_set.cache_by_cookies, Some(CacheByMode::Whitelist));
        assert_eq!(change_set.cookie_names, Some(vec!["aa".into(), "123".into()]));
        assert_eq!(change_set.device_group, Some(vec![1, 2]));
        assert_eq!(
            change_set.l2_caching_enabled,
            Some(TriState::Invalid("troo".into()))
        );
        assert_eq!(change_set.cdn_cache_settings, None);
    }

    #[test]
    fn test_cdn_ttl_alias_is_accepted() {
        let resolved = resolve_update(&matches(&[
            "-a",
            "1",
            "-c",
            "2",
            "--cnd-cache-settings-maximum-ttl",
            "300",
        ]))
        .unwrap();
        assert_eq!(resolved.change_set.cdn_cache_settings_maximum_ttl, Some(300));
    }

    #[test]
    fn test_missing_application_id() {
        let error = resolve_update(&matches(&["-c", "2", "--name", "x"])).unwrap_err();
        assert!(matches!(error, InputError::MandatoryFlagsMissing(_)));
    }

    #[test]
    fn test_missing_cache_settings_id() {
        let error = resolve_update(&matches(&["-a", "1", "--name", "x"])).unwrap_err();
        assert!(matches!(error, InputError::MandatoryFlagsMissing(_)));
    }

    #[test]
    fn test_only_identifiers_is_nothing_to_update() {
        let error = resolve_update(&matches(&["-a", "1", "-c", "2"])).unwrap_err();
        assert!(matches!(error, InputError::NothingToUpdate));
    }

    #[test]
    fn test_bad_device_group_is_rejected() {
        let error = resolve_update(&matches(&["-a", "1", "-c", "2", "--device-group", "1,x"]))
            .unwrap_err();
        match error {
            InputError::InvalidFieldValue { field, value } => {
                assert_eq!(field, Field::DeviceGroup);
                assert_eq!(value, "x");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_document_takes_precedence_over_flags() {
        let file = document(
            r#"{"id": 112233, "name": "from-file", "cache_by_query_string": "whitelist", "query_string_fields": ["heyy", "yoo"]}"#,
        );
        let path = file.path().to_str().unwrap();
        let resolved = resolve_update(&matches(&[
            "-a", "1", "-c", "999", "--in", path, "--name", "from-flag",
        ]))
        .unwrap();

        assert_eq!(resolved.source, InputSource::Document(file.path().to_path_buf()));
        assert_eq!(resolved.target.cache_setting_id, 112233);
        assert_eq!(resolved.change_set.name.as_deref(), Some("from-file"));
        assert_eq!(
            resolved.change_set.query_string_fields,
            Some(vec!["heyy".into(), "yoo".into()])
        );
    }

    #[test]
    fn test_source_names_where_fields_came_from() {
        assert_eq!(InputSource::Flags.to_string(), "command line flags");
        assert_eq!(
            InputSource::Document(PathBuf::from("update.json")).to_string(),
            "document update.json"
        );
    }

    #[test]
    fn test_document_without_id() {
        let file = document(r#"{"name": "no-id"}"#);
        let error = resolve_update(&matches(&["-a", "1", "--in", file.path().to_str().unwrap()]))
            .unwrap_err();
        assert!(matches!(error, InputError::MandatoryFlagsMissing(_)));
    }

    #[test]
    fn test_malformed_document_is_unmarshal_error() {
        let file = document(r#"{"id": 1, "browser_cache_settings_maximum_ttl": "sixty""#);
        let error = resolve_update(&matches(&["-a", "1", "--in", file.path().to_str().unwrap()]))
            .unwrap_err();
        assert!(matches!(error, InputError::Unmarshal { .. }));
    }

    #[test]
    fn test_wrongly_typed_document_is_unmarshal_error() {
        let file = document(r#"{"id": 1, "browser_cache_settings_maximum_ttl": "sixty"}"#);
        let error = resolve_update(&matches(&["-a", "1", "--in", file.path().to_str().unwrap()]))
            .unwrap_err();
        assert!(matches!(error, InputError::Unmarshal { .. }));
    }

    #[test]
    fn test_missing_document() {
        let error = resolve_update(&matches(&["-a", "1", "--in", "/nonexistent/update.json"]))
            .unwrap_err();
        assert!(matches!(error, InputError::ReadDocument { .. }));
    }

    #[test]
    fn test_document_with_only_id_is_nothing_to_update() {
        let file = document(r#"{"id": 1}"#);
        let error = resolve_update(&matches(&["-a", "1", "--in", file.path().to_str().unwrap()]))
            .unwrap_err();
        assert!(matches!(error, InputError::NothingToUpdate));
    }
}
