//! Shared command parameters for all CLI commands.
//!
//! This module defines the parameter names and argument constructors used by
//! the command modules. Cache-setting field flags take their names from
//! [`Field::flag`] so the resolver and the command line cannot drift apart.

use crate::change_set::Field;
use crate::format::OutputFormat;
use crate::model::{AdaptiveDeliveryAction, BrowserCacheMode, CacheByMode, CdnCacheMode};
use clap::{Arg, ArgAction};
use std::path::PathBuf;

// CRUD operations
pub const COMMAND_DESCRIBE: &str = "describe";
pub const COMMAND_UPDATE: &str = "update";

// Resource commands
pub const COMMAND_CACHE_SETTINGS: &str = "cache-settings";
pub const COMMAND_EDGE_APPLICATIONS: &str = "edge-applications";

// Config commands
pub const COMMAND_CONFIG: &str = "config";
pub const COMMAND_SHOW: &str = "show";
pub const COMMAND_PATH: &str = "path";

// Parameter names
pub const PARAMETER_VERBOSE: &str = "verbose";
pub const PARAMETER_APPLICATION_ID: &str = "application-id";
pub const PARAMETER_CACHE_SETTINGS_ID: &str = "cache-settings-id";
pub const PARAMETER_IN: &str = "in";
pub const PARAMETER_OUT: &str = "out";
pub const PARAMETER_FORMAT: &str = "format";
pub const PARAMETER_PRETTY: &str = "pretty";

// Misspelled alias accepted for compatibility
pub const ALIAS_CDN_MAXIMUM_TTL: &str = "cnd-cache-settings-maximum-ttl";

/// Create the global verbose flag.
pub fn verbose_parameter() -> Arg {
    Arg::new(PARAMETER_VERBOSE)
        .short('v')
        .long(PARAMETER_VERBOSE)
        .action(ArgAction::SetTrue)
        .global(true)
        .help("Enable verbose output for debugging")
}

/// Create the application ID parameter.
///
/// It is not marked as required: a missing identifier is reported by the
/// command itself so that it surfaces as a "mandatory flags missing" error.
pub fn application_id_parameter() -> Arg {
    Arg::new(PARAMETER_APPLICATION_ID)
        .short('a')
        .long(PARAMETER_APPLICATION_ID)
        .num_args(1)
        .required(false)
        .value_parser(clap::value_parser!(u64))
        .help("Unique identifier of the edge application")
}

/// Create the cache settings ID parameter.
pub fn cache_settings_id_parameter() -> Arg {
    Arg::new(PARAMETER_CACHE_SETTINGS_ID)
        .short('c')
        .long(PARAMETER_CACHE_SETTINGS_ID)
        .num_args(1)
        .required(false)
        .value_parser(clap::value_parser!(u64))
        .help("Unique identifier of the cache setting")
}

/// Create the input document parameter.
pub fn input_file_parameter() -> Arg {
    Arg::new(PARAMETER_IN)
        .long(PARAMETER_IN)
        .num_args(1)
        .required(false)
        .value_parser(clap::value_parser!(PathBuf))
        .help("Path to a JSON file with the fields to update; field flags are ignored when it is given")
}

/// Create the output file parameter.
pub fn output_file_parameter() -> Arg {
    Arg::new(PARAMETER_OUT)
        .long(PARAMETER_OUT)
        .num_args(1)
        .required(false)
        .value_parser(clap::value_parser!(PathBuf))
        .help("Exports the output to the given <file_path/file_name.ext>")
}

/// Create the format parameter.
pub fn format_parameter() -> Arg {
    Arg::new(PARAMETER_FORMAT)
        .short('f')
        .long(PARAMETER_FORMAT)
        .num_args(1)
        .required(false)
        .env("EDGECLI_FORMAT")
        .default_value("json")
        .help("Output data format")
        .value_parser(OutputFormat::names())
}

/// Create the pretty flag.
pub fn format_pretty_parameter() -> Arg {
    Arg::new(PARAMETER_PRETTY)
        .long(PARAMETER_PRETTY)
        .action(ArgAction::SetTrue)
        .required(false)
        .help("Format the output pretty")
}

fn field_parameter(field: Field) -> Arg {
    Arg::new(field.flag())
        .long(field.flag())
        .num_args(1)
        .required(false)
}

fn boolean_field_parameter(field: Field, help: &'static str) -> Arg {
    // Kept as strings; the validator reports invalid tokens per field
    field_parameter(field)
        .value_name("true|false")
        .value_parser(clap::value_parser!(String))
        .help(help)
}

/// Create every cache-setting field flag, in the order they appear in help.
pub fn cache_setting_field_parameters() -> Vec<Arg> {
    vec![
        field_parameter(Field::Name).help("New name of the cache setting"),
        field_parameter(Field::BrowserCacheSettings)
            .value_parser(BrowserCacheMode::names())
            .help("Browser cache policy"),
        field_parameter(Field::BrowserCacheSettingsMaximumTtl)
            .value_parser(clap::value_parser!(u32))
            .help("Browser cache maximum TTL in seconds; required with --browser-cache-settings override"),
        field_parameter(Field::CdnCacheSettings)
            .value_parser(CdnCacheMode::names())
            .help("Edge cache policy"),
        field_parameter(Field::CdnCacheSettingsMaximumTtl)
            .alias(ALIAS_CDN_MAXIMUM_TTL)
            .value_parser(clap::value_parser!(u32))
            .help("Edge cache maximum TTL in seconds; required with --cdn-cache-settings override"),
        field_parameter(Field::CacheByQueryString)
            .value_parser(CacheByMode::names())
            .help("How query strings take part in the cache key"),
        field_parameter(Field::QueryStringFields)
            .value_name("FIELD,...")
            .help("Comma-separated query string fields for whitelist/blacklist"),
        boolean_field_parameter(
            Field::EnableQueryStringSort,
            "Sort query string fields before building the cache key",
        ),
        field_parameter(Field::CacheByCookies)
            .value_parser(CacheByMode::names())
            .help("How cookies take part in the cache key"),
        field_parameter(Field::CookieNames)
            .value_name("COOKIE,...")
            .help("Comma-separated cookie names for whitelist/blacklist"),
        field_parameter(Field::AdaptiveDeliveryAction)
            .value_parser(AdaptiveDeliveryAction::names())
            .help("Adaptive delivery action"),
        field_parameter(Field::DeviceGroup)
            .value_name("ID,...")
            .help("Comma-separated device group IDs; required with --adaptive-delivery-action whitelist"),
        boolean_field_parameter(Field::EnableCachingForPost, "Cache responses to POST requests"),
        boolean_field_parameter(
            Field::EnableCachingForOptions,
            "Cache responses to OPTIONS requests",
        ),
        boolean_field_parameter(Field::L2CachingEnabled, "Enable the L2 caching layer"),
        boolean_field_parameter(
            Field::SliceConfigurationEnabled,
            "Enable large file slicing",
        ),
        boolean_field_parameter(
            Field::SliceL2CachingEnabled,
            "Enable L2 caching of file slices",
        ),
        field_parameter(Field::SliceConfigurationRange)
            .value_parser(clap::value_parser!(u32))
            .help("Slice size in kilobytes (defaults to 1024 when slicing is enabled)"),
    ]
}
