//! Data models for the edge platform API.
//!
//! Records returned by the API are wrapped in an envelope of the form
//! `{"results": {...}}`; [`Envelope`] strips it. Enumerated settings use
//! their lowercase wire names both on the command line and in JSON.

use crate::format::{Formattable, FormattingError, OutputFormat};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, VariantNames};

/// The `{"results": ...}` wrapper used by every API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub results: T,
}

/// An edge application as returned by `GET edge_applications/{id}`.
///
/// Only the fields the CLI reasons about are typed; the capability flags
/// default to `false` when the API omits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeApplication {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub application_acceleration: bool,
    #[serde(default)]
    pub caching: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_protocol: Option<String>,
}

impl EdgeApplication {
    pub fn acceleration_enabled(&self) -> bool {
        self.application_acceleration
    }
}

impl Formattable for EdgeApplication {
    fn format(&self, f: &OutputFormat) -> Result<String, FormattingError> {
        f.render(self)
    }
}

/// A cache setting as echoed back by the API.
///
/// Mode values are kept as plain strings here so that a value this CLI does
/// not know yet never prevents displaying the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheSetting {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser_cache_settings: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser_cache_settings_maximum_ttl: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cdn_cache_settings: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cdn_cache_settings_maximum_ttl: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_by_query_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_string_fields: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_query_string_sort: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_by_cookies: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie_names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adaptive_delivery_action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_group: Option<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_caching_for_post: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_caching_for_options: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l2_caching_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_slice_configuration_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_slice_l2_caching_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slice_configuration_range: Option<u32>,
}

impl Formattable for CacheSetting {
    fn format(&self, f: &OutputFormat) -> Result<String, FormattingError> {
        f.render(self)
    }
}

/// How browsers are told to cache responses.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BrowserCacheMode {
    Honor,
    Override,
    Ignore,
}

impl BrowserCacheMode {
    pub fn names() -> Vec<&'static str> {
        Self::VARIANTS.to_vec()
    }
}

/// How edge nodes cache responses.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CdnCacheMode {
    Honor,
    Override,
}

impl CdnCacheMode {
    pub fn names() -> Vec<&'static str> {
        Self::VARIANTS.to_vec()
    }
}

/// Whether cookies or query-string fields take part in the cache key.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CacheByMode {
    Ignore,
    Whitelist,
    Blacklist,
    All,
}

impl CacheByMode {
    pub fn names() -> Vec<&'static str> {
        Self::VARIANTS.to_vec()
    }

    /// `whitelist` and `blacklist` only make sense with a list of names.
    pub fn requires_list(&self) -> bool {
        matches!(self, CacheByMode::Whitelist | CacheByMode::Blacklist)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AdaptiveDeliveryAction {
    Ignore,
    Whitelist,
}

impl AdaptiveDeliveryAction {
    pub fn names() -> Vec<&'static str> {
        Self::VARIANTS.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_mode_names_match_wire_values() {
        assert_eq!(BrowserCacheMode::names(), vec!["honor", "override", "ignore"]);
        assert_eq!(CdnCacheMode::names(), vec!["honor", "override"]);
        assert_eq!(
            CacheByMode::names(),
            vec!["ignore", "whitelist", "blacklist", "all"]
        );
        assert_eq!(AdaptiveDeliveryAction::names(), vec!["ignore", "whitelist"]);
    }

    #[test]
    fn test_mode_parsing_is_exact() {
        assert_eq!(
            BrowserCacheMode::from_str("override").unwrap(),
            BrowserCacheMode::Override
        );
        assert!(CdnCacheMode::from_str("ignore").is_err());
        assert_eq!(serde_json::to_string(&CacheByMode::Whitelist).unwrap(), "\"whitelist\"");
    }

    #[test]
    fn test_requires_list() {
        assert!(CacheByMode::Whitelist.requires_list());
        assert!(CacheByMode::Blacklist.requires_list());
        assert!(!CacheByMode::All.requires_list());
        assert!(!CacheByMode::Ignore.requires_list());
    }

    #[test]
    fn test_edge_application_envelope() {
        let body = r#"{"results":{"id":1673635841,"name":"app","active":true,
            "application_acceleration":false,"caching":true,"edge_functions":true},
            "schema_version":3}"#;
        let envelope: Envelope<EdgeApplication> = serde_json::from_str(body).unwrap();

        assert_eq!(envelope.results.id, 1673635841);
        assert!(!envelope.results.acceleration_enabled());
        assert!(envelope.results.caching);
    }

    #[test]
    fn test_cache_setting_tolerates_nulls_and_unknown_modes() {
        let body = r#"{"results":{"id":112233,"name":"cs","browser_cache_settings":"brand-new",
            "query_string_fields":null,"device_group":[]}}"#;
        let envelope: Envelope<CacheSetting> = serde_json::from_str(body).unwrap();

        assert_eq!(envelope.results.id, 112233);
        assert_eq!(
            envelope.results.browser_cache_settings.as_deref(),
            Some("brand-new")
        );
        assert_eq!(envelope.results.query_string_fields, None);
    }
}
