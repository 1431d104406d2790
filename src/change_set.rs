//! The normalized set of requested cache-setting changes.
//!
//! Every updatable field is an `Option`: `None` means the user did not ask to
//! change it and it must never reach the outgoing request. Boolean fields are
//! kept as a [`TriState`] so that a malformed token survives until the
//! validator can report it against the right field.

use crate::model::{AdaptiveDeliveryAction, BrowserCacheMode, CacheByMode, CdnCacheMode};
use serde::{de, Deserialize, Deserializer};
use std::fmt;
use strum::{EnumIter, IntoEnumIterator};

/// Result of parsing a user-supplied boolean token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriState {
    True,
    False,
    /// Anything other than the literal `"true"` / `"false"`, kept verbatim.
    Invalid(String),
}

/// Strict boolean parsing: only the exact, lowercase `"true"` and `"false"`
/// are accepted.
pub fn parse_bool_token(token: &str) -> TriState {
    match token {
        "true" => TriState::True,
        "false" => TriState::False,
        other => TriState::Invalid(other.to_string()),
    }
}

impl TriState {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TriState::True => Some(true),
            TriState::False => Some(false),
            TriState::Invalid(_) => None,
        }
    }

    pub fn is_true(&self) -> bool {
        matches!(self, TriState::True)
    }
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        if value {
            TriState::True
        } else {
            TriState::False
        }
    }
}

// Documents may carry either a JSON boolean or a string token.
impl<'de> Deserialize<'de> for TriState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TriStateVisitor;

        impl<'de> de::Visitor<'de> for TriStateVisitor {
            type Value = TriState;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a boolean or one of the strings \"true\" / \"false\"")
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> Result<TriState, E> {
                Ok(TriState::from(value))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<TriState, E> {
                Ok(parse_bool_token(value))
            }
        }

        deserializer.deserialize_any(TriStateVisitor)
    }
}

/// Every field a cache-settings update can touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Field {
    Name,
    BrowserCacheSettings,
    BrowserCacheSettingsMaximumTtl,
    CdnCacheSettings,
    CdnCacheSettingsMaximumTtl,
    CacheByQueryString,
    QueryStringFields,
    EnableQueryStringSort,
    CacheByCookies,
    CookieNames,
    AdaptiveDeliveryAction,
    DeviceGroup,
    EnableCachingForPost,
    EnableCachingForOptions,
    L2CachingEnabled,
    SliceConfigurationEnabled,
    SliceL2CachingEnabled,
    SliceConfigurationRange,
}

impl Field {
    /// Key used by the API and by input documents.
    pub fn api_name(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::BrowserCacheSettings => "browser_cache_settings",
            Field::BrowserCacheSettingsMaximumTtl => "browser_cache_settings_maximum_ttl",
            Field::CdnCacheSettings => "cdn_cache_settings",
            Field::CdnCacheSettingsMaximumTtl => "cdn_cache_settings_maximum_ttl",
            Field::CacheByQueryString => "cache_by_query_string",
            Field::QueryStringFields => "query_string_fields",
            Field::EnableQueryStringSort => "enable_query_string_sort",
            Field::CacheByCookies => "cache_by_cookies",
            Field::CookieNames => "cookie_names",
            Field::AdaptiveDeliveryAction => "adaptive_delivery_action",
            Field::DeviceGroup => "device_group",
            Field::EnableCachingForPost => "enable_caching_for_post",
            Field::EnableCachingForOptions => "enable_caching_for_options",
            Field::L2CachingEnabled => "l2_caching_enabled",
            Field::SliceConfigurationEnabled => "is_slice_configuration_enabled",
            Field::SliceL2CachingEnabled => "is_slice_l2_caching_enabled",
            Field::SliceConfigurationRange => "slice_configuration_range",
        }
    }

    /// Long command-line flag, without the leading dashes.
    pub fn flag(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::BrowserCacheSettings => "browser-cache-settings",
            Field::BrowserCacheSettingsMaximumTtl => "browser-cache-settings-maximum-ttl",
            Field::CdnCacheSettings => "cdn-cache-settings",
            Field::CdnCacheSettingsMaximumTtl => "cdn-cache-settings-maximum-ttl",
            Field::CacheByQueryString => "cache-by-query-string",
            Field::QueryStringFields => "query-string-fields",
            Field::EnableQueryStringSort => "enable-caching-string-sort",
            Field::CacheByCookies => "cache-by-cookies",
            Field::CookieNames => "cookie-names",
            Field::AdaptiveDeliveryAction => "adaptive-delivery-action",
            Field::DeviceGroup => "device-group",
            Field::EnableCachingForPost => "enable-caching-for-post",
            Field::EnableCachingForOptions => "enable-caching-for-options",
            Field::L2CachingEnabled => "l2-caching-enabled",
            Field::SliceConfigurationEnabled => "slice-configuration-enabled",
            Field::SliceL2CachingEnabled => "slice-l2-caching-enabled",
            Field::SliceConfigurationRange => "slice-configuration-range",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "--{}", self.flag())
    }
}

/// The boolean-typed fields. Each has its own error identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum BooleanField {
    CachingForOptions,
    CachingForPost,
    CachingStringSort,
    L2Caching,
    SliceConfiguration,
    SliceL2Caching,
}

impl BooleanField {
    pub fn field(&self) -> Field {
        match self {
            BooleanField::CachingForOptions => Field::EnableCachingForOptions,
            BooleanField::CachingForPost => Field::EnableCachingForPost,
            BooleanField::CachingStringSort => Field::EnableQueryStringSort,
            BooleanField::L2Caching => Field::L2CachingEnabled,
            BooleanField::SliceConfiguration => Field::SliceConfigurationEnabled,
            BooleanField::SliceL2Caching => Field::SliceL2CachingEnabled,
        }
    }
}

impl fmt::Display for BooleanField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.field(), f)
    }
}

/// Requested changes for one cache setting.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChangeSet {
    pub name: Option<String>,
    pub browser_cache_settings: Option<BrowserCacheMode>,
    pub browser_cache_settings_maximum_ttl: Option<u32>,
    pub cdn_cache_settings: Option<CdnCacheMode>,
    pub cdn_cache_settings_maximum_ttl: Option<u32>,
    pub cache_by_query_string: Option<CacheByMode>,
    pub query_string_fields: Option<Vec<String>>,
    pub enable_query_string_sort: Option<TriState>,
    pub cache_by_cookies: Option<CacheByMode>,
    pub cookie_names: Option<Vec<String>>,
    pub adaptive_delivery_action: Option<AdaptiveDeliveryAction>,
    pub device_group: Option<Vec<u64>>,
    pub enable_caching_for_post: Option<TriState>,
    pub enable_caching_for_options: Option<TriState>,
    pub l2_caching_enabled: Option<TriState>,
    #[serde(rename = "is_slice_configuration_enabled")]
    pub slice_configuration_enabled: Option<TriState>,
    #[serde(rename = "is_slice_l2_caching_enabled")]
    pub slice_l2_caching_enabled: Option<TriState>,
    pub slice_configuration_range: Option<u32>,
}

impl ChangeSet {
    pub fn is_present(&self, field: Field) -> bool {
        match field {
            Field::Name => self.name.is_some(),
            Field::BrowserCacheSettings => self.browser_cache_settings.is_some(),
            Field::BrowserCacheSettingsMaximumTtl => {
                self.browser_cache_settings_maximum_ttl.is_some()
            }
            Field::CdnCacheSettings => self.cdn_cache_settings.is_some(),
            Field::CdnCacheSettingsMaximumTtl => self.cdn_cache_settings_maximum_ttl.is_some(),
            Field::CacheByQueryString => self.cache_by_query_string.is_some(),
            Field::QueryStringFields => self.query_string_fields.is_some(),
            Field::EnableQueryStringSort => self.enable_query_string_sort.is_some(),
            Field::CacheByCookies => self.cache_by_cookies.is_some(),
            Field::CookieNames => self.cookie_names.is_some(),
            Field::AdaptiveDeliveryAction => self.adaptive_delivery_action.is_some(),
            Field::DeviceGroup => self.device_group.is_some(),
            Field::EnableCachingForPost => self.enable_caching_for_post.is_some(),
            Field::EnableCachingForOptions => self.enable_caching_for_options.is_some(),
            Field::L2CachingEnabled => self.l2_caching_enabled.is_some(),
            Field::SliceConfigurationEnabled => self.slice_configuration_enabled.is_some(),
            Field::SliceL2CachingEnabled => self.slice_l2_caching_enabled.is_some(),
            Field::SliceConfigurationRange => self.slice_configuration_range.is_some(),
        }
    }

    /// Fields explicitly requested, in declaration order.
    pub fn present_fields(&self) -> Vec<Field> {
        Field::iter().filter(|field| self.is_present(*field)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.present_fields().is_empty()
    }

    pub fn boolean(&self, field: BooleanField) -> Option<&TriState> {
        match field {
            BooleanField::CachingForOptions => self.enable_caching_for_options.as_ref(),
            BooleanField::CachingForPost => self.enable_caching_for_post.as_ref(),
            BooleanField::CachingStringSort => self.enable_query_string_sort.as_ref(),
            BooleanField::L2Caching => self.l2_caching_enabled.as_ref(),
            BooleanField::SliceConfiguration => self.slice_configuration_enabled.as_ref(),
            BooleanField::SliceL2Caching => self.slice_l2_caching_enabled.as_ref(),
        }
    }

    /// Length of a list field, `None` when the list was not supplied.
    pub fn list_len(&self, field: Field) -> Option<usize> {
        match field {
            Field::QueryStringFields => self.query_string_fields.as_ref().map(Vec::len),
            Field::CookieNames => self.cookie_names.as_ref().map(Vec::len),
            Field::DeviceGroup => self.device_group.as_ref().map(Vec::len),
            _ => None,
        }
    }
}

/// Splits a comma-separated flag value, trimming items and dropping empty ones.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_exact_literals_are_valid() {
        assert_eq!(parse_bool_token("true"), TriState::True);
        assert_eq!(parse_bool_token("false"), TriState::False);

        for token in [
            "troo", "untrue", "incorrect", "precise", "faithful", "erroneous", "True", "FALSE",
            " true", "1", "",
        ] {
            assert_eq!(
                parse_bool_token(token),
                TriState::Invalid(token.to_string()),
                "token {token:?} must be invalid"
            );
        }
    }

    #[test]
    fn test_tri_state_from_document() {
        #[derive(Deserialize)]
        struct Holder {
            a: TriState,
            b: TriState,
            c: TriState,
        }

        let holder: Holder =
            serde_json::from_str(r#"{"a": true, "b": "false", "c": "troo"}"#).unwrap();
        assert_eq!(holder.a, TriState::True);
        assert_eq!(holder.b, TriState::False);
        assert_eq!(holder.c, TriState::Invalid("troo".to_string()));
    }

    #[test]
    fn test_tri_state_rejects_numbers() {
        let result: Result<TriState, _> = serde_json::from_str("1");
        assert!(result.is_err());
    }

    #[test]
    fn test_present_fields_follow_declaration_order() {
        let change_set = ChangeSet {
            slice_l2_caching_enabled: Some(TriState::False),
            name: Some("fast".to_string()),
            cookie_names: Some(vec![]),
            ..ChangeSet::default()
        };

        assert_eq!(
            change_set.present_fields(),
            vec![Field::Name, Field::CookieNames, Field::SliceL2CachingEnabled]
        );
        assert!(!change_set.is_empty());
        assert!(ChangeSet::default().is_empty());
    }

    #[test]
    fn test_boolean_accessor_covers_every_boolean_field() {
        let change_set = ChangeSet {
            enable_caching_for_options: Some(TriState::True),
            enable_caching_for_post: Some(TriState::True),
            enable_query_string_sort: Some(TriState::True),
            l2_caching_enabled: Some(TriState::True),
            slice_configuration_enabled: Some(TriState::True),
            slice_l2_caching_enabled: Some(TriState::True),
            ..ChangeSet::default()
        };

        for field in BooleanField::iter() {
            assert_eq!(change_set.boolean(field), Some(&TriState::True));
            assert!(change_set.is_present(field.field()));
        }
    }

    #[test]
    fn test_document_keys_match_api_names() {
        let document = r#"{
            "name": "cs",
            "browser_cache_settings": "override",
            "browser_cache_settings_maximum_ttl": 60,
            "is_slice_configuration_enabled": true,
            "is_slice_l2_caching_enabled": "false"
        }"#;
        let change_set: ChangeSet = serde_json::from_str(document).unwrap();

        assert_eq!(change_set.browser_cache_settings, Some(BrowserCacheMode::Override));
        assert_eq!(change_set.browser_cache_settings_maximum_ttl, Some(60));
        assert_eq!(change_set.slice_configuration_enabled, Some(TriState::True));
        assert_eq!(change_set.slice_l2_caching_enabled, Some(TriState::False));
        for field in change_set.present_fields() {
            assert!(document.contains(field.api_name()));
        }
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("aa,123,987"), vec!["aa", "123", "987"]);
        assert_eq!(split_list(" heyy , ,yoo,"), vec!["heyy", "yoo"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_field_display_is_the_flag() {
        assert_eq!(BooleanField::SliceL2Caching.to_string(), "--slice-l2-caching-enabled");
        assert_eq!(Field::CookieNames.to_string(), "--cookie-names");
    }
}
