//! The partial-update payload sent with `PATCH`.
//!
//! A [`CacheSettingsPatch`] is only ever built from a change set the
//! validator accepted. Absent fields are skipped during serialization, so the
//! server keeps its current values for them.

use crate::change_set::{ChangeSet, TriState};
use crate::model::{AdaptiveDeliveryAction, BrowserCacheMode, CacheByMode, CdnCacheMode};
use serde::Serialize;

/// Identifies the cache setting being updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateTarget {
    pub application_id: u64,
    pub cache_setting_id: u64,
}

impl UpdateTarget {
    /// Resource path, relative to the API base URL.
    pub fn path(&self) -> String {
        format!(
            "edge_applications/{}/cache_settings/{}",
            self.application_id, self.cache_setting_id
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheSettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser_cache_settings: Option<BrowserCacheMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser_cache_settings_maximum_ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cdn_cache_settings: Option<CdnCacheMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cdn_cache_settings_maximum_ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_by_query_string: Option<CacheByMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_string_fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_query_string_sort: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_by_cookies: Option<CacheByMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie_names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adaptive_delivery_action: Option<AdaptiveDeliveryAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_group: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_caching_for_post: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_caching_for_options: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub l2_caching_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_slice_configuration_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_slice_l2_caching_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slice_configuration_range: Option<u32>,
}

fn flag(value: &Option<TriState>) -> Option<bool> {
    value.as_ref().and_then(TriState::as_bool)
}

impl CacheSettingsPatch {
    /// Builds the payload from a validated change set.
    ///
    /// Invalid boolean tokens cannot occur after validation; should one slip
    /// through anyway it is dropped rather than sent.
    pub fn from_validated(change_set: &ChangeSet) -> Self {
        Self {
            name: change_set.name.clone(),
            browser_cache_settings: change_set.browser_cache_settings,
            browser_cache_settings_maximum_ttl: change_set.browser_cache_settings_maximum_ttl,
            cdn_cache_settings: change_set.cdn_cache_settings,
            cdn_cache_settings_maximum_ttl: change_set.cdn_cache_settings_maximum_ttl,
            cache_by_query_string: change_set.cache_by_query_string,
            query_string_fields: change_set.query_string_fields.clone(),
            enable_query_string_sort: flag(&change_set.enable_query_string_sort),
            cache_by_cookies: change_set.cache_by_cookies,
            cookie_names: change_set.cookie_names.clone(),
            adaptive_delivery_action: change_set.adaptive_delivery_action,
            device_group: change_set.device_group.clone(),
            enable_caching_for_post: flag(&change_set.enable_caching_for_post),
            enable_caching_for_options: flag(&change_set.enable_caching_for_options),
            l2_caching_enabled: flag(&change_set.l2_caching_enabled),
            is_slice_configuration_enabled: flag(&change_set.slice_configuration_enabled),
            is_slice_l2_caching_enabled: flag(&change_set.slice_l2_caching_enabled),
            slice_configuration_range: change_set.slice_configuration_range,
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_path() {
        let target = UpdateTarget {
            application_id: 1673635841,
            cache_setting_id: 112233,
        };
        assert_eq!(target.path(), "edge_applications/1673635841/cache_settings/112233");
    }

    #[test]
    fn test_absent_fields_are_not_serialized() {
        let change_set = ChangeSet {
            name: Some("renamed".into()),
            l2_caching_enabled: Some(TriState::False),
            ..ChangeSet::default()
        };
        let body = CacheSettingsPatch::from_validated(&change_set).to_json().unwrap();

        assert_eq!(
            String::from_utf8(body).unwrap(),
            r#"{"name":"renamed","l2_caching_enabled":false}"#
        );
    }

    #[test]
    fn test_empty_change_set_yields_empty_object() {
        let body = CacheSettingsPatch::from_validated(&ChangeSet::default())
            .to_json()
            .unwrap();
        assert_eq!(body, b"{}");
    }

    #[test]
    fn test_modes_and_lists_use_wire_names() {
        let change_set = ChangeSet {
            browser_cache_settings: Some(BrowserCacheMode::Override),
            browser_cache_settings_maximum_ttl: Some(60),
            cache_by_cookies: Some(CacheByMode::Whitelist),
            cookie_names: Some(vec!["aa".into(), "123".into()]),
            slice_configuration_enabled: Some(TriState::True),
            slice_configuration_range: Some(1024),
            ..ChangeSet::default()
        };
        let value =
            serde_json::to_value(CacheSettingsPatch::from_validated(&change_set)).unwrap();

        assert_eq!(value["browser_cache_settings"], "override");
        assert_eq!(value["browser_cache_settings_maximum_ttl"], 60);
        assert_eq!(value["cache_by_cookies"], "whitelist");
        assert_eq!(value["cookie_names"], serde_json::json!(["aa", "123"]));
        assert_eq!(value["is_slice_configuration_enabled"], true);
        assert_eq!(value["slice_configuration_range"], 1024);
    }

    #[test]
    fn test_invalid_token_is_never_sent() {
        let change_set = ChangeSet {
            enable_caching_for_post: Some(TriState::Invalid("troo".into())),
            ..ChangeSet::default()
        };
        let patch = CacheSettingsPatch::from_validated(&change_set);
        assert_eq!(patch.enable_caching_for_post, None);
    }

    #[test]
    fn test_building_twice_gives_identical_payloads() {
        let change_set = ChangeSet {
            name: Some("same".into()),
            query_string_fields: Some(vec!["b".into(), "a".into()]),
            enable_caching_for_options: Some(TriState::True),
            ..ChangeSet::default()
        };
        let first = CacheSettingsPatch::from_validated(&change_set).to_json().unwrap();
        let second = CacheSettingsPatch::from_validated(&change_set).to_json().unwrap();
        assert_eq!(first, second);
    }
}
