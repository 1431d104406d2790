//! Cross-field validation of a [`ChangeSet`] against the fetched edge application.
//!
//! Rules are plain tagged values kept in an ordered [`RuleSet`]. The
//! [`Validator`] walks them in order and stops at the first failure, so the
//! order of the set decides which error a user sees when several apply.

use crate::change_set::{BooleanField, ChangeSet, Field, TriState};
use crate::model::{AdaptiveDeliveryAction, BrowserCacheMode, CdnCacheMode, EdgeApplication};
use std::fmt;
use strum::IntoEnumIterator;
use thiserror::Error;
use tracing::{debug, trace};

pub const DEFAULT_SLICE_CONFIGURATION_RANGE: u32 = 1024;

/// Fields that can only be changed when application acceleration is on.
const ACCELERATION_DEPENDENT_FIELDS: &[Field] = &[
    Field::CacheByQueryString,
    Field::QueryStringFields,
    Field::EnableQueryStringSort,
    Field::CacheByCookies,
    Field::CookieNames,
    Field::AdaptiveDeliveryAction,
    Field::DeviceGroup,
    Field::EnableCachingForPost,
    Field::EnableCachingForOptions,
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{capability} is not enabled on edge application {application_id}; enable it before changing {}", join_fields(.fields))]
    CapabilityDisabled {
        capability: Capability,
        application_id: u64,
        fields: Vec<Field>,
    },

    #[error("{companion} is required when {mode} is set to {value}")]
    CompanionFieldMissing {
        mode: Field,
        value: &'static str,
        companion: Field,
    },

    #[error("invalid value {token:?} for {field}; use \"true\" or \"false\"")]
    InvalidBooleanToken { field: BooleanField, token: String },

    #[error("{list} must name at least one entry when {mode} is set to {value}")]
    ListFieldInconsistent {
        mode: Field,
        value: String,
        list: Field,
    },
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(Field::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A platform feature, enabled per edge application, that gates some fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Acceleration,
}

impl Capability {
    pub fn dependent_fields(&self) -> &'static [Field] {
        match self {
            Capability::Acceleration => ACCELERATION_DEPENDENT_FIELDS,
        }
    }

    pub fn is_enabled(&self, application: &EdgeApplication) -> bool {
        match self {
            Capability::Acceleration => application.acceleration_enabled(),
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Capability::Acceleration => write!(f, "application acceleration"),
        }
    }
}

/// One validation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationRule {
    /// Dependent fields may only be touched when the capability is enabled.
    CapabilityRequired(Capability),
    /// `mode` set to `override` needs the `companion` value as well.
    CompanionRequired { mode: Field, companion: Field },
    /// The token of a boolean field must be a literal `true` / `false`.
    StrictBoolean(BooleanField),
    /// A list-gating `mode` that needs names must come with a non-empty `list`.
    ListRequired { mode: Field, list: Field },
    /// Enabling slicing without a range gets the given range.
    SliceRangeDefault { range: u32 },
}

/// Outcome of evaluating one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail(ValidationError),
    Correct(Correction),
}

/// A change a rule applies to the change set instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Correction {
    SetSliceConfigurationRange(u32),
}

impl Correction {
    fn apply(&self, change_set: &mut ChangeSet) {
        match self {
            Correction::SetSliceConfigurationRange(range) => {
                change_set.slice_configuration_range = Some(*range)
            }
        }
    }
}

impl ValidationRule {
    /// Evaluates the rule. Pure: neither input is modified.
    pub fn check(&self, change_set: &ChangeSet, application: &EdgeApplication) -> Verdict {
        match self {
            ValidationRule::CapabilityRequired(capability) => {
                if capability.is_enabled(application) {
                    return Verdict::Pass;
                }
                let touched: Vec<Field> = capability
                    .dependent_fields()
                    .iter()
                    .copied()
                    .filter(|field| change_set.is_present(*field))
                    .collect();
                if touched.is_empty() {
                    Verdict::Pass
                } else {
                    Verdict::Fail(ValidationError::CapabilityDisabled {
                        capability: *capability,
                        application_id: application.id,
                        fields: touched,
                    })
                }
            }
            ValidationRule::CompanionRequired { mode, companion } => {
                match override_requested(change_set, *mode) {
                    Some(value) if !change_set.is_present(*companion) => {
                        Verdict::Fail(ValidationError::CompanionFieldMissing {
                            mode: *mode,
                            value,
                            companion: *companion,
                        })
                    }
                    _ => Verdict::Pass,
                }
            }
            ValidationRule::StrictBoolean(field) => match change_set.boolean(*field) {
                Some(TriState::Invalid(token)) => {
                    Verdict::Fail(ValidationError::InvalidBooleanToken {
                        field: *field,
                        token: token.clone(),
                    })
                }
                _ => Verdict::Pass,
            },
            ValidationRule::ListRequired { mode, list } => {
                match list_demanded(change_set, *mode) {
                    Some(value) if change_set.list_len(*list).unwrap_or(0) == 0 => {
                        Verdict::Fail(ValidationError::ListFieldInconsistent {
                            mode: *mode,
                            value,
                            list: *list,
                        })
                    }
                    _ => Verdict::Pass,
                }
            }
            ValidationRule::SliceRangeDefault { range } => {
                let enabled = change_set
                    .slice_configuration_enabled
                    .as_ref()
                    .is_some_and(TriState::is_true);
                if enabled && change_set.slice_configuration_range.is_none() {
                    Verdict::Correct(Correction::SetSliceConfigurationRange(*range))
                } else {
                    Verdict::Pass
                }
            }
        }
    }
}

/// The `override` value when `mode` requests it.
fn override_requested(change_set: &ChangeSet, mode: Field) -> Option<&'static str> {
    let overridden = match mode {
        Field::BrowserCacheSettings => {
            change_set.browser_cache_settings == Some(BrowserCacheMode::Override)
        }
        Field::CdnCacheSettings => change_set.cdn_cache_settings == Some(CdnCacheMode::Override),
        _ => false,
    };
    overridden.then_some("override")
}

/// The mode value when it needs a populated list.
fn list_demanded(change_set: &ChangeSet, mode: Field) -> Option<String> {
    match mode {
        Field::CacheByCookies => change_set
            .cache_by_cookies
            .filter(|mode| mode.requires_list())
            .map(|mode| mode.to_string()),
        Field::CacheByQueryString => change_set
            .cache_by_query_string
            .filter(|mode| mode.requires_list())
            .map(|mode| mode.to_string()),
        Field::AdaptiveDeliveryAction => change_set
            .adaptive_delivery_action
            .filter(|action| *action == AdaptiveDeliveryAction::Whitelist)
            .map(|action| action.to_string()),
        _ => None,
    }
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ValidationRule::CapabilityRequired(capability) => write!(f, "requires {capability}"),
            ValidationRule::CompanionRequired { mode, companion } => {
                write!(f, "{mode} override requires {companion}")
            }
            ValidationRule::StrictBoolean(field) => write!(f, "{field} is a strict boolean"),
            ValidationRule::ListRequired { mode, list } => write!(f, "{mode} requires {list}"),
            ValidationRule::SliceRangeDefault { range } => {
                write!(f, "slicing defaults to a range of {range}")
            }
        }
    }
}

/// An ordered, immutable sequence of rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<ValidationRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<ValidationRule>) -> Self {
        Self { rules }
    }

    /// The rule set applied by `cache-settings update`.
    pub fn standard() -> Self {
        let mut rules = vec![
            ValidationRule::CapabilityRequired(Capability::Acceleration),
            ValidationRule::CompanionRequired {
                mode: Field::BrowserCacheSettings,
                companion: Field::BrowserCacheSettingsMaximumTtl,
            },
            ValidationRule::CompanionRequired {
                mode: Field::CdnCacheSettings,
                companion: Field::CdnCacheSettingsMaximumTtl,
            },
        ];
        rules.extend(BooleanField::iter().map(ValidationRule::StrictBoolean));
        rules.extend([
            ValidationRule::ListRequired {
                mode: Field::CacheByCookies,
                list: Field::CookieNames,
            },
            ValidationRule::ListRequired {
                mode: Field::CacheByQueryString,
                list: Field::QueryStringFields,
            },
            ValidationRule::ListRequired {
                mode: Field::AdaptiveDeliveryAction,
                list: Field::DeviceGroup,
            },
            ValidationRule::SliceRangeDefault {
                range: DEFAULT_SLICE_CONFIGURATION_RANGE,
            },
        ]);
        Self::new(rules)
    }

    pub fn rules(&self) -> &[ValidationRule] {
        &self.rules
    }
}

/// Applies a [`RuleSet`] to change sets.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    rules: &'a RuleSet,
}

impl<'a> Validator<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules }
    }

    /// Runs every rule in order, stopping at the first failure.
    ///
    /// On success the returned change set is safe to serialize; it differs
    /// from the input only by corrections the rules applied.
    pub fn validate(
        &self,
        change_set: ChangeSet,
        application: &EdgeApplication,
    ) -> Result<ChangeSet, ValidationError> {
        let mut change_set = change_set;

        for rule in self.rules.rules() {
            match rule.check(&change_set, application) {
                Verdict::Pass => trace!("Rule passed: {}", rule),
                Verdict::Fail(error) => {
                    debug!("Rule failed: {} ({})", rule, error);
                    return Err(error);
                }
                Verdict::Correct(correction) => {
                    debug!("Rule applied {:?}: {}", correction, rule);
                    correction.apply(&mut change_set);
                }
            }
        }

        Ok(change_set)
    }
}
