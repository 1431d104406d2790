//! Formatting utilities for the edgecli client.
//!
//! This module renders records returned by the API as JSON or YAML.

use serde::Serialize;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

pub const JSON: &str = "json";
pub const YAML: &str = "yaml";

/// Error types that can occur during formatting operations
#[derive(Debug, thiserror::Error)]
pub enum FormattingError {
    /// Error when an unsupported output format is requested
    #[error("invalid output format {0}")]
    UnsupportedOutputFormat(String),

    #[error("JSON serialization error: {0}")]
    JsonSerializationError(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    YamlSerializationError(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Default, PartialEq, PartialOrd)]
pub struct OutputFormatOptions {
    pub pretty: bool,
}

/// Names of the supported output formats, as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
enum FormatName {
    Json,
    Yaml,
}

/// Enum representing the supported output formats
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum OutputFormat {
    /// JSON (JavaScript Object Notation) format
    Json(OutputFormatOptions),
    /// YAML format
    Yaml(OutputFormatOptions),
}

impl OutputFormat {
    /// Returns a vector of all supported format names as strings
    pub fn names() -> Vec<&'static str> {
        FormatName::iter()
            .map(|name| match name {
                FormatName::Json => JSON,
                FormatName::Yaml => YAML,
            })
            .collect()
    }

    pub fn from_string_with_options(
        format_str: &str,
        options: OutputFormatOptions,
    ) -> Result<OutputFormat, FormattingError> {
        let normalized_format = format_str.trim().to_lowercase();
        match FormatName::from_str(&normalized_format) {
            Ok(FormatName::Json) => Ok(OutputFormat::Json(options)),
            Ok(FormatName::Yaml) => Ok(OutputFormat::Yaml(options)),
            Err(_) => Err(FormattingError::UnsupportedOutputFormat(normalized_format)),
        }
    }

    /// Serializes any record in this format.
    pub fn render<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, FormattingError> {
        match self {
            OutputFormat::Json(options) => {
                if options.pretty {
                    Ok(serde_json::to_string_pretty(value)?)
                } else {
                    Ok(serde_json::to_string(value)?)
                }
            }
            OutputFormat::Yaml(_) => Ok(serde_yaml::to_string(value)?),
        }
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Json(OutputFormatOptions::default())
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            OutputFormat::Json(_) => write!(f, "{JSON}"),
            OutputFormat::Yaml(_) => write!(f, "{YAML}"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = FormattingError;

    fn from_str(format_str: &str) -> Result<OutputFormat, FormattingError> {
        Self::from_string_with_options(format_str, OutputFormatOptions::default())
    }
}

pub trait Formattable {
    fn format(&self, f: &OutputFormat) -> Result<String, FormattingError>;
}
