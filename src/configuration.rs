use crate::format::{Formattable, FormattingError, OutputFormat};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;
use url::Url;

pub const DEFAULT_APPLICATION_ID: &str = "edgecli";
pub const DEFAULT_CONFIGURATION_FILE_NAME: &str = "config.yml";
pub const DEFAULT_API_URL: &str = "https://api.azionapi.net";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

pub const ENV_CONFIG_DIR: &str = "EDGECLI_CONFIG_DIR";
pub const ENV_TOKEN: &str = "EDGECLI_TOKEN";

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("failed to resolve the configuration directory")]
    FailedToFindConfigurationDirectory,
    #[error("failed to load configuration data, because of: {cause}")]
    FailedToLoadData {
        cause: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("invalid API URL {url:?}: {cause}")]
    InvalidApiUrl { url: String, cause: url::ParseError },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default = "default_api_url")]
    api_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(default = "default_timeout")]
    timeout: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: None,
            timeout: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl Configuration {
    pub fn new(api_url: impl Into<String>, token: Option<String>, timeout: u64) -> Self {
        Self {
            api_url: api_url.into(),
            token,
            timeout,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// The API base URL, parsed. A trailing slash is enforced so that relative
    /// resource paths join underneath it instead of replacing its last segment.
    pub fn api_base_url(&self) -> Result<Url, ConfigurationError> {
        let mut raw = self.api_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Url::parse(&raw).map_err(|cause| ConfigurationError::InvalidApiUrl {
            url: self.api_url.clone(),
            cause,
        })
    }

    /// The API token. The environment variable wins over the file.
    pub fn token(&self) -> Option<String> {
        match std::env::var(ENV_TOKEN) {
            Ok(token) if !token.trim().is_empty() => Some(token),
            _ => self.token.clone(),
        }
    }

    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    pub fn get_default_configuration_file_path() -> Result<PathBuf, ConfigurationError> {
        if let Ok(config_dir_str) = std::env::var(ENV_CONFIG_DIR) {
            let mut config_path = PathBuf::from(config_dir_str);
            config_path.push(DEFAULT_CONFIGURATION_FILE_NAME);
            return Ok(config_path);
        }

        match config_dir() {
            Some(mut default_config_file_path) => {
                default_config_file_path.push(DEFAULT_APPLICATION_ID);
                default_config_file_path.push(DEFAULT_CONFIGURATION_FILE_NAME);
                Ok(default_config_file_path)
            }
            None => Err(ConfigurationError::FailedToFindConfigurationDirectory),
        }
    }

    /// Load the default configuration, falling back to built-in defaults when
    /// no configuration file exists yet. Nothing is written to disk.
    pub fn load_or_default() -> Result<Configuration, ConfigurationError> {
        let default_file_path = Configuration::get_default_configuration_file_path()?;
        debug!(
            "Loading configuration from {}...",
            default_file_path.display()
        );

        if !default_file_path.exists() {
            debug!("Configuration file not found, using defaults");
            return Ok(Configuration::default());
        }

        Configuration::load_from_file(&default_file_path)
    }

    pub fn load_from_file(path: &Path) -> Result<Configuration, ConfigurationError> {
        let contents = fs::read_to_string(path).map_err(|cause| {
            ConfigurationError::FailedToLoadData {
                cause: Box::new(cause),
            }
        })?;

        serde_yaml::from_str(&contents).map_err(|cause| ConfigurationError::FailedToLoadData {
            cause: Box::new(cause),
        })
    }
}

/// View of the configuration that never leaks the token.
#[derive(Debug, Clone, Serialize)]
struct ConfigurationView<'a> {
    api_url: &'a str,
    token: Option<&'static str>,
    timeout: u64,
}

impl<'a> From<&'a Configuration> for ConfigurationView<'a> {
    fn from(configuration: &'a Configuration) -> Self {
        ConfigurationView {
            api_url: &configuration.api_url,
            token: configuration.token().map(|_| "********"),
            timeout: configuration.timeout,
        }
    }
}

impl Formattable for Configuration {
    fn format(&self, f: &OutputFormat) -> Result<String, FormattingError> {
        f.render(&ConfigurationView::from(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::OutputFormatOptions;

    #[test]
    fn test_missing_fields_take_defaults() {
        let configuration: Configuration = serde_yaml::from_str("token: abc\n").unwrap();
        assert_eq!(configuration.api_url(), DEFAULT_API_URL);
        assert_eq!(configuration.timeout(), DEFAULT_TIMEOUT_SECONDS);
    }

    #[test]
    fn test_api_base_url_gets_trailing_slash() {
        let configuration = Configuration::new("https://api.example.com/v3", None, 10);
        let base = configuration.api_base_url().unwrap();
        assert_eq!(base.as_str(), "https://api.example.com/v3/");
        assert_eq!(
            base.join("edge_applications/1").unwrap().as_str(),
            "https://api.example.com/v3/edge_applications/1"
        );
    }

    #[test]
    fn test_invalid_api_url() {
        let configuration = Configuration::new("not a url", None, 10);
        assert!(matches!(
            configuration.api_base_url(),
            Err(ConfigurationError::InvalidApiUrl { .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join(DEFAULT_CONFIGURATION_FILE_NAME);
        fs::write(
            &path,
            "api_url: https://api.example.com\ntoken: secret\ntimeout: 15\n",
        )
        .unwrap();

        let loaded = Configuration::load_from_file(&path).unwrap();
        assert_eq!(
            loaded,
            Configuration::new("https://api.example.com", Some("secret".into()), 15)
        );
    }

    #[test]
    fn test_malformed_file_fails_to_load() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join(DEFAULT_CONFIGURATION_FILE_NAME);
        fs::write(&path, "timeout: [not, a, number]").unwrap();

        assert!(matches!(
            Configuration::load_from_file(&path),
            Err(ConfigurationError::FailedToLoadData { .. })
        ));
    }

    #[test]
    fn test_formatting_masks_token() {
        let configuration = Configuration::new("https://api.example.com", Some("secret".into()), 15);
        let output = configuration
            .format(&OutputFormat::Json(OutputFormatOptions::default()))
            .unwrap();

        assert!(!output.contains("secret"));
        assert!(output.contains("https://api.example.com"));
    }
}
