//! Application configuration
//!
//! Read from a TOML file given by `--config`, else `$ICLASS_QR_CONFIG`,
//! else built-in defaults. Missing keys take their default value.
//!
//! ```toml
//! app_url = "http://localhost:3000/"
//! language = "zh"
//! refresh_interval_secs = 5
//! download_offsets = [0, 5, 10, 30, 60]
//! ```

use crate::i18n::Language;
use iclass_render::{ExportFormat, MAX_MODULE_PX};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "ICLASS_QR_CONFIG";

/// Environment variable overriding the data directory
pub const HOME_ENV: &str = "ICLASS_QR_HOME";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`AppConfig`]
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// `app_url` is not an absolute URL
    #[error("invalid app_url '{url}': {source}")]
    InvalidAppUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A value is out of range
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Image format for exports, as written in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl From<ImageFormat> for ExportFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Png => Self::Png,
            ImageFormat::Svg => Self::Svg,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Saved-items file; defaults to the data directory
    pub storage_path: Option<PathBuf>,
    /// Base URL of the app, used for `?id=` and `?share=` links
    pub app_url: String,
    /// Seconds between refreshes in `watch`
    pub refresh_interval_secs: u64,
    /// Display language
    pub language: Language,
    /// Offsets in seconds written by `export`
    pub download_offsets: Vec<i64>,
    /// Pixels per QR module in PNG exports
    pub qr_module_px: usize,
    /// Export image format
    pub export_format: ImageFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_path: None,
            app_url: "http://localhost:3000/".to_string(),
            refresh_interval_secs: 5,
            language: Language::En,
            download_offsets: vec![0, 5, 10, 30, 60],
            qr_module_px: 10,
            export_format: ImageFormat::Png,
        }
    }
}

impl AppConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With language
    #[inline]
    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// With storage path
    #[inline]
    #[must_use]
    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = Some(path.into());
        self
    }

    /// With app URL
    #[inline]
    #[must_use]
    pub fn with_app_url(mut self, url: impl Into<String>) -> Self {
        self.app_url = url.into();
        self
    }

    /// Load from `path`, else `$ICLASS_QR_CONFIG`, else defaults
    ///
    /// # Errors
    /// Returns [`ConfigError`] if a named file cannot be read, parsed or
    /// validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let env_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        match path.map(Path::to_path_buf).or(env_path) {
            Some(path) => Self::from_file(&path),
            None => {
                tracing::debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load and validate a TOML file
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the file cannot be read, parsed or
    /// validated.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML text
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] or a validation error.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    ///
    /// # Errors
    /// Returns the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parsed_app_url()?;
        if self.refresh_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "refresh_interval_secs",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(1..=MAX_MODULE_PX).contains(&self.qr_module_px) {
            return Err(ConfigError::InvalidValue {
                field: "qr_module_px",
                reason: format!("must be between 1 and {MAX_MODULE_PX}"),
            });
        }
        Ok(())
    }

    /// `app_url` as a URL
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidAppUrl`] if it does not parse.
    pub fn parsed_app_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.app_url).map_err(|source| ConfigError::InvalidAppUrl {
            url: self.app_url.clone(),
            source,
        })
    }

    /// Saved-items file, explicit or under the data directory
    #[must_use]
    pub fn storage_file(&self) -> PathBuf {
        self.storage_path.clone().unwrap_or_else(|| {
            data_dir().join(format!("{}.json", iclass_store::STORAGE_KEY))
        })
    }
}

/// `$ICLASS_QR_HOME`, else `~/.iclass-qr`, else the working directory
fn data_dir() -> PathBuf {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return PathBuf::from(home);
    }
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(".iclass-qr"))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_app() {
        let config = AppConfig::default();
        assert_eq!(config.refresh_interval_secs, 5);
        assert_eq!(config.download_offsets, vec![0, 5, 10, 30, 60]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml("language = \"zh\"\nexport_format = \"svg\"").unwrap();
        assert_eq!(config.language, Language::Zh);
        assert_eq!(config.export_format, ImageFormat::Svg);
        assert_eq!(config.refresh_interval_secs, 5);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            AppConfig::from_toml("app_url = \"not a url\""),
            Err(ConfigError::InvalidAppUrl { .. })
        ));
        assert!(matches!(
            AppConfig::from_toml("refresh_interval_secs = 0"),
            Err(ConfigError::InvalidValue { field: "refresh_interval_secs", .. })
        ));
        assert!(matches!(
            AppConfig::from_toml("qr_module_px = 0"),
            Err(ConfigError::InvalidValue { field: "qr_module_px", .. })
        ));
        assert!(matches!(
            AppConfig::from_toml("qr_module_px = 1000000000"),
            Err(ConfigError::InvalidValue { field: "qr_module_px", .. })
        ));
        assert!(AppConfig::from_toml("qr_module_px = 100").is_ok());
        assert!(matches!(
            AppConfig::from_toml("language = \"fr\""),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn explicit_storage_path_wins() {
        let config = AppConfig::new().with_storage_path("/tmp/items.json");
        assert_eq!(config.storage_file(), PathBuf::from("/tmp/items.json"));
    }

    #[test]
    fn from_file_reports_path() {
        let err = AppConfig::from_file(Path::new("/nonexistent/iclass.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/iclass.toml"));
    }
}
