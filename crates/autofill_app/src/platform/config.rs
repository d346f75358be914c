use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use autofill_core::PageOrigin;
use autofill_engine::LookupSettings;
use autofill_logging::autofill_info;
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("invalid {field} url {value:?}: {source}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        source: url::ParseError,
    },
}

/// Settings read from the RON config file; every field is optional there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutofillConfig {
    /// URL of the page hosting the bookmark form.
    pub page_url: String,
    /// Base URL of the title endpoint; the page URL when absent.
    pub endpoint: Option<String>,
    pub debounce_ms: u64,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_body_bytes: u64,
}

impl Default for AutofillConfig {
    fn default() -> Self {
        let lookup = LookupSettings::default();
        Self {
            page_url: "http://localhost:8080/".to_string(),
            endpoint: None,
            debounce_ms: millis(autofill_core::DEFAULT_DEBOUNCE),
            connect_timeout_ms: millis(lookup.connect_timeout),
            request_timeout_ms: millis(lookup.request_timeout),
            max_body_bytes: lookup.max_bytes,
        }
    }
}

/// Config with URLs parsed and durations typed.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub page: PageOrigin,
    pub endpoint: Url,
    pub debounce: Duration,
    pub lookup: LookupSettings,
}

impl AutofillConfig {
    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                autofill_info!("No config at {:?}, using defaults", path);
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config = ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        autofill_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
        let page_url = parse_url("page_url", &self.page_url)?;
        let endpoint = match &self.endpoint {
            Some(endpoint) => parse_url("endpoint", endpoint)?,
            None => page_url.clone(),
        };
        Ok(ResolvedConfig {
            page: PageOrigin::new(page_url),
            endpoint,
            debounce: Duration::from_millis(self.debounce_ms),
            lookup: LookupSettings {
                connect_timeout: Duration::from_millis(self.connect_timeout_ms),
                request_timeout: Duration::from_millis(self.request_timeout_ms),
                max_bytes: self.max_body_bytes,
            },
        })
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn parse_url(field: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|source| ConfigError::InvalidUrl {
        field,
        value: value.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AutofillConfig::load(&dir.path().join("absent.ron")).unwrap();
        assert_eq!(config, AutofillConfig::default());
        assert_eq!(config.debounce_ms, 1000);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("autofill.ron");
        fs::write(
            &path,
            r#"(page_url: "https://mysite.test/bookmarks/new", debounce_ms: 250)"#,
        )
        .unwrap();

        let config = AutofillConfig::load(&path).unwrap();
        assert_eq!(config.page_url, "https://mysite.test/bookmarks/new");
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.endpoint, None);
        assert_eq!(config.max_body_bytes, LookupSettings::default().max_bytes);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("autofill.ron");
        fs::write(&path, "(debounce_ms: \"soon\")").unwrap();

        let err = AutofillConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn endpoint_defaults_to_page_url() {
        let config = AutofillConfig {
            page_url: "https://mysite.test/bookmarks/new".to_string(),
            ..AutofillConfig::default()
        };
        let resolved = config.resolve().unwrap();
        assert_eq!(resolved.page.host(), "mysite.test");
        assert_eq!(resolved.endpoint.as_str(), "https://mysite.test/bookmarks/new");
        assert_eq!(resolved.debounce, Duration::from_millis(1000));
    }

    #[test]
    fn defaults_round_trip_through_resolve() {
        let resolved = AutofillConfig::default().resolve().unwrap();
        let lookup = LookupSettings::default();
        assert_eq!(resolved.debounce, autofill_core::DEFAULT_DEBOUNCE);
        assert_eq!(resolved.lookup.connect_timeout, lookup.connect_timeout);
        assert_eq!(resolved.lookup.request_timeout, lookup.request_timeout);
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }

    #[test]
    fn invalid_page_url_is_rejected() {
        let config = AutofillConfig {
            page_url: "not a url".to_string(),
            ..AutofillConfig::default()
        };
        let err = config.resolve().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidUrl {
                field: "page_url",
                ..
            }
        ));
    }
}
