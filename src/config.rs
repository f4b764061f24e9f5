//! Dashboard configuration.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `AUTOHEAL_*` environment variables, then command-line overrides.
//!
//! ```toml
//! demo_api = "http://localhost:5000"
//! autoheal_api = "http://localhost:8000"
//! audit_interval = "2s"
//! health_interval = "2s"
//! traffic_interval = "1s"
//! # request_timeout = "5s"
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::duration::parse_duration;

/// Prefix for environment variable overrides (e.g. `AUTOHEAL_DEMO_API`).
pub const ENV_PREFIX: &str = "AUTOHEAL";

/// Config file read when `--config` is not given. Missing is fine.
pub const DEFAULT_CONFIG_FILE: &str = "autoheal-dash.toml";

const DEFAULT_DEMO_API: &str = "http://localhost:5000";
const DEFAULT_AUTOHEAL_API: &str = "http://localhost:8000";
const DEFAULT_METRICS_URL: &str = "http://localhost:3000/d-solo/autoheal-dash/autoheal-dashboard?orgId=1&panelId=1&theme=dark";

/// How often each dashboard loop fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intervals {
    /// Audit timeline poll.
    pub audit: Duration,
    /// Demo service health probe.
    pub health: Duration,
    /// Synthetic load against the demo service root.
    pub traffic: Duration,
}

impl Default for Intervals {
    fn default() -> Self {
        Self {
            audit: Duration::from_millis(2000),
            health: Duration::from_millis(2000),
            traffic: Duration::from_millis(1000),
        }
    }
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Base URL of the demo service (`/health`, `/`, `/fault/{kind}`).
    pub demo_api: String,
    /// Base URL of the AutoHeal engine (`/audit`).
    pub autoheal_api: String,
    /// External metrics dashboard. Displayed, never fetched.
    pub metrics_url: String,
    pub intervals: Intervals,
    /// Per-request deadline. `None` means requests never time out.
    pub request_timeout: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            demo_api: DEFAULT_DEMO_API.to_string(),
            autoheal_api: DEFAULT_AUTOHEAL_API.to_string(),
            metrics_url: DEFAULT_METRICS_URL.to_string(),
            intervals: Intervals::default(),
            request_timeout: None,
        }
    }
}

/// Command-line values that take precedence over file and environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub demo_api: Option<String>,
    pub autoheal_api: Option<String>,
    pub metrics_url: Option<String>,
    pub audit_interval: Option<String>,
    pub health_interval: Option<String>,
    pub traffic_interval: Option<String>,
}

/// Settings as they appear in the config sources, before validation.
#[derive(Debug, Deserialize)]
struct RawSettings {
    #[serde(default = "default_demo_api")]
    demo_api: String,
    #[serde(default = "default_autoheal_api")]
    autoheal_api: String,
    #[serde(default = "default_metrics_url")]
    metrics_url: String,
    #[serde(default = "default_poll_interval")]
    audit_interval: String,
    #[serde(default = "default_poll_interval")]
    health_interval: String,
    #[serde(default = "default_traffic_interval")]
    traffic_interval: String,
    #[serde(default)]
    request_timeout: Option<String>,
}

fn default_demo_api() -> String {
    DEFAULT_DEMO_API.to_string()
}

fn default_autoheal_api() -> String {
    DEFAULT_AUTOHEAL_API.to_string()
}

fn default_metrics_url() -> String {
    DEFAULT_METRICS_URL.to_string()
}

fn default_poll_interval() -> String {
    "2s".to_string()
}

fn default_traffic_interval() -> String {
    "1s".to_string()
}

impl Settings {
    /// Load settings from `path` (or the default file), the environment, and `overrides`.
    ///
    /// An explicitly given `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        Self::load_with_env_prefix(path, overrides, ENV_PREFIX)
    }

    fn load_with_env_prefix(
        path: Option<&Path>,
        overrides: &Overrides,
        env_prefix: &str,
    ) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix(env_prefix))
            .set_override_option("demo_api", overrides.demo_api.clone())?
            .set_override_option("autoheal_api", overrides.autoheal_api.clone())?
            .set_override_option("metrics_url", overrides.metrics_url.clone())?
            .set_override_option("audit_interval", overrides.audit_interval.clone())?
            .set_override_option("health_interval", overrides.health_interval.clone())?
            .set_override_option("traffic_interval", overrides.traffic_interval.clone())?
            .build()
            .context("Failed to read configuration")?;

        let raw: RawSettings = config.try_deserialize().context("Invalid configuration")?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawSettings) -> Result<Self> {
        let intervals = Intervals {
            audit: parse_interval("audit_interval", &raw.audit_interval)?,
            health: parse_interval("health_interval", &raw.health_interval)?,
            traffic: parse_interval("traffic_interval", &raw.traffic_interval)?,
        };

        let request_timeout = match raw.request_timeout.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => Some(parse_interval("request_timeout", value)?),
        };

        Ok(Self {
            demo_api: normalize_base_url("demo_api", &raw.demo_api)?,
            autoheal_api: normalize_base_url("autoheal_api", &raw.autoheal_api)?,
            metrics_url: raw.metrics_url.trim().to_string(),
            intervals,
            request_timeout,
        })
    }
}

fn parse_interval(key: &str, value: &str) -> Result<Duration> {
    let duration = parse_duration(value).with_context(|| format!("Invalid {}", key))?;
    if duration.is_zero() {
        bail!("{} must be greater than zero", key);
    }
    Ok(duration)
}

fn normalize_base_url(key: &str, value: &str) -> Result<String> {
    let trimmed = value.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        bail!("{} must not be empty", key);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn toml_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "{}", contents).unwrap();
        file
    }

    #[test]
    fn test_defaults_without_sources() {
        let settings =
            Settings::load_with_env_prefix(None, &Overrides::default(), "AUTOHEAL_TEST_NONE")
                .unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.intervals.audit, Duration::from_millis(2000));
        assert_eq!(settings.intervals.traffic, Duration::from_millis(1000));
        assert!(settings.request_timeout.is_none());
    }

    #[test]
    fn test_file_values() {
        let file = toml_file(
            r#"
            demo_api = "http://demo:5000/"
            audit_interval = "500ms"
            request_timeout = "3s"
            "#,
        );
        let settings = Settings::load_with_env_prefix(
            Some(file.path()),
            &Overrides::default(),
            "AUTOHEAL_TEST_FILE",
        )
        .unwrap();

        assert_eq!(settings.demo_api, "http://demo:5000");
        assert_eq!(settings.intervals.audit, Duration::from_millis(500));
        assert_eq!(settings.intervals.health, Duration::from_millis(2000));
        assert_eq!(settings.request_timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_env_overrides_file_and_cli_overrides_env() {
        let file = toml_file(
            r#"
            demo_api = "http://from-file:5000"
            autoheal_api = "http://from-file:8000"
            "#,
        );
        std::env::set_var("AUTOHEAL_TEST_LAYER_DEMO_API", "http://from-env:5000");
        std::env::set_var("AUTOHEAL_TEST_LAYER_AUTOHEAL_API", "http://from-env:8000");

        let overrides = Overrides {
            autoheal_api: Some("http://from-cli:8000".to_string()),
            ..Overrides::default()
        };
        let settings =
            Settings::load_with_env_prefix(Some(file.path()), &overrides, "AUTOHEAL_TEST_LAYER")
                .unwrap();

        std::env::remove_var("AUTOHEAL_TEST_LAYER_DEMO_API");
        std::env::remove_var("AUTOHEAL_TEST_LAYER_AUTOHEAL_API");

        assert_eq!(settings.demo_api, "http://from-env:5000");
        assert_eq!(settings.autoheal_api, "http://from-cli:8000");
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let result = Settings::load_with_env_prefix(
            Some(Path::new("/nonexistent/autoheal-dash.toml")),
            &Overrides::default(),
            "AUTOHEAL_TEST_MISSING",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_interval_is_error() {
        let overrides = Overrides {
            health_interval: Some("often".to_string()),
            ..Overrides::default()
        };
        let result = Settings::load_with_env_prefix(None, &overrides, "AUTOHEAL_TEST_BAD");
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_interval_is_error() {
        let overrides = Overrides {
            traffic_interval: Some("0ms".to_string()),
            ..Overrides::default()
        };
        assert!(Settings::load_with_env_prefix(None, &overrides, "AUTOHEAL_TEST_ZERO").is_err());
    }

    #[test]
    fn test_empty_base_url_is_error() {
        let overrides = Overrides {
            demo_api: Some("  ".to_string()),
            ..Overrides::default()
        };
        assert!(Settings::load_with_env_prefix(None, &overrides, "AUTOHEAL_TEST_EMPTY").is_err());
    }
}
