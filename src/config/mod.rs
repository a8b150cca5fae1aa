//! Runtime configuration: defaults, then an optional TOML file, then
//! `INJURY_FEED_*` environment variables.

use anyhow::Context;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::league::ESPN_CORE_BASE;
use crate::pipeline::PipelineSettings;

/// Prefix for environment overrides (`INJURY_FEED_TEAM_CONCURRENCY=4`).
pub const ENV_PREFIX: &str = "INJURY_FEED_";

/// Config file read when `--config` is not given, if present.
pub const DEFAULT_CONFIG_FILE: &str = "injury_feed.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Level for this crate's events; `RUST_LOG` overrides it entirely.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Per-request timeout, e.g. `"10s"` or `10`.
    #[serde(default = "default_request_timeout", deserialize_with = "duration")]
    pub request_timeout: Duration,
    /// Overall budget for one league run; unset means none.
    #[serde(default, deserialize_with = "optional_duration")]
    pub pipeline_deadline: Option<Duration>,
    /// Teams collected at once (`0` = unbounded).
    #[serde(default = "default_team_concurrency")]
    pub team_concurrency: usize,
    /// Detail requests in flight per team (`0` = unbounded).
    #[serde(default = "default_reference_concurrency")]
    pub reference_concurrency: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Root of the ESPN core API; point at a mirror for testing.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Directory holding `<LEAGUE>_Players.csv` catalogs.
    #[serde(default = "default_catalog_dir")]
    pub catalog_dir: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(15)
}

fn default_team_concurrency() -> usize {
    8
}

fn default_reference_concurrency() -> usize {
    16
}

fn default_user_agent() -> String {
    format!("injury-feed/{}", env!("CARGO_PKG_VERSION"))
}

fn default_base_url() -> String {
    ESPN_CORE_BASE.to_owned()
}

fn default_catalog_dir() -> PathBuf {
    PathBuf::from("player_ids")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Config {
    /// Load from `path` (or [`DEFAULT_CONFIG_FILE`] if it exists) and the environment.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        if path.is_some() && !file.exists() {
            anyhow::bail!("config file {} does not exist", file.display());
        }

        Self::from_figment(
            Figment::new()
                .merge(Toml::file(file))
                .merge(Env::prefixed(ENV_PREFIX)),
        )
    }

    pub fn from_figment(figment: Figment) -> anyhow::Result<Self> {
        let config: Config = figment.extract().context("Failed to load config")?;
        config.base_url()?;
        Ok(config)
    }

    pub fn base_url(&self) -> anyhow::Result<Url> {
        Url::parse(&self.base_url).with_context(|| format!("invalid base_url {:?}", self.base_url))
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            team_concurrency: self.team_concurrency,
            reference_concurrency: self.reference_concurrency,
            deadline: self.pipeline_deadline,
        }
    }
}

/// Seconds as a number, or a human duration string parsed by `fundu` (`"1.5m"`).
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDuration {
    Seconds(u64),
    Text(String),
}

impl RawDuration {
    fn into_duration<E: serde::de::Error>(self) -> Result<Duration, E> {
        match self {
            RawDuration::Seconds(secs) => Ok(Duration::from_secs(secs)),
            RawDuration::Text(text) => fundu::parse_duration(text.trim())
                .map_err(|e| E::custom(format_args!("invalid duration {text:?}: {e}"))),
        }
    }
}

fn duration<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    RawDuration::deserialize(deserializer)?.into_duration()
}

fn optional_duration<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Duration>, D::Error> {
    Option::<RawDuration>::deserialize(deserializer)?
        .map(RawDuration::into_duration)
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(toml: &str) -> anyhow::Result<Config> {
        Config::from_figment(Figment::new().merge(Toml::string(toml)))
    }

    #[test]
    fn defaults_apply_when_empty() {
        let config = from_toml("").unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.pipeline_deadline, None);
        assert_eq!(config.team_concurrency, 8);
        assert_eq!(config.reference_concurrency, 16);
        assert_eq!(config.base_url().unwrap().as_str(), "https://sports.core.api.espn.com/");
        assert_eq!(config.catalog_dir, PathBuf::from("player_ids"));
    }

    #[test]
    fn durations_accept_text_and_seconds() {
        let config = from_toml(
            r#"
            request_timeout = "500ms"
            pipeline_deadline = 120
            "#,
        )
        .unwrap();
        assert_eq!(config.request_timeout, Duration::from_millis(500));
        assert_eq!(config.pipeline_deadline, Some(Duration::from_secs(120)));
    }

    #[test]
    fn settings_follow_config() {
        let config = from_toml("team_concurrency = 0\nreference_concurrency = 4").unwrap();
        let settings = config.pipeline_settings();
        assert_eq!(settings.team_concurrency, 0);
        assert_eq!(settings.reference_concurrency, 4);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(from_toml(r#"request_timeout = "soon""#).is_err());
        assert!(from_toml(r#"base_url = "not a url""#).is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        assert!(Config::load(Some(Path::new("/nonexistent/injury_feed.toml"))).is_err());
    }
}
