//! Optional TOML configuration, overridden by command-line flags.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use weekend_engine::{WeekendAnchor, WeekendOptions};

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "weekendsync.toml";

/// Number of weekends `upcoming` lists when neither flag nor config says otherwise.
pub const DEFAULT_UPCOMING_COUNT: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    pub anchor: Option<WeekendAnchor>,
    pub timezone: Option<String>,
    pub upcoming_count: Option<usize>,
}

impl CliConfig {
    /// Load `explicit` if given, else `weekendsync.toml` if present, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("in config file {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid TOML configuration")
    }

    /// Build engine options; flag values win over file values.
    pub fn weekend_options(
        &self,
        anchor: Option<WeekendAnchor>,
        timezone: Option<&str>,
    ) -> Result<WeekendOptions> {
        let mut options = WeekendOptions::default()
            .with_anchor(anchor.or(self.anchor).unwrap_or_default());

        if let Some(tz) = timezone.or(self.timezone.as_deref()) {
            options = options.with_timezone(tz)?;
        }

        Ok(options)
    }

    pub fn upcoming_count(&self, flag: Option<usize>) -> usize {
        flag.or(self.upcoming_count)
            .unwrap_or(DEFAULT_UPCOMING_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = CliConfig::from_toml_str(
            r#"
            anchor = "saturday"
            timezone = "America/Denver"
            upcoming_count = 4
            "#,
        )
        .unwrap();
        assert_eq!(config.anchor, Some(WeekendAnchor::Saturday));
        assert_eq!(config.timezone.as_deref(), Some("America/Denver"));
        assert_eq!(config.upcoming_count(None), 4);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CliConfig::from_toml_str("").unwrap();
        assert_eq!(config, CliConfig::default());
        let options = config.weekend_options(None, None).unwrap();
        assert_eq!(options, WeekendOptions::default());
        assert_eq!(config.upcoming_count(None), DEFAULT_UPCOMING_COUNT);
    }

    #[test]
    fn test_flags_override_file() {
        let config = CliConfig {
            anchor: Some(WeekendAnchor::Saturday),
            timezone: Some("Asia/Tokyo".to_string()),
            upcoming_count: Some(4),
        };
        let options = config
            .weekend_options(Some(WeekendAnchor::Thursday), Some("UTC"))
            .unwrap();
        assert_eq!(options.anchor, WeekendAnchor::Thursday);
        assert_eq!(options.timezone.map(|tz| tz.name()), Some("UTC"));
        assert_eq!(config.upcoming_count(Some(2)), 2);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = CliConfig::from_toml_str("week_start = \"monday\"").unwrap_err();
        assert!(err.to_string().contains("invalid TOML"), "got: {err}");
    }

    #[test]
    fn test_bad_anchor_value_is_rejected() {
        assert!(CliConfig::from_toml_str("anchor = \"monday\"").is_err());
    }

    #[test]
    fn test_bad_timezone_is_rejected() {
        let config = CliConfig {
            timezone: Some("Nowhere/Land".to_string()),
            ..Default::default()
        };
        let err = config.weekend_options(None, None).unwrap_err();
        assert!(err.to_string().contains("Invalid timezone"), "got: {err}");
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let err = CliConfig::from_file(Path::new("/nonexistent/weekendsync.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/weekendsync.toml"), "got: {err}");
    }
}
