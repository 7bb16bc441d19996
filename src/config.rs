// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::model::DEFAULT_DATETIME_FORMAT;
use crate::storage::LocalStorage;
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;

fn default_true() -> bool {
    true
}

fn default_datetime_format() -> String {
    DEFAULT_DATETIME_FORMAT.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// chrono format string used when showing deadlines and events.
    #[serde(default = "default_datetime_format")]
    pub datetime_format: String,
    /// Write the task list to disk after every change.
    #[serde(default = "default_true")]
    pub save_tasks: bool,
    /// off, error, warn, info, debug or trace.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            datetime_format: default_datetime_format(),
            save_tasks: true,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Whether `err` means the config file simply doesn't exist yet.
    ///
    /// Checks our explicit "not found" message first, then walks the error
    /// chain for an underlying IO NotFound.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        LocalStorage::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            LocalStorage::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }

    /// `log_level` as a filter, or `None` when the value is not a level name.
    pub fn parsed_log_level(&self) -> Option<log::LevelFilter> {
        self.log_level.parse().ok()
    }

    /// `log_level` as a filter; unknown values fall back to `Warn`.
    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.parsed_log_level().unwrap_or(log::LevelFilter::Warn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;

    #[test]
    fn missing_file_is_reported_as_missing() {
        let ctx = TestContext::new();
        let err = Config::load(&ctx).unwrap_err();
        assert!(Config::is_missing_config_error(&err));
    }

    #[test]
    fn partial_file_gets_defaults() {
        let ctx = TestContext::new();
        fs::write(
            ctx.get_config_file_path().unwrap(),
            "datetime_format = \"%d/%m/%Y %H:%M\"\n",
        )
        .unwrap();
        let cfg = Config::load(&ctx).unwrap();
        assert_eq!(cfg.datetime_format, "%d/%m/%Y %H:%M");
        assert!(cfg.save_tasks);
        assert_eq!(cfg.log_level, "warn");
    }

    #[test]
    fn malformed_file_is_not_missing() {
        let ctx = TestContext::new();
        fs::write(ctx.get_config_file_path().unwrap(), "save_tasks = maybe").unwrap();
        let err = Config::load(&ctx).unwrap_err();
        assert!(!Config::is_missing_config_error(&err));
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn save_then_load() {
        let ctx = TestContext::new();
        let cfg = Config {
            save_tasks: false,
            log_level: "debug".to_string(),
            ..Config::default()
        };
        cfg.save(&ctx).unwrap();
        assert_eq!(Config::load(&ctx).unwrap(), cfg);
        assert_eq!(cfg.log_level_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn unknown_log_level_falls_back() {
        let cfg = Config {
            log_level: "chatty".to_string(),
            ..Config::default()
        };
        assert_eq!(cfg.parsed_log_level(), None);
        assert_eq!(cfg.log_level_filter(), log::LevelFilter::Warn);
    }

    #[test]
    fn level_names_are_case_insensitive() {
        let cfg = Config {
            log_level: "INFO".to_string(),
            ..Config::default()
        };
        assert_eq!(cfg.parsed_log_level(), Some(log::LevelFilter::Info));
    }
}
