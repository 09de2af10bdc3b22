//! Session configuration.
//!
//! Sources, lowest precedence first: built-in defaults, an optional YAML
//! file, then `FILESHELL_*` environment variables (a `.env` file in the
//! working directory is loaded first and never overrides the real
//! environment).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShellError};

/// Environment variable overriding [`Config::date_format`].
pub const ENV_DATE_FORMAT: &str = "FILESHELL_DATE_FORMAT";
/// Environment variable overriding [`Config::max_depth`].
pub const ENV_MAX_DEPTH: &str = "FILESHELL_MAX_DEPTH";
/// Environment variable overriding [`Config::log_filter`].
pub const ENV_LOG: &str = "FILESHELL_LOG";

/// Tunables for a shell session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `chrono` format string for modification times.
    pub date_format: String,
    /// Sort `ls` output by name.
    pub sort_listing: bool,
    /// Deepest directory level a recursive delete or search will descend to.
    pub max_depth: usize,
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            date_format: "%d.%m.%Y %H:%M:%S".to_string(),
            sort_listing: true,
            max_depth: 4096,
            log_filter: "warn".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from defaults, an optional file and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file or an existing `.env` file cannot
    /// be read or parsed, or an environment override is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        env_file_loaded(dotenvy::dotenv())?;

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parses a YAML config file; absent keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ShellError::Config(format!("failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_yaml(&content).map_err(|e| match e {
            ShellError::Config(msg) => {
                ShellError::Config(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Parses YAML text; an empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
            .map_err(|e| ShellError::Config(format!("failed to parse config: {e}")))
    }

    /// Applies environment overrides using `lookup` to read variables.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be parsed.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(format) = lookup(ENV_DATE_FORMAT) {
            self.date_format = format;
        }
        if let Some(depth) = lookup(ENV_MAX_DEPTH) {
            self.max_depth = depth.trim().parse().map_err(|e| {
                ShellError::Config(format!("invalid {ENV_MAX_DEPTH} value `{depth}`: {e}"))
            })?;
        }
        if let Some(filter) = lookup(ENV_LOG) {
            self.log_filter = filter;
        }
        Ok(())
    }
}

/// Accepts a missing `.env` file and reports any other load failure.
fn env_file_loaded<T>(result: std::result::Result<T, dotenvy::Error>) -> Result<()> {
    match result {
        Ok(_) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(ShellError::Config(format!("failed to load .env file: {err}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_date_format() {
        let config = Config::default();
        assert_eq!(config.date_format, "%d.%m.%Y %H:%M:%S");
        assert!(config.sort_listing);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = Config::from_yaml("max_depth: 8\n").unwrap();
        assert_eq!(config.max_depth, 8);
        assert_eq!(config.date_format, Config::default().date_format);
    }

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
    }

    #[test]
    fn invalid_yaml_is_config_error() {
        let err = Config::from_yaml("max_depth: [nope").unwrap_err();
        assert!(matches!(err, ShellError::Config(_)));
    }

    #[test]
    fn env_overrides_win() {
        let mut config = Config::default();
        config
            .apply_overrides(|key| match key {
                ENV_DATE_FORMAT => Some("%Y-%m-%d".into()),
                ENV_MAX_DEPTH => Some("12".into()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.date_format, "%Y-%m-%d");
        assert_eq!(config.max_depth, 12);
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn bad_depth_override_is_rejected() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(|key| (key == ENV_MAX_DEPTH).then(|| "deep".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_MAX_DEPTH));
    }

    #[test]
    fn reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fileshell.yaml");
        std::fs::write(&path, "sort_listing: false\nlog_filter: debug\n").unwrap();
        let config = Config::from_file(&path).unwrap();
        assert!(!config.sort_listing);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn missing_env_file_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        assert!(env_file_loaded(dotenvy::from_path(dir.path().join(".env"))).is_ok());
    }

    #[test]
    fn malformed_env_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "FILESHELL_UNUSED value-without-equals\n").unwrap();

        let err = env_file_loaded(dotenvy::from_path(&path)).unwrap_err();
        assert!(matches!(err, ShellError::Config(ref msg) if msg.contains(".env")), "{err}");
    }

    #[test]
    fn missing_config_file_names_path() {
        let err = Config::from_file(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.yaml"));
    }
}
