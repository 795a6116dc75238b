//! Configuration management module.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Configuration load result.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// Config loaded successfully.
    Loaded(AppConfig),
    /// Config file missing (first run).
    Missing,
    /// Config file exists but invalid.
    Invalid(ConfigError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// SQLite database settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database file, relative paths resolve against the data directory.
    pub path: PathBuf,
}

/// Login form persistence ("remember me" and last account).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub remember_file: PathBuf,
    pub last_account_file: PathBuf,
}

/// Log file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub directory: PathBuf,
    pub file_prefix: String,
    /// Default level when RUST_LOG is not set.
    pub level: String,
}

/// UI preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub window_width: f32,
    pub window_height: f32,
}

impl AppConfig {
    /// Directory holding config, database and credential files.
    ///
    /// Dev mode uses the current directory; otherwise the platform data directory.
    pub fn base_dir(dev: bool) -> PathBuf {
        if dev {
            return PathBuf::from(".");
        }
        ProjectDirs::from("", "", "minigame-hub")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .or_else(|| {
                std::env::current_exe()
                    .ok()
                    .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            })
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Get config file path.
    pub fn default_path(dev: bool) -> PathBuf {
        Self::base_dir(dev).join("config.toml")
    }

    /// Attempt to load config with detailed result.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => match config.validate() {
                    Ok(()) => ConfigLoadResult::Loaded(config),
                    Err(e) => ConfigLoadResult::Invalid(e),
                },
                Err(e) => ConfigLoadResult::Invalid(ConfigError::Parse(e)),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation("Database path cannot be empty".to_string()));
        }
        if self.session.remember_file.as_os_str().is_empty() {
            return Err(ConfigError::Validation("Remember file path cannot be empty".to_string()));
        }
        if self.session.last_account_file.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "Last account file path cannot be empty".to_string(),
            ));
        }
        if self.logging.file_prefix.trim().is_empty() {
            return Err(ConfigError::Validation("Log file prefix cannot be empty".to_string()));
        }
        if self.logging.level.parse::<tracing::Level>().is_err() {
            return Err(ConfigError::Validation(format!(
                "Unknown log level '{}'",
                self.logging.level
            )));
        }
        if self.ui.window_width < 400.0 || self.ui.window_height < 300.0 {
            return Err(ConfigError::Validation(
                "Window size must be at least 400x300".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Join every relative path onto `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        for path in [
            &mut self.database.path,
            &mut self.session.remember_file,
            &mut self.session.last_account_file,
            &mut self.logging.directory,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

impl DatabaseConfig {
    /// Build connection string for SeaORM.
    ///
    /// The path is percent-encoded so `?`, `#` and `%` in file names survive
    /// URL parsing. Relative paths resolve against the working directory.
    pub fn connection_string(&self) -> Result<String, ConfigError> {
        let path = if self.path.is_relative() {
            std::env::current_dir()?.join(&self.path)
        } else {
            self.path.clone()
        };

        let url = Url::from_file_path(&path)
            .map_err(|_| ConfigError::Validation(format!("Invalid database path: {}", path.display())))?;
        Ok(format!("sqlite:{}?mode=rwc", url.path()))
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("minigame_hub.db"),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            remember_file: PathBuf::from("remember.json"),
            last_account_file: PathBuf::from("last_account.json"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("logs"),
            file_prefix: "minigame-hub.log".to_string(),
            level: "info".to_string(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_width: 1000.0,
            window_height: 700.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_connection_string() {
        let db = DatabaseConfig {
            path: PathBuf::from("/tmp/hub.db"),
        };
        assert_eq!(db.connection_string().unwrap(), "sqlite:/tmp/hub.db?mode=rwc");
    }

    #[cfg(unix)]
    #[test]
    fn test_connection_string_escapes_url_characters() {
        let db = DatabaseConfig {
            path: PathBuf::from("/tmp/a?b%c#d e.db"),
        };
        assert_eq!(
            db.connection_string().unwrap(),
            "sqlite:/tmp/a%3Fb%25c%23d%20e.db?mode=rwc"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_connection_string_relative_path() {
        let db = DatabaseConfig {
            path: PathBuf::from("hub.db"),
        };
        let conn = db.connection_string().unwrap();
        assert!(conn.starts_with("sqlite:/"));
        assert!(conn.ends_with("/hub.db?mode=rwc"));
    }

    #[test]
    fn test_validation_empty_database_path() {
        let mut config = AppConfig::default();
        config.database.path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_log_level() {
        let mut config = AppConfig::default();
        config.logging.level = "chatty".to_string();
        assert!(config.validate().is_err());

        config.logging.level = "debug".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_window_size() {
        let mut config = AppConfig::default();
        config.ui.window_width = 100.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_resolve_paths_keeps_absolute() {
        let mut config = AppConfig::default();
        config.session.remember_file = PathBuf::from("/etc/remember.json");
        config.resolve_paths(Path::new("/data"));

        assert_eq!(config.database.path, PathBuf::from("/data/minigame_hub.db"));
        assert_eq!(config.session.remember_file, PathBuf::from("/etc/remember.json"));
        assert_eq!(config.logging.directory, PathBuf::from("/data/logs"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert!(matches!(AppConfig::try_load(&path), ConfigLoadResult::Missing));

        let mut config = AppConfig::default();
        config.ui.window_width = 1280.0;
        config.save(&path).unwrap();

        match AppConfig::try_load(&path) {
            ConfigLoadResult::Loaded(loaded) => assert_eq!(loaded.ui.window_width, 1280.0),
            other => panic!("unexpected load result: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "database = 3").unwrap();

        assert!(matches!(AppConfig::try_load(&path), ConfigLoadResult::Invalid(_)));
    }
}
