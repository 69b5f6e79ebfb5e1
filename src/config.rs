//! Configuration loading for the catalog platform.
//!
//! Exposes [`DatabaseConfig`] so applications can load settings from
//! `config/config.toml` or environment variables using
//! `DatabaseConfig::load()`.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string for the document store. Empty means unset; the
    /// caller decides whether to fall back to `MONGODB_URI`/`DATABASE_URL`.
    #[serde(default)]
    pub uri: String,
    #[serde(default = "default_database")]
    pub database: String,
}

fn default_database() -> String {
    "corredora".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: String::new(),
            database: default_database(),
        }
    }
}

impl DatabaseConfig {
    /// Load the database configuration from `config/config.toml`, falling back to env vars.
    pub fn load() -> Result<Self, ConfigError> {
        // Build configuration by reading the TOML file (optional) and environment variables
        let builder = Config::builder()
            .add_source(File::with_name("config/config.toml").required(false))
            .add_source(Environment::with_prefix("CORREDORA").separator("__"));

        // Try to build the configuration, handling missing or unreadable file
        let settings = match builder.build() {
            Ok(cfg) => cfg,
            Err(err) => {
                // If the file existed but was unreadable (parse error, permission issue, etc.), log a warning and retry with env only
                if std::path::Path::new("config/config.toml").exists() {
                    log::warn!("failed to load config file, falling back to env: {err}");
                }
                // Retry using only environment variables as source
                Config::builder()
                    .add_source(Environment::with_prefix("CORREDORA").separator("__"))
                    .build()
                    .map_err(|env_err| {
                        ConfigError::Message(format!(
                            "Failed to load configuration from file and env: {}, then env-only error: {}",
                            err, env_err
                        ))
                    })?
            }
        };

        // An absent `database` section is not an error: defaults apply and the
        // CLI still resolves the connection string from its own env chain.
        match settings.get::<DatabaseConfig>("database") {
            Ok(db_config) => Ok(db_config),
            Err(ConfigError::NotFound(_)) => Ok(DatabaseConfig::default()),
            Err(e) => Err(ConfigError::Message(format!(
                "Database configuration could not be loaded from file or environment: {}",
                e
            ))),
        }
    }

    /// Connection string, if one was configured.
    #[must_use]
    pub fn uri(&self) -> Option<&str> {
        if self.uri.is_empty() {
            None
        } else {
            Some(&self.uri)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_database_name() {
        let config = DatabaseConfig::default();
        assert_eq!(config.database, "corredora");
        assert!(config.uri().is_none());
    }

    #[test]
    fn test_uri_accessor() {
        let config = DatabaseConfig {
            uri: "mongodb://localhost:27017/corredora".to_string(),
            database: default_database(),
        };
        assert_eq!(config.uri(), Some("mongodb://localhost:27017/corredora"));
        assert_eq!(config.database, "corredora");
    }
}
