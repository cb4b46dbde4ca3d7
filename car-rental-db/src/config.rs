//! Connection configuration for the car store.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unsupported database URL scheme '{0}' (expected sqlite)")]
    UnsupportedScheme(String),
    #[error("Database URL does not name a file")]
    MissingPath,
    #[error("In-memory databases are not supported: every call opens its own session")]
    InMemory,
}

/// Connection parameters for a [`crate::CarStore`].
///
/// `url` is `sqlite://<path>`, `sqlite:<path>`, or a bare file path.
/// `user` and `password` are accepted for parity with server databases;
/// SQLite has no accounts and ignores them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreConfig {
    pub url: String,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl StoreConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            user: None,
            password: None,
        }
    }

    /// Build a config pointing directly at a database file.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(path.into().to_string_lossy().into_owned())
    }

    /// Resolve the URL to the database file it names.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        let url = self.url.trim();
        let path = if let Some(rest) = url.strip_prefix("sqlite://") {
            rest
        } else if let Some(rest) = url.strip_prefix("sqlite:") {
            rest
        } else if let Some((scheme, _)) = url.split_once("://") {
            return Err(ConfigError::UnsupportedScheme(scheme.to_string()));
        } else {
            url
        };

        // Drop URL query options like `?mode=rwc`; the store picks its own flags.
        let path = path.split('?').next().unwrap_or_default();

        if path.is_empty() {
            return Err(ConfigError::MissingPath);
        }
        if path == ":memory:" {
            return Err(ConfigError::InMemory);
        }
        Ok(PathBuf::from(path))
    }

    /// Returns true if credentials were supplied that SQLite will not use.
    pub fn has_credentials(&self) -> bool {
        self.user.as_deref().is_some_and(|u| !u.is_empty())
            || self.password.as_deref().is_some_and(|p| !p.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_url_with_slashes() {
        let config = StoreConfig::new("sqlite:///var/lib/cars.db");
        assert_eq!(
            config.database_path().unwrap(),
            PathBuf::from("/var/lib/cars.db")
        );
    }

    #[test]
    fn sqlite_url_relative() {
        let config = StoreConfig::new("sqlite:cars.db");
        assert_eq!(config.database_path().unwrap(), PathBuf::from("cars.db"));
    }

    #[test]
    fn bare_path() {
        let config = StoreConfig::from_path("/tmp/rental/cars.db");
        assert_eq!(
            config.database_path().unwrap(),
            PathBuf::from("/tmp/rental/cars.db")
        );
    }

    #[test]
    fn query_options_are_stripped() {
        let config = StoreConfig::new("sqlite://cars.db?mode=rwc");
        assert_eq!(config.database_path().unwrap(), PathBuf::from("cars.db"));
    }

    #[test]
    fn mysql_url_is_rejected() {
        let config = StoreConfig::new("mysql://localhost:3306/carrental");
        match config.database_path() {
            Err(ConfigError::UnsupportedScheme(scheme)) => assert_eq!(scheme, "mysql"),
            other => panic!("expected UnsupportedScheme, got {:?}", other),
        }
    }

    #[test]
    fn empty_url_is_rejected() {
        assert!(matches!(
            StoreConfig::new("sqlite://").database_path(),
            Err(ConfigError::MissingPath)
        ));
        assert!(matches!(
            StoreConfig::new("  ").database_path(),
            Err(ConfigError::MissingPath)
        ));
    }

    #[test]
    fn memory_url_is_rejected() {
        assert!(matches!(
            StoreConfig::new("sqlite::memory:").database_path(),
            Err(ConfigError::InMemory)
        ));
    }

    #[test]
    fn credentials_detection() {
        let mut config = StoreConfig::new("cars.db");
        assert!(!config.has_credentials());
        config.user = Some(String::new());
        assert!(!config.has_credentials());
        config.password = Some("root".to_string());
        assert!(config.has_credentials());
    }
}
