use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use car_rental_db::StoreConfig;

/// Environment variables that override the `[database]` section.
pub const ENV_DB_URL: &str = "CAR_RENTAL_DB_URL";
pub const ENV_DB_USER: &str = "CAR_RENTAL_DB_USER";
pub const ENV_DB_PASSWORD: &str = "CAR_RENTAL_DB_PASSWORD";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppSettings {
    #[serde(default)]
    pub database: DatabaseSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            user: None,
            password: None,
        }
    }
}

impl DatabaseSettings {
    /// Replace fields with values from `lookup`, where present.
    ///
    /// `lookup` is `std::env::var` in the application; tests pass a map.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_DB_URL) {
            self.url = url;
        }
        if let Some(user) = lookup(ENV_DB_USER) {
            self.user = Some(user);
        }
        if let Some(password) = lookup(ENV_DB_PASSWORD) {
            self.password = Some(password);
        }
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            url: self.url.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
        }
    }
}

/// Returns `sqlite://<data dir>/car-rental/cars.db`.
pub fn default_database_url() -> String {
    let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    format!(
        "sqlite://{}",
        data.join("car-rental").join("cars.db").display()
    )
}

/// Returns `~/.config/car-rental/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("car-rental").join("settings.toml")
}

/// Load settings from disk and apply environment overrides.
///
/// A missing file is seeded with the defaults so there is something to
/// edit; a corrupt one falls back to defaults without being overwritten.
pub fn load_settings() -> AppSettings {
    let path = settings_path();
    let mut settings = match std::fs::read_to_string(&path) {
        Ok(contents) => parse_settings(&contents, &path),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            let defaults = AppSettings::default();
            match save_settings(&defaults) {
                Ok(()) => log::info!("Wrote default settings to {}", path.display()),
                Err(e) => log::warn!("Failed to write settings to {}: {}", path.display(), e),
            }
            defaults
        }
        Err(e) => {
            log::warn!("Failed to read settings at {}: {}", path.display(), e);
            AppSettings::default()
        }
    };
    settings
        .database
        .apply_overrides(|name| std::env::var(name).ok());
    settings
}

fn parse_settings(contents: &str, path: &Path) -> AppSettings {
    toml::from_str(contents).unwrap_or_else(|e| {
        log::warn!("Failed to parse settings at {}: {}", path.display(), e);
        AppSettings::default()
    })
}

/// Save settings to disk atomically (write to temp, then rename).
pub fn save_settings(settings: &AppSettings) -> std::io::Result<()> {
    write_settings(&settings_path(), settings)
}

fn write_settings(path: &Path, settings: &AppSettings) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = toml::to_string_pretty(settings).map_err(std::io::Error::other)?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, contents)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn parses_database_section() {
        let settings = parse_settings(
            r#"
[database]
url = "sqlite:///srv/rental/cars.db"
user = "dbms"
password = "root"
"#,
            Path::new("settings.toml"),
        );
        assert_eq!(settings.database.url, "sqlite:///srv/rental/cars.db");
        assert_eq!(settings.database.user.as_deref(), Some("dbms"));
        assert_eq!(settings.database.password.as_deref(), Some("root"));
    }

    #[test]
    fn missing_fields_use_defaults() {
        let settings = parse_settings("[database]\n", Path::new("settings.toml"));
        assert_eq!(settings.database, DatabaseSettings::default());

        let settings = parse_settings("", Path::new("settings.toml"));
        assert_eq!(settings.database, DatabaseSettings::default());
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let settings = parse_settings("[database\nurl = ", Path::new("settings.toml"));
        assert_eq!(settings.database, DatabaseSettings::default());
    }

    #[test]
    fn default_url_points_at_cars_db() {
        let url = default_database_url();
        assert!(url.starts_with("sqlite://"));
        assert!(url.ends_with("cars.db"));
    }

    #[test]
    fn overrides_replace_only_present_values() {
        let env: HashMap<&str, &str> = [(ENV_DB_URL, "sqlite:/tmp/other.db")].into();
        let mut db = DatabaseSettings {
            url: "sqlite:cars.db".to_string(),
            user: Some("dbms".to_string()),
            password: None,
        };
        db.apply_overrides(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(db.url, "sqlite:/tmp/other.db");
        assert_eq!(db.user.as_deref(), Some("dbms"));
        assert_eq!(db.password, None);
    }

    #[test]
    fn store_config_carries_all_options() {
        let db = DatabaseSettings {
            url: "sqlite:cars.db".to_string(),
            user: Some("dbms".to_string()),
            password: Some("root".to_string()),
        };
        let config = db.store_config();
        assert_eq!(config.url, "sqlite:cars.db");
        assert_eq!(config.user.as_deref(), Some("dbms"));
        assert_eq!(config.password.as_deref(), Some("root"));
    }

    #[test]
    fn written_settings_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("car-rental").join("settings.toml");
        let mut settings = AppSettings::default();
        settings.database.url = "sqlite:fleet.db".to_string();

        write_settings(&path, &settings).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let loaded = parse_settings(&contents, &path);
        assert_eq!(loaded.database, settings.database);
        assert!(!path.with_extension("toml.tmp").exists());
    }
}
