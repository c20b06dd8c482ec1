use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub proximity: ProximitySettings,
    #[serde(default)]
    pub notifications: NotificationSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

/// Branch storage. Without a `url` branches are kept in memory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
    #[serde(default)]
    pub seed_demo_data: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProximitySettings {
    #[serde(default = "default_threshold_km")]
    pub default_threshold_km: f64,
}

impl Default for ProximitySettings {
    fn default() -> Self {
        Self {
            default_threshold_km: default_threshold_km(),
        }
    }
}

fn default_threshold_km() -> f64 { crate::core::DEFAULT_THRESHOLD_KM }

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationSettings {
    #[serde(default = "default_true")]
    pub log_alerts: bool,
    pub webhook_url: Option<String>,
    #[serde(default = "default_webhook_timeout_secs")]
    pub webhook_timeout_secs: u64,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            log_alerts: true,
            webhook_url: None,
            webhook_timeout_secs: default_webhook_timeout_secs(),
        }
    }
}

fn default_true() -> bool { true }
fn default_webhook_timeout_secs() -> u64 { 5 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with BRANCHES_)
    /// 5. DATABASE_URL, if set
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., BRANCHES__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?;

        apply_database_url(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        apply_database_url(settings)?.try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("BRANCHES")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// The conventional `DATABASE_URL` variable wins over file and prefixed settings
fn apply_database_url(settings: Config) -> Result<Config, ConfigError> {
    match std::env::var("DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => Config::builder()
            .add_source(settings)
            .set_override("database.url", url)?
            .build(),
        _ => Ok(settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_sections_keep_field_defaults() {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(
                "[logging]\nlevel = \"debug\"\n\n[proximity]\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.logging.format, "json");
        assert_eq!(settings.proximity.default_threshold_km, crate::core::DEFAULT_THRESHOLD_KM);
        assert!(settings.notifications.log_alerts);
    }

    #[test]
    fn test_defaults_without_file() {
        let settings: Settings = Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.server.port, 8080);
        assert!(settings.database.url.is_none());
        assert!(!settings.database.seed_demo_data);
        assert_eq!(settings.proximity.default_threshold_km, 10.0);
        assert!(settings.notifications.log_alerts);
        assert!(settings.notifications.webhook_url.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("branch-locator-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[proximity]\ndefault_threshold_km = 25.5\n\n[notifications]\nwebhook_url = \"http://alerts.local/hook\"\n"
        )
        .unwrap();
        drop(file);

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.proximity.default_threshold_km, 25.5);
        assert_eq!(
            settings.notifications.webhook_url.as_deref(),
            Some("http://alerts.local/hook")
        );
        assert_eq!(settings.logging.format, "json");
    }
}
