//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables. It provides
//! thread-safe access and mutation for testing or overrides in runtime environments.

use std::env;
use std::str::FromStr;
use std::sync::{OnceLock, RwLock};

/// Where backup copies of recordings are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupStorageMode {
    /// Files on local disk, served back through `/api/media`.
    Local,
    /// A remote object store reachable over HTTP.
    Remote,
}

impl FromStr for BackupStorageMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "remote" => Ok(Self::Remote),
            other => Err(format!("unknown backup storage mode '{other}'")),
        }
    }
}

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub host: String,
    pub port: u16,
    pub analysis_webhook_url: String,
    pub backup_storage_mode: BackupStorageMode,
    pub media_storage_root: String,
    pub media_public_base_url: String,
    pub storage_url: String,
    pub storage_bucket: String,
    pub storage_service_key: String,
    pub max_upload_bytes: usize,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

/// Parses `key`, falling back to `default` (with a warning) when the value is malformed.
fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Invalid configuration value, using default");
            default
        }),
        Err(_) => default,
    }
}

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Every key has a default so the server can boot with an empty environment;
    /// recording is disabled until `ANALYSIS_WEBHOOK_URL` is set.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into());
        let port: u16 = parse_or("PORT", 3001);
        let media_public_base_url = env::var("MEDIA_PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://{host}:{port}/api/media"));

        Self {
            env: env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
            project_name: env::var("PROJECT_NAME").unwrap_or_else(|_| "speakeasy".into()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "api=info,services=info,db=info".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "api.log".into()),
            log_to_stdout: env::var("LOG_TO_STDOUT").unwrap_or_else(|_| "false".into()) == "true",
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/speakeasy.db".into()),
            host,
            port,
            analysis_webhook_url: env::var("ANALYSIS_WEBHOOK_URL").unwrap_or_default(),
            backup_storage_mode: parse_or("BACKUP_STORAGE_MODE", BackupStorageMode::Local),
            media_storage_root: env::var("MEDIA_STORAGE_ROOT")
                .unwrap_or_else(|_| "data/media".into()),
            media_public_base_url,
            storage_url: env::var("STORAGE_URL").unwrap_or_default(),
            storage_bucket: env::var("STORAGE_BUCKET").unwrap_or_else(|_| "videos".into()),
            storage_service_key: env::var("STORAGE_SERVICE_KEY").unwrap_or_default(),
            max_upload_bytes: parse_or("MAX_UPLOAD_BYTES", 100 * 1024 * 1024),
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock cannot be acquired.
    pub fn global() -> std::sync::RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock
                .write()
                .expect("Failed to acquire AppConfig write lock");
            *guard = AppConfig::from_env();
        }
    }

    /// Generic internal setter for any field in the config.
    ///
    /// Used by public per-field setter methods.
    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock
            .write()
            .expect("Failed to acquire AppConfig write lock");
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    /// Override `env` value.
    pub fn set_env(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.env = value.into());
    }

    pub fn set_database_path(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.database_path = value.into());
    }

    pub fn set_analysis_webhook_url(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.analysis_webhook_url = value.into());
    }

    pub fn set_backup_storage_mode(value: BackupStorageMode) {
        AppConfig::set_field(|cfg| cfg.backup_storage_mode = value);
    }

    pub fn set_media_storage_root(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.media_storage_root = value.into());
    }

    pub fn set_media_public_base_url(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.media_public_base_url = value.into());
    }

    pub fn set_max_upload_bytes(value: usize) {
        AppConfig::set_field(|cfg| cfg.max_upload_bytes = value);
    }
}

// --- Free getters, mirroring the fields above ---

pub fn env() -> String {
    AppConfig::global().env.clone()
}

pub fn project_name() -> String {
    AppConfig::global().project_name.clone()
}

pub fn log_level() -> String {
    AppConfig::global().log_level.clone()
}

pub fn log_file() -> String {
    AppConfig::global().log_file.clone()
}

pub fn log_to_stdout() -> bool {
    AppConfig::global().log_to_stdout
}

pub fn database_path() -> String {
    AppConfig::global().database_path.clone()
}

pub fn host() -> String {
    AppConfig::global().host.clone()
}

pub fn port() -> u16 {
    AppConfig::global().port
}

pub fn analysis_webhook_url() -> String {
    AppConfig::global().analysis_webhook_url.clone()
}

pub fn backup_storage_mode() -> BackupStorageMode {
    AppConfig::global().backup_storage_mode
}

pub fn media_storage_root() -> String {
    AppConfig::global().media_storage_root.clone()
}

pub fn media_public_base_url() -> String {
    AppConfig::global().media_public_base_url.clone()
}

pub fn storage_url() -> String {
    AppConfig::global().storage_url.clone()
}

pub fn storage_bucket() -> String {
    AppConfig::global().storage_bucket.clone()
}

pub fn storage_service_key() -> String {
    AppConfig::global().storage_service_key.clone()
}

pub fn max_upload_bytes() -> usize {
    AppConfig::global().max_upload_bytes
}
