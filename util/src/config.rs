//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables. It provides
//! thread-safe access and mutation for testing or overrides in runtime environments.

use std::env;
use std::sync::{OnceLock, RwLock};

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
    /// Secret every encrypted ticket field was sealed with.
    pub encryption_key: String,
    /// Directory holding `{transcript_template}.hbs`.
    pub templates_dir: String,
    /// Template identifier, e.g. `transcript.md`. Its last dot-segment is the
    /// extension of generated transcript files.
    pub transcript_template: String,
    /// Public base URL transcript links are built from.
    pub tickets_url: String,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// This method is used internally to populate the singleton. It panics
    /// if required variables are missing or improperly formatted.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
            project_name: env::var("PROJECT_NAME")
                .unwrap_or_else(|_| "ticket-transcripts".into()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "api=info,services=info".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "api.log".into()),
            log_to_stdout: env::var("LOG_TO_STDOUT").unwrap_or_else(|_| "false".into()) == "true",
            database_path: env::var("DATABASE_PATH").expect("DATABASE_PATH is required"),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".into())
                .parse()
                .expect("PORT must be a valid port number"),
            encryption_key: env::var("ENCRYPTION_KEY").expect("ENCRYPTION_KEY is required"),
            templates_dir: env::var("TEMPLATES_DIR").unwrap_or_else(|_| "templates".into()),
            transcript_template: env::var("TRANSCRIPT_TEMPLATE")
                .unwrap_or_else(|_| "transcript.md".into()),
            tickets_url: env::var("TICKETS_URL").unwrap_or_default(),
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
            let mut guard = lock.write().expect("Failed to acquire AppConfig write lock");
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

    pub fn set_encryption_key(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.encryption_key = value.into());
    }

    pub fn set_templates_dir(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.templates_dir = value.into());
    }

    pub fn set_transcript_template(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.transcript_template = value.into());
    }

    pub fn set_tickets_url(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.tickets_url = value.into());
    }
}

// --- Free accessors, so callers don't have to hold the read guard ---

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

pub fn encryption_key() -> String {
    AppConfig::global().encryption_key.clone()
}

pub fn templates_dir() -> String {
    AppConfig::global().templates_dir.clone()
}

pub fn transcript_template() -> String {
    AppConfig::global().transcript_template.clone()
}

pub fn tickets_url() -> String {
    AppConfig::global().tickets_url.clone()
}
