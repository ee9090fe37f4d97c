//! Shared configuration for the E-Collect console.
//!
//! TOML file + `ECOLLECT_`-prefixed environment loading, platform
//! config/data paths, and the on-disk session token store (the
//! browser-localStorage analog -- the session survives process restarts
//! until logout or forced logout clears it).

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ecollect_api::TokenStore;
use ecollect_core::ConsoleConfig;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Backend base URL.
    #[serde(default = "default_server")]
    pub server: String,

    #[serde(default)]
    pub defaults: Defaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: default_server(),
            defaults: Defaults::default(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    /// Output format for list commands ("table", "json", ...).
    #[serde(default = "default_output")]
    pub output: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Dashboard poll cadence in seconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,

    /// Page size for list views.
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: default_timeout(),
            poll_interval: default_poll_interval(),
            page_limit: default_page_limit(),
        }
    }
}

fn default_server() -> String {
    "http://localhost:5080".into()
}
fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    10
}
fn default_poll_interval() -> u64 {
    10
}
fn default_page_limit() -> u32 {
    10
}

impl Config {
    /// Translate into the core runtime config.
    pub fn to_console_config(&self) -> ConsoleConfig {
        ConsoleConfig {
            server: self.server.clone(),
            timeout: Duration::from_secs(self.defaults.timeout),
            poll_interval: Duration::from_secs(self.defaults.poll_interval),
            page_limit: self.defaults.page_limit,
        }
    }
}

// ── Paths ───────────────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "ecollect", "ecollect").map_or_else(
        || dirs_fallback().join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Resolve the data dir (token file lives here).
pub fn data_dir() -> PathBuf {
    ProjectDirs::from("com", "ecollect", "ecollect").map_or_else(
        dirs_fallback,
        |dirs| dirs.data_dir().to_path_buf(),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("ecollect");
    p
}

// ── Config loading / saving ─────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("ECOLLECT_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning the defaults if no file exists.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Serialize config to TOML and write it to the canonical path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    fs::write(&path, toml_str)?;
    Ok(())
}

// ── Session token store ─────────────────────────────────────────────

/// Persists the session token in a mode-0600 file under the data dir.
///
/// The token is opaque short-lived credential material, not a long-term
/// secret; a restrictive plain file matches how the browser console kept
/// it in localStorage while staying usable on headless machines.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store at an explicit path (tests, unusual layouts).
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the platform-default location.
    pub fn at_default_path() -> Self {
        Self::new(data_dir().join("session-token"))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<SecretString> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let token = raw.trim();
        if token.is_empty() {
            return None;
        }
        Some(SecretString::from(token.to_owned()))
    }

    fn save(&self, token: &SecretString) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token.expose_secret())?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            // Already gone is fine -- clear must be idempotent.
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_store_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileTokenStore::new(dir.path().join("session-token"));

        assert!(store.load().is_none());

        store
            .save(&SecretString::from("tok-123"))
            .expect("save token");
        let loaded = store.load().expect("token persisted");
        assert_eq!(loaded.expose_secret(), "tok-123");

        store.clear().expect("clear token");
        assert!(store.load().is_none());
        // Clearing twice is a no-op, not an error.
        store.clear().expect("clear is idempotent");
    }

    #[cfg(unix)]
    #[test]
    fn token_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileTokenStore::new(dir.path().join("session-token"));
        store.save(&SecretString::from("tok")).expect("save");

        let mode = fs::metadata(store.path())
            .expect("metadata")
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn defaults_translate_to_console_config() {
        let config = Config::default();
        let console = config.to_console_config();
        assert_eq!(console.server, "http://localhost:5080");
        assert_eq!(console.timeout, Duration::from_secs(10));
        assert_eq!(console.poll_interval, Duration::from_secs(10));
        assert_eq!(console.page_limit, 10);
    }
}
