//! Configuration loader
//!
//! Loads the client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `PLACETOPAY_CLIENT_ID`: OAuth client id
//! - `PLACETOPAY_CLIENT_SECRET`: OAuth client secret
//! - `PLACETOPAY_REDIRECT_URL`: Redirect URL registered for the client
//! - `PLACETOPAY_API_URL`: Gateway base URL
//! - `PLACETOPAY_TIMEOUT_SECONDS`: Request timeout (optional, default 30)
//! - `PLACETOPAY_REFRESH_THRESHOLD_SECONDS`: Renew tokens this long before
//!   expiry (optional, default 60)
//!
//! ## File Locations
//! The loader searches the following paths (in order):
//! 1. `./placetopay.{toml,json}` or `./config.{toml,json}` (current working
//!    directory)
//! 2. The same names in the parent and grandparent directories
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};

use placetopay_domain::constants::{DEFAULT_REFRESH_THRESHOLD_SECONDS, DEFAULT_TIMEOUT_SECONDS};
use placetopay_domain::{ClientConfig, Credentials, PlaceToPayError, Result};

const REQUIRED_ENV_VARS: [&str; 4] = [
    "PLACETOPAY_CLIENT_ID",
    "PLACETOPAY_CLIENT_SECRET",
    "PLACETOPAY_REDIRECT_URL",
    "PLACETOPAY_API_URL",
];

const CONFIG_FILE_NAMES: [&str; 4] =
    ["placetopay.toml", "placetopay.json", "config.toml", "config.json"];

/// Load configuration with automatic fallback strategy
///
/// Uses environment variables when all required ones are set. Only when
/// some are missing does it fall back to a config file; an invalid value in
/// a complete environment is reported as is.
///
/// # Errors
/// Returns `PlaceToPayError::Config` if:
/// - An environment value is invalid
/// - No config file is found while the environment is incomplete
/// - File format is invalid
/// - The loaded configuration fails validation
pub fn load() -> Result<ClientConfig> {
    let missing: Vec<&str> =
        REQUIRED_ENV_VARS.into_iter().filter(|key| env_var(key).is_err()).collect();

    if !missing.is_empty() {
        tracing::debug!(?missing, "Environment incomplete, trying file");
        return load_from_file(None);
    }

    let config = load_from_env()?;
    tracing::info!("Configuration loaded from environment variables");
    Ok(config)
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `PlaceToPayError::Config` if required variables are missing,
/// have invalid values, or the result fails validation.
pub fn load_from_env() -> Result<ClientConfig> {
    let credentials = Credentials::new(
        env_var("PLACETOPAY_CLIENT_ID")?,
        env_var("PLACETOPAY_CLIENT_SECRET")?,
        env_var("PLACETOPAY_REDIRECT_URL")?,
        env_var("PLACETOPAY_API_URL")?,
    );

    let timeout_seconds =
        env_parse("PLACETOPAY_TIMEOUT_SECONDS", DEFAULT_TIMEOUT_SECONDS, "timeout")?;
    let refresh_threshold_seconds = env_parse(
        "PLACETOPAY_REFRESH_THRESHOLD_SECONDS",
        DEFAULT_REFRESH_THRESHOLD_SECONDS,
        "refresh threshold",
    )?;

    let config = ClientConfig { credentials, timeout_seconds, refresh_threshold_seconds };
    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, searches the standard locations for a config file.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `PlaceToPayError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - The loaded configuration fails validation
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(PlaceToPayError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => find_config_file().ok_or_else(|| {
            PlaceToPayError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| PlaceToPayError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| PlaceToPayError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| PlaceToPayError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(PlaceToPayError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Search the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn find_config_file() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    candidate_paths(&dirs).into_iter().find(|path| path.exists())
}

fn candidate_paths(dirs: &[PathBuf]) -> Vec<PathBuf> {
    dirs.iter().flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name))).collect()
}

/// Get required environment variable
///
/// Empty values count as missing.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty()).ok_or_else(|| {
        PlaceToPayError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Parse an optional numeric environment variable, `default` when unset
fn env_parse<T>(key: &str, default: T, what: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| PlaceToPayError::Config(format!("Invalid {what}: {e}"))),
        Err(_) => Ok(default),
    }
}
