use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Environment variables recognised as overrides, and the config key each one sets.
pub const ENV_KEYS: &[(&str, &str)] = &[
    ("SERVER_URL", "server.url"),
    ("SERVER_USER", "server.username"),
    ("SERVER_PASS", "server.password"),
    ("SERVER_TIMEOUT_SECS", "server.timeout_secs"),
    ("SERVER_INSECURE_TLS", "server.insecure_tls"),
    ("DOWNLOAD_DIRS", "reconcile.download_dirs"),
    ("DELETE_FILES", "reconcile.delete_files"),
    ("DRY_RUN", "reconcile.dry_run"),
];

/// Keys taken verbatim from the environment, never type-parsed.
const STRING_ENV_KEYS: &[&str] = &["SERVER_URL", "SERVER_USER", "SERVER_PASS"];

/// Typed overrides: numbers, booleans and the dir list.
fn env_provider() -> Env {
    let names: Vec<&str> = ENV_KEYS
        .iter()
        .map(|(name, _)| *name)
        .filter(|name| !STRING_ENV_KEYS.contains(name))
        .collect();

    Env::raw().only(&names).map(|key| {
        ENV_KEYS
            .iter()
            .find(|(name, _)| key.as_str().eq_ignore_ascii_case(name))
            .map(|(_, path)| path.to_string())
            .unwrap_or_else(|| key.as_str().to_string())
            .into()
    })
}

/// Merge the string-valued overrides as-is, so "007" stays "007".
fn merge_string_env(mut figment: Figment) -> Figment {
    for (name, path) in ENV_KEYS {
        if !STRING_ENV_KEYS.contains(name) {
            continue;
        }
        if let Ok(value) = std::env::var(name) {
            figment = figment.merge(Serialized::default(path, value));
        }
    }
    figment
}

/// Load configuration from an optional TOML file with environment variable overrides.
///
/// Without a file, the environment alone must supply every required key.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut figment = Figment::new();

    if let Some(path) = path {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        figment = figment.merge(Toml::file(path));
    }

    merge_string_env(figment.merge(env_provider()))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
