//! Config loader — reads `~/.sehatbot/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.sehatbot/config.json`
//! 3. Environment variables (override JSON):
//!    - `GEMINI_API_KEY` / `GEMINI_API_BASE`
//!    - `HUGGINGFACE_API_KEY` / `HUGGINGFACE_API_BASE`
//!    - `GROQ_API_KEY` / `GROQ_API_BASE`
//!    - `DATABASE_URL`
//!    - `HEALTH_API_BASE_URL`
//!    - `SEHAT_GATEWAY__HOST` / `SEHAT_GATEWAY__PORT`

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::{Config, ProviderConfig};

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    dirs_next::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".sehatbot")
        .join("config.json")
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be
/// parsed; a broken config file must never keep the service from answering.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);
    load_config_from_path(&config_path)
}

fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return apply_env_overrides(Config::default());
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return apply_env_overrides(Config::default());
        }
    };

    let config: Config = match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            return apply_env_overrides(Config::default());
        }
    };

    apply_env_overrides(config)
}

/// Apply environment variable overrides on top of a loaded config.
fn apply_env_overrides(mut config: Config) -> Config {
    apply_provider_env(&mut config.providers.gemini, "GEMINI");
    apply_provider_env(&mut config.providers.huggingface, "HUGGINGFACE");
    apply_provider_env(&mut config.providers.groq, "GROQ");

    if let Ok(val) = std::env::var("DATABASE_URL") {
        config.database.url = val;
    }

    if let Ok(val) = std::env::var("HEALTH_API_BASE_URL") {
        config.health_api.api_base = Some(val);
    }

    if let Ok(val) = std::env::var("SEHAT_GATEWAY__HOST") {
        config.gateway.host = val;
    }
    if let Ok(val) = std::env::var("SEHAT_GATEWAY__PORT") {
        if let Ok(p) = val.parse::<u16>() {
            config.gateway.port = p;
        }
    }

    config
}

/// Apply env var overrides for a single provider.
fn apply_provider_env(provider: &mut ProviderConfig, name: &str) {
    if let Ok(val) = std::env::var(format!("{name}_API_KEY")) {
        provider.api_key = val;
    }
    if let Ok(val) = std::env::var(format!("{name}_API_BASE")) {
        provider.api_base = Some(val);
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
