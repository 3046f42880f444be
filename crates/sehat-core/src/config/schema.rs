//! Configuration schema.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! `#[serde(rename_all = "camelCase")]` handles the conversion.
//!
//! Credentials shipped in sample configs use documented placeholder values
//! ("your_..._here"); a credential equal to its placeholder counts as
//! absent, same as an empty string.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.sehatbot/config.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub providers: ProvidersConfig,
    pub database: DatabaseConfig,
    pub gateway: GatewayConfig,
    pub health_api: HealthApiConfig,
}

// ─────────────────────────────────────────────
// Providers
// ─────────────────────────────────────────────

/// Credential and endpoint override for a single remote provider.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    /// API key / bearer token for authentication.
    #[serde(default)]
    pub api_key: String,
    /// Custom endpoint URL (overrides the registry default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
}

impl ProviderConfig {
    /// Whether this provider has a usable credential.
    ///
    /// `placeholder` is the documented sample value for this credential;
    /// a key equal to it is treated the same as no key at all.
    pub fn is_configured(&self, placeholder: &str) -> bool {
        let key = self.api_key.trim();
        !key.is_empty() && key != placeholder
    }
}

/// One `ProviderConfig` per remote provider, in no particular order
/// (priority lives in the provider registry, not here).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub gemini: ProviderConfig,
    #[serde(default)]
    pub huggingface: ProviderConfig,
    #[serde(default)]
    pub groq: ProviderConfig,
}

impl ProvidersConfig {
    /// Get a provider config by registry name.
    pub fn get_by_name(&self, name: &str) -> Option<&ProviderConfig> {
        match name {
            "gemini" => Some(&self.gemini),
            "huggingface" => Some(&self.huggingface),
            "groq" => Some(&self.groq),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────
// Database
// ─────────────────────────────────────────────

/// Chat-history database connection settings.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatabaseConfig {
    /// Connection URL. Empty or placeholder → log to memory only.
    #[serde(default)]
    pub url: String,
}

/// Documented sample value for the database URL.
pub(crate) const DATABASE_URL_PLACEHOLDER: &str = "your_database_url_here";

impl DatabaseConfig {
    /// Whether a real database URL is present.
    pub fn is_configured(&self) -> bool {
        let url = self.url.trim();
        !url.is_empty() && url != DATABASE_URL_PLACEHOLDER
    }
}

// ─────────────────────────────────────────────
// Health-topic API
// ─────────────────────────────────────────────

/// External medical-reference API used to enrich provider prompts.
/// No credential; only the base URL is configurable.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HealthApiConfig {
    /// Custom base URL (overrides the built-in MedlinePlus default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
}

// ─────────────────────────────────────────────
// Gateway
// ─────────────────────────────────────────────

/// HTTP gateway listen settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GatewayConfig {
    /// Listen address.
    pub host: String,
    /// Listen port.
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8787,
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
