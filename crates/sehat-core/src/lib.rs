//! Core types and configuration for SehatBot.
//!
//! Everything the other crates share lives here: the query/reply domain
//! types, the language tag, the confidence policy, and the typed config
//! with its file/env loader.

pub mod config;
pub mod types;

pub use config::{
    load_config, Config, DatabaseConfig, GatewayConfig, HealthApiConfig, ProviderConfig,
    ProvidersConfig,
};
pub use types::{
    apology, BotReply, ChatQuery, Language, ReplySource, Screening, FALLBACK_CONFIDENCE,
    PROVIDER_CONFIDENCE,
};
