//! Typed configuration: schema + loader.

mod loader;
mod schema;

pub use loader::{get_config_path, load_config};
pub use schema::{
    Config, DatabaseConfig, GatewayConfig, HealthApiConfig, ProviderConfig, ProvidersConfig,
};
