//! Remote LLM providers for SehatBot.
//!
//! Three remote providers (Gemini, Hugging Face Inference, Groq) are
//! described as static [`registry::ProviderSpec`] data; a single
//! [`client::ProviderClient`] speaks all three wire formats; the
//! [`router::QueryRouter`] walks the registry in priority order and falls
//! back to the local canned answers when every remote attempt fails.

pub mod client;
pub mod context;
pub mod prompt;
pub mod registry;
pub mod router;
mod wire;

pub use client::{ProviderClient, ProviderError};
pub use context::{HealthContextClient, DEFAULT_HEALTH_API_BASE};
pub use prompt::Prompt;
pub use registry::{find_by_name, ProviderSpec, PROVIDERS};
pub use router::QueryRouter;
