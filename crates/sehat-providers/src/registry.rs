//! Provider registry — static specs for the three supported remote
//! providers, in fallback priority order.
//!
//! Each `ProviderSpec` describes everything the client needs to call one
//! provider: endpoint, auth scheme, wire format, model. Adding a provider
//! (or reordering the fallback chain) is a data change here, not new
//! control flow in the router.

use sehat_core::ReplySource;

// ─────────────────────────────────────────────
// ProviderSpec
// ─────────────────────────────────────────────

/// How a provider expects its API key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthScheme {
    /// Key appended as a URL query parameter (Gemini style).
    KeyQueryParam(&'static str),
    /// `Authorization: Bearer <key>` header.
    Bearer,
}

/// Request/response shape a provider speaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WireFormat {
    /// Gemini `generateContent`: `contents[].parts[].text`.
    GeminiGenerateContent,
    /// Hugging Face Inference text generation: `{inputs, parameters}`.
    TextGeneration,
    /// OpenAI-compatible `/chat/completions` (Groq).
    ChatCompletions,
}

/// Static specification describing one remote provider.
#[derive(Clone, Debug)]
pub struct ProviderSpec {
    /// Internal name; matches the config key (e.g. `"gemini"`).
    pub name: &'static str,
    /// Human-readable name for logs.
    pub display_name: &'static str,
    /// Environment variable for the API key.
    pub env_key: &'static str,
    /// Documented sample credential; a key equal to it counts as absent.
    pub key_placeholder: &'static str,
    /// Full endpoint URL (config `apiBase` overrides it wholesale).
    pub default_endpoint: &'static str,
    /// How the API key is sent.
    pub auth: AuthScheme,
    /// Request/response shape.
    pub wire: WireFormat,
    /// Model identifier, for formats that carry it in the body.
    pub model: Option<&'static str>,
    /// Tag recorded on replies this provider produces.
    pub source: ReplySource,
}

// ─────────────────────────────────────────────
// The three providers, in fallback priority order
// ─────────────────────────────────────────────

/// All remote providers. The router tries them top to bottom.
pub static PROVIDERS: &[ProviderSpec] = &[
    ProviderSpec {
        name: "gemini",
        display_name: "Gemini",
        env_key: "GEMINI_API_KEY",
        key_placeholder: "your_gemini_api_key_here",
        default_endpoint:
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent",
        auth: AuthScheme::KeyQueryParam("key"),
        wire: WireFormat::GeminiGenerateContent,
        model: None,
        source: ReplySource::Gemini,
    },
    ProviderSpec {
        name: "huggingface",
        display_name: "Hugging Face",
        env_key: "HUGGINGFACE_API_KEY",
        key_placeholder: "your_huggingface_api_key_here",
        default_endpoint:
            "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-Instruct-v0.2",
        auth: AuthScheme::Bearer,
        wire: WireFormat::TextGeneration,
        model: None,
        source: ReplySource::HuggingFace,
    },
    ProviderSpec {
        name: "groq",
        display_name: "Groq",
        env_key: "GROQ_API_KEY",
        key_placeholder: "your_groq_api_key_here",
        default_endpoint: "https://api.groq.com/openai/v1/chat/completions",
        auth: AuthScheme::Bearer,
        wire: WireFormat::ChatCompletions,
        model: Some("llama-3.1-8b-instant"),
        source: ReplySource::Groq,
    },
];

/// Find a provider spec by exact name.
pub fn find_by_name(name: &str) -> Option<&'static ProviderSpec> {
    PROVIDERS.iter().find(|spec| spec.name == name)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
