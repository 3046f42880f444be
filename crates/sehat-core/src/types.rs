//! Domain types for SehatBot — queries, replies, and the confidence policy.
//!
//! A reply's `confidence` is a static label for its source tier (remote
//! provider vs local canned answer), not a measured probability. The
//! constants below are the only two values that ever appear on the wire.

use serde::{Deserialize, Serialize};

/// Confidence attached to replies produced by a remote provider.
pub const PROVIDER_CONFIDENCE: f32 = 0.80;

/// Confidence attached to replies produced by the local fallback tables.
pub const FALLBACK_CONFIDENCE: f32 = 0.65;

// ─────────────────────────────────────────────
// Language
// ─────────────────────────────────────────────

/// The language a reply should be written in.
///
/// Parsed leniently from the client's `detectedLanguage` tag: an absent tag
/// means Hindi (the product default), an unrecognized tag collapses to
/// Hinglish so the reply is at least partially readable either way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Hindi,
    English,
    Hinglish,
}

impl Language {
    /// Parse a client-supplied language tag.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            None => Language::Hindi,
            Some(t) => match t.trim().to_lowercase().as_str() {
                "hindi" => Language::Hindi,
                "english" => Language::English,
                _ => Language::Hinglish,
            },
        }
    }

    /// The wire form of the tag.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Language::Hindi => "hindi",
            Language::English => "english",
            Language::Hinglish => "hinglish",
        }
    }
}

// ─────────────────────────────────────────────
// Reply source
// ─────────────────────────────────────────────

/// Which stage of the router produced a reply.
///
/// Recorded for observability and logged with the bot turn; nothing
/// downstream branches on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplySource {
    Gemini,
    #[serde(rename = "huggingface")]
    HuggingFace,
    Groq,
    Fallback,
}

impl ReplySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplySource::Gemini => "gemini",
            ReplySource::HuggingFace => "huggingface",
            ReplySource::Groq => "groq",
            ReplySource::Fallback => "fallback",
        }
    }
}

// ─────────────────────────────────────────────
// Query & reply
// ─────────────────────────────────────────────

/// One user query as received by the gateway. Immutable once built.
#[derive(Clone, Debug)]
pub struct ChatQuery {
    pub text: String,
    pub language: Language,
    pub is_voice_input: bool,
    pub user_id: Option<String>,
    pub session_id: String,
}

/// The answer produced for one query.
#[derive(Clone, Debug, Serialize)]
pub struct BotReply {
    pub message: String,
    pub confidence: f32,
    pub language: Language,
    pub source: ReplySource,
}

impl BotReply {
    /// A reply sourced from a remote provider.
    pub fn from_provider(message: impl Into<String>, source: ReplySource, language: Language) -> Self {
        BotReply {
            message: message.into(),
            confidence: PROVIDER_CONFIDENCE,
            language,
            source,
        }
    }

    /// A reply sourced from the local fallback tables.
    pub fn from_fallback(message: impl Into<String>, language: Language) -> Self {
        BotReply {
            message: message.into(),
            confidence: FALLBACK_CONFIDENCE,
            language,
            source: ReplySource::Fallback,
        }
    }
}

// ─────────────────────────────────────────────
// Screening
// ─────────────────────────────────────────────

/// Outcome of the topic screen: either the query may proceed to the router,
/// or it is answered directly with a canned redirect message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screening {
    Accepted,
    Redirect(String),
}

impl Screening {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Screening::Accepted)
    }
}

// ─────────────────────────────────────────────
// Apologies (500 responses)
// ─────────────────────────────────────────────

/// Generic apology for unexpected server errors, per language.
pub fn apology(language: Language) -> &'static str {
    match language {
        Language::Hindi => "क्षमा करें, कुछ गलत हो गया। कृपया थोड़ी देर बाद फिर से प्रयास करें।",
        Language::English => "Sorry, something went wrong. Please try again in a moment.",
        Language::Hinglish => "Sorry, kuch galat ho gaya. Thodi der baad phir se try karein.",
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_tag() {
        assert_eq!(Language::from_tag(Some("hindi")), Language::Hindi);
        assert_eq!(Language::from_tag(Some("English")), Language::English);
        assert_eq!(Language::from_tag(Some("hinglish")), Language::Hinglish);
    }

    #[test]
    fn test_language_absent_defaults_to_hindi() {
        assert_eq!(Language::from_tag(None), Language::Hindi);
    }

    #[test]
    fn test_language_unrecognized_collapses_to_hinglish() {
        assert_eq!(Language::from_tag(Some("bhojpuri")), Language::Hinglish);
        assert_eq!(Language::from_tag(Some("")), Language::Hinglish);
    }

    #[test]
    fn test_language_serializes_lowercase() {
        let json = serde_json::to_value(Language::Hindi).unwrap();
        assert_eq!(json, "hindi");
    }

    #[test]
    fn test_reply_source_wire_names() {
        assert_eq!(ReplySource::HuggingFace.as_str(), "huggingface");
        let json = serde_json::to_value(ReplySource::HuggingFace).unwrap();
        assert_eq!(json, "huggingface");
        let json = serde_json::to_value(ReplySource::Fallback).unwrap();
        assert_eq!(json, "fallback");
    }

    #[test]
    fn test_reply_constructors_set_confidence_tier() {
        let provider = BotReply::from_provider("ok", ReplySource::Gemini, Language::Hindi);
        assert_eq!(provider.confidence, PROVIDER_CONFIDENCE);
        assert_eq!(provider.source, ReplySource::Gemini);

        let fallback = BotReply::from_fallback("ok", Language::English);
        assert_eq!(fallback.confidence, FALLBACK_CONFIDENCE);
        assert_eq!(fallback.source, ReplySource::Fallback);
    }

    #[test]
    fn test_confidence_tiers_are_ordered() {
        assert!(PROVIDER_CONFIDENCE > FALLBACK_CONFIDENCE);
        assert!((0.60..=0.70).contains(&FALLBACK_CONFIDENCE));
        assert!((0.75..=0.85).contains(&PROVIDER_CONFIDENCE));
    }

    #[test]
    fn test_screening_accept() {
        assert!(Screening::Accepted.is_accepted());
        assert!(!Screening::Redirect("go elsewhere".into()).is_accepted());
    }
}
