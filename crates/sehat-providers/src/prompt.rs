//! Prompt construction for remote providers.
//!
//! All three providers receive the same instructions; only the packaging
//! differs (chat-style system+user messages vs one concatenated string).

use sehat_core::Language;

/// System instructions plus the user's question, ready for any wire format.
#[derive(Clone, Debug)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

impl Prompt {
    /// Build the prompt for one query.
    pub fn build(query: &str, language: Language) -> Self {
        Prompt {
            system: system_instructions(language),
            user: query.to_string(),
        }
    }

    /// Single-string form, for providers without a system/user split.
    pub fn combined(&self) -> String {
        format!("{}\n\nUser question: {}", self.system, self.user)
    }

    /// Attach medical-reference context to the user message. `None` leaves
    /// the prompt unchanged.
    pub fn with_context(mut self, context: Option<&serde_json::Value>) -> Self {
        if let Some(ctx) = context {
            self.user = format!("{}\n\nसंदर्भ जानकारी: {}", self.user, ctx);
        }
        self
    }
}

fn system_instructions(language: Language) -> String {
    let language_rule = match language {
        Language::Hindi => "Reply in simple Hindi (Devanagari script).",
        Language::English => "Reply in simple English.",
        Language::Hinglish => "Reply in Hinglish (Hindi written in Latin script).",
    };

    format!(
        "You are a health assistant for rural Indian communities. \
         Answer questions about health, hygiene, nutrition, common illnesses, \
         medicines, vaccination, and maternal and child care. \
         {language_rule} \
         Keep answers short (3-4 sentences), practical, and easy to follow \
         for people with limited medical access. \
         Always advise seeing a doctor for serious or persistent problems. \
         Never prescribe specific medicine doses beyond common over-the-counter guidance."
    )
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
