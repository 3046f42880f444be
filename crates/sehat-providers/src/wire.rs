//! Request/response shapes for the three provider wire formats.
//!
//! Serde structs only; no I/O here. Response extraction returns `None` for
//! structurally valid but unusable payloads (no candidates, empty text) so
//! the client can treat them uniformly as a failed attempt.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::prompt::Prompt;
use crate::registry::WireFormat;

/// Build the JSON request body for `format`.
pub fn request_body(format: WireFormat, prompt: &Prompt, model: Option<&str>) -> Value {
    match format {
        WireFormat::GeminiGenerateContent => {
            let request = GeminiRequest {
                contents: vec![GeminiContent {
                    parts: vec![GeminiPart {
                        text: prompt.combined(),
                    }],
                }],
                generation_config: GeminiGenerationConfig {
                    temperature: 0.7,
                    max_output_tokens: 500,
                },
            };
            serde_json::to_value(request).unwrap_or(Value::Null)
        }
        WireFormat::TextGeneration => {
            let request = TextGenerationRequest {
                inputs: prompt.combined(),
                parameters: TextGenerationParameters {
                    max_new_tokens: 250,
                    temperature: 0.7,
                    return_full_text: false,
                },
            };
            serde_json::to_value(request).unwrap_or(Value::Null)
        }
        WireFormat::ChatCompletions => {
            let request = ChatCompletionsRequest {
                model: model.unwrap_or_default().to_string(),
                messages: vec![
                    ChatMessage {
                        role: "system".to_string(),
                        content: prompt.system.clone(),
                    },
                    ChatMessage {
                        role: "user".to_string(),
                        content: prompt.user.clone(),
                    },
                ],
                temperature: 0.7,
                max_tokens: 500,
            };
            serde_json::to_value(request).unwrap_or(Value::Null)
        }
    }
}

/// Pull the generated text out of a response body.
///
/// Returns `None` when the payload parses but carries no non-empty text.
pub fn extract_text(format: WireFormat, body: &Value) -> Option<String> {
    let text = match format {
        WireFormat::GeminiGenerateContent => {
            let response: GeminiResponse = serde_json::from_value(body.clone()).ok()?;
            response
                .candidates
                .into_iter()
                .next()?
                .content
                .parts
                .into_iter()
                .next()?
                .text
        }
        WireFormat::TextGeneration => {
            let response: Vec<TextGenerationResponse> = serde_json::from_value(body.clone()).ok()?;
            response.into_iter().next()?.generated_text
        }
        WireFormat::ChatCompletions => {
            let response: ChatCompletionsResponse = serde_json::from_value(body.clone()).ok()?;
            response.choices.into_iter().next()?.message.content
        }
    };

    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ─────────────────────────────────────────────
// Gemini generateContent
// ─────────────────────────────────────────────

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Serialize, Deserialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

// ─────────────────────────────────────────────
// Hugging Face text generation
// ─────────────────────────────────────────────

#[derive(Serialize)]
struct TextGenerationRequest {
    inputs: String,
    parameters: TextGenerationParameters,
}

#[derive(Serialize)]
struct TextGenerationParameters {
    max_new_tokens: u32,
    temperature: f32,
    return_full_text: bool,
}

#[derive(Deserialize)]
struct TextGenerationResponse {
    generated_text: String,
}

// ─────────────────────────────────────────────
// OpenAI-compatible chat completions (Groq)
// ─────────────────────────────────────────────

#[derive(Serialize)]
struct ChatCompletionsRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionsResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
