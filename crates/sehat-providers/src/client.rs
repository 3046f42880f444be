//! HTTP client for the remote providers.
//!
//! One `ProviderClient` speaks all three wire formats; which one to use for
//! a call comes from the [`ProviderSpec`](crate::registry::ProviderSpec).
//! Errors carry enough context for the router's warn logs but never bubble
//! past it.

use tracing::debug;

use crate::prompt::Prompt;
use crate::registry::{AuthScheme, ProviderSpec};
use crate::wire;

/// Why one provider attempt failed.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request to {provider} failed: {source}")]
    Http {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{provider} returned {status}: {body}")]
    Status {
        provider: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("{provider} response carried no usable text")]
    Malformed { provider: &'static str },
}

/// Shared HTTP client for all provider calls (connection-pooled).
#[derive(Clone, Debug, Default)]
pub struct ProviderClient {
    client: reqwest::Client,
}

impl ProviderClient {
    pub fn new() -> Self {
        ProviderClient {
            client: reqwest::Client::new(),
        }
    }

    /// Ask one provider to generate a reply for `prompt`.
    ///
    /// `base_override` replaces the spec's endpoint URL wholesale (used for
    /// proxies and tests).
    pub async fn generate(
        &self,
        spec: &'static ProviderSpec,
        api_key: &str,
        base_override: Option<&str>,
        prompt: &Prompt,
    ) -> Result<String, ProviderError> {
        let url = base_override.unwrap_or(spec.default_endpoint);
        let body = wire::request_body(spec.wire, prompt, spec.model);

        debug!(provider = spec.display_name, url, "Calling provider");

        let mut request = self.client.post(url).json(&body);
        request = match spec.auth {
            AuthScheme::KeyQueryParam(param) => request.query(&[(param, api_key)]),
            AuthScheme::Bearer => request.bearer_auth(api_key),
        };

        let response = request.send().await.map_err(|source| ProviderError::Http {
            provider: spec.name,
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(ProviderError::Status {
                provider: spec.name,
                status,
                body,
            });
        }

        let payload: serde_json::Value =
            response
                .json()
                .await
                .map_err(|source| ProviderError::Http {
                    provider: spec.name,
                    source,
                })?;

        wire::extract_text(spec.wire, &payload).ok_or(ProviderError::Malformed {
            provider: spec.name,
        })
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::find_by_name;
    use sehat_core::Language;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn prompt() -> Prompt {
        Prompt::build("मुझे बुखार है", Language::Hindi)
    }

    #[tokio::test]
    async fn test_gemini_success_with_key_query_param() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/generate"))
            .and(query_param("key", "AIza-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "आराम करें और पानी पिएं।" }] }
                }]
            })))
            .mount(&mock_server)
            .await;

        let spec = find_by_name("gemini").unwrap();
        let client = ProviderClient::new();
        let url = format!("{}/generate", mock_server.uri());

        let text = client
            .generate(spec, "AIza-test", Some(&url), &prompt())
            .await
            .unwrap();
        assert_eq!(text, "आराम करें और पानी पिएं।");
    }

    #[tokio::test]
    async fn test_huggingface_sends_bearer_and_inputs() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/test"))
            .and(header("Authorization", "Bearer hf_test"))
            .and(body_partial_json(serde_json::json!({
                "parameters": { "return_full_text": false }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "generated_text": "Rest and hydrate." }
            ])))
            .mount(&mock_server)
            .await;

        let spec = find_by_name("huggingface").unwrap();
        let client = ProviderClient::new();
        let url = format!("{}/models/test", mock_server.uri());

        let text = client
            .generate(spec, "hf_test", Some(&url), &prompt())
            .await
            .unwrap();
        assert_eq!(text, "Rest and hydrate.");
    }

    #[tokio::test]
    async fn test_groq_sends_model_and_messages() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/openai/v1/chat/completions"))
            .and(header("Authorization", "Bearer gsk_test"))
            .and(body_partial_json(serde_json::json!({
                "model": "llama-3.1-8b-instant"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{
                    "message": { "role": "assistant", "content": "Take rest." }
                }]
            })))
            .mount(&mock_server)
            .await;

        let spec = find_by_name("groq").unwrap();
        let client = ProviderClient::new();
        let url = format!("{}/openai/v1/chat/completions", mock_server.uri());

        let text = client
            .generate(spec, "gsk_test", Some(&url), &prompt())
            .await
            .unwrap();
        assert_eq!(text, "Take rest.");
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&mock_server)
            .await;

        let spec = find_by_name("groq").unwrap();
        let client = ProviderClient::new();

        let err = client
            .generate(spec, "gsk", Some(&mock_server.uri()), &prompt())
            .await
            .unwrap_err();

        match err {
            ProviderError::Status { provider, status, body } => {
                assert_eq!(provider, "groq");
                assert_eq!(status.as_u16(), 429);
                assert_eq!(body, "rate limited");
            }
            other => panic!("expected Status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_payload_is_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "candidates": [] })),
            )
            .mount(&mock_server)
            .await;

        let spec = find_by_name("gemini").unwrap();
        let client = ProviderClient::new();

        let err = client
            .generate(spec, "AIza", Some(&mock_server.uri()), &prompt())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Malformed { provider: "gemini" }));
    }

    #[tokio::test]
    async fn test_network_error() {
        // Point to a port that's not listening
        let spec = find_by_name("huggingface").unwrap();
        let client = ProviderClient::new();

        let err = client
            .generate(spec, "hf", Some("http://127.0.0.1:1"), &prompt())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Http { provider: "huggingface", .. }));
    }
}
