//! Query router — the provider fallback chain.
//!
//! Walks [`PROVIDERS`](crate::registry::PROVIDERS) in priority order,
//! skipping anything without a usable key, and returns the first successful
//! generation. Every failure is absorbed with a warn log; when the chain is
//! exhausted the local canned responder answers instead. `answer` therefore
//! never fails — the caller always gets a reply.

use tracing::{debug, warn};

use sehat_core::{BotReply, ChatQuery, ProvidersConfig};
use sehat_responder::fallback_reply;

use crate::client::ProviderClient;
use crate::context::HealthContextClient;
use crate::prompt::Prompt;
use crate::registry::PROVIDERS;

/// Routes queries through the remote providers, falling back to canned
/// answers. Cheap to share behind an `Arc`.
#[derive(Debug)]
pub struct QueryRouter {
    client: ProviderClient,
    providers: ProvidersConfig,
    context: Option<HealthContextClient>,
}

impl QueryRouter {
    pub fn new(providers: ProvidersConfig) -> Self {
        QueryRouter {
            client: ProviderClient::new(),
            providers,
            context: None,
        }
    }

    /// Enable medical-reference prompt enrichment.
    pub fn with_health_context(mut self, context: HealthContextClient) -> Self {
        self.context = Some(context);
        self
    }

    fn any_configured(&self) -> bool {
        PROVIDERS.iter().any(|spec| {
            self.providers
                .get_by_name(spec.name)
                .is_some_and(|c| c.is_configured(spec.key_placeholder))
        })
    }

    /// Answer one query. Infallible: remote failures degrade to the local
    /// canned responder, never to an error.
    pub async fn answer(&self, query: &ChatQuery) -> BotReply {
        let mut prompt = Prompt::build(&query.text, query.language);

        // Context only feeds provider prompts; don't look it up when the
        // chain is going straight to the canned responder anyway.
        if let (Some(context), true) = (&self.context, self.any_configured()) {
            prompt = prompt.with_context(context.fetch(&query.text).await.as_ref());
        }

        for spec in PROVIDERS {
            let Some(config) = self.providers.get_by_name(spec.name) else {
                continue;
            };
            if !config.is_configured(spec.key_placeholder) {
                debug!(provider = spec.display_name, "Skipping unconfigured provider");
                continue;
            }

            match self
                .client
                .generate(spec, &config.api_key, config.api_base.as_deref(), &prompt)
                .await
            {
                Ok(text) => {
                    debug!(provider = spec.display_name, "Provider answered");
                    return BotReply::from_provider(text, spec.source, query.language);
                }
                Err(e) => {
                    warn!(
                        provider = spec.display_name,
                        error = %e,
                        "Provider attempt failed, trying next"
                    );
                }
            }
        }

        debug!("All providers unavailable, using canned responder");
        fallback_reply(&query.text, query.language)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use sehat_core::{Language, ProviderConfig, ReplySource, FALLBACK_CONFIDENCE, PROVIDER_CONFIDENCE};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn query(text: &str) -> ChatQuery {
        ChatQuery {
            text: text.to_string(),
            language: Language::Hindi,
            is_voice_input: false,
            user_id: None,
            session_id: "session-1".to_string(),
        }
    }

    fn configured(key: &str, base: &str) -> ProviderConfig {
        ProviderConfig {
            api_key: key.to_string(),
            api_base: Some(base.to_string()),
        }
    }

    #[tokio::test]
    async fn test_no_providers_configured_falls_back() {
        let router = QueryRouter::new(ProvidersConfig::default());
        let reply = router.answer(&query("मुझे बुखार है")).await;

        assert_eq!(reply.source, ReplySource::Fallback);
        assert_eq!(reply.confidence, FALLBACK_CONFIDENCE);
        assert!(reply.message.contains("बुखार"));
    }

    #[tokio::test]
    async fn test_placeholder_key_is_skipped() {
        let mut providers = ProvidersConfig::default();
        providers.gemini.api_key = "your_gemini_api_key_here".to_string();

        let router = QueryRouter::new(providers);
        let reply = router.answer(&query("fever")).await;
        assert_eq!(reply.source, ReplySource::Fallback);
    }

    #[tokio::test]
    async fn test_first_provider_success_short_circuits() {
        let gemini = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "आराम करें।" }] }
                }]
            })))
            .expect(1)
            .mount(&gemini)
            .await;

        // Groq configured too, but must never be called.
        let groq = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&groq)
            .await;

        let mut providers = ProvidersConfig::default();
        providers.gemini = configured("AIza-x", &gemini.uri());
        providers.groq = configured("gsk-x", &groq.uri());

        let router = QueryRouter::new(providers);
        let reply = router.answer(&query("मुझे बुखार है")).await;

        assert_eq!(reply.source, ReplySource::Gemini);
        assert_eq!(reply.confidence, PROVIDER_CONFIDENCE);
        assert_eq!(reply.message, "आराम करें।");
    }

    #[tokio::test]
    async fn test_failed_provider_falls_through_to_next() {
        let gemini = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&gemini)
            .await;

        let huggingface = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "generated_text": "Rest well." }
            ])))
            .expect(1)
            .mount(&huggingface)
            .await;

        let mut providers = ProvidersConfig::default();
        providers.gemini = configured("AIza-x", &gemini.uri());
        providers.huggingface = configured("hf-x", &huggingface.uri());

        let router = QueryRouter::new(providers);
        let reply = router.answer(&query("fever")).await;

        assert_eq!(reply.source, ReplySource::HuggingFace);
        assert_eq!(reply.message, "Rest well.");
    }

    #[tokio::test]
    async fn test_all_providers_failing_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let mut providers = ProvidersConfig::default();
        providers.gemini = configured("AIza-x", &server.uri());
        providers.huggingface = configured("hf-x", &server.uri());
        providers.groq = configured("gsk-x", &server.uri());

        let router = QueryRouter::new(providers);
        let reply = router.answer(&query("मुझे बुखार है")).await;

        assert_eq!(reply.source, ReplySource::Fallback);
        assert!(reply.message.contains("बुखार"));
    }

    #[tokio::test]
    async fn test_context_enriches_provider_prompt() {
        let health_api = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "result": { "topics": [{ "title": "Fever" }] }
            })))
            .expect(1)
            .mount(&health_api)
            .await;

        // Gemini only matches when the reference context made it into the
        // request body.
        let gemini = MockServer::start().await;
        Mock::given(method("POST"))
            .and(wiremock::matchers::body_string_contains("संदर्भ जानकारी"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "आराम करें।" }] }
                }]
            })))
            .mount(&gemini)
            .await;

        let mut providers = ProvidersConfig::default();
        providers.gemini = configured("AIza-x", &gemini.uri());

        let router = QueryRouter::new(providers)
            .with_health_context(crate::context::HealthContextClient::new(Some(&health_api.uri())));
        let reply = router.answer(&query("fever")).await;

        assert_eq!(reply.source, ReplySource::Gemini);
    }

    #[tokio::test]
    async fn test_context_failure_does_not_block_providers() {
        let health_api = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&health_api)
            .await;

        let gemini = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "आराम करें।" }] }
                }]
            })))
            .mount(&gemini)
            .await;

        let mut providers = ProvidersConfig::default();
        providers.gemini = configured("AIza-x", &gemini.uri());

        let router = QueryRouter::new(providers)
            .with_health_context(crate::context::HealthContextClient::new(Some(&health_api.uri())));
        let reply = router.answer(&query("fever")).await;

        assert_eq!(reply.source, ReplySource::Gemini);
    }

    #[tokio::test]
    async fn test_context_skipped_when_nothing_configured() {
        // A health API that must never be called: with no provider keys the
        // router goes straight to the canned responder.
        let health_api = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "result": {}
            })))
            .expect(0)
            .mount(&health_api)
            .await;

        let router = QueryRouter::new(ProvidersConfig::default())
            .with_health_context(crate::context::HealthContextClient::new(Some(&health_api.uri())));
        let reply = router.answer(&query("fever")).await;

        assert_eq!(reply.source, ReplySource::Fallback);
    }

    #[tokio::test]
    async fn test_empty_generation_counts_as_failure() {
        let gemini = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "   " }] }
                }]
            })))
            .mount(&gemini)
            .await;

        let mut providers = ProvidersConfig::default();
        providers.gemini = configured("AIza-x", &gemini.uri());

        let router = QueryRouter::new(providers);
        let reply = router.answer(&query("fever")).await;
        assert_eq!(reply.source, ReplySource::Fallback);
    }
}
