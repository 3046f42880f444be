//! Medical-reference context for provider prompts.
//!
//! Before the provider chain runs, the router asks MedlinePlus for topic
//! data matching the query and attaches whatever comes back to the prompt
//! as reference material. Strictly best-effort: any failure (transport,
//! non-2xx, empty payload) yields no context and the chain proceeds
//! without it. One call per query, 10 second deadline.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

/// MedlinePlus health-topics API.
pub const DEFAULT_HEALTH_API_BASE: &str = "https://api.nlm.nih.gov/medlineplus/v2/";

/// Fetches health-topic context from the medical-reference API.
#[derive(Clone, Debug)]
pub struct HealthContextClient {
    client: reqwest::Client,
    base: String,
}

impl HealthContextClient {
    pub fn new(api_base: Option<&str>) -> Self {
        let base = api_base
            .unwrap_or(DEFAULT_HEALTH_API_BASE)
            .trim_end_matches('/')
            .to_string();
        HealthContextClient {
            client: reqwest::Client::new(),
            base,
        }
    }

    /// Look up topic data for `query`. `None` means "no usable context",
    /// never an error the caller has to handle.
    pub async fn fetch(&self, query: &str) -> Option<Value> {
        let url = format!("{}/healthTopics", self.base);

        let result = self
            .client
            .get(&url)
            .query(&[("query", query), ("format", "json"), ("lang", "en")])
            .timeout(Duration::from_secs(10))
            .send()
            .await;

        let response = match result {
            Ok(resp) => resp,
            Err(e) => {
                warn!(error = %e, "Health API request failed");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Health API error");
            return None;
        }

        let payload: Value = match response.json().await {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "Failed to parse health API response");
                return None;
            }
        };

        if payload.is_null() || payload.as_object().is_some_and(|o| o.is_empty()) {
            return None;
        }

        debug!("Health API context attached");
        Some(payload)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
