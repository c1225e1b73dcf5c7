use crate::{prompt, schema};
use async_trait::async_trait;
use comms_core::config::GatewayConfig;
use comms_core::gateway::{AnalysisGateway, GapAnalysis, PerformanceReport};
use comms_core::issue::CommIssue;
use comms_core::requirement::RequirementDraft;
use comms_core::stakeholder::{PlanSubject, Stakeholder, StakeholderDraft};
use comms_core::{CommsError, Result};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

/// Longest slice of an error body carried into the error message.
const ERROR_BODY_CHARS: usize = 320;

/// [`AnalysisGateway`] backed by the Gemini `generateContent` REST API.
#[derive(Debug, Clone)]
pub struct GeminiGateway {
    http: Client,
    url: Url,
    model: String,
}

impl GeminiGateway {
    /// Build a gateway from config, resolving the API key from the
    /// environment. Fails with [`CommsError::MissingCredentials`] before any
    /// network activity when no key is set.
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        let key = config.resolve_api_key()?;
        Self::with_api_key(config, &key)
    }

    pub fn with_api_key(config: &GatewayConfig, api_key: &str) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(CommsError::MissingCredentials(config.api_key_env.join(" or ")));
        }
        let url = resolve_endpoint(&config.endpoint, &config.model, api_key)?;
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CommsError::Gateway(format!("http client: {e}")))?;
        Ok(Self {
            http,
            url,
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one prompt with a response schema and deserialize the answer.
    async fn generate<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        prompt: String,
        response_schema: Value,
    ) -> Result<T> {
        let payload = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema
            }
        });

        debug!(operation, model = %self.model, "sending gemini request");
        let response = self
            .http
            .post(self.url.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|e| CommsError::Gateway(format!("{operation}: request failed: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CommsError::Gateway(format!(
                "{operation}: gemini error {status}: {}",
                truncate(&body, ERROR_BODY_CHARS)
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| CommsError::MalformedResponse(format!("{operation}: {e}")))?;
        let text = candidate_text(&body);
        if text.trim().is_empty() {
            return Err(CommsError::MalformedResponse(format!(
                "{operation}: empty response"
            )));
        }
        parse_answer(operation, &text)
    }
}

#[async_trait]
impl AnalysisGateway for GeminiGateway {
    async fn extract_stakeholders(&self, text: &str) -> Result<Vec<StakeholderDraft>> {
        self.generate(
            "extract_stakeholders",
            prompt::extract_stakeholders(text),
            schema::stakeholders(),
        )
        .await
    }

    async fn generate_comm_plan(&self, subjects: &[PlanSubject]) -> Result<Vec<RequirementDraft>> {
        self.generate(
            "generate_comm_plan",
            prompt::generate_comm_plan(subjects)?,
            schema::comm_plan(),
        )
        .await
    }

    async fn analyze_engagement_gaps(&self, stakeholders: &[Stakeholder]) -> Result<GapAnalysis> {
        self.generate(
            "analyze_engagement_gaps",
            prompt::analyze_engagement_gaps(stakeholders)?,
            schema::gap_analysis(),
        )
        .await
    }

    async fn evaluate_performance(&self, issues: &[CommIssue]) -> Result<PerformanceReport> {
        let report: PerformanceReport = self
            .generate(
                "evaluate_performance",
                prompt::evaluate_performance(issues)?,
                schema::performance(),
            )
            .await?;
        report.validate()?;
        Ok(report)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `{endpoint}/v1beta/models/{model}:generateContent?key=...`, unless the
/// endpoint already names a method.
fn resolve_endpoint(endpoint: &str, model: &str, api_key: &str) -> Result<Url> {
    let raw = if endpoint.contains(":generateContent") {
        endpoint.to_string()
    } else {
        format!(
            "{}/v1beta/models/{model}:generateContent",
            endpoint.trim_end_matches('/')
        )
    };
    let mut url = Url::parse(&raw)
        .map_err(|e| CommsError::Gateway(format!("invalid gemini endpoint {raw}: {e}")))?;
    if !url.query_pairs().any(|(k, _)| k == "key") {
        url.query_pairs_mut().append_pair("key", api_key);
    }
    Ok(url)
}

/// Concatenated text parts of the first candidate.
fn candidate_text(body: &Value) -> String {
    body["candidates"]
        .as_array()
        .and_then(|c| c.first())
        .and_then(|c| c["content"]["parts"].as_array())
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p["text"].as_str())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}

fn parse_answer<T: DeserializeOwned>(operation: &str, text: &str) -> Result<T> {
    serde_json::from_str(strip_code_fence(text))
        .map_err(|e| CommsError::MalformedResponse(format!("{operation}: {e}")))
}

/// Drop a surrounding Markdown code fence, if the model added one.
fn strip_code_fence(text: &str) -> &str {
    let t = text.trim();
    let Some(rest) = t.strip_prefix("```") else {
        return t;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn truncate(value: &str, max_chars: usize) -> String {
    let mut chars = value.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
