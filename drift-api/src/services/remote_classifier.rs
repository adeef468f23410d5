//! Hosted inference API client
//!
//! Sends entry text to the hosted emotion-classification endpoint and
//! returns the raw label/score pairs the model produced. The deployed
//! model uses the 28-label GoEmotions taxonomy; the label mapper folds
//! those onto the six canonical categories.
//!
//! Every failure here is a soft failure: the orchestrator degrades to the
//! keyword classifier instead of surfacing the error. A single attempt is
//! made per call -- no retries, no backoff.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Default hosted model route
const INFERENCE_API_URL: &str =
    "https://router.huggingface.co/hf-inference/models/SamLowe/roberta-base-go_emotions";

/// Timeout for inference requests. A hung request is treated as a failure
/// once this elapses; there is no retry layer above to interpret a hang.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Remote classifier errors
///
/// All variants are absorbed by the analysis orchestrator and answered
/// with the keyword fallback; none reach an API caller.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Network-level failure (connection error or timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Model warming up (503). Treated as an immediate failure.
    #[error("Model is warming up")]
    ModelLoading,

    /// Non-2xx response from the inference API
    #[error("Inference API error {0}: {1}")]
    Api(u16, String),

    /// Response body did not match either known shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Well-formed response carrying no labels
    #[error("Inference API returned no labels")]
    EmptyResponse,
}

/// One raw label/score pair from the model
#[derive(Debug, Clone, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

/// Inference response body: a flat list of label/score pairs, or the same
/// list nested one level (model-dependent).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

/// Hosted inference API client
///
/// Stateless apart from the reused connection pool. The credential and
/// endpoint are injected at construction; nothing is read from the
/// environment at call time.
pub struct RemoteClassifier {
    /// HTTP client for API requests
    http_client: Client,
    /// Inference endpoint URL
    endpoint: String,
    /// Bearer credential
    api_key: String,
}

impl RemoteClassifier {
    /// Create a client against the default hosted model route
    pub fn new(api_key: String) -> Self {
        Self::with_endpoint(api_key, INFERENCE_API_URL.to_string())
    }

    /// Create a client against a specific endpoint (also used by tests)
    pub fn with_endpoint(api_key: String, endpoint: String) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            endpoint,
            api_key,
        }
    }

    /// Classify text, returning the model's raw label/score pairs
    ///
    /// The caller guarantees non-empty trimmed text; empty input is
    /// rejected upstream by the orchestrator before this is reached.
    pub async fn classify(&self, text: &str) -> Result<Vec<LabelScore>, RemoteError> {
        debug!(text_len = text.len(), "Requesting emotion classification");

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({
                "inputs": text,
                "options": { "wait_for_model": true },
            }))
            .send()
            .await
            .map_err(|e| RemoteError::Network(format!("Inference request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::SERVICE_UNAVAILABLE {
            return Err(RemoteError::ModelLoading);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Api(status.as_u16(), body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RemoteError::Network(format!("Reading inference response failed: {}", e)))?;

        let parsed: InferenceResponse = serde_json::from_str(&body)
            .map_err(|e| RemoteError::Parse(format!("Malformed inference response: {}", e)))?;

        let labels = match parsed {
            InferenceResponse::Flat(labels) => labels,
            InferenceResponse::Nested(mut nested) => {
                if nested.is_empty() {
                    Vec::new()
                } else {
                    nested.remove(0)
                }
            }
        };

        if labels.is_empty() {
            return Err(RemoteError::EmptyResponse);
        }

        debug!(label_count = labels.len(), "Inference response received");
        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_response_shape_parses() {
        let parsed: InferenceResponse =
            serde_json::from_str(r#"[{"label":"joy","score":0.9},{"label":"grief","score":0.1}]"#)
                .unwrap();
        match parsed {
            InferenceResponse::Flat(labels) => {
                assert_eq!(labels.len(), 2);
                assert_eq!(labels[0].label, "joy");
                assert_eq!(labels[0].score, 0.9);
            }
            InferenceResponse::Nested(_) => panic!("flat body parsed as nested"),
        }
    }

    #[test]
    fn nested_response_shape_parses() {
        let parsed: InferenceResponse =
            serde_json::from_str(r#"[[{"label":"admiration","score":0.7}]]"#).unwrap();
        match parsed {
            InferenceResponse::Nested(outer) => {
                assert_eq!(outer.len(), 1);
                assert_eq!(outer[0][0].label, "admiration");
            }
            InferenceResponse::Flat(_) => panic!("nested body parsed as flat"),
        }
    }

    #[test]
    fn object_body_is_rejected() {
        // error bodies come back as objects, e.g. {"error": "..."}
        assert!(serde_json::from_str::<InferenceResponse>(r#"{"error":"loading"}"#).is_err());
    }
}
