//! Emotion analysis orchestrator
//!
//! The single entry point for classifying entry text. Makes one attempt
//! against the hosted inference endpoint when a client is configured and
//! degrades to the keyword classifier on any failure -- remote outages
//! never reach the caller. The only await point is the outbound HTTP
//! call; no state is shared between concurrent calls.

use crate::services::keyword_classifier;
use crate::services::label_mapper;
use crate::services::remote_classifier::RemoteClassifier;
use drift_common::EmotionResult;
use thiserror::Error;
use tracing::{debug, warn};

/// Rejected input: empty or whitespace-only text
///
/// The one classification error that crosses the service boundary. The
/// HTTP layer answers it with a 400; it is never masked by the fallback.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Text cannot be empty")]
pub struct EmptyInputError;

/// Emotion analysis orchestrator
pub struct EmotionAnalyzer {
    /// Hosted inference client; `None` means keyword-only mode
    remote: Option<RemoteClassifier>,
}

impl EmotionAnalyzer {
    pub fn new(remote: Option<RemoteClassifier>) -> Self {
        Self { remote }
    }

    /// Analyzer without a remote client (no inference credential configured)
    pub fn keyword_only() -> Self {
        Self::new(None)
    }

    /// Analyze entry text into a canonical emotion result
    ///
    /// Always produces a valid result for non-empty input: remote
    /// failures and zero-mass mappings fall back to the keyword
    /// classifier, which never fails.
    pub async fn analyze(&self, text: &str) -> Result<EmotionResult, EmptyInputError> {
        if text.trim().is_empty() {
            return Err(EmptyInputError);
        }

        if let Some(remote) = &self.remote {
            match remote.classify(text).await {
                Ok(raw) => {
                    let mapped = label_mapper::map_label_scores(&raw);
                    if mapped.dropped > 0 {
                        debug!(dropped = mapped.dropped, "Ignored unmapped model labels");
                    }
                    if !mapped.scores.is_zero() {
                        let result = EmotionResult::from_scores(mapped.scores);
                        debug!(
                            emotion = %result.emotion,
                            confidence = result.confidence,
                            "Remote classification succeeded"
                        );
                        return Ok(result);
                    }
                    warn!("No model label mapped to a known category; using keyword fallback");
                }
                Err(e) => {
                    warn!(error = %e, "Remote classification failed; using keyword fallback");
                }
            }
        }

        Ok(keyword_classifier::classify(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_common::Emotion;

    #[tokio::test]
    async fn empty_input_is_rejected_before_any_classifier_runs() {
        let analyzer = EmotionAnalyzer::keyword_only();
        assert_eq!(analyzer.analyze("").await, Err(EmptyInputError));
        assert_eq!(analyzer.analyze("   ").await, Err(EmptyInputError));
        assert_eq!(analyzer.analyze("\n\t").await, Err(EmptyInputError));
    }

    #[tokio::test]
    async fn keyword_only_mode_classifies_locally() {
        let analyzer = EmotionAnalyzer::keyword_only();
        let result = analyzer.analyze("I am so happy and excited today!").await.unwrap();

        assert_eq!(result.emotion, Emotion::Joy);
        assert_eq!(result.confidence, 1.0);
    }
}
