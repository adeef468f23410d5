//! Label mapping and normalization
//!
//! Folds the model's fine-grained emotion vocabulary onto the six
//! canonical categories. Pure function, no I/O.
//!
//! A raw label is routed to the FIRST category (in canonical order) whose
//! substring table matches the lower-cased label. The order is load-bearing:
//! "disapproval" contains "approval" and therefore accumulates into joy,
//! never reaching the anger table. Known mapping imprecision, kept as-is.

use crate::services::remote_classifier::LabelScore;
use drift_common::{Emotion, EmotionScores};

/// Fine-grained label substrings per canonical category
const LABEL_TABLE: [(Emotion, &[&str]); 6] = [
    (
        Emotion::Joy,
        &[
            "joy",
            "admiration",
            "amusement",
            "approval",
            "excitement",
            "gratitude",
            "love",
            "optimism",
            "pride",
            "relief",
        ],
    ),
    (
        Emotion::Sadness,
        &["sadness", "disappointment", "grief", "remorse"],
    ),
    (Emotion::Anger, &["anger", "annoyance", "disapproval"]),
    (Emotion::Fear, &["fear", "nervousness"]),
    (
        Emotion::Surprise,
        &["surprise", "realization", "confusion", "curiosity"],
    ),
    (Emotion::Neutral, &["neutral", "desire", "caring"]),
];

/// A mapped six-category distribution plus mapping diagnostics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappedDistribution {
    /// L1-normalized distribution; all-zero when no label mapped
    pub scores: EmotionScores,
    /// Count of labels that matched no category and contributed nothing
    pub dropped: usize,
}

/// Map raw label/score pairs onto the canonical categories
///
/// Scores accumulate: several fine-grained labels can feed one category.
/// A coarse-label model (labels already `joy`..`neutral`, one per
/// invocation) goes through the same path, where accumulation degenerates
/// to plain assignment.
///
/// With positive total mass the result is L1-normalized. When nothing
/// maps, the distribution stays all-zero; the orchestrator treats that as
/// a failed classification and falls back.
pub fn map_label_scores(raw: &[LabelScore]) -> MappedDistribution {
    let mut scores = EmotionScores::zero();
    let mut dropped = 0;

    for pair in raw {
        let label = pair.label.to_lowercase();
        match category_for(&label) {
            Some(emotion) => scores.add(emotion, pair.score),
            None => dropped += 1,
        }
    }

    scores.normalize();
    MappedDistribution { scores, dropped }
}

/// First canonical category whose substring table matches the label
fn category_for(label: &str) -> Option<Emotion> {
    for (emotion, needles) in LABEL_TABLE {
        if needles.iter().any(|needle| label.contains(needle)) {
            return Some(emotion);
        }
    }
    None
}
