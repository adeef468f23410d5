//! Keyword-based emotion classifier (fallback path)
//!
//! Deterministic, dependency-free scorer used when the hosted inference
//! endpoint is unavailable. Each trigger word found as a substring of the
//! lower-cased input contributes weight 1 to its category. Matching is
//! deliberately not word-boundary-aware, trading precision for recall
//! ("goodbye" counts toward joy via "good") -- a known imprecision of the
//! fallback path, kept as designed.

use drift_common::{Emotion, EmotionResult, EmotionScores};

/// Trigger words per category
const KEYWORDS: [(Emotion, &[&str]); 6] = [
    (
        Emotion::Joy,
        &[
            "happy",
            "joy",
            "excited",
            "great",
            "wonderful",
            "amazing",
            "love",
            "excellent",
            "good",
        ],
    ),
    (
        Emotion::Sadness,
        &[
            "sad",
            "unhappy",
            "depressed",
            "down",
            "lonely",
            "disappointed",
        ],
    ),
    (
        Emotion::Anger,
        &["angry", "mad", "furious", "annoyed", "frustrated", "hate"],
    ),
    (
        Emotion::Fear,
        &["afraid", "scared", "fear", "worried", "anxious", "nervous"],
    ),
    (
        Emotion::Surprise,
        &["surprised", "shocked", "amazed", "wow", "unexpected"],
    ),
    (Emotion::Neutral, &["okay", "fine", "alright", "normal"]),
];

/// Classify text by keyword matching
///
/// Never fails: text with no trigger word (including empty input) yields
/// the all-neutral result with confidence 1.0.
pub fn classify(text: &str) -> EmotionResult {
    let lower = text.to_lowercase();
    let mut scores = EmotionScores::zero();

    for (emotion, words) in KEYWORDS {
        for word in words {
            if lower.contains(word) {
                scores.add(emotion, 1.0);
            }
        }
    }

    if scores.is_zero() {
        return EmotionResult::all_neutral();
    }

    scores.normalize();
    EmotionResult::from_scores(scores)
}
