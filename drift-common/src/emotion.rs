//! Canonical emotion categories and score distributions
//!
//! Every analysis result in the system is expressed in the fixed
//! six-category space defined here, regardless of which classifier
//! produced it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical emotion category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Joy,
    Sadness,
    Anger,
    Fear,
    Surprise,
    Neutral,
}

impl Emotion {
    /// Fixed category order. Dominant-emotion ties resolve to the first
    /// maximum encountered in this order.
    pub const ALL: [Emotion; 6] = [
        Emotion::Joy,
        Emotion::Sadness,
        Emotion::Anger,
        Emotion::Fear,
        Emotion::Surprise,
        Emotion::Neutral,
    ];

    /// Lowercase label as stored in the database and returned over the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
            Emotion::Anger => "anger",
            Emotion::Fear => "fear",
            Emotion::Surprise => "surprise",
            Emotion::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "joy" => Ok(Emotion::Joy),
            "sadness" => Ok(Emotion::Sadness),
            "anger" => Ok(Emotion::Anger),
            "fear" => Ok(Emotion::Fear),
            "surprise" => Ok(Emotion::Surprise),
            "neutral" => Ok(Emotion::Neutral),
            other => Err(crate::Error::InvalidInput(format!(
                "Unknown emotion label: {}",
                other
            ))),
        }
    }
}

/// Per-category score accumulators
///
/// Serialized field names carry the `_score` suffix so the JSON shape
/// matches the persisted columns (`joy_score` ... `neutral_score`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EmotionScores {
    #[serde(rename = "joy_score")]
    pub joy: f64,
    #[serde(rename = "sadness_score")]
    pub sadness: f64,
    #[serde(rename = "anger_score")]
    pub anger: f64,
    #[serde(rename = "fear_score")]
    pub fear: f64,
    #[serde(rename = "surprise_score")]
    pub surprise: f64,
    #[serde(rename = "neutral_score")]
    pub neutral: f64,
}

impl EmotionScores {
    /// All-zero distribution
    pub fn zero() -> Self {
        Self::default()
    }

    /// The no-signal distribution: all mass on neutral
    pub fn all_neutral() -> Self {
        Self {
            neutral: 1.0,
            ..Self::default()
        }
    }

    pub fn get(&self, emotion: Emotion) -> f64 {
        match emotion {
            Emotion::Joy => self.joy,
            Emotion::Sadness => self.sadness,
            Emotion::Anger => self.anger,
            Emotion::Fear => self.fear,
            Emotion::Surprise => self.surprise,
            Emotion::Neutral => self.neutral,
        }
    }

    /// Accumulate `score` into the given category
    pub fn add(&mut self, emotion: Emotion, score: f64) {
        let slot = match emotion {
            Emotion::Joy => &mut self.joy,
            Emotion::Sadness => &mut self.sadness,
            Emotion::Anger => &mut self.anger,
            Emotion::Fear => &mut self.fear,
            Emotion::Surprise => &mut self.surprise,
            Emotion::Neutral => &mut self.neutral,
        };
        *slot += score;
    }

    /// Sum of all six categories
    pub fn total(&self) -> f64 {
        Emotion::ALL.iter().map(|e| self.get(*e)).sum()
    }

    /// True when no category holds any mass
    pub fn is_zero(&self) -> bool {
        self.total() == 0.0
    }

    /// L1 normalization: divide each category by the total so the scores
    /// form a distribution. No-op when the total is zero.
    pub fn normalize(&mut self) {
        let total = self.total();
        if total > 0.0 {
            self.joy /= total;
            self.sadness /= total;
            self.anger /= total;
            self.fear /= total;
            self.surprise /= total;
            self.neutral /= total;
        }
    }

    /// Dominant category and its score
    ///
    /// Seeded with (neutral, 0.0) and replaced only on a strictly greater
    /// score, so ties resolve to the first maximum in `Emotion::ALL` order
    /// and an all-zero distribution reports neutral.
    pub fn dominant(&self) -> (Emotion, f64) {
        let mut best = (Emotion::Neutral, 0.0);
        for emotion in Emotion::ALL {
            let score = self.get(emotion);
            if score > best.1 {
                best = (emotion, score);
            }
        }
        best
    }
}

/// The canonical result of one emotion analysis
///
/// Immutable once produced: the caller persists it alongside the entry it
/// was computed from and never updates it in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionResult {
    /// Dominant category
    pub emotion: Emotion,
    /// Normalized score of the dominant category
    pub confidence: f64,
    /// Full six-category distribution
    #[serde(flatten)]
    pub scores: EmotionScores,
}

impl EmotionResult {
    /// Build a result from a score distribution. The dominant category
    /// becomes the reported emotion; its score becomes the confidence.
    pub fn from_scores(scores: EmotionScores) -> Self {
        let (emotion, confidence) = scores.dominant();
        Self {
            emotion,
            confidence,
            scores,
        }
    }

    /// The no-signal result: neutral with full confidence
    pub fn all_neutral() -> Self {
        Self::from_scores(EmotionScores::all_neutral())
    }
}
