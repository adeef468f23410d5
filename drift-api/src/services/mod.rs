//! Emotion classification services
//!
//! The analysis pipeline: [`EmotionAnalyzer`] orchestrates one remote
//! inference attempt ([`remote_classifier`] + [`label_mapper`]) with the
//! deterministic [`keyword_classifier`] as the degraded-mode fallback.

pub mod emotion_analyzer;
pub mod keyword_classifier;
pub mod label_mapper;
pub mod remote_classifier;

pub use emotion_analyzer::{EmotionAnalyzer, EmptyInputError};
pub use remote_classifier::RemoteClassifier;
