//! Types for speech transcription and sentiment analysis results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Emotional tone classification of a transcribed segment.
///
/// Serialized in upper case (`"POSITIVE"`) to match the transcription
/// provider's wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "POSITIVE",
            Sentiment::Neutral => "NEUTRAL",
            Sentiment::Negative => "NEGATIVE",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sentiment analysis for one time-bounded span of transcribed speech.
///
/// Segments arrive in provider order, which is not guaranteed to be sorted
/// by start time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSegment {
    pub text: String,
    pub sentiment: Sentiment,
    pub confidence: f64,
    #[serde(alias = "start")]
    pub start_ms: i64,
    #[serde(alias = "end")]
    pub end_ms: i64,
}

/// One occurrence of a highlighted keyword in the audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    #[serde(alias = "start")]
    pub start_ms: i64,
    #[serde(alias = "end")]
    pub end_ms: i64,
}

/// Auto-highlighted key phrase with its importance rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightKeyword {
    pub text: String,
    /// Importance in [0, 1]; higher means more relevant to the content.
    pub rank: f64,
    pub count: u32,
    #[serde(default)]
    pub timestamps: Vec<Timestamp>,
}

/// IAB taxonomy label with its relevance to the transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IabLabel {
    pub label: String,
    pub relevance: f64,
}

/// Topic detection result. Not used for scoring, only for speech feedback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IabResult {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub labels: Vec<IabLabel>,
}

/// Complete audio analysis of one recorded answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioAnalysis {
    #[serde(default)]
    pub sentiment_analysis: Vec<SentimentSegment>,
    #[serde(default)]
    pub highlights: Vec<HighlightKeyword>,
    #[serde(default)]
    pub iab_results: IabResult,
    #[serde(default)]
    pub clip_length_seconds: f64,
}
