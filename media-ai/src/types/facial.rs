//! Types for facial emotion detection results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Facial emotion categories reported by the emotion detector.
///
/// Variants are declared in alphabetical order; `Ord` and [`Emotion::ALL`]
/// follow that order, which is the tie-break order wherever two categories
/// score the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Angry,
    Disgust,
    Fear,
    Happy,
    Neutral,
    Sad,
    Surprise,
}

impl Emotion {
    pub const ALL: [Emotion; 7] = [
        Emotion::Angry,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Happy,
        Emotion::Neutral,
        Emotion::Sad,
        Emotion::Surprise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Angry => "angry",
            Emotion::Disgust => "disgust",
            Emotion::Fear => "fear",
            Emotion::Happy => "happy",
            Emotion::Neutral => "neutral",
            Emotion::Sad => "sad",
            Emotion::Surprise => "surprise",
        }
    }

    /// Emotions read as distress signals when dominant.
    pub fn is_negative(&self) -> bool {
        matches!(
            self,
            Emotion::Sad | Emotion::Fear | Emotion::Disgust | Emotion::Angry
        )
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-category sum of emotion scores across all processed frames.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmotionTotals {
    pub angry: f64,
    pub disgust: f64,
    pub fear: f64,
    pub happy: f64,
    pub sad: f64,
    pub surprise: f64,
    pub neutral: f64,
}

impl EmotionTotals {
    pub fn get(&self, emotion: Emotion) -> f64 {
        match emotion {
            Emotion::Angry => self.angry,
            Emotion::Disgust => self.disgust,
            Emotion::Fear => self.fear,
            Emotion::Happy => self.happy,
            Emotion::Neutral => self.neutral,
            Emotion::Sad => self.sad,
            Emotion::Surprise => self.surprise,
        }
    }
}

/// Per-frame emotion scores, one sequence per category.
///
/// Sequences are index-aligned: entry `i` of every sequence belongs to
/// processed frame `i`. Detectors may emit short sequences when a category
/// was never scored for trailing frames; [`EmotionTimelines::padded`] restores
/// the equal-length invariant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmotionTimelines {
    pub angry: Vec<f64>,
    pub disgust: Vec<f64>,
    pub fear: Vec<f64>,
    pub happy: Vec<f64>,
    pub sad: Vec<f64>,
    pub surprise: Vec<f64>,
    pub neutral: Vec<f64>,
}

impl EmotionTimelines {
    pub fn series(&self, emotion: Emotion) -> &[f64] {
        match emotion {
            Emotion::Angry => &self.angry,
            Emotion::Disgust => &self.disgust,
            Emotion::Fear => &self.fear,
            Emotion::Happy => &self.happy,
            Emotion::Neutral => &self.neutral,
            Emotion::Sad => &self.sad,
            Emotion::Surprise => &self.surprise,
        }
    }

    fn series_mut(&mut self, emotion: Emotion) -> &mut Vec<f64> {
        match emotion {
            Emotion::Angry => &mut self.angry,
            Emotion::Disgust => &mut self.disgust,
            Emotion::Fear => &mut self.fear,
            Emotion::Happy => &mut self.happy,
            Emotion::Neutral => &mut self.neutral,
            Emotion::Sad => &mut self.sad,
            Emotion::Surprise => &mut self.surprise,
        }
    }

    /// Score of `emotion` at `frame`, 0.0 when the category has no entry for it.
    pub fn value_at(&self, emotion: Emotion, frame: usize) -> f64 {
        self.series(emotion).get(frame).copied().unwrap_or(0.0)
    }

    /// Returns a copy where every category has exactly `total_frames` entries,
    /// zero-filling missing frames and dropping any surplus.
    pub fn padded(&self, total_frames: usize) -> EmotionTimelines {
        let mut padded = self.clone();
        for emotion in Emotion::ALL {
            padded.series_mut(emotion).resize(total_frames, 0.0);
        }
        padded
    }
}

/// Facial emotion analysis of one recorded answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacialAnalysis {
    #[serde(default)]
    pub total_frames: usize,
    /// Every Nth video frame was sampled.
    #[serde(default = "default_frame_inference_rate")]
    pub frame_inference_rate: u32,
    #[serde(default)]
    pub emotion_sums: EmotionTotals,
    #[serde(default)]
    pub timeline: EmotionTimelines,
    #[serde(default)]
    pub clip_length_seconds: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_inference_time: Option<f64>,
}

fn default_frame_inference_rate() -> u32 {
    30
}

impl Default for FacialAnalysis {
    fn default() -> Self {
        Self {
            total_frames: 0,
            frame_inference_rate: default_frame_inference_rate(),
            emotion_sums: EmotionTotals::default(),
            timeline: EmotionTimelines::default(),
            clip_length_seconds: 0.0,
            avg_inference_time: None,
        }
    }
}
