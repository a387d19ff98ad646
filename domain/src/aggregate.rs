//! Composite answer score.

use crate::round_to;
use crate::timeline::TimelineEntry;
use log::*;
use media_ai::{Emotion, Sentiment};
use serde::Serialize;

/// Points for the overall facial emotion. Emotions not listed score 0.
const OVERALL_FACIAL_POINTS: &[(Emotion, f64)] = &[
    (Emotion::Happy, 10.0),
    (Emotion::Surprise, 6.0),
    (Emotion::Neutral, 5.0),
];

/// Points for the overall audio sentiment. Sentiments not listed score 0.
const OVERALL_AUDIO_POINTS: &[(Sentiment, f64)] =
    &[(Sentiment::Positive, 10.0), (Sentiment::Neutral, 5.0)];

/// Facial emotions consistent with each audio sentiment.
const AV_ASSOCIATIONS: &[(Sentiment, &[Emotion])] = &[
    (Sentiment::Positive, &[Emotion::Happy, Emotion::Surprise]),
    (Sentiment::Neutral, &[Emotion::Neutral]),
    (
        Sentiment::Negative,
        &[Emotion::Sad, Emotion::Angry, Emotion::Fear, Emotion::Disgust],
    ),
];

/// Per-entry occurrence points for the audio sentiment.
const AUDIO_EMOTION_POINTS: &[(Sentiment, f64)] = &[
    (Sentiment::Positive, 2.0),
    (Sentiment::Neutral, 1.0),
    (Sentiment::Negative, 0.0),
];

/// Per-endpoint occurrence points for the facial emotion.
const FACIAL_EMOTION_POINTS: &[(Emotion, f64)] = &[
    (Emotion::Happy, 2.0),
    (Emotion::Surprise, 1.0),
    (Emotion::Neutral, 1.0),
];

const MAX_MATCH_POINTS_PER_ENTRY: f64 = 2.0;
const MAX_OCCURRENCE_POINTS_PER_ENTRY: f64 = 6.0;

/// Scores used when the fused timeline is empty.
pub const EMPTY_TIMELINE_AV_MATCH: f64 = 5.0;
pub const EMPTY_TIMELINE_OCCURRENCE: f64 = 6.0;

fn lookup<K: PartialEq>(table: &[(K, f64)], key: &K) -> f64 {
    table
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, points)| *points)
        .unwrap_or(0.0)
}

fn is_associated(sentiment: Sentiment, emotion: Emotion) -> bool {
    AV_ASSOCIATIONS
        .iter()
        .find(|(s, _)| *s == sentiment)
        .is_some_and(|(_, emotions)| emotions.contains(&emotion))
}

/// Inputs of the composite score.
#[derive(Debug, Clone, Copy)]
pub struct AggregateInputs<'a> {
    /// Blended text structure score in [0, 100].
    pub structure_score: f64,
    pub overall_facial_emotion: Emotion,
    pub overall_sentiment: Sentiment,
    pub timeline: &'a [TimelineEntry],
}

/// Each component of the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateScore {
    pub structure: f64,
    pub facial: f64,
    pub audio: f64,
    pub av_match: f64,
    pub emotion_occurrence: f64,
    pub total: f64,
}

/// How well facial expressions agree with the spoken sentiment, 0 to 10.
pub fn av_match(timeline: &[TimelineEntry]) -> f64 {
    if timeline.is_empty() {
        return EMPTY_TIMELINE_AV_MATCH;
    }
    let points: f64 = timeline
        .iter()
        .map(|entry| {
            entry
                .resolved_emotions()
                .filter(|emotion| is_associated(entry.audio_sentiment, *emotion))
                .count() as f64
        })
        .sum();
    round_to(
        points / (timeline.len() as f64 * MAX_MATCH_POINTS_PER_ENTRY) * 10.0,
        2,
    )
}

/// How often positive signals occur across the timeline, 0 to 10.
pub fn emotion_occurrence(timeline: &[TimelineEntry]) -> f64 {
    if timeline.is_empty() {
        return EMPTY_TIMELINE_OCCURRENCE;
    }
    let points: f64 = timeline
        .iter()
        .map(|entry| {
            lookup(AUDIO_EMOTION_POINTS, &entry.audio_sentiment)
                + entry
                    .resolved_emotions()
                    .map(|emotion| lookup(FACIAL_EMOTION_POINTS, &emotion))
                    .sum::<f64>()
        })
        .sum();
    let score = round_to(
        points / (timeline.len() as f64 * MAX_OCCURRENCE_POINTS_PER_ENTRY) * 10.0,
        2,
    );
    score.max(0.0)
}

/// Sums the structure, overall-emotion, match and occurrence components.
///
/// The total is unbounded unless `clamp` is set, in which case it is held to
/// [0, 100].
pub fn compute(inputs: &AggregateInputs, clamp: bool) -> AggregateScore {
    let facial = lookup(OVERALL_FACIAL_POINTS, &inputs.overall_facial_emotion);
    let audio = lookup(OVERALL_AUDIO_POINTS, &inputs.overall_sentiment);
    let av_match = av_match(inputs.timeline);
    let emotion_occurrence = emotion_occurrence(inputs.timeline);

    let mut total = round_to(
        inputs.structure_score + facial + audio + av_match + emotion_occurrence,
        2,
    );
    if clamp {
        total = total.clamp(0.0, 100.0);
    }

    debug!(
        "Aggregate components: structure {}, facial {facial}, audio {audio}, av match {av_match}, occurrence {emotion_occurrence}",
        inputs.structure_score
    );
    info!("Aggregate score: {total}");

    AggregateScore {
        structure: inputs.structure_score,
        facial,
        audio,
        av_match,
        emotion_occurrence,
        total,
    }
}
