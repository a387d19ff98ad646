//! Coarse Big-Five-like trait approximation.
//!
//! These scores are weak heuristics over sentiment, facial expression, keyword
//! length and answer structure. They are not a validated psychometric measure and
//! always travel with [`DISCLAIMER`].

use crate::round_to;
use log::*;
use media_ai::{Emotion, HighlightKeyword, Sentiment};
use serde::Serialize;

pub const DISCLAIMER: &str = "This is a weak approximation of Big Five traits and should not be used for serious assessments.";

pub const TRAIT_MIN: f64 = 0.0;
pub const TRAIT_MAX: f64 = 7.0;
const BASELINE: f64 = 3.5;

const LOW_THRESHOLD: f64 = TRAIT_MAX / 3.0;
const HIGH_THRESHOLD: f64 = TRAIT_MAX * 2.0 / 3.0;

/// Signals the trait approximation is computed from.
#[derive(Debug, Clone, Copy)]
pub struct TraitSignals<'a> {
    pub overall_sentiment: Sentiment,
    pub top_keywords: &'a [HighlightKeyword],
    pub dominant_emotion: Emotion,
    /// Blended text structure score in [0, 100].
    pub structure_score: f64,
}

/// Trait scores on a 0 to 7 scale, 3.5 being the neutral baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BigFiveScores {
    pub o: f64,
    pub c: f64,
    pub e: f64,
    pub a: f64,
    pub n: f64,
    #[serde(rename = "_disclaimer")]
    pub disclaimer: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TraitLevel {
    Low,
    Medium,
    High,
}

impl TraitLevel {
    pub fn of(score: f64) -> Self {
        if score < LOW_THRESHOLD {
            TraitLevel::Low
        } else if score > HIGH_THRESHOLD {
            TraitLevel::High
        } else {
            TraitLevel::Medium
        }
    }
}

/// Interview competencies read off the trait scores, each on a 0 to 10 scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedCompetencies {
    pub communication_clarity: f64,
    pub confidence: f64,
    pub engagement: f64,
    pub adaptability: f64,
}

fn sentiment_adjustment(sentiment: Sentiment) -> f64 {
    match sentiment {
        Sentiment::Positive => 1.0,
        Sentiment::Negative => -1.0,
        Sentiment::Neutral => -0.5,
    }
}

fn finish(score: f64) -> f64 {
    round_to(score, 1).clamp(TRAIT_MIN, TRAIT_MAX)
}

pub fn score(signals: &TraitSignals) -> BigFiveScores {
    let (mut o, mut c, mut e, mut a, mut n) = (BASELINE, BASELINE, BASELINE, BASELINE, BASELINE);
    let adjustment = sentiment_adjustment(signals.overall_sentiment);

    if !signals.top_keywords.is_empty() {
        let total: usize = signals
            .top_keywords
            .iter()
            .map(|keyword| keyword.text.chars().count().min(10))
            .sum();
        let avg_keyword_length = total as f64 / signals.top_keywords.len() as f64;
        o += (avg_keyword_length - 5.0) / 5.0 * 2.0;
    }

    match signals.dominant_emotion {
        Emotion::Happy => {
            e += 1.0;
            a += 1.0;
            n -= 0.5;
        }
        emotion if emotion.is_negative() => {
            n += 1.0;
            e -= 0.5;
            a -= 0.5;
        }
        _ => {}
    }

    c += (signals.structure_score / 100.0 - 0.5) * 2.0;

    e += adjustment;
    a += adjustment * 0.5;
    n -= adjustment * 0.5;

    let scores = BigFiveScores {
        o: finish(o),
        c: finish(c),
        e: finish(e),
        a: finish(a),
        n: finish(n),
        disclaimer: DISCLAIMER,
    };
    debug!("Big Five scores: {scores:?}");
    scores
}

/// One feedback sentence per trait, in o, c, e, a, n order.
pub fn trait_feedback(scores: &BigFiveScores) -> Vec<String> {
    [
        ("Openness", scores.o),
        ("Conscientiousness", scores.c),
        ("Extraversion", scores.e),
        ("Agreeableness", scores.a),
        ("Neuroticism", scores.n),
    ]
    .into_iter()
    .map(|(name, score)| {
        let level = TraitLevel::of(score);
        format!("{name} {score:.1}/7: {}", trait_message(name, level))
    })
    .collect()
}

fn trait_message(name: &str, level: TraitLevel) -> &'static str {
    match (name, level) {
        ("Openness", TraitLevel::Low) => "you tend to stick to routines and familiar ways of thinking.",
        ("Openness", TraitLevel::Medium) => "you are open to new ideas while still valuing some structure.",
        ("Openness", TraitLevel::High) => "you come across as curious and comfortable approaching problems from new angles.",
        ("Conscientiousness", TraitLevel::Low) => "your answer came across as loosely organized.",
        ("Conscientiousness", TraitLevel::Medium) => "you balance order with working at your own pace.",
        ("Conscientiousness", TraitLevel::High) => "you come across as prepared, organized and goal driven.",
        ("Extraversion", TraitLevel::Low) => "you came across as reserved.",
        ("Extraversion", TraitLevel::Medium) => "you came across as comfortable but measured.",
        ("Extraversion", TraitLevel::High) => "you came across as energetic and outgoing.",
        ("Agreeableness", TraitLevel::Low) => "your answer focused more on yourself than on others.",
        ("Agreeableness", TraitLevel::Medium) => "you show care for others while still prioritizing your own goals.",
        ("Agreeableness", TraitLevel::High) => "you come across as warm and ready to help others.",
        ("Neuroticism", TraitLevel::Low) => "you appeared calm and composed.",
        ("Neuroticism", TraitLevel::Medium) => "you appeared mostly composed with some signs of tension.",
        _ => "you appeared stressed or unsure during the answer.",
    }
}

/// Maps the trait scores onto interview competencies.
///
/// Traits are centered on the baseline before combining so that differences such
/// as extraversion minus neuroticism stay on the same scale as the traits.
pub fn derived_competencies(scores: &BigFiveScores) -> DerivedCompetencies {
    let centered = |score: f64| score - BASELINE;
    let normalize = |value: f64| round_to((value + BASELINE) / TRAIT_MAX * 10.0, 2).clamp(0.0, 10.0);

    let (o, c, e, a, n) = (
        centered(scores.o),
        centered(scores.c),
        centered(scores.e),
        centered(scores.a),
        centered(scores.n),
    );

    DerivedCompetencies {
        communication_clarity: normalize((c + o) / 2.0),
        confidence: normalize((e - n) / 2.0),
        engagement: normalize((e + o + a) / 3.0),
        adaptability: normalize((o - n) / 2.0),
    }
}
