//! Competency-based feedback: communication clarity, confidence and engagement.

use crate::round_to;
use log::*;
use media_ai::{AudioAnalysis, Emotion, FacialAnalysis};
use serde::Serialize;

const DEFAULT_CONFIDENCE_SCORE: f64 = 4.0;
const DEFAULT_ENGAGEMENT_SCORE: f64 = 3.5;
const MIN_CLIP_LENGTH_SECONDS: f64 = 0.1;

/// Feedback for one competency, scored 0 to 10.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompetencyFeedback {
    pub score: f64,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub recommendations: Vec<String>,
}

impl CompetencyFeedback {
    fn scored(score: f64) -> Self {
        Self {
            score,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallCompetencyFeedback {
    pub communication_clarity: CompetencyFeedback,
    pub confidence: CompetencyFeedback,
    pub engagement: CompetencyFeedback,
    pub overall_score: f64,
    pub summary: String,
    pub key_recommendations: Vec<String>,
}

/// Inputs the competency scores are computed from.
#[derive(Debug, Clone, Copy)]
pub struct CompetencyInputs<'a> {
    pub transcript: &'a str,
    /// Blended text structure score in [0, 100].
    pub structure_score: f64,
    pub audio: &'a AudioAnalysis,
    pub facial: &'a FacialAnalysis,
}

/// Scored from speech rate and structure even when the audio has no segments, in
/// which case the transcript is the placeholder text.
fn communication_clarity(inputs: &CompetencyInputs) -> CompetencyFeedback {
    let clip_length = inputs.audio.clip_length_seconds.max(MIN_CLIP_LENGTH_SECONDS);
    let speech_rate = inputs.transcript.chars().count() as f64 / clip_length;
    let score = round_to(
        (speech_rate * 0.1 + inputs.structure_score * 0.9 / 10.0).min(10.0),
        2,
    );

    let mut feedback = CompetencyFeedback::scored(score);
    if score > 5.0 {
        feedback
            .strengths
            .push("Well-structured and organized response".to_string());
    } else if score < 5.0 {
        feedback
            .areas_for_improvement
            .push("Response structure could be improved".to_string());
        feedback.recommendations.push(
            "Try using the STAR method (Situation, Task, Action, Result) for structuring your answers"
                .to_string(),
        );
    }
    if feedback.recommendations.is_empty() {
        feedback
            .recommendations
            .push("Practice organizing your thoughts before speaking".to_string());
    }
    feedback
}

fn confidence(audio: &AudioAnalysis) -> CompetencyFeedback {
    let score = if audio.sentiment_analysis.is_empty() {
        DEFAULT_CONFIDENCE_SCORE
    } else {
        let total: f64 = audio.sentiment_analysis.iter().map(|s| s.confidence).sum();
        round_to(total.min(10.0), 2)
    };

    let mut feedback = CompetencyFeedback::scored(score);
    if score > 5.0 {
        feedback
            .strengths
            .push("Projected strong confidence throughout your response".to_string());
    } else if score < 5.0 {
        feedback
            .areas_for_improvement
            .push("Confidence level appears lower than optimal".to_string());
        feedback
            .recommendations
            .push("Practice maintaining eye contact and speaking clearly".to_string());
    }
    if feedback.recommendations.is_empty() {
        feedback
            .recommendations
            .push("Continue to work on speaking with confidence".to_string());
    }
    feedback
}

fn engagement(audio: &AudioAnalysis, facial: &FacialAnalysis) -> CompetencyFeedback {
    let emotion_variety = Emotion::ALL
        .iter()
        .filter(|emotion| facial.emotion_sums.get(**emotion) > 0.1)
        .count();
    let keyword_usage = audio
        .highlights
        .iter()
        .filter(|highlight| highlight.rank > 0.5)
        .count();

    let score = if audio.highlights.is_empty() {
        DEFAULT_ENGAGEMENT_SCORE
    } else {
        let variety = (emotion_variety as f64 / 3.0).min(1.0) * 0.3;
        let usage = (keyword_usage as f64 / 10.0).min(1.0) * 0.3;
        round_to(((variety + usage) * 10.0).min(10.0), 2)
    };

    let mut feedback = CompetencyFeedback::scored(score);
    if keyword_usage > 3 {
        feedback.strengths.push("Good keyword usage".to_string());
    } else if keyword_usage < 3 {
        feedback
            .areas_for_improvement
            .push("Try to use more keywords related to the content.".to_string());
        feedback
            .recommendations
            .push("Practice adding emphasis to key points in your responses".to_string());
    }
    if feedback.recommendations.is_empty() {
        feedback
            .recommendations
            .push("Keep your audience engaged by varying your tone and pacing".to_string());
    }
    feedback
}

fn summary(overall_score: f64) -> &'static str {
    if overall_score >= 7.0 {
        "Your response demonstrates strong interview skills with some specific areas to refine."
    } else if overall_score >= 5.0 {
        "Your response has good elements but could benefit from targeted improvements."
    } else {
        "Your response needs development in several key areas to increase interview effectiveness."
    }
}

pub fn generate(inputs: &CompetencyInputs) -> OverallCompetencyFeedback {
    let communication_clarity = communication_clarity(inputs);
    let confidence = confidence(inputs.audio);
    let engagement = engagement(inputs.audio, inputs.facial);

    let mean = (communication_clarity.score + confidence.score + engagement.score) / 3.0;
    let key_recommendations = [&communication_clarity, &confidence, &engagement]
        .iter()
        .flat_map(|feedback| feedback.recommendations.iter().cloned())
        .take(3)
        .collect();

    info!(
        "Competency scores: clarity {}, confidence {}, engagement {}",
        communication_clarity.score, confidence.score, engagement.score
    );

    OverallCompetencyFeedback {
        summary: summary(mean).to_string(),
        overall_score: round_to(mean, 2),
        communication_clarity,
        confidence,
        engagement,
        key_recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text_structure::EMPTY_TRANSCRIPT;
    use media_ai::types::facial::EmotionTotals;
    use media_ai::{HighlightKeyword, Sentiment, SentimentSegment};

    fn segment(confidence: f64) -> SentimentSegment {
        SentimentSegment {
            text: "I led the team.".to_string(),
            sentiment: Sentiment::Positive,
            confidence,
            start_ms: 0,
            end_ms: 1000,
        }
    }

    fn highlight(rank: f64) -> HighlightKeyword {
        HighlightKeyword {
            text: "team".to_string(),
            rank,
            count: 1,
            timestamps: vec![],
        }
    }

    #[test]
    fn test_clarity_from_speech_rate_and_structure() {
        let audio = AudioAnalysis {
            sentiment_analysis: vec![segment(0.9)],
            clip_length_seconds: 10.0,
            ..Default::default()
        };
        let facial = FacialAnalysis::default();
        let transcript = "a".repeat(200);
        let feedback = generate(&CompetencyInputs {
            transcript: &transcript,
            structure_score: 60.0,
            audio: &audio,
            facial: &facial,
        });

        // 20 chars/s * 0.1 + 60 * 0.9 / 10
        assert_eq!(feedback.communication_clarity.score, 7.4);
        assert_eq!(
            feedback.communication_clarity.strengths,
            vec!["Well-structured and organized response"]
        );
        assert_eq!(
            feedback.communication_clarity.recommendations,
            vec!["Practice organizing your thoughts before speaking"]
        );
    }

    #[test]
    fn test_clarity_guards_zero_clip_length() {
        let audio = AudioAnalysis {
            sentiment_analysis: vec![segment(0.9)],
            clip_length_seconds: 0.0,
            ..Default::default()
        };
        let facial = FacialAnalysis::default();
        let feedback = generate(&CompetencyInputs {
            transcript: "abc",
            structure_score: 0.0,
            audio: &audio,
            facial: &facial,
        });
        // 3 chars over the 0.1s floor
        assert_eq!(feedback.communication_clarity.score, 3.0);
    }

    #[test]
    fn test_clarity_without_segments_uses_placeholder_transcript() {
        let audio = AudioAnalysis {
            clip_length_seconds: 5.0,
            ..Default::default()
        };
        let facial = FacialAnalysis::default();
        let feedback = generate(&CompetencyInputs {
            transcript: EMPTY_TRANSCRIPT,
            structure_score: 40.0,
            audio: &audio,
            facial: &facial,
        });

        // 23 chars over 5s * 0.1 + 40 * 0.9 / 10
        assert_eq!(feedback.communication_clarity.score, 4.06);
        assert_eq!(
            feedback.communication_clarity.areas_for_improvement,
            vec!["Response structure could be improved"]
        );
    }

    #[test]
    fn test_defaults_without_inputs() {
        let audio = AudioAnalysis::default();
        let facial = FacialAnalysis::default();
        let feedback = generate(&CompetencyInputs {
            transcript: "",
            structure_score: 0.0,
            audio: &audio,
            facial: &facial,
        });

        assert_eq!(feedback.communication_clarity.score, 0.0);
        assert_eq!(feedback.confidence.score, DEFAULT_CONFIDENCE_SCORE);
        assert_eq!(feedback.engagement.score, DEFAULT_ENGAGEMENT_SCORE);
        assert_eq!(feedback.overall_score, 2.5);
        assert!(feedback.summary.starts_with("Your response needs development"));
        assert_eq!(
            feedback.key_recommendations,
            vec![
                "Try using the STAR method (Situation, Task, Action, Result) for structuring your answers",
                "Practice maintaining eye contact and speaking clearly",
                "Practice adding emphasis to key points in your responses",
            ]
        );
    }

    #[test]
    fn test_confidence_sums_segment_confidence() {
        let audio = AudioAnalysis {
            sentiment_analysis: (0..8).map(|_| segment(0.9)).collect(),
            clip_length_seconds: 30.0,
            ..Default::default()
        };
        let facial = FacialAnalysis::default();
        let feedback = generate(&CompetencyInputs {
            transcript: "x",
            structure_score: 50.0,
            audio: &audio,
            facial: &facial,
        });
        assert_eq!(feedback.confidence.score, 7.2);
        assert_eq!(feedback.confidence.strengths.len(), 1);
        assert_eq!(
            feedback.confidence.recommendations,
            vec!["Continue to work on speaking with confidence"]
        );
    }

    #[test]
    fn test_engagement_from_variety_and_keywords() {
        let audio = AudioAnalysis {
            highlights: vec![
                highlight(0.9),
                highlight(0.8),
                highlight(0.7),
                highlight(0.6),
                highlight(0.2),
            ],
            ..Default::default()
        };
        let facial = FacialAnalysis {
            emotion_sums: EmotionTotals {
                happy: 12.0,
                neutral: 30.0,
                sad: 0.05,
                ..Default::default()
            },
            ..Default::default()
        };
        let feedback = generate(&CompetencyInputs {
            transcript: "",
            structure_score: 0.0,
            audio: &audio,
            facial: &facial,
        });

        // variety 2/3 * 0.3 + usage 4/10 * 0.3, scaled by 10
        assert_eq!(feedback.engagement.score, 3.2);
        assert_eq!(feedback.engagement.strengths, vec!["Good keyword usage"]);
    }
}
