//! Evaluation of one recorded answer.
//!
//! [`create_answer`] gathers the collaborator results and [`evaluate`] turns them
//! into an [`Evaluation`]. Scoring is synchronous and has no side effects: the same
//! collaborator results always produce the same evaluation.

use crate::aggregate::{self, AggregateInputs, AggregateScore};
use crate::big_five::{self, BigFiveScores, DerivedCompetencies, TraitSignals};
use crate::competency::{self, CompetencyInputs, OverallCompetencyFeedback};
use crate::error::{Collaborator, Error};
use crate::speech_feedback;
use crate::star::{self, StarScores};
use crate::statistics::{self, FacialStatistics};
use crate::text_structure::{self, StructureDetails};
use crate::timeline::{self, TimelineEntry};
use log::*;
use media_ai::traits::{audio, coherence, facial, star as star_traits};
use media_ai::{AudioAnalysis, Content, Emotion, FacialAnalysis, HighlightKeyword, Sentiment};
use serde::Serialize;
use service::config::Config;

/// Tunables of the scoring pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluationOptions {
    /// Hold the aggregate score to [0, 100].
    pub clamp_aggregate_score: bool,
}

impl From<&Config> for EvaluationOptions {
    fn from(config: &Config) -> Self {
        Self {
            clamp_aggregate_score: config.clamp_aggregate_score,
        }
    }
}

/// The providers an evaluation consults.
///
/// STAR classification is optional; without a classifier the evaluation carries no
/// STAR section.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub audio: &'a dyn audio::Provider,
    pub facial: &'a dyn facial::Provider,
    pub coherence: &'a dyn coherence::Provider,
    pub star: Option<&'a dyn star_traits::Provider>,
}

/// Everything scoring needs, already fetched from the collaborators.
#[derive(Debug, Clone, Copy)]
pub struct ScoreInputs<'a> {
    pub audio: &'a AudioAnalysis,
    pub facial: &'a FacialAnalysis,
    pub coherence_score: f64,
    pub star_scores: Option<&'a StarScores>,
}

/// Feedback report for one answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub timeline: Vec<TimelineEntry>,
    pub is_structured: bool,
    pub prediction_score: f64,
    pub structure_details: StructureDetails,
    pub facial_statistics: FacialStatistics,
    pub overall_facial_emotion: Emotion,
    pub overall_sentiment: Sentiment,
    pub top_five_keywords: Vec<HighlightKeyword>,
    pub transcript: String,
    pub big_five: BigFiveScores,
    pub big_five_feedback: Vec<String>,
    pub big_five_derived_competencies: DerivedCompetencies,
    pub competency_feedback: OverallCompetencyFeedback,
    pub speech_feedback: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub star_scores: Option<StarScores>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub star_feedback: Vec<String>,
    pub aggregate_components: AggregateScore,
    pub aggregate_score: f64,
}

/// Scores an answer from its collaborator results.
pub fn evaluate(inputs: &ScoreInputs, options: EvaluationOptions) -> Evaluation {
    let audio = inputs.audio;
    let facial = inputs.facial;

    let structure = text_structure::analyze(text_structure::transcript(audio), inputs.coherence_score);
    let timeline = timeline::fuse(audio.clip_length_seconds, facial, &audio.sentiment_analysis);
    let facial_statistics = statistics::top_three_facial_with_count(facial);
    let overall_facial_emotion = facial_statistics.overall();
    let overall_sentiment = statistics::overall_sentiment(audio);
    let top_five_keywords = statistics::top_five_keywords(audio);

    let big_five = big_five::score(&TraitSignals {
        overall_sentiment,
        top_keywords: &top_five_keywords,
        dominant_emotion: overall_facial_emotion,
        structure_score: structure.prediction_score,
    });
    let competency_feedback = competency::generate(&CompetencyInputs {
        transcript: &structure.transcript,
        structure_score: structure.prediction_score,
        audio,
        facial,
    });
    let aggregate_components = aggregate::compute(
        &AggregateInputs {
            structure_score: structure.prediction_score,
            overall_facial_emotion,
            overall_sentiment,
            timeline: &timeline,
        },
        options.clamp_aggregate_score,
    );

    let star_feedback = inputs
        .star_scores
        .map(|scores| star::percentage_feedback(&scores.percentages))
        .unwrap_or_default();

    Evaluation {
        is_structured: structure.is_structured(),
        prediction_score: structure.prediction_score,
        structure_details: structure.details,
        transcript: structure.transcript,
        timeline,
        facial_statistics,
        overall_facial_emotion,
        overall_sentiment,
        top_five_keywords,
        big_five_feedback: big_five::trait_feedback(&big_five),
        big_five_derived_competencies: big_five::derived_competencies(&big_five),
        big_five,
        competency_feedback,
        speech_feedback: speech_feedback::generate(audio),
        star_scores: inputs.star_scores.cloned(),
        star_feedback,
        aggregate_score: aggregate_components.total,
        aggregate_components,
    }
}

/// Runs every collaborator for `content` and scores the answer.
///
/// Collaborators are consulted in turn (facial, audio, coherence, then the optional
/// STAR classifier) and the first failure ends the request without a score.
pub async fn create_answer(
    content: &Content,
    collaborators: Collaborators<'_>,
    options: EvaluationOptions,
) -> Result<Evaluation, Error> {
    info!("Evaluating answer at {}", content.media_url);

    let facial = collaborators
        .facial
        .detect(content)
        .await
        .map_err(|e| Error::collaborator(Collaborator::FacialAnalysis, e))?;
    debug!("Facial analysis: {} frames", facial.total_frames);

    let audio = collaborators
        .audio
        .analyze(content)
        .await
        .map_err(|e| Error::collaborator(Collaborator::AudioAnalysis, e))?;
    debug!(
        "Audio analysis: {} segments, {} highlights",
        audio.sentiment_analysis.len(),
        audio.highlights.len()
    );

    let transcript = text_structure::transcript(&audio);
    let coherence_score = collaborators
        .coherence
        .score(&transcript)
        .await
        .map_err(|e| Error::collaborator(Collaborator::TextCoherence, e))?;

    let star_scores = match collaborators.star {
        Some(classifier) => Some(star::predict_star_scores(&transcript, classifier).await?),
        None => None,
    };

    let evaluation = evaluate(
        &ScoreInputs {
            audio: &audio,
            facial: &facial,
            coherence_score,
            star_scores: star_scores.as_ref(),
        },
        options,
    );
    info!("Answer evaluated, aggregate score {}", evaluation.aggregate_score);
    Ok(evaluation)
}
