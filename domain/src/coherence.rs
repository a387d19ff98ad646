//! Deterministic stand-in for the text coherence model.

use async_trait::async_trait;
use log::*;
use media_ai::traits::coherence::Provider;
use media_ai::Error;

/// Scores coherence from transcript length, sentence count and paragraph count.
///
/// Empty text scores 10. Otherwise the score is
/// `min(chars / 100, 50) + min(sentences * 5, 25) + min(paragraphs * 10, 25)`,
/// capped at 95. Sentences are the pieces between `.` and paragraphs the pieces
/// between blank lines, empty pieces included, counted on the untrimmed text.
#[derive(Debug, Clone, Copy, Default)]
pub struct LengthHeuristic;

impl LengthHeuristic {
    pub const EMPTY_SCORE: f64 = 10.0;
    pub const MAX_SCORE: f64 = 95.0;

    pub fn evaluate(text: &str) -> f64 {
        if text.is_empty() {
            return Self::EMPTY_SCORE;
        }
        let sentences = text.split('.').count();
        let paragraphs = text.split("\n\n").count();

        let length_points = (text.chars().count() as f64 / 100.0).min(50.0);
        let sentence_points = (sentences as f64 * 5.0).min(25.0);
        let paragraph_points = (paragraphs as f64 * 10.0).min(25.0);
        (length_points + sentence_points + paragraph_points).min(Self::MAX_SCORE)
    }
}

#[async_trait]
impl Provider for LengthHeuristic {
    async fn score(&self, text: &str) -> Result<f64, Error> {
        let score = Self::evaluate(text);
        debug!("Length heuristic coherence score: {score}");
        Ok(score)
    }
}
