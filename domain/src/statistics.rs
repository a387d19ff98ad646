//! Summary statistics over the facial and audio collaborator results.

use crate::timeline::dominant_emotions;
use media_ai::{AudioAnalysis, Emotion, FacialAnalysis, HighlightKeyword, Sentiment};
use serde::Serialize;
use std::collections::HashMap;

/// The three most frequent dominant facial emotions and their relative frequencies.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacialStatistics {
    pub top_three: [Emotion; 3],
    /// Count of each emotion divided by the summed count of the top three.
    pub frequencies: [f64; 3],
}

impl FacialStatistics {
    /// Most frequent dominant emotion across the clip.
    pub fn overall(&self) -> Emotion {
        self.top_three[0]
    }
}

/// Ranks the per-frame dominant emotions by how many frames they won.
///
/// Equal counts keep alphabetical order. Fewer than three distinct emotions are
/// padded with `neutral` at count 0.
pub fn top_three_facial_with_count(facial: &FacialAnalysis) -> FacialStatistics {
    let mut counts: Vec<(Emotion, usize)> = Emotion::ALL.iter().map(|e| (*e, 0)).collect();
    for emotion in dominant_emotions(facial) {
        if let Some(entry) = counts.iter_mut().find(|(e, _)| *e == emotion) {
            entry.1 += 1;
        }
    }
    counts.retain(|(_, count)| *count > 0);
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(3);
    while counts.len() < 3 {
        counts.push((Emotion::Neutral, 0));
    }

    let total: usize = counts.iter().map(|(_, count)| count).sum();
    let frequency = |count: usize| {
        if total == 0 {
            0.0
        } else {
            count as f64 / total as f64
        }
    };

    FacialStatistics {
        top_three: [counts[0].0, counts[1].0, counts[2].0],
        frequencies: [
            frequency(counts[0].1),
            frequency(counts[1].1),
            frequency(counts[2].1),
        ],
    }
}

/// Most common segment sentiment; ties go to the label seen first.
pub fn overall_sentiment(audio: &AudioAnalysis) -> Sentiment {
    let mut counts: HashMap<Sentiment, usize> = HashMap::new();
    let mut first_seen: Vec<Sentiment> = Vec::new();
    for segment in &audio.sentiment_analysis {
        let count = counts.entry(segment.sentiment).or_insert(0);
        if *count == 0 {
            first_seen.push(segment.sentiment);
        }
        *count += 1;
    }

    let mut overall = Sentiment::Neutral;
    let mut best = 0;
    for sentiment in first_seen {
        let count = counts[&sentiment];
        if count > best {
            overall = sentiment;
            best = count;
        }
    }
    overall
}

/// Up to five highlights with the highest rank, in rank order.
pub fn top_five_keywords(audio: &AudioAnalysis) -> Vec<HighlightKeyword> {
    let mut keywords = audio.highlights.clone();
    keywords.sort_by(|a, b| b.rank.total_cmp(&a.rank));
    keywords.truncate(5);
    keywords
}
