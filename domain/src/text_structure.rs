//! Rule-based text structure analysis of an answer transcript.

use log::*;
use media_ai::AudioAnalysis;
use serde::Serialize;

/// Placeholder transcript used when the audio analysis yielded no text.
pub const EMPTY_TRANSCRIPT: &str = "No transcript available";

/// Structured answers score at or above this value.
pub const STRUCTURED_THRESHOLD: f64 = 50.0;

const TRANSITION_PHRASES: [&str; 16] = [
    "first",
    "second",
    "third",
    "finally",
    "consequently",
    "in conclusion",
    "for example",
    "moreover",
    "however",
    "therefore",
    "in addition",
    "furthermore",
    "thus",
    "meanwhile",
    "nevertheless",
    "subsequently",
];

const INTRO_MARKERS: [&str; 6] = ["introduce", "begin", "start", "first", "today", "topic"];

const CONCLUSION_MARKERS: [&str; 6] = [
    "conclude",
    "conclusion",
    "summary",
    "finally",
    "in summary",
    "to sum up",
];

/// Breakdown of the structural signals found in a transcript.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StructureDetails {
    pub paragraph_count: usize,
    /// Sentences per paragraph, integer division.
    pub avg_paragraph_length: usize,
    pub transition_words: usize,
    pub has_intro: bool,
    pub has_conclusion: bool,
    /// Not measured yet; always 0.
    pub sentence_variety: u32,
}

/// Text structure result for one answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStructure {
    /// Cleaned transcript the analysis ran on.
    pub transcript: String,
    /// Rule-based score in [0, 100].
    pub rule_score: f64,
    /// Coherence score reported by the text coherence collaborator.
    pub coherence_score: f64,
    /// Mean of the rule-based and coherence scores.
    pub prediction_score: f64,
    /// 1 when `prediction_score` reaches the structured threshold, else 0.
    pub binary_prediction: u8,
    pub details: StructureDetails,
}

impl TextStructure {
    pub fn is_structured(&self) -> bool {
        self.binary_prediction == 1
    }
}

/// Concatenates the segment texts in provider order and cleans the result.
pub fn transcript(audio: &AudioAnalysis) -> String {
    let raw: String = audio
        .sentiment_analysis
        .iter()
        .map(|segment| segment.text.as_str())
        .collect();
    let cleaned = clean_text(&raw);
    if cleaned.is_empty() {
        EMPTY_TRANSCRIPT.to_string()
    } else {
        cleaned
    }
}

/// Trims every line and collapses runs of whitespace inside it.
/// Blank lines are kept so paragraph boundaries survive.
pub fn clean_text(text: &str) -> String {
    let lines: Vec<String> = text
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect();
    lines.join("\n").trim().to_string()
}

pub(crate) fn split_paragraphs(text: &str) -> Vec<&str> {
    let mut paragraphs = Vec::new();
    let mut start = 0;
    let mut offset = 0;
    let mut blank_run = false;

    for line in text.split_inclusive('\n') {
        let is_blank = line.trim().is_empty();
        if is_blank && !blank_run && offset > start {
            paragraphs.push(&text[start..offset]);
            blank_run = true;
        }
        if !is_blank && blank_run {
            start = offset;
            blank_run = false;
        }
        offset += line.len();
    }
    if !blank_run && offset > start {
        paragraphs.push(&text[start..offset]);
    }

    paragraphs
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

pub(crate) fn count_sentences(paragraph: &str) -> usize {
    paragraph
        .split(['.', '!', '?'])
        .filter(|sentence| !sentence.trim().is_empty())
        .count()
}

/// Scores the structure of `text` with the rule-based heuristics.
pub fn analyze_rules(text: &str) -> (f64, StructureDetails) {
    let paragraphs = split_paragraphs(text);
    let paragraph_count = paragraphs.len();

    let avg_paragraph_length = if paragraph_count > 0 {
        let total_sentences: usize = paragraphs.iter().map(|p| count_sentences(p)).sum();
        total_sentences / paragraph_count
    } else {
        0
    };

    let lower = text.to_lowercase();
    let transition_words = TRANSITION_PHRASES
        .iter()
        .filter(|phrase| lower.contains(*phrase))
        .count();

    let first = paragraphs.first().map(|p| p.to_lowercase()).unwrap_or_default();
    let last = paragraphs.last().map(|p| p.to_lowercase()).unwrap_or_default();
    let has_intro = INTRO_MARKERS.iter().any(|m| first.contains(m));
    let has_conclusion = CONCLUSION_MARKERS.iter().any(|m| last.contains(m));

    let mut score = 0.0;
    if (3..=5).contains(&paragraph_count) {
        score += 30.0;
    } else if paragraph_count > 1 {
        score += 15.0;
    }
    if (2..=5).contains(&avg_paragraph_length) {
        score += 15.0;
    } else if avg_paragraph_length > 0 {
        score += 5.0;
    }
    score += (transition_words as f64 * 5.0).min(20.0);
    if has_intro {
        score += 15.0;
    }
    if has_conclusion {
        score += 20.0;
    }

    let details = StructureDetails {
        paragraph_count,
        avg_paragraph_length,
        transition_words,
        has_intro,
        has_conclusion,
        sentence_variety: 0,
    };
    (score.clamp(0.0, 100.0), details)
}

/// Blends the rule-based score with the coherence collaborator's score.
pub fn analyze(transcript: String, coherence_score: f64) -> TextStructure {
    let (rule_score, details) = analyze_rules(&transcript);
    let prediction_score = (rule_score + coherence_score) / 2.0;
    let binary_prediction = u8::from(prediction_score >= STRUCTURED_THRESHOLD);

    debug!(
        "Text structure: rule score {rule_score}, coherence {coherence_score}, blended {prediction_score}"
    );

    TextStructure {
        transcript,
        rule_score,
        coherence_score,
        prediction_score,
        binary_prediction,
        details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use media_ai::{Sentiment, SentimentSegment};

    fn segment(text: &str) -> SentimentSegment {
        SentimentSegment {
            text: text.to_string(),
            sentiment: Sentiment::Neutral,
            confidence: 0.9,
            start_ms: 0,
            end_ms: 100,
        }
    }

    #[test]
    fn test_transcript_concatenates_without_separator() {
        let audio = AudioAnalysis {
            sentiment_analysis: vec![segment("Testing."), segment("  Once   again.")],
            ..Default::default()
        };
        assert_eq!(transcript(&audio), "Testing. Once again.");
    }

    #[test]
    fn test_empty_transcript_is_replaced() {
        assert_eq!(transcript(&AudioAnalysis::default()), EMPTY_TRANSCRIPT);
    }

    #[test]
    fn test_clean_text_keeps_blank_lines() {
        let cleaned = clean_text("  Hello   world \n\n   next\tline  ");
        assert_eq!(cleaned, "Hello world\n\nnext line");
    }

    #[test]
    fn test_well_structured_answer_scores_high() {
        let text = "Today I will introduce the project. It was large.\n\n\
                    First we planned the work. However the budget was tight.\n\n\
                    In addition we hired help. Moreover we shipped early.\n\n\
                    In conclusion it went well. We learned a lot.";
        let (score, details) = analyze_rules(text);

        assert_eq!(details.paragraph_count, 4);
        assert_eq!(details.avg_paragraph_length, 2);
        assert!(details.has_intro);
        assert!(details.has_conclusion);
        // first, however, in addition, moreover, in conclusion
        assert_eq!(details.transition_words, 5);
        assert_eq!(score, 100.0);
    }

    #[test]
    fn test_single_sentence_scores_low() {
        let (score, details) = analyze_rules("I did a thing");
        assert_eq!(details.paragraph_count, 1);
        assert_eq!(details.avg_paragraph_length, 1);
        assert_eq!(details.sentence_variety, 0);
        assert_eq!(score, 5.0);
    }

    #[test]
    fn test_empty_text_scores_zero() {
        let (score, details) = analyze_rules("");
        assert_eq!(score, 0.0);
        assert_eq!(details, StructureDetails::default());
    }

    #[test]
    fn test_paragraphs_split_on_whitespace_only_lines() {
        let (_, details) = analyze_rules("One.\n  \t\nTwo.\r\n\r\nThree.");
        assert_eq!(details.paragraph_count, 3);
    }

    #[test]
    fn test_score_non_decreasing_in_transition_count() {
        let mut previous = 0.0;
        let mut text = String::from("plain words");
        for phrase in TRANSITION_PHRASES {
            text.push(' ');
            text.push_str(phrase);
            let (score, _) = analyze_rules(&text);
            assert!(score >= previous, "score dropped after adding {phrase}");
            previous = score;
        }
    }

    #[test]
    fn test_blend_is_unconditional_mean() {
        let structure = analyze("I did a thing".to_string(), 95.0);
        assert_eq!(structure.rule_score, 5.0);
        assert_eq!(structure.prediction_score, 50.0);
        assert!(structure.is_structured());

        let structure = analyze("I did a thing".to_string(), 10.0);
        assert_eq!(structure.binary_prediction, 0);
    }
}
