//! Plain-language feedback on the transcribed speech.

use media_ai::AudioAnalysis;

/// Segments below this sentiment confidence are flagged as unclear.
const LOW_CONFIDENCE: f64 = 0.6;

fn seconds(ms: i64) -> String {
    format!("{:.2}s", ms as f64 / 1000.0)
}

/// One message per sentiment segment, one per repeated highlight, and one for
/// the most relevant detected topic.
pub fn generate(audio: &AudioAnalysis) -> Vec<String> {
    let mut feedback = Vec::new();

    for segment in &audio.sentiment_analysis {
        let range = format!("{} - {}", seconds(segment.start_ms), seconds(segment.end_ms));
        if segment.confidence < LOW_CONFIDENCE {
            feedback.push(format!(
                "In the segment from {range}, the sentiment confidence was low ({:.2}). \
                 Consider clarifying your message: '{}'.",
                segment.confidence, segment.text
            ));
        } else {
            feedback.push(format!(
                "In the segment from {range}, your sentiment was detected as '{}'. \
                 The text '{}' had a confidence of {:.2}.",
                segment.sentiment, segment.text, segment.confidence
            ));
        }
    }

    for highlight in audio.highlights.iter().filter(|h| h.count > 1) {
        let ranges: Vec<String> = highlight
            .timestamps
            .iter()
            .map(|ts| format!("{} - {}", seconds(ts.start_ms), seconds(ts.end_ms)))
            .collect();
        feedback.push(format!(
            "The phrase '{}' was repeated {} times at these times: {}. \
             Consider varying your language to keep the conversation engaging.",
            highlight.text,
            highlight.count,
            ranges.join(", ")
        ));
    }

    if let Some(topic) = audio
        .iab_results
        .labels
        .iter()
        .max_by(|a, b| a.relevance.total_cmp(&b.relevance))
    {
        feedback.push(format!(
            "The most relevant topic detected was '{}' with a relevance score of {:.2}. \
             Consider this area if it aligns with your intended message.",
            topic.label, topic.relevance
        ));
    }

    feedback
}
