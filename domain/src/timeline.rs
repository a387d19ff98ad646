//! Alignment of audio sentiment segments with the per-frame facial emotion timeline.

use log::*;
use media_ai::{Emotion, FacialAnalysis, Sentiment, SentimentSegment};
use serde::Serialize;

/// Frame rate assumed when the clip length is unknown.
pub const DEFAULT_FPS: u32 = 30;

/// One audio segment paired with the dominant facial emotion at its start and end.
///
/// An endpoint is `None` when its time falls outside the facial timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub start_ms: i64,
    pub end_ms: i64,
    pub audio_sentiment: Sentiment,
    pub facial_emotion: (Option<Emotion>, Option<Emotion>),
}

impl TimelineEntry {
    /// Resolved facial endpoints, start first.
    pub fn resolved_emotions(&self) -> impl Iterator<Item = Emotion> {
        [self.facial_emotion.0, self.facial_emotion.1]
            .into_iter()
            .flatten()
    }
}

/// Arg-max emotion of every processed frame.
///
/// Categories are compared in alphabetical order and the first maximum wins, so a
/// frame with all-equal scores resolves to `angry`.
pub fn dominant_emotions(facial: &FacialAnalysis) -> Vec<Emotion> {
    let timeline = facial.timeline.padded(facial.total_frames);
    (0..facial.total_frames)
        .map(|frame| {
            let mut best = Emotion::ALL[0];
            let mut best_score = timeline.value_at(best, frame);
            for emotion in Emotion::ALL.into_iter().skip(1) {
                let score = timeline.value_at(emotion, frame);
                if score > best_score {
                    best = emotion;
                    best_score = score;
                }
            }
            best
        })
        .collect()
}

/// Sampled frames per second of clip, never below 1.
pub fn frames_per_second(total_frames: usize, clip_length_seconds: f64) -> u32 {
    if clip_length_seconds <= 0.0 {
        return DEFAULT_FPS;
    }
    let fps = (total_frames as f64 / clip_length_seconds).round_ties_even();
    if fps.is_finite() && fps >= 1.0 {
        fps as u32
    } else {
        1
    }
}

/// Milliseconds covered by one sampled frame, never below 1.
pub fn interval_length_ms(fps: u32) -> i64 {
    (1000 / i64::from(fps.max(1))).max(1)
}

fn emotion_at(frames: &[Emotion], time_ms: i64, interval_ms: i64) -> Option<Emotion> {
    if time_ms < 0 {
        return None;
    }
    usize::try_from(time_ms / interval_ms)
        .ok()
        .and_then(|index| frames.get(index).copied())
}

/// Fuses the audio segments with the facial timeline.
///
/// Segments are ordered by start time (stable for equal starts). Entries whose
/// start and end both fall outside the facial timeline are dropped; entries with
/// one resolved endpoint are kept.
pub fn fuse(
    clip_length_seconds: f64,
    facial: &FacialAnalysis,
    segments: &[SentimentSegment],
) -> Vec<TimelineEntry> {
    if facial.total_frames == 0 || segments.is_empty() {
        debug!("Nothing to fuse: {} frames, {} segments", facial.total_frames, segments.len());
        return Vec::new();
    }

    let fps = frames_per_second(facial.total_frames, clip_length_seconds);
    let interval_ms = interval_length_ms(fps);
    let frames = dominant_emotions(facial);
    debug!("Fusing at {fps} fps, {interval_ms} ms per frame");

    let mut ordered: Vec<&SentimentSegment> = segments.iter().collect();
    ordered.sort_by_key(|segment| segment.start_ms);

    ordered
        .into_iter()
        .filter_map(|segment| {
            let start = emotion_at(&frames, segment.start_ms, interval_ms);
            let end = emotion_at(&frames, segment.end_ms, interval_ms);
            if start.is_none() && end.is_none() {
                warn!(
                    "Dropping segment {}-{} ms: outside the facial timeline",
                    segment.start_ms, segment.end_ms
                );
                return None;
            }
            if start.is_none() || end.is_none() {
                warn!(
                    "Segment {}-{} ms only partially covered by the facial timeline",
                    segment.start_ms, segment.end_ms
                );
            }
            Some(TimelineEntry {
                start_ms: segment.start_ms,
                end_ms: segment.end_ms,
                audio_sentiment: segment.sentiment,
                facial_emotion: (start, end),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use media_ai::types::facial::EmotionTimelines;

    fn segment(start_ms: i64, end_ms: i64, sentiment: Sentiment) -> SentimentSegment {
        SentimentSegment {
            text: "x".to_string(),
            sentiment,
            confidence: 0.9,
            start_ms,
            end_ms,
        }
    }

    /// 300 frames over 10s: happy for the first 30 frames, sad afterwards.
    fn happy_then_sad() -> FacialAnalysis {
        let mut happy = vec![0.0; 300];
        let mut sad = vec![0.0; 300];
        for (frame, value) in happy.iter_mut().enumerate().take(30) {
            *value = 0.9 - frame as f64 * 0.001;
        }
        for value in sad.iter_mut().skip(30) {
            *value = 0.8;
        }
        FacialAnalysis {
            total_frames: 300,
            clip_length_seconds: 10.0,
            timeline: EmotionTimelines {
                happy,
                sad,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_fps_and_interval() {
        assert_eq!(frames_per_second(300, 10.0), 30);
        // 24.5 and 25.5 frames per second
        assert_eq!(frames_per_second(49, 2.0), 24);
        assert_eq!(frames_per_second(51, 2.0), 26);
        assert_eq!(interval_length_ms(30), 33);
        assert_eq!(frames_per_second(300, 0.0), DEFAULT_FPS);
        assert_eq!(frames_per_second(300, -2.0), DEFAULT_FPS);
        assert_eq!(frames_per_second(1, 100.0), 1);
        assert_eq!(interval_length_ms(5000), 1);
    }

    #[test]
    fn test_segment_resolves_frames_zero_and_thirty() {
        let facial = happy_then_sad();
        let timeline = fuse(10.0, &facial, &[segment(0, 1000, Sentiment::Positive)]);

        assert_eq!(timeline.len(), 1);
        // 1000 / 33 = frame 30, the first sad frame
        assert_eq!(
            timeline[0].facial_emotion,
            (Some(Emotion::Happy), Some(Emotion::Sad))
        );
        assert_eq!(timeline[0].audio_sentiment, Sentiment::Positive);
    }

    #[test]
    fn test_empty_inputs_yield_empty_timeline() {
        let facial = happy_then_sad();
        assert!(fuse(10.0, &facial, &[]).is_empty());

        let no_frames = FacialAnalysis::default();
        assert!(fuse(10.0, &no_frames, &[segment(0, 10, Sentiment::Neutral)]).is_empty());
    }

    #[test]
    fn test_segments_are_sorted_by_start() {
        let facial = happy_then_sad();
        let timeline = fuse(
            10.0,
            &facial,
            &[
                segment(2000, 3000, Sentiment::Negative),
                segment(0, 500, Sentiment::Positive),
                segment(2000, 2500, Sentiment::Neutral),
            ],
        );
        let starts: Vec<(i64, Sentiment)> = timeline
            .iter()
            .map(|e| (e.start_ms, e.audio_sentiment))
            .collect();
        assert_eq!(
            starts,
            vec![
                (0, Sentiment::Positive),
                (2000, Sentiment::Negative),
                (2000, Sentiment::Neutral)
            ]
        );
    }

    #[test]
    fn test_out_of_range_endpoints() {
        let facial = happy_then_sad();
        let timeline = fuse(
            10.0,
            &facial,
            &[
                segment(9_800, 12_000, Sentiment::Neutral),
                segment(20_000, 21_000, Sentiment::Neutral),
                segment(-50, 100, Sentiment::Neutral),
            ],
        );

        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline[0].facial_emotion, (None, Some(Emotion::Happy)));
        assert_eq!(timeline[1].facial_emotion, (Some(Emotion::Sad), None));
    }

    #[test]
    fn test_neutral_pair_is_kept() {
        let facial = FacialAnalysis {
            total_frames: 10,
            clip_length_seconds: 1.0,
            timeline: EmotionTimelines {
                neutral: vec![0.7; 10],
                ..Default::default()
            },
            ..Default::default()
        };
        let timeline = fuse(1.0, &facial, &[segment(0, 500, Sentiment::Neutral)]);
        assert_eq!(
            timeline[0].facial_emotion,
            (Some(Emotion::Neutral), Some(Emotion::Neutral))
        );
    }

    #[test]
    fn test_arg_max_ties_pick_alphabetical_first() {
        let facial = FacialAnalysis {
            total_frames: 2,
            timeline: EmotionTimelines {
                surprise: vec![0.5, 0.5],
                happy: vec![0.5, 0.2],
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            dominant_emotions(&facial),
            vec![Emotion::Happy, Emotion::Surprise]
        );

        let blank = FacialAnalysis {
            total_frames: 1,
            ..Default::default()
        };
        assert_eq!(dominant_emotions(&blank), vec![Emotion::Angry]);
    }
}
