//! Scoring engine for recorded interview answers.
//!
//! The scoring stages (`text_structure`, `timeline`, `statistics`, `big_five`,
//! `competency`, `aggregate`, `speech_feedback`) are pure functions over the
//! collaborator results defined in `media_ai`. `evaluation::create_answer` is the
//! async entry point that gathers those results from the configured providers and
//! hands them to the synchronous core.

pub use media_ai::{AudioAnalysis, Content, Emotion, FacialAnalysis, Report, Sentiment};

pub mod aggregate;
pub mod big_five;
pub mod coherence;
pub mod competency;
pub mod error;
pub mod evaluation;
pub mod gateway;
pub mod speech_feedback;
pub mod star;
pub mod statistics;
pub mod text_structure;
pub mod timeline;

/// Rounds `value` to `places` decimal digits, ties to even.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}
