//! Media analysis abstraction layer for the collaborators an answer evaluation depends on.
//!
//! This crate provides trait-based abstractions for the external analysis services:
//! - Speech transcription with per-segment sentiment, highlights and topic detection
//! - Facial emotion detection sampled per video frame
//! - Text coherence scoring of a transcript
//! - STAR (Situation, Task, Action, Result) sentence classification
//!
//! The design is provider-agnostic, enabling applications to swap between
//! different service providers (AssemblyAI, DeepFace, recorded results, etc.)
//! without changing the scoring code.

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::Error;
pub use types::audio::{AudioAnalysis, HighlightKeyword, Sentiment, SentimentSegment};
pub use types::facial::{Emotion, FacialAnalysis};
pub use types::report::Report;
pub use types::Content;
