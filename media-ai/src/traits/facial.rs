//! Facial emotion detection provider trait.

use crate::types::facial::FacialAnalysis;
use crate::types::Content;
use crate::Error;
use async_trait::async_trait;

/// Abstraction for video emotion detectors.
///
/// Implementations sample frames of the recorded answer and score every
/// emotion category per sampled frame. Sampling rate and detector model are
/// implementation details; only the per-frame timeline is consumed.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait Provider: Send + Sync {
    /// Detect facial emotions across the sampled frames of the recorded answer.
    async fn detect(&self, content: &Content) -> std::result::Result<FacialAnalysis, Error>;
}
