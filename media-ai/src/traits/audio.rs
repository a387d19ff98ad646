//! Audio analysis provider trait.

use crate::types::audio::AudioAnalysis;
use crate::types::Content;
use crate::Error;
use async_trait::async_trait;

/// Abstraction for speech-to-text services that also classify sentiment.
///
/// Implementations transcribe the answer, attach a sentiment label and
/// confidence to every sentence-level segment, extract highlighted key
/// phrases and detect topics. Supports AssemblyAI or previously recorded results.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait Provider: Send + Sync {
    /// Analyze the audio track of the recorded answer.
    ///
    /// Returns an error when the service reports a failure for this media; callers
    /// must not attempt partial scoring on it.
    async fn analyze(&self, content: &Content) -> std::result::Result<AudioAnalysis, Error>;
}
