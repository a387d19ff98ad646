//! Text coherence provider trait.

use crate::Error;
use async_trait::async_trait;

/// Abstraction for models that judge how coherent and well-structured a transcript is.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait Provider: Send + Sync {
    /// Score the transcript in [0, 100]; higher means more coherent.
    async fn score(&self, text: &str) -> std::result::Result<f64, Error>;
}
