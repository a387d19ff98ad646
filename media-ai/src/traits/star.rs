//! STAR sentence classification provider trait.

use crate::types::star::StarLabel;
use crate::Error;
use async_trait::async_trait;

/// Abstraction for sentence classifiers trained on STAR-method answers.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait Provider: Send + Sync {
    /// Classify a single sentence as Situation, Task, Action or Result.
    async fn classify(&self, sentence: &str) -> std::result::Result<StarLabel, Error>;
}
