//! Types exchanged with media analysis collaborators.

use serde::{Deserialize, Serialize};

pub mod audio;
pub mod facial;
pub mod report;
pub mod star;

/// Identifies the recorded answer artifact every collaborator analyzes.
///
/// The media must already be reachable by the collaborators (a public or
/// pre-signed URL, or a path on a shared volume).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub media_url: String,
}

impl Content {
    pub fn new(media_url: impl Into<String>) -> Self {
        Self {
            media_url: media_url.into(),
        }
    }
}
