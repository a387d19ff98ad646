//! Collaborator results recorded to disk by an earlier analysis run.
//!
//! Each file holds one tagged report, `{"status": "completed", "result": {...}}` or
//! `{"status": "failed", "errors": "..."}`, as written by the analysis workers.

use async_trait::async_trait;
use log::*;
use media_ai::traits::{audio, facial};
use media_ai::{AudioAnalysis, Content, Error as MediaAiError, FacialAnalysis, Report};
use serde::de::DeserializeOwned;
use service::config::Config;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct RecordedResults {
    audio_path: Option<PathBuf>,
    facial_path: Option<PathBuf>,
}

impl RecordedResults {
    pub fn new(audio_path: Option<PathBuf>, facial_path: Option<PathBuf>) -> Self {
        Self {
            audio_path,
            facial_path,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.audio_result_path().map(Path::to_path_buf),
            config.facial_result_path().map(Path::to_path_buf),
        )
    }

    async fn load<T: DeserializeOwned>(path: Option<&Path>, what: &str) -> Result<T, MediaAiError> {
        let path = path.ok_or_else(|| {
            MediaAiError::Configuration(format!("no recorded {what} result configured"))
        })?;
        debug!("Loading recorded {} result from {}", what, path.display());

        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            warn!("Failed to read {}: {:?}", path.display(), e);
            match e.kind() {
                ErrorKind::NotFound => MediaAiError::NotFound(path.display().to_string()),
                _ => MediaAiError::Other(Box::new(e)),
            }
        })?;

        let report: Report<T> = serde_json::from_str(&raw)?;
        if report.is_failed() {
            warn!("Recorded {} result at {} reports a failure", what, path.display());
        }
        report.into_result()
    }
}

#[async_trait]
impl audio::Provider for RecordedResults {
    async fn analyze(&self, content: &Content) -> Result<AudioAnalysis, MediaAiError> {
        trace!("Recorded audio result requested for {}", content.media_url);
        Self::load(self.audio_path.as_deref(), "audio").await
    }
}

#[async_trait]
impl facial::Provider for RecordedResults {
    async fn detect(&self, content: &Content) -> Result<FacialAnalysis, MediaAiError> {
        trace!("Recorded facial result requested for {}", content.media_url);
        Self::load(self.facial_path.as_deref(), "facial").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use media_ai::traits::audio::Provider as _;
    use media_ai::traits::facial::Provider as _;
    use serde_json::json;

    fn write_fixture(name: &str, value: serde_json::Value) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "answer-eval-{}-{}.json",
            std::process::id(),
            name
        ));
        std::fs::write(&path, value.to_string()).unwrap();
        path
    }

    #[tokio::test]
    async fn test_loads_completed_reports() {
        let audio_path = write_fixture(
            "audio-ok",
            json!({
                "status": "completed",
                "result": {
                    "sentiment_analysis": [
                        {"text": "Hi.", "sentiment": "POSITIVE", "confidence": 0.9, "start": 0, "end": 400}
                    ],
                    "clip_length_seconds": 1.5
                }
            }),
        );
        let facial_path = write_fixture(
            "facial-ok",
            json!({
                "status": "completed",
                "result": {"total_frames": 2, "timeline": {"happy": [0.9, 0.8]}}
            }),
        );
        let recorded = RecordedResults::new(Some(audio_path.clone()), Some(facial_path.clone()));
        let content = Content::new("answer.mp4");

        let audio = recorded.analyze(&content).await.unwrap();
        let facial = recorded.detect(&content).await.unwrap();

        assert_eq!(audio.sentiment_analysis.len(), 1);
        assert_eq!(audio.clip_length_seconds, 1.5);
        assert_eq!(facial.total_frames, 2);

        std::fs::remove_file(audio_path).ok();
        std::fs::remove_file(facial_path).ok();
    }

    #[tokio::test]
    async fn test_failed_report_is_provider_error() {
        let path = write_fixture(
            "facial-failed",
            json!({"status": "failed", "errors": "Could not open video file"}),
        );
        let recorded = RecordedResults::new(None, Some(path.clone()));

        let result = recorded.detect(&Content::new("answer.mp4")).await;
        match result {
            Err(MediaAiError::Provider(msg)) => assert_eq!(msg, "Could not open video file"),
            other => panic!("Expected provider error, got: {:?}", other),
        }
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_missing_configuration_and_file() {
        let recorded = RecordedResults::new(None, Some(PathBuf::from("/nonexistent/facial.json")));
        let content = Content::new("answer.mp4");

        assert!(matches!(
            recorded.analyze(&content).await,
            Err(MediaAiError::Configuration(_))
        ));
        assert!(matches!(
            recorded.detect(&content).await,
            Err(MediaAiError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_malformed_report_is_deserialization_error() {
        let path = write_fixture("audio-malformed", json!({"status": "running"}));
        let recorded = RecordedResults::new(Some(path.clone()), None);

        assert!(matches!(
            recorded.analyze(&Content::new("answer.mp4")).await,
            Err(MediaAiError::Deserialization(_))
        ));
        std::fs::remove_file(path).ok();
    }
}
