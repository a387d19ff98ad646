//! AssemblyAI API client for answer transcription.
//!
//! This module provides an HTTP client for the AssemblyAI transcript API. It submits
//! the recorded answer with sentiment analysis, key phrase highlights and topic
//! detection enabled, polls until the transcript is ready and maps the result onto
//! [`AudioAnalysis`].

use crate::error::{DomainErrorKind, Error, InternalErrorKind};
use async_trait::async_trait;
use log::*;
use media_ai::traits::audio::Provider;
use media_ai::types::audio::{IabLabel, IabResult, Timestamp};
use media_ai::{AudioAnalysis, Content, Error as MediaAiError, HighlightKeyword, Sentiment, SentimentSegment};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use service::config::Config;
use std::time::Duration;

/// Seconds to wait when a 429 response carries no usable `Retry-After` header.
const DEFAULT_RETRY_AFTER_SECONDS: u64 = 60;

/// Request to create a new transcription
#[derive(Debug, Serialize)]
pub struct CreateTranscriptRequest {
    pub audio_url: String,
    pub sentiment_analysis: bool,
    pub auto_highlights: bool,
    pub iab_categories: bool,
}

impl CreateTranscriptRequest {
    /// Request with every feature the answer evaluation consumes.
    pub fn for_answer(audio_url: impl Into<String>) -> Self {
        Self {
            audio_url: audio_url.into(),
            sentiment_analysis: true,
            auto_highlights: true,
            iab_categories: true,
        }
    }
}

/// Transcript as returned by the create and get endpoints
#[derive(Debug, Deserialize)]
pub struct TranscriptResponse {
    pub id: String,
    pub status: TranscriptStatus,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub sentiment_analysis_results: Option<Vec<SentimentResult>>,
    #[serde(default)]
    pub auto_highlights_result: Option<AutoHighlightsResult>,
    #[serde(default)]
    pub iab_categories_result: Option<IabCategoriesResult>,
    /// Length of the media in seconds
    #[serde(default)]
    pub audio_duration: Option<f64>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Transcript processing status
#[derive(Debug, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptStatus {
    Queued,
    Processing,
    Completed,
    Error,
}

/// Sentiment analysis result
#[derive(Debug, Deserialize, Clone)]
pub struct SentimentResult {
    pub text: String,
    pub start: i64,
    pub end: i64,
    pub sentiment: Sentiment,
    pub confidence: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TimestampResult {
    pub start: i64,
    pub end: i64,
}

/// Key phrase detected by auto highlights
#[derive(Debug, Deserialize, Clone)]
pub struct HighlightResult {
    pub text: String,
    pub rank: f64,
    pub count: u32,
    #[serde(default)]
    pub timestamps: Vec<TimestampResult>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AutoHighlightsResult {
    #[serde(default)]
    pub results: Vec<HighlightResult>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct IabLabelResult {
    pub label: String,
    pub relevance: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct IabCategoryResult {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub labels: Vec<IabLabelResult>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct IabCategoriesResult {
    #[serde(default)]
    pub results: Vec<IabCategoryResult>,
}

impl From<TranscriptResponse> for AudioAnalysis {
    fn from(transcript: TranscriptResponse) -> Self {
        let sentiment_analysis = transcript
            .sentiment_analysis_results
            .unwrap_or_default()
            .into_iter()
            .map(|s| SentimentSegment {
                text: s.text,
                sentiment: s.sentiment,
                confidence: s.confidence,
                start_ms: s.start,
                end_ms: s.end,
            })
            .collect();

        let highlights = transcript
            .auto_highlights_result
            .unwrap_or_default()
            .results
            .into_iter()
            .map(|h| HighlightKeyword {
                text: h.text,
                rank: h.rank,
                count: h.count,
                timestamps: h
                    .timestamps
                    .into_iter()
                    .map(|t| Timestamp {
                        start_ms: t.start,
                        end_ms: t.end,
                    })
                    .collect(),
            })
            .collect();

        // Only the first topic result is kept; it covers the start of the answer.
        let iab_results = transcript
            .iab_categories_result
            .unwrap_or_default()
            .results
            .into_iter()
            .next()
            .map(|first| IabResult {
                text: first.text,
                labels: first
                    .labels
                    .into_iter()
                    .map(|l| IabLabel {
                        label: l.label,
                        relevance: l.relevance,
                    })
                    .collect(),
            })
            .unwrap_or_default();

        AudioAnalysis {
            sentiment_analysis,
            highlights,
            iab_results,
            clip_length_seconds: transcript.audio_duration.unwrap_or(0.0),
        }
    }
}

/// AssemblyAI API client
pub struct AssemblyAiClient {
    client: reqwest::Client,
    base_url: String,
    poll_interval: Duration,
    max_polls: u32,
}

impl AssemblyAiClient {
    /// Create a new AssemblyAI client with the given API key and base URL
    pub fn new(api_key: &SecretString, base_url: &str) -> Result<Self, Error> {
        let mut headers = reqwest::header::HeaderMap::new();

        let mut header_value = reqwest::header::HeaderValue::from_str(api_key.expose_secret())
            .map_err(|e| {
                warn!("Failed to create auth header: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                        "Invalid API key format".to_string(),
                    )),
                }
            })?;
        header_value.set_sensitive(true);
        headers.insert("authorization", header_value);

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            poll_interval: Duration::from_millis(3000),
            max_polls: 100,
        })
    }

    /// Builds a client from the API key, base URL and polling budget in `config`.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let api_key = config.assembly_ai_api_key().ok_or_else(|| {
            warn!("AssemblyAI API key is not configured");
            Error {
                source: None,
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
            }
        })?;
        let client = Self::new(&SecretString::new(api_key), config.assembly_ai_base_url())?;
        Ok(client.with_polling(
            Duration::from_millis(config.assembly_ai_poll_interval_ms),
            config.assembly_ai_max_polls,
        ))
    }

    pub fn with_polling(mut self, poll_interval: Duration, max_polls: u32) -> Self {
        self.poll_interval = poll_interval;
        self.max_polls = max_polls;
        self
    }

    /// Create a new transcription request
    pub async fn create_transcript(
        &self,
        request: &CreateTranscriptRequest,
    ) -> Result<TranscriptResponse, MediaAiError> {
        let url = format!("{}/transcript", self.base_url);

        debug!(
            "Creating AssemblyAI transcript for audio: {}",
            request.audio_url
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to create AssemblyAI transcript: {:?}", e);
                MediaAiError::Network(e.to_string())
            })?;

        let transcript = Self::parse(response).await?;
        info!("Created AssemblyAI transcript with ID: {}", transcript.id);
        Ok(transcript)
    }

    /// Get the status of a transcript
    pub async fn get_transcript(
        &self,
        transcript_id: &str,
    ) -> Result<TranscriptResponse, MediaAiError> {
        let url = format!("{}/transcript/{}", self.base_url, transcript_id);

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!("Failed to get AssemblyAI transcript: {:?}", e);
            MediaAiError::Network(e.to_string())
        })?;

        Self::parse(response).await
    }

    /// Polls the transcript until it completes, fails or the poll budget runs out.
    pub async fn wait_for_completion(
        &self,
        transcript_id: &str,
    ) -> Result<TranscriptResponse, MediaAiError> {
        for attempt in 1..=self.max_polls {
            let transcript = self.get_transcript(transcript_id).await?;
            match transcript.status {
                TranscriptStatus::Completed => {
                    info!("AssemblyAI transcript {} completed", transcript_id);
                    return Ok(transcript);
                }
                TranscriptStatus::Error => {
                    let message = transcript
                        .error
                        .unwrap_or_else(|| "transcription failed".to_string());
                    error!("AssemblyAI transcript {} failed: {}", transcript_id, message);
                    return Err(MediaAiError::Provider(message));
                }
                TranscriptStatus::Queued | TranscriptStatus::Processing => {
                    trace!(
                        "AssemblyAI transcript {} still {:?} (poll {}/{})",
                        transcript_id,
                        transcript.status,
                        attempt,
                        self.max_polls
                    );
                    tokio::time::sleep(self.poll_interval).await;
                }
            }
        }

        warn!(
            "AssemblyAI transcript {} not ready after {} polls",
            transcript_id, self.max_polls
        );
        Err(MediaAiError::Timeout(format!(
            "transcript {} not completed after {} polls",
            transcript_id, self.max_polls
        )))
    }

    async fn parse(response: reqwest::Response) -> Result<TranscriptResponse, MediaAiError> {
        let status = response.status();
        if status.is_success() {
            return response.json().await.map_err(|e| {
                warn!("Failed to parse AssemblyAI response: {:?}", e);
                MediaAiError::Deserialization(e.to_string())
            });
        }

        match status {
            StatusCode::UNAUTHORIZED => {
                error!("AssemblyAI rejected the API key");
                Err(MediaAiError::Authentication(
                    "AssemblyAI rejected the API key".to_string(),
                ))
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after_seconds = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|value| value.to_str().ok())
                    .and_then(|value| value.trim().parse().ok())
                    .unwrap_or(DEFAULT_RETRY_AFTER_SECONDS);
                warn!("AssemblyAI rate limited, retry after {}s", retry_after_seconds);
                Err(MediaAiError::RateLimited {
                    retry_after_seconds,
                })
            }
            StatusCode::NOT_FOUND => Err(MediaAiError::NotFound(
                response.text().await.unwrap_or_default(),
            )),
            _ => {
                let error_text = response.text().await.unwrap_or_default();
                error!("AssemblyAI API ({}): {}", status, error_text);
                Err(MediaAiError::Provider(format!(
                    "AssemblyAI returned {}: {}",
                    status, error_text
                )))
            }
        }
    }
}

#[async_trait]
impl Provider for AssemblyAiClient {
    async fn analyze(&self, content: &Content) -> Result<AudioAnalysis, MediaAiError> {
        let request = CreateTranscriptRequest::for_answer(&content.media_url);
        let created = self.create_transcript(&request).await?;
        let transcript = match created.status {
            TranscriptStatus::Completed => created,
            _ => self.wait_for_completion(&created.id).await?,
        };
        Ok(transcript.into())
    }
}
