//! Error types for the `domain` layer.
use media_ai::Error as MediaAiError;
use serde::Serialize;
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums that represent the kinds of errors that can occur in the domain layer or
/// in the collaborators it calls. The `source` field is used to hold the original
/// error that caused the domain error. Scoring itself never fails: every error
/// in this tree originates from configuration or from an external collaborator.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    Internal(InternalErrorKind),
    External(ExternalErrorKind),
}

/// Enum representing the various kinds of internal errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    Config,
    Serialization,
    Other(String),
}

/// Enum representing the various kinds of external errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum ExternalErrorKind {
    Network,
    /// A collaborator ran (or was reached) and failed to deliver a usable result.
    Collaborator(Collaborator),
    Other(String),
}

/// The external analysis service an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collaborator {
    AudioAnalysis,
    FacialAnalysis,
    TextCoherence,
    StarClassifier,
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Collaborator::AudioAnalysis => write!(f, "audio analysis"),
            Collaborator::FacialAnalysis => write!(f, "facial analysis"),
            Collaborator::TextCoherence => write!(f, "text coherence"),
            Collaborator::StarClassifier => write!(f, "STAR classifier"),
        }
    }
}

/// User-visible failure of one evaluation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    pub errors: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collaborator: Option<Collaborator>,
}

impl Error {
    /// Wraps a collaborator error, tagging it with the collaborator that produced it.
    pub fn collaborator(collaborator: Collaborator, err: MediaAiError) -> Self {
        let error_kind = match &err {
            MediaAiError::Network(_) | MediaAiError::Timeout(_) => {
                DomainErrorKind::External(ExternalErrorKind::Network)
            }
            MediaAiError::Configuration(_) => DomainErrorKind::Internal(InternalErrorKind::Config),
            _ => DomainErrorKind::External(ExternalErrorKind::Collaborator(collaborator)),
        };
        Error {
            source: Some(Box::new(CollaboratorFailure { collaborator, err })),
            error_kind,
        }
    }

    /// Collaborator that caused this error, when known.
    pub fn failed_collaborator(&self) -> Option<Collaborator> {
        if let DomainErrorKind::External(ExternalErrorKind::Collaborator(c)) = &self.error_kind {
            return Some(*c);
        }
        self.source
            .as_ref()
            .and_then(|source| source.downcast_ref::<CollaboratorFailure>())
            .map(|failure| failure.collaborator)
    }

    /// Builds the structured failure returned to the caller instead of an evaluation.
    pub fn report(&self) -> ErrorReport {
        let kind = match &self.error_kind {
            DomainErrorKind::Internal(InternalErrorKind::Config) => "config",
            DomainErrorKind::Internal(InternalErrorKind::Serialization) => "serialization",
            DomainErrorKind::Internal(InternalErrorKind::Other(_)) => "internal",
            DomainErrorKind::External(ExternalErrorKind::Network) => "network",
            DomainErrorKind::External(ExternalErrorKind::Collaborator(_)) => "collaborator",
            DomainErrorKind::External(ExternalErrorKind::Other(_)) => "external",
        };
        let errors = match &self.source {
            Some(source) => source.to_string(),
            None => match &self.error_kind {
                DomainErrorKind::Internal(InternalErrorKind::Other(msg))
                | DomainErrorKind::External(ExternalErrorKind::Other(msg)) => msg.clone(),
                other => format!("{other:?}"),
            },
        };
        ErrorReport {
            errors,
            kind: kind.to_string(),
            collaborator: self.failed_collaborator(),
        }
    }
}

/// Keeps the collaborator name attached to the original error in the source chain.
#[derive(Debug)]
struct CollaboratorFailure {
    collaborator: Collaborator,
    err: MediaAiError,
}

impl fmt::Display for CollaboratorFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} failed: {}", self.collaborator, self.err)
    }
}

impl StdError for CollaboratorFailure {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Domain Error: {self:?}")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Serialization),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // Errors that result from issues building the reqwest::Client instance. This
        // type of error will occur prior to any network calls being made.
        if err.is_builder() {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                    "Failed to build reqwest client".to_string(),
                )),
            }
        } else {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
            }
        }
    }
}
