//! Tagged collaborator reports.

use crate::Error;
use serde::{Deserialize, Serialize};

/// Outcome of one collaborator analysis as it is handed over by the job layer.
///
/// Serialized with an explicit `status` tag:
/// `{"status": "completed", "result": {...}}` or
/// `{"status": "failed", "errors": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Report<T> {
    Completed { result: T },
    Failed { errors: String },
}

impl<T> Report<T> {
    pub fn is_failed(&self) -> bool {
        matches!(self, Report::Failed { .. })
    }

    /// Converts the report into the collaborator result, mapping a reported
    /// failure onto [`Error::Provider`].
    pub fn into_result(self) -> Result<T, Error> {
        match self {
            Report::Completed { result } => Ok(result),
            Report::Failed { errors } => Err(Error::Provider(errors)),
        }
    }
}

impl<T> From<Result<T, Error>> for Report<T> {
    fn from(result: Result<T, Error>) -> Self {
        match result {
            Ok(result) => Report::Completed { result },
            Err(err) => Report::Failed {
                errors: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::facial::FacialAnalysis;
    use serde_json::json;

    #[test]
    fn test_failed_report_maps_to_provider_error() {
        let report: Report<FacialAnalysis> = serde_json::from_value(json!({
            "status": "failed",
            "errors": "Could not open video file"
        }))
        .unwrap();

        assert!(report.is_failed());
        match report.into_result() {
            Err(Error::Provider(msg)) => assert_eq!(msg, "Could not open video file"),
            other => panic!("Expected provider error, got: {:?}", other),
        }
    }

    #[test]
    fn test_completed_report_yields_result() {
        let report: Report<FacialAnalysis> = serde_json::from_value(json!({
            "status": "completed",
            "result": {"total_frames": 3, "clip_length_seconds": 0.1}
        }))
        .unwrap();

        let analysis = report.into_result().unwrap();
        assert_eq!(analysis.total_frames, 3);
    }

    #[test]
    fn test_report_from_error_keeps_message() {
        let report: Report<u32> = Err(Error::Timeout("gave up".to_string())).into();
        assert_eq!(
            report,
            Report::Failed {
                errors: "Timeout: gave up".to_string()
            }
        );
    }
}
