//! Events flowing from the backend worker to the UI, plus status line wording.

use chrono::{DateTime, Local};
use client_core::{ClientError, SubmissionOutcome};
use shared::protocol::HealthResponse;

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    HealthChecked(Result<HealthResponse, ClientError>),
    PredictionFinished(SubmissionOutcome),
    /// The worker could not start; nothing queued will be answered.
    BackendUnavailable(String),
}

/// One-line summary for the status bar.
pub fn outcome_status(outcome: &SubmissionOutcome, at: DateTime<Local>) -> String {
    let time = at.format("%H:%M:%S");
    match outcome {
        SubmissionOutcome::Success(result) => {
            format!("Last prediction: {} rentals at {time}", result.prediction)
        }
        SubmissionOutcome::Rejected { status, .. } => {
            format!("Prediction rejected by server (HTTP {status}) at {time}")
        }
        SubmissionOutcome::Failed { .. } => format!("Server unreachable at {time}"),
    }
}

pub fn health_status(health: &Result<HealthResponse, ClientError>) -> String {
    match health {
        Ok(health) if health.model_loaded => match &health.version {
            Some(version) => format!("Backend ready (v{version})"),
            None => "Backend ready".to_string(),
        },
        Ok(_) => "Backend reachable, model not loaded".to_string(),
        Err(_) => "Health check failed; predictions may still work".to_string(),
    }
}
