//! Submission state machine behind the prediction form.
//!
//! The controller never talks to the network on its own: front ends call
//! [`FormController::begin_submission`], send the returned request however
//! they like, then hand the outcome back through
//! [`FormController::complete_submission`]. [`FormController::submit`] wires
//! the two together for callers that can simply await a [`PredictionApi`].

use std::time::{Duration, Instant};

use shared::protocol::{HealthResponse, PredictionRequest, PredictionResult};
use tracing::{error, info, warn};

use crate::{
    animation::{ease_out_cubic, gauge_percent, progress, AnimationTiming, CountUp, GaugeAnimation},
    error::ClientError,
    form::FormState,
    PredictionApi,
};

pub const REJECTED_FALLBACK: &str = "Prediction failed. Please try again.";
pub const CONNECTION_FAILED: &str =
    "Unable to connect to the server. Please ensure the API is running.";
pub const MODEL_NOT_LOADED: &str =
    "Model not loaded. Please run the notebook first to train and save the model.";

pub fn fallback_message(prediction: f64) -> String {
    format!("Predicted {prediction} bike rentals for the given conditions.")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Success(PredictionResult),
    Rejected { status: u16, detail: Option<String> },
    Failed { reason: String },
}

impl From<Result<PredictionResult, ClientError>> for SubmissionOutcome {
    fn from(value: Result<PredictionResult, ClientError>) -> Self {
        match value {
            Ok(result) => SubmissionOutcome::Success(result),
            Err(ClientError::Rejected { status, detail }) => {
                SubmissionOutcome::Rejected { status, detail }
            }
            Err(err) => SubmissionOutcome::Failed {
                reason: err.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultPanel {
    prediction: f64,
    message: String,
    count_up: CountUp,
    gauge: GaugeAnimation,
    shown_at: Instant,
    fade_in: Duration,
}

impl ResultPanel {
    fn new(result: PredictionResult, timing: &AnimationTiming, shown_at: Instant) -> Self {
        let message = result
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| fallback_message(result.prediction));
        Self {
            prediction: result.prediction,
            message,
            count_up: CountUp::new(0.0, result.prediction, timing.count_up, shown_at),
            gauge: GaugeAnimation::new(
                gauge_percent(result.prediction, timing.gauge_max),
                timing,
                shown_at,
            ),
            shown_at,
            fade_in: timing.fade_in,
        }
    }

    pub fn prediction(&self) -> f64 {
        self.prediction
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Number currently shown by the count-up.
    pub fn displayed_value(&self, now: Instant) -> i64 {
        self.count_up.value_at(now)
    }

    pub fn gauge_target_percent(&self) -> f64 {
        self.gauge.target_percent()
    }

    pub fn gauge_percent(&self, now: Instant) -> f64 {
        self.gauge.percent_at(now)
    }

    pub fn opacity(&self, now: Instant) -> f32 {
        ease_out_cubic(progress(self.shown_at, self.fade_in, now)) as f32
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        !self.count_up.is_finished(now)
            || !self.gauge.is_finished(now)
            || progress(self.shown_at, self.fade_in, now) < 1.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorPanel {
    message: String,
    shown_at: Instant,
    fade_in: Duration,
}

impl ErrorPanel {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn opacity(&self, now: Instant) -> f32 {
        ease_out_cubic(progress(self.shown_at, self.fade_in, now)) as f32
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        progress(self.shown_at, self.fade_in, now) < 1.0
    }
}

pub struct FormController {
    form: FormState,
    state: SubmissionState,
    result: Option<ResultPanel>,
    error: Option<ErrorPanel>,
    backend_version: Option<String>,
    timing: AnimationTiming,
}

impl FormController {
    pub fn new(form: FormState, timing: AnimationTiming) -> Self {
        Self {
            form,
            state: SubmissionState::Idle,
            result: None,
            error: None,
            backend_version: None,
            timing,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    pub fn result_panel(&self) -> Option<&ResultPanel> {
        self.result.as_ref()
    }

    pub fn error_panel(&self) -> Option<&ErrorPanel> {
        self.error.as_ref()
    }

    pub fn backend_version(&self) -> Option<&str> {
        self.backend_version.as_deref()
    }

    pub fn timing(&self) -> &AnimationTiming {
        &self.timing
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.result.as_ref().is_some_and(|p| p.is_animating(now))
            || self.error.as_ref().is_some_and(|p| p.is_animating(now))
    }

    /// Enters `Submitting`, clears both panels and returns the payload to send.
    ///
    /// Returns `None` while a submission is already in flight.
    pub fn begin_submission(&mut self) -> Option<PredictionRequest> {
        if self.is_submitting() {
            return None;
        }
        self.state = SubmissionState::Submitting;
        self.result = None;
        self.error = None;
        Some(self.form.to_request())
    }

    pub fn complete_submission(&mut self, outcome: SubmissionOutcome, now: Instant) {
        self.state = SubmissionState::Idle;
        match outcome {
            SubmissionOutcome::Success(result) => {
                info!(prediction = result.prediction, "prediction received");
                self.result = Some(ResultPanel::new(result, &self.timing, now));
            }
            SubmissionOutcome::Rejected { status, detail } => {
                warn!(status, detail = ?detail, "prediction rejected");
                let message = detail
                    .filter(|d| !d.is_empty())
                    .unwrap_or_else(|| REJECTED_FALLBACK.to_string());
                self.show_error(message, now);
            }
            SubmissionOutcome::Failed { reason } => {
                error!("prediction request failed: {reason}");
                self.show_error(CONNECTION_FAILED.to_string(), now);
            }
        }
    }

    /// Applies the startup liveness check. Failures are logged and otherwise ignored.
    pub fn apply_health(&mut self, health: Result<HealthResponse, ClientError>, now: Instant) {
        match health {
            Ok(health) => {
                self.backend_version = health.version.clone();
                if !health.model_loaded {
                    warn!(status = ?health.status, "backend reports model not loaded");
                    self.show_error(MODEL_NOT_LOADED.to_string(), now);
                }
            }
            Err(err) => warn!("health check failed: {err}"),
        }
    }

    pub async fn submit<A>(&mut self, api: &A) -> Option<SubmissionOutcome>
    where
        A: PredictionApi + ?Sized,
    {
        let request = self.begin_submission()?;
        info!(
            season = request.season,
            hr = request.hr,
            weathersit = request.weathersit,
            "submitting prediction request"
        );
        let outcome = SubmissionOutcome::from(api.predict(&request).await);
        self.complete_submission(outcome.clone(), Instant::now());
        Some(outcome)
    }

    fn show_error(&mut self, message: String, now: Instant) {
        self.error = Some(ErrorPanel {
            message,
            shown_at: now,
            fade_in: self.timing.fade_in,
        });
    }
}

impl Default for FormController {
    fn default() -> Self {
        Self::new(FormState::default(), AnimationTiming::default())
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
