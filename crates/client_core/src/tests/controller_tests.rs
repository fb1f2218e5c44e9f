use super::*;

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use shared::{
    domain::{ContinuousFeature, IntegerFeature},
    protocol::FeatureCatalog,
};

struct ScriptedApi {
    predict_calls: AtomicUsize,
    sent: Mutex<Vec<PredictionRequest>>,
    reply: fn() -> Result<PredictionResult, ClientError>,
}

impl ScriptedApi {
    fn replying(reply: fn() -> Result<PredictionResult, ClientError>) -> Self {
        Self {
            predict_calls: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
            reply,
        }
    }
}

#[async_trait]
impl PredictionApi for ScriptedApi {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, ClientError> {
        self.predict_calls.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().expect("lock").push(request.clone());
        (self.reply)()
    }

    async fn health(&self) -> Result<HealthResponse, ClientError> {
        Ok(HealthResponse {
            status: Some("healthy".into()),
            model_loaded: true,
            version: Some("1.0.0".into()),
        })
    }

    async fn features(&self) -> Result<FeatureCatalog, ClientError> {
        Ok(FeatureCatalog::new())
    }
}

fn success(prediction: f64, message: Option<&str>) -> SubmissionOutcome {
    SubmissionOutcome::Success(PredictionResult {
        prediction,
        status: Some("success".into()),
        message: message.map(str::to_string),
    })
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[test]
fn begin_submission_disables_trigger_and_clears_panels() {
    let mut controller = FormController::default();
    let t0 = Instant::now();
    controller.apply_health(
        Ok(HealthResponse {
            status: None,
            model_loaded: false,
            version: None,
        }),
        t0,
    );
    assert!(controller.error_panel().is_some());

    let request = controller.begin_submission().expect("request");
    assert_eq!(request, PredictionRequest::default());
    assert!(controller.is_submitting());
    assert!(controller.error_panel().is_none());
    assert!(controller.result_panel().is_none());

    assert_eq!(controller.begin_submission(), None);
}

#[test]
fn request_is_built_from_current_form_values() {
    let mut controller = FormController::default();
    controller.form_mut().set_integer(IntegerFeature::Hour, 6);
    controller
        .form_mut()
        .set_continuous(ContinuousFeature::Humidity, 0.9);

    let request = controller.begin_submission().expect("request");
    assert_eq!(request.hr, 6);
    assert_eq!(request.hum, 0.9);
}

#[test]
fn success_shows_message_count_up_and_delayed_gauge() {
    let mut controller = FormController::default();
    let t0 = Instant::now();
    controller.begin_submission().expect("request");
    controller.complete_submission(success(250.0, Some("X")), t0);

    assert_eq!(controller.state(), SubmissionState::Idle);
    assert!(controller.error_panel().is_none());
    let panel = controller.result_panel().expect("result panel");
    assert_eq!(panel.message(), "X");
    assert_eq!(panel.prediction(), 250.0);
    assert_eq!(panel.gauge_target_percent(), 31.25);

    assert_eq!(panel.displayed_value(t0), 0);
    assert_eq!(panel.displayed_value(t0 + ms(600)), 250);
    assert_eq!(panel.gauge_percent(t0 + ms(100)), 0.0);
    assert_eq!(panel.gauge_percent(t0 + ms(1_000)), 31.25);
    assert!(controller.is_animating(t0 + ms(100)));
    assert!(!controller.is_animating(t0 + ms(1_000)));
    assert_eq!(panel.opacity(t0 + ms(600)), 1.0);
}

#[test]
fn missing_or_empty_message_uses_generated_fallback() {
    let mut controller = FormController::default();
    controller.begin_submission().expect("request");
    controller.complete_submission(success(250.0, None), Instant::now());
    assert_eq!(
        controller.result_panel().expect("panel").message(),
        "Predicted 250 bike rentals for the given conditions."
    );

    controller.begin_submission().expect("request");
    controller.complete_submission(success(7.0, Some("")), Instant::now());
    assert_eq!(
        controller.result_panel().expect("panel").message(),
        "Predicted 7 bike rentals for the given conditions."
    );
}

#[test]
fn large_predictions_fill_the_gauge() {
    let mut controller = FormController::default();
    controller.begin_submission().expect("request");
    controller.complete_submission(success(977.0, None), Instant::now());
    assert_eq!(
        controller.result_panel().expect("panel").gauge_target_percent(),
        100.0
    );
}

#[test]
fn rejection_shows_detail_or_generic_fallback() {
    let mut controller = FormController::default();
    controller.begin_submission().expect("request");
    controller.complete_submission(
        SubmissionOutcome::Rejected {
            status: 404,
            detail: Some("bad input".into()),
        },
        Instant::now(),
    );
    assert_eq!(controller.state(), SubmissionState::Idle);
    assert_eq!(controller.error_panel().expect("error").message(), "bad input");
    assert!(controller.result_panel().is_none());

    controller.begin_submission().expect("request");
    controller.complete_submission(
        SubmissionOutcome::Rejected {
            status: 500,
            detail: None,
        },
        Instant::now(),
    );
    assert_eq!(
        controller.error_panel().expect("error").message(),
        REJECTED_FALLBACK
    );
}

#[test]
fn failure_shows_fixed_connectivity_message() {
    let mut controller = FormController::default();
    controller.begin_submission().expect("request");
    controller.complete_submission(
        SubmissionOutcome::Failed {
            reason: "connection refused".into(),
        },
        Instant::now(),
    );
    assert_eq!(controller.state(), SubmissionState::Idle);
    assert_eq!(
        controller.error_panel().expect("error").message(),
        "Unable to connect to the server. Please ensure the API is running."
    );
}

#[test]
fn outcome_conversion_maps_error_kinds() {
    let rejected = SubmissionOutcome::from(Err(ClientError::Rejected {
        status: 422,
        detail: None,
    }));
    assert_eq!(
        rejected,
        SubmissionOutcome::Rejected {
            status: 422,
            detail: None
        }
    );

    let parse_err = url::Url::parse("::").expect_err("invalid");
    let failed = SubmissionOutcome::from(Err(ClientError::InvalidUrl {
        url: "::".into(),
        source: parse_err,
    }));
    assert!(matches!(failed, SubmissionOutcome::Failed { .. }));
}

#[test]
fn health_reporting_unloaded_model_shows_warning() {
    let mut controller = FormController::default();
    controller.apply_health(
        Ok(HealthResponse {
            status: Some("healthy".into()),
            model_loaded: false,
            version: Some("1.0.0".into()),
        }),
        Instant::now(),
    );
    assert_eq!(
        controller.error_panel().expect("warning").message(),
        MODEL_NOT_LOADED
    );
    assert_eq!(controller.backend_version(), Some("1.0.0"));
}

#[test]
fn healthy_backend_shows_no_panel() {
    let mut controller = FormController::default();
    controller.apply_health(
        Ok(HealthResponse {
            status: Some("healthy".into()),
            model_loaded: true,
            version: None,
        }),
        Instant::now(),
    );
    assert!(controller.error_panel().is_none());
    assert!(controller.result_panel().is_none());
}

#[test]
fn health_failure_is_swallowed() {
    let mut controller = FormController::default();
    controller.apply_health(
        Err(ClientError::Rejected {
            status: 502,
            detail: None,
        }),
        Instant::now(),
    );
    assert!(controller.error_panel().is_none());
    assert_eq!(controller.state(), SubmissionState::Idle);
    assert!(controller.begin_submission().is_some());
}

#[tokio::test]
async fn submit_issues_exactly_one_request() {
    let api = ScriptedApi::replying(|| {
        Ok(PredictionResult {
            prediction: 250.0,
            status: None,
            message: Some("X".into()),
        })
    });
    let mut controller = FormController::default();

    let outcome = controller.submit(&api).await.expect("accepted");
    assert!(matches!(outcome, SubmissionOutcome::Success(_)));
    assert_eq!(api.predict_calls.load(Ordering::SeqCst), 1);
    assert_eq!(api.sent.lock().expect("lock")[0], PredictionRequest::default());
    assert_eq!(controller.result_panel().expect("panel").message(), "X");
}

#[tokio::test]
async fn submit_while_submitting_sends_nothing() {
    let api = ScriptedApi::replying(|| {
        Err(ClientError::Rejected {
            status: 500,
            detail: None,
        })
    });
    let mut controller = FormController::default();
    controller.begin_submission().expect("first");

    assert_eq!(controller.submit(&api).await, None);
    assert_eq!(api.predict_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn ready_health_records_version_without_panel() {
    let api = ScriptedApi::replying(|| {
        Err(ClientError::Rejected {
            status: 500,
            detail: None,
        })
    });
    let mut controller = FormController::default();
    controller.apply_health(api.health().await, Instant::now());
    assert_eq!(controller.backend_version(), Some("1.0.0"));
    assert!(controller.error_panel().is_none());
}
