//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use client_core::{PredictionApi, PredictionClient, SubmissionOutcome};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Starts the worker thread. Predictions are handled one at a time, in order;
/// health checks run as their own tasks so a stalled `/health` never holds
/// up a queued prediction.
pub fn launch(client: PredictionClient, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendUnavailable(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            tracing::info!(api_url = %client.api_url(), "backend worker ready");
            let _ = ui_tx.try_send(UiEvent::Info(format!("Using {}", client.api_url())));
            run_worker(client, cmd_rx, ui_tx).await;
        });
    });
}

async fn run_worker<A>(api: A, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>)
where
    A: PredictionApi + Clone + 'static,
{
    while let Ok(cmd) = cmd_rx.recv() {
        if cmd == BackendCommand::CheckHealth {
            let api = api.clone();
            let ui_tx = ui_tx.clone();
            tokio::spawn(async move {
                let event = handle_command(&api, BackendCommand::CheckHealth).await;
                if ui_tx.send(event).is_err() {
                    tracing::debug!("ui event receiver dropped before health result");
                }
            });
            continue;
        }

        let event = handle_command(&api, cmd).await;
        if ui_tx.send(event).is_err() {
            tracing::debug!("ui event receiver dropped; stopping backend worker");
            break;
        }
    }
}

pub async fn handle_command<A>(api: &A, cmd: BackendCommand) -> UiEvent
where
    A: PredictionApi + ?Sized,
{
    match cmd {
        BackendCommand::CheckHealth => UiEvent::HealthChecked(api.health().await),
        BackendCommand::Predict { request } => {
            UiEvent::PredictionFinished(SubmissionOutcome::from(api.predict(&request).await))
        }
    }
}
