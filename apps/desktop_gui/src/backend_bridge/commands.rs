//! Backend commands queued from UI to backend worker.

use shared::protocol::PredictionRequest;

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    CheckHealth,
    Predict { request: PredictionRequest },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::CheckHealth => "check_health",
            BackendCommand::Predict { .. } => "predict",
        }
    }
}
