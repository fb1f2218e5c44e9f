use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    error::ErrorBody,
    protocol::{FeatureCatalog, HealthResponse, PredictionRequest, PredictionResult},
};
use tracing::{debug, info};
use url::Url;

pub mod animation;
pub mod config;
pub mod controller;
pub mod error;
pub mod form;

pub use animation::AnimationTiming;
pub use config::{load_settings, load_settings_with, ClientSettings, ConfigError};
pub use controller::{FormController, SubmissionOutcome, SubmissionState};
pub use error::ClientError;
pub use form::FormState;

/// The prediction service as seen by the form.
#[async_trait]
pub trait PredictionApi: Send + Sync {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, ClientError>;
    async fn health(&self) -> Result<HealthResponse, ClientError>;
    async fn features(&self) -> Result<FeatureCatalog, ClientError>;
}

#[derive(Debug, Clone)]
pub struct PredictionClient {
    http: Client,
    api_url: Url,
}

impl PredictionClient {
    pub fn new(api_url: &str) -> Result<Self, ClientError> {
        let parsed = Url::parse(api_url.trim()).map_err(|source| ClientError::InvalidUrl {
            url: api_url.to_string(),
            source,
        })?;
        Ok(Self {
            http: Client::new(),
            api_url: parsed,
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ClientError> {
        Self::new(&settings.api_url)
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.api_url.as_str().trim_end_matches('/'))
    }

    /// Decodes a 2xx body, or turns any other status into [`ClientError::Rejected`].
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await?;
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|body| body.message());
        Err(ClientError::Rejected {
            status: status.as_u16(),
            detail,
        })
    }
}

#[async_trait]
impl PredictionApi for PredictionClient {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, ClientError> {
        let url = self.endpoint("predict");
        debug!(%url, "posting prediction request");
        let response = self.http.post(url).json(request).send().await?;
        Self::decode(response).await
    }

    /// The body is read whatever the status; a body without `model_loaded`
    /// counts as not ready.
    async fn health(&self) -> Result<HealthResponse, ClientError> {
        let url = self.endpoint("health");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let health: HealthResponse = response.json().await?;
        info!(
            status = status.as_u16(),
            model_loaded = health.model_loaded,
            "health check answered"
        );
        Ok(health)
    }

    async fn features(&self) -> Result<FeatureCatalog, ClientError> {
        let response = self.http.get(self.endpoint("api/features")).send().await?;
        Self::decode(response).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
