use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::Value;
use shared::{
    domain::AssetKind,
    protocol::{
        AnalysisRequest, AnalysisResponse, AssetRequest, FeedbackSubmission, ImagePayload,
        LabelSubmission, LogPayload,
    },
};
use tracing::{debug, info};

pub mod error;
pub mod transport;

pub use error::{AssetError, NetworkError};
pub use transport::{Endpoint, HttpGateway, RequestGateway};

/// Image asset as delivered by the backend, with its decoded bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub name: String,
    pub base64: String,
    pub bytes: Vec<u8>,
}

impl ImageAsset {
    pub fn data_uri(&self) -> String {
        format!("data:image/png;base64,{}", self.base64)
    }

    pub fn alt_text(&self) -> String {
        format!("Visualization: {}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogAsset {
    pub name: String,
    pub text: String,
}

/// Typed facade over a [`RequestGateway`] for the four backend flows.
#[derive(Clone)]
pub struct RiskClient {
    gateway: Arc<dyn RequestGateway>,
}

impl RiskClient {
    pub fn new(gateway: Arc<dyn RequestGateway>) -> Self {
        Self { gateway }
    }

    pub fn connect(base_url: &str) -> Result<Self, NetworkError> {
        Ok(Self::new(Arc::new(HttpGateway::new(base_url)?)))
    }

    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, NetworkError> {
        let body = self
            .gateway
            .send(&Endpoint::Analyze, Some(to_payload(&Endpoint::Analyze, request)?))
            .await?;
        let response = AnalysisResponse::from_value(&body);
        debug!(
            risk = ?response.risk,
            raw_risk = response.raw_risk.as_deref().unwrap_or("<missing>"),
            declared_drift = response.declared_drift(),
            "analysis response received"
        );
        Ok(response)
    }

    pub async fn submit_feedback(&self, submission: &FeedbackSubmission) -> Result<(), NetworkError> {
        self.gateway
            .send(
                &Endpoint::Feedback,
                Some(to_payload(&Endpoint::Feedback, submission)?),
            )
            .await?;
        info!(rating = submission.rating, "feedback submitted");
        Ok(())
    }

    pub async fn submit_label(&self, submission: &LabelSubmission) -> Result<(), NetworkError> {
        self.gateway
            .send(&Endpoint::Label, Some(to_payload(&Endpoint::Label, submission)?))
            .await?;
        info!(label = %submission.label, "label correction submitted");
        Ok(())
    }

    pub async fn fetch_image(&self, name: &str) -> Result<ImageAsset, AssetError> {
        let body = self.fetch_asset(AssetKind::Image, name).await?;
        let encoded = serde_json::from_value::<ImagePayload>(body)
            .unwrap_or_default()
            .image_base64
            .filter(|data| !data.trim().is_empty())
            .ok_or_else(|| AssetError::MissingImageData {
                name: name.to_string(),
            })?;
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|err| AssetError::InvalidImageData {
                name: name.to_string(),
                message: err.to_string(),
            })?;
        Ok(ImageAsset {
            name: name.to_string(),
            base64: encoded.trim().to_string(),
            bytes,
        })
    }

    pub async fn fetch_log(&self, name: &str) -> Result<LogAsset, AssetError> {
        let body = self.fetch_asset(AssetKind::Log, name).await?;
        let text = serde_json::from_value::<LogPayload>(body)
            .unwrap_or_default()
            .log_text
            .ok_or_else(|| AssetError::MissingLogText {
                name: name.to_string(),
            })?;
        Ok(LogAsset {
            name: name.to_string(),
            text,
        })
    }

    async fn fetch_asset(&self, kind: AssetKind, name: &str) -> Result<Value, NetworkError> {
        let request = AssetRequest {
            kind,
            name: name.to_string(),
        };
        self.gateway.send(&Endpoint::Asset(request), None).await
    }
}

fn to_payload<T: serde::Serialize>(endpoint: &Endpoint, body: &T) -> Result<Value, NetworkError> {
    serde_json::to_value(body).map_err(|err| NetworkError::Encode {
        endpoint: endpoint.name(),
        message: err.to_string(),
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
