//! Worker-to-UI events and user-facing error modeling.

use client_core::{AssetError, NetworkError};
use shared::{domain::AnalysisId, error::ValidationError, protocol::AnalysisResponse};

use crate::controller::assets::LoadedImage;

pub enum UiEvent {
    Info(String),
    Error(UiError),
    AnalysisCompleted {
        id: AnalysisId,
        response: AnalysisResponse,
    },
    AnalysisFailed {
        id: AnalysisId,
        error: UiError,
    },
    FeedbackSubmitted,
    FeedbackFailed(UiError),
    LabelSubmitted,
    LabelFailed(UiError),
    ImageLoaded {
        name: String,
        result: Result<LoadedImage, UiError>,
    },
    LogLoaded {
        name: String,
        result: Result<String, UiError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    Transport,
    Asset,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Analyze,
    Feedback,
    Label,
    Asset,
    General,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
    detail: Option<String>,
}

impl UiError {
    pub fn validation(context: UiErrorContext, err: &ValidationError) -> Self {
        let message = match (context, err) {
            (UiErrorContext::Label, ValidationError::EmptyMessage) => "Please fill in all fields.",
            _ => err.user_message(),
        };
        Self {
            category: UiErrorCategory::Validation,
            context,
            message: message.to_string(),
            detail: Some(err.to_string()),
        }
    }

    pub fn network(context: UiErrorContext, err: &NetworkError) -> Self {
        let message = match (context, err.is_transport()) {
            (UiErrorContext::Analyze, _) => {
                "Something went wrong while analyzing. Please try again later."
            }
            (UiErrorContext::Feedback, true) => {
                "Failed to send feedback. Please check your internet connection."
            }
            (UiErrorContext::Label, true) => "Failed to submit. Check your network.",
            _ => "Something went wrong. Please try again.",
        };
        Self {
            category: UiErrorCategory::Transport,
            context,
            message: message.to_string(),
            detail: Some(err.to_string()),
        }
    }

    /// One surface for every asset failure, whether the payload was missing
    /// or the request never completed.
    pub fn asset(kind_label: &str, err: &AssetError) -> Self {
        let category = match err {
            AssetError::Network(_) => UiErrorCategory::Transport,
            _ => UiErrorCategory::Asset,
        };
        Self {
            category,
            context: UiErrorContext::Asset,
            message: format!("Failed to load {kind_label}: {err}"),
            detail: None,
        }
    }

    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_ascii_lowercase();
        let category = if lower.contains("invalid") || lower.contains("missing") {
            UiErrorCategory::Validation
        } else if lower.contains("connection")
            || lower.contains("network")
            || lower.contains("disconnected")
            || lower.contains("queue")
            || lower.contains("unavailable")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };
        Self {
            category,
            context,
            message,
            detail: None,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_messages_depend_on_flow_and_failure_kind() {
        let transport = NetworkError::Transport {
            endpoint: "feedback",
            message: "connection refused".into(),
        };
        let status = NetworkError::Status {
            endpoint: "feedback",
            status: 500,
        };

        assert_eq!(
            UiError::network(UiErrorContext::Feedback, &transport).message(),
            "Failed to send feedback. Please check your internet connection."
        );
        assert_eq!(
            UiError::network(UiErrorContext::Feedback, &status).message(),
            "Something went wrong. Please try again."
        );
        assert_eq!(
            UiError::network(UiErrorContext::Analyze, &status).message(),
            "Something went wrong while analyzing. Please try again later."
        );
        assert_eq!(
            UiError::network(UiErrorContext::Label, &status).detail(),
            Some("feedback request returned HTTP 500")
        );
    }

    #[test]
    fn label_form_reports_incomplete_fields() {
        let err = UiError::validation(UiErrorContext::Label, &ValidationError::EmptyMessage);
        assert_eq!(err.message(), "Please fill in all fields.");
        assert_eq!(err.category(), UiErrorCategory::Validation);

        let analyze = UiError::validation(UiErrorContext::Analyze, &ValidationError::EmptyMessage);
        assert_eq!(analyze.message(), "Please enter a message to analyze.");
    }

    #[test]
    fn asset_errors_share_one_surface() {
        let missing = UiError::asset(
            "image",
            &AssetError::MissingImageData {
                name: "CDD".into(),
            },
        );
        assert_eq!(missing.category(), UiErrorCategory::Asset);
        assert_eq!(
            missing.message(),
            "Failed to load image: no image data found in response for 'CDD'"
        );

        let transport = UiError::asset(
            "log",
            &AssetError::Network(NetworkError::Status {
                endpoint: "asset",
                status: 404,
            }),
        );
        assert_eq!(transport.category(), UiErrorCategory::Transport);
        assert_eq!(transport.context(), UiErrorContext::Asset);
    }

    #[test]
    fn classifies_command_queue_disconnect_as_transport_error() {
        let err = UiError::from_message(
            UiErrorContext::General,
            "Backend command processor disconnected; restart the console",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
    }
}
