use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    domain::{AssetKind, RiskLevel},
    error::ValidationError,
};

/// Wire value the backend sends when its drift detector fires.
pub const DECLARED_DRIFT_RISK: &str = "drift_detected";

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub text: String,
}

impl AnalysisRequest {
    pub fn new(text: &str) -> Result<Self, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyMessage);
        }
        Ok(Self {
            text: text.to_string(),
        })
    }
}

/// Classification result. Built from any JSON value without failing: a missing,
/// null or unexpected `risk` field becomes [`RiskLevel::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResponse {
    pub risk: RiskLevel,
    pub raw_risk: Option<String>,
}

impl AnalysisResponse {
    pub fn from_value(value: &Value) -> Self {
        let raw_risk = value
            .get("risk")
            .and_then(Value::as_str)
            .map(str::to_string);
        Self {
            risk: RiskLevel::from_wire(raw_risk.as_deref()),
            raw_risk,
        }
    }

    /// True when the server explicitly reported drift rather than an
    /// unrecognised or missing value.
    pub fn declared_drift(&self) -> bool {
        self.raw_risk.as_deref() == Some(DECLARED_DRIFT_RISK)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackSubmission {
    pub rating: i64,
    pub comments: String,
}

impl FeedbackSubmission {
    /// Validates raw form input. The rating must parse as a whole number in
    /// `MIN_RATING..=MAX_RATING`; comments are optional and trimmed.
    pub fn from_form(raw_rating: &str, comments: &str) -> Result<Self, ValidationError> {
        let raw = raw_rating.trim();
        let rating = raw
            .parse::<i64>()
            .map_err(|_| ValidationError::RatingNotInteger {
                raw: raw.to_string(),
            })?;
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ValidationError::RatingOutOfRange { rating });
        }
        Ok(Self {
            rating,
            comments: comments.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSubmission {
    pub text: String,
    pub label: String,
}

impl LabelSubmission {
    pub fn new(text: &str, label: Option<&str>) -> Result<Self, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyMessage);
        }
        let label = label
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .ok_or(ValidationError::MissingLabel)?;
        Ok(Self {
            text: text.to_string(),
            label: label.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetRequest {
    pub kind: AssetKind,
    pub name: String,
}

impl AssetRequest {
    pub fn new(kind: AssetKind, name: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyAssetName);
        }
        Ok(Self {
            kind,
            name: name.to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImagePayload {
    #[serde(default)]
    pub image_base64: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogPayload {
    #[serde(default)]
    pub log_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_request_trims_and_rejects_blank_text() {
        assert_eq!(
            AnalysisRequest::new("  I feel hopeless \n").expect("valid").text,
            "I feel hopeless"
        );
        assert_eq!(
            AnalysisRequest::new("   ").expect_err("blank"),
            ValidationError::EmptyMessage
        );
    }

    #[test]
    fn feedback_rating_must_be_whole_number_in_range() {
        let ok = FeedbackSubmission::from_form(" 4 ", "  great tool ").expect("valid");
        assert_eq!(ok.rating, 4);
        assert_eq!(ok.comments, "great tool");

        assert_eq!(
            FeedbackSubmission::from_form("6", "").expect_err("too high"),
            ValidationError::RatingOutOfRange { rating: 6 }
        );
        assert_eq!(
            FeedbackSubmission::from_form("0", "").expect_err("too low"),
            ValidationError::RatingOutOfRange { rating: 0 }
        );
        assert!(matches!(
            FeedbackSubmission::from_form("3.5", ""),
            Err(ValidationError::RatingNotInteger { .. })
        ));
        assert!(matches!(
            FeedbackSubmission::from_form("", ""),
            Err(ValidationError::RatingNotInteger { .. })
        ));
    }

    #[test]
    fn feedback_comments_are_optional() {
        let ok = FeedbackSubmission::from_form("1", "").expect("valid");
        assert_eq!(ok.comments, "");
    }

    #[test]
    fn label_submission_needs_text_and_label() {
        assert_eq!(
            LabelSubmission::new("", Some("suicide")).expect_err("no text"),
            ValidationError::EmptyMessage
        );
        assert_eq!(
            LabelSubmission::new("some text", None).expect_err("no label"),
            ValidationError::MissingLabel
        );
        assert_eq!(
            LabelSubmission::new("some text", Some("  ")).expect_err("blank label"),
            ValidationError::MissingLabel
        );
        let ok = LabelSubmission::new(" some text ", Some("non-suicide")).expect("valid");
        assert_eq!(ok.text, "some text");
        assert_eq!(ok.label, "non-suicide");
    }

    #[test]
    fn feedback_serializes_wire_shape() {
        let body = serde_json::to_value(FeedbackSubmission {
            rating: 5,
            comments: "thanks".into(),
        })
        .expect("serialize");
        assert_eq!(body, serde_json::json!({"rating": 5, "comments": "thanks"}));
    }
}
