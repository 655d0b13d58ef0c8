//! Backend commands queued from UI to backend worker.

use shared::{
    domain::AnalysisId,
    protocol::{AnalysisRequest, AssetRequest, FeedbackSubmission, LabelSubmission},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    Analyze {
        id: AnalysisId,
        request: AnalysisRequest,
    },
    SubmitFeedback(FeedbackSubmission),
    SubmitLabel(LabelSubmission),
    FetchAsset(AssetRequest),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Analyze { .. } => "analyze",
            Self::SubmitFeedback(_) => "submit_feedback",
            Self::SubmitLabel(_) => "submit_label",
            Self::FetchAsset(_) => "fetch_asset",
        }
    }
}
