//! Form orchestration: validation, double-submit gating and result routing for
//! the analyze, feedback, label-correction and asset flows.

use crossbeam_channel::Sender;
use shared::{
    domain::{AnalysisId, AssetKind, DisplayState},
    protocol::{AnalysisRequest, FeedbackSubmission, LabelSubmission},
    risk::map_risk,
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    assets::AssetModalController,
    events::{UiError, UiErrorContext, UiEvent},
    history::HistoryLedger,
    orchestration::dispatch_backend_command,
    presenter::ResultPresenter,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FlowStatus {
    #[default]
    Idle,
    Submitting,
    Failed(UiError),
    Succeeded,
}

impl FlowStatus {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// Message of the last failed attempt, kept until the next submission.
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Self::Failed(err) => Some(err.message()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitButton {
    pub label: &'static str,
    pub enabled: bool,
}

fn submit_button(status: &FlowStatus, idle: &'static str, busy: &'static str) -> SubmitButton {
    if status.is_submitting() {
        SubmitButton {
            label: busy,
            enabled: false,
        }
    } else {
        SubmitButton {
            label: idle,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzePhase {
    Idle,
    Submitting,
    Displayed { state: DisplayState, saved: bool },
    Error,
}

impl AnalyzePhase {
    /// Inline status shown next to the analyze button.
    pub fn hint(self) -> Option<String> {
        match self {
            Self::Idle => None,
            Self::Submitting => Some("Waiting for the classifier...".to_string()),
            Self::Displayed { state, saved } => Some(format!(
                "Showing: {}{}",
                state.status_label(),
                if saved { " (saved to history)" } else { "" }
            )),
            Self::Error => Some("Last analysis failed. Press Analyze to try again.".to_string()),
        }
    }
}

#[derive(Debug, Clone)]
struct PendingAnalysis {
    id: AnalysisId,
    message: String,
}

#[derive(Debug, Clone)]
pub struct DisplayedResult {
    pub id: AnalysisId,
    pub state: DisplayState,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct AnalyzeForm {
    pub message: String,
    status: FlowStatus,
    pending: Option<PendingAnalysis>,
    displayed: Option<DisplayedResult>,
}

impl AnalyzeForm {
    pub fn button(&self) -> SubmitButton {
        submit_button(&self.status, "Analyze message", "Analyzing...")
    }

    pub fn displayed(&self) -> Option<&DisplayedResult> {
        self.displayed.as_ref()
    }
}

#[derive(Debug, Default)]
pub struct FeedbackForm {
    pub rating: String,
    pub comments: String,
    status: FlowStatus,
}

impl FeedbackForm {
    pub fn status(&self) -> &FlowStatus {
        &self.status
    }

    pub fn button(&self) -> SubmitButton {
        submit_button(&self.status, "Submit feedback", "Submitting...")
    }

    fn clear(&mut self) {
        self.rating.clear();
        self.comments.clear();
    }
}

#[derive(Debug, Default)]
pub struct LabelForm {
    pub message: String,
    pub label: Option<String>,
    status: FlowStatus,
}

impl LabelForm {
    pub fn status(&self) -> &FlowStatus {
        &self.status
    }

    pub fn button(&self) -> SubmitButton {
        submit_button(&self.status, "Submit classification", "Submitting...")
    }

    fn clear(&mut self) {
        self.message.clear();
        self.label = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerSeverity {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBanner {
    pub severity: BannerSeverity,
    pub message: String,
}

pub struct FormOrchestrator {
    cmd_tx: Sender<BackendCommand>,
    pub analyze: AnalyzeForm,
    pub feedback: FeedbackForm,
    pub label: LabelForm,
    pub presenter: ResultPresenter,
    pub history: HistoryLedger,
    pub assets: AssetModalController,
    banner: Option<StatusBanner>,
    status_line: String,
}

impl FormOrchestrator {
    pub fn new(cmd_tx: Sender<BackendCommand>) -> Self {
        Self {
            cmd_tx,
            analyze: AnalyzeForm::default(),
            feedback: FeedbackForm::default(),
            label: LabelForm::default(),
            presenter: ResultPresenter::default(),
            history: HistoryLedger::default(),
            assets: AssetModalController::default(),
            banner: None,
            status_line: "Starting backend worker".to_string(),
        }
    }

    pub fn analyze_phase(&self) -> AnalyzePhase {
        if self.analyze.pending.is_some() {
            return AnalyzePhase::Submitting;
        }
        if matches!(self.analyze.status, FlowStatus::Failed(_)) {
            return AnalyzePhase::Error;
        }
        match &self.analyze.displayed {
            Some(result) => AnalyzePhase::Displayed {
                state: result.state,
                saved: !self.presenter.save_control(result.state).enabled(),
            },
            None => AnalyzePhase::Idle,
        }
    }

    pub fn submit_analysis(&mut self) {
        if self.analyze.status.is_submitting() {
            return;
        }
        let request = match AnalysisRequest::new(&self.analyze.message) {
            Ok(request) => request,
            Err(err) => {
                self.show_error(UiError::validation(UiErrorContext::Analyze, &err));
                return;
            }
        };

        let id = AnalysisId::new();
        self.analyze.status = FlowStatus::Submitting;
        self.analyze.pending = Some(PendingAnalysis {
            id,
            message: request.text.clone(),
        });
        if let Err(err) = dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Analyze { id, request },
            UiErrorContext::Analyze,
        ) {
            self.fail_analysis(err);
        }
    }

    fn complete_analysis(&mut self, id: AnalysisId, state: DisplayState) {
        if !self.is_pending_analysis(id) {
            tracing::debug!("ignoring analysis result for superseded request");
            return;
        }
        let Some(pending) = self.analyze.pending.take() else {
            return;
        };
        self.presenter.show(state);
        self.presenter.reset_save_controls();
        self.analyze.displayed = Some(DisplayedResult {
            id,
            state,
            message: pending.message,
        });
        self.analyze.status = FlowStatus::Succeeded;
    }

    fn is_pending_analysis(&self, id: AnalysisId) -> bool {
        self.analyze
            .pending
            .as_ref()
            .is_some_and(|pending| pending.id == id)
    }

    fn fail_analysis(&mut self, err: UiError) {
        self.analyze.pending = None;
        self.analyze.status = FlowStatus::Failed(err.clone());
        self.show_error(err);
    }

    /// Saves the result behind `state`'s panel. A second click on the same
    /// control is a no-op.
    pub fn save_result(&mut self, state: DisplayState) {
        let Some(result) = self.analyze.displayed.as_ref() else {
            return;
        };
        if result.state != state || self.presenter.current_state() != Some(state) {
            return;
        }
        if self.presenter.mark_saved(state) {
            tracing::debug!(analysis = ?result.id, "saving analysis result");
            self.history.record(state, &result.message);
        }
    }

    pub fn submit_feedback(&mut self) {
        if self.feedback.status.is_submitting() {
            return;
        }
        let submission =
            match FeedbackSubmission::from_form(&self.feedback.rating, &self.feedback.comments) {
                Ok(submission) => submission,
                Err(err) => {
                    self.show_error(UiError::validation(UiErrorContext::Feedback, &err));
                    return;
                }
            };

        self.feedback.status = FlowStatus::Submitting;
        if let Err(err) = dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::SubmitFeedback(submission),
            UiErrorContext::Feedback,
        ) {
            self.feedback.status = FlowStatus::Failed(err.clone());
            self.show_error(err);
        }
    }

    pub fn submit_label(&mut self) {
        if self.label.status.is_submitting() {
            return;
        }
        let submission = match LabelSubmission::new(&self.label.message, self.label.label.as_deref())
        {
            Ok(submission) => submission,
            Err(err) => {
                self.show_error(UiError::validation(UiErrorContext::Label, &err));
                return;
            }
        };

        self.label.status = FlowStatus::Submitting;
        if let Err(err) = dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::SubmitLabel(submission),
            UiErrorContext::Label,
        ) {
            self.label.status = FlowStatus::Failed(err.clone());
            self.show_error(err);
        }
    }

    pub fn open_asset(&mut self, kind: AssetKind, name: &str) {
        let request = match self.assets.request(kind, name) {
            Ok(request) => request,
            Err(err) => {
                self.show_error(err);
                return;
            }
        };
        if let Err(err) = dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::FetchAsset(request.clone()),
            UiErrorContext::Asset,
        ) {
            self.assets.fail(&request, err);
        }
    }

    pub fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => {
                self.status_line = message;
            }
            UiEvent::Error(err) => {
                self.status_line = err.message().to_string();
                self.show_error(err);
            }
            UiEvent::AnalysisCompleted { id, response } => {
                let state = map_risk(&response);
                tracing::debug!(
                    state = ?state,
                    raw_risk = ?response.raw_risk,
                    declared_drift = response.declared_drift(),
                    "mapped analysis response"
                );
                self.complete_analysis(id, state);
            }
            UiEvent::AnalysisFailed { id, error } => {
                if self.is_pending_analysis(id) {
                    self.fail_analysis(error);
                }
            }
            UiEvent::FeedbackSubmitted => {
                self.feedback.status = FlowStatus::Succeeded;
                self.feedback.clear();
                self.show_info("Thank you for your feedback!");
            }
            UiEvent::FeedbackFailed(err) => {
                self.feedback.status = FlowStatus::Failed(err.clone());
                self.show_error(err);
            }
            UiEvent::LabelSubmitted => {
                self.label.status = FlowStatus::Succeeded;
                self.label.clear();
                self.show_info("Classification submitted successfully!");
            }
            UiEvent::LabelFailed(err) => {
                self.label.status = FlowStatus::Failed(err.clone());
                self.show_error(err);
            }
            UiEvent::ImageLoaded { name, result } => {
                self.assets.show_image(&name, result);
            }
            UiEvent::LogLoaded { name, result } => {
                self.assets.show_log(&name, result);
            }
        }
    }

    pub fn banner(&self) -> Option<&StatusBanner> {
        self.banner.as_ref()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    pub fn status_line(&self) -> &str {
        &self.status_line
    }

    fn show_error(&mut self, err: UiError) {
        if let Some(detail) = err.detail() {
            tracing::warn!(context = ?err.context(), category = ?err.category(), "{detail}");
        }
        self.banner = Some(StatusBanner {
            severity: BannerSeverity::Error,
            message: err.message().to_string(),
        });
    }

    fn show_info(&mut self, message: &str) {
        self.banner = Some(StatusBanner {
            severity: BannerSeverity::Info,
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
#[path = "tests/forms_tests.rs"]
mod tests;
