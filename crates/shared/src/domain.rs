use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of one analysis request. Responses for superseded ids are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnalysisId(pub Uuid);

impl AnalysisId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AnalysisId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    /// Anything the server sent that is not one of the three levels above.
    Unknown,
}

impl RiskLevel {
    /// Exact, case-sensitive match on the wire value. Missing values are `Unknown`.
    pub fn from_wire(value: Option<&str>) -> Self {
        match value {
            Some("low") => Self::Low,
            Some("medium") => Self::Medium,
            Some("high") => Self::High,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayState {
    Positive,
    Intermediate,
    Concerning,
    Drift,
}

impl DisplayState {
    pub const ALL: [DisplayState; 4] = [
        DisplayState::Positive,
        DisplayState::Intermediate,
        DisplayState::Concerning,
        DisplayState::Drift,
    ];

    pub fn index(self) -> usize {
        match self {
            Self::Positive => 0,
            Self::Intermediate => 1,
            Self::Concerning => 2,
            Self::Drift => 3,
        }
    }

    pub fn status_label(self) -> &'static str {
        match self {
            Self::Concerning => "Concerning patterns detected",
            Self::Intermediate => "Depressing patterns detected",
            Self::Positive => "No concerning patterns",
            Self::Drift => "Data Drift detected",
        }
    }

    pub fn status_class(self) -> StatusClass {
        match self {
            Self::Concerning => StatusClass::Red,
            Self::Intermediate => StatusClass::Yellow,
            Self::Positive => StatusClass::Green,
            Self::Drift => StatusClass::Purple,
        }
    }

    pub fn panel_title(self) -> &'static str {
        match self {
            Self::Positive => "No concerning patterns found",
            Self::Intermediate => "Some depressive patterns found",
            Self::Concerning => "Concerning patterns found",
            Self::Drift => "Data drift detected",
        }
    }

    pub fn panel_body(self) -> &'static str {
        match self {
            Self::Positive => {
                "The message does not show signs commonly associated with risk. Keep checking in with the people around you."
            }
            Self::Intermediate => {
                "The message shows some patterns associated with low mood. Consider reaching out and offering support."
            }
            Self::Concerning => {
                "The message shows patterns associated with elevated risk. Please reach out to a professional or a crisis line."
            }
            Self::Drift => {
                "The input differs from what the model was trained on, so no reliable classification is available."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusClass {
    Green,
    Yellow,
    Red,
    Purple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Image,
    Log,
}

impl AssetKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Log => "log",
        }
    }
}
