//! Mapping from classification responses to display states.

use crate::{
    domain::{DisplayState, RiskLevel},
    protocol::AnalysisResponse,
};

/// Total mapping: every response lands in exactly one state. Unrecognised
/// risk values fall through to [`DisplayState::Drift`], which doubles as the
/// explicit drift signal, so there is no separate "unparseable" path.
pub fn map_risk(response: &AnalysisResponse) -> DisplayState {
    match response.risk {
        RiskLevel::High => DisplayState::Concerning,
        RiskLevel::Medium => DisplayState::Intermediate,
        RiskLevel::Low => DisplayState::Positive,
        RiskLevel::Unknown => DisplayState::Drift,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn state_for(value: serde_json::Value) -> DisplayState {
        map_risk(&AnalysisResponse::from_value(&value))
    }

    #[test]
    fn maps_recognised_levels() {
        assert_eq!(state_for(json!({"risk": "high"})), DisplayState::Concerning);
        assert_eq!(state_for(json!({"risk": "medium"})), DisplayState::Intermediate);
        assert_eq!(state_for(json!({"risk": "low"})), DisplayState::Positive);
    }

    #[test]
    fn anything_else_is_drift() {
        for value in [
            json!({"risk": "banana"}),
            json!({"risk": "HIGH"}),
            json!({"risk": null}),
            json!({"risk": 3}),
            json!({}),
            json!(null),
            json!([1, 2]),
            json!({"risk": "drift_detected"}),
        ] {
            assert_eq!(state_for(value.clone()), DisplayState::Drift, "{value}");
        }
    }

    #[test]
    fn distinguishes_declared_drift_from_fallback() {
        let declared = AnalysisResponse::from_value(&json!({"risk": "drift_detected"}));
        let fallback = AnalysisResponse::from_value(&json!({"risk": "banana"}));
        assert!(declared.declared_drift());
        assert!(!fallback.declared_drift());
        assert_eq!(map_risk(&declared), map_risk(&fallback));
    }

    #[test]
    fn every_state_has_a_distinct_status_class() {
        let classes: std::collections::HashSet<_> = DisplayState::ALL
            .iter()
            .map(|state| state.status_class())
            .collect();
        assert_eq!(classes.len(), 4);
    }
}
