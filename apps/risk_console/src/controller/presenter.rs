//! Visibility of the four result panels and their save controls.

use shared::domain::DisplayState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveControl {
    saved: bool,
}

impl SaveControl {
    pub fn label(&self) -> &'static str {
        if self.saved {
            "Saved to history"
        } else {
            "Save to history"
        }
    }

    pub fn enabled(&self) -> bool {
        !self.saved
    }
}

/// Sole writer of panel visibility. Exactly one panel is visible once any
/// result has been shown; before that the results region is hidden.
#[derive(Debug, Default)]
pub struct ResultPresenter {
    visible: [bool; 4],
    current: Option<DisplayState>,
    scroll_pending: bool,
    save_controls: [SaveControl; 4],
}

impl ResultPresenter {
    pub fn show(&mut self, state: DisplayState) {
        for panel in DisplayState::ALL {
            self.visible[panel.index()] = panel == state;
        }
        self.current = Some(state);
        self.scroll_pending = true;
        tracing::debug!(state = ?state, "result panel shown");
    }

    pub fn current_state(&self) -> Option<DisplayState> {
        self.current
    }

    pub fn region_visible(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_panel_visible(&self, state: DisplayState) -> bool {
        self.visible[state.index()]
    }

    pub fn visible_panels(&self) -> impl Iterator<Item = DisplayState> + '_ {
        DisplayState::ALL
            .into_iter()
            .filter(|state| self.is_panel_visible(*state))
    }

    /// Returns true once per `show`; the renderer scrolls the region into view.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_pending)
    }

    pub fn save_control(&self, state: DisplayState) -> SaveControl {
        self.save_controls[state.index()]
    }

    /// Flips the control to "saved". Returns false if it was already saved.
    pub fn mark_saved(&mut self, state: DisplayState) -> bool {
        let control = &mut self.save_controls[state.index()];
        if control.saved {
            return false;
        }
        control.saved = true;
        true
    }

    pub fn reset_save_controls(&mut self) {
        self.save_controls = [SaveControl::default(); 4];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_starts_hidden() {
        let presenter = ResultPresenter::default();
        assert!(!presenter.region_visible());
        assert_eq!(presenter.visible_panels().count(), 0);
        assert_eq!(presenter.current_state(), None);
    }

    #[test]
    fn exactly_one_panel_visible_for_every_state() {
        let mut presenter = ResultPresenter::default();
        for state in DisplayState::ALL {
            presenter.show(state);
            assert_eq!(presenter.visible_panels().collect::<Vec<_>>(), vec![state]);
            assert_eq!(presenter.current_state(), Some(state));
            assert!(presenter.region_visible());
        }
    }

    #[test]
    fn switching_states_hides_previous_panel() {
        let mut presenter = ResultPresenter::default();
        presenter.show(DisplayState::Concerning);
        presenter.show(DisplayState::Positive);
        assert!(!presenter.is_panel_visible(DisplayState::Concerning));
        assert!(presenter.is_panel_visible(DisplayState::Positive));
    }

    #[test]
    fn showing_same_state_twice_is_stable() {
        let mut presenter = ResultPresenter::default();
        presenter.show(DisplayState::Drift);
        presenter.show(DisplayState::Drift);
        assert_eq!(
            presenter.visible_panels().collect::<Vec<_>>(),
            vec![DisplayState::Drift]
        );
    }

    #[test]
    fn scroll_request_is_consumed_once_per_show() {
        let mut presenter = ResultPresenter::default();
        assert!(!presenter.take_scroll_request());
        presenter.show(DisplayState::Intermediate);
        assert!(presenter.take_scroll_request());
        assert!(!presenter.take_scroll_request());
    }

    #[test]
    fn save_control_flips_once_and_resets() {
        let mut presenter = ResultPresenter::default();
        assert!(presenter.mark_saved(DisplayState::Positive));
        assert!(!presenter.mark_saved(DisplayState::Positive));
        let control = presenter.save_control(DisplayState::Positive);
        assert!(!control.enabled());
        assert_eq!(control.label(), "Saved to history");
        assert!(presenter.save_control(DisplayState::Drift).enabled());

        presenter.reset_save_controls();
        assert_eq!(
            presenter.save_control(DisplayState::Positive).label(),
            "Save to history"
        );
    }
}
