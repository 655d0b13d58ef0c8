//! Session-scoped, append-only log of saved results.

use std::collections::VecDeque;

use chrono::{DateTime, Local};
use shared::domain::{DisplayState, StatusClass};

pub const EXCERPT_CHARS: usize = 60;
pub const TRUNCATION_MARKER: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub status_label: &'static str,
    pub status_class: StatusClass,
    pub message_excerpt: String,
    pub recorded_at: DateTime<Local>,
}

impl HistoryEntry {
    pub fn time_label(&self, now: DateTime<Local>) -> String {
        if now.signed_duration_since(self.recorded_at).num_seconds() < 60 {
            "Just now".to_string()
        } else {
            self.recorded_at.format("%H:%M").to_string()
        }
    }
}

/// First `EXCERPT_CHARS` characters, plus the marker iff anything was cut.
pub fn excerpt(message: &str) -> String {
    let mut chars = message.chars();
    let head: String = chars.by_ref().take(EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}{TRUNCATION_MARKER}")
    } else {
        head
    }
}

#[derive(Debug, Default)]
pub struct HistoryLedger {
    entries: VecDeque<HistoryEntry>,
}

impl HistoryLedger {
    pub fn record(&mut self, state: DisplayState, raw_message: &str) {
        self.record_at(state, raw_message, Local::now());
    }

    pub fn record_at(&mut self, state: DisplayState, raw_message: &str, at: DateTime<Local>) {
        self.entries.push_front(HistoryEntry {
            status_label: state.status_label(),
            status_class: state.status_class(),
            message_excerpt: excerpt(raw_message),
            recorded_at: at,
        });
        tracing::info!(state = ?state, entries = self.entries.len(), "result saved to history");
    }

    /// While true the placeholder is shown. Entries are never removed, so
    /// this flips to false at most once per session.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Newest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}
