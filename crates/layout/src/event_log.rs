//! Bounded trace of user-driven layout actions.
//!
//! Append-only with FIFO eviction at [`MAX_EVENTS`]. The log is context for
//! diagnostics and the assistant; it is never replayed.

use std::collections::VecDeque;

use storefront_core::ActionEvent;
use tracing::info;

/// Default cap on retained events.
pub const MAX_EVENTS: usize = 100;

#[derive(Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<ActionEvent>,
    max_entries: usize,
}

impl EventLog {
    pub fn new() -> Self {
        Self::with_max_entries(MAX_EVENTS)
    }

    pub fn with_max_entries(max: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries: max,
        }
    }

    /// Rebuild a log from a persisted sequence, keeping only the newest entries.
    pub fn from_events(events: Vec<ActionEvent>) -> Self {
        let mut log = Self::new();
        log.entries.extend(events);
        log.evict();
        log
    }

    /// Append an event, dropping the oldest past the cap.
    pub fn record(&mut self, event: ActionEvent) {
        info!(
            target: "storefront_layout::events",
            action = %event.action,
            component = %event.component_id,
            "[Layout Event]"
        );
        self.entries.push_back(event);
        self.evict();
    }

    fn evict(&mut self) {
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }

    /// Full sequence, oldest first.
    pub fn events(&self) -> Vec<ActionEvent> {
        self.entries.iter().cloned().collect()
    }

    pub fn last(&self) -> Option<&ActionEvent> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}
