use std::time::{Duration, Instant};

use crate::config::Config;
use crate::input::InputState;
use crate::search::SearchController;

/// Upper bound on how long the event loop blocks waiting for terminal input
pub const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(100);

pub struct App {
    pub input: InputState,
    pub search: SearchController,
    /// Highlighted suggestion row
    pub selected: Option<usize>,
    /// One-line status shown in place of the key hints (config warnings)
    pub status: Option<String>,
    /// Detail path chosen by activating a row
    pub navigation: Option<String>,
    pub should_quit: bool,
    dirty: bool,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            input: InputState::new(),
            search: SearchController::new(&config.search.settings()),
            selected: None,
            status: None,
            navigation: None,
            should_quit: false,
            dirty: true,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn query(&self) -> &str {
        self.input.query()
    }

    /// Navigation target picked by the user, if any
    pub fn navigation(&self) -> Option<&str> {
        self.navigation.as_deref()
    }

    pub fn should_render(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Replace the field text and feed it to the search pipeline
    pub fn set_query(&mut self, text: &str) {
        self.input.set_query(text);
        self.on_query_changed();
    }

    /// Advance timers and drain fetch results; marks dirty when the panel changes
    pub fn tick_at(&mut self, now: Instant) {
        if self.search.tick_at(now) {
            self.on_panel_changed();
        }
    }

    /// How long the event loop may block before the debouncer needs servicing
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        match self.search.next_deadline() {
            Some(deadline) => deadline
                .saturating_duration_since(now)
                .min(EVENT_POLL_TIMEOUT),
            None => EVENT_POLL_TIMEOUT,
        }
    }

    pub(super) fn on_query_changed(&mut self) {
        let query = self.input.query().to_string();
        if self.search.on_input(&query) {
            self.on_panel_changed();
        }
        self.dirty = true;
    }

    pub(super) fn on_panel_changed(&mut self) {
        // Every render replaces the rows wholesale, so an old index means nothing
        self.selected = None;
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_initialization() {
        let app = App::new(&Config::default());

        assert_eq!(app.query(), "");
        assert_eq!(app.selected, None);
        assert_eq!(app.navigation(), None);
        assert!(!app.should_quit());
        assert!(app.should_render());
    }

    #[test]
    fn test_poll_timeout_without_pending_input() {
        let app = App::new(&Config::default());
        assert_eq!(app.poll_timeout(Instant::now()), EVENT_POLL_TIMEOUT);
    }

    #[test]
    fn test_poll_timeout_bounded_by_debounce_deadline() {
        let mut config = Config::default();
        config.search.debounce_ms = 30;
        let mut app = App::new(&config);

        let now = Instant::now();
        let _ = app.search.on_input_at("caf", now);

        assert_eq!(app.poll_timeout(now), Duration::from_millis(30));
        assert_eq!(
            app.poll_timeout(now + Duration::from_millis(50)),
            Duration::ZERO
        );
    }

    #[test]
    fn test_dirty_flag_cycle() {
        let mut app = App::new(&Config::default());
        app.clear_dirty();
        assert!(!app.should_render());

        app.set_query("ca");
        assert!(app.should_render());
        assert_eq!(app.search.input_value(), "ca");
    }
}
