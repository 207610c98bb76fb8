//! Shared test utilities for subsearch
//!
//! This module provides common test fixtures and helper functions
//! used across multiple test modules.

#[cfg(test)]
pub mod test_helpers {
    use std::cell::RefCell;
    use std::sync::{Once, mpsc};
    use std::time::{Duration, Instant};

    use log::{Level, LevelFilter, Log, Metadata, Record};
    use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

    use crate::app::App;
    use crate::config::Config;
    use crate::search::{FetchRequest, FetchResponse, Suggestion};

    /// Lookup response body for "caf"
    pub const CAFFEINE_JSON: &str =
        r#"[{"slug":"caffeine","pretty_name":"Caffeine","aliases":["1,3,7-Trimethylxanthine"]}]"#;

    pub fn caffeine() -> Vec<Suggestion> {
        crate::search::parse_suggestions(CAFFEINE_JSON).unwrap()
    }

    /// Create a test app wired to in-memory channels instead of a worker
    pub fn test_app() -> (
        App,
        UnboundedReceiver<FetchRequest>,
        mpsc::Sender<FetchResponse>,
    ) {
        let mut app = App::new(&Config::default());
        let (request_tx, request_rx) = unbounded_channel();
        let (response_tx, response_rx) = mpsc::channel();
        app.search.set_channels(request_tx, response_rx);
        (app, request_rx, response_tx)
    }

    /// Create a test app whose panel already shows `rows` for `query`
    pub fn app_with_rows(query: &str, rows: Vec<Suggestion>) -> App {
        let (mut app, mut requests, responses) = test_app();
        let start = Instant::now();

        app.set_query(query);
        app.tick_at(start + Duration::from_secs(1));
        let request = requests.try_recv().unwrap();
        responses
            .send(FetchResponse::Success {
                query: request.query,
                request_id: request.request_id,
                suggestions: rows,
            })
            .unwrap();
        app.tick_at(start + Duration::from_secs(2));
        app
    }

    /// Helper to create a key event without modifiers
    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Helper to create a key event with modifiers
    pub fn key_with_mods(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    thread_local! {
        static CAPTURED: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
    }

    /// Logger that records entries per thread so parallel tests stay isolated
    struct CaptureLogger;

    impl Log for CaptureLogger {
        fn enabled(&self, _metadata: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            CAPTURED.with(|c| {
                c.borrow_mut()
                    .push((record.level(), record.args().to_string()))
            });
        }

        fn flush(&self) {}
    }

    static LOGGER: CaptureLogger = CaptureLogger;
    static INIT: Once = Once::new();

    /// Install the capturing logger (once per process) and clear this thread's log
    pub fn capture_logs() {
        INIT.call_once(|| {
            let _ = log::set_logger(&LOGGER);
            log::set_max_level(LevelFilter::Debug);
        });
        CAPTURED.with(|c| c.borrow_mut().clear());
    }

    /// Error-level entries logged on this thread since `capture_logs()`
    pub fn captured_errors() -> Vec<String> {
        captured_at(Level::Error)
    }

    /// Debug-level entries logged on this thread since `capture_logs()`
    pub fn captured_debug() -> Vec<String> {
        captured_at(Level::Debug)
    }

    fn captured_at(wanted: Level) -> Vec<String> {
        CAPTURED.with(|c| {
            c.borrow()
                .iter()
                .filter(|(level, _)| *level == wanted)
                .map(|(_, message)| message.clone())
                .collect()
        })
    }
}
