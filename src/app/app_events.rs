use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::Instant;

use super::app_state::App;

impl App {
    pub fn handle_events(&mut self) -> io::Result<()> {
        self.tick_at(Instant::now());

        if event::poll(self.poll_timeout(Instant::now()))? {
            match event::read()? {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    self.handle_key_event(key_event);
                }
                Event::Paste(text) => {
                    self.handle_paste_event(&text);
                }
                Event::Resize(_, _) => self.mark_dirty(),
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_paste_event(&mut self, text: &str) {
        // Field is single-line
        let text = text.replace(['\r', '\n'], " ");
        if self.input.textarea.insert_str(text) {
            self.on_query_changed();
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if is_newline_key(&key) {
            self.activate_selected();
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Down => self.select_next(),
            KeyCode::Up => self.select_previous(),
            _ => {
                if self.input.textarea.input(key) {
                    self.on_query_changed();
                }
            }
        }
    }

    fn select_next(&mut self) {
        let count = self.search.panel().rows().len();
        if count == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i + 1 < count => i + 1,
            Some(_) => 0,
            None => 0,
        });
        self.mark_dirty();
    }

    fn select_previous(&mut self) {
        let count = self.search.panel().rows().len();
        if count == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(0) | None => count - 1,
            Some(i) => i - 1,
        });
        self.mark_dirty();
    }

    /// Navigate to the highlighted row, or the first row when none is highlighted
    fn activate_selected(&mut self) {
        if let Some(path) = self.search.activate(self.selected.unwrap_or(0)) {
            log::debug!("Navigating to {}", path);
            self.navigation = Some(path);
            self.should_quit = true;
        }
    }
}

/// Keys the textarea would turn into a line break; the field is single-line
fn is_newline_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter | KeyCode::Char('\n' | '\r') => true,
        KeyCode::Char('m') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[cfg(test)]
#[path = "app_events_tests.rs"]
mod app_events_tests;
