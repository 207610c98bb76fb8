use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::app_state::App;
use crate::search::SuggestionPanel;
use crate::theme;

macro_rules! hints {
    ($($key:literal => $desc:literal),+ $(,)?) => {
        vec![$(($key, $desc)),+]
    };
}

impl App {
    pub fn render(&mut self, frame: &mut Frame) {
        let layout = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

        frame.render_widget(&self.input.textarea, layout[0]);
        render_suggestions(self, frame, layout[1]);
        render_help_line(self, frame, layout[2]);
    }
}

fn render_suggestions(app: &App, frame: &mut Frame, area: Rect) {
    let panel = app.search.panel();

    let title = match panel {
        SuggestionPanel::Rows(rows) => format!(" Suggestions ({}) ", rows.len()),
        _ => " Suggestions ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(
            title,
            Style::default().fg(theme::suggestions::TITLE),
        ))
        .border_style(Style::default().fg(theme::suggestions::BORDER));

    if let Some(message) = panel.message() {
        let color = match panel {
            SuggestionPanel::Loading => theme::suggestions::LOADING,
            SuggestionPanel::Error => theme::suggestions::ERROR,
            _ => theme::suggestions::MESSAGE,
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(
            format!(" {}", message),
            Style::default().fg(color),
        )))
        .wrap(Wrap { trim: false })
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = panel
        .rows()
        .iter()
        .map(|suggestion| {
            let mut spans = vec![
                Span::raw(" "),
                Span::styled(suggestion.pretty_name.clone(), theme::suggestions::NAME),
            ];
            if let Some(aliases) = suggestion.aliases_label() {
                spans.push(Span::raw(" "));
                spans.push(Span::styled(aliases, theme::suggestions::ALIASES));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(theme::suggestions::SELECTED_BG));
    let mut state = ListState::default().with_selected(app.selected);
    frame.render_stateful_widget(list, area, &mut state);
}

fn get_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    if app.search.panel().rows().is_empty() {
        hints!["Esc" => "Quit"]
    } else {
        hints!["\u{2191}/\u{2193}" => "Select", "Enter" => "Open", "Esc" => "Quit"]
    }
}

fn build_styled_spans(hints: &[(&'static str, &'static str)]) -> Vec<Span<'static>> {
    let key_style = Style::default().fg(theme::help_line::KEY);
    let desc_style = Style::default().fg(theme::help_line::DESCRIPTION);
    let sep_style = Style::default().fg(theme::help_line::SEPARATOR);

    let mut spans = Vec::with_capacity(hints.len() * 4 + 1);
    spans.push(Span::raw(" "));

    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" \u{2022} ", sep_style));
        }
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(*desc, desc_style));
    }

    spans
}

fn render_help_line(app: &App, frame: &mut Frame, area: Rect) {
    let line = match app.status {
        Some(ref warning) => Line::from(Span::styled(
            format!(" {}", warning),
            Style::default().fg(theme::help_line::WARNING),
        )),
        None => Line::from(build_styled_spans(&get_hints(app))),
    };
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
#[path = "app_render_tests.rs"]
mod app_render_tests;
