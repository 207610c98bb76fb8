//! Tests for key handling

use super::*;
use crate::search::{FetchRequest, FetchResponse, SearchPhase, Suggestion};
use crate::test_utils::test_helpers::{app_with_rows, key, key_with_mods, test_app};

fn rows() -> Vec<Suggestion> {
    vec![
        Suggestion::new("mdma", "MDMA", &["Molly"]),
        Suggestion::new("mda", "MDA", &[]),
        Suggestion::new("mdai", "MDAI", &[]),
    ]
}

#[test]
fn test_typing_updates_field_and_live_value() {
    let (mut app, _requests, _responses) = test_app();

    app.handle_key_event(key(KeyCode::Char('c')));
    app.handle_key_event(key(KeyCode::Char('a')));

    assert_eq!(app.query(), "ca");
    assert_eq!(app.search.input_value(), "ca");
    assert!(app.search.next_deadline().is_some());
}

#[test]
fn test_backspace_feeds_search() {
    let (mut app, _requests, _responses) = test_app();
    app.set_query("caf");

    app.handle_key_event(key(KeyCode::Backspace));

    assert_eq!(app.query(), "ca");
    assert_eq!(app.search.input_value(), "ca");
}

#[test]
fn test_debounced_typing_dispatches_once() {
    let (mut app, mut requests, _responses) = test_app();
    let t0 = Instant::now();

    for c in "caf".chars() {
        app.handle_key_event(key(KeyCode::Char(c)));
    }
    app.tick_at(t0 + std::time::Duration::from_secs(1));

    let mut sent: Vec<FetchRequest> = Vec::new();
    while let Ok(request) = requests.try_recv() {
        sent.push(request);
    }
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].query, "caf");
    assert_eq!(app.search.phase(), SearchPhase::Resolving);
}

#[test]
fn test_esc_quits_without_navigation() {
    let (mut app, _requests, _responses) = test_app();
    app.handle_key_event(key(KeyCode::Esc));

    assert!(app.should_quit());
    assert_eq!(app.navigation(), None);
}

#[test]
fn test_ctrl_c_quits() {
    let (mut app, _requests, _responses) = test_app();
    app.handle_key_event(key_with_mods(KeyCode::Char('c'), KeyModifiers::CONTROL));

    assert!(app.should_quit());
    assert_eq!(app.query(), "");
}

#[test]
fn test_down_and_up_cycle_selection() {
    let mut app = app_with_rows("md", rows());

    app.handle_key_event(key(KeyCode::Down));
    assert_eq!(app.selected, Some(0));
    app.handle_key_event(key(KeyCode::Down));
    app.handle_key_event(key(KeyCode::Down));
    assert_eq!(app.selected, Some(2));
    app.handle_key_event(key(KeyCode::Down));
    assert_eq!(app.selected, Some(0));

    app.handle_key_event(key(KeyCode::Up));
    assert_eq!(app.selected, Some(2));
}

#[test]
fn test_selection_ignored_without_rows() {
    let (mut app, _requests, _responses) = test_app();
    app.handle_key_event(key(KeyCode::Down));
    assert_eq!(app.selected, None);
}

#[test]
fn test_enter_navigates_to_selected_row() {
    let mut app = app_with_rows("md", rows());
    app.handle_key_event(key(KeyCode::Down));
    app.handle_key_event(key(KeyCode::Down));

    app.handle_key_event(key(KeyCode::Enter));

    assert_eq!(app.navigation(), Some("/substance/mda"));
    assert!(app.should_quit());
}

#[test]
fn test_enter_without_selection_uses_first_row() {
    let mut app = app_with_rows("md", rows());
    app.handle_key_event(key(KeyCode::Enter));
    assert_eq!(app.navigation(), Some("/substance/mdma"));
}

#[test]
fn test_enter_without_rows_does_nothing() {
    let (mut app, _requests, _responses) = test_app();
    app.set_query("c");
    app.handle_key_event(key(KeyCode::Enter));

    assert_eq!(app.navigation(), None);
    assert!(!app.should_quit());
    assert_eq!(app.query(), "c", "Enter must not insert a newline");
}

#[test]
fn test_new_results_reset_selection() {
    let (mut app, mut requests, responses) = test_app();
    let t0 = Instant::now();
    app.set_query("md");
    app.tick_at(t0 + std::time::Duration::from_secs(1));
    let request = requests.try_recv().unwrap();
    responses
        .send(FetchResponse::Success {
            query: request.query,
            request_id: request.request_id,
            suggestions: rows(),
        })
        .unwrap();
    app.tick_at(t0 + std::time::Duration::from_secs(2));
    app.handle_key_event(key(KeyCode::Down));
    assert_eq!(app.selected, Some(0));

    app.set_query("m");
    app.tick_at(t0 + std::time::Duration::from_secs(3));

    assert_eq!(app.selected, None);
}

#[test]
fn test_paste_is_flattened_to_one_line() {
    let (mut app, _requests, _responses) = test_app();
    app.handle_paste_event("caf\nfeine");

    assert_eq!(app.query(), "caf feine");
    assert_eq!(app.search.input_value(), "caf feine");
}

#[test]
fn test_ctrl_m_does_not_split_the_field() {
    let (mut app, _requests, _responses) = test_app();
    app.set_query("ca");

    app.handle_key_event(key_with_mods(KeyCode::Char('m'), KeyModifiers::CONTROL));
    app.handle_key_event(key(KeyCode::Char('f')));

    assert_eq!(app.input.textarea.lines().len(), 1);
    assert_eq!(app.query(), "caf");
    assert_eq!(app.search.input_value(), "caf");
}

#[test]
fn test_ctrl_m_opens_like_enter() {
    let mut app = app_with_rows("md", rows());
    app.handle_key_event(key_with_mods(KeyCode::Char('m'), KeyModifiers::CONTROL));
    assert_eq!(app.navigation(), Some("/substance/mdma"));
}

#[test]
fn test_raw_line_feed_char_is_not_inserted() {
    let (mut app, _requests, _responses) = test_app();
    app.set_query("ca");
    app.handle_key_event(key(KeyCode::Char('\n')));

    assert_eq!(app.input.textarea.lines().len(), 1);
    assert_eq!(app.query(), "ca");
}
