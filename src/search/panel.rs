//! Observable rendering state of the suggestion area

use super::suggestion::Suggestion;

/// Hint text for the default minimum query length
pub const HINT_MESSAGE: &str = "Please enter at least two characters to search";
pub const LOADING_MESSAGE: &str = "Searching...";
pub const ERROR_MESSAGE: &str = "An error occurred while searching";

/// Where the controller is in its per-query lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    /// No input
    #[default]
    Idle,
    /// Input shorter than the minimum length; no fetch made
    TooShort,
    /// Waiting on a fetch
    Resolving,
    /// Suggestions, a no-results message or an error are showing
    Rendered,
}

/// What the suggestion area currently shows. Every update replaces it whole.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SuggestionPanel {
    #[default]
    Empty,
    /// Input shorter than `min_length` chars
    Hint { min_length: usize },
    Loading,
    Error,
    /// Zero matches; `input` is the live field value at render time
    NoResults { input: String },
    Rows(Vec<Suggestion>),
}

impl SuggestionPanel {
    /// Text shown in place of rows, if this panel is a message
    pub fn message(&self) -> Option<String> {
        match self {
            SuggestionPanel::Empty | SuggestionPanel::Rows(_) => None,
            SuggestionPanel::Hint { min_length } => Some(hint_message(*min_length)),
            SuggestionPanel::Loading => Some(LOADING_MESSAGE.to_string()),
            SuggestionPanel::Error => Some(ERROR_MESSAGE.to_string()),
            SuggestionPanel::NoResults { input } => {
                Some(format!("No results found for \"{}\"", input))
            }
        }
    }

    pub fn rows(&self) -> &[Suggestion] {
        match self {
            SuggestionPanel::Rows(rows) => rows,
            _ => &[],
        }
    }
}

/// Hint shown while the input is shorter than `min_length` chars
pub fn hint_message(min_length: usize) -> String {
    const WORDS: [&str; 10] = [
        "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
    ];
    let count = match WORDS.get(min_length) {
        Some(word) => word.to_string(),
        None => min_length.to_string(),
    };
    let noun = if min_length == 1 {
        "character"
    } else {
        "characters"
    };
    format!("Please enter at least {} {} to search", count, noun)
}
