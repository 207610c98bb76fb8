//! Suggestion records returned by the lookup service

use serde::Deserialize;

/// Path prefix of the substance detail page
const DETAIL_PATH_PREFIX: &str = "/substance/";

/// One candidate match returned by `/autocomplete`
///
/// Order within a result set is server-ranked and preserved as received.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Suggestion {
    /// Stable identifier, used to build the navigation target
    pub slug: String,
    /// Display label
    pub pretty_name: String,
    /// Alternate names, possibly empty
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl Suggestion {
    pub fn new(slug: &str, pretty_name: &str, aliases: &[&str]) -> Self {
        Self {
            slug: slug.to_string(),
            pretty_name: pretty_name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Parenthesized, comma-joined alias list, or `None` when there are no aliases
    pub fn aliases_label(&self) -> Option<String> {
        if self.aliases.is_empty() {
            None
        } else {
            Some(format!("({})", self.aliases.join(", ")))
        }
    }

    /// Navigation target for the detail view of this suggestion
    pub fn detail_path(&self) -> String {
        format!("{}{}", DETAIL_PATH_PREFIX, self.slug)
    }
}

/// Decode a lookup response body into an ordered suggestion list
pub fn parse_suggestions(body: &str) -> Result<Vec<Suggestion>, serde_json::Error> {
    serde_json::from_str(body)
}
