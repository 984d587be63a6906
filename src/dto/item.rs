//! DTOs shaped for the advertisement detail template.

use serde::{Deserialize, Serialize};

use crate::domain::ad::Advertisement;
use crate::query::QueryString;

/// Navigation context passed from the list to the detail page.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ItemQuery {
    /// Comma separated identifiers of the list the item was opened from.
    pub ids: Option<String>,
    /// Position of the item inside `ids`.
    pub index: Option<usize>,
    /// List location to return to.
    pub back: Option<String>,
}

impl ItemQuery {
    /// Reads the navigation context. A malformed `index` is dropped.
    pub fn from_query(query: &QueryString) -> Self {
        Self {
            ids: query.get("ids").map(str::to_string),
            index: query.get("index").and_then(|raw| raw.parse().ok()),
            back: query.get("back").map(str::to_string),
        }
    }
}

/// One entry of the moderation timeline.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HistoryEntryView {
    pub moderator_name: String,
    pub action: String,
    pub action_label: String,
    /// Timeline colour: green, red or yellow.
    pub color: &'static str,
    pub reason: Option<String>,
    pub comment: String,
    pub timestamp: String,
}

/// Data required to render the detail page.
#[derive(Debug)]
pub struct ItemPageData {
    pub ad: Advertisement,
    pub history: Vec<HistoryEntryView>,
    pub characteristics: Vec<(String, String)>,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
    pub back_href: String,
    /// Query string of the detail page itself, kept across moderation posts.
    pub nav: String,
}
