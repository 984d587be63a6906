//! URL-driven filter, sort and pagination state.
//!
//! The query string is the single source of truth for the list view. The
//! [`Filter`](crate::domain::filter::Filter), [`Sort`](crate::domain::filter::Sort)
//! and page number are pure views derived from it ([`derive`]), and every change
//! is a pure function from the current query string to the next one
//! ([`mutate`]). Decoding never fails: anything missing or malformed resolves
//! to its documented default.

use std::fmt::{Display, Formatter};

pub mod derive;
pub mod enums;
pub mod mutate;
pub mod state;
pub mod status;

pub use derive::{derive_filter, derive_page, derive_sort};
pub use enums::{ClosedSet, parse_or_default, parse_str};
pub use mutate::{apply_filter, apply_page, apply_sort, reset, update_filter};
pub use state::UrlState;
pub use status::{decode_statuses, encode_statuses};

pub const STATUS_PARAM: &str = "status";
pub const CATEGORY_PARAM: &str = "categoryId";
pub const PRICE_FROM_PARAM: &str = "priceFrom";
pub const PRICE_TO_PARAM: &str = "priceTo";
pub const SEARCH_PARAM: &str = "search";
pub const SORT_KEY_PARAM: &str = "sortKey";
pub const SORT_ORDER_PARAM: &str = "sortOrder";
pub const PAGE_PARAM: &str = "page";

/// Ordered key/value parameters of a location.
///
/// Mirrors `URLSearchParams`: [`get`](Self::get) returns the first value,
/// [`set`](Self::set) overwrites the first occurrence in place and drops the
/// rest, [`delete`](Self::delete) drops every occurrence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw `application/x-www-form-urlencoded` string, with or
    /// without the leading `?`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let pairs = serde_html_form::from_str::<Vec<(String, String)>>(raw).unwrap_or_default();
        Self { pairs }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(name, _)| name == key)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter().position(|(name, _)| name == key) {
            Some(first) => {
                self.pairs[first].1 = value;
                let mut index = 0;
                self.pairs.retain(|(name, _)| {
                    let keep = index <= first || name != key;
                    index += 1;
                    keep
                });
            }
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    pub fn delete(&mut self, key: &str) {
        self.pairs.retain(|(name, _)| name != key);
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Location of `path` carrying this query, without a dangling `?`.
    pub fn to_location(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{self}")
        }
    }
}

impl Display for QueryString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let encoded = serde_html_form::to_string(&self.pairs).map_err(|_| std::fmt::Error)?;
        f.write_str(&encoded)
    }
}

impl<K, V> FromIterator<(K, V)> for QueryString
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}
