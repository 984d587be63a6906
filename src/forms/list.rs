//! Sidebar forms of the advertisement list.
//!
//! Each form carries the query string of the list it was rendered on in the
//! hidden `query` field. The handlers turn the submitted fields into a
//! mutation of that query string.

use serde::Deserialize;
use validator::Validate;

use crate::domain::filter::{Filter, PriceRange, Sort, StatusFilter};
use crate::domain::types::{MAX_PAGE_LIMIT, Status};
use crate::query::{QueryString, parse_or_default};

/// Filter controls. Fields missing from the submission keep their current value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterForm {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub status: Vec<String>,
    /// Marker sent along with the status checkboxes. An unchecked checkbox is
    /// not submitted, so without it "none selected" looks like "not edited".
    pub status_shown: Option<String>,
    pub category_id: Option<String>,
    pub price_from: Option<String>,
    pub price_to: Option<String>,
    pub search: Option<String>,
}

impl FilterForm {
    pub fn current_query(&self) -> QueryString {
        QueryString::parse(&self.query)
    }

    /// Applies the submitted controls on top of `prev`.
    pub fn merge_into(&self, prev: Filter) -> Filter {
        let status = if self.status_shown.is_some() {
            StatusFilter::from_statuses(
                self.status
                    .iter()
                    .filter_map(|raw| raw.parse::<Status>().ok()),
            )
        } else {
            prev.status
        };

        let category_id = match self.category_id.as_deref().map(str::trim) {
            None => prev.category_id,
            Some(raw) => raw.parse().ok(),
        };

        let from = match self.price_from.as_deref().map(str::trim) {
            None => prev.price.from,
            Some("") => 0,
            Some(raw) => raw.parse().unwrap_or(prev.price.from),
        };

        let to = match self.price_to.as_deref().map(str::trim) {
            None => prev.price.to,
            Some("") => None,
            Some(raw) => raw.parse().ok().or(prev.price.to),
        };

        let mask = self.search.clone().unwrap_or(prev.mask);

        Filter {
            status,
            category_id,
            price: PriceRange { from, to },
            mask,
        }
    }
}

/// Sort controls. A missing or unknown value keeps the current one.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortForm {
    #[serde(default)]
    pub query: String,
    pub sort_key: Option<String>,
    pub sort_order: Option<String>,
}

impl SortForm {
    pub fn current_query(&self) -> QueryString {
        QueryString::parse(&self.query)
    }

    pub fn merge_into(&self, prev: Sort) -> Sort {
        Sort {
            key: parse_or_default(self.sort_key.as_deref(), prev.key),
            order: parse_or_default(self.sort_order.as_deref(), prev.order),
        }
    }
}

/// Pager controls: target page and, optionally, a new page size.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct PageForm {
    #[serde(default)]
    pub query: String,
    pub page: Option<i64>,
    #[validate(range(min = 1, max = MAX_PAGE_LIMIT))]
    pub limit: Option<u32>,
}

impl PageForm {
    pub fn current_query(&self) -> QueryString {
        QueryString::parse(&self.query)
    }
}
