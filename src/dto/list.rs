//! DTOs shaped for the advertisement list template.

use serde::Serialize;

use crate::domain::ad::Category;
use crate::domain::filter::{Filter, Sort};
use crate::domain::types::PageLimit;
use crate::pagination::Paginated;

/// Advertisement as shown on a list card.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AdCard {
    pub id: i32,
    pub title: String,
    pub price: f64,
    pub category: String,
    pub status: String,
    pub status_label: String,
    pub urgent: bool,
    pub created_at: String,
    pub image: Option<String>,
    /// Detail page link carrying the neighbours for prev/next navigation.
    pub href: String,
}

/// A selectable entry of a `<select>` or checkbox group.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Data required to render the list page.
#[derive(Debug)]
pub struct ListPageData {
    pub ads: Paginated<AdCard>,
    /// Identifiers of the listed advertisements, in display order.
    pub ids: Vec<i32>,
    pub filter: Filter,
    pub sort: Sort,
    pub limit: PageLimit,
    /// Query string the page was rendered for, posted back by every form.
    pub query: String,
    pub status_options: Vec<ChoiceOption>,
    pub sort_options: Vec<ChoiceOption>,
    pub categories: Vec<Category>,
}
