//! View state of the advertisement list: filter predicates and ordering.
//!
//! None of these values are stored on their own. They are always derived from
//! the query string by [`crate::query`] and written back through it.

use serde::{Deserialize, Serialize};

use crate::domain::types::{SortKey, SortOrder, Status};
use crate::query::ClosedSet;

/// Selected flag for each of the four moderation statuses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusFilter {
    pub pending: bool,
    pub approved: bool,
    pub rejected: bool,
    pub draft: bool,
}

impl StatusFilter {
    /// Builds a filter with exactly the given statuses selected.
    pub fn from_statuses<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = Status>,
    {
        statuses
            .into_iter()
            .fold(Self::default(), |filter, status| filter.with(status, true))
    }

    pub fn is_selected(&self, status: Status) -> bool {
        match status {
            Status::Pending => self.pending,
            Status::Approved => self.approved,
            Status::Rejected => self.rejected,
            Status::Draft => self.draft,
        }
    }

    /// Returns a copy with the flag of `status` replaced.
    pub fn with(mut self, status: Status, selected: bool) -> Self {
        let flag = match status {
            Status::Pending => &mut self.pending,
            Status::Approved => &mut self.approved,
            Status::Rejected => &mut self.rejected,
            Status::Draft => &mut self.draft,
        };
        *flag = selected;
        self
    }

    /// Selected statuses in declared order.
    pub fn active(&self) -> Vec<Status> {
        Status::ALL
            .iter()
            .copied()
            .filter(|status| self.is_selected(*status))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.active().is_empty()
    }
}

/// Inclusive price bounds. `from == 0` means no lower bound.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceRange {
    pub from: u64,
    pub to: Option<u64>,
}

/// Complete set of list predicates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub status: StatusFilter,
    pub category_id: Option<i64>,
    pub price: PriceRange,
    /// Free-text search, empty when not searching.
    pub mask: String,
}

impl Filter {
    /// True when every predicate is at its default.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// List ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sort {
    pub key: SortKey,
    pub order: SortOrder,
}

impl Default for Sort {
    fn default() -> Self {
        Self {
            key: SortKey::CreatedAt,
            order: SortOrder::Asc,
        }
    }
}

impl Sort {
    pub fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }

    /// Same key, opposite direction.
    pub fn reversed(self) -> Self {
        Self {
            order: self.order.reversed(),
            ..self
        }
    }

    /// Human readable hint for the direction toggle.
    pub fn order_hint(&self) -> &'static str {
        match (self.key, self.order) {
            (SortKey::CreatedAt, SortOrder::Asc) => "Сначала старые",
            (SortKey::CreatedAt, SortOrder::Desc) => "Сначала новые",
            (SortKey::Price, SortOrder::Asc) => "Более дорогие",
            (SortKey::Price, SortOrder::Desc) => "Менее дорогие",
            (SortKey::Priority, SortOrder::Asc) => "Более приоритетные",
            (SortKey::Priority, SortOrder::Desc) => "Менее приоритетные",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_statuses_follow_declared_order() {
        let filter = StatusFilter::from_statuses([Status::Draft, Status::Pending]);

        assert_eq!(filter.active(), vec![Status::Pending, Status::Draft]);
        assert!(!filter.is_empty());
        assert!(StatusFilter::default().is_empty());
    }

    #[test]
    fn with_replaces_a_single_flag() {
        let filter = StatusFilter::default()
            .with(Status::Approved, true)
            .with(Status::Rejected, true)
            .with(Status::Approved, false);

        assert_eq!(filter.active(), vec![Status::Rejected]);
    }

    #[test]
    fn sort_defaults_to_oldest_first() {
        let sort = Sort::default();

        assert_eq!(sort, Sort::new(SortKey::CreatedAt, SortOrder::Asc));
        assert_eq!(sort.reversed().order, SortOrder::Desc);
    }
}
