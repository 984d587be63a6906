use crate::domain::filter::{Filter, Sort};
use crate::query::{
    QueryString, apply_filter, apply_page, apply_sort, derive_filter, derive_page, derive_sort,
    reset, update_filter,
};

/// Single writer of a location's query string.
///
/// Every setter reads the value committed last and replaces it with the
/// computed successor, so back-to-back edits never work from a stale
/// snapshot. `revision` counts the replacements.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UrlState {
    query: QueryString,
    revision: u64,
}

impl UrlState {
    pub fn new(query: QueryString) -> Self {
        Self { query, revision: 0 }
    }

    pub fn query(&self) -> &QueryString {
        &self.query
    }

    pub fn into_query(self) -> QueryString {
        self.query
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn filter(&self) -> Filter {
        derive_filter(&self.query)
    }

    pub fn sort(&self) -> Sort {
        derive_sort(&self.query)
    }

    pub fn page(&self) -> u32 {
        derive_page(&self.query)
    }

    /// Computes the next query from the latest committed one and commits it.
    pub fn replace_with<F>(&mut self, transition: F) -> &QueryString
    where
        F: FnOnce(&QueryString) -> QueryString,
    {
        self.query = transition(&self.query);
        self.revision += 1;
        &self.query
    }

    pub fn set_filter(&mut self, filter: &Filter) -> &QueryString {
        self.replace_with(|current| apply_filter(current, filter))
    }

    pub fn update_filter<F>(&mut self, update: F) -> &QueryString
    where
        F: FnOnce(Filter) -> Filter,
    {
        self.replace_with(|current| update_filter(current, update))
    }

    pub fn set_sort(&mut self, sort: Sort) -> &QueryString {
        self.replace_with(|current| apply_sort(current, sort))
    }

    pub fn set_page(&mut self, page: i64) -> &QueryString {
        self.replace_with(|current| apply_page(current, page))
    }

    pub fn reset(&mut self) -> &QueryString {
        self.replace_with(|_| reset())
    }
}
