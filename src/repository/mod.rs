//! Access to the remote moderation API.
//!
//! The dashboard owns no data: advertisements, moderation records and
//! statistics all live behind the HTTP API. Services depend on the traits
//! below so they can be exercised against [`mock::MockRepository`].

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::ad::{AdList, Advertisement, ModerationDecision};
use crate::domain::filter::{Filter, Sort};
use crate::domain::stats::{ActivityData, CategoryStats, DecisionsData, StatsRange, StatsSummary};
use crate::domain::types::{AdId, PageLimit, Period, SortKey, SortOrder, Status};
use crate::repository::errors::{RepositoryError, RepositoryResult};

pub mod errors;
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

pub use http::HttpRepository;

/// Parameters of `GET /ads`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListAdsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub statuses: Vec<Status>,
    pub category_id: Option<i64>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub search: Option<String>,
    pub sort: Option<Sort>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListAdsParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    status: &'a [Status],
    #[serde(skip_serializing_if = "Option::is_none")]
    category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort_by: Option<SortKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort_order: Option<SortOrder>,
}

impl ListAdsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listing request for the given list view state.
    pub fn from_view(filter: &Filter, sort: Sort, page: u32, limit: PageLimit) -> Self {
        Self::new()
            .paginate(page, limit.get())
            .statuses(filter.status.active())
            .category(filter.category_id)
            .price(filter.price.from, filter.price.to)
            .search(filter.mask.as_str())
            .sort(sort)
    }

    pub fn paginate(mut self, page: u32, limit: u32) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn statuses(mut self, statuses: Vec<Status>) -> Self {
        self.statuses = statuses;
        self
    }

    pub fn category(mut self, category_id: Option<i64>) -> Self {
        self.category_id = category_id;
        self
    }

    /// A zero bound on either side means "unbounded" for the backend.
    pub fn price(mut self, from: u64, to: Option<u64>) -> Self {
        self.min_price = Some(from).filter(|from| *from > 0);
        self.max_price = to.filter(|to| *to > 0);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = if search.is_empty() { None } else { Some(search) };
        self
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Encodes the request, repeating `status` once per selected status.
    pub fn to_query_string(&self) -> RepositoryResult<String> {
        let params = ListAdsParams {
            page: self.page,
            limit: self.limit,
            status: &self.statuses,
            category_id: self.category_id,
            min_price: self.min_price,
            max_price: self.max_price,
            search: self.search.as_deref(),
            sort_by: self.sort.map(|sort| sort.key),
            sort_order: self.sort.map(|sort| sort.order),
        };
        serde_html_form::to_string(&params)
            .map_err(|err| RepositoryError::Validation(format!("Query encoding error: {err}")))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsParams {
    period: Period,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_date: Option<String>,
}

/// Encodes a statistics window; dates are only sent for custom periods.
pub fn stats_query_string(range: &StatsRange) -> RepositoryResult<String> {
    let format = |date: chrono::NaiveDate| date.format("%Y-%m-%d").to_string();
    let params = StatsParams {
        period: range.period(),
        start_date: range.start_date().map(format),
        end_date: range.end_date().map(format),
    };
    serde_html_form::to_string(&params)
        .map_err(|err| RepositoryError::Validation(format!("Query encoding error: {err}")))
}

#[async_trait]
pub trait AdReader {
    async fn list_ads(&self, query: &ListAdsQuery) -> RepositoryResult<AdList>;
    /// `Ok(None)` when the advertisement does not exist.
    async fn get_ad(&self, id: AdId) -> RepositoryResult<Option<Advertisement>>;
}

#[async_trait]
pub trait AdWriter {
    async fn approve_ad(&self, id: AdId) -> RepositoryResult<Advertisement>;
    async fn reject_ad(
        &self,
        id: AdId,
        decision: &ModerationDecision,
    ) -> RepositoryResult<Advertisement>;
    async fn request_changes(
        &self,
        id: AdId,
        decision: &ModerationDecision,
    ) -> RepositoryResult<Advertisement>;
}

#[async_trait]
pub trait StatsReader {
    async fn stats_summary(&self, range: &StatsRange) -> RepositoryResult<StatsSummary>;
    async fn activity_chart(&self, range: &StatsRange) -> RepositoryResult<Vec<ActivityData>>;
    async fn decisions_chart(&self, range: &StatsRange) -> RepositoryResult<DecisionsData>;
    async fn categories_chart(&self, range: &StatsRange) -> RepositoryResult<CategoryStats>;
}
