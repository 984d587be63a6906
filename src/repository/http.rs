//! `reqwest` implementation of the repository traits.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::ad::{AdList, Advertisement, ModerationDecision, ModerationOutcome};
use crate::domain::stats::{ActivityData, CategoryStats, DecisionsData, StatsRange, StatsSummary};
use crate::domain::types::AdId;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{AdReader, AdWriter, ListAdsQuery, StatsReader, stats_query_string};

/// Extra attempts granted to a failed read. Writes are never repeated.
const READ_RETRIES: usize = 1;

/// Client of the moderation API rooted at `base_url`.
#[derive(Clone)]
pub struct HttpRepository {
    base_url: String,
    client: Client,
}

impl HttpRepository {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> RepositoryResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str, query: &str) -> String {
        if query.is_empty() {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}{}?{}", self.base_url, path, query)
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &str) -> RepositoryResult<T> {
        let url = self.url(path, query);
        let mut attempt = 0;
        loop {
            let result = match self.client.get(&url).send().await {
                Ok(response) => Self::decode(response).await,
                Err(err) => Err(RepositoryError::from(err)),
            };
            match result {
                Err(err) if err.is_transient() && attempt < READ_RETRIES => {
                    attempt += 1;
                    log::warn!("GET {url} failed ({err}), retrying");
                }
                other => return other,
            }
        }
    }

    async fn post_json<B, T>(&self, path: &str, body: Option<&B>) -> RepositoryResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(path, "");
        let mut request = self.client.post(&url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> RepositoryResult<T> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(RepositoryError::NotFound);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RepositoryError::Status {
                status: status.as_u16(),
                message,
            });
        }
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl AdReader for HttpRepository {
    async fn list_ads(&self, query: &ListAdsQuery) -> RepositoryResult<AdList> {
        self.get_json("/ads", &query.to_query_string()?).await
    }

    async fn get_ad(&self, id: AdId) -> RepositoryResult<Option<Advertisement>> {
        match self.get_json(&format!("/ads/{id}"), "").await {
            Ok(ad) => Ok(Some(ad)),
            Err(RepositoryError::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

#[async_trait]
impl AdWriter for HttpRepository {
    async fn approve_ad(&self, id: AdId) -> RepositoryResult<Advertisement> {
        let outcome: ModerationOutcome = self
            .post_json::<(), _>(&format!("/ads/{id}/approve"), None)
            .await?;
        Ok(outcome.ad)
    }

    async fn reject_ad(
        &self,
        id: AdId,
        decision: &ModerationDecision,
    ) -> RepositoryResult<Advertisement> {
        let outcome: ModerationOutcome = self
            .post_json(&format!("/ads/{id}/reject"), Some(decision))
            .await?;
        Ok(outcome.ad)
    }

    async fn request_changes(
        &self,
        id: AdId,
        decision: &ModerationDecision,
    ) -> RepositoryResult<Advertisement> {
        let outcome: ModerationOutcome = self
            .post_json(&format!("/ads/{id}/request-changes"), Some(decision))
            .await?;
        Ok(outcome.ad)
    }
}

#[async_trait]
impl StatsReader for HttpRepository {
    async fn stats_summary(&self, range: &StatsRange) -> RepositoryResult<StatsSummary> {
        self.get_json("/stats/summary", &stats_query_string(range)?)
            .await
    }

    async fn activity_chart(&self, range: &StatsRange) -> RepositoryResult<Vec<ActivityData>> {
        self.get_json("/stats/chart/activity", &stats_query_string(range)?)
            .await
    }

    async fn decisions_chart(&self, range: &StatsRange) -> RepositoryResult<DecisionsData> {
        self.get_json("/stats/chart/decisions", &stats_query_string(range)?)
            .await
    }

    async fn categories_chart(&self, range: &StatsRange) -> RepositoryResult<CategoryStats> {
        self.get_json("/stats/chart/categories", &stats_query_string(range)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_path_and_query() {
        let repo = HttpRepository::new("http://api.local/api/v1/", Duration::from_secs(1)).unwrap();

        assert_eq!(repo.url("/ads", ""), "http://api.local/api/v1/ads");
        assert_eq!(
            repo.url("/ads", "page=2"),
            "http://api.local/api/v1/ads?page=2"
        );
    }
}
