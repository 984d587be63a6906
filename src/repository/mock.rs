//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::ad::{AdList, Advertisement, ModerationDecision};
use crate::domain::stats::{ActivityData, CategoryStats, DecisionsData, StatsRange, StatsSummary};
use crate::domain::types::AdId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{AdReader, AdWriter, ListAdsQuery, StatsReader};

mock! {
    pub Repository {}

    #[async_trait]
    impl AdReader for Repository {
        async fn list_ads(&self, query: &ListAdsQuery) -> RepositoryResult<AdList>;
        async fn get_ad(&self, id: AdId) -> RepositoryResult<Option<Advertisement>>;
    }

    #[async_trait]
    impl AdWriter for Repository {
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
    impl StatsReader for Repository {
        async fn stats_summary(&self, range: &StatsRange) -> RepositoryResult<StatsSummary>;
        async fn activity_chart(&self, range: &StatsRange) -> RepositoryResult<Vec<ActivityData>>;
        async fn decisions_chart(&self, range: &StatsRange) -> RepositoryResult<DecisionsData>;
        async fn categories_chart(&self, range: &StatsRange) -> RepositoryResult<CategoryStats>;
    }
}
