//! Category directory derived from the advertisements themselves.
//!
//! The API has no category endpoint, so the directory is built from a sample
//! of the listing and cached for [`CATEGORY_TTL`].

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::domain::ad::Category;
use crate::repository::{AdReader, ListAdsQuery};
use crate::services::{ServiceError, ServiceResult};

/// Number of advertisements sampled to collect categories.
pub const CATEGORY_SAMPLE_SIZE: u32 = 100;

pub const CATEGORY_TTL: Duration = Duration::from_secs(10 * 60);

/// Fetches a sample of advertisements and returns their distinct categories
/// sorted by name.
pub async fn load_categories<R>(repo: &R) -> ServiceResult<Vec<Category>>
where
    R: AdReader + ?Sized,
{
    let sample = repo
        .list_ads(&ListAdsQuery::new().limit(CATEGORY_SAMPLE_SIZE))
        .await
        .map_err(ServiceError::from)?;

    let unique: BTreeMap<i64, String> = sample
        .ads
        .into_iter()
        .filter(|ad| ad.category_id != 0 && !ad.category.is_empty())
        .map(|ad| (ad.category_id, ad.category))
        .collect();

    let mut categories: Vec<Category> = unique
        .into_iter()
        .map(|(id, name)| Category { id, name })
        .collect();
    categories.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

    Ok(categories)
}

struct CachedCategories {
    fetched_at: Instant,
    categories: Vec<Category>,
}

/// Shared, time-bounded cache of [`load_categories`].
pub struct CategoryCache {
    ttl: Duration,
    entry: RwLock<Option<CachedCategories>>,
}

impl Default for CategoryCache {
    fn default() -> Self {
        Self::new(CATEGORY_TTL)
    }
}

impl CategoryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: RwLock::new(None),
        }
    }

    /// Returns the cached directory, refreshing it once it is older than the
    /// TTL. A failed refresh serves the stale copy, or nothing.
    pub async fn get<R>(&self, repo: &R) -> Vec<Category>
    where
        R: AdReader + ?Sized,
    {
        if let Some(cached) = self.entry.read().await.as_ref()
            && cached.fetched_at.elapsed() < self.ttl
        {
            return cached.categories.clone();
        }

        match load_categories(repo).await {
            Ok(categories) => {
                *self.entry.write().await = Some(CachedCategories {
                    fetched_at: Instant::now(),
                    categories: categories.clone(),
                });
                categories
            }
            Err(err) => {
                log::error!("Failed to load categories: {err}");
                self.entry
                    .read()
                    .await
                    .as_ref()
                    .map(|cached| cached.categories.clone())
                    .unwrap_or_default()
            }
        }
    }
}
