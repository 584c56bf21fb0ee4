// Cached metadata fetcher.
// Fetch-through cache in front of the GitHub API; faults degrade to absent or empty results.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::cache::{CacheKey, CacheStore, DEFAULT_TTL};
use crate::error::VanityError;
use crate::github::{MetadataSource, Repository};

/// Outcome of a cached lookup, keeping the distinctions that
/// [`Fetcher::get_repo`] and [`Fetcher::list_repos_by_owner`] collapse.
#[derive(Debug)]
pub enum Lookup<T> {
    /// Served from the cache without contacting upstream.
    Hit(T),
    /// Fetched from upstream. `cache_fault` holds a store error seen on the
    /// way (failed read, undecodable entry, or failed write).
    Fetched {
        value: T,
        cache_fault: Option<VanityError>,
    },
    /// Upstream did not produce a value. Nothing was cached.
    Unavailable {
        upstream: VanityError,
        cache_fault: Option<VanityError>,
    },
}

impl<T> Lookup<T> {
    /// Collapse to the value, dropping fault details.
    pub fn into_value(self) -> Option<T> {
        match self {
            Lookup::Hit(value) | Lookup::Fetched { value, .. } => Some(value),
            Lookup::Unavailable { .. } => None,
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Lookup::Hit(value) | Lookup::Fetched { value, .. } => Some(value),
            Lookup::Unavailable { .. } => None,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, Lookup::Hit(_))
    }

    pub fn cache_fault(&self) -> Option<&VanityError> {
        match self {
            Lookup::Hit(_) => None,
            Lookup::Fetched { cache_fault, .. } | Lookup::Unavailable { cache_fault, .. } => {
                cache_fault.as_ref()
            }
        }
    }
}

/// Repository metadata lookups through a durable cache.
///
/// Holds no mutable state of its own; concurrent lookups for the same key may
/// each reach upstream.
#[derive(Clone)]
pub struct Fetcher {
    store: Arc<dyn CacheStore>,
    source: Arc<dyn MetadataSource>,
    ttl: Duration,
}

impl Fetcher {
    pub fn new(store: Arc<dyn CacheStore>, source: Arc<dyn MetadataSource>) -> Self {
        Self {
            store,
            source,
            ttl: DEFAULT_TTL,
        }
    }

    /// Set the lifetime of entries written by this fetcher.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Metadata for one repository, or `None` if it cannot be obtained.
    pub async fn get_repo(&self, owner: &str, repo_name: &str) -> Option<Repository> {
        self.lookup_repo(owner, repo_name).await.into_value()
    }

    /// The owner's repositories whose language is exactly `language`, in
    /// upstream order. Empty when upstream fails.
    pub async fn list_repos_by_owner(&self, owner: &str, language: &str) -> Vec<Repository> {
        self.lookup_owner_repos(owner, language)
            .await
            .into_value()
            .unwrap_or_default()
    }

    /// Tagged form of [`Fetcher::get_repo`].
    pub async fn lookup_repo(&self, owner: &str, repo_name: &str) -> Lookup<Repository> {
        let key = CacheKey::repo(owner, repo_name);
        self.fetch_through(&key, self.source.fetch_repo(owner, repo_name))
            .await
    }

    /// Tagged form of [`Fetcher::list_repos_by_owner`].
    pub async fn lookup_owner_repos(&self, owner: &str, language: &str) -> Lookup<Vec<Repository>> {
        let key = CacheKey::owner_repos(owner, language);
        let upstream = async {
            let repos = self.source.fetch_owner_repos(owner).await?;
            let total = repos.len();
            let matching: Vec<Repository> = repos
                .into_iter()
                .filter(|repo| repo.has_language(language))
                .collect();
            debug!(owner, language, total, matching = matching.len(), "filtered owner repositories");
            Ok::<_, VanityError>(matching)
        };

        self.fetch_through(&key, upstream).await
    }

    /// Consult the cache, fall back to `upstream` on a miss, and store
    /// successful results. Failed fetches are never cached.
    async fn fetch_through<T>(
        &self,
        key: &CacheKey,
        upstream: impl Future<Output = crate::error::Result<T>>,
    ) -> Lookup<T>
    where
        T: Serialize + DeserializeOwned,
    {
        let key = key.to_string();
        let mut cache_fault = None;

        match self.store.get(&key).await {
            Ok(Some(raw)) => match serde_json::from_str::<T>(&raw) {
                Ok(value) => {
                    debug!(%key, "cache hit");
                    return Lookup::Hit(value);
                }
                Err(e) => {
                    warn!(%key, error = %e, "undecodable cache entry, treating as miss");
                    cache_fault = Some(VanityError::from(e));
                }
            },
            Ok(None) => debug!(%key, "cache miss"),
            Err(e) => {
                warn!(%key, error = %e, "cache read failed, treating as miss");
                cache_fault = Some(e);
            }
        }

        let value = match upstream.await {
            Ok(value) => value,
            Err(e) => {
                warn!(%key, error = %e, "upstream fetch failed");
                return Lookup::Unavailable {
                    upstream: e,
                    cache_fault,
                };
            }
        };

        let written = match serde_json::to_string(&value) {
            Ok(raw) => self.store.put(&key, &raw, self.ttl).await,
            Err(e) => Err(e.into()),
        };
        match written {
            Ok(()) => debug!(%key, ttl_secs = self.ttl.as_secs(), "cached upstream result"),
            Err(e) => {
                warn!(%key, error = %e, "cache write failed, serving fresh value");
                cache_fault = Some(e);
            }
        }

        Lookup::Fetched { value, cache_fault }
    }
}
