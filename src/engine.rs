// Resolver engine.
// Composes path mapping and cached metadata lookups behind the page-facing operations.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::cache::{CacheStore, FileStore};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::fetcher::Fetcher;
use crate::github::{GitHubClient, MetadataSource, Repository};
use crate::import::GoImport;

/// Everything a package page needs for one inbound path.
#[derive(Debug, Clone, Serialize)]
pub struct PackagePage {
    pub path: String,
    pub repo_name: String,
    pub import: GoImport,
    pub go_import: String,
    pub go_source: String,
    /// `None` renders as "not found".
    pub repository: Option<Repository>,
}

/// One entry of the owner's package listing.
#[derive(Debug, Clone, Serialize)]
pub struct PackageListing {
    pub vanity_path: String,
    pub repository: Repository,
}

/// Request-facing entry point. Cheap to clone; holds no per-request state.
#[derive(Clone)]
pub struct VanityEngine {
    config: Arc<EngineConfig>,
    fetcher: Fetcher,
}

impl VanityEngine {
    pub fn new(config: EngineConfig, store: Arc<dyn CacheStore>, source: Arc<dyn MetadataSource>) -> Self {
        let fetcher = Fetcher::new(store, source).with_ttl(config.cache_ttl);
        Self {
            config: Arc::new(config),
            fetcher,
        }
    }

    /// Build an engine backed by the GitHub API and the on-disk cache.
    pub fn from_config(config: EngineConfig) -> Result<Self> {
        let client = GitHubClient::new(
            &config.api_url,
            config.token.as_deref(),
            config.request_timeout,
        )?;
        let store = match &config.cache_dir {
            Some(dir) => FileStore::new(dir),
            None => FileStore::in_cache_dir()?,
        };
        info!(
            owner = %config.owner,
            cache_dir = %store.root().display(),
            rules = config.rules.rules().len(),
            authenticated = config.token.is_some(),
            "resolver engine ready"
        );

        Ok(Self::new(config, Arc::new(store), Arc::new(client)))
    }

    /// Repository name for an inbound path.
    pub fn resolve(&self, path: &str) -> String {
        self.config.rules.resolve(path)
    }

    /// Resolve `path` and look up its repository.
    pub async fn package(&self, path: &str) -> PackagePage {
        let repo_name = self.resolve(path);
        let repository = self.fetcher.get_repo(&self.config.owner, &repo_name).await;

        let mut import = GoImport::new(&self.config.domain, path, &self.config.owner, &repo_name);
        if let Some(repo) = &repository {
            import = import.with_branch(&repo.default_branch);
        }

        PackagePage {
            path: path.to_string(),
            go_import: import.go_import(),
            go_source: import.go_source(),
            repo_name,
            import,
            repository,
        }
    }

    /// The owner's repositories in the configured language, each with its vanity path.
    pub async fn packages(&self) -> Vec<PackageListing> {
        self.fetcher
            .list_repos_by_owner(&self.config.owner, &self.config.language)
            .await
            .into_iter()
            .map(|repository| PackageListing {
                vanity_path: self.config.rules.vanity_path(&repository.name),
                repository,
            })
            .collect()
    }
}
