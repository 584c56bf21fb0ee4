// GitHub API endpoint functions.
// Typed requests for the two repository lookups the resolver needs.

use async_trait::async_trait;

use crate::error::Result;

use super::client::GitHubClient;
use super::types::Repository;

/// Upper bound on repositories fetched for an owner listing. Only one page is requested.
pub const OWNER_REPOS_PAGE_SIZE: u32 = 100;

/// Source of repository metadata.
///
/// The fetcher depends on this seam rather than on [`GitHubClient`] so tests can
/// substitute a counting fake.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Fetch one repository by owner and name.
    async fn fetch_repo(&self, owner: &str, repo: &str) -> Result<Repository>;

    /// Fetch the owner's most recently updated repositories (single page).
    async fn fetch_owner_repos(&self, owner: &str) -> Result<Vec<Repository>>;
}

impl GitHubClient {
    /// Get a specific repository.
    pub async fn get_repo(&self, owner: &str, repo: &str) -> Result<Repository> {
        let response = self.get(&["repos", owner, repo]).await?;
        let repository: Repository = response.json().await?;
        Ok(repository)
    }

    /// Get public repositories for a user, most recently updated first.
    pub async fn get_user_repos(&self, owner: &str, per_page: u32) -> Result<Vec<Repository>> {
        let params = [("per_page", per_page.to_string()), ("sort", "updated".to_string())];
        let response = self
            .get_with_params(&["users", owner, "repos"], &params)
            .await?;
        let repos: Vec<Repository> = response.json().await?;
        Ok(repos)
    }
}

#[async_trait]
impl MetadataSource for GitHubClient {
    async fn fetch_repo(&self, owner: &str, repo: &str) -> Result<Repository> {
        self.get_repo(owner, repo).await
    }

    async fn fetch_owner_repos(&self, owner: &str) -> Result<Vec<Repository>> {
        self.get_user_repos(owner, OWNER_REPOS_PAGE_SIZE).await
    }
}
