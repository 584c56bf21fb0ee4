// GitHub API module.
// Provides the client, repository types, and the metadata source seam.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::{GITHUB_API_BASE, GitHubClient};
pub use endpoints::{MetadataSource, OWNER_REPOS_PAGE_SIZE};
pub use types::*;
