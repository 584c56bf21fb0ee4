// GitHub API response types.
// Repository metadata as returned by the REST API and stored in the cache.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Repository license summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub name: String,
    #[serde(default)]
    pub spdx_id: Option<String>,
}

/// GitHub repository metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub watchers_count: u64,
    #[serde(default)]
    pub open_issues_count: Option<u64>,
    pub language: Option<String>,
    pub license: Option<License>,
    pub default_branch: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Repository {
    /// Whether the primary language is exactly `language`.
    pub fn has_language(&self, language: &str) -> bool {
        self.language.as_deref() == Some(language)
    }
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Default)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_api_payload() {
        let json = r#"{
            "id": 1,
            "name": "go-lib-checksum",
            "full_name": "octo/go-lib-checksum",
            "description": null,
            "html_url": "https://github.com/octo/go-lib-checksum",
            "stargazers_count": 5,
            "forks_count": 1,
            "watchers_count": 5,
            "open_issues_count": 0,
            "language": "Go",
            "license": {"key": "mit", "name": "MIT License", "spdx_id": "MIT"},
            "default_branch": "main",
            "created_at": "2023-01-02T03:04:05Z",
            "updated_at": "2024-01-02T03:04:05Z"
        }"#;

        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.name, "go-lib-checksum");
        assert_eq!(repo.stargazers_count, 5);
        assert!(repo.has_language("Go"));
        assert!(!repo.has_language("go"));
        assert_eq!(repo.license.unwrap().spdx_id.as_deref(), Some("MIT"));
    }

    #[test]
    fn test_missing_optional_fields() {
        let json = r#"{
            "name": "bare",
            "html_url": "https://github.com/octo/bare",
            "default_branch": "master",
            "created_at": "2023-01-02T03:04:05Z"
        }"#;

        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.description, None);
        assert_eq!(repo.language, None);
        assert_eq!(repo.open_issues_count, None);
        assert_eq!(repo.forks_count, 0);
    }
}
