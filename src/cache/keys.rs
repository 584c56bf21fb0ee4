// Cache keys and paths.
// Builds stable cache keys for repository lookups and maps them to filesystem paths.

use std::fmt;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Get the base cache directory (~/.cache/govanity on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "govanity").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Key for a cached repository lookup.
///
/// Each variant has its own namespace tag so single-repository entries and
/// owner listings never share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// A single repository: `repo:{owner}/{name}`.
    Repo { owner: String, name: String },
    /// An owner's repositories filtered by language: `repos:{owner}:{language}`.
    OwnerRepos { owner: String, language: String },
}

impl CacheKey {
    pub fn repo(owner: &str, name: &str) -> Self {
        CacheKey::Repo {
            owner: owner.to_string(),
            name: name.to_string(),
        }
    }

    pub fn owner_repos(owner: &str, language: &str) -> Self {
        CacheKey::OwnerRepos {
            owner: owner.to_string(),
            language: language.to_string(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // GitHub owner names cannot contain '/' or ':', so the owner segment
        // always ends at the first separator.
        match self {
            CacheKey::Repo { owner, name } => write!(f, "repo:{}/{}", owner, name),
            CacheKey::OwnerRepos { owner, language } => {
                write!(f, "repos:{}:{}", owner, language)
            }
        }
    }
}

/// Path of the entry file for `key` under `root`.
pub fn entry_path(root: &Path, key: &str) -> PathBuf {
    root.join("entries").join(format!("{}.json", encode_key(key)))
}

/// Encode a key as a single file name.
///
/// Reserved characters and '%' itself are percent-escaped, so distinct keys
/// always produce distinct file names.
pub fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for c in key.chars() {
        match c {
            '%' | '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '.' => {
                encoded.push_str(&format!("%{:02X}", c as u32));
            }
            c if c.is_control() => encoded.push_str(&format!("%{:02X}", c as u32)),
            c => encoded.push(c),
        }
    }
    encoded
}
