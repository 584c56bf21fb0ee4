// Rewrite rule parsing.
// Builds the immutable rule table from the colon-delimited URL_MAPPINGS string.

use serde::{Deserialize, Serialize};

/// Separator between rule fields in the configuration string.
const FIELD_SEPARATOR: char = ':';

/// A single path-prefix to repository-prefix rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteRule {
    /// Path prefix without leading or trailing `/`.
    pub path_prefix: String,
    /// Replacement prepended to the remainder of the path.
    pub repo_prefix: String,
}

impl RewriteRule {
    /// Create a rule, normalizing the path prefix.
    pub fn new(path_prefix: &str, repo_prefix: &str) -> Self {
        Self {
            path_prefix: path_prefix.trim_matches('/').to_string(),
            repo_prefix: repo_prefix.to_string(),
        }
    }

    /// Return the path remainder if this rule's prefix covers whole segments of `path`.
    ///
    /// `path` must already be normalized (no leading `/`).
    pub fn match_path<'a>(&self, path: &'a str) -> Option<&'a str> {
        let rest = path.strip_prefix(self.path_prefix.as_str())?;
        if rest.is_empty() {
            Some(rest)
        } else {
            rest.strip_prefix('/')
        }
    }
}

/// Ordered, immutable set of rewrite rules plus resolution policy.
///
/// Constructed once at startup and shared by reference; first match wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingRules {
    rules: Vec<RewriteRule>,
    strip_version_suffix: bool,
}

impl MappingRules {
    /// Build from explicit rules.
    pub fn new(rules: Vec<RewriteRule>) -> Self {
        Self {
            rules,
            strip_version_suffix: false,
        }
    }

    /// Parse `prefix:replacement[:prefix:replacement...]`.
    ///
    /// Blank input yields no rules. A trailing unpaired field is ignored, as is
    /// any pair whose prefix is empty after normalization.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }

        let fields: Vec<&str> = raw.trim().split(FIELD_SEPARATOR).collect();
        let rules = fields
            .chunks_exact(2)
            .map(|pair| RewriteRule::new(pair[0], pair[1]))
            .filter(|rule| {
                if rule.path_prefix.is_empty() {
                    tracing::warn!(repo_prefix = %rule.repo_prefix, "ignoring mapping with empty path prefix");
                    false
                } else {
                    true
                }
            })
            .collect();

        if fields.len() % 2 != 0 {
            tracing::warn!(
                field = fields[fields.len() - 1],
                "ignoring unpaired trailing field in URL mappings"
            );
        }

        Self::new(rules)
    }

    /// Enable or disable stripping a trailing `/vN` from resolved names.
    pub fn with_version_suffix_stripping(mut self, enabled: bool) -> Self {
        self.strip_version_suffix = enabled;
        self
    }

    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn strips_version_suffix(&self) -> bool {
        self.strip_version_suffix
    }

    /// Resolve an inbound path to a repository name under these rules.
    pub fn resolve(&self, path: &str) -> String {
        let name = super::resolve(path, &self.rules);
        if self.strip_version_suffix {
            super::strip_version_suffix(&name).to_string()
        } else {
            name
        }
    }

    /// Map a repository name back to the vanity path that resolves to it.
    pub fn vanity_path(&self, repo_name: &str) -> String {
        super::vanity_path(repo_name, &self.rules)
    }
}
