// Path resolution.
// Pure functions mapping vanity paths to repository names and back.

use once_cell::sync::Lazy;
use regex::Regex;

use super::rules::RewriteRule;

/// Matches a trailing major-version segment such as `/v2`.
static VERSION_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/v\d+$").expect("version suffix pattern is valid"));

/// Strip a single leading `/`.
pub fn normalize(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

/// Resolve `path` to a repository name. The first matching rule wins; with no
/// match the normalized path is returned unchanged.
pub fn resolve(path: &str, rules: &[RewriteRule]) -> String {
    let path = normalize(path);

    rules
        .iter()
        .find_map(|rule| {
            rule.match_path(path)
                .map(|remainder| format!("{}{}", rule.repo_prefix, remainder))
        })
        .unwrap_or_else(|| path.to_string())
}

/// Remove a trailing `/vN` major-version segment, if present.
pub fn strip_version_suffix(name: &str) -> &str {
    match VERSION_SUFFIX.find(name) {
        Some(m) => &name[..m.start()],
        None => name,
    }
}

/// Inverse of [`resolve`] for listing pages: the vanity path that leads to
/// `repo_name`, with a leading `/`.
pub fn vanity_path(repo_name: &str, rules: &[RewriteRule]) -> String {
    rules
        .iter()
        .filter(|rule| !rule.repo_prefix.is_empty())
        .find_map(|rule| {
            repo_name
                .strip_prefix(rule.repo_prefix.as_str())
                .filter(|rest| !rest.is_empty())
                .map(|rest| format!("/{}/{}", rule.path_prefix, rest))
        })
        .unwrap_or_else(|| format!("/{}", repo_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(pairs: &[(&str, &str)]) -> Vec<RewriteRule> {
        pairs.iter().map(|(p, r)| RewriteRule::new(p, r)).collect()
    }

    #[test]
    fn test_identity_without_rules() {
        for path in ["/foo", "foo", "/foo/bar/baz", "/", ""] {
            assert_eq!(resolve(path, &[]), normalize(path));
        }
    }

    #[test]
    fn test_prefix_replacement() {
        let rules = rules(&[("libs", "go-lib-")]);
        assert_eq!(resolve("/libs/checksum", &rules), "go-lib-checksum");
        assert_eq!(resolve("/libs/a/b", &rules), "go-lib-a/b");
        assert_eq!(resolve("libs/checksum", &rules), "go-lib-checksum");
    }

    #[test]
    fn test_exact_prefix_path() {
        let rules = rules(&[("tools", "go-tools")]);
        assert_eq!(resolve("/tools", &rules), "go-tools");
    }

    #[test]
    fn test_no_partial_segment_match() {
        let rules = rules(&[("lib", "go-lib-")]);
        assert_eq!(resolve("/library/x", &rules), "library/x");
    }

    #[test]
    fn test_first_rule_wins() {
        let rules = rules(&[("libs", "first-"), ("libs", "second-")]);
        assert_eq!(resolve("/libs/x", &rules), "first-x");

        let rules = super::super::rules::MappingRules::parse("a:one-:a/b:two-");
        assert_eq!(rules.resolve("/a/b/c"), "one-b/c");
    }

    #[test]
    fn test_unmatched_falls_through() {
        let rules = rules(&[("libs", "go-lib-")]);
        assert_eq!(resolve("/foo", &rules), "foo");
    }

    #[test]
    fn test_strip_version_suffix() {
        assert_eq!(strip_version_suffix("foo/v2"), "foo");
        assert_eq!(strip_version_suffix("foo/v10"), "foo");
        assert_eq!(strip_version_suffix("foov2"), "foov2");
        assert_eq!(strip_version_suffix("foo/v"), "foo/v");
        assert_eq!(strip_version_suffix("foo/v2/bar"), "foo/v2/bar");
    }

    #[test]
    fn test_vanity_path() {
        let rules = rules(&[("libs", "go-lib-"), ("utils", "go-util-")]);
        assert_eq!(vanity_path("go-lib-checksum", &rules), "/libs/checksum");
        assert_eq!(vanity_path("go-util-retry", &rules), "/utils/retry");
        assert_eq!(vanity_path("standalone", &rules), "/standalone");
        assert_eq!(vanity_path("go-lib-", &rules), "/go-lib-");
        assert_eq!(vanity_path("standalone", &[]), "/standalone");
    }

    #[test]
    fn test_vanity_path_round_trips_through_resolve() {
        let rules = rules(&[("libs", "go-lib-")]);
        let path = vanity_path("go-lib-checksum", &rules);
        assert_eq!(resolve(&path, &rules), "go-lib-checksum");
    }
}
