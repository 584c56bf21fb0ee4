// Go import descriptor.
// Values for the go-import and go-source meta tags of a vanity path.

use serde::Serialize;

/// Where a vanity import path points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoImport {
    /// Import path as typed by users, e.g. `go.example.com/libs/checksum`.
    pub import_path: String,
    /// Version control system; always `git`.
    pub vcs: &'static str,
    /// Repository root URL.
    pub repo_url: String,
    /// Branch used for source links.
    pub branch: String,
}

impl GoImport {
    /// Build the descriptor for `path` on `domain`, served from `owner/repo_name` on GitHub.
    pub fn new(domain: &str, path: &str, owner: &str, repo_name: &str) -> Self {
        let domain = domain.trim_end_matches('/');
        let path = path.trim_end_matches('/');
        let path = if path.is_empty() || path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };

        Self {
            import_path: format!("{}{}", domain, path),
            vcs: "git",
            repo_url: format!("https://github.com/{}/{}", owner, repo_name),
            branch: "main".to_string(),
        }
    }

    /// Use the repository's default branch for source links.
    pub fn with_branch(mut self, branch: &str) -> Self {
        if !branch.is_empty() {
            self.branch = branch.to_string();
        }
        self
    }

    /// Content of the `go-import` meta tag.
    pub fn go_import(&self) -> String {
        format!("{} {} {}", self.import_path, self.vcs, self.repo_url)
    }

    /// Content of the `go-source` meta tag.
    pub fn go_source(&self) -> String {
        let url = &self.repo_url;
        let branch = &self.branch;
        format!(
            "{} {url} {url}/tree/{branch}{{/dir}} {url}/blob/{branch}{{/dir}}/{{file}}#L{{line}}",
            self.import_path
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_go_import() {
        let import = GoImport::new("go.example.com", "/libs/checksum", "octo", "go-lib-checksum");
        assert_eq!(import.import_path, "go.example.com/libs/checksum");
        assert_eq!(
            import.go_import(),
            "go.example.com/libs/checksum git https://github.com/octo/go-lib-checksum"
        );
    }

    #[test]
    fn test_go_source_uses_branch() {
        let import = GoImport::new("go.example.com/", "tool", "octo", "tool").with_branch("trunk");
        assert_eq!(
            import.go_source(),
            "go.example.com/tool https://github.com/octo/tool \
             https://github.com/octo/tool/tree/trunk{/dir} \
             https://github.com/octo/tool/blob/trunk{/dir}/{file}#L{line}"
        );
    }
}
