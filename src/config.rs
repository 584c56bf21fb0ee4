// Configuration for the resolver.
// Command-line/environment settings and the immutable engine configuration built from them.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, ValueEnum};

use crate::cache::DEFAULT_TTL;
use crate::error::{Result, VanityError};
use crate::github::GITHUB_API_BASE;
use crate::mapping::MappingRules;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Settings shared by every command. Each flag falls back to an environment variable.
#[derive(Debug, Clone, Args)]
pub struct Settings {
    /// GitHub user whose repositories back the vanity paths.
    /// Required by every command that talks to GitHub.
    #[arg(long, env = "GITHUB_USERNAME")]
    pub owner: Option<String>,

    /// Domain serving the vanity import paths, e.g. go.example.com.
    #[arg(long, env = "CUSTOM_DOMAIN", default_value = "")]
    pub domain: String,

    /// Rewrite rules as `prefix:replacement[:prefix:replacement...]`.
    #[arg(long, env = "URL_MAPPINGS", default_value = "")]
    pub mappings: String,

    /// GitHub token; requests are unauthenticated when absent.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Strip a trailing `/vN` from resolved repository names.
    #[arg(long, env = "GOVANITY_STRIP_VERSION_SUFFIX", default_value_t = false)]
    pub strip_version_suffix: bool,

    /// Language used to filter the owner's package list.
    #[arg(long, env = "GOVANITY_LANGUAGE", default_value = "Go")]
    pub language: String,

    /// Lifetime of cached metadata, in seconds.
    #[arg(long = "cache-ttl", env = "GOVANITY_CACHE_TTL", default_value_t = DEFAULT_TTL.as_secs())]
    pub cache_ttl_secs: u64,

    /// Cache directory; defaults to the platform cache directory.
    #[arg(long, env = "GOVANITY_CACHE_DIR", value_name = "PATH")]
    pub cache_dir: Option<PathBuf>,

    /// GitHub API base URL.
    #[arg(long, env = "GITHUB_API_URL", default_value = GITHUB_API_BASE)]
    pub api_url: String,

    /// Timeout for each GitHub API request, in seconds.
    #[arg(long = "request-timeout", env = "GOVANITY_REQUEST_TIMEOUT", default_value_t = 10)]
    pub request_timeout_secs: u64,

    /// Log output format.
    #[arg(long, env = "GOVANITY_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Immutable configuration consumed by the engine, built once at startup.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub owner: String,
    pub domain: String,
    pub rules: MappingRules,
    pub token: Option<String>,
    pub language: String,
    pub cache_ttl: Duration,
    pub cache_dir: Option<PathBuf>,
    pub api_url: String,
    pub request_timeout: Option<Duration>,
}

impl Settings {
    /// Mapping rules alone; needs no GitHub owner.
    pub fn mapping_rules(&self) -> MappingRules {
        MappingRules::parse(&self.mappings).with_version_suffix_stripping(self.strip_version_suffix)
    }

    /// Validate settings and build the engine configuration.
    pub fn engine_config(&self) -> Result<EngineConfig> {
        let owner = self.owner.as_deref().map(str::trim).unwrap_or_default();
        if owner.is_empty() {
            return Err(VanityError::Config(
                "GitHub owner is required (--owner or GITHUB_USERNAME)".to_string(),
            ));
        }
        if self.language.trim().is_empty() {
            return Err(VanityError::Config("language filter must not be empty".to_string()));
        }

        Ok(EngineConfig {
            owner: owner.to_string(),
            domain: self.domain.trim().to_string(),
            rules: self.mapping_rules(),
            token: self.token.clone().filter(|t| !t.trim().is_empty()),
            language: self.language.trim().to_string(),
            cache_ttl: Duration::from_secs(self.cache_ttl_secs),
            cache_dir: self.cache_dir.clone(),
            api_url: self.api_url.clone(),
            request_timeout: (self.request_timeout_secs > 0)
                .then(|| Duration::from_secs(self.request_timeout_secs)),
        })
    }
}
