// GitHub API HTTP client.
// Handles optional authentication, rate limit headers, and status classification.

use std::time::Duration;

use reqwest::{
    Client, Response, StatusCode, Url,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};
use tracing::debug;

use crate::error::{Result, VanityError};

use super::types::RateLimit;

pub const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";
const CLIENT_USER_AGENT: &str = "govanity";

/// GitHub API client.
///
/// Holds no per-request state, so a single instance can serve concurrent
/// requests by shared reference.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: Url,
}

impl GitHubClient {
    /// Create a client against `base_url`, authenticating only when a token is given.
    pub fn new(base_url: &str, token: Option<&str>, timeout: Option<Duration>) -> Result<Self> {
        let mut headers = HeaderMap::new();

        if let Some(token) = token.filter(|t| !t.is_empty()) {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| VanityError::Config(format!("invalid GitHub token: {}", e)))?,
            );
        }
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(VanityError::Api)?;
        let base_url = Url::parse(base_url)
            .map_err(|e| VanityError::Config(format!("invalid API URL {:?}: {}", base_url, e)))?;

        Ok(Self { client, base_url })
    }

    /// Build a request URL by appending `segments` to the base URL path.
    ///
    /// Each segment is percent-encoded as a single path segment, so a name
    /// containing `/` cannot address a different endpoint. Empty, `.` and `..`
    /// segments are rejected before any request is made.
    fn endpoint_url(&self, segments: &[&str]) -> Result<Url> {
        if let Some(bad) = segments
            .iter()
            .find(|s| s.is_empty() || **s == "." || **s == "..")
        {
            return Err(VanityError::InvalidName((*bad).to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                VanityError::Config(format!("API URL cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Make a GET request to the GitHub API.
    pub async fn get(&self, segments: &[&str]) -> Result<Response> {
        let url = self.endpoint_url(segments)?;
        let response = self.client.get(url).send().await.map_err(VanityError::Api)?;

        self.check_response(response).await
    }

    /// Make a GET request with query parameters.
    pub async fn get_with_params<T: serde::Serialize + ?Sized>(
        &self,
        segments: &[&str],
        params: &T,
    ) -> Result<Response> {
        let url = self.endpoint_url(segments)?;
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(VanityError::Api)?;

        self.check_response(response).await
    }

    /// Check response status and convert errors.
    async fn check_response(&self, response: Response) -> Result<Response> {
        let rate_limit = rate_limit_from(&response);
        debug!(
            url = %response.url(),
            status = %response.status(),
            remaining = rate_limit.remaining,
            "GitHub API response"
        );

        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED => Err(VanityError::Unauthorized),
            StatusCode::NOT_FOUND => {
                let url = response.url().to_string();
                Err(VanityError::NotFound(url))
            }
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
                if rate_limit.limit > 0 && rate_limit.remaining == 0 =>
            {
                let reset_at = chrono::DateTime::from_timestamp(rate_limit.reset as i64, 0)
                    .map(|dt| dt.format("%H:%M:%S").to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                Err(VanityError::RateLimited { reset_at })
            }
            status => Err(VanityError::Status {
                status,
                body: response.text().await.unwrap_or_default(),
            }),
        }
    }
}

/// Read rate limit headers from a response.
fn rate_limit_from(response: &Response) -> RateLimit {
    let header = |name: &str| {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
    };

    RateLimit {
        limit: header("x-ratelimit-limit").unwrap_or_default(),
        remaining: header("x-ratelimit-remaining").unwrap_or_default(),
        reset: header("x-ratelimit-reset").unwrap_or_default(),
    }
}
