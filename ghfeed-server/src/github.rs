//! Client for the GitHub REST API endpoints the feed needs.

use std::time::Duration;

use ghfeed_core::{Event, FeedError, FeedResult, ITEMS_PER_PAGE};
use reqwest::header::{ACCEPT, AUTHORIZATION, LINK};
use reqwest::{RequestBuilder, StatusCode};
use tracing::debug;
use url::Url;

use crate::config::ServerConfig;

const ACCEPT_GITHUB_V3: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = "GitHub-Activity-Tracker";

/// One page of a user's events plus the raw `Link` header that came with it.
#[derive(Debug)]
pub struct EventPage {
    pub events: Vec<Event>,
    pub link: Option<String>,
}

#[derive(Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
    timeout: Duration,
}

impl GithubClient {
    pub fn new(config: &ServerConfig) -> FeedResult<Self> {
        let base_url = Url::parse(&config.github_api_url).map_err(|e| {
            FeedError::Config(format!("Invalid GITHUB_API_URL '{}': {e}", config.github_api_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(FeedError::Config(format!(
                "Invalid GITHUB_API_URL '{}'",
                config.github_api_url
            )));
        }

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.github_timeout())
            .build()
            .map_err(|e| FeedError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(GithubClient {
            http,
            base_url,
            token: config.token().map(str::to_string),
            timeout: config.github_timeout(),
        })
    }

    /// GET /users/{username}, succeeding only if the account exists.
    pub async fn check_user(&self, username: &str) -> FeedResult<()> {
        let url = self.endpoint(&["users", username]);
        debug!(%url, "checking GitHub user");

        let resp = self.get(url.clone()).send().await.map_err(|e| self.request_error(e))?;

        match resp.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(FeedError::UserNotFound(username.to_string())),
            status => Err(FeedError::UpstreamStatus {
                status: status.as_u16(),
                url: url.to_string(),
            }),
        }
    }

    /// GET /users/{username}/events?per_page=15&page={page}
    pub async fn list_events(&self, username: &str, page: u32) -> FeedResult<EventPage> {
        let mut url = self.endpoint(&["users", username, "events"]);
        url.query_pairs_mut()
            .append_pair("per_page", &ITEMS_PER_PAGE.to_string())
            .append_pair("page", &page.to_string());
        debug!(%url, "fetching GitHub events");

        let resp = self.get(url.clone()).send().await.map_err(|e| self.request_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FeedError::UpstreamStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let link = resp
            .headers()
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let events = resp.json::<Vec<Event>>().await.map_err(|e| {
            if e.is_timeout() {
                FeedError::Timeout(self.timeout.as_secs())
            } else {
                FeedError::Decode(e.to_string())
            }
        })?;

        Ok(EventPage { events, link })
    }

    fn get(&self, url: Url) -> RequestBuilder {
        let request = self.http.get(url).header(ACCEPT, ACCEPT_GITHUB_V3);
        match &self.token {
            Some(token) => request.header(AUTHORIZATION, format!("token {token}")),
            None => request,
        }
    }

    /// Base URL with `segments` appended as percent-encoded path segments.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request_error(&self, err: reqwest::Error) -> FeedError {
        if err.is_timeout() {
            FeedError::Timeout(self.timeout.as_secs())
        } else {
            FeedError::Upstream(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn client(api_url: &str) -> FeedResult<GithubClient> {
        let vars = HashMap::from([("GITHUB_API_URL".to_string(), api_url.to_string())]);
        GithubClient::new(&ServerConfig::from_vars(vars).unwrap())
    }

    #[test]
    fn test_endpoint_encodes_username() {
        let client = client("https://api.github.com").unwrap();
        let url = client.endpoint(&["users", "a b/c", "events"]);
        assert_eq!(url.as_str(), "https://api.github.com/users/a%20b%2Fc/events");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = client("http://localhost:9000/api/v3/").unwrap();
        let url = client.endpoint(&["users", "octocat"]);
        assert_eq!(url.as_str(), "http://localhost:9000/api/v3/users/octocat");
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(client("not a url").is_err());
        assert!(client("mailto:someone@example.com").is_err());
    }
}
