//! HTTP client for communicating with ghfeed-server

use std::time::Duration;

use anyhow::{Context, Result};
use ghfeed_core::{ActivityView, CollectionKind, PageDescriptor};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5001";

/// HTTP client for ghfeed-server
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
}

// Response types matching server API

#[derive(Deserialize)]
pub struct ChangesPage {
    pub events: Vec<ActivityView>,
    pub pagination: PageDescriptor,
}

#[derive(Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl Client {
    /// Connect to a running server, failing early if it does not answer.
    pub async fn connect(server_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(server_url).with_context(|| format!("Invalid server URL: {server_url}"))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Invalid server URL: {}", server_url);
        }

        let client = Self {
            http: reqwest::Client::new(),
            base_url,
        };

        client.health_check().await.with_context(|| {
            format!("Could not reach ghfeed-server at {server_url}. Is it running?")
        })?;

        Ok(client)
    }

    async fn health_check(&self) -> Result<()> {
        self.http
            .get(self.url(&["health"]))
            .timeout(Duration::from_secs(2))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// GET /api/changes
    pub async fn changes(&self, username: &str, page: u32) -> Result<ChangesPage> {
        let mut url = self.url(&["api", "changes"]);
        url.query_pairs_mut()
            .append_pair("username", username)
            .append_pair("page", &page.to_string());

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .context("Failed to connect to server")?;

        if !resp.status().is_success() {
            let err: ErrorResponse = resp.json().await?;
            anyhow::bail!("{}", err.error);
        }

        resp.json().await.context("Unexpected response from server")
    }

    /// GET /api/{collection}
    pub async fn saved(&self, kind: CollectionKind) -> Result<Vec<Value>> {
        let resp = self
            .http
            .get(self.url(&["api", kind.slug()]))
            .send()
            .await
            .context("Failed to connect to server")?;

        if !resp.status().is_success() {
            let err: ErrorResponse = resp.json().await?;
            anyhow::bail!("{}", err.error);
        }

        Ok(resp.json().await?)
    }

    /// POST /api/{collection}
    pub async fn save(&self, kind: CollectionKind, activity: &ActivityView) -> Result<()> {
        let resp = self
            .http
            .post(self.url(&["api", kind.slug()]))
            .json(activity)
            .send()
            .await
            .context("Failed to connect to server")?;

        if !resp.status().is_success() {
            let err: ErrorResponse = resp.json().await?;
            anyhow::bail!("{}", err.error);
        }

        Ok(())
    }

    /// DELETE /api/{collection}/{id}
    pub async fn remove(&self, kind: CollectionKind, id: &str) -> Result<()> {
        let resp = self
            .http
            .delete(self.url(&["api", kind.slug(), id]))
            .send()
            .await
            .context("Failed to connect to server")?;

        if !resp.status().is_success() {
            let err: ErrorResponse = resp.json().await?;
            anyhow::bail!("{}", err.error);
        }

        Ok(())
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `connect` rejects cannot-be-a-base URLs
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> Client {
        Client {
            http: reqwest::Client::new(),
            base_url: Url::parse(base).unwrap(),
        }
    }

    #[test]
    fn test_url_encodes_ids() {
        let client = client(DEFAULT_SERVER_URL);
        let url = client.url(&["api", CollectionKind::ReadLater.slug(), "a/b c"]);
        assert_eq!(url.as_str(), "http://127.0.0.1:5001/api/read-later/a%2Fb%20c");
    }

    #[test]
    fn test_url_under_prefix() {
        let client = client("http://localhost:8080/ghfeed/");
        assert_eq!(
            client.url(&["api", "favorites"]).as_str(),
            "http://localhost:8080/ghfeed/api/favorites"
        );
    }

    #[tokio::test]
    async fn test_connect_reports_unreachable_server() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = Client::connect(&format!("http://{addr}")).await.err().unwrap();
        assert!(err.to_string().contains("Could not reach ghfeed-server"));
    }

    #[tokio::test]
    async fn test_connect_rejects_invalid_url() {
        assert!(Client::connect("not a url").await.is_err());
    }
}
