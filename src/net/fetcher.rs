use reqwest::StatusCode;
use thiserror::Error;
use tokio::sync::mpsc;
use url::Url;

use super::api::{SearchResponse, Story};

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {0}")]
    Status(StatusCode),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Terminal outcome of one fetch task, delivered over the session's channel.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// The response decoded cleanly; `page` is the page number echoed in the
    /// response body.
    Success { hits: Vec<Story>, page: u32 },
    /// Transport errors, non-2xx statuses, and undecodable bodies all land
    /// here, carrying a human-readable description.
    Error { message: String },
}

/// Spawns one asynchronous fetch task per issued URL.
///
/// Tasks are never cancelled: a task whose URL has been superseded by a newer
/// search still runs to completion and still delivers its outcome.
pub struct StoryFetcher {
    client: reqwest::Client,
}

impl StoryFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("story-search/0.1")
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Starts fetching `url`, reporting exactly one outcome on `tx`.
    ///
    /// Must be called from within a tokio runtime context.
    pub fn fetch(&self, url: &str, tx: mpsc::UnboundedSender<FetchOutcome>) {
        let client = self.client.clone();
        let url = url.to_string();

        tokio::spawn(async move {
            let outcome = match Self::fetch_page(client, &url).await {
                Ok(response) => FetchOutcome::Success {
                    hits: response.hits,
                    page: response.page,
                },
                Err(e) => {
                    log::warn!("fetch failed for {}: {}", url, e);
                    FetchOutcome::Error {
                        message: e.to_string(),
                    }
                }
            };
            let _ = tx.send(outcome);
        });
    }

    async fn fetch_page(client: reqwest::Client, url: &str) -> Result<SearchResponse, FetchError> {
        let url = Url::parse(url)?;

        let response = client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl Default for StoryFetcher {
    fn default() -> Self {
        Self::new()
    }
}
