use tracing::instrument;

use crate::checker::CheckError;

/// Thin HTTP client for fetching the status feed.
pub struct FeedClient {
    client: reqwest::Client,
}

impl FeedClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("bellwether")
                .build()
                .expect("failed to build HTTP client"),
        }
    }

    /// Fetch the feed body as text. A rejected request, a non-success
    /// status, and a blank body are all failures; an empty *feed* is not
    /// the client's concern.
    #[instrument(skip(self))]
    pub async fn fetch_text(&self, url: &str) -> Result<String, CheckError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CheckError::Http(status));
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Err(CheckError::EmptyResponse);
        }
        Ok(body)
    }
}

impl Default for FeedClient {
    fn default() -> Self {
        Self::new()
    }
}
