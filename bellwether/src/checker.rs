use tracing::instrument;

use crate::client::FeedClient;
use crate::feed::FeedSnapshot;

/// Production status feed polled by [`AdvisoryChecker::new`].
pub const FEED_URL: &str = "https://ethsbell.instatus.com/history.atom";

/// Failure classes of one advisory check. The checker surfaces these as-is;
/// coercing them to "no active issue" is the caller's decision.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("feed request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("feed returned HTTP {0}")]
    Http(reqwest::StatusCode),

    #[error("feed body was empty")]
    EmptyResponse,

    #[error("feed document could not be parsed")]
    Parse,

    #[error("malformed feed entry: {0}")]
    Structure(String),
}

/// Polls the status feed and reports unresolved advisories.
pub struct AdvisoryChecker {
    client: FeedClient,
    feed_url: String,
}

impl AdvisoryChecker {
    pub fn new() -> Self {
        Self::with_feed_url(FEED_URL)
    }

    /// Point the checker at a different feed, e.g. a mock server in tests.
    pub fn with_feed_url(url: impl Into<String>) -> Self {
        Self {
            client: FeedClient::new(),
            feed_url: url.into(),
        }
    }

    /// Identifiers of entries whose most recent update is not "Resolved".
    /// The snapshot is discarded once the ids are extracted.
    #[instrument(skip(self), fields(url = %self.feed_url))]
    pub async fn active_issue_ids(&self) -> Result<Vec<String>, CheckError> {
        let body = self.client.fetch_text(&self.feed_url).await?;
        let snapshot = FeedSnapshot::parse(&body)?;
        Ok(snapshot
            .active_ids()
            .into_iter()
            .map(str::to_owned)
            .collect())
    }

    /// True iff the feed currently lists at least one unresolved entry.
    pub async fn check_for_active_issues(&self) -> Result<bool, CheckError> {
        Ok(!self.active_issue_ids().await?.is_empty())
    }
}

impl Default for AdvisoryChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ACTIVE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Status</title>
  <entry>
    <id>https://status.example.com/incident/42</id>
    <title>Elevated error rates</title>
    <content type="xhtml"><p><strong>Investigating</strong> - We are looking into it.</p></content>
  </entry>
</feed>"#;

    const RESOLVED_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Status</title>
  <entry>
    <id>https://status.example.com/incident/41</id>
    <title>Degraded performance</title>
    <content type="xhtml"><p><strong>Investigating</strong> - Slow responses.</p><p><strong>Resolved</strong> - All good.</p></content>
  </entry>
</feed>"#;

    const NO_UPDATES_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Status</title>
  <entry>
    <id>https://status.example.com/incident/40</id>
    <title>Active incident</title>
    <content type="xhtml"><p><strong>Investigating</strong> - Ongoing.</p></content>
  </entry>
  <entry>
    <id>https://status.example.com/incident/39</id>
    <title>Stub incident</title>
    <content type="xhtml"></content>
  </entry>
</feed>"#;

    async fn serve(status: u16, body: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/history.atom"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&server)
            .await;
        server
    }

    fn checker_for(server: &MockServer) -> AdvisoryChecker {
        AdvisoryChecker::with_feed_url(format!("{}/history.atom", server.uri()))
    }

    #[tokio::test]
    async fn active_feed_reports_an_issue() {
        let server = serve(200, ACTIVE_FEED).await;
        let checker = checker_for(&server);
        assert!(checker.check_for_active_issues().await.unwrap());
        assert_eq!(
            checker.active_issue_ids().await.unwrap(),
            vec!["https://status.example.com/incident/42"]
        );
    }

    #[tokio::test]
    async fn resolved_feed_reports_no_issue() {
        let server = serve(200, RESOLVED_FEED).await;
        let checker = checker_for(&server);
        assert!(!checker.check_for_active_issues().await.unwrap());
    }

    #[tokio::test]
    async fn http_error_status_is_a_failure() {
        let server = serve(500, "internal error").await;
        let err = checker_for(&server)
            .check_for_active_issues()
            .await
            .unwrap_err();
        assert!(matches!(err, CheckError::Http(status) if status.as_u16() == 500));
    }

    #[tokio::test]
    async fn blank_body_is_an_empty_response() {
        let server = serve(200, "  \n ").await;
        let err = checker_for(&server)
            .check_for_active_issues()
            .await
            .unwrap_err();
        assert!(matches!(err, CheckError::EmptyResponse));
    }

    #[tokio::test]
    async fn non_feed_body_is_a_parse_failure() {
        let server = serve(200, "<html><body>maintenance page</body></html>").await;
        let err = checker_for(&server)
            .check_for_active_issues()
            .await
            .unwrap_err();
        assert!(matches!(err, CheckError::Parse));
    }

    #[tokio::test]
    async fn rejected_request_is_a_network_failure() {
        // Nothing listens on this port.
        let checker = AdvisoryChecker::with_feed_url("http://127.0.0.1:1/history.atom");
        let err = checker.check_for_active_issues().await.unwrap_err();
        assert!(matches!(err, CheckError::Network(_)));
    }

    #[tokio::test]
    async fn zero_update_entry_fails_the_whole_check() {
        // The other entry is genuinely active, but the broken one aborts
        // the entire cycle rather than being skipped.
        let server = serve(200, NO_UPDATES_FEED).await;
        let err = checker_for(&server)
            .check_for_active_issues()
            .await
            .unwrap_err();
        assert!(matches!(err, CheckError::Structure(_)));
    }
}
