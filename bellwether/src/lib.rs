pub mod banner;
pub mod checker;
pub mod client;
pub mod feed;

pub use banner::{dismiss, render_banners, BannerHost, InMemoryPage, Viewport};
pub use checker::{AdvisoryChecker, CheckError, FEED_URL};
pub use feed::{FeedEntry, FeedSnapshot, StatusUpdate};

use tracing::warn;

/// One-shot startup flow: check the feed, then render the banners.
///
/// Any [`CheckError`] is logged and coerced to "no active issues" here, at
/// the caller boundary, so an infrastructure failure never shows a false
/// alarm. Returns the active entry ids (empty when none were found or when
/// the check failed).
pub async fn run_advisory_check(
    checker: &AdvisoryChecker,
    host: &mut dyn BannerHost,
    viewport: Viewport,
) -> Vec<String> {
    let active_ids = match checker.active_issue_ids().await {
        Ok(ids) => ids,
        Err(error) => {
            warn!(%error, "advisory check failed; assuming no active issues");
            Vec::new()
        }
    };
    render_banners(host, viewport, !active_ids.is_empty());
    active_ids
}
