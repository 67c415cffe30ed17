use scraper::{ElementRef, Html, Selector};

use crate::checker::CheckError;

/// Status label that closes out an entry. Compared exactly, case-sensitive.
pub const RESOLVED_LABEL: &str = "Resolved";

/// One timestamped status update inside a feed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    /// Text of the emphasized status element, when the update carries one.
    pub label: Option<String>,
    /// Full text of the update paragraph.
    pub body: String,
}

/// One reported event in the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    /// Feed-assigned opaque identifier. Guaranteed present for entries
    /// that are not resolved; see [`FeedSnapshot::parse`].
    pub id: Option<String>,
    /// Ordered status updates, oldest first.
    pub updates: Vec<StatusUpdate>,
}

impl FeedEntry {
    /// An entry is resolved iff its *most recent* update carries the exact
    /// "Resolved" label. Earlier updates do not count.
    pub fn resolved(&self) -> bool {
        self.updates
            .last()
            .is_some_and(|u| u.label.as_deref() == Some(RESOLVED_LABEL))
    }
}

/// Every entry extracted from one fetch of the feed. Scoped to a single
/// check invocation and never cached across calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSnapshot {
    pub entries: Vec<FeedEntry>,
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("invalid selector")
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

impl FeedSnapshot {
    /// Parse a fetched feed document.
    ///
    /// The parser is lenient, so "unparsable" is detected as the absence of
    /// a `feed` element. A well-formed feed with zero entries parses fine
    /// and simply has no active issues.
    ///
    /// Structural invariants enforced per entry, any violation aborting the
    /// whole snapshot rather than skipping the entry:
    /// - at least one update paragraph,
    /// - a status label element on the most recent update,
    /// - a non-empty identifier whenever the entry is unresolved.
    pub fn parse(document: &str) -> Result<Self, CheckError> {
        let dom = Html::parse_document(document);
        let feed_sel = selector("feed");
        let entry_sel = selector("feed > entry");
        let update_sel = selector("content > p");
        let label_sel = selector("strong");
        let id_sel = selector("id");

        if dom.select(&feed_sel).next().is_none() {
            return Err(CheckError::Parse);
        }

        let mut entries = Vec::new();
        for entry_node in dom.select(&entry_sel) {
            let updates: Vec<StatusUpdate> = entry_node
                .select(&update_sel)
                .map(|p| StatusUpdate {
                    label: p.select(&label_sel).next().map(element_text),
                    body: element_text(p),
                })
                .collect();

            match updates.last() {
                None => {
                    return Err(CheckError::Structure(
                        "entry has no status updates".into(),
                    ));
                }
                Some(latest) if latest.label.is_none() => {
                    return Err(CheckError::Structure(
                        "latest update has no status label".into(),
                    ));
                }
                Some(_) => {}
            }

            let id = entry_node
                .select(&id_sel)
                .next()
                .map(|el| element_text(el).trim().to_string())
                .filter(|id| !id.is_empty());

            let entry = FeedEntry { id, updates };
            if !entry.resolved() && entry.id.is_none() {
                return Err(CheckError::Structure(
                    "active entry has no identifier".into(),
                ));
            }
            entries.push(entry);
        }

        Ok(Self { entries })
    }

    /// Identifiers of entries whose most recent update is not "Resolved".
    pub fn active_ids(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| !e.resolved())
            .filter_map(|e| e.id.as_deref())
            .collect()
    }

    pub fn has_active_issue(&self) -> bool {
        self.entries.iter().any(|e| !e.resolved())
    }
}
