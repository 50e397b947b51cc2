use crate::models::{Feed, FeedKind};
use crate::store::{DocumentQuery, Store};
use crate::sync::SyncError;
use once_cell::sync::Lazy;
use regex::Regex;

/// `[next](target)`: the word is case-insensitive and may be followed by
/// anything except word characters and `]` before the closing bracket.
static NEXT_LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\[next[^\w\]]*\]\(([^)]*)\)").expect("valid next link regex")
});

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum CommitMode {
    Create,
    /// Re-fetching the chain head to pick up edits made upstream.
    Update {
        document_id: String,
        previous_body: String,
    },
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Navigation {
    pub next_url: String,
    pub mode: CommitMode,
}

pub fn find_next_link(body: &str) -> Option<&str> {
    NEXT_LINK_RE
        .captures(body)
        .and_then(|captures| captures.get(1))
        .map(|target| target.as_str().trim())
}

pub fn strategy(feed: &Feed) -> Result<FeedKind, SyncError> {
    feed.feed_kind().ok_or_else(|| SyncError::UnsupportedFeedKind {
        kind: feed.kind.clone(),
    })
}

pub fn navigate(store: &dyn Store, feed: &Feed) -> Result<Navigation, SyncError> {
    match strategy(feed)? {
        FeedKind::MarkdownRecursive => navigate_markdown_chain(store, feed),
    }
}

fn navigate_markdown_chain(store: &dyn Store, feed: &Feed) -> Result<Navigation, SyncError> {
    let documents = store.get_feed_documents(&DocumentQuery::latest(&feed.id))?;

    let Some(head) = documents.into_iter().next() else {
        return Ok(Navigation {
            next_url: feed.url.clone(),
            mode: CommitMode::Create,
        });
    };

    if let Some(next_url) = find_next_link(&head.body) {
        return Ok(Navigation {
            next_url: next_url.to_string(),
            mode: CommitMode::Create,
        });
    }

    let next_url = head.url.ok_or_else(|| SyncError::MissingSourceUrl {
        document_id: head.id.clone(),
    })?;

    Ok(Navigation {
        next_url,
        mode: CommitMode::Update {
            document_id: head.id,
            previous_body: head.body,
        },
    })
}
