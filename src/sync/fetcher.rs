use crate::models::timestamp;
use crate::models::Origin;
use crate::sync::reader::{FetchError, FetchedPost, ReadPost};
use crate::sync::SyncError;
use url::Url;

/// Content normalized for storing as a feed document.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FetchedDocument {
    pub title: String,
    pub body: String,
    pub author: String,
    /// UTC, `YYYY-MM-DD HH:MM:SS`.
    pub posted: String,
}

pub struct ContentFetcher {
    reddit: Box<dyn ReadPost>,
}

impl ContentFetcher {
    pub fn new(reddit: impl ReadPost + 'static) -> Self {
        Self {
            reddit: Box::new(reddit),
        }
    }

    pub fn fetch(&self, origin: Origin, url: &str) -> Result<FetchedDocument, SyncError> {
        let reader = match origin {
            Origin::Reddit => &self.reddit,
            Origin::Unresolved => return Err(unresolved(url)),
        };

        log::info!("Fetching {url} from {origin}");

        let fetch_error = |source: FetchError| SyncError::Fetch {
            url: url.to_string(),
            source,
        };

        let post = reader.read_post(url).map_err(fetch_error)?;

        normalize(post).map_err(fetch_error)
    }
}

fn unresolved(url: &str) -> SyncError {
    match Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
    {
        Some(hostname) => SyncError::UnresolvedOrigin { hostname },
        None => SyncError::InvalidUrl {
            url: url.to_string(),
        },
    }
}

fn normalize(post: FetchedPost) -> Result<FetchedDocument, FetchError> {
    let author = post.author.ok_or(FetchError::MissingAuthor)?;
    let posted =
        timestamp::format_unix(post.created_utc).ok_or_else(|| FetchError::Malformed {
            msg: format!("invalid created_utc {}", post.created_utc),
        })?;

    Ok(FetchedDocument {
        title: post.title,
        body: post.body,
        author,
        posted,
    })
}
