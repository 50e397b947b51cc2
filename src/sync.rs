use crate::config::{Config, ConfigError};
use crate::store::{GraphqlSession, SessionError, Store};
use thiserror::Error;

pub mod committer;
pub mod enumerator;
pub mod fetcher;
pub mod navigator;
pub mod origin;
pub mod reader;
pub mod scheduler;
pub mod sync_feed_job;
pub mod sync_job;

pub use committer::CommitOutcome;
pub use fetcher::{ContentFetcher, FetchedDocument};
pub use navigator::{CommitMode, Navigation};
pub use reader::{FetchError, FetchedPost, ReadPost};
pub use scheduler::{FixedInterval, Schedule};
pub use sync_feed_job::SyncFeedJob;
pub use sync_job::{CycleReport, SyncJob};

/// Everything that stops one feed from syncing during a cycle.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum SyncError {
    #[error("invalid URL \"{url}\"")]
    InvalidUrl { url: String },
    #[error("could not determine origin for hostname \"{hostname}\"")]
    UnresolvedOrigin { hostname: String },
    #[error("invalid feed kind \"{kind}\"")]
    UnsupportedFeedKind { kind: String },
    #[error("document {document_id} has no source URL")]
    MissingSourceUrl { document_id: String },
    #[error("store error: {0}")]
    Session(#[from] SessionError),
    #[error("failed to fetch {url}: {source}")]
    Fetch { url: String, source: FetchError },
    #[error("store rejected {typename}: {message}")]
    CommitTypeMismatch { typename: String, message: String },
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build http client: {0}")]
    HttpClient(#[from] isahc::Error),
    #[error("store is unreachable: {0}")]
    Store(#[from] SessionError),
}

/// Connects to the store and Reddit, then syncs all feeds until the process is stopped.
pub fn start(config: &Config) -> Result<(), StartupError> {
    log::info!("Initializing");

    let http_client = crate::http_client::build(config.request_timeout())?;
    let session = GraphqlSession::from_config(&config.store, http_client.clone());

    let total = session.count_feeds()?;
    log::info!("Connected to the store, {total} feeds known");

    let reddit = reader::reddit::RedditReader::from_config(&config.reddit, http_client);
    let fetcher = ContentFetcher::new(reddit);
    let job = SyncJob::new(&session, &fetcher);

    let mut schedule = FixedInterval::new(config.fetch_delay());
    scheduler::run(&job, &mut schedule);

    Ok(())
}
