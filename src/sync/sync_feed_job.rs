use crate::models::Feed;
use crate::store::Store;
use crate::sync::committer::{self, CommitOutcome};
use crate::sync::fetcher::ContentFetcher;
use crate::sync::{navigator, origin, SyncError};

/// Runs one feed through origin resolution, navigation, fetching and commit.
pub struct SyncFeedJob<'a> {
    store: &'a dyn Store,
    fetcher: &'a ContentFetcher,
}

impl<'a> SyncFeedJob<'a> {
    pub fn new(store: &'a dyn Store, fetcher: &'a ContentFetcher) -> Self {
        Self { store, fetcher }
    }

    /// Errors end here as log lines; the feed is retried next cycle.
    pub fn sync_feed(&self, feed: &mut Feed) -> Result<CommitOutcome, SyncError> {
        let result = self.execute(feed);

        match &result {
            Err(error) => log::error!("Failed to sync feed {}: {}", feed.id, error),
            Ok(CommitOutcome::Unchanged) => log::debug!("Feed {} is up to date", feed.id),
            Ok(_) => (),
        }

        result
    }

    pub fn execute(&self, feed: &mut Feed) -> Result<CommitOutcome, SyncError> {
        navigator::strategy(feed)?;

        feed.origin = origin::resolve(&feed.url)?;

        let navigation = navigator::navigate(self.store, feed)?;
        let fetched = self.fetcher.fetch(feed.origin, &navigation.next_url)?;

        committer::commit(self.store, feed, navigation, fetched)
    }
}
