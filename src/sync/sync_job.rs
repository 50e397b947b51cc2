use crate::store::Store;
use crate::sync::committer::CommitOutcome;
use crate::sync::enumerator::ActiveFeeds;
use crate::sync::fetcher::ContentFetcher;
use crate::sync::sync_feed_job::SyncFeedJob;

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct CycleReport {
    pub feeds: usize,
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub failed: usize,
}

/// One pass over every active feed.
pub struct SyncJob<'a> {
    store: &'a dyn Store,
    fetcher: &'a ContentFetcher,
}

impl<'a> SyncJob<'a> {
    pub fn new(store: &'a dyn Store, fetcher: &'a ContentFetcher) -> Self {
        Self { store, fetcher }
    }

    pub fn execute(&self) -> CycleReport {
        let feeds = ActiveFeeds::new(self.store);
        let sync_feed_job = SyncFeedJob::new(self.store, self.fetcher);
        let mut report = CycleReport::default();

        log::info!("Started syncing feeds. Total number: {}", feeds.total());

        for mut feed in feeds {
            report.feeds += 1;

            match sync_feed_job.sync_feed(&mut feed) {
                Ok(CommitOutcome::Created) => report.created += 1,
                Ok(CommitOutcome::Updated) => report.updated += 1,
                Ok(CommitOutcome::Unchanged) => report.unchanged += 1,
                Err(_) => report.failed += 1,
            }
        }

        log::info!(
            "Finished syncing {} feeds: {} created, {} updated, {} unchanged, {} failed",
            report.feeds,
            report.created,
            report.updated,
            report.unchanged,
            report.failed
        );

        report
    }
}
