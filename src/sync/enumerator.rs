use crate::models::Feed;
use crate::store::Store;
use std::collections::VecDeque;

pub const FEED_BATCH_SIZE: usize = 20;

/// Active feeds in store order, loaded one batch at a time.
pub struct ActiveFeeds<'a> {
    store: &'a dyn Store,
    total: usize,
    next_start: usize,
    buffer: VecDeque<Feed>,
}

impl<'a> ActiveFeeds<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        let total = match store.count_feeds() {
            Ok(total) => total,
            Err(err) => {
                log::error!("Failed to count feeds: {err}");
                0
            }
        };

        Self {
            store,
            total,
            next_start: 0,
            buffer: VecDeque::new(),
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    fn load_next_batch(&mut self) {
        let start = self.next_start;
        self.next_start += FEED_BATCH_SIZE;

        match self.store.get_feeds(start, FEED_BATCH_SIZE) {
            Ok(feeds) => self
                .buffer
                .extend(feeds.into_iter().filter(Feed::is_active)),
            Err(err) => log::error!("Failed to load feeds starting at {start}: {err}"),
        }
    }
}

impl Iterator for ActiveFeeds<'_> {
    type Item = Feed;

    fn next(&mut self) -> Option<Feed> {
        loop {
            if let Some(feed) = self.buffer.pop_front() {
                return Some(feed);
            }

            if self.next_start >= self.total {
                return None;
            }

            self.load_next_batch();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ActiveFeeds;
    use crate::models::{Feed, Origin};
    use crate::store::{MockStore, SessionError};
    use chrono::{TimeZone, Utc};
    use mockall::predicate::eq;
    use mockall::Sequence;

    fn feed(id: &str, inactive: bool) -> Feed {
        Feed {
            id: id.to_string(),
            name: format!("Feed {id}"),
            creator: "alice".to_string(),
            created: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            inactive,
            kind: "markdown_recursive".to_string(),
            url: format!("https://reddit.com/r/x/{id}"),
            notify: false,
            origin: Origin::Unresolved,
        }
    }

    fn ids(feeds: ActiveFeeds) -> Vec<String> {
        feeds.map(|feed| feed.id).collect()
    }

    #[test]
    fn it_pages_through_all_feeds_and_skips_inactive_ones() {
        let mut store = MockStore::new();
        let mut seq = Sequence::new();

        store.expect_count_feeds().times(1).returning(|| Ok(45));
        store
            .expect_get_feeds()
            .with(eq(0), eq(20))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(vec![feed("a", false), feed("b", true)]));
        store
            .expect_get_feeds()
            .with(eq(20), eq(20))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(vec![feed("c", false)]));
        store
            .expect_get_feeds()
            .with(eq(40), eq(20))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(vec![feed("d", false)]));

        assert_eq!(ids(ActiveFeeds::new(&store)), vec!["a", "c", "d"]);
    }

    #[test]
    fn it_skips_failed_batches() {
        let mut store = MockStore::new();

        store.expect_count_feeds().returning(|| Ok(40));
        store
            .expect_get_feeds()
            .with(eq(0), eq(20))
            .returning(|_, _| Err(SessionError::new("timeout")));
        store
            .expect_get_feeds()
            .with(eq(20), eq(20))
            .returning(|_, _| Ok(vec![feed("c", false)]));

        assert_eq!(ids(ActiveFeeds::new(&store)), vec!["c"]);
    }

    #[test]
    fn it_treats_a_failed_count_as_no_feeds() {
        let mut store = MockStore::new();

        store
            .expect_count_feeds()
            .returning(|| Err(SessionError::new("Invalid API key")));
        store.expect_get_feeds().never();

        let feeds = ActiveFeeds::new(&store);

        assert_eq!(feeds.total(), 0);
        assert!(ids(feeds).is_empty());
    }

    #[test]
    fn it_loads_batches_lazily() {
        let mut store = MockStore::new();

        store.expect_count_feeds().returning(|| Ok(40));
        store
            .expect_get_feeds()
            .with(eq(0), eq(20))
            .times(1)
            .returning(|_, _| Ok(vec![feed("a", false)]));
        store.expect_get_feeds().with(eq(20), eq(20)).never();

        let mut feeds = ActiveFeeds::new(&store);

        assert_eq!(feeds.next().map(|feed| feed.id), Some("a".to_string()));
    }
}
