#![allow(dead_code)]

use chained_feeds::models::{Document, Feed, NewDocument, Origin};
use chained_feeds::store::{CommitResult, DocumentQuery, Notification, SessionError, Store};
use chained_feeds::sync::{FetchError, FetchedPost, ReadPost};
use chrono::{Duration, TimeZone, Utc};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum StoreWrite {
    Create(NewDocument),
    Update { id: String, body: String },
    Notify(Notification),
}

/// In-memory store that keeps documents between cycles and records writes.
#[derive(Default)]
pub struct FakeStore {
    pub feeds: Vec<Feed>,
    pub documents: RefCell<Vec<Document>>,
    pub writes: RefCell<Vec<StoreWrite>>,
    pub failing_batches: Vec<usize>,
}

impl FakeStore {
    pub fn with_feeds(feeds: Vec<Feed>) -> Self {
        Self {
            feeds,
            ..Default::default()
        }
    }

    pub fn take_writes(&self) -> Vec<StoreWrite> {
        self.writes.borrow_mut().drain(..).collect()
    }

    pub fn documents_for(&self, feed_id: &str) -> Vec<Document> {
        self.documents
            .borrow()
            .iter()
            .filter(|document| document.feed == feed_id)
            .cloned()
            .collect()
    }
}

impl Store for FakeStore {
    fn count_feeds(&self) -> Result<usize, SessionError> {
        Ok(self.feeds.len())
    }

    fn get_feeds(&self, start: usize, count: usize) -> Result<Vec<Feed>, SessionError> {
        if self.failing_batches.contains(&start) {
            return Err(SessionError::new(format!("batch {start} is unavailable")));
        }

        Ok(self.feeds.iter().skip(start).take(count).cloned().collect())
    }

    fn get_feed_documents(&self, query: &DocumentQuery) -> Result<Vec<Document>, SessionError> {
        let mut documents = self.documents_for(&query.feed);

        documents.sort_by_key(|document| document.created);

        if query.sorting.descending {
            documents.reverse();
        }

        Ok(documents
            .into_iter()
            .skip(query.start)
            .take(query.count)
            .collect())
    }

    fn create_feed_document(&self, document: &NewDocument) -> Result<CommitResult, SessionError> {
        self.writes
            .borrow_mut()
            .push(StoreWrite::Create(document.clone()));

        let mut documents = self.documents.borrow_mut();
        let number = documents.len() as i64 + 1;
        let created =
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(number);

        documents.push(Document {
            id: format!("D{number}"),
            feed: document.feed.clone(),
            author: Some(document.author.clone()),
            posted: None,
            body: document.body.clone(),
            body_html: String::new(),
            created,
            updated: None,
            url: Some(document.url.clone()),
        });

        Ok(CommitResult::new("FeedDocument"))
    }

    fn update_feed_document(&self, id: &str, body: &str) -> Result<CommitResult, SessionError> {
        self.writes.borrow_mut().push(StoreWrite::Update {
            id: id.to_string(),
            body: body.to_string(),
        });

        let mut documents = self.documents.borrow_mut();

        match documents.iter_mut().find(|document| document.id == id) {
            Some(document) => {
                document.body = body.to_string();
                Ok(CommitResult::new("FeedDocument"))
            }
            None => Ok(CommitResult::rejected("NotFoundError", "No such document")),
        }
    }

    fn send_notification(
        &self,
        notification: &Notification,
    ) -> Result<CommitResult, SessionError> {
        self.writes
            .borrow_mut()
            .push(StoreWrite::Notify(notification.clone()));

        Ok(CommitResult::new("Notification"))
    }
}

/// Reddit stand-in; clones share the same posts so tests can edit them between cycles.
#[derive(Clone, Default)]
pub struct FakeReader {
    posts: Rc<RefCell<HashMap<String, FetchedPost>>>,
    requests: Rc<RefCell<Vec<String>>>,
}

impl FakeReader {
    pub fn publish(&self, url: &str, title: &str, body: &str, author: &str) {
        let post = FetchedPost {
            title: title.to_string(),
            body: body.to_string(),
            author: Some(author.to_string()),
            created_utc: 1704067200.0,
        };

        self.posts.borrow_mut().insert(url.to_string(), post);
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl ReadPost for FakeReader {
    fn read_post(&self, url: &str) -> Result<FetchedPost, FetchError> {
        self.requests.borrow_mut().push(url.to_string());

        self.posts
            .borrow()
            .get(url)
            .cloned()
            .ok_or(FetchError::NotFound)
    }
}

pub fn feed(id: &str, url: &str, notify: bool) -> Feed {
    Feed {
        id: id.to_string(),
        name: format!("Feed {id}"),
        creator: "alice".to_string(),
        created: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        inactive: false,
        kind: "markdown_recursive".to_string(),
        url: url.to_string(),
        notify,
        origin: Origin::Unresolved,
    }
}
