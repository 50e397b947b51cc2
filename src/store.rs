use crate::models::{Document, Feed, NewDocument};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use typed_builder::TypedBuilder;

#[cfg(test)]
use mockall::automock;

pub mod graphql;

pub use graphql::GraphqlSession;

pub const DOCUMENT_TYPENAME: &str = "FeedDocument";

#[derive(Debug, Clone, Error, Eq, PartialEq)]
#[error("{msg}")]
pub struct SessionError {
    pub msg: String,
}

impl SessionError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

/// Result of a store mutation. The store reports failures it validated itself
/// as a different `__typename` carrying a `message`.
#[derive(Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct CommitResult {
    #[serde(rename = "__typename")]
    pub typename: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl CommitResult {
    pub fn new(typename: impl Into<String>) -> Self {
        Self {
            typename: typename.into(),
            message: None,
        }
    }

    pub fn rejected(typename: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            typename: typename.into(),
            message: Some(message.into()),
        }
    }

    pub fn is(&self, typename: &str) -> bool {
        self.typename == typename
    }

    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or("no message")
    }
}

#[derive(Serialize, Debug, Clone, Eq, PartialEq)]
pub struct Sorting {
    pub fields: Vec<String>,
    pub descending: bool,
}

#[derive(Serialize, TypedBuilder, Debug, Clone, Eq, PartialEq)]
pub struct DocumentQuery {
    #[builder(setter(into))]
    pub feed: String,
    #[builder(default = 0)]
    pub start: usize,
    pub count: usize,
    pub sorting: Sorting,
}

impl DocumentQuery {
    /// The chain head: newest document by creation time.
    pub fn latest(feed_id: &str) -> Self {
        DocumentQuery::builder()
            .feed(feed_id)
            .count(1)
            .sorting(Sorting {
                fields: vec!["created".to_string()],
                descending: true,
            })
            .build()
    }
}

#[derive(Serialize, TypedBuilder, Debug, Clone, Eq, PartialEq)]
pub struct Notification {
    #[builder(setter(into))]
    pub username: String,
    #[builder(setter(into))]
    pub title: String,
    #[builder(setter(into))]
    pub body: String,
    #[builder(setter(into), default = "feed".to_string())]
    pub category: String,
}

/// Calls the backing store makes available to the sync jobs.
#[cfg_attr(test, automock)]
pub trait Store {
    fn count_feeds(&self) -> Result<usize, SessionError>;

    fn get_feeds(&self, start: usize, count: usize) -> Result<Vec<Feed>, SessionError>;

    fn get_feed_documents(&self, query: &DocumentQuery) -> Result<Vec<Document>, SessionError>;

    fn create_feed_document(&self, document: &NewDocument) -> Result<CommitResult, SessionError>;

    fn update_feed_document(&self, id: &str, body: &str) -> Result<CommitResult, SessionError>;

    fn send_notification(&self, notification: &Notification)
        -> Result<CommitResult, SessionError>;
}
