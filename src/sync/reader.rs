use thiserror::Error;

#[cfg(test)]
use mockall::automock;

pub mod reddit;

pub use reddit::RedditReader;

#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum FetchError {
    #[error("invalid post URL")]
    InvalidUrl,
    #[error("origin refused credentials: {msg}")]
    Unauthorized { msg: String },
    #[error("origin unreachable: {msg}")]
    Unreachable { msg: String },
    #[error("post not found")]
    NotFound,
    #[error("malformed response: {msg}")]
    Malformed { msg: String },
    #[error("post has no author")]
    MissingAuthor,
}

/// A single post as the origin reports it.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPost {
    pub title: String,
    pub body: String,
    pub author: Option<String>,
    pub created_utc: f64,
}

#[cfg_attr(test, automock)]
pub trait ReadPost {
    fn read_post(&self, url: &str) -> Result<FetchedPost, FetchError>;
}
