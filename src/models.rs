pub mod document;
pub mod feed;
pub mod timestamp;

pub use document::{Document, NewDocument};
pub use feed::{Feed, FeedKind, Origin};
