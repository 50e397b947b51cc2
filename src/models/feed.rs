use crate::models::timestamp;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

#[derive(Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct Feed {
    pub id: String,
    pub name: String,
    pub creator: String,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created: DateTime<Utc>,
    pub inactive: bool,
    pub kind: String,
    pub url: String,
    pub notify: bool,

    #[serde(skip)]
    pub origin: Origin,
}

impl Feed {
    pub fn is_active(&self) -> bool {
        !self.inactive
    }

    pub fn feed_kind(&self) -> Option<FeedKind> {
        self.kind.parse().ok()
    }
}

/// Navigation strategies a feed can ask for.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FeedKind {
    /// Every post links to its successor with a `[next](...)` markdown link.
    MarkdownRecursive,
}

impl FromStr for FeedKind {
    type Err = ();

    fn from_str(kind: &str) -> Result<Self, Self::Err> {
        match kind {
            "markdown_recursive" => Ok(FeedKind::MarkdownRecursive),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Origin {
    #[default]
    Unresolved,
    Reddit,
}

impl Origin {
    pub const KNOWN: [Origin; 1] = [Origin::Reddit];

    /// The last two hostname labels identifying the origin.
    pub fn domain(&self) -> Option<[&'static str; 2]> {
        match self {
            Origin::Unresolved => None,
            Origin::Reddit => Some(["reddit", "com"]),
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Unresolved => write!(f, "unresolved"),
            Origin::Reddit => write!(f, "reddit"),
        }
    }
}
