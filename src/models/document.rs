use crate::models::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

#[derive(Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct Document {
    pub id: String,
    pub feed: String,
    pub author: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub posted: Option<DateTime<Utc>>,
    pub body: String,
    #[serde(default)]
    pub body_html: String,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created: DateTime<Utc>,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub updated: Option<DateTime<Utc>>,

    /// Where the document was fetched from.
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Serialize, TypedBuilder, Debug, Clone, Eq, PartialEq)]
pub struct NewDocument {
    #[builder(setter(into))]
    pub feed: String,
    #[builder(setter(into))]
    pub author: String,
    #[builder(setter(into))]
    pub posted: String,
    #[builder(setter(into))]
    pub body: String,
    #[builder(setter(into))]
    pub title: String,
    #[builder(setter(into))]
    pub url: String,
}
