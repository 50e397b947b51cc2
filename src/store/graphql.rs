use crate::config::StoreConfig;
use crate::models::{Document, Feed, NewDocument};
use crate::store::{CommitResult, DocumentQuery, Notification, SessionError, Store};
use isahc::prelude::*;
use isahc::HttpClient;
use isahc::Request;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use serde_json::Value;

const COUNT_FEEDS: &str = "query countFeeds { countFeeds }";

const GET_FEEDS: &str = "query getFeeds($start: Int!, $count: Int!) {
    getFeeds(start: $start, count: $count) {
        id name creator created inactive kind url notify
    }
}";

const GET_FEED_DOCUMENTS: &str =
    "query getFeedDocuments($feed: String!, $start: Int!, $count: Int!, $sorting: Sorting) {
    getFeedDocuments(feed: $feed, start: $start, count: $count, sorting: $sorting) {
        id feed author posted body body_html created updated url
    }
}";

const CREATE_FEED_DOCUMENT: &str = "mutation createFeedDocument($feed: String!, $author: String!, $posted: String!, $body: String!, $title: String!, $url: String!) {
    createFeedDocument(feed: $feed, author: $author, posted: $posted, body: $body, title: $title, url: $url) {
        __typename
        ...on Error { message }
    }
}";

const UPDATE_FEED_DOCUMENT: &str = "mutation updateFeedDocument($id: String!, $body: String!) {
    updateFeedDocument(id: $id, body: $body) {
        __typename
        ...on Error { message }
    }
}";

const SEND_NOTIFICATION: &str = "mutation sendNotification($username: String!, $title: String!, $body: String!, $category: String!) {
    sendNotification(username: $username, title: $title, body: $body, category: $category) {
        __typename
        ...on Error { message }
    }
}";

/// Authenticated session against the store's GraphQL endpoint.
#[derive(Clone, Debug)]
pub struct GraphqlSession {
    url: String,
    api_key: String,
    http_client: HttpClient,
}

#[derive(Deserialize, Debug)]
struct GraphqlResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Deserialize, Debug)]
struct GraphqlError {
    message: String,
}

impl GraphqlSession {
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        http_client: HttpClient,
    ) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            http_client,
        }
    }

    pub fn from_config(config: &StoreConfig, http_client: HttpClient) -> Self {
        Self::new(config.url.clone(), config.api_key.clone(), http_client)
    }

    pub fn call<T: DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: Value,
    ) -> Result<T, SessionError> {
        let payload = json!({ "query": query, "variables": variables });
        let json = serde_json::to_string(&payload)
            .map_err(|err| SessionError::new(format!("{err}")))?;

        let request = Request::post(self.url.as_str())
            .header("Content-Type", "application/json")
            .header("Authorization", self.api_key.as_str())
            .body(json)?;

        let mut response = self.http_client.send(request)?;

        let mut bytes = Vec::new();
        response.copy_to(&mut bytes)?;

        if !response.status().is_success() {
            let msg = format!(
                "{operation} failed with status {}: {}",
                response.status(),
                String::from_utf8_lossy(&bytes)
            );

            return Err(SessionError { msg });
        }

        let parsed: GraphqlResponse = serde_json::from_slice(&bytes).map_err(|err| {
            SessionError::new(format!("failed to parse {operation} response: {err}"))
        })?;

        if let Some(error) = parsed.errors.into_iter().next() {
            return Err(SessionError { msg: error.message });
        }

        let value = parsed
            .data
            .and_then(|mut data| data.get_mut(operation).map(Value::take))
            .ok_or_else(|| SessionError::new(format!("{operation} returned no data")))?;

        serde_json::from_value(value).map_err(|err| {
            SessionError::new(format!("failed to parse {operation} response: {err}"))
        })
    }
}

impl Store for GraphqlSession {
    fn count_feeds(&self) -> Result<usize, SessionError> {
        self.call("countFeeds", COUNT_FEEDS, json!({}))
    }

    fn get_feeds(&self, start: usize, count: usize) -> Result<Vec<Feed>, SessionError> {
        self.call(
            "getFeeds",
            GET_FEEDS,
            json!({ "start": start, "count": count }),
        )
    }

    fn get_feed_documents(&self, query: &DocumentQuery) -> Result<Vec<Document>, SessionError> {
        self.call("getFeedDocuments", GET_FEED_DOCUMENTS, to_variables(query)?)
    }

    fn create_feed_document(&self, document: &NewDocument) -> Result<CommitResult, SessionError> {
        self.call(
            "createFeedDocument",
            CREATE_FEED_DOCUMENT,
            to_variables(document)?,
        )
    }

    fn update_feed_document(&self, id: &str, body: &str) -> Result<CommitResult, SessionError> {
        self.call(
            "updateFeedDocument",
            UPDATE_FEED_DOCUMENT,
            json!({ "id": id, "body": body }),
        )
    }

    fn send_notification(
        &self,
        notification: &Notification,
    ) -> Result<CommitResult, SessionError> {
        self.call(
            "sendNotification",
            SEND_NOTIFICATION,
            to_variables(notification)?,
        )
    }
}

fn to_variables<T: serde::Serialize>(value: &T) -> Result<Value, SessionError> {
    serde_json::to_value(value).map_err(|err| SessionError::new(format!("{err}")))
}

impl From<isahc::http::Error> for SessionError {
    fn from(error: isahc::http::Error) -> Self {
        let msg = format!("{error:?}");

        SessionError { msg }
    }
}

impl From<isahc::Error> for SessionError {
    fn from(error: isahc::Error) -> Self {
        let msg = format!("{error:?}");

        SessionError { msg }
    }
}

impl From<std::io::Error> for SessionError {
    fn from(error: std::io::Error) -> Self {
        let msg = format!("{error:?}");

        SessionError { msg }
    }
}
