use crate::config::RedditConfig;
use crate::models::Origin;
use crate::sync::origin;
use crate::sync::reader::{FetchError, FetchedPost, ReadPost};
use chrono::{DateTime, Duration, Utc};
use isahc::auth::{Authentication, Credentials};
use isahc::http::StatusCode;
use isahc::prelude::*;
use isahc::{Body, HttpClient, Request};
use serde::Deserialize;
use std::cell::RefCell;
use url::form_urlencoded;
use url::Url;

const DELETED_AUTHOR: &str = "[deleted]";
const DEFAULT_TOKEN_LIFETIME_IN_SECONDS: i64 = 3600;
const TOKEN_EXPIRY_MARGIN_IN_SECONDS: i64 = 60;

/// Reads submissions through Reddit's OAuth API, logging in with the
/// script-app password grant and refreshing the bearer token as it expires.
#[derive(Clone, Debug)]
pub struct RedditReader {
    base_url: String,
    auth_url: String,
    user_agent: String,
    client_id: String,
    client_secret: String,
    username: String,
    password: String,
    http_client: HttpClient,
    token: RefCell<Option<AccessToken>>,
}

#[derive(Clone, Debug)]
struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(TOKEN_EXPIRY_MARGIN_IN_SECONDS) < self.expires_at
    }
}

#[derive(Deserialize, Debug)]
struct TokenResponse {
    access_token: Option<String>,
    #[serde(default = "default_token_lifetime")]
    expires_in: i64,
    error: Option<String>,
}

fn default_token_lifetime() -> i64 {
    DEFAULT_TOKEN_LIFETIME_IN_SECONDS
}

#[derive(Deserialize, Debug)]
struct Listing {
    data: ListingData,
}

#[derive(Deserialize, Debug)]
struct ListingData {
    children: Vec<Thing>,
}

#[derive(Deserialize, Debug)]
struct Thing {
    data: Submission,
}

#[derive(Deserialize, Debug)]
struct Submission {
    title: String,
    #[serde(default)]
    selftext: String,
    author: Option<String>,
    created_utc: f64,
}

impl From<Submission> for FetchedPost {
    fn from(submission: Submission) -> Self {
        let author = submission
            .author
            .filter(|name| !name.is_empty() && name != DELETED_AUTHOR);

        FetchedPost {
            title: submission.title,
            body: submission.selftext,
            author,
            created_utc: submission.created_utc,
        }
    }
}

impl RedditReader {
    pub fn from_config(config: &RedditConfig, http_client: HttpClient) -> Self {
        Self {
            base_url: config.base_url.clone(),
            auth_url: config.auth_url.clone(),
            user_agent: config.user_agent.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
            http_client,
            token: RefCell::new(None),
        }
    }

    /// Maps a Reddit submission link onto the listing endpoint under `base_url`.
    pub fn json_url(&self, url: &str) -> Result<String, FetchError> {
        let parsed = Url::parse(url).map_err(|_| FetchError::InvalidUrl)?;

        if parsed.host_str().and_then(origin::for_hostname) != Some(Origin::Reddit) {
            return Err(FetchError::InvalidUrl);
        }

        let path = parsed.path().trim_end_matches('/');

        if path.is_empty() {
            return Err(FetchError::InvalidUrl);
        }

        let path = path.strip_suffix(".json").unwrap_or(path);

        Ok(format!(
            "{}{}.json",
            self.base_url.trim_end_matches('/'),
            path
        ))
    }

    fn access_token(&self) -> Result<String, FetchError> {
        let now = Utc::now();

        if let Some(token) = self.token.borrow().as_ref() {
            if token.is_fresh(now) {
                return Ok(token.value.clone());
            }
        }

        log::info!("Requesting a Reddit access token for {}", self.username);

        let token = self.request_token(now)?;
        let value = token.value.clone();

        self.token.replace(Some(token));

        Ok(value)
    }

    fn request_token(&self, now: DateTime<Utc>) -> Result<AccessToken, FetchError> {
        let form = form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", "password")
            .append_pair("username", &self.username)
            .append_pair("password", &self.password)
            .finish();

        let request = Request::post(self.auth_url.as_str())
            .header("User-Agent", self.user_agent.as_str())
            .header("Content-Type", "application/x-www-form-urlencoded")
            .authentication(Authentication::basic())
            .credentials(Credentials::new(
                self.client_id.as_str(),
                self.client_secret.as_str(),
            ))
            .body(form)
            .map_err(|_| FetchError::InvalidUrl)?;

        let body = self.send(request)?;

        let response: TokenResponse =
            serde_json::from_slice(&body).map_err(|err| FetchError::Malformed {
                msg: format!("{err}"),
            })?;

        match response.access_token {
            Some(value) => Ok(AccessToken {
                value,
                expires_at: now + Duration::seconds(response.expires_in),
            }),
            None => Err(FetchError::Unauthorized {
                msg: response
                    .error
                    .unwrap_or_else(|| "no access token granted".to_string()),
            }),
        }
    }

    fn read_url(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let token = self.access_token()?;

        let request = Request::get(url)
            .header("User-Agent", self.user_agent.as_str())
            .header("Authorization", format!("bearer {token}"))
            .body(())
            .map_err(|_| FetchError::InvalidUrl)?;

        let result = self.send(request);

        if let Err(FetchError::Unauthorized { .. }) = result {
            self.token.replace(None);
        }

        result
    }

    fn send<B: Into<Body>>(&self, request: Request<B>) -> Result<Vec<u8>, FetchError> {
        let mut response = self
            .http_client
            .send(request)
            .map_err(|err| FetchError::Unreachable {
                msg: format!("{err:?}"),
            })?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(FetchError::NotFound),
            status @ (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => {
                return Err(FetchError::Unauthorized {
                    msg: format!("status {status}"),
                })
            }
            status if !status.is_success() => {
                return Err(FetchError::Unreachable {
                    msg: format!("status {status}"),
                })
            }
            _ => (),
        }

        let mut body: Vec<u8> = vec![];

        response
            .copy_to(&mut body)
            .map_err(|err| FetchError::Unreachable {
                msg: format!("{err:?}"),
            })?;

        Ok(body)
    }
}

impl ReadPost for RedditReader {
    fn read_post(&self, url: &str) -> Result<FetchedPost, FetchError> {
        let json_url = self.json_url(url)?;
        let body = self.read_url(&json_url)?;

        parse_submission(&body)
    }
}

fn parse_submission(body: &[u8]) -> Result<FetchedPost, FetchError> {
    let listings: Vec<Listing> =
        serde_json::from_slice(body).map_err(|err| FetchError::Malformed {
            msg: format!("{err}"),
        })?;

    listings
        .into_iter()
        .next()
        .and_then(|listing| listing.data.children.into_iter().next())
        .map(|thing| thing.data.into())
        .ok_or(FetchError::NotFound)
}
