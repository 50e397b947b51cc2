use crate::models::Origin;
use crate::sync::SyncError;
use url::Url;

/// Works out which origin serves `url` from the last two labels of its hostname.
pub fn resolve(url: &str) -> Result<Origin, SyncError> {
    let invalid_url = || SyncError::InvalidUrl {
        url: url.to_string(),
    };

    let parsed = Url::parse(url).map_err(|_| invalid_url())?;
    let hostname = parsed
        .host_str()
        .filter(|host| !host.is_empty())
        .ok_or_else(invalid_url)?;

    for_hostname(hostname).ok_or_else(|| SyncError::UnresolvedOrigin {
        hostname: hostname.to_string(),
    })
}

pub fn for_hostname(hostname: &str) -> Option<Origin> {
    let labels: Vec<&str> = hostname.split('.').collect();

    if labels.len() < 2 {
        return None;
    }

    let tail = &labels[labels.len() - 2..];

    Origin::KNOWN
        .into_iter()
        .find(|origin| origin.domain().is_some_and(|domain| domain[..] == *tail))
}

#[cfg(test)]
mod tests {
    use super::{for_hostname, resolve};
    use crate::models::Origin;
    use crate::sync::SyncError;

    #[test]
    fn it_resolves_reddit_hosts() {
        assert_eq!(resolve("https://reddit.com/r/x/p1"), Ok(Origin::Reddit));
        assert_eq!(
            resolve("https://www.reddit.com/r/x/comments/abc/title/"),
            Ok(Origin::Reddit)
        );
        assert_eq!(resolve("http://OLD.Reddit.COM/r/x"), Ok(Origin::Reddit));
    }

    #[test]
    fn it_fails_on_unknown_hosts() {
        assert_eq!(
            resolve("https://notreddit.org/r/x"),
            Err(SyncError::UnresolvedOrigin {
                hostname: "notreddit.org".to_string()
            })
        );
        assert_eq!(
            resolve("https://reddit.com.evil.net/r/x"),
            Err(SyncError::UnresolvedOrigin {
                hostname: "reddit.com.evil.net".to_string()
            })
        );
        assert_eq!(
            resolve("https://fakereddit.com/r/x"),
            Err(SyncError::UnresolvedOrigin {
                hostname: "fakereddit.com".to_string()
            })
        );
        assert_eq!(
            resolve("http://localhost/r/x"),
            Err(SyncError::UnresolvedOrigin {
                hostname: "localhost".to_string()
            })
        );
    }

    #[test]
    fn it_matches_bare_hostnames() {
        assert_eq!(for_hostname("www.reddit.com"), Some(Origin::Reddit));
        assert_eq!(for_hostname("example.com"), None);
        assert_eq!(for_hostname("reddit"), None);
    }

    #[test]
    fn it_fails_on_urls_without_hostname() {
        assert_eq!(
            resolve("reddit.com/r/x"),
            Err(SyncError::InvalidUrl {
                url: "reddit.com/r/x".to_string()
            })
        );
        assert_eq!(
            resolve("mailto:someone@reddit.com"),
            Err(SyncError::InvalidUrl {
                url: "mailto:someone@reddit.com".to_string()
            })
        );
    }
}
