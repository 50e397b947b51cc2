use isahc::config::Configurable;
use isahc::config::RedirectPolicy;
use isahc::HttpClient;
use std::time::Duration;

pub fn build(timeout: Duration) -> Result<HttpClient, isahc::Error> {
    HttpClient::builder()
        .redirect_policy(RedirectPolicy::Limit(10))
        .timeout(timeout)
        .build()
}
