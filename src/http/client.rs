// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client implementation
//!
//! Redirects are followed here rather than inside reqwest so that every hop's
//! `Set-Cookie` headers reach the jar.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::{Client, Method};
use tracing::debug;
use url::Url;

use super::cookie::CookieJar;
use super::headers::{ACCEPT, ACCEPT_LANGUAGE, LOCATION, SET_COOKIE};
use super::response::Response;
use super::DEFAULT_USER_AGENT;
use crate::error::{Error, ErrorContext, Result};
use crate::evidence::{HeaderFetcher, HeaderSet};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// User agent string
    pub user_agent: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Accept invalid certificates (dangerous!)
    pub accept_invalid_certs: bool,
    /// Default headers
    pub default_headers: HeaderMap,
    /// Record Set-Cookie headers of every hop in the jar
    pub handle_cookies: bool,
    /// Fetch headers with GET and keep the page for inspection,
    /// otherwise fetch headers with HEAD
    pub keep_page: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        default_headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            max_redirects: 10,
            accept_invalid_certs: false,
            default_headers,
            handle_cookies: true,
            keep_page: true,
        }
    }
}

impl HttpClientConfig {
    /// Add a default header sent with every request
    pub fn header(mut self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::Config(format!("Invalid header name '{}': {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::Config(format!("Invalid header value for '{}': {}", name, e)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }
}

/// Page kept from the last header fetch, keyed by the requested URL
type KeptPage = Arc<Mutex<Option<(Url, Response)>>>;

/// HTTP client with cookie capture
///
/// Clones share the cookie jar and the kept page.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    cookie_jar: CookieJar,
    page: KeptPage,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(Policy::none())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .default_headers(config.default_headers.clone())
            .build()?;

        Ok(Self {
            client,
            config,
            cookie_jar: CookieJar::new(),
            page: Arc::new(Mutex::new(None)),
        })
    }

    /// Get the cookie jar
    pub fn cookie_jar(&self) -> &CookieJar {
        &self.cookie_jar
    }

    /// Get client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Execute a HEAD request
    pub async fn head(&self, url: &Url) -> Result<Response> {
        self.execute(Method::HEAD, url).await
    }

    /// Execute a GET request
    pub async fn get(&self, url: &Url) -> Result<Response> {
        self.execute(Method::GET, url).await
    }

    /// Take the page kept by the last header fetch of `url`
    pub fn take_page(&self, url: &Url) -> Option<Response> {
        let mut slot = self.page.lock();
        match slot.take() {
            Some((requested, response)) if requested == *url => Some(response),
            other => {
                *slot = other;
                None
            }
        }
    }

    /// Forget cookies and the kept page
    pub fn reset(&self) {
        self.cookie_jar.clear();
        self.page.lock().take();
    }

    async fn execute(&self, method: Method, url: &Url) -> Result<Response> {
        let start = Instant::now();
        let mut current = url.clone();
        let mut redirects = 0;

        loop {
            let response = self
                .client
                .request(method.clone(), current.clone())
                .send()
                .await?;

            let status = response.status();
            let headers = response.headers().clone();

            if self.config.handle_cookies {
                for cookie in headers.get_all(SET_COOKIE) {
                    if let Ok(cookie_str) = cookie.to_str() {
                        self.cookie_jar.add_from_header(cookie_str, &current);
                    }
                }
            }

            if status.is_redirection() {
                if let Some(next) = redirect_target(&headers, &current) {
                    if redirects >= self.config.max_redirects {
                        return Err(Error::fetch_failed(
                            url.as_str(),
                            Some(status.as_u16()),
                            format!("too many redirects (max {})", self.config.max_redirects),
                        ));
                    }
                    redirects += 1;
                    debug!(
                        from = %current,
                        to = %next,
                        status = status.as_u16(),
                        "Following redirect"
                    );
                    current = next;
                    continue;
                }
            }

            let body = response.bytes().await?;
            let response_time = start.elapsed().as_millis() as u64;

            debug!(
                %method,
                url = %current,
                status = status.as_u16(),
                redirects,
                elapsed_ms = response_time,
                "HTTP request completed"
            );

            return Ok(Response::new(status, headers, body, current, response_time));
        }
    }
}

/// Absolute URL of a redirect's `Location`, resolved against the hop URL
fn redirect_target(headers: &HeaderMap, current: &Url) -> Option<Url> {
    let location = headers.get(LOCATION)?.to_str().ok()?;
    current.join(location.trim()).ok()
}

#[async_trait]
impl HeaderFetcher for HttpClient {
    async fn fetch_headers(&self, target: &Url) -> Result<HeaderSet> {
        let response = if self.config.keep_page {
            self.get(target).await
        } else {
            self.head(target).await
        }
        .with_url(target.as_str())?;

        if !response.is_success() {
            return Err(Error::fetch_failed(
                target.as_str(),
                Some(response.status_code()),
                response.status_text(),
            ));
        }

        let headers = response.header_set();
        if self.config.keep_page {
            *self.page.lock() = Some((target.clone(), response));
        }
        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use reqwest::StatusCode;

    fn page(url: &Url) -> Response {
        Response::new(StatusCode::OK, HeaderMap::new(), Bytes::from("<html></html>"), url.clone(), 5)
    }

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new().unwrap();
        assert_eq!(client.config().user_agent, DEFAULT_USER_AGENT);
        assert!(client.config().keep_page);
        assert!(client.cookie_jar().is_empty());
    }

    #[test]
    fn test_config_header() {
        let config = HttpClientConfig::default()
            .header("x-scan-id", "42")
            .unwrap();
        assert_eq!(config.default_headers.get("x-scan-id").unwrap(), "42");

        assert!(HttpClientConfig::default().header("bad header", "x").is_err());
    }

    #[test]
    fn test_kept_page_is_taken_once() {
        let client = HttpClient::new().unwrap();
        let url = Url::parse("https://example.com/").unwrap();
        let other = Url::parse("https://example.org/").unwrap();
        *client.page.lock() = Some((url.clone(), page(&url)));

        // clones see the same page
        let shared = client.clone();
        assert!(shared.take_page(&other).is_none());
        assert!(shared.take_page(&url).is_some());
        assert!(client.take_page(&url).is_none());
    }

    #[test]
    fn test_reset_forgets_page() {
        let client = HttpClient::new().unwrap();
        let url = Url::parse("https://example.com/").unwrap();
        *client.page.lock() = Some((url.clone(), page(&url)));

        client.reset();
        assert!(client.take_page(&url).is_none());
    }

    #[test]
    fn test_redirect_target() {
        let current = Url::parse("https://example.com/shop/start").unwrap();
        let mut headers = HeaderMap::new();
        assert!(redirect_target(&headers, &current).is_none());

        headers.insert(LOCATION, HeaderValue::from_static("../home"));
        assert_eq!(
            redirect_target(&headers, &current).unwrap().as_str(),
            "https://example.com/home"
        );

        headers.insert(LOCATION, HeaderValue::from_static("https://cdn.example.net/x"));
        assert_eq!(
            redirect_target(&headers, &current).unwrap().as_str(),
            "https://cdn.example.net/x"
        );
    }

    #[tokio::test]
    async fn test_transport_error_is_fetch_failure() {
        let client = HttpClient::new().unwrap();
        let url = Url::parse("http://127.0.0.1:1/").unwrap();

        let err = client.fetch_headers(&url).await.unwrap_err();
        assert!(matches!(err, Error::FetchFailed { status: None, .. }));
        assert_eq!(err.url(), Some("http://127.0.0.1:1/"));
        assert!(client.take_page(&url).is_none());
    }
}
