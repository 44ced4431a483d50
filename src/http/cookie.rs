// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Cookie jar fed by scanned responses

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Result;
use crate::evidence::{CollectedCookie, CookieCollector};

/// A single HTTP cookie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
    /// Domain the cookie belongs to
    pub domain: String,
    /// Path the cookie is valid for
    pub path: String,
    /// Expiration time (None = session cookie)
    pub expires: Option<DateTime<Utc>>,
    /// Secure flag (HTTPS only)
    pub secure: bool,
    /// HttpOnly flag (not accessible via JavaScript)
    pub http_only: bool,
    /// SameSite attribute
    pub same_site: SameSite,
}

/// SameSite cookie attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SameSite {
    /// No SameSite attribute was sent
    #[default]
    Unspecified,
    /// Cookie sent with all requests
    None,
    /// Cookie sent with same-site and top-level navigations
    Lax,
    /// Cookie only sent with same-site requests
    Strict,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Unspecified => "Unspecified",
            SameSite::None => "None",
            SameSite::Lax => "Lax",
            SameSite::Strict => "Strict",
        }
    }

    fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "strict" => SameSite::Strict,
            "lax" => SameSite::Lax,
            "none" => SameSite::None,
            _ => SameSite::Unspecified,
        }
    }
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Cookie {
    /// Create a new cookie
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: String::new(),
            path: "/".to_string(),
            expires: None,
            secure: false,
            http_only: false,
            same_site: SameSite::default(),
        }
    }

    /// Set the domain
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Set secure flag
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Set http_only flag
    pub fn http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    /// Set same_site attribute
    pub fn same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = same_site;
        self
    }

    /// Set expiration time
    pub fn expires(mut self, expires: DateTime<Utc>) -> Self {
        self.expires = Some(expires);
        self
    }

    /// Check if the cookie is expired
    pub fn is_expired(&self) -> bool {
        self.expires.map_or(false, |exp| exp < Utc::now())
    }

    /// Check if the cookie is visible on `host`
    ///
    /// A cookie for `example.com` is visible on `www.example.com`.
    pub fn domain_matches(&self, host: &str) -> bool {
        if self.domain.is_empty() {
            return true;
        }

        let host = host.to_lowercase();
        let domain = self.domain.trim_start_matches('.').to_lowercase();
        host == domain || host.ends_with(&format!(".{}", domain))
    }

    /// Parse a Set-Cookie header value
    pub fn parse(header: &str, url: &Url) -> Option<Self> {
        let mut parts = header.split(';');
        let first = parts.next()?.trim();

        let (name, value) = first.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let mut cookie = Cookie::new(name, value.trim());

        // Default domain to request host
        cookie.domain = url.host_str().unwrap_or("").to_string();

        for part in parts {
            let part = part.trim();
            if let Some((attr, val)) = part.split_once('=') {
                let attr = attr.trim().to_lowercase();
                let val = val.trim();
                match attr.as_str() {
                    "domain" if !val.is_empty() => {
                        cookie.domain = val.trim_start_matches('.').to_string()
                    }
                    "path" => cookie.path = val.to_string(),
                    "expires" => {
                        if let Ok(dt) = DateTime::parse_from_rfc2822(val) {
                            cookie.expires = Some(dt.with_timezone(&Utc));
                        }
                    }
                    "max-age" => {
                        if let Ok(secs) = val.parse::<i64>() {
                            cookie.expires = Some(Utc::now() + chrono::Duration::seconds(secs));
                        }
                    }
                    "samesite" => cookie.same_site = SameSite::parse(val),
                    _ => {}
                }
            } else {
                match part.to_lowercase().as_str() {
                    "secure" => cookie.secure = true,
                    "httponly" => cookie.http_only = true,
                    _ => {}
                }
            }
        }

        Some(cookie)
    }

    /// Collector-side view of the cookie
    pub fn to_collected(&self) -> CollectedCookie {
        CollectedCookie {
            name: self.name.clone(),
            value: self.value.clone(),
            secure: self.secure,
            http_only: self.http_only,
            same_site: self.same_site.as_str().to_string(),
        }
    }
}

/// Thread-safe cookie storage
#[derive(Debug, Clone)]
pub struct CookieJar {
    /// Cookies stored by domain
    cookies: Arc<DashMap<String, Vec<Cookie>>>,
}

impl Default for CookieJar {
    fn default() -> Self {
        Self::new()
    }
}

impl CookieJar {
    /// Create a new empty cookie jar
    pub fn new() -> Self {
        Self {
            cookies: Arc::new(DashMap::new()),
        }
    }

    /// Add a cookie, replacing one with the same name and path
    pub fn add(&self, cookie: Cookie) {
        let mut entry = self.cookies.entry(cookie.domain.clone()).or_default();
        entry.retain(|c| c.name != cookie.name || c.path != cookie.path);
        entry.push(cookie);
    }

    /// Add a cookie from a Set-Cookie header
    pub fn add_from_header(&self, header: &str, url: &Url) {
        if let Some(cookie) = Cookie::parse(header, url) {
            self.add(cookie);
        }
    }

    /// Unexpired cookies visible on a domain, in insertion order per domain
    pub fn cookies_for_domain(&self, domain: &str) -> Vec<Cookie> {
        self.remove_expired();

        let mut domains: Vec<String> = self
            .cookies
            .iter()
            .map(|e| e.key().clone())
            .collect();
        domains.sort();

        let mut result = Vec::new();
        for key in domains {
            if let Some(cookies) = self.cookies.get(&key) {
                result.extend(
                    cookies
                        .iter()
                        .filter(|c| c.domain_matches(domain))
                        .cloned(),
                );
            }
        }
        result
    }

    /// Clear all cookies
    pub fn clear(&self) {
        self.cookies.clear();
    }

    /// Remove expired cookies
    fn remove_expired(&self) {
        for mut entry in self.cookies.iter_mut() {
            entry.value_mut().retain(|c| !c.is_expired());
        }
    }

    /// Get total cookie count
    pub fn len(&self) -> usize {
        self.cookies.iter().map(|e| e.value().len()).sum()
    }

    /// Check if jar is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CookieCollector for CookieJar {
    async fn cookies(&self, domain: &str) -> Result<Vec<CollectedCookie>> {
        Ok(self
            .cookies_for_domain(domain)
            .iter()
            .map(Cookie::to_collected)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_parsing() {
        let url = Url::parse("https://example.com/path").unwrap();
        let header = "session=abc123; Domain=.example.com; Path=/; Secure; HttpOnly; SameSite=Strict";
        let cookie = Cookie::parse(header, &url).unwrap();

        assert_eq!(cookie.name, "session");
        assert_eq!(cookie.value, "abc123");
        assert_eq!(cookie.domain, "example.com");
        assert_eq!(cookie.path, "/");
        assert!(cookie.secure);
        assert!(cookie.http_only);
        assert_eq!(cookie.same_site, SameSite::Strict);
    }

    #[test]
    fn test_cookie_defaults() {
        let url = Url::parse("http://shop.example.com/").unwrap();
        let cookie = Cookie::parse("theme=dark", &url).unwrap();

        assert_eq!(cookie.domain, "shop.example.com");
        assert!(!cookie.secure);
        assert!(!cookie.http_only);
        assert_eq!(cookie.same_site, SameSite::Unspecified);
        assert!(Cookie::parse("=orphan", &url).is_none());
        assert!(Cookie::parse("garbage", &url).is_none());
    }

    #[test]
    fn test_domain_matching() {
        let cookie = Cookie::new("a", "1").domain("example.com");
        assert!(cookie.domain_matches("example.com"));
        assert!(cookie.domain_matches("www.Example.com"));
        assert!(!cookie.domain_matches("badexample.com"));
    }

    #[test]
    fn test_jar_replaces_and_expires() {
        let jar = CookieJar::new();
        jar.add(Cookie::new("sid", "old").domain("example.com"));
        jar.add(Cookie::new("sid", "new").domain("example.com"));
        jar.add(
            Cookie::new("gone", "x")
                .domain("example.com")
                .expires(Utc::now() - chrono::Duration::hours(1)),
        );
        jar.add(Cookie::new("other", "y").domain("other.org"));

        let cookies = jar.cookies_for_domain("example.com");
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies[0].value, "new");
        assert_eq!(jar.len(), 2);
    }

    #[tokio::test]
    async fn test_jar_as_collector() {
        let jar = CookieJar::new();
        jar.add(
            Cookie::new("sid", "abc")
                .domain("example.com")
                .secure(true)
                .http_only(true)
                .same_site(SameSite::Lax),
        );

        let cookies = jar.cookies("www.example.com").await.unwrap();
        assert_eq!(
            cookies,
            vec![CollectedCookie {
                name: "sid".to_string(),
                value: "abc".to_string(),
                secure: true,
                http_only: true,
                same_site: "Lax".to_string(),
            }]
        );
    }
}
