// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Server stack classification from response headers

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::evidence::HeaderSet;
use crate::signatures::{search_url, ServerSignature, SERVER_SIGNATURES};

/// Which stack-revealing header produced a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServerKey {
    Server,
    #[serde(rename = "X-Powered-By")]
    XPoweredBy,
    Generator,
}

impl ServerKey {
    /// Map a header name (case-insensitive) to its key
    pub fn from_header(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "server" => Some(ServerKey::Server),
            "x-powered-by" => Some(ServerKey::XPoweredBy),
            "x-generator" => Some(ServerKey::Generator),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ServerKey::Server => "Server",
            ServerKey::XPoweredBy => "X-Powered-By",
            ServerKey::Generator => "Generator",
        }
    }
}

impl fmt::Display for ServerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stack-revealing header value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerFinding {
    pub key: ServerKey,
    /// Header value exactly as received
    pub value: String,
}

impl ServerFinding {
    pub fn new(key: ServerKey, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

impl fmt::Display for ServerFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}

/// Extract every `Server`, `X-Powered-By` and `X-Generator` header
///
/// Repeated headers each produce their own finding, in response order.
pub fn classify_server(received: &HeaderSet) -> Vec<ServerFinding> {
    received
        .iter()
        .filter_map(|(name, value)| {
            ServerKey::from_header(name).map(|key| ServerFinding::new(key, value))
        })
        .collect()
}

/// First signature whose keyword occurs in `value` (case-insensitive)
///
/// Table order decides: this is first match, not longest or best match.
pub fn resolve_signature(value: &str) -> Option<&'static ServerSignature> {
    let lowered = value.to_lowercase();
    SERVER_SIGNATURES
        .iter()
        .find(|sig| lowered.contains(sig.keyword))
}

/// Documentation link for a finding, falling back to a web search
pub fn resolve_link(finding: &ServerFinding) -> String {
    match resolve_signature(&finding.value) {
        Some(sig) => sig.url.to_string(),
        None => search_url(&finding.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_server_headers() {
        let headers = HeaderSet::new()
            .with("Server", "nginx/1.18.0 (Ubuntu)")
            .with("Content-Type", "text/html")
            .with("x-powered-by", "PHP/8.1.2")
            .with("X-Generator", "Drupal 10");

        let findings = classify_server(&headers);
        assert_eq!(
            findings,
            vec![
                ServerFinding::new(ServerKey::Server, "nginx/1.18.0 (Ubuntu)"),
                ServerFinding::new(ServerKey::XPoweredBy, "PHP/8.1.2"),
                ServerFinding::new(ServerKey::Generator, "Drupal 10"),
            ]
        );
    }

    #[test]
    fn test_repeated_headers_not_deduplicated() {
        let headers = HeaderSet::new()
            .with("Server", "cloudflare")
            .with("SERVER", "cloudflare");

        assert_eq!(classify_server(&headers).len(), 2);
    }

    #[test]
    fn test_no_stack_headers() {
        let headers = HeaderSet::new().with("X-Server-Id", "42");
        assert!(classify_server(&headers).is_empty());
    }

    #[test]
    fn test_first_match_wins() {
        let ubuntu = ServerFinding::new(ServerKey::Server, "nginx/1.18.0 (Ubuntu)");
        assert_eq!(resolve_link(&ubuntu), "https://nginx.org/en/docs/");

        // php is declared after nginx
        let mixed = ServerFinding::new(ServerKey::XPoweredBy, "PHP/8.1 behind nginx");
        assert_eq!(resolve_link(&mixed), "https://nginx.org/en/docs/");
    }

    #[test]
    fn test_specific_keyword_precedes_generic() {
        let sig = resolve_signature("Apache-Coyote/1.1").unwrap();
        assert_eq!(sig.name, "Apache Tomcat");

        let sig = resolve_signature("Apache/2.4.41 (Unix)").unwrap();
        assert_eq!(sig.name, "Apache HTTP Server");
    }

    #[test]
    fn test_fallback_search_link() {
        let finding = ServerFinding::new(ServerKey::Server, "Custom Engine 2");
        assert_eq!(
            resolve_link(&finding),
            "https://www.google.com/search?q=Custom+Engine+2"
        );
    }

    #[test]
    fn test_server_key_display() {
        let finding = ServerFinding::new(ServerKey::XPoweredBy, "Express");
        assert_eq!(finding.to_string(), "X-Powered-By: Express");
        assert_eq!(ServerKey::from_header("X-GENERATOR"), Some(ServerKey::Generator));
    }
}
