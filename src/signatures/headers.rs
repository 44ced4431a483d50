// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Security header catalog

use std::collections::HashMap;

use lazy_static::lazy_static;

/// Security headers every response is expected to carry, in report order
pub const REQUIRED_HEADERS: [&str; 5] = [
    "Content-Security-Policy",
    "X-Content-Type-Options",
    "X-Frame-Options",
    "Strict-Transport-Security",
    "Referrer-Policy",
];

/// Header name to documentation URL
pub const HEADER_DOCS: &[(&str, &str)] = &[
    (
        "Content-Security-Policy",
        "https://developer.mozilla.org/en-US/docs/Web/HTTP/Headers/Content-Security-Policy",
    ),
    (
        "X-Content-Type-Options",
        "https://developer.mozilla.org/en-US/docs/Web/HTTP/Headers/X-Content-Type-Options",
    ),
    (
        "X-Frame-Options",
        "https://developer.mozilla.org/en-US/docs/Web/HTTP/Headers/X-Frame-Options",
    ),
    (
        "Strict-Transport-Security",
        "https://developer.mozilla.org/en-US/docs/Web/HTTP/Headers/Strict-Transport-Security",
    ),
    (
        "Referrer-Policy",
        "https://developer.mozilla.org/en-US/docs/Web/HTTP/Headers/Referrer-Policy",
    ),
    (
        "Permissions-Policy",
        "https://developer.mozilla.org/en-US/docs/Web/HTTP/Headers/Permissions-Policy",
    ),
];

lazy_static! {
    static ref HEADER_DOC_INDEX: HashMap<String, &'static str> = HEADER_DOCS
        .iter()
        .map(|(name, url)| (name.to_lowercase(), *url))
        .collect();
}

/// Documentation link for a header name (case-insensitive)
pub fn header_doc(name: &str) -> Option<&'static str> {
    HEADER_DOC_INDEX.get(&name.to_lowercase()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_required_header_documented() {
        for header in REQUIRED_HEADERS {
            assert!(header_doc(header).is_some(), "{}", header);
        }
    }

    #[test]
    fn test_header_doc_case_insensitive() {
        assert_eq!(
            header_doc("x-frame-options"),
            header_doc("X-Frame-Options")
        );
        assert!(header_doc("x-unknown").is_none());
    }
}
