// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Evidence snapshots consumed by the classifiers
//!
//! Every value here is an immutable snapshot of one scan. Nothing carries
//! state from one scan to the next.

mod collector;

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

pub use collector::{
    ClientEvidenceCollector, CookieCollector, HeaderFetcher, NoCookies, StaticEvidence,
};

/// Ordered (name, value) header pairs from one HTTP response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderSet {
    entries: Vec<(String, String)>,
}

impl HeaderSet {
    /// Create an empty header set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a header, keeping any earlier header of the same name
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Builder-style append
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    /// Iterate over (name, value) pairs in response order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// First value for a header (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    /// Lowercased header names
    pub fn lowercase_names(&self) -> HashSet<String> {
        self.entries.iter().map(|(n, _)| n.to_lowercase()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for HeaderSet {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(n, v)| (n.into(), v.into()))
                .collect(),
        }
    }
}

/// Client-side markers observed on a page
///
/// Produced once per scan by a [`ClientEvidenceCollector`]. Serializable so a
/// browser host can hand over a bundle gathered by script injection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientEvidenceBundle {
    /// Global bindings found on the page, with the version read from them
    pub globals: BTreeMap<String, Option<String>>,
    /// Attribute names carried by at least one element
    pub attributes: BTreeSet<String>,
    /// `src` of every script element, in document order
    pub script_sources: Vec<String>,
    /// Content of `<meta name="generator">`
    pub meta_generator: Option<String>,
}

impl ClientEvidenceBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a global binding, optionally with its version
    pub fn with_global(mut self, identifier: impl Into<String>, version: Option<&str>) -> Self {
        self.globals
            .insert(identifier.into(), version.map(str::to_string));
        self
    }

    /// Record an attribute selector hit
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attributes.insert(attribute.into());
        self
    }

    /// Append a script source URL
    pub fn with_script(mut self, src: impl Into<String>) -> Self {
        self.script_sources.push(src.into());
        self
    }

    /// Set the generator meta content
    pub fn with_generator(mut self, content: impl Into<String>) -> Self {
        self.meta_generator = Some(content.into());
        self
    }

    /// Whether a global binding is present
    pub fn has_global(&self, identifier: &str) -> bool {
        self.globals.contains_key(identifier)
    }

    /// Version read from a global binding, if any
    pub fn global_version(&self, identifier: &str) -> Option<&str> {
        self.globals.get(identifier).and_then(|v| v.as_deref())
    }

    /// Whether any element carries the attribute
    pub fn has_attribute(&self, attribute: &str) -> bool {
        self.attributes.contains(attribute)
    }

    pub fn is_empty(&self) -> bool {
        self.globals.is_empty()
            && self.attributes.is_empty()
            && self.script_sources.is_empty()
            && self.meta_generator.is_none()
    }
}

/// A cookie as handed over by a cookie collector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedCookie {
    pub name: String,
    pub value: String,
    pub secure: bool,
    pub http_only: bool,
    /// Same-site policy exactly as reported by the collector
    pub same_site: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_set_lookup() {
        let headers: HeaderSet = vec![("Server", "nginx"), ("X-Frame-Options", "DENY")]
            .into_iter()
            .collect();

        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("server"), Some("nginx"));
        assert!(headers.lowercase_names().contains("x-frame-options"));
        assert!(headers.get("referrer-policy").is_none());
    }

    #[test]
    fn test_header_set_keeps_duplicates() {
        let headers = HeaderSet::new()
            .with("Server", "cloudflare")
            .with("server", "nginx");

        let values: Vec<_> = headers.iter().map(|(_, v)| v).collect();
        assert_eq!(values, vec!["cloudflare", "nginx"]);
    }

    #[test]
    fn test_bundle_builders() {
        let bundle = ClientEvidenceBundle::new()
            .with_global("jQuery", Some("3.6.0"))
            .with_global("React", None)
            .with_attribute("ng-app")
            .with_script("/static/app.js")
            .with_generator("Hugo 0.120.0");

        assert!(!bundle.is_empty());
        assert!(bundle.has_global("React"));
        assert_eq!(bundle.global_version("jQuery"), Some("3.6.0"));
        assert_eq!(bundle.global_version("React"), None);
        assert!(bundle.has_attribute("ng-app"));
        assert!(ClientEvidenceBundle::new().is_empty());
    }

    #[test]
    fn test_bundle_deserializes_partial_json() {
        let bundle: ClientEvidenceBundle =
            serde_json::from_str(r#"{"script_sources": ["/js/vue.min.js"]}"#).unwrap();

        assert_eq!(bundle.script_sources, vec!["/js/vue.min.js"]);
        assert!(bundle.globals.is_empty());
        assert!(bundle.meta_generator.is_none());
    }
}
