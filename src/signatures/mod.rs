// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Static signature tables
//!
//! Read-only data consulted by the classifiers:
//! - required security headers and their documentation
//! - server/platform keywords (ordered, first match wins)
//! - client marker rule sets for page technologies and libraries

mod headers;
mod server;
mod technologies;

pub use headers::{header_doc, HEADER_DOCS, REQUIRED_HEADERS};
pub use server::{search_url, SEARCH_URL, SERVER_SIGNATURES};
pub use technologies::{technology_doc, LIBRARY_RULES, PAGE_RULES, TECHNOLOGY_DOCS};

/// A global binding whose presence implies a technology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalMarker {
    /// Name of the global binding (e.g. `jQuery`)
    pub identifier: &'static str,
    /// Technology label emitted on a hit
    pub label: &'static str,
    /// Property path read for the version, relative to the binding
    pub version_property: Option<&'static str>,
}

/// Attribute selector hit implying a technology
///
/// Matches when any element carries any of `attributes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeMarker {
    pub attributes: &'static [&'static str],
    pub label: &'static str,
}

/// Script source keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptKeyword {
    /// Lowercase substring searched in script URLs
    pub keyword: &'static str,
    pub label: &'static str,
}

/// Server/platform keyword with its documentation link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerSignature {
    /// Lowercase substring searched in header values
    pub keyword: &'static str,
    /// Human readable technology name
    pub name: &'static str,
    pub url: &'static str,
}

/// One complete set of client marker rules
#[derive(Debug, Clone, Copy)]
pub struct RuleSet {
    pub name: &'static str,
    pub globals: &'static [GlobalMarker],
    pub attributes: &'static [AttributeMarker],
    /// Whether `<meta name="generator">` contributes a finding
    pub meta_generator: bool,
    pub script_keywords: &'static [ScriptKeyword],
}

/// Every global marker across both rule sets, deduplicated by identifier
pub fn all_global_markers() -> Vec<&'static GlobalMarker> {
    let mut markers: Vec<&'static GlobalMarker> = Vec::new();
    for marker in PAGE_RULES.globals.iter().chain(LIBRARY_RULES.globals.iter()) {
        if !markers.iter().any(|p| p.identifier == marker.identifier) {
            markers.push(marker);
        }
    }
    markers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_global_markers_unique() {
        let markers = all_global_markers();
        let mut identifiers: Vec<_> = markers.iter().map(|p| p.identifier).collect();
        let total = identifiers.len();
        identifiers.sort_unstable();
        identifiers.dedup();
        assert_eq!(identifiers.len(), total);
        assert!(markers.iter().any(|p| p.identifier == "jQuery"));
        assert!(markers.iter().any(|p| p.identifier == "_"));
    }

    #[test]
    fn test_keywords_are_lowercase() {
        for kw in PAGE_RULES
            .script_keywords
            .iter()
            .chain(LIBRARY_RULES.script_keywords.iter())
        {
            assert_eq!(kw.keyword, kw.keyword.to_lowercase(), "{}", kw.keyword);
        }
        for sig in SERVER_SIGNATURES {
            assert_eq!(sig.keyword, sig.keyword.to_lowercase(), "{}", sig.keyword);
        }
    }
}
