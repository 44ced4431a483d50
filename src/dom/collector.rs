// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Client evidence from a statically fetched page
//!
//! Without a JavaScript engine the global markers are answered from inline
//! scripts: a binding counts as present when it is declared
//! (`window.X =`, `var X =`) or its version property is assigned.

use async_trait::async_trait;
use regex::Regex;
use tracing::debug;
use url::Url;

use super::parser::{parse_html, PageSnapshot};
use crate::error::{Error, Result};
use crate::evidence::{ClientEvidenceBundle, ClientEvidenceCollector};
use crate::http::HttpClient;
use crate::signatures::{all_global_markers, GlobalMarker};

/// Compiled inline-script patterns for one global marker
#[derive(Debug)]
struct GlobalPattern {
    identifier: &'static str,
    declaration: Regex,
    version: Option<Regex>,
}

impl GlobalPattern {
    fn compile(marker: &GlobalMarker) -> Result<Self> {
        let ident = regex::escape(marker.identifier);
        let declaration = Regex::new(&format!(
            r"(?:\bwindow\.|\b(?:var|let|const)\s+){}\s*=(?:[^=]|$)",
            ident
        ))
        .map_err(|e| Error::Config(format!("Bad marker '{}': {}", marker.identifier, e)))?;

        let version = match marker.version_property {
            Some(prop) => Some(
                Regex::new(&format!(
                    r#"\b{}\.{}\s*=\s*["']([^"']+)["']"#,
                    ident,
                    regex::escape(prop)
                ))
                .map_err(|e| Error::Config(format!("Bad marker '{}': {}", marker.identifier, e)))?,
            ),
            None => None,
        };

        Ok(Self {
            identifier: marker.identifier,
            declaration,
            version,
        })
    }

    /// `None` when absent, `Some(version)` when present
    fn find(&self, scripts: &[String]) -> Option<Option<String>> {
        let version = self.version.as_ref().and_then(|re| {
            scripts
                .iter()
                .find_map(|s| re.captures(s).map(|cap| cap[1].to_string()))
        });
        if version.is_some() || scripts.iter().any(|s| self.declaration.is_match(s)) {
            Some(version)
        } else {
            None
        }
    }
}

/// Inspects the markup of the page kept by the header fetch
///
/// Fetches the page itself only when the client holds no kept page for it.
pub struct PageEvidenceCollector {
    client: HttpClient,
    globals: Vec<GlobalPattern>,
}

impl PageEvidenceCollector {
    /// Collector probing every global known to the rule sets
    pub fn new(client: HttpClient) -> Result<Self> {
        Self::with_markers(client, &all_global_markers())
    }

    /// Collector probing a custom set of globals
    pub fn with_markers(client: HttpClient, markers: &[&GlobalMarker]) -> Result<Self> {
        let globals = markers
            .iter()
            .map(|p| GlobalPattern::compile(p))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { client, globals })
    }

    /// Derive evidence from an already parsed page
    pub fn evidence_from_snapshot(&self, snapshot: PageSnapshot) -> ClientEvidenceBundle {
        let mut bundle = ClientEvidenceBundle::new();

        for pattern in &self.globals {
            if let Some(version) = pattern.find(&snapshot.inline_scripts) {
                bundle.globals.insert(pattern.identifier.to_string(), version);
            }
        }

        bundle.attributes = snapshot.attributes;
        bundle.script_sources = snapshot.script_sources;
        bundle.meta_generator = snapshot.meta_generator;
        bundle
    }

    /// Derive evidence from raw HTML
    pub fn evidence_from_html(&self, html: &str) -> Result<ClientEvidenceBundle> {
        Ok(self.evidence_from_snapshot(parse_html(html)?))
    }
}

#[async_trait]
impl ClientEvidenceCollector for PageEvidenceCollector {
    async fn collect(&self, target: &Url) -> Result<ClientEvidenceBundle> {
        let response = match self.client.take_page(target) {
            Some(response) => response,
            None => {
                debug!(url = %target, "No kept page, fetching");
                self.client.get(target).await?
            }
        };

        if !response.is_success() {
            return Err(Error::evidence(
                "page",
                format!("HTTP {} for {}", response.status_code(), target),
            ));
        }
        if !response.is_html() {
            debug!(url = %target, "Page is not HTML, no client markers");
            return Ok(ClientEvidenceBundle::new());
        }

        let bundle = self.evidence_from_html(&response.text_lossy())?;
        debug!(
            url = %target,
            globals = bundle.globals.len(),
            scripts = bundle.script_sources.len(),
            "Client evidence collected"
        );
        Ok(bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collector() -> PageEvidenceCollector {
        PageEvidenceCollector::new(HttpClient::new().unwrap()).unwrap()
    }

    #[test]
    fn test_evidence_from_html() {
        let html = r#"
            <html><head>
            <meta name="generator" content="WordPress 6.4.2">
            <script src="/wp-includes/js/jquery/jquery.min.js?ver=3.7.1"></script>
            <script>window.Vue = createShim(); Vue.version = "2.7.14";</script>
            <script>var _ = require('lodash');</script>
            </head>
            <body><div ng-app="demo" data-reactroot></div></body></html>
        "#;
        let bundle = collector().evidence_from_html(html).unwrap();

        assert_eq!(bundle.global_version("Vue"), Some("2.7.14"));
        assert!(bundle.has_global("_"));
        assert_eq!(bundle.global_version("_"), None);
        assert!(!bundle.has_global("jQuery"));
        assert!(bundle.has_attribute("ng-app"));
        assert!(bundle.has_attribute("data-reactroot"));
        assert_eq!(
            bundle.script_sources,
            vec!["/wp-includes/js/jquery/jquery.min.js?ver=3.7.1"]
        );
        assert_eq!(bundle.meta_generator.as_deref(), Some("WordPress 6.4.2"));
    }

    #[test]
    fn test_comparison_is_not_declaration() {
        let html = r#"<script>if (window.React == null) { load(); } var jQueryUI = 1;</script>"#;
        let bundle = collector().evidence_from_html(html).unwrap();

        assert!(!bundle.has_global("React"));
        assert!(!bundle.has_global("jQuery"));
    }

    #[test]
    fn test_version_assignment_implies_presence() {
        let html = r#"<script>angular.version.full = '1.8.3';</script>"#;
        let bundle = collector().evidence_from_html(html).unwrap();

        assert_eq!(bundle.global_version("angular"), Some("1.8.3"));
    }

    #[test]
    fn test_plain_page_is_empty() {
        let bundle = collector()
            .evidence_from_html("<html><body><p>Hello</p></body></html>")
            .unwrap();
        assert!(bundle.is_empty());
    }
}
