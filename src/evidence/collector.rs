// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Collaborator traits that gather raw evidence
//!
//! The aggregator depends only on these traits. Concrete implementations
//! live in [`crate::http`] (header fetch, cookies) and [`crate::dom`]
//! (static page markers); tests plug in fakes.

use async_trait::async_trait;
use url::Url;

use super::{ClientEvidenceBundle, CollectedCookie, HeaderSet};
use crate::error::Result;

/// Fetches the response headers of a target page
///
/// A non-success status must be reported as [`crate::Error::FetchFailed`].
#[async_trait]
pub trait HeaderFetcher: Send + Sync {
    async fn fetch_headers(&self, target: &Url) -> Result<HeaderSet>;
}

/// Produces one client evidence snapshot for a page
#[async_trait]
pub trait ClientEvidenceCollector: Send + Sync {
    async fn collect(&self, target: &Url) -> Result<ClientEvidenceBundle>;
}

/// Lists the cookies visible for a domain
#[async_trait]
pub trait CookieCollector: Send + Sync {
    async fn cookies(&self, domain: &str) -> Result<Vec<CollectedCookie>>;
}

/// Client evidence gathered ahead of time, e.g. by a browser host
#[derive(Debug, Clone, Default)]
pub struct StaticEvidence(pub ClientEvidenceBundle);

#[async_trait]
impl ClientEvidenceCollector for StaticEvidence {
    async fn collect(&self, _target: &Url) -> Result<ClientEvidenceBundle> {
        Ok(self.0.clone())
    }
}

/// Cookie collector that never finds anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCookies;

#[async_trait]
impl CookieCollector for NoCookies {
    async fn cookies(&self, _domain: &str) -> Result<Vec<CollectedCookie>> {
        Ok(Vec::new())
    }
}
