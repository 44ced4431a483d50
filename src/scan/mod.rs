// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Evidence aggregation
//!
//! Runs the classifiers over one evidence snapshot and merges their output
//! into a [`ScanReport`]. The header fetch runs first; when it fails the
//! report carries the error, the full missing-header catalog, and nothing
//! else. Otherwise client marker and cookie collection run concurrently.

mod config;
mod preferences;
mod report;

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};
use url::Url;

pub use config::{ScanConfiguration, ScanToggle, ScannerConfig};
pub use preferences::{JsonFilePreferences, MemoryPreferences, PreferenceStore};
pub use report::{CookieSummary, LinkedServerFinding, LinkedTechnology, MissingHeader, ScanReport};

use crate::classify::{
    check_missing, classify_server, detect_libraries, detect_technologies, DedupPolicy,
};
use crate::dom::PageEvidenceCollector;
use crate::error::{Error, Result, ScanError};
use crate::evidence::{
    ClientEvidenceBundle, ClientEvidenceCollector, CollectedCookie, CookieCollector, HeaderFetcher,
    HeaderSet, StaticEvidence,
};
use crate::http::HttpClient;
use crate::signatures::REQUIRED_HEADERS;

/// Parse and validate a scan target
///
/// Only absolute `http`/`https` URLs with a host can be scanned.
pub fn resolve_target(target: &str) -> Result<Url> {
    let target = target.trim();
    if target.is_empty() {
        return Err(Error::target_unavailable("no target URL"));
    }

    let url = Url::parse(target)
        .map_err(|e| Error::target_unavailable(format!("{}: {}", target, e)))?;

    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        scheme => Err(Error::target_unavailable(format!(
            "cannot scan {} URL {}",
            scheme, target
        ))),
    }
}

fn missing_headers(headers: &HeaderSet) -> Vec<MissingHeader> {
    check_missing(headers, &REQUIRED_HEADERS)
        .into_iter()
        .map(MissingHeader::new)
        .collect()
}

async fn collect_client_evidence(
    collector: &dyn ClientEvidenceCollector,
    url: &Url,
) -> ClientEvidenceBundle {
    match collector.collect(url).await {
        Ok(bundle) => bundle,
        Err(e) => {
            warn!(url = %url, error = %e, "Client evidence unavailable, treating as empty");
            ClientEvidenceBundle::new()
        }
    }
}

async fn collect_cookies(collector: &dyn CookieCollector, domain: &str) -> Vec<CollectedCookie> {
    match collector.cookies(domain).await {
        Ok(cookies) => cookies,
        Err(e) => {
            warn!(domain, error = %e, "Cookies unavailable, treating as empty");
            Vec::new()
        }
    }
}

/// Run one scan against `target`
///
/// Returns `Err` only when the target itself is unusable. A failed header
/// fetch is recorded in the report.
pub async fn run_scan(
    target: &str,
    fetcher: &dyn HeaderFetcher,
    client_evidence: &dyn ClientEvidenceCollector,
    cookie_collector: &dyn CookieCollector,
    sections: &ScanConfiguration,
    policy: DedupPolicy,
) -> Result<ScanReport> {
    let start = Instant::now();
    let url = resolve_target(target)?;
    info!(target = %url, "Starting scan");

    let mut report = ScanReport::new(url.as_str(), *sections);
    if sections.protocol {
        report.protocol = Some(url.scheme().to_string());
    }

    let headers = match fetcher.fetch_headers(&url).await {
        Ok(headers) => headers,
        Err(e) => {
            warn!(target = %url, error = %e, "Header fetch failed, skipping remaining evidence");
            report.error = Some(ScanError::from_error(&e));
            if sections.headers {
                report.missing_headers = missing_headers(&HeaderSet::new());
            }
            report.duration_ms = start.elapsed().as_millis() as u64;
            return Ok(report);
        }
    };

    let domain = url.host_str().unwrap_or_default();
    let (bundle, cookies) = futures::join!(
        async {
            if sections.wants_client_evidence() {
                collect_client_evidence(client_evidence, &url).await
            } else {
                ClientEvidenceBundle::new()
            }
        },
        async {
            if sections.cookies {
                collect_cookies(cookie_collector, domain).await
            } else {
                Vec::new()
            }
        },
    );

    if sections.headers {
        report.missing_headers = missing_headers(&headers);
    }
    if sections.server {
        report.server = classify_server(&headers)
            .into_iter()
            .map(LinkedServerFinding::from)
            .collect();
    }
    if sections.technologies {
        report.technologies = detect_technologies(&bundle, policy)
            .into_iter()
            .map(LinkedTechnology::from)
            .collect();
    }
    if sections.libraries {
        report.libraries = detect_libraries(&bundle, policy)
            .into_iter()
            .map(LinkedTechnology::from)
            .collect();
    }
    report.cookies = cookies.into_iter().map(CookieSummary::from).collect();
    report.duration_ms = start.elapsed().as_millis() as u64;

    info!(
        target = %url,
        missing_headers = report.missing_headers.len(),
        server = report.server.len(),
        technologies = report.technologies.len(),
        libraries = report.libraries.len(),
        cookies = report.cookies.len(),
        duration_ms = report.duration_ms,
        "Scan finished"
    );

    Ok(report)
}

/// Scanner wiring the collaborators together
pub struct Scanner {
    config: ScannerConfig,
    fetcher: Arc<dyn HeaderFetcher>,
    client_evidence: Arc<dyn ClientEvidenceCollector>,
    cookies: Arc<dyn CookieCollector>,
    /// Built-in HTTP client, reset before each scan
    client: Option<HttpClient>,
}

impl Scanner {
    /// Scanner over HTTP, with the page body as client evidence source
    pub fn new(config: ScannerConfig) -> Result<Self> {
        let client = HttpClient::with_config(config.http_config()?)?;

        let client_evidence: Arc<dyn ClientEvidenceCollector> = if config.collect_page_evidence {
            Arc::new(PageEvidenceCollector::new(client.clone())?)
        } else {
            Arc::new(StaticEvidence::default())
        };

        Ok(Self {
            config,
            fetcher: Arc::new(client.clone()),
            client_evidence,
            cookies: Arc::new(client.cookie_jar().clone()),
            client: Some(client),
        })
    }

    /// Scanner over arbitrary collaborators
    pub fn with_collectors(
        config: ScannerConfig,
        fetcher: Arc<dyn HeaderFetcher>,
        client_evidence: Arc<dyn ClientEvidenceCollector>,
        cookies: Arc<dyn CookieCollector>,
    ) -> Self {
        Self {
            config,
            fetcher,
            client_evidence,
            cookies,
            client: None,
        }
    }

    /// Replace the client evidence source, e.g. with a host-provided bundle
    pub fn with_client_evidence(mut self, collector: Arc<dyn ClientEvidenceCollector>) -> Self {
        self.client_evidence = collector;
        self
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Scan one target
    pub async fn scan(&self, target: &str, sections: &ScanConfiguration) -> Result<ScanReport> {
        if let Some(ref client) = self.client {
            client.reset();
        }

        run_scan(
            target,
            self.fetcher.as_ref(),
            self.client_evidence.as_ref(),
            self.cookies.as_ref(),
            sections,
            self.config.dedup_policy,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    struct FakeFetcher(std::result::Result<HeaderSet, u16>);

    #[async_trait]
    impl HeaderFetcher for FakeFetcher {
        async fn fetch_headers(&self, target: &Url) -> Result<HeaderSet> {
            match &self.0 {
                Ok(headers) => Ok(headers.clone()),
                Err(status) => Err(Error::fetch_failed(
                    target.as_str(),
                    Some(*status),
                    "Internal Server Error",
                )),
            }
        }
    }

    /// Records every call so tests can assert what ran
    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
        cookies: Vec<CollectedCookie>,
        fail: bool,
    }

    #[async_trait]
    impl ClientEvidenceCollector for Recorder {
        async fn collect(&self, target: &Url) -> Result<ClientEvidenceBundle> {
            self.calls.lock().push(format!("collect {}", target));
            if self.fail {
                return Err(Error::evidence("page", "script injection refused"));
            }
            Ok(ClientEvidenceBundle::new()
                .with_global("jQuery", None)
                .with_script("/libs/jquery.min.js")
                .with_script("/libs/lodash.min.js"))
        }
    }

    #[async_trait]
    impl CookieCollector for Recorder {
        async fn cookies(&self, domain: &str) -> Result<Vec<CollectedCookie>> {
            self.calls.lock().push(format!("cookies {}", domain));
            if self.fail {
                return Err(Error::evidence("cookies", "store locked"));
            }
            Ok(self.cookies.clone())
        }
    }

    fn sid_cookie() -> CollectedCookie {
        CollectedCookie {
            name: "sid".to_string(),
            value: "s3cr3t".to_string(),
            secure: true,
            http_only: true,
            same_site: "Strict".to_string(),
        }
    }

    fn ok_headers() -> FakeFetcher {
        FakeFetcher(Ok(HeaderSet::new()
            .with("Server", "nginx/1.18.0 (Ubuntu)")
            .with("Content-Security-Policy", "default-src 'self'")))
    }

    #[tokio::test]
    async fn test_successful_scan() {
        let recorder = Recorder {
            cookies: vec![sid_cookie()],
            ..Default::default()
        };

        let report = run_scan(
            "https://example.com/page",
            &ok_headers(),
            &recorder,
            &recorder,
            &ScanConfiguration::default(),
            DedupPolicy::default(),
        )
        .await
        .unwrap();

        assert!(!report.is_failed());
        assert_eq!(report.protocol.as_deref(), Some("https"));
        assert_eq!(
            report.missing_header_names(),
            vec![
                "X-Content-Type-Options",
                "X-Frame-Options",
                "Strict-Transport-Security",
                "Referrer-Policy",
            ]
        );
        assert_eq!(report.server.len(), 1);
        assert_eq!(report.server[0].link, "https://nginx.org/en/docs/");
        assert_eq!(report.technology_labels(), vec!["jQuery"]);
        assert_eq!(report.library_labels(), vec!["jQuery", "Lodash"]);
        assert_eq!(
            report.cookies,
            vec![CookieSummary {
                name: "sid".to_string(),
                secure: true,
                http_only: true,
                same_site: "Strict".to_string(),
            }]
        );

        // one evidence snapshot serves both marker passes
        let calls = recorder.calls.lock().clone();
        assert_eq!(calls.iter().filter(|c| c.starts_with("collect")).count(), 1);
        assert!(calls.contains(&"cookies example.com".to_string()));
    }

    #[tokio::test]
    async fn test_fetch_failure_short_circuits() {
        let recorder = Recorder {
            cookies: vec![sid_cookie()],
            ..Default::default()
        };

        let report = run_scan(
            "http://example.com",
            &FakeFetcher(Err(500)),
            &recorder,
            &recorder,
            &ScanConfiguration::default(),
            DedupPolicy::default(),
        )
        .await
        .unwrap();

        let error = report.error.as_ref().unwrap();
        assert!(error.is_fetch_failure());
        assert_eq!(error.status, Some(500));
        assert_eq!(report.protocol.as_deref(), Some("http"));
        assert_eq!(report.missing_header_names(), REQUIRED_HEADERS.to_vec());
        assert!(report.server.is_empty());
        assert!(report.technologies.is_empty());
        assert!(report.libraries.is_empty());
        assert!(report.cookies.is_empty());
        assert!(recorder.calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_collection_failures_are_empty_evidence() {
        let recorder = Recorder {
            fail: true,
            ..Default::default()
        };

        let report = run_scan(
            "https://example.com",
            &ok_headers(),
            &recorder,
            &recorder,
            &ScanConfiguration::default(),
            DedupPolicy::default(),
        )
        .await
        .unwrap();

        assert!(report.error.is_none());
        assert!(report.technologies.is_empty());
        assert!(report.libraries.is_empty());
        assert!(report.cookies.is_empty());
        assert_eq!(report.server.len(), 1);
    }

    #[tokio::test]
    async fn test_disabled_sections_skip_work() {
        let recorder = Recorder::default();
        let sections = ScanConfiguration::default()
            .with(ScanToggle::Protocol, false)
            .with(ScanToggle::Technologies, false)
            .with(ScanToggle::Libraries, false)
            .with(ScanToggle::Cookies, false);

        let report = run_scan(
            "https://example.com",
            &ok_headers(),
            &recorder,
            &recorder,
            &sections,
            DedupPolicy::default(),
        )
        .await
        .unwrap();

        assert!(report.protocol.is_none());
        assert!(report.technologies.is_empty());
        assert_eq!(report.missing_headers.len(), 4);
        assert_eq!(report.server.len(), 1);
        assert!(recorder.calls.lock().is_empty());
    }

    #[test]
    fn test_resolve_target() {
        assert!(resolve_target("https://example.com").is_ok());
        assert!(matches!(resolve_target("  "), Err(Error::TargetUnavailable(_))));
        assert!(matches!(resolve_target("not a url"), Err(Error::TargetUnavailable(_))));
        assert!(matches!(
            resolve_target("chrome://extensions"),
            Err(Error::TargetUnavailable(_))
        ));
        assert!(matches!(resolve_target("file:///etc/hosts"), Err(Error::TargetUnavailable(_))));
    }

    #[test]
    fn test_unavailable_target_is_err() {
        let recorder = Recorder::default();
        let result = tokio_test::block_on(run_scan(
            "",
            &ok_headers(),
            &recorder,
            &recorder,
            &ScanConfiguration::default(),
            DedupPolicy::default(),
        ));

        assert!(matches!(result, Err(Error::TargetUnavailable(_))));
    }

    #[tokio::test]
    async fn test_scanner_with_collectors() {
        let recorder = Arc::new(Recorder::default());
        let scanner = Scanner::with_collectors(
            ScannerConfig::new().dedup_policy(DedupPolicy::ExactLabel),
            Arc::new(ok_headers()),
            recorder.clone(),
            recorder.clone(),
        );

        let first = scanner
            .scan("https://example.com", &ScanConfiguration::default())
            .await
            .unwrap();
        let second = scanner
            .scan("https://example.com", &ScanConfiguration::default())
            .await
            .unwrap();

        assert_eq!(first.technologies, second.technologies);
        assert_eq!(first.library_labels(), vec!["jQuery", "Lodash"]);
    }
}
