// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # dawgscan - Passive Page Classifier
//!
//! Inspects one web page and reports its security posture and technology
//! stack. Nothing is sent to the target beyond an ordinary page load.
//!
//! ## Features
//!
//! - Security headers: reports required headers the response lacks
//! - Server stack: classifies `Server`, `X-Powered-By` and `X-Generator`
//! - Technologies: framework markers from globals, attributes and scripts
//! - Libraries: script libraries with versions where the page exposes them
//! - Cookies: name and security attributes of cookies set by the page
//! - Section toggles persisted in a preference store
//!
//! ## Example
//!
//! ```rust,no_run
//! use dawgscan::{ScanConfiguration, Scanner, ScannerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let scanner = Scanner::new(ScannerConfig::default())?;
//!     let report = scanner
//!         .scan("https://example.com", &ScanConfiguration::default())
//!         .await?;
//!
//!     for header in &report.missing_headers {
//!         println!("Missing: {}", header.name);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod dom;
pub mod error;
pub mod evidence;
pub mod http;
pub mod scan;
pub mod signatures;

// Re-exports for convenience

// Scanning
pub use scan::{resolve_target, run_scan, Scanner, ScannerConfig};

// Sections and preferences
pub use scan::{
    JsonFilePreferences, MemoryPreferences, PreferenceStore, ScanConfiguration, ScanToggle,
};

// Report
pub use scan::{CookieSummary, LinkedServerFinding, LinkedTechnology, MissingHeader, ScanReport};

// Classifiers
pub use classify::{
    check_missing, classify_server, detect_libraries, detect_technologies, resolve_link,
    DedupPolicy, ServerFinding, ServerKey, TechnologyMatch,
};

// Evidence
pub use evidence::{
    ClientEvidenceBundle, ClientEvidenceCollector, CollectedCookie, CookieCollector,
    HeaderFetcher, HeaderSet, NoCookies, StaticEvidence,
};

// HTTP
pub use http::{CookieJar, HttpClient, HttpClientConfig};

// Page evidence
pub use dom::PageEvidenceCollector;

// Errors
pub use error::{Error, ErrorContext, Result, ScanError, ScanErrorKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
