// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Scanner and scan configuration

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::preferences::PreferenceStore;
use crate::classify::DedupPolicy;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, DEFAULT_USER_AGENT};

/// One user-facing report section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanToggle {
    Protocol,
    Headers,
    Technologies,
    Libraries,
    Server,
    Cookies,
}

impl ScanToggle {
    pub const ALL: [ScanToggle; 6] = [
        ScanToggle::Protocol,
        ScanToggle::Headers,
        ScanToggle::Technologies,
        ScanToggle::Libraries,
        ScanToggle::Server,
        ScanToggle::Cookies,
    ];

    /// Preference key for the toggle
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanToggle::Protocol => "protocol",
            ScanToggle::Headers => "headers",
            ScanToggle::Technologies => "technologies",
            ScanToggle::Libraries => "libraries",
            ScanToggle::Server => "server",
            ScanToggle::Cookies => "cookies",
        }
    }
}

impl fmt::Display for ScanToggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScanToggle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        ScanToggle::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| Error::Config(format!("Unknown scan section: {}", s)))
    }
}

/// Which report sections a scan produces
///
/// Every section defaults to enabled. The header fetch runs regardless,
/// because its outcome gates the rest of the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfiguration {
    pub protocol: bool,
    pub headers: bool,
    pub technologies: bool,
    pub libraries: bool,
    pub server: bool,
    pub cookies: bool,
}

impl Default for ScanConfiguration {
    fn default() -> Self {
        Self {
            protocol: true,
            headers: true,
            technologies: true,
            libraries: true,
            server: true,
            cookies: true,
        }
    }
}

impl ScanConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self, toggle: ScanToggle) -> bool {
        match toggle {
            ScanToggle::Protocol => self.protocol,
            ScanToggle::Headers => self.headers,
            ScanToggle::Technologies => self.technologies,
            ScanToggle::Libraries => self.libraries,
            ScanToggle::Server => self.server,
            ScanToggle::Cookies => self.cookies,
        }
    }

    pub fn set(&mut self, toggle: ScanToggle, enabled: bool) {
        let slot = match toggle {
            ScanToggle::Protocol => &mut self.protocol,
            ScanToggle::Headers => &mut self.headers,
            ScanToggle::Technologies => &mut self.technologies,
            ScanToggle::Libraries => &mut self.libraries,
            ScanToggle::Server => &mut self.server,
            ScanToggle::Cookies => &mut self.cookies,
        };
        *slot = enabled;
    }

    /// Builder-style toggle
    pub fn with(mut self, toggle: ScanToggle, enabled: bool) -> Self {
        self.set(toggle, enabled);
        self
    }

    /// Whether any client marker pass runs
    pub fn wants_client_evidence(&self) -> bool {
        self.technologies || self.libraries
    }

    /// Read toggles from a preference store; unset keys default to enabled
    pub fn load(store: &dyn PreferenceStore) -> Result<Self> {
        let mut config = Self::default();
        for toggle in ScanToggle::ALL {
            config.set(toggle, store.get_or_default(toggle.as_str())?);
        }
        Ok(config)
    }

    /// Write every toggle to a preference store
    pub fn save(&self, store: &dyn PreferenceStore) -> Result<()> {
        for toggle in ScanToggle::ALL {
            store.set(toggle.as_str(), self.is_enabled(toggle))?;
        }
        Ok(())
    }
}

/// Scanner configuration
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// User agent string
    pub user_agent: String,
    /// Timeout for each HTTP request
    pub timeout: Duration,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Accept invalid TLS certificates
    pub ignore_https_errors: bool,
    /// Extra headers sent with every request
    pub extra_headers: Vec<(String, String)>,
    /// How repeated technology findings collapse
    pub dedup_policy: DedupPolicy,
    /// Fetch headers with GET and parse that page body for client markers
    pub collect_page_evidence: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            max_redirects: 10,
            ignore_https_errors: false,
            extra_headers: vec![],
            dedup_policy: DedupPolicy::default(),
            collect_page_evidence: true,
        }
    }
}

impl ScannerConfig {
    /// Create a new scanner config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the redirect limit
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    /// Ignore HTTPS errors
    pub fn ignore_https_errors(mut self, ignore: bool) -> Self {
        self.ignore_https_errors = ignore;
        self
    }

    /// Add an extra header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }

    /// Set the deduplication policy
    pub fn dedup_policy(mut self, policy: DedupPolicy) -> Self {
        self.dedup_policy = policy;
        self
    }

    /// Enable/disable page body inspection
    pub fn collect_page_evidence(mut self, enabled: bool) -> Self {
        self.collect_page_evidence = enabled;
        self
    }

    /// Headers and server only: short timeout, no page body
    pub fn for_quick_check() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_redirects: 5,
            collect_page_evidence: false,
            ..Default::default()
        }
    }

    /// HTTP client settings derived from this config
    pub fn http_config(&self) -> Result<HttpClientConfig> {
        let mut http = HttpClientConfig {
            user_agent: self.user_agent.clone(),
            timeout: self.timeout,
            max_redirects: self.max_redirects,
            accept_invalid_certs: self.ignore_https_errors,
            keep_page: self.collect_page_evidence,
            ..Default::default()
        };
        for (name, value) in &self.extra_headers {
            http = http.header(name, value)?;
        }
        Ok(http)
    }
}
