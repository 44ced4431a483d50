// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Scan report handed to the presentation layer

use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::ScanConfiguration;
use crate::classify::{resolve_link, ServerFinding, TechnologyMatch};
use crate::error::ScanError;
use crate::evidence::CollectedCookie;
use crate::signatures::header_doc;

/// A required security header the response lacked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingHeader {
    pub name: String,
    pub link: Option<String>,
}

impl MissingHeader {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let link = header_doc(&name).map(str::to_string);
        Self { name, link }
    }
}

/// A server finding with its resolved link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedServerFinding {
    #[serde(flatten)]
    pub finding: ServerFinding,
    pub link: String,
}

impl From<ServerFinding> for LinkedServerFinding {
    fn from(finding: ServerFinding) -> Self {
        let link = resolve_link(&finding);
        Self { finding, link }
    }
}

/// A technology or library finding with its documentation link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedTechnology {
    pub label: String,
    pub name: String,
    pub version: Option<String>,
    pub link: Option<String>,
}

impl From<TechnologyMatch> for LinkedTechnology {
    fn from(m: TechnologyMatch) -> Self {
        Self {
            label: m.label(),
            link: m.doc_link().map(str::to_string),
            name: m.name,
            version: m.version,
        }
    }
}

/// Cookie attributes as collected, without the value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieSummary {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: String,
}

impl From<CollectedCookie> for CookieSummary {
    fn from(c: CollectedCookie) -> Self {
        Self {
            name: c.name,
            secure: c.secure,
            http_only: c.http_only,
            same_site: c.same_site,
        }
    }
}

/// Result of one scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    /// Scanned URL
    pub target: String,
    /// Sections this report was built with
    pub sections: ScanConfiguration,
    /// URL scheme, e.g. `https`
    pub protocol: Option<String>,
    pub missing_headers: Vec<MissingHeader>,
    pub server: Vec<LinkedServerFinding>,
    pub technologies: Vec<LinkedTechnology>,
    pub libraries: Vec<LinkedTechnology>,
    pub cookies: Vec<CookieSummary>,
    /// Scan-level failure, if the header fetch failed
    pub error: Option<ScanError>,
    pub duration_ms: u64,
}

impl ScanReport {
    /// Empty report for a target
    pub fn new(target: impl Into<String>, sections: ScanConfiguration) -> Self {
        Self {
            target: target.into(),
            sections,
            protocol: None,
            missing_headers: Vec::new(),
            server: Vec::new(),
            technologies: Vec::new(),
            libraries: Vec::new(),
            cookies: Vec::new(),
            error: None,
            duration_ms: 0,
        }
    }

    /// Whether the header fetch failed
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    pub fn missing_header_names(&self) -> Vec<&str> {
        self.missing_headers.iter().map(|h| h.name.as_str()).collect()
    }

    pub fn technology_labels(&self) -> Vec<&str> {
        self.technologies.iter().map(|t| t.label.as_str()).collect()
    }

    pub fn library_labels(&self) -> Vec<&str> {
        self.libraries.iter().map(|t| t.label.as_str()).collect()
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn write_linked(f: &mut fmt::Formatter<'_>, text: &str, link: Option<&str>) -> fmt::Result {
    match link {
        Some(link) => writeln!(f, "  - {} <{}>", text, link),
        None => writeln!(f, "  - {}", text),
    }
}

fn write_technologies(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    items: &[LinkedTechnology],
    empty: &str,
) -> fmt::Result {
    writeln!(f, "\n=== {} ===", title)?;
    if items.is_empty() {
        return writeln!(f, "  {}", empty);
    }
    for item in items {
        write_linked(f, &item.label, item.link.as_deref())?;
    }
    Ok(())
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Scan of {} ({}ms)", self.target, self.duration_ms)?;

        if let Some(ref protocol) = self.protocol {
            writeln!(f, "\n=== Protocol Used ===\n  {}", protocol)?;
        }

        if let Some(ref error) = self.error {
            writeln!(f, "\n[ERROR] {}", error.message)?;
        }

        if self.sections.headers {
            writeln!(f, "\n=== Missing Security Headers ===")?;
            if self.missing_headers.is_empty() {
                writeln!(f, "  No missing security headers.")?;
            }
            for header in &self.missing_headers {
                write_linked(f, &header.name, header.link.as_deref())?;
            }
        }

        if self.sections.server {
            writeln!(f, "\n=== Server Stack ===")?;
            if self.server.is_empty() {
                writeln!(f, "  No server technology disclosed.")?;
            }
            for item in &self.server {
                write_linked(f, &item.finding.to_string(), Some(item.link.as_str()))?;
            }
        }

        if self.sections.technologies {
            write_technologies(
                f,
                "Detected Technologies",
                &self.technologies,
                "No technologies detected.",
            )?;
        }

        if self.sections.libraries {
            write_technologies(f, "Detected Libraries", &self.libraries, "No libraries detected.")?;
        }

        if self.sections.cookies {
            writeln!(f, "\n=== Cookies ===")?;
            if self.cookies.is_empty() {
                writeln!(f, "  No cookies.")?;
            }
            for cookie in &self.cookies {
                writeln!(
                    f,
                    "  - {} (secure: {}, httpOnly: {}, sameSite: {})",
                    cookie.name, cookie.secure, cookie.http_only, cookie.same_site
                )?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ServerKey;

    #[test]
    fn test_missing_header_link() {
        let header = MissingHeader::new("Referrer-Policy");
        assert!(header.link.unwrap().ends_with("/Referrer-Policy"));
    }

    #[test]
    fn test_linked_technology() {
        let linked = LinkedTechnology::from(TechnologyMatch::with_version("Vue.js", "3.2.0"));
        assert_eq!(linked.label, "Vue.js: v3.2.0");
        assert_eq!(linked.name, "Vue.js");
        assert!(linked.link.is_some());

        let generator = LinkedTechnology::from(TechnologyMatch::new("Generator: Jekyll"));
        assert!(generator.link.is_none());
    }

    #[test]
    fn test_server_finding_serializes_flat() {
        let linked = LinkedServerFinding::from(ServerFinding::new(ServerKey::XPoweredBy, "Express"));
        let json = serde_json::to_value(&linked).unwrap();

        assert_eq!(json["key"], "X-Powered-By");
        assert_eq!(json["value"], "Express");
        assert_eq!(json["link"], "https://expressjs.com/");
    }

    #[test]
    fn test_display_sections() {
        let mut report = ScanReport::new("https://example.com/", ScanConfiguration::default());
        report.protocol = Some("https".to_string());
        report.missing_headers.push(MissingHeader::new("X-Frame-Options"));
        report.cookies.push(CookieSummary {
            name: "sid".to_string(),
            secure: true,
            http_only: true,
            same_site: "Strict".to_string(),
        });

        let text = report.to_string();
        assert!(text.contains("=== Protocol Used ===\n  https"));
        assert!(text.contains("  - X-Frame-Options <https://"));
        assert!(text.contains("No technologies detected."));
        assert!(text.contains("sid (secure: true, httpOnly: true, sameSite: Strict)"));
    }
}
