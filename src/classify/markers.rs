// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Client marker matching
//!
//! Evaluates a [`RuleSet`] against a [`ClientEvidenceBundle`]. Rule
//! categories contribute in a fixed order (globals, attribute hits, meta
//! generator, script sources) and every category is always evaluated; the
//! order only decides the position of each finding in the output.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::evidence::ClientEvidenceBundle;
use crate::signatures::{technology_doc, RuleSet, LIBRARY_RULES, PAGE_RULES};

/// A detected technology, optionally with its version
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TechnologyMatch {
    pub name: String,
    pub version: Option<String>,
}

impl TechnologyMatch {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
        }
    }

    pub fn with_version(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: Some(version.into()),
        }
    }

    /// Display label, e.g. `jQuery` or `jQuery: v3.6.0`
    pub fn label(&self) -> String {
        match &self.version {
            Some(version) => format!("{}: v{}", self.name, version),
            None => self.name.clone(),
        }
    }

    /// Documentation link for the technology, if one is known
    pub fn doc_link(&self) -> Option<&'static str> {
        technology_doc(&self.name)
    }
}

impl fmt::Display for TechnologyMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// How repeated findings collapse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DedupPolicy {
    /// One entry per technology name. A bare entry is upgraded in place by
    /// the first version-qualified finding for the same name.
    #[default]
    PreferVersioned,
    /// One entry per exact label; `React` and `React: v18.2.0` both survive.
    ExactLabel,
}

/// Matches one rule set against evidence bundles
#[derive(Debug, Clone, Copy)]
pub struct MarkerMatcher {
    rules: &'static RuleSet,
    policy: DedupPolicy,
}

impl MarkerMatcher {
    pub fn new(rules: &'static RuleSet, policy: DedupPolicy) -> Self {
        Self { rules, policy }
    }

    /// Matcher over the page technology rules
    pub fn technologies(policy: DedupPolicy) -> Self {
        Self::new(&PAGE_RULES, policy)
    }

    /// Matcher over the library rules
    pub fn libraries(policy: DedupPolicy) -> Self {
        Self::new(&LIBRARY_RULES, policy)
    }

    pub fn rules(&self) -> &'static RuleSet {
        self.rules
    }

    /// Detect technologies, deduplicated in first-seen order
    pub fn detect(&self, evidence: &ClientEvidenceBundle) -> Vec<TechnologyMatch> {
        let raw = self.raw_matches(evidence);
        let total = raw.len();
        let matches = dedup(raw, self.policy);

        debug!(
            rules = self.rules.name,
            raw = total,
            distinct = matches.len(),
            "Client markers matched"
        );

        matches
    }

    /// Every rule hit before deduplication, in category order
    fn raw_matches(&self, evidence: &ClientEvidenceBundle) -> Vec<TechnologyMatch> {
        let mut found = Vec::new();

        // 1. Global bindings
        for marker in self.rules.globals {
            if !evidence.has_global(marker.identifier) {
                continue;
            }
            let version = marker
                .version_property
                .and_then(|_| evidence.global_version(marker.identifier))
                .filter(|v| !v.trim().is_empty());
            found.push(match version {
                Some(v) => TechnologyMatch::with_version(marker.label, v.trim()),
                None => TechnologyMatch::new(marker.label),
            });
        }

        // 2. Attribute selectors
        for marker in self.rules.attributes {
            if marker.attributes.iter().any(|a| evidence.has_attribute(a)) {
                found.push(TechnologyMatch::new(marker.label));
            }
        }

        // 3. Generator meta, passed through verbatim
        if self.rules.meta_generator {
            if let Some(ref content) = evidence.meta_generator {
                found.push(TechnologyMatch::new(format!("Generator: {}", content)));
            }
        }

        // 4. Script sources, every matching keyword contributes
        for src in &evidence.script_sources {
            let src = src.to_lowercase();
            for kw in self.rules.script_keywords {
                if src.contains(kw.keyword) {
                    found.push(TechnologyMatch::new(kw.label));
                }
            }
        }

        found
    }
}

fn dedup(matches: Vec<TechnologyMatch>, policy: DedupPolicy) -> Vec<TechnologyMatch> {
    match policy {
        DedupPolicy::ExactLabel => {
            let mut seen = HashSet::new();
            matches
                .into_iter()
                .filter(|m| seen.insert(m.label()))
                .collect()
        }
        DedupPolicy::PreferVersioned => {
            let mut out: Vec<TechnologyMatch> = Vec::new();
            let mut index: HashMap<String, usize> = HashMap::new();
            for m in matches {
                match index.get(&m.name) {
                    Some(&i) => {
                        if out[i].version.is_none() && m.version.is_some() {
                            out[i].version = m.version;
                        }
                    }
                    None => {
                        index.insert(m.name.clone(), out.len());
                        out.push(m);
                    }
                }
            }
            out
        }
    }
}

/// Page-level technologies implied by the evidence
pub fn detect_technologies(
    evidence: &ClientEvidenceBundle,
    policy: DedupPolicy,
) -> Vec<TechnologyMatch> {
    MarkerMatcher::technologies(policy).detect(evidence)
}

/// Libraries implied by the evidence
pub fn detect_libraries(
    evidence: &ClientEvidenceBundle,
    policy: DedupPolicy,
) -> Vec<TechnologyMatch> {
    MarkerMatcher::libraries(policy).detect(evidence)
}
