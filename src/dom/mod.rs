// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Static page inspection
//!
//! Parses a page with html5ever and derives the client evidence a browser
//! host would otherwise gather by script injection.

mod collector;
mod parser;

pub use collector::PageEvidenceCollector;
pub use parser::{parse_html, PageSnapshot};
