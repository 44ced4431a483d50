// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Evidence classifiers
//!
//! - Header compliance: which required security headers are absent
//! - Server stack: technology revealed by `Server`-class headers
//! - Client markers: frameworks and libraries implied by page markers
//!
//! All classifiers are pure functions of their input.

mod compliance;
mod markers;
mod server;

pub use compliance::check_missing;
pub use markers::{
    detect_libraries, detect_technologies, DedupPolicy, MarkerMatcher, TechnologyMatch,
};
pub use server::{classify_server, resolve_link, resolve_signature, ServerFinding, ServerKey};
