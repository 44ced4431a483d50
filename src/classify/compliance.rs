// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Security header compliance check

use crate::evidence::HeaderSet;

/// Required headers absent from `received`, in `required` order
///
/// Presence is exact, case-insensitive name equality. Header values are
/// ignored. An empty header set reports every required header.
pub fn check_missing(received: &HeaderSet, required: &[&str]) -> Vec<String> {
    let present = received.lowercase_names();

    required
        .iter()
        .filter(|header| !present.contains(&header.to_lowercase()))
        .map(|header| header.to_string())
        .collect()
}
