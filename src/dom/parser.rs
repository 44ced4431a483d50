// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTML parser using html5ever

use std::collections::BTreeSet;

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::error::{Error, Result};

/// Markers extracted from one parsed page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSnapshot {
    /// `src` of script elements, in document order
    pub script_sources: Vec<String>,
    /// Text of script elements without `src`
    pub inline_scripts: Vec<String>,
    /// Lowercased attribute names seen on any element
    pub attributes: BTreeSet<String>,
    /// Content of the first `<meta name="generator">`
    pub meta_generator: Option<String>,
}

/// Parse an HTML document into a [`PageSnapshot`]
pub fn parse_html(html: &str) -> Result<PageSnapshot> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    };

    let dom = parse_document(RcDom::default(), opts)
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .map_err(|e| Error::HtmlParse(e.to_string()))?;

    let mut snapshot = PageSnapshot::default();

    // Depth-first, document order, without recursion
    let mut stack: Vec<Handle> = vec![dom.document.clone()];
    while let Some(handle) = stack.pop() {
        if let NodeData::Element {
            ref name,
            ref attrs,
            ..
        } = handle.data
        {
            let attrs = attrs.borrow();
            let attr = |wanted: &str| {
                attrs
                    .iter()
                    .find(|a| a.name.local.as_ref().eq_ignore_ascii_case(wanted))
                    .map(|a| a.value.to_string())
            };

            for a in attrs.iter() {
                snapshot.attributes.insert(a.name.local.to_lowercase());
            }

            match &*name.local {
                "script" => match attr("src") {
                    Some(src) if !src.trim().is_empty() => {
                        snapshot.script_sources.push(src.trim().to_string())
                    }
                    _ => {
                        let text = text_content(&handle);
                        if !text.trim().is_empty() {
                            snapshot.inline_scripts.push(text);
                        }
                    }
                },
                "meta" if snapshot.meta_generator.is_none() => {
                    let is_generator = attr("name")
                        .map(|n| n.trim().eq_ignore_ascii_case("generator"))
                        .unwrap_or(false);
                    if is_generator {
                        if let Some(content) = attr("content") {
                            snapshot.meta_generator = Some(content.trim().to_string());
                        }
                    }
                }
                _ => {}
            }
        }

        for child in handle.children.borrow().iter().rev() {
            stack.push(child.clone());
        }
    }

    Ok(snapshot)
}

/// Concatenated text of the direct text children
fn text_content(handle: &Handle) -> String {
    let mut text = String::new();
    for child in handle.children.borrow().iter() {
        if let NodeData::Text { ref contents } = child.data {
            text.push_str(&contents.borrow());
        }
    }
    text
}
