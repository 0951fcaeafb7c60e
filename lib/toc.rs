//! Table-of-contents parsing.
//!
//! The TOC is a loosely structured text document: plain lines name a category,
//! list items carry markdown links to the sections under it.
//!
//! ```text
//! Getting Started
//! - [Installation](https://docs.example.com/install): How to install
//! - [Quickstart](https://docs.example.com/quick)
//! ```

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::types::SectionDescriptor;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Prefixes that mark a line as a list item.
const LIST_MARKERS: &[&str] = &["-", "*", "1.", "2.", "3.", "4.", "5."];

/// First `[title](url)` on a line.
static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link pattern is valid"));

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Parse state threaded through the lines of a TOC.
#[derive(Debug, Default)]
struct TocScan {
    current_category: String,
    descriptors: Vec<SectionDescriptor>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl TocScan {
    fn step(mut self, line: &str, query: Option<&str>) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return self;
        }

        if !is_list_item(line) {
            if !line.starts_with('#') && !line.starts_with("http") {
                self.current_category = line.replace('#', "").trim().to_string();
            }
            return self;
        }

        let Some((title, url)) = parse_link(line) else {
            return self;
        };

        if let Some(query) = query {
            let query = query.to_lowercase();
            if !title.to_lowercase().contains(&query)
                && !self.current_category.to_lowercase().contains(&query)
            {
                return self;
            }
        }

        let description = if self.current_category.is_empty() {
            title.to_string()
        } else {
            format!("{}: {}", self.current_category, title)
        };

        self.descriptors.push(SectionDescriptor {
            title: title.to_string(),
            category: self.current_category.clone(),
            url: url.to_string(),
            description,
        });
        self
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Parse a TOC document into section descriptors, in document order.
pub fn parse_toc(toc: &str) -> Vec<SectionDescriptor> {
    parse_toc_filtered(toc, None)
}

/// Parse a TOC document, keeping only entries whose title or category contains
/// `query` (case-insensitive). A `None` or empty query keeps everything.
pub fn parse_toc_filtered(toc: &str, query: Option<&str>) -> Vec<SectionDescriptor> {
    let query = query.filter(|q| !q.is_empty());
    toc.trim()
        .split('\n')
        .fold(TocScan::default(), |scan, line| scan.step(line, query))
        .descriptors
}

/// Map section titles to their URLs, in TOC order.
///
/// A repeated title keeps its first position but takes the later URL.
pub fn section_url_map(descriptors: &[SectionDescriptor]) -> IndexMap<String, String> {
    descriptors
        .iter()
        .map(|d| (d.title.clone(), d.url.clone()))
        .collect()
}

fn is_list_item(line: &str) -> bool {
    LIST_MARKERS.iter().any(|marker| line.starts_with(marker))
}

fn parse_link(line: &str) -> Option<(&str, &str)> {
    let captures = LINK_PATTERN.captures(line)?;
    let title = captures.get(1)?.as_str().trim();
    let url = captures.get(2)?.as_str().trim();
    if title.is_empty() || url.is_empty() {
        return None;
    }
    Some((title, url))
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
