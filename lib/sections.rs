//! Section extraction from the full documentation document.
//!
//! Sections are laid out as repeated front-matter blocks:
//!
//! ```text
//! ---
//! title: Installation
//! sidebar_position: 1
//! ---
//! body of the section
//! ---
//!
//! ---
//! title: Quickstart
//! ---
//! ```
//!
//! A section body ends at a `---` line that is followed by another `---` line
//! or by a blank line. A `---` followed by text is part of the body.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use indexmap::IndexMap;

use crate::types::{DocsError, Result};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

const DELIMITER: &str = "---";

const TITLE_KEY: &str = "title:";

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Find the body of the section titled `title` (case-insensitive).
///
/// Only the first `title:` line matching the title is considered. Returns
/// `None` when no block matches or when the matching block has an empty body.
pub fn find_section_content(full_docs: &str, title: &str) -> Option<String> {
    let lines: Vec<&str> = full_docs.split('\n').collect();
    let wanted = title.to_lowercase();

    let start = lines.iter().position(|line| {
        front_matter_title(line).is_some_and(|t| t.to_lowercase() == wanted)
    })?;

    // The line after the closing front-matter delimiter.
    let body_start = lines[start + 1..]
        .iter()
        .position(|line| line.trim() == DELIMITER)
        .map(|offset| start + offset + 2)?;

    let body_end = (body_start..lines.len())
        .find(|&i| is_section_boundary(&lines, i))
        .unwrap_or(lines.len());

    let content = lines[body_start..body_end].join("\n");
    if content.is_empty() {
        None
    } else {
        Some(content)
    }
}

/// Extract every requested section, keyed by the title as the caller wrote it
/// and kept in request order.
///
/// Titles are resolved independently. Missing sections and extraction faults
/// become placeholder strings instead of failing the whole batch.
pub fn extract_sections(full_docs: &str, titles: &[String]) -> IndexMap<String, String> {
    extract_sections_with(full_docs, titles, find_section_content)
}

fn extract_sections_with<F>(full_docs: &str, titles: &[String], finder: F) -> IndexMap<String, String>
where
    F: Fn(&str, &str) -> Option<String>,
{
    titles
        .iter()
        .map(|title| {
            let content = match resolve_with(full_docs, title, &finder) {
                Ok(content) => content,
                Err(err @ DocsError::SectionNotFound(_)) => {
                    tracing::debug!("{}", err);
                    err.to_string()
                }
                Err(err) => {
                    tracing::error!("{}", err);
                    err.to_string()
                }
            };
            (title.clone(), content)
        })
        .collect()
}

/// Resolve one requested title, isolating any fault raised while scanning.
fn resolve_with<F>(full_docs: &str, title: &str, finder: F) -> Result<String>
where
    F: Fn(&str, &str) -> Option<String>,
{
    match panic::catch_unwind(AssertUnwindSafe(|| finder(full_docs, title))) {
        Ok(Some(content)) => Ok(content),
        Ok(None) => Err(DocsError::SectionNotFound(title.to_string())),
        Err(payload) => Err(DocsError::Extraction {
            title: title.to_string(),
            reason: panic_reason(payload.as_ref()),
        }),
    }
}

/// Title declared on a front-matter `title:` line, if the line is one.
fn front_matter_title(line: &str) -> Option<&str> {
    let line = line.trim();
    let prefix = line.get(..TITLE_KEY.len())?;
    if prefix.eq_ignore_ascii_case(TITLE_KEY) {
        Some(line[TITLE_KEY.len()..].trim())
    } else {
        None
    }
}

/// A delimiter followed by another delimiter or a blank line.
fn is_section_boundary(lines: &[&str], i: usize) -> bool {
    if lines[i].trim() != DELIMITER {
        return false;
    }
    match lines.get(i + 1).map(|next| next.trim()) {
        Some(next) => next == DELIMITER || next.is_empty(),
        None => false,
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown fault".to_string()
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_DOCS: &str = "\
---
title: Installation
sidebar_position: 1
---
Run the installer.

Then restart.
---

---
title: Quickstart
---
Open the app.
---
---
title: Horizontal Rules
---
Above the rule.
---
Below the rule.
---

---
title: Empty
---
---

---
title: Last Section
---
Final words.
Really final.";

    fn titles(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_find_first_section() {
        let content = find_section_content(FULL_DOCS, "Installation").unwrap();
        assert_eq!(content, "Run the installer.\n\nThen restart.");
    }

    #[test]
    fn test_find_section_followed_by_double_delimiter() {
        let content = find_section_content(FULL_DOCS, "Quickstart").unwrap();
        assert_eq!(content, "Open the app.");
    }

    #[test]
    fn test_delimiter_followed_by_text_stays_in_body() {
        let content = find_section_content(FULL_DOCS, "Horizontal Rules").unwrap();
        assert_eq!(content, "Above the rule.\n---\nBelow the rule.");
    }

    #[test]
    fn test_rule_followed_by_blank_line_ends_section() {
        let docs = "---\ntitle: Rules\n---\nintro\n---\n\nafter a rule\n---\n\n";
        let content = find_section_content(docs, "Rules").unwrap();
        assert_eq!(content, "intro");
    }

    #[test]
    fn test_last_section_runs_to_end_of_document() {
        let content = find_section_content(FULL_DOCS, "Last Section").unwrap();
        assert_eq!(content, "Final words.\nReally final.");
    }

    #[test]
    fn test_trailing_delimiter_on_last_line_is_body() {
        let docs = "---\ntitle: Tail\n---\nbody\n---";
        let content = find_section_content(docs, "Tail").unwrap();
        assert_eq!(content, "body\n---");
    }

    #[test]
    fn test_title_match_is_case_insensitive() {
        let content = find_section_content(FULL_DOCS, "qUICKSTART").unwrap();
        assert_eq!(content, "Open the app.");

        let docs = "---\nTITLE:   Mixed Case  \n---\nbody";
        assert_eq!(find_section_content(docs, "mixed case").unwrap(), "body");
    }

    #[test]
    fn test_empty_body_is_not_found() {
        assert!(find_section_content(FULL_DOCS, "Empty").is_none());
    }

    #[test]
    fn test_unclosed_front_matter_is_not_found() {
        let docs = "---\ntitle: Broken\nsidebar_position: 2\n";
        assert!(find_section_content(docs, "Broken").is_none());
    }

    #[test]
    fn test_missing_section() {
        assert!(find_section_content(FULL_DOCS, "Nonexistent").is_none());
        let err = resolve_with(FULL_DOCS, "Nonexistent", find_section_content).unwrap_err();
        assert_eq!(err.kind(), "SectionNotFound");
    }

    #[test]
    fn test_body_lines_are_verbatim() {
        let docs = "---\ntitle: Code\n---\n```python\n    indented = True  \n```\n---\n\n";
        let content = find_section_content(docs, "Code").unwrap();
        assert_eq!(content, "```python\n    indented = True  \n```");
    }

    #[test]
    fn test_extract_sections_isolates_missing_titles() {
        let result = extract_sections(FULL_DOCS, &titles(&["Installation", "Nonexistent Section"]));
        assert_eq!(result.len(), 2);
        assert_eq!(result["Installation"], "Run the installer.\n\nThen restart.");
        assert_eq!(
            result["Nonexistent Section"],
            "Section 'Nonexistent Section' not found in documentation."
        );
    }

    #[test]
    fn test_extract_sections_keeps_request_order() {
        let result = extract_sections(FULL_DOCS, &titles(&["Quickstart", "Missing", "Installation"]));
        assert_eq!(
            result.keys().collect::<Vec<_>>(),
            vec!["Quickstart", "Missing", "Installation"]
        );
    }

    #[test]
    fn test_extract_sections_keeps_caller_casing_and_collapses_duplicates() {
        let result = extract_sections(FULL_DOCS, &titles(&["quickstart", "quickstart", "QUICKSTART"]));
        assert_eq!(result.len(), 2);
        assert_eq!(result["quickstart"], "Open the app.");
        assert_eq!(result["QUICKSTART"], "Open the app.");
    }

    #[test]
    fn test_extract_sections_only_returns_requested_body() {
        let result = extract_sections(FULL_DOCS, &titles(&["Installation"]));
        assert_eq!(result.len(), 1);
        assert!(!result["Installation"].contains("Open the app."));
    }

    #[test]
    fn test_extraction_fault_is_localized() {
        let finder = |docs: &str, title: &str| {
            if title == "Faulty" {
                panic!("scanner exploded");
            }
            find_section_content(docs, title)
        };

        let result = extract_sections_with(FULL_DOCS, &titles(&["Faulty", "Quickstart"]), finder);
        assert_eq!(
            result["Faulty"],
            "Error extracting section 'Faulty': scanner exploded"
        );
        assert_eq!(result["Quickstart"], "Open the app.");
    }

    #[test]
    fn test_extract_sections_is_deterministic() {
        let requested = titles(&["Installation", "Quickstart", "Missing"]);
        assert_eq!(
            extract_sections(FULL_DOCS, &requested),
            extract_sections(FULL_DOCS, &requested)
        );
    }
}
