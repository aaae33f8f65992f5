//! ATX heading segmentation.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static HEADING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(#{1,6})[ \t]+(\S.*)$").expect("valid heading regex (verified by tests)")
});

/// Text between one heading and the next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// ATX depth (1–6); `None` for the untitled fallback section
    pub heading_level: Option<u8>,
    pub title: String,
    pub content: String,
}

impl Section {
    /// The whole document as one section without a heading.
    pub fn untitled(content: &str) -> Self {
        Self {
            heading_level: None,
            title: String::new(),
            content: content.trim().to_string(),
        }
    }
}

/// Whether the text contains at least one ATX heading line.
pub fn has_headings(text: &str) -> bool {
    HEADING_REGEX.is_match(text)
}

/// Split text into heading-delimited sections.
///
/// A section runs from the end of its heading line to the start of the next
/// heading of any level. Headings shallower than `min_heading_level` are
/// dropped together with their content, and so are sections that are blank.
/// Text before the first heading belongs to no section.
pub fn split_by_headings(text: &str, min_heading_level: u8) -> Vec<Section> {
    let matches: Vec<_> = HEADING_REGEX.captures_iter(text).collect();

    matches
        .iter()
        .enumerate()
        .filter_map(|(idx, caps)| {
            let marks = caps.get(1)?;
            let title = caps.get(2)?;
            let line = caps.get(0)?;

            let level = u8::try_from(marks.as_str().len()).ok()?;
            if level < min_heading_level {
                return None;
            }

            let end = matches
                .get(idx + 1)
                .and_then(|next| next.get(0))
                .map_or(text.len(), |next| next.start());
            let content = text.get(line.end()..end)?.trim();
            if content.is_empty() {
                return None;
            }

            Some(Section {
                heading_level: Some(level),
                title: title.as_str().trim().to_string(),
                content: content.to_string(),
            })
        })
        .collect()
}

/// Sections a document is chunked as.
///
/// Like [`split_by_headings`], but text without any heading line becomes one
/// untitled section when `fallback_to_untitled` is set. Text whose headings
/// were all filtered out by level gets no fallback.
pub fn segment(text: &str, min_heading_level: u8, fallback_to_untitled: bool) -> Vec<Section> {
    if fallback_to_untitled && !text.trim().is_empty() && !has_headings(text) {
        return vec![Section::untitled(text)];
    }
    split_by_headings(text, min_heading_level)
}
