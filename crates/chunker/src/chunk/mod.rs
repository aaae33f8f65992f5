//! Heading-aware chunking of long documents.
//!
//! This module:
//! - Splits text into sections on ATX headings
//! - Sends table-shaped sections to the table splitter and everything else
//!   to the sentence window splitter
//! - Stamps each draft with a monotonically increasing id and provenance

mod detection;
mod fingerprint;
mod formatting;
mod headings;
mod pipeline;
mod sentences;
pub mod splitters;
mod table;
pub mod tokens;

pub use detection::{is_invalid_table_fragment, is_markdown_table, is_separator_line};
pub use fingerprint::{content_fingerprint, SeenContent};
pub use formatting::enhance_content_formatting;
pub use headings::{has_headings, segment, split_by_headings, Section};
pub use pipeline::Chunker;
pub use sentences::{join_sentences, split_sentences, Sentence};
pub use table::{leading_table_block, parse_markdown_table, split_cells, split_table_rows};
pub use tokens::{count_tokens, TokenEstimator, WordRatioEstimator};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One table row keyed by column header, in header order.
pub type TableRow = IndexMap<String, String>;

/// Kind of content a chunk holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkType {
    Text,
    Table,
}

impl ChunkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkType::Text => "text",
            ChunkType::Table => "table",
        }
    }
}

/// A bounded, provenance-tagged piece of a document.
///
/// Chunks are only built by a [`Chunker`] and are read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    id: u64,
    content: String,
    filename: String,
    section_title: String,
    #[serde(rename = "type")]
    chunk_type: ChunkType,
    position: u32,
    tokens: usize,
    content_json: Option<Vec<TableRow>>,
    heading_level: Option<u8>,
}

/// Where a chunk came from.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Provenance<'a> {
    pub filename: &'a str,
    pub section_title: &'a str,
    pub heading_level: Option<u8>,
}

impl Chunk {
    /// Build a chunk; `None` if the content is blank.
    pub(crate) fn new(
        id: u64,
        position: u32,
        content: String,
        chunk_type: ChunkType,
        tokens: usize,
        provenance: Provenance<'_>,
    ) -> Option<Self> {
        if content.trim().is_empty() {
            return None;
        }

        let content_json = match chunk_type {
            ChunkType::Table => parse_markdown_table(&content),
            ChunkType::Text => None,
        };

        Some(Self {
            id,
            content,
            filename: provenance.filename.to_string(),
            section_title: provenance.section_title.to_string(),
            chunk_type,
            position,
            tokens,
            content_json,
            heading_level: provenance.heading_level,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn section_title(&self) -> &str {
        &self.section_title
    }

    pub fn chunk_type(&self) -> ChunkType {
        self.chunk_type
    }

    /// Index within the owning section's emission order.
    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn tokens(&self) -> usize {
        self.tokens
    }

    /// Structured rows, for tables whose rows line up with the header.
    pub fn content_json(&self) -> Option<&[TableRow]> {
        self.content_json.as_deref()
    }

    pub fn heading_level(&self) -> Option<u8> {
        self.heading_level
    }
}
