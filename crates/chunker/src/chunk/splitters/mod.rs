//! Section splitters.
//!
//! A splitter turns the body of one section into chunk drafts. Ids, positions,
//! token counts and table structure are stamped on later by the
//! [`Chunker`](crate::Chunker), so splitters never touch the id counter.

mod sentence;
mod table;

pub use sentence::SentenceWindowSplitter;
pub use table::TableSplitter;

use super::fingerprint::SeenContent;
use super::tokens::TokenEstimator;
use super::ChunkType;
use crate::config::FormattingRules;

/// Content and kind of a chunk that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkDraft {
    pub content: String,
    pub kind: ChunkType,
}

impl ChunkDraft {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: ChunkType::Text,
        }
    }

    pub fn table(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: ChunkType::Table,
        }
    }
}

/// Budget and per-section state handed to a splitter.
pub struct SplitContext<'a> {
    pub max_tokens: usize,
    pub sentence_overlap: usize,
    pub formatting: &'a FormattingRules,
    pub estimator: &'a dyn TokenEstimator,
    /// Windows already emitted in this section
    pub seen: &'a mut SeenContent,
}

/// Trait for section splitters.
pub trait SectionSplitter {
    /// Split one section body into drafts, in emission order.
    fn split(&self, text: &str, ctx: &mut SplitContext<'_>) -> Vec<ChunkDraft>;
}
