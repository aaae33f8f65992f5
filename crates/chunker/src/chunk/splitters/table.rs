//! Table splitter that repeats the header in every piece.

use super::{ChunkDraft, SectionSplitter, SentenceWindowSplitter, SplitContext};
use crate::chunk::table::{leading_table_block, split_table_rows};

/// Splits a table-shaped section into header-repeating row groups.
///
/// A table within budget stays whole. Otherwise the leading table block is
/// split by rows and any text after it goes through the sentence splitter.
pub struct TableSplitter;

impl SectionSplitter for TableSplitter {
    fn split(&self, text: &str, ctx: &mut SplitContext<'_>) -> Vec<ChunkDraft> {
        let content = text.trim();
        if content.is_empty() {
            return Vec::new();
        }

        let total_tokens = ctx.estimator.count_tokens(content);
        if total_tokens <= ctx.max_tokens {
            return vec![ChunkDraft::table(content)];
        }

        let (block, rest) = leading_table_block(content);
        let pieces = split_table_rows(&block, ctx.max_tokens, ctx.estimator);

        tracing::debug!(
            "Table of {} tokens ({} lines) split into {} pieces",
            total_tokens,
            block.len(),
            pieces.len()
        );

        let mut drafts: Vec<ChunkDraft> = pieces.into_iter().map(ChunkDraft::table).collect();
        if !rest.is_empty() {
            drafts.extend(SentenceWindowSplitter.split(&rest, ctx));
        }

        drafts
    }
}
