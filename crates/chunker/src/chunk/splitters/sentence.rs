//! Token-bounded sentence windows with overlap and duplicate suppression.

use super::{ChunkDraft, SectionSplitter, SplitContext};
use crate::chunk::detection::{is_invalid_table_fragment, is_markdown_table};
use crate::chunk::formatting::enhance_content_formatting;
use crate::chunk::sentences::{join_sentences, split_sentences, Sentence};

/// Packs sentences greedily into windows of at most `max_tokens`.
///
/// Every iteration moves the cursor forward by at least one sentence, and a
/// sentence that alone exceeds the budget still forms a window of its own, so
/// the loop terminates for any budget.
pub struct SentenceWindowSplitter;

impl SectionSplitter for SentenceWindowSplitter {
    fn split(&self, text: &str, ctx: &mut SplitContext<'_>) -> Vec<ChunkDraft> {
        let sentences = split_sentences(text);
        let costs: Vec<usize> = sentences
            .iter()
            .map(|sentence| ctx.estimator.count_tokens(&sentence.text))
            .collect();
        let overlap = ctx.sentence_overlap;

        let mut drafts = Vec::new();
        let mut previous_tail: &[Sentence] = &[];
        let mut cursor = 0;

        while cursor < sentences.len() {
            let end = window_end(&costs, cursor, ctx.max_tokens);
            let window = &sentences[cursor..end];

            // The start of this window may repeat the end of the last one
            let repeated = repeated_prefix_len(previous_tail, window, overlap);
            let selected = &window[repeated..];
            if selected.is_empty() {
                cursor += 1;
                continue;
            }

            let joined = join_sentences(selected);
            let formatted = enhance_content_formatting(&joined, ctx.formatting);
            // Table layout adds pipes and header rows; keep the plain text
            // when that pushes a multi-sentence window over budget
            let content = if selected.len() > 1
                && formatted != joined
                && ctx.estimator.count_tokens(&formatted) > ctx.max_tokens
            {
                joined
            } else {
                formatted
            };

            if is_invalid_table_fragment(&content) {
                tracing::debug!(
                    "Dropping table fragment at sentences {}..{}",
                    cursor,
                    end
                );
                cursor = end;
                continue;
            }

            if !ctx.seen.insert(&content) {
                tracing::trace!("Skipping duplicate window at sentences {}..{}", cursor, end);
                cursor = end.saturating_sub(overlap).max(cursor + 1);
                continue;
            }

            let draft = if is_markdown_table(&content) {
                ChunkDraft::table(content)
            } else {
                ChunkDraft::text(content)
            };
            drafts.push(draft);

            previous_tail = &selected[selected.len().saturating_sub(overlap)..];
            cursor = if end < sentences.len() {
                end.saturating_sub(overlap).max(cursor + 1)
            } else {
                end
            };
        }

        tracing::debug!(
            "Sentence splitter packed {} sentences into {} chunks",
            sentences.len(),
            drafts.len()
        );

        drafts
    }
}

/// End (exclusive) of the window starting at `start`.
///
/// Stops before the first sentence that would overflow `max_tokens`, but
/// always takes at least one sentence.
fn window_end(costs: &[usize], start: usize, max_tokens: usize) -> usize {
    let mut used = 0usize;
    let mut end = start;

    for &cost in costs.iter().skip(start) {
        if end > start && used.saturating_add(cost) > max_tokens {
            break;
        }
        used = used.saturating_add(cost);
        end += 1;
    }

    end
}

/// Length of the longest prefix of `window` (at most `overlap` sentences)
/// equal to a suffix of `previous`.
fn repeated_prefix_len(previous: &[Sentence], window: &[Sentence], overlap: usize) -> usize {
    let limit = overlap.min(previous.len()).min(window.len());

    (1..=limit)
        .rev()
        .find(|&len| {
            let tail = &previous[previous.len() - len..];
            tail.iter()
                .zip(&window[..len])
                .all(|(a, b)| a.text.trim() == b.text.trim())
        })
        .unwrap_or(0)
}
