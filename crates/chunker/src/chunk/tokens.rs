//! Token estimation.
//!
//! Chunk budgets are expressed in tokens, but the engine only needs a cheap,
//! deterministic proxy. The default counts whitespace-separated words and
//! scales them by 1.3, rounding up. Anything implementing [`TokenEstimator`]
//! (including plain closures) can stand in for a real tokenizer.

/// Estimates the token length of a piece of text.
pub trait TokenEstimator: Send + Sync {
    /// Estimated number of tokens in `text`.
    fn count_tokens(&self, text: &str) -> usize;
}

impl<F> TokenEstimator for F
where
    F: Fn(&str) -> usize + Send + Sync,
{
    fn count_tokens(&self, text: &str) -> usize {
        self(text)
    }
}

/// Word count scaled by a rational ratio, rounded up.
///
/// The ratio is kept as integers so that `ceil(10 * 1.3)` is 13 and not 14.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordRatioEstimator {
    tokens: usize,
    per_words: usize,
}

impl WordRatioEstimator {
    /// `tokens` tokens for every `per_words` words. A zero `per_words` is
    /// treated as one.
    pub fn new(tokens: usize, per_words: usize) -> Self {
        Self {
            tokens,
            per_words: per_words.max(1),
        }
    }
}

impl Default for WordRatioEstimator {
    fn default() -> Self {
        Self::new(13, 10)
    }
}

impl TokenEstimator for WordRatioEstimator {
    fn count_tokens(&self, text: &str) -> usize {
        let words = text.split_whitespace().count();
        words.saturating_mul(self.tokens).div_ceil(self.per_words)
    }
}

/// Estimate tokens with the default 1.3 tokens-per-word ratio.
pub fn count_tokens(text: &str) -> usize {
    WordRatioEstimator::default().count_tokens(text)
}
