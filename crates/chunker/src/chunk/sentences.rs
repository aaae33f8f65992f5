//! Sentence segmentation on Unicode (UAX #29) sentence boundaries.

use unicode_segmentation::UnicodeSegmentation;

/// A trimmed sentence and whether a line break followed it in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub text: String,
    pub ends_line: bool,
}

/// Split text into non-empty, trimmed sentences.
///
/// Every line break is a sentence boundary, so bullet items and table rows
/// come out as separate sentences and can be put back on their own lines by
/// [`join_sentences`].
pub fn split_sentences(text: &str) -> Vec<Sentence> {
    let mut sentences: Vec<Sentence> = Vec::new();

    for piece in text.split_sentence_bounds() {
        let ends_line = piece.ends_with('\n') || piece.ends_with('\r');
        let trimmed = piece.trim();

        if trimmed.is_empty() {
            // Blank line: it still terminates whatever came before it
            if ends_line {
                if let Some(last) = sentences.last_mut() {
                    last.ends_line = true;
                }
            }
            continue;
        }

        sentences.push(Sentence {
            text: trimmed.to_string(),
            ends_line,
        });
    }

    sentences
}

/// Rejoin sentences, restoring line breaks and using single spaces elsewhere.
pub fn join_sentences<'a, I>(sentences: I) -> String
where
    I: IntoIterator<Item = &'a Sentence>,
{
    let mut out = String::new();
    let mut pending_newline = false;

    for sentence in sentences {
        if !out.is_empty() {
            out.push(if pending_newline { '\n' } else { ' ' });
        }
        out.push_str(&sentence.text);
        pending_newline = sentence.ends_line;
    }

    out
}
