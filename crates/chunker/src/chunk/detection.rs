//! Table shape detection for pipe-delimited markdown tables.

/// Whether a trimmed line is a table separator such as `| --- | :-: |`.
///
/// Only `-`, `|`, `:` and whitespace are allowed, at least two characters.
pub fn is_separator_line(line: &str) -> bool {
    let line = line.trim();
    line.chars().count() >= 2
        && line
            .chars()
            .all(|c| matches!(c, '-' | '|' | ':') || c.is_whitespace())
}

fn non_empty_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Whether the block starts with a header row followed by a separator row.
pub fn is_markdown_table(text: &str) -> bool {
    let mut lines = non_empty_lines(text);
    match (lines.next(), lines.next()) {
        (Some(header), Some(separator)) => {
            header.contains('|') && separator.contains('|') && is_separator_line(separator)
        }
        _ => false,
    }
}

/// Whether the block looks like a truncated table: one or two pipe rows with
/// no separator and nothing else around them.
pub fn is_invalid_table_fragment(text: &str) -> bool {
    let lines: Vec<&str> = non_empty_lines(text).collect();

    if lines.is_empty() || lines.len() >= 3 {
        return false;
    }
    if !lines.iter().any(|line| line.contains('|')) {
        return false;
    }
    if lines.iter().any(|line| is_separator_line(line)) {
        return false;
    }

    lines
        .iter()
        .all(|line| line.contains('|') && !line.starts_with('#'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separator_line() {
        assert!(is_separator_line("| --- | --- |"));
        assert!(is_separator_line("|:---|---:|"));
        assert!(is_separator_line("- | -"));
        assert!(!is_separator_line("|"));
        assert!(!is_separator_line("| a | b |"));
        assert!(!is_separator_line(""));
    }

    #[test]
    fn test_minimal_table() {
        assert!(is_markdown_table("| A | B |\n| - | - |"));
        assert!(is_markdown_table("\n\n  | A | B |\n\n| --- | --- |\n| 1 | 2 |\n"));
    }

    #[test]
    fn test_prose_with_pipe_is_not_table() {
        assert!(!is_markdown_table("Choose red | blue for the theme."));
        assert!(!is_markdown_table("Line one | two\nLine three"));
    }

    #[test]
    fn test_header_without_separator_is_not_table() {
        assert!(!is_markdown_table("| A | B |\n| 1 | 2 |"));
        assert!(!is_markdown_table("Intro\n| A | B |\n| - | - |"));
    }

    #[test]
    fn test_invalid_fragment() {
        assert!(is_invalid_table_fragment("| 4 | 5 |"));
        assert!(is_invalid_table_fragment("| 4 | 5 |\n| 6 | 7 |"));
    }

    #[test]
    fn test_not_a_fragment() {
        // Has a separator
        assert!(!is_invalid_table_fragment("| A | B |\n| - | - |"));
        // Three rows
        assert!(!is_invalid_table_fragment("| 1 |\n| 2 |\n| 3 |"));
        // Mixed with prose
        assert!(!is_invalid_table_fragment("Totals below.\n| 4 | 5 |"));
        // Heading line
        assert!(!is_invalid_table_fragment("# A | B"));
        // No pipes
        assert!(!is_invalid_table_fragment("Just words."));
        assert!(!is_invalid_table_fragment(""));
    }
}
