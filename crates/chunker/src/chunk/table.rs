//! Pipe table parsing and row splitting.

use super::detection::is_separator_line;
use super::tokens::TokenEstimator;
use super::TableRow;

/// Split a table row into trimmed cells.
///
/// One leading and one trailing pipe are optional; `\|` is an escaped pipe
/// inside a cell. Empty interior cells are kept so columns stay aligned.
pub fn split_cells(row: &str) -> Vec<String> {
    let row = row.trim();
    let row = row.strip_prefix('|').unwrap_or(row);
    let row = match row.strip_suffix('|') {
        Some(rest) if !rest.ends_with('\\') => rest,
        _ => row,
    };

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = row.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                current.push('|');
                chars.next();
            }
            '|' => cells.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    cells.push(current);

    cells.into_iter().map(|cell| cell.trim().to_string()).collect()
}

/// Parse a pipe table into header→cell records.
///
/// Rows whose cell count differs from the header's are left out. Returns
/// `None` when there is no header, separator, and at least one aligned row.
pub fn parse_markdown_table(markdown: &str) -> Option<Vec<TableRow>> {
    let table_lines: Vec<&str> = markdown
        .lines()
        .map(str::trim)
        .filter(|line| line.contains('|'))
        .collect();

    let (header, rows) = match table_lines.as_slice() {
        [header, _separator, rows @ ..] if !rows.is_empty() => (header, rows),
        _ => return None,
    };

    let headers = split_cells(header);
    let records: Vec<TableRow> = rows
        .iter()
        .filter(|row| !is_separator_line(row))
        .map(|row| split_cells(row))
        .filter(|cells| cells.len() == headers.len())
        .map(|cells| headers.iter().cloned().zip(cells).collect())
        .collect();

    if records.is_empty() {
        None
    } else {
        Some(records)
    }
}

/// Separate the leading run of pipe rows from whatever text follows it.
///
/// Blank lines inside the run are skipped; the run ends at the first
/// non-blank line without a pipe.
pub fn leading_table_block(text: &str) -> (Vec<&str>, String) {
    let mut lines = text.lines();

    let mut block = Vec::new();
    let mut rest: Vec<&str> = Vec::new();
    for line in lines.by_ref() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.contains('|') {
            block.push(trimmed);
        } else {
            rest.push(line);
            break;
        }
    }
    rest.extend(lines);

    (block, rest.join("\n").trim().to_string())
}

/// Split table rows into pieces that each repeat the header and separator.
///
/// Rows are added greedily while the piece stays within `max_tokens`; every
/// piece carries at least one data row even if that row alone is too large.
pub fn split_table_rows(
    table_lines: &[&str],
    max_tokens: usize,
    estimator: &dyn TokenEstimator,
) -> Vec<String> {
    let (header, separator, rows) = match table_lines {
        [header, separator, rows @ ..] if !rows.is_empty() => (*header, *separator, rows),
        _ => return vec![table_lines.join("\n")],
    };

    let header_tokens = estimator.count_tokens(&format!("{}\n{}", header, separator));
    let mut pieces = Vec::new();
    let mut current: Vec<&str> = vec![header, separator];
    let mut token_count = header_tokens;

    for &row in rows {
        let row_tokens = estimator.count_tokens(row);
        if token_count + row_tokens > max_tokens && current.len() > 2 {
            pieces.push(current.join("\n"));
            current = vec![header, separator];
            token_count = header_tokens;
        }
        current.push(row);
        token_count += row_tokens;
    }

    if current.len() > 2 {
        pieces.push(current.join("\n"));
    }

    pieces
}
