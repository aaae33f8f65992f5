//! Bullet list to table reformatting.
//!
//! Runs of `key: value` bullets read poorly once packed into a chunk, so they
//! are laid out as two-column tables. Only the layout changes: every bullet
//! becomes a row and every other line is kept as-is.

use crate::config::FormattingRules;

/// A bullet split into its field and value (empty when there is no `:`).
#[derive(Debug, Clone, PartialEq, Eq)]
struct Field<'a> {
    key: &'a str,
    value: &'a str,
}

fn bullet_text(line: &str) -> Option<&str> {
    let line = line.trim();
    line.strip_prefix("- ")
        .or_else(|| line.strip_prefix("• "))
        .map(str::trim)
}

fn split_field(item: &str) -> Field<'_> {
    match item.split_once(':') {
        Some((key, value)) => Field {
            key: key.trim(),
            value: value.trim(),
        },
        None => Field {
            key: item,
            value: "",
        },
    }
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|")
}

fn push_table(out: &mut Vec<String>, fields: &[Field<'_>], rules: &FormattingRules) {
    out.push(format!(
        "| {} | {} |",
        escape_cell(&rules.field_header),
        escape_cell(&rules.value_header)
    ));
    out.push("| --- | --- |".to_string());
    for field in fields {
        out.push(format!(
            "| {} | {} |",
            escape_cell(field.key),
            escape_cell(field.value)
        ));
    }
}

/// Reformat bullet-heavy content into tables according to `rules`.
///
/// With at least `rules.min_bullets` bullets, content mentioning one of the
/// address keywords is split into an address table and a table of remaining
/// fields. Otherwise, if enough bullets carry a `:`, each run of bullets is
/// replaced by a table in place. Anything else is returned unchanged.
pub fn enhance_content_formatting(content: &str, rules: &FormattingRules) -> String {
    if !rules.enabled {
        return content.to_string();
    }

    let lines: Vec<&str> = content.trim().lines().collect();
    let bullets: Vec<&str> = lines.iter().filter_map(|line| bullet_text(line)).collect();

    if bullets.len() < rules.min_bullets.max(1) {
        return content.to_string();
    }

    let lowered = content.to_lowercase();
    let mentions_address = rules
        .address_keywords
        .iter()
        .any(|keyword| !keyword.is_empty() && lowered.contains(&keyword.to_lowercase()));

    if mentions_address {
        return format_address_info(&lines, rules);
    }

    let keyed = bullets.iter().filter(|item| item.contains(':')).count();
    if keyed >= rules.min_bullets.max(1) {
        return format_bullet_runs(&lines, rules);
    }

    content.to_string()
}

/// Group all bullets into an address table and an "other details" table.
///
/// Lines before the first bullet stay on top, other non-bullet lines follow
/// the tables.
fn format_address_info(lines: &[&str], rules: &FormattingRules) -> String {
    let mut leading = Vec::new();
    let mut trailing = Vec::new();
    let mut address = Vec::new();
    let mut other = Vec::new();
    let mut seen_bullet = false;

    for line in lines {
        match bullet_text(line) {
            Some(item) => {
                seen_bullet = true;
                let field = split_field(item);
                let is_address = rules
                    .address_fields
                    .iter()
                    .any(|name| !name.is_empty() && field.key.contains(name.as_str()));
                if is_address {
                    address.push(field);
                } else {
                    other.push(field);
                }
            }
            None if seen_bullet => trailing.push(line.trim_end().to_string()),
            None => leading.push(line.trim_end().to_string()),
        }
    }

    let mut out = leading;
    if !address.is_empty() {
        out.push(rules.address_title.clone());
        push_table(&mut out, &address, rules);
        out.push(String::new());
    }
    if !other.is_empty() {
        out.push(rules.extra_title.clone());
        push_table(&mut out, &other, rules);
    }
    out.extend(trailing);

    out.join("\n").trim().to_string()
}

/// Replace each run of consecutive bullets with a table, in place.
fn format_bullet_runs(lines: &[&str], rules: &FormattingRules) -> String {
    let mut out = Vec::new();
    let mut run: Vec<Field<'_>> = Vec::new();

    for line in lines {
        match bullet_text(line) {
            Some(item) => run.push(split_field(item)),
            None => {
                if !run.is_empty() {
                    push_table(&mut out, &run, rules);
                    run.clear();
                }
                out.push(line.trim_end().to_string());
            }
        }
    }
    if !run.is_empty() {
        push_table(&mut out, &run, rules);
    }

    out.join("\n")
}
