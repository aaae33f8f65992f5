//! End-to-end chunking scenarios.

use crate::chunk::{is_markdown_table, Chunker};
use crate::config::ChunkerConfig;
use crate::types::ChunkerInput;
use crate::{chunk_text, ChunkType};

fn config(max_tokens: usize, sentence_overlap: usize) -> ChunkerConfig {
    ChunkerConfig {
        max_tokens,
        sentence_overlap,
        ..ChunkerConfig::default()
    }
}

#[test]
fn test_heading_document() {
    let input = ChunkerInput::new(
        "# Intro\nHello world. This is a test.\n## Details\nMore text here.",
        "intro.md",
    );
    let output = chunk_text(&input, &config(10_000, 2)).unwrap();

    let summary: Vec<(&str, Option<u8>, &str)> = output
        .chunks
        .iter()
        .map(|c| (c.section_title(), c.heading_level(), c.content()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Intro", Some(1), "Hello world. This is a test."),
            ("Details", Some(2), "More text here."),
        ]
    );
}

#[test]
fn test_table_round_trip() {
    let input = ChunkerInput::new("# T\n| A | B |\n| --- | --- |\n| 1 | 2 |", "t.md");
    let output = chunk_text(&input, &ChunkerConfig::default()).unwrap();

    assert_eq!(output.chunks.len(), 1);
    let chunk = &output.chunks[0];
    assert_eq!(chunk.chunk_type(), ChunkType::Table);

    let json = serde_json::to_value(chunk.content_json()).unwrap();
    assert_eq!(json, serde_json::json!([{"A": "1", "B": "2"}]));
}

#[test]
fn test_table_detection() {
    assert!(is_markdown_table("| A | B |\n| - | - |"));
    assert!(!is_markdown_table("Prices are high | low this season."));
}

#[test]
fn test_thousand_row_table_split() {
    let header = "| Id | Value |\n| --- | --- |";
    let rows: Vec<String> = (0..1000).map(|i| format!("| {} | value {} |", i, i)).collect();
    let text = format!("# Big\n{}\n{}", header, rows.join("\n"));

    let output = chunk_text(&ChunkerInput::new(text, "big.md"), &config(200, 2)).unwrap();
    let chunks = output.chunks;
    assert!(chunks.len() > 1);

    let mut seen_rows = Vec::new();
    for chunk in &chunks {
        assert_eq!(chunk.chunk_type(), ChunkType::Table);
        assert!(chunk.content().starts_with(header));
        assert!(chunk.tokens() <= 200);

        let data: Vec<&str> = chunk.content().lines().skip(2).collect();
        assert_eq!(chunk.content_json().map(<[_]>::len), Some(data.len()));
        seen_rows.extend(data.into_iter().map(str::to_string));
    }
    assert_eq!(seen_rows, rows);
}

#[test]
fn test_repeated_paragraph_emitted_once() {
    let text = "# Notes\nAlpha beta gamma.\n\nAlpha beta gamma.";

    for overlap in [0, 2] {
        let output = chunk_text(&ChunkerInput::new(text, "n.md"), &config(4, overlap)).unwrap();
        let contents: Vec<&str> = output.chunks.iter().map(|c| c.content()).collect();
        assert_eq!(contents, vec!["Alpha beta gamma."], "overlap {}", overlap);
    }
}

#[test]
fn test_prose_after_large_table_kept() {
    let rows: Vec<String> = (0..40).map(|i| format!("| {} | row {} |", i, i)).collect();
    let text = format!(
        "# Mixed\n| N | Label |\n| --- | --- |\n{}\nTotals are computed nightly.",
        rows.join("\n")
    );

    let output = chunk_text(&ChunkerInput::new(text, "m.md"), &config(50, 2)).unwrap();
    let last = output.chunks.last().unwrap();
    assert_eq!(last.chunk_type(), ChunkType::Text);
    assert_eq!(last.content(), "Totals are computed nightly.");

    let positions: Vec<u32> = output.chunks.iter().map(|c| c.position()).collect();
    let expected: Vec<u32> = (0..output.chunks.len() as u32).collect();
    assert_eq!(positions, expected);
}

#[test]
fn test_address_bullets_become_tables() {
    let text = "# Liên hệ\nĐịa chỉ văn phòng\n- Số nhà/Đường: 12 Lê Lợi\n- Phường/Xã: Bến Nghé\n- Quận/Huyện: Quận 1\n- Điện thoại: 0909";
    let output = chunk_text(&ChunkerInput::new(text, "vn.md"), &ChunkerConfig::default()).unwrap();

    assert_eq!(output.chunks.len(), 1);
    let content = output.chunks[0].content();
    assert!(content.contains("**Địa chỉ:**"));
    assert!(content.contains("| Phường/Xã | Bến Nghé |"));
    assert!(content.contains("**Thông tin bổ sung:**"));
    assert!(content.contains("| Điện thoại | 0909 |"));
}

#[test]
fn test_ids_span_documents_on_one_instance() {
    let mut chunker = Chunker::new(config(3, 0)).unwrap();

    let mut ids = Vec::new();
    for name in ["a.md", "b.md", "c.md"] {
        let input = ChunkerInput::new("# H\nOne two. Three four.\n# K\nFive six.", name);
        ids.extend(chunker.process(&input).chunks.iter().map(|c| c.id()));
    }

    let expected: Vec<u64> = (0..ids.len() as u64).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_output_json_shape() {
    let input = ChunkerInput::new("# Intro\nHello there.", "intro.md");
    let output = chunk_text(&input, &ChunkerConfig::default()).unwrap();

    let value = serde_json::to_value(&output).unwrap();
    let chunk = &value["chunks"][0];
    assert_eq!(chunk["type"], "text");
    assert_eq!(chunk["section_title"], "Intro");
    assert_eq!(chunk["heading_level"], 1);
    assert!(chunk["content_json"].is_null());
    assert_eq!(chunk["tokens"], 3);
}
