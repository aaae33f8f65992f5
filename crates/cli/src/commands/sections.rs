//! Sections command handler.

use anyhow::Context;
use clap::Args;
use docslice_chunker::chunk::{is_markdown_table, segment};
use docslice_chunker::{config::load_config, load_source, TokenEstimator};
use docslice_core::config::AppConfig;
use std::path::PathBuf;

/// List the sections detected in a document
#[derive(Args, Debug)]
pub struct SectionsCommand {
    /// Document to inspect
    pub path: PathBuf,

    /// Skip headings shallower than this level
    #[arg(long)]
    pub min_heading_level: Option<u8>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl SectionsCommand {
    pub fn execute(&self, config: &AppConfig) -> anyhow::Result<()> {
        tracing::info!("Executing sections command for {:?}", self.path);

        let chunker_config = load_config(&config.workspace)?;
        let input = load_source(&self.path)
            .with_context(|| format!("Failed to read {:?}", self.path))?;
        let level = self
            .min_heading_level
            .unwrap_or(chunker_config.min_heading_level);

        let sections = segment(&input.text, level, chunker_config.fallback_to_untitled);
        let estimator = chunker_config.estimator.build();

        if self.json {
            let output: Vec<serde_json::Value> = sections
                .iter()
                .map(|section| {
                    serde_json::json!({
                        "heading_level": section.heading_level,
                        "title": section.title,
                        "tokens": estimator.count_tokens(&section.content),
                        "table": is_markdown_table(&section.content),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        if sections.is_empty() {
            println!("No sections found in {}", self.path.display());
            return Ok(());
        }

        println!("{:<6} {:>7} {:<6} TITLE", "LEVEL", "TOKENS", "TABLE");
        for section in &sections {
            let level = section
                .heading_level
                .map_or_else(|| "-".to_string(), |l| l.to_string());
            let title = if section.title.is_empty() {
                "(untitled)"
            } else {
                section.title.as_str()
            };
            println!(
                "{:<6} {:>7} {:<6} {}",
                level,
                estimator.count_tokens(&section.content),
                if is_markdown_table(&section.content) { "yes" } else { "no" },
                title
            );
        }

        Ok(())
    }
}
