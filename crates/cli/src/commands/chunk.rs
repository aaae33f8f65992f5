//! Chunk command handler.
//!
//! Reads documents, chunks them in parallel and writes or prints the result.

use anyhow::{bail, Context};
use clap::Args;
use docslice_chunker::{
    chunk_documents, collect_sources, config::load_config, load_source, ChunkerConfig,
    ChunkerInput, ChunkerOutput, DEFAULT_EXTENSIONS,
};
use docslice_core::config::AppConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Chunk documents into bounded, provenance-tagged pieces
#[derive(Args, Debug)]
pub struct ChunkCommand {
    /// Files or directories to chunk
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// File extensions picked up from directories
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()))]
    pub ext: Vec<String>,

    /// Token budget per chunk
    #[arg(long)]
    pub max_tokens: Option<usize>,

    /// Sentences of overlap between consecutive chunks
    #[arg(long)]
    pub overlap: Option<usize>,

    /// Skip headings shallower than this level
    #[arg(long)]
    pub min_heading_level: Option<u8>,

    /// Do not chunk heading-less documents as one untitled section
    #[arg(long)]
    pub no_fallback: bool,

    /// Directory to write chunks_<filename>.json files into
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ChunkCommand {
    pub fn execute(&self, config: &AppConfig) -> anyhow::Result<()> {
        tracing::info!("Executing chunk command for {} paths", self.paths.len());

        let chunker_config = self.apply_overrides(load_config(&config.workspace)?);
        tracing::debug!("Chunker config: {:?}", chunker_config);

        let files = collect_sources(&self.paths, &self.ext);
        if files.is_empty() {
            bail!("No documents found in {:?}", self.paths);
        }

        let mut inputs: Vec<ChunkerInput> = Vec::with_capacity(files.len());
        let mut sources: Vec<&Path> = Vec::with_capacity(files.len());
        for file in &files {
            match load_source(file) {
                Ok(input) => {
                    inputs.push(input);
                    sources.push(file);
                }
                Err(e) => tracing::warn!("Skipping {:?}: {}", file, e),
            }
        }

        let outputs = chunk_documents(&inputs, &chunker_config)?;

        if let Some(dir) = &self.out {
            let written = write_outputs(dir, &inputs, &outputs)?;
            tracing::info!("Wrote {} chunk files to {:?}", written.len(), dir);
        }

        if self.json {
            let documents: Vec<serde_json::Value> = sources
                .iter()
                .zip(&outputs)
                .map(|(path, output)| {
                    serde_json::json!({
                        "path": path.display().to_string(),
                        "chunks": output.chunks,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&documents)?);
        } else {
            let mut total_chunks = 0;
            let mut total_tokens = 0;
            for (path, output) in sources.iter().zip(&outputs) {
                let tokens: usize = output.chunks.iter().map(|c| c.tokens()).sum();
                println!(
                    "{}: {} chunks, {} tokens",
                    path.display(),
                    output.chunks.len(),
                    tokens
                );
                total_chunks += output.chunks.len();
                total_tokens += tokens;
            }
            println!(
                "Chunked {} documents into {} chunks ({} tokens)",
                outputs.len(),
                total_chunks,
                total_tokens
            );
        }

        Ok(())
    }

    fn apply_overrides(&self, mut chunker_config: ChunkerConfig) -> ChunkerConfig {
        if let Some(max_tokens) = self.max_tokens {
            chunker_config.max_tokens = max_tokens;
        }
        if let Some(overlap) = self.overlap {
            chunker_config.sentence_overlap = overlap;
        }
        if let Some(level) = self.min_heading_level {
            chunker_config.min_heading_level = level;
        }
        if self.no_fallback {
            chunker_config.fallback_to_untitled = false;
        }
        chunker_config
    }
}

/// Write one `chunks_<filename>.json` per document.
fn write_outputs(
    dir: &Path,
    inputs: &[ChunkerInput],
    outputs: &[ChunkerOutput],
) -> anyhow::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;

    let mut written = Vec::with_capacity(outputs.len());
    for (input, output) in inputs.iter().zip(outputs) {
        let path = dir.join(format!("chunks_{}.json", input.metadata.filename));
        let json = serde_json::to_string_pretty(&output.chunks)?;
        fs::write(&path, json).with_context(|| format!("Failed to write {:?}", path))?;
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        cmd: ChunkCommand,
    }

    fn parse(args: &[&str]) -> ChunkCommand {
        let mut argv = vec!["docslice"];
        argv.extend_from_slice(args);
        TestCli::parse_from(argv).cmd
    }

    #[test]
    fn test_default_args() {
        let cmd = parse(&["docs"]);
        assert_eq!(cmd.ext, vec!["md", "txt"]);
        assert!(cmd.max_tokens.is_none());
        assert!(!cmd.no_fallback);
    }

    #[test]
    fn test_overrides_applied() {
        let cmd = parse(&[
            "docs",
            "--ext",
            "md,rst",
            "--max-tokens",
            "64",
            "--overlap",
            "0",
            "--min-heading-level",
            "2",
            "--no-fallback",
        ]);
        assert_eq!(cmd.ext, vec!["md", "rst"]);

        let config = cmd.apply_overrides(ChunkerConfig::default());
        assert_eq!(config.max_tokens, 64);
        assert_eq!(config.sentence_overlap, 0);
        assert_eq!(config.min_heading_level, 2);
        assert!(!config.fallback_to_untitled);
    }

    #[test]
    fn test_write_outputs() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");
        let inputs = vec![ChunkerInput::new("# A\nSome text.", "a.md")];
        let outputs = chunk_documents(&inputs, &ChunkerConfig::default()).unwrap();

        let written = write_outputs(&out, &inputs, &outputs).unwrap();
        assert_eq!(written, vec![out.join("chunks_a.md.json")]);

        let saved: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&written[0]).unwrap()).unwrap();
        assert_eq!(saved[0]["content"], "Some text.");
        assert_eq!(saved[0]["section_title"], "A");
    }
}
