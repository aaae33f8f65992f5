//! Heading-aware document chunking.
//!
//! Turns long heading-structured text into ordered, token-bounded chunks that
//! carry their filename, section title and heading level, ready for an
//! embedding or retrieval pipeline.

pub mod batch;
pub mod chunk;
pub mod config;
pub mod source;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use batch::chunk_documents;
pub use chunk::{Chunk, ChunkType, Chunker, Section, TableRow, TokenEstimator};
pub use config::{ChunkerConfig, EstimatorConfig, FormattingRules};
pub use source::{collect_sources, load_source, DEFAULT_EXTENSIONS};
pub use types::{ChunkerInput, ChunkerOutput, DocumentMetadata};

use docslice_core::AppResult;

/// Chunk a single document with a fresh chunker.
pub fn chunk_text(input: &ChunkerInput, config: &ChunkerConfig) -> AppResult<ChunkerOutput> {
    let mut chunker = Chunker::new(config.clone())?;
    Ok(chunker.process(input))
}
