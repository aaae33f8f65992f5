//! Request and response shapes of the chunker service.

use serde::{Deserialize, Serialize};

use crate::chunk::Chunk;

/// A document to chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkerInput {
    pub text: String,
    #[serde(default)]
    pub metadata: DocumentMetadata,
}

impl ChunkerInput {
    pub fn new(text: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: DocumentMetadata {
                filename: filename.into(),
                min_heading_level: None,
            },
        }
    }
}

/// Provenance and per-document overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    #[serde(default = "default_filename")]
    pub filename: String,

    /// Falls back to the chunker's configured level when absent
    #[serde(default)]
    pub min_heading_level: Option<u8>,
}

fn default_filename() -> String {
    "unknown".to_string()
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        Self {
            filename: default_filename(),
            min_heading_level: None,
        }
    }
}

/// Chunks of one document, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkerOutput {
    pub chunks: Vec<Chunk>,
}
