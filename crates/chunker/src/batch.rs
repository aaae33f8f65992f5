//! Parallel chunking of many documents.

use rayon::prelude::*;

use crate::chunk::Chunker;
use crate::config::ChunkerConfig;
use crate::types::{ChunkerInput, ChunkerOutput};
use docslice_core::AppResult;

/// Chunk every input on the rayon pool, one fresh [`Chunker`] per document.
///
/// Ids therefore restart at zero for each document. Output order matches
/// input order.
pub fn chunk_documents(
    inputs: &[ChunkerInput],
    config: &ChunkerConfig,
) -> AppResult<Vec<ChunkerOutput>> {
    config.validate()?;

    tracing::debug!("Chunking {} documents in parallel", inputs.len());

    inputs
        .par_iter()
        .map(|input| {
            let mut chunker = Chunker::new(config.clone())?;
            Ok(chunker.process(input))
        })
        .collect()
}
