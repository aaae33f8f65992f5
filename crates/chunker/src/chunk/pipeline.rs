//! Chunking pipeline orchestrator.

use super::{
    detection::is_markdown_table,
    fingerprint::SeenContent,
    headings::{segment, split_by_headings, Section},
    splitters::{SectionSplitter, SentenceWindowSplitter, SplitContext, TableSplitter},
    tokens::TokenEstimator,
    Chunk, Provenance,
};
use crate::config::ChunkerConfig;
use crate::types::{ChunkerInput, ChunkerOutput};
use docslice_core::AppResult;

/// Heading-aware chunker.
///
/// An instance owns the id counter and the per-section duplicate set, so ids
/// keep increasing across every document it processes. Use one instance per
/// concurrently processed document.
pub struct Chunker {
    config: ChunkerConfig,
    estimator: Box<dyn TokenEstimator>,
    next_id: u64,
    seen: SeenContent,
}

impl Chunker {
    /// Create a chunker using the configured word-ratio estimator.
    pub fn new(config: ChunkerConfig) -> AppResult<Self> {
        let estimator = config.estimator.build();
        Self::with_estimator(config, estimator)
    }

    /// Create a chunker with a custom token estimator.
    pub fn with_estimator(
        config: ChunkerConfig,
        estimator: impl TokenEstimator + 'static,
    ) -> AppResult<Self> {
        config.validate()?;

        Ok(Self {
            config,
            estimator: Box::new(estimator),
            next_id: 0,
            seen: SeenContent::default(),
        })
    }

    pub fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// Id the next emitted chunk will receive.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Chunk one document. Text with no headings at all is chunked as one
    /// untitled section unless the fallback is disabled.
    pub fn process(&mut self, input: &ChunkerInput) -> ChunkerOutput {
        let filename = input.metadata.filename.as_str();
        let min_heading_level = input
            .metadata
            .min_heading_level
            .unwrap_or(self.config.min_heading_level);

        let sections = segment(
            &input.text,
            min_heading_level,
            self.config.fallback_to_untitled,
        );
        tracing::debug!("Found {} sections in {}", sections.len(), filename);

        let mut chunks = Vec::new();
        for section in &sections {
            chunks.extend(self.chunk_section(section, filename));
        }

        tracing::info!(
            "Chunking complete: {} chunks created from {} bytes of {}",
            chunks.len(),
            input.text.len(),
            filename
        );

        ChunkerOutput { chunks }
    }

    /// Split `text` on headings and chunk every section in document order.
    pub fn chunk_by_headings(
        &mut self,
        text: &str,
        filename: &str,
        min_heading_level: u8,
    ) -> Vec<Chunk> {
        let sections = split_by_headings(text, min_heading_level);
        tracing::debug!("Found {} sections in {}", sections.len(), filename);

        let mut chunks = Vec::new();
        for section in &sections {
            chunks.extend(self.chunk_section(section, filename));
        }
        chunks
    }

    /// Chunk a single section. Positions restart at zero; ids do not.
    pub fn chunk_section(&mut self, section: &Section, filename: &str) -> Vec<Chunk> {
        self.seen.clear();

        let splitter = self.dispatch_splitter(&section.content);
        let mut ctx = SplitContext {
            max_tokens: self.config.max_tokens,
            sentence_overlap: self.config.sentence_overlap,
            formatting: &self.config.formatting,
            estimator: self.estimator.as_ref(),
            seen: &mut self.seen,
        };
        let drafts = splitter.split(&section.content, &mut ctx);

        let provenance = Provenance {
            filename,
            section_title: &section.title,
            heading_level: section.heading_level,
        };

        let mut chunks = Vec::with_capacity(drafts.len());
        let mut position: u32 = 0;
        for draft in drafts {
            let tokens = self.estimator.count_tokens(&draft.content);
            if let Some(chunk) =
                Chunk::new(self.next_id, position, draft.content, draft.kind, tokens, provenance)
            {
                self.next_id += 1;
                position += 1;
                chunks.push(chunk);
            }
        }

        tracing::debug!(
            "Section '{}' produced {} chunks",
            section.title,
            chunks.len()
        );

        chunks
    }

    /// Select the splitter for a section body.
    fn dispatch_splitter(&self, content: &str) -> Box<dyn SectionSplitter> {
        if is_markdown_table(content) {
            Box::new(TableSplitter)
        } else {
            Box::new(SentenceWindowSplitter)
        }
    }
}

impl Default for Chunker {
    fn default() -> Self {
        let config = ChunkerConfig::default();
        Self {
            estimator: Box::new(config.estimator.build()),
            config,
            next_id: 0,
            seen: SeenContent::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::ChunkType;
    use crate::types::DocumentMetadata;

    fn input(text: &str) -> ChunkerInput {
        ChunkerInput {
            text: text.to_string(),
            metadata: DocumentMetadata {
                filename: "doc.md".to_string(),
                min_heading_level: None,
            },
        }
    }

    #[test]
    fn test_two_sections() {
        let mut chunker = Chunker::default();
        let output = chunker.process(&input(
            "# Intro\nHello world. This is a test.\n## Details\nMore text here.",
        ));

        let chunks = output.chunks;
        assert_eq!(chunks.len(), 2);

        assert_eq!(chunks[0].section_title(), "Intro");
        assert_eq!(chunks[0].heading_level(), Some(1));
        assert_eq!(chunks[0].content(), "Hello world. This is a test.");
        assert_eq!(chunks[0].position(), 0);
        assert_eq!(chunks[0].filename(), "doc.md");

        assert_eq!(chunks[1].section_title(), "Details");
        assert_eq!(chunks[1].heading_level(), Some(2));
        assert_eq!(chunks[1].content(), "More text here.");
        assert_eq!(chunks[1].position(), 0);

        assert!(chunks[0].id() < chunks[1].id());
    }

    #[test]
    fn test_ids_continue_across_documents() {
        let mut chunker = Chunker::default();
        let first = chunker.process(&input("# A\nFirst doc."));
        let second = chunker.process(&input("# B\nSecond doc."));

        assert_eq!(first.chunks[0].id(), 0);
        assert_eq!(second.chunks[0].id(), 1);
        assert_eq!(chunker.next_id(), 2);
    }

    #[test]
    fn test_min_heading_level_override() {
        let mut chunker = Chunker::default();
        let mut doc = input("# Top\nSkipped text.\n## Kept\nKept text.");
        doc.metadata.min_heading_level = Some(2);

        let chunks = chunker.process(&doc).chunks;
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].section_title(), "Kept");
    }

    #[test]
    fn test_untitled_fallback() {
        let mut chunker = Chunker::default();
        let chunks = chunker.process(&input("Just some plain text.")).chunks;

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].section_title(), "");
        assert_eq!(chunks[0].heading_level(), None);
    }

    #[test]
    fn test_fallback_disabled() {
        let config = ChunkerConfig {
            fallback_to_untitled: false,
            ..ChunkerConfig::default()
        };
        let mut chunker = Chunker::new(config).unwrap();
        assert!(chunker.process(&input("Just some plain text.")).chunks.is_empty());
    }

    #[test]
    fn test_no_fallback_when_headings_filtered() {
        let mut chunker = Chunker::default();
        let mut doc = input("# Only\nText under a top heading.");
        doc.metadata.min_heading_level = Some(3);
        assert!(chunker.process(&doc).chunks.is_empty());
    }

    #[test]
    fn test_empty_document() {
        let mut chunker = Chunker::default();
        assert!(chunker.process(&input("")).chunks.is_empty());
        assert!(chunker.process(&input("  \n\n")).chunks.is_empty());
        assert_eq!(chunker.next_id(), 0);
    }

    #[test]
    fn test_table_section() {
        let mut chunker = Chunker::default();
        let chunks = chunker
            .process(&input("# Data\n| A | B |\n| --- | --- |\n| 1 | 2 |"))
            .chunks;

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].chunk_type(), ChunkType::Table);
        let rows = chunks[0].content_json().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("B").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_positions_within_section() {
        let config = ChunkerConfig {
            max_tokens: 3,
            sentence_overlap: 0,
            ..ChunkerConfig::default()
        };
        let mut chunker = Chunker::new(config).unwrap();
        let chunks = chunker
            .process(&input("# S\nOne two. Three four. Five six."))
            .chunks;

        let positions: Vec<u32> = chunks.iter().map(|c| c.position()).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn test_custom_estimator() {
        let config = ChunkerConfig {
            max_tokens: 10,
            sentence_overlap: 0,
            ..ChunkerConfig::default()
        };
        let mut chunker = Chunker::with_estimator(config, |text: &str| text.chars().count()).unwrap();
        let chunks = chunker.process(&input("# S\nAbcdefgh. Ijklmnop.")).chunks;

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].tokens(), "Abcdefgh.".len());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ChunkerConfig {
            max_tokens: 0,
            ..ChunkerConfig::default()
        };
        assert!(Chunker::new(config).is_err());
    }

    #[test]
    fn test_chunk_by_headings_has_no_fallback() {
        let mut chunker = Chunker::default();
        assert!(chunker
            .chunk_by_headings("Just some plain text.", "doc.md", 1)
            .is_empty());

        let chunks = chunker.chunk_by_headings("# A\nBody text.\n## B\nMore.", "doc.md", 2);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].section_title(), "B");

        assert_eq!(chunker.process(&input("Just some plain text.")).chunks.len(), 1);
    }
}
