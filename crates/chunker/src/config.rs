//! Chunker configuration management.
//!
//! Settings live in `.docslice/chunker.yaml` inside the workspace. Every field
//! has a default, so a partial file (or no file at all) is valid.

use docslice_core::config::STATE_DIR;
use docslice_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::chunk::tokens::WordRatioEstimator;

/// Parameters for one chunker instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkerConfig {
    /// Token budget per chunk
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// Sentences carried over from the previous window
    #[serde(default = "default_sentence_overlap")]
    pub sentence_overlap: usize,

    /// Headings shallower than this level are skipped (1 keeps all)
    #[serde(default = "default_min_heading_level")]
    pub min_heading_level: u8,

    /// Chunk text without any heading as a single untitled section
    #[serde(default = "default_true")]
    pub fallback_to_untitled: bool,

    /// Token estimator ratio
    #[serde(default)]
    pub estimator: EstimatorConfig,

    /// Bullet-to-table reformatting
    #[serde(default)]
    pub formatting: FormattingRules,
}

fn default_max_tokens() -> usize {
    2048
}

fn default_sentence_overlap() -> usize {
    2
}

fn default_min_heading_level() -> u8 {
    1
}

fn default_true() -> bool {
    true
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            sentence_overlap: default_sentence_overlap(),
            min_heading_level: default_min_heading_level(),
            fallback_to_untitled: true,
            estimator: EstimatorConfig::default(),
            formatting: FormattingRules::default(),
        }
    }
}

impl ChunkerConfig {
    /// Reject parameters the engine cannot honour.
    pub fn validate(&self) -> AppResult<()> {
        if self.max_tokens == 0 {
            return Err(AppError::Chunking(
                "max_tokens must be at least 1".to_string(),
            ));
        }

        if !(1..=6).contains(&self.min_heading_level) {
            return Err(AppError::Chunking(format!(
                "min_heading_level must be between 1 and 6, got {}",
                self.min_heading_level
            )));
        }

        if self.estimator.per_words == 0 {
            return Err(AppError::Chunking(
                "estimator.per_words must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Tokens-per-words ratio of the default estimator (13 per 10, i.e. 1.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    pub tokens: usize,
    pub per_words: usize,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            tokens: 13,
            per_words: 10,
        }
    }
}

impl EstimatorConfig {
    pub fn build(&self) -> WordRatioEstimator {
        WordRatioEstimator::new(self.tokens, self.per_words)
    }
}

/// Vocabulary for the bullet-to-table heuristic.
///
/// The defaults are the Vietnamese address terms used by the original
/// deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormattingRules {
    pub enabled: bool,

    /// Bullets needed before any reformatting happens
    pub min_bullets: usize,

    /// Matched case-insensitively anywhere in the content
    pub address_keywords: Vec<String>,

    /// Bullet keys containing one of these go to the address table
    pub address_fields: Vec<String>,

    pub address_title: String,
    pub extra_title: String,
    pub field_header: String,
    pub value_header: String,
}

impl Default for FormattingRules {
    fn default() -> Self {
        let strings =
            |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
        Self {
            enabled: true,
            min_bullets: 3,
            address_keywords: strings(&["địa chỉ", "số nhà", "phường", "quận", "tỉnh", "thành phố"]),
            address_fields: strings(&[
                "Số nhà/Đường",
                "Phường/Xã",
                "Quận/Huyện",
                "Tỉnh/Thành phố",
                "Mã bưu chính",
            ]),
            address_title: "**Địa chỉ:**".to_string(),
            extra_title: "**Thông tin bổ sung:**".to_string(),
            field_header: "Thông tin".to_string(),
            value_header: "Chi tiết".to_string(),
        }
    }
}

/// Load the chunker configuration for a workspace.
///
/// Falls back to [`ChunkerConfig::default`] when no config file exists.
pub fn load_config(workspace: &Path) -> AppResult<ChunkerConfig> {
    let config_path = get_config_path(workspace);

    if !config_path.exists() {
        tracing::debug!("No chunker config at {:?}, using defaults", config_path);
        return Ok(ChunkerConfig::default());
    }

    let content = fs::read_to_string(&config_path).map_err(|e| {
        AppError::Config(format!("Failed to read config at {:?}: {}", config_path, e))
    })?;

    let config: ChunkerConfig = serde_yaml::from_str(&content).map_err(|e| {
        AppError::Config(format!("Failed to parse config at {:?}: {}", config_path, e))
    })?;
    config.validate()?;

    tracing::debug!("Loaded chunker config from {:?}", config_path);
    Ok(config)
}

/// Save the chunker configuration for a workspace.
pub fn save_config(workspace: &Path, config: &ChunkerConfig) -> AppResult<PathBuf> {
    let config_path = get_config_path(workspace);

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            AppError::Config(format!("Failed to create config directory: {}", e))
        })?;
    }

    let yaml = serde_yaml::to_string(config)?;
    fs::write(&config_path, yaml).map_err(|e| {
        AppError::Config(format!("Failed to write config to {:?}: {}", config_path, e))
    })?;

    tracing::debug!("Saved chunker config to {:?}", config_path);
    Ok(config_path)
}

/// Get the path to the workspace's chunker config file.
pub fn get_config_path(workspace: &Path) -> PathBuf {
    workspace.join(STATE_DIR).join("chunker.yaml")
}
