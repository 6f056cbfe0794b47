//! Configuration structures for the receipt pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::category::Taxonomy;
use crate::error::{GrocerError, Result};
use crate::receipt::rules::ExclusionRules;
use crate::receipt::ParseStrategy;

/// Main configuration for the grocer pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrocerConfig {
    /// Line parser configuration.
    pub parser: ParserConfig,

    /// Category taxonomy.
    pub taxonomy: Taxonomy,

    /// Ledger row configuration.
    pub ledger: LedgerConfig,
}

/// Line parser configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Layout strategy matching the OCR mode.
    pub strategy: ParseStrategy,

    /// Keywords marking non-item lines.
    pub exclusions: ExclusionRules,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            strategy: ParseStrategy::Split,
            exclusions: ExclusionRules::default(),
        }
    }
}

/// Ledger row configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Store name used when none is given or guessed.
    pub default_store: String,

    /// Guess the store from the first OCR line.
    pub guess_store: bool,

    /// CSV ledger that scans append to by default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_path: Option<PathBuf>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            default_store: "Unknown".to_string(),
            guess_store: true,
            ledger_path: None,
        }
    }
}

impl GrocerConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| GrocerError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| GrocerError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
