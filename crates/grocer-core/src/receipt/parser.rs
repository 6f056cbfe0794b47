//! Receipt parser dispatching over the layout strategies.

use tracing::{debug, info};

use crate::models::config::ParserConfig;
use crate::models::receipt::LineItem;
use crate::ocr::{OcrInput, RawLine};

use super::rules::{
    ExclusionRules, InlineExtractor, LayoutExtractor, SplitExtractor, WhitespaceExtractor,
};
use super::ParseStrategy;

/// Outcome of parsing one receipt's lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Accepted items, in receipt order.
    pub items: Vec<LineItem>,
    /// Strategy that produced the items. For [`ParseStrategy::Auto`] with no
    /// yield this stays `Auto`.
    pub strategy: ParseStrategy,
    /// Number of input lines.
    pub lines: usize,
    /// Candidates dropped by the exclusion keywords.
    pub excluded: usize,
}

impl ParseReport {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Line parser for receipt OCR text.
#[derive(Debug, Clone, Default)]
pub struct ReceiptParser {
    strategy: ParseStrategy,
    exclusions: ExclusionRules,
}

impl ReceiptParser {
    /// Create a parser with the split layout and default exclusions.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ParserConfig) -> Self {
        Self {
            strategy: config.strategy,
            exclusions: config.exclusions.clone(),
        }
    }

    /// Set the layout strategy.
    pub fn with_strategy(mut self, strategy: ParseStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Replace the exclusion keywords.
    pub fn with_exclusions(mut self, exclusions: ExclusionRules) -> Self {
        self.exclusions = exclusions;
        self
    }

    pub fn strategy(&self) -> ParseStrategy {
        self.strategy
    }

    pub fn exclusions(&self) -> &ExclusionRules {
        &self.exclusions
    }

    /// Parse OCR output into line items.
    pub fn parse(&self, input: impl Into<OcrInput>) -> Vec<LineItem> {
        let lines = input.into().into_lines();
        self.parse_lines(&lines).items
    }

    /// Parse already-normalised lines, keeping diagnostics.
    pub fn parse_lines(&self, lines: &[RawLine]) -> ParseReport {
        info!(
            "Parsing {} receipt lines with {} strategy",
            lines.len(),
            self.strategy
        );

        if let Some(extractor) = extractor_for(self.strategy) {
            return self.run(self.strategy, extractor, lines);
        }

        // Largest count across passes; every pass reads the same lines.
        let mut excluded: usize = 0;
        for strategy in ParseStrategy::FALLBACK_ORDER {
            let Some(extractor) = extractor_for(strategy) else {
                continue;
            };
            let report = self.run(strategy, extractor, lines);
            if !report.is_empty() {
                debug!("Auto strategy settled on {}", strategy);
                return report;
            }
            debug!("{} strategy found no items", strategy);
            excluded = excluded.max(report.excluded);
        }

        ParseReport {
            items: Vec::new(),
            strategy: ParseStrategy::Auto,
            lines: lines.len(),
            excluded,
        }
    }

    fn run(
        &self,
        strategy: ParseStrategy,
        extractor: &dyn LayoutExtractor,
        lines: &[RawLine],
    ) -> ParseReport {
        let candidates = extractor.extract_all(lines);

        let mut items = Vec::with_capacity(candidates.len());
        let mut excluded = 0;

        for item in candidates {
            if let Some(keyword) = self.exclusions.matched_keyword(&item.name) {
                debug!("Excluding {:?} at {}: matched {:?}", item.name, item.price, keyword);
                excluded += 1;
                continue;
            }
            items.push(item);
        }

        debug!(
            "{} extractor accepted {} items, excluded {}",
            extractor.name(),
            items.len(),
            excluded
        );

        ParseReport {
            items,
            strategy,
            lines: lines.len(),
            excluded,
        }
    }
}

/// The extractor behind a concrete strategy; `None` for [`ParseStrategy::Auto`].
fn extractor_for(strategy: ParseStrategy) -> Option<&'static dyn LayoutExtractor> {
    match strategy {
        ParseStrategy::Split => Some(&SplitExtractor),
        ParseStrategy::Inline => Some(&InlineExtractor),
        ParseStrategy::Whitespace => Some(&WhitespaceExtractor),
        ParseStrategy::Auto => None,
    }
}
