//! Rule-based extractors for receipt layouts.

pub mod exclusions;
pub mod inline;
pub mod patterns;
pub mod price;
pub mod split;
pub mod store;
pub mod whitespace;

pub use exclusions::{ExclusionRules, DEFAULT_EXCLUSIONS};
pub use inline::InlineExtractor;
pub use price::{format_price, parse_loose_price, parse_price};
pub use split::SplitExtractor;
pub use store::guess_store;
pub use whitespace::WhitespaceExtractor;

use crate::models::receipt::LineItem;
use crate::ocr::RawLine;

/// Trait for layout extractors.
///
/// Extractors only recognise item shapes; exclusion filtering happens in the
/// parser so every layout shares one keyword list.
pub trait LayoutExtractor {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Extract every candidate item, in line order.
    fn extract_all(&self, lines: &[RawLine]) -> Vec<LineItem>;
}
