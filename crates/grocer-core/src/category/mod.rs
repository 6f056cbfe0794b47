//! Keyword-based spending categorization.
//!
//! A [`Taxonomy`] is an ordered list of categories, each with lowercase
//! keyword substrings. An item belongs to the first category, in declaration
//! order, with a keyword occurring anywhere in its lowercased name. Matching
//! is plain substring search, so `"rice"` also matches `"licorice"`.

mod grocery;

use serde::{Deserialize, Serialize};

pub use grocery::{grocery_taxonomy, DEFAULT_CATEGORY};

/// One spending category and its keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CategorySpec")]
pub struct Category {
    /// Label written to the ledger.
    pub label: String,
    /// Lowercase keyword substrings.
    pub keywords: Vec<String>,
}

/// Wire shape of a category before keyword normalisation.
#[derive(Deserialize)]
struct CategorySpec {
    label: String,
    #[serde(default)]
    keywords: Vec<String>,
}

impl From<CategorySpec> for Category {
    fn from(spec: CategorySpec) -> Self {
        Category::new(spec.label, spec.keywords)
    }
}

impl Category {
    /// Keywords are trimmed and lowercased; blank ones are dropped since they
    /// would match every name.
    pub fn new<I, S>(label: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            label: label.into(),
            keywords: keywords
                .into_iter()
                .map(|kw| kw.as_ref().trim().to_lowercase())
                .filter(|kw| !kw.is_empty())
                .collect(),
        }
    }

    /// Whether any keyword occurs in an already-lowercased name.
    fn matches(&self, normalized_name: &str) -> bool {
        self.keywords
            .iter()
            .any(|kw| normalized_name.contains(kw.as_str()))
    }
}

/// Ordered category table with a fallback label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    /// Categories in precedence order.
    pub categories: Vec<Category>,
    /// Label returned when nothing matches.
    #[serde(default = "default_label")]
    pub default_label: String,
}

fn default_label() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Taxonomy {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories,
            default_label: default_label(),
        }
    }

    pub fn with_default_label(mut self, label: impl Into<String>) -> Self {
        self.default_label = label.into();
        self
    }

    /// Assign exactly one category label to `item_name`.
    pub fn categorize(&self, item_name: &str) -> &str {
        let name = item_name.trim().to_lowercase();

        self.categories
            .iter()
            .find(|category| category.matches(&name))
            .map(|category| category.label.as_str())
            .unwrap_or(self.default_label.as_str())
    }

    /// Every label this taxonomy can return, fallback last.
    pub fn labels(&self) -> Vec<&str> {
        self.categories
            .iter()
            .map(|c| c.label.as_str())
            .chain(std::iter::once(self.default_label.as_str()))
            .collect()
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        grocery_taxonomy()
    }
}

/// Categorize an item name against a taxonomy.
pub fn categorize<'a>(item_name: &str, taxonomy: &'a Taxonomy) -> &'a str {
    taxonomy.categorize(item_name)
}
