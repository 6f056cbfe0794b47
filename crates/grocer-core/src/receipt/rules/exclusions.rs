//! Keyword filter for receipt lines that are not purchases.

use serde::{Deserialize, Serialize};

/// Keywords marking tax, total and tender lines.
pub const DEFAULT_EXCLUSIONS: &[&str] = &["tax", "total", "visa", "balance", "fee", "deposit"];

/// Case-insensitive substring filter applied to candidate item names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ExclusionRules {
    keywords: Vec<String>,
}

impl ExclusionRules {
    /// Build from keywords; they are lowercased and blanks dropped.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rules = Self {
            keywords: Vec::new(),
        };
        for keyword in keywords {
            rules.push(keyword.as_ref());
        }
        rules
    }

    /// No exclusions at all.
    pub fn none() -> Self {
        Self {
            keywords: Vec::new(),
        }
    }

    pub fn with_keyword(mut self, keyword: &str) -> Self {
        self.push(keyword);
        self
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// The first keyword contained in `name`, if any.
    pub fn matched_keyword(&self, name: &str) -> Option<&str> {
        let name = name.to_lowercase();
        self.keywords
            .iter()
            .find(|kw| name.contains(kw.as_str()))
            .map(String::as_str)
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.matched_keyword(name).is_some()
    }

    fn push(&mut self, keyword: &str) {
        let keyword = keyword.trim().to_lowercase();
        if !keyword.is_empty() && !self.keywords.contains(&keyword) {
            self.keywords.push(keyword);
        }
    }
}

impl Default for ExclusionRules {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUSIONS)
    }
}

impl From<Vec<String>> for ExclusionRules {
    fn from(keywords: Vec<String>) -> Self {
        Self::new(keywords)
    }
}

impl From<ExclusionRules> for Vec<String> {
    fn from(rules: ExclusionRules) -> Self {
        rules.keywords
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_exclusions() {
        let rules = ExclusionRules::default();
        assert!(rules.is_excluded("Sales Tax"));
        assert!(rules.is_excluded("SUBTOTAL"));
        assert!(rules.is_excluded("VISA ****1234"));
        assert!(rules.is_excluded("Bottle Deposit"));
        assert!(rules.is_excluded("Bag Fee"));
        assert!(!rules.is_excluded("Organic Bananas"));
    }

    #[test]
    fn test_matched_keyword() {
        let rules = ExclusionRules::default();
        assert_eq!(rules.matched_keyword("Balance Due"), Some("balance"));
        assert_eq!(rules.matched_keyword("Whole Milk"), None);
    }

    #[test]
    fn test_custom_keywords_normalized() {
        let rules = ExclusionRules::new(["  CASH ", "", "change", "cash"]);
        assert_eq!(rules.keywords(), ["cash", "change"]);
        assert!(rules.is_excluded("Cash Tendered"));
        assert!(!rules.is_excluded("Sales Tax"));
    }

    #[test]
    fn test_none_excludes_nothing() {
        assert!(!ExclusionRules::none().is_excluded("TOTAL"));
        assert!(ExclusionRules::none().with_keyword("Total").is_excluded("TOTAL"));
    }

    #[test]
    fn test_serde_as_list() {
        let rules: ExclusionRules = serde_json::from_str(r#"["Tax", "Coupon"]"#).unwrap();
        assert_eq!(rules.keywords(), ["tax", "coupon"]);
        assert_eq!(serde_json::to_string(&rules).unwrap(), r#"["tax","coupon"]"#);
    }
}
