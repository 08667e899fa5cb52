//! Token estimation utilities.
//!
//! Uses a character-based heuristic: ~3.5 characters per token, rounded
//! up, plus a fixed per-item overhead for the separators and tags around
//! each item. The divisor is deliberately below the usual 4 so estimates
//! err on the high side for non-English text.
//!
//! Items are measured in their rendered form (see [`crate::format`]), the
//! exact text that ends up in the prompt.

use crate::format::format_item;
use kbgauge_config::BudgetConfig;
use kbgauge_core::{ContentItem, ContentKind, KbContent};

pub const DEFAULT_CHARS_PER_TOKEN: f64 = 3.5;
pub const DEFAULT_ITEM_OVERHEAD: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenEstimator {
    chars_per_token: f64,
    item_overhead: usize,
}

impl TokenEstimator {
    /// A non-positive or non-finite divisor falls back to the default.
    pub fn new(chars_per_token: f64, item_overhead: usize) -> Self {
        let chars_per_token = if chars_per_token.is_finite() && chars_per_token > 0.0 {
            chars_per_token
        } else {
            DEFAULT_CHARS_PER_TOKEN
        };
        Self {
            chars_per_token,
            item_overhead,
        }
    }

    pub fn from_config(config: &BudgetConfig) -> Self {
        Self::new(config.chars_per_token, config.item_overhead_tokens)
    }

    pub fn chars_per_token(&self) -> f64 {
        self.chars_per_token
    }

    pub fn item_overhead(&self) -> usize {
        self.item_overhead
    }

    /// Estimate the token count for a string. Rounds up.
    pub fn estimate(&self, text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }
        let chars = text.chars().count() as f64;
        (chars / self.chars_per_token).ceil() as usize
    }

    /// Estimate one item as rendered for `kind`, including overhead.
    pub fn estimate_item(&self, kind: ContentKind, item: &ContentItem) -> usize {
        self.estimate(&format_item(kind, item)) + self.item_overhead
    }

    pub fn estimate_items(&self, kind: ContentKind, items: &[ContentItem]) -> usize {
        items.iter().map(|i| self.estimate_item(kind, i)).sum()
    }

    /// Estimate every item of every kind.
    pub fn estimate_content(&self, content: &KbContent) -> usize {
        ContentKind::ALL
            .iter()
            .map(|kind| self.estimate_items(*kind, content.items(*kind)))
            .sum()
    }
}

impl Default for TokenEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_CHARS_PER_TOKEN, DEFAULT_ITEM_OVERHEAD)
    }
}
