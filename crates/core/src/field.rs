//! Scoreable field descriptors.
//!
//! A field names one unit of content a well-configured knowledge base is
//! expected to have ("cancellation policy", "greeting template", "at least
//! three FAQ articles") and how to judge it. Catalogs of fields are fixed
//! per business vertical and never change during evaluation.

use crate::content::ContentKind;
use serde::{Deserialize, Serialize};

/// Field keys that are resolved from location opening hours instead of
/// content items.
const BUSINESS_HOURS_KEYS: &[&str] = &["business_hours", "operating_hours", "horarios"];

/// Where a field reads its content from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Instructions,
    Policies,
    Articles,
    Templates,
    Competitors,
    Locations,
}

impl DataSource {
    /// The content collection behind this source, if it is one.
    pub fn content_kind(self) -> Option<ContentKind> {
        match self {
            Self::Instructions => Some(ContentKind::Instructions),
            Self::Policies => Some(ContentKind::Policies),
            Self::Articles => Some(ContentKind::Articles),
            Self::Templates => Some(ContentKind::Templates),
            Self::Competitors => Some(ContentKind::Competitors),
            Self::Locations => None,
        }
    }
}

/// How much a missing field hurts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldImportance {
    Essential,
    Recommended,
    #[default]
    Optional,
}

/// Declarative description of one expected piece of knowledge-base content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreableField {
    /// Stable key, unique within a catalog.
    pub key: String,

    /// Human-readable name; falls back to `key`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    pub data_source: DataSource,

    /// Only items with this type tag count towards the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_type: Option<String>,

    /// The field's value is the number of active items, not a text.
    #[serde(default)]
    pub count_based: bool,

    #[serde(default)]
    pub min_length: usize,

    #[serde(default)]
    pub ideal_length: usize,

    #[serde(default)]
    pub min_count: usize,

    /// Each entry must appear in the text; `a|b` accepts either spelling.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub must_contain_keywords: Vec<String>,

    /// Points this field contributes to its category.
    pub weight: u32,

    pub category: String,

    #[serde(default)]
    pub importance: FieldImportance,
}

impl ScoreableField {
    /// A text field with no length requirements yet.
    pub fn text(
        key: impl Into<String>,
        data_source: DataSource,
        category: impl Into<String>,
        weight: u32,
    ) -> Self {
        Self {
            key: key.into(),
            label: None,
            data_source,
            filter_type: None,
            count_based: false,
            min_length: 1,
            ideal_length: 1,
            min_count: 0,
            must_contain_keywords: Vec::new(),
            weight,
            category: category.into(),
            importance: FieldImportance::default(),
        }
    }

    /// A field valued by how many active items exist.
    pub fn count(
        key: impl Into<String>,
        data_source: DataSource,
        category: impl Into<String>,
        weight: u32,
        min_count: usize,
    ) -> Self {
        Self {
            count_based: true,
            min_count,
            min_length: 0,
            ideal_length: 0,
            ..Self::text(key, data_source, category, weight)
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_filter(mut self, filter_type: impl Into<String>) -> Self {
        self.filter_type = Some(filter_type.into());
        self
    }

    pub fn with_lengths(mut self, min_length: usize, ideal_length: usize) -> Self {
        self.min_length = min_length;
        self.ideal_length = ideal_length;
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.must_contain_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_importance(mut self, importance: FieldImportance) -> Self {
        self.importance = importance;
        self
    }

    /// `label`, or `key` when no label is set.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.key)
    }

    /// Whether this field is resolved from location opening hours.
    pub fn is_business_hours(&self) -> bool {
        BUSINESS_HOURS_KEYS.contains(&self.key.as_str())
    }

    // Guarded parameters: denominators are never below 1.

    pub fn effective_weight(&self) -> u32 {
        self.weight.max(1)
    }

    pub fn effective_min_count(&self) -> usize {
        self.min_count.max(1)
    }

    /// Count at which a count-based field earns full quality credit.
    pub fn ideal_count(&self) -> usize {
        let min = self.effective_min_count();
        (min + 1).max(min * 2)
    }

    pub fn effective_min_length(&self) -> usize {
        self.min_length.max(1)
    }

    pub fn effective_ideal_length(&self) -> usize {
        self.ideal_length.max(self.effective_min_length())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_falls_back_to_key() {
        let field = ScoreableField::text("refund_policy", DataSource::Policies, "policies", 5);
        assert_eq!(field.display_label(), "refund_policy");
        let field = field.with_label("Refund policy");
        assert_eq!(field.display_label(), "Refund policy");
    }

    #[test]
    fn degenerate_parameters_are_clamped() {
        let field = ScoreableField::text("x", DataSource::Templates, "communication", 0)
            .with_lengths(0, 0);
        assert_eq!(field.effective_weight(), 1);
        assert_eq!(field.effective_min_length(), 1);
        assert_eq!(field.effective_ideal_length(), 1);

        let count = ScoreableField::count("y", DataSource::Articles, "knowledge", 3, 0);
        assert_eq!(count.effective_min_count(), 1);
    }

    #[test]
    fn ideal_count_is_at_least_one_above_minimum() {
        let f = |min| ScoreableField::count("c", DataSource::Articles, "knowledge", 3, min);
        assert_eq!(f(1).ideal_count(), 2);
        assert_eq!(f(3).ideal_count(), 6);
        assert_eq!(f(0).ideal_count(), 2);
    }

    #[test]
    fn business_hours_keys_are_recognised() {
        let hours = ScoreableField::text("business_hours", DataSource::Locations, "identity", 8);
        assert!(hours.is_business_hours());
        let other = ScoreableField::text("greeting", DataSource::Templates, "communication", 4);
        assert!(!other.is_business_hours());
    }

    #[test]
    fn deserializes_with_defaults() {
        let field: ScoreableField = serde_json::from_str(
            r#"{"key": "faq", "data_source": "articles", "count_based": true,
                "min_count": 3, "weight": 10, "category": "knowledge"}"#,
        )
        .unwrap();
        assert!(field.count_based);
        assert_eq!(field.importance, FieldImportance::Optional);
        assert!(field.filter_type.is_none());
        assert_eq!(field.data_source.content_kind(), Some(ContentKind::Articles));
    }
}
