//! Scoring result types.

use kbgauge_core::FieldImportance;
use serde::{Deserialize, Serialize};

/// Outcome status of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldStatus {
    Complete,
    Partial,
    Missing,
    Disabled,
    Placeholder,
}

impl FieldStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Partial => "partial",
            Self::Missing => "missing",
            Self::Disabled => "disabled",
            Self::Placeholder => "placeholder",
        }
    }
}

impl std::fmt::Display for FieldStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Critical,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    Missing,
    Disabled,
    PlaceholderContent,
    GenericContent,
    TooShort,
    BelowIdealLength,
    MissingKeywords,
    BelowMinCount,
    BelowIdealCount,
    NoBusinessHours,
}

/// One problem found while validating a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub code: IssueCode,
    pub severity: IssueSeverity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Issue {
    pub fn new(code: IssueCode, severity: IssueSeverity, message: impl Into<String>) -> Self {
        Self {
            code,
            severity,
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Scored outcome for one field against one snapshot.
///
/// `weighted_score` is always within `0..=max_possible_score` and
/// `max_possible_score` equals the field's effective weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldQualityResult {
    pub field_key: String,
    pub label: String,
    pub category: String,
    pub importance: FieldImportance,

    pub existence_score: u32,
    pub quality_score: u32,
    pub completeness_score: u32,
    pub field_score: u32,
    pub weighted_score: u32,
    pub max_possible_score: u32,

    pub status: FieldStatus,
    pub issues: Vec<Issue>,

    pub is_placeholder: bool,
    pub is_generic: bool,

    /// Characters of the scored text; 0 for count-based fields.
    pub content_length: usize,
    /// Active items counted; 1 or 0 for text fields.
    pub item_count: usize,
}

impl FieldQualityResult {
    /// Points still available on this field.
    pub fn potential_gain(&self) -> u32 {
        self.max_possible_score.saturating_sub(self.weighted_score)
    }

    pub fn has_critical_issue(&self) -> bool {
        self.issues
            .iter()
            .any(|i| i.severity == IssueSeverity::Critical)
    }
}

/// Aggregate over all fields sharing a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: String,
    /// Share of the total score (0–100) this category controls.
    pub weight: f64,
    pub earned_points: u32,
    pub possible_points: u32,
    /// 0–100; 100 when the category has no fields.
    pub score: u32,
    pub completed_fields: usize,
    pub total_fields: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringSummary {
    pub total_fields: usize,
    pub completed_fields: usize,
    pub partial_fields: usize,
    pub missing_fields: usize,
    pub disabled_fields: usize,
    pub placeholder_fields: usize,
    pub generic_fields: usize,
    /// Fields carrying at least one issue.
    pub fields_with_issues: usize,
    pub earned_points: u32,
    pub possible_points: u32,
}

/// Ordered most urgent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationPriority {
    Critical,
    High,
    Medium,
    Low,
}

impl RecommendationPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for RecommendationPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub field_key: String,
    pub label: String,
    pub category: String,
    pub priority: RecommendationPriority,
    pub potential_gain: u32,
    pub status: FieldStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Full scoring report for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KbScoringResult {
    pub vertical: String,
    /// 0–100.
    pub total_score: u32,
    pub categories: Vec<CategoryScore>,
    pub fields: Vec<FieldQualityResult>,
    pub summary: ScoringSummary,
    pub recommendations: Vec<Recommendation>,
}
