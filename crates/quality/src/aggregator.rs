//! Score aggregator: field results → category scores, total and
//! recommendations.

use crate::model::{
    CategoryScore, FieldQualityResult, FieldStatus, IssueSeverity, Recommendation,
    RecommendationPriority, ScoringSummary,
};
use crate::validator::finite;
use kbgauge_config::ScoringConfig;
use kbgauge_core::FieldImportance;
use tracing::warn;

/// Gain at or above which a recommendation is at least medium priority.
const MEDIUM_GAIN_POINTS: u32 = 5;

/// Everything derived from a set of field results.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub categories: Vec<CategoryScore>,
    pub total_score: u32,
    pub summary: ScoringSummary,
    pub recommendations: Vec<Recommendation>,
}

pub struct ScoreAggregator<'a> {
    config: &'a ScoringConfig,
}

impl<'a> ScoreAggregator<'a> {
    pub fn new(config: &'a ScoringConfig) -> Self {
        Self { config }
    }

    pub fn aggregate(&self, fields: &[FieldQualityResult]) -> Aggregate {
        let categories = self.category_scores(fields);

        let total: f64 = categories
            .iter()
            .map(|c| finite(f64::from(c.score) / 100.0 * c.weight))
            .sum();
        let total_score = finite(total).round().clamp(0.0, 100.0) as u32;

        Aggregate {
            summary: self.summary(fields, &categories),
            recommendations: recommendations(fields),
            categories,
            total_score,
        }
    }

    /// Configured categories first, in table order, then any category that
    /// only appears in the results.
    fn category_scores(&self, fields: &[FieldQualityResult]) -> Vec<CategoryScore> {
        let mut keys: Vec<&str> = self.config.categories.iter().map(|c| c.key.as_str()).collect();
        for field in fields {
            if !keys.contains(&field.category.as_str()) {
                warn!(
                    category = %field.category,
                    field = %field.field_key,
                    "Category has no configured weight; it will not count towards the total"
                );
                keys.push(&field.category);
            }
        }

        keys.into_iter()
            .map(|key| {
                let members: Vec<&FieldQualityResult> =
                    fields.iter().filter(|f| f.category == key).collect();
                let earned: u32 = members.iter().map(|f| f.weighted_score).sum();
                let possible: u32 = members.iter().map(|f| f.max_possible_score).sum();
                let score = if possible == 0 {
                    100
                } else {
                    finite((f64::from(earned) / f64::from(possible) * 100.0).round())
                        .clamp(0.0, 100.0) as u32
                };
                CategoryScore {
                    category: key.to_string(),
                    weight: self.config.category_weight(key),
                    earned_points: earned,
                    possible_points: possible,
                    score,
                    completed_fields: members.iter().filter(|f| self.is_completed(f)).count(),
                    total_fields: members.len(),
                }
            })
            .collect()
    }

    /// Complete, and the weighted score clears the tolerance band.
    fn is_completed(&self, field: &FieldQualityResult) -> bool {
        field.status == FieldStatus::Complete
            && f64::from(field.weighted_score)
                >= f64::from(field.max_possible_score) * self.config.completion_tolerance
    }

    fn summary(&self, fields: &[FieldQualityResult], categories: &[CategoryScore]) -> ScoringSummary {
        let count = |status: FieldStatus| fields.iter().filter(|f| f.status == status).count();
        ScoringSummary {
            total_fields: fields.len(),
            completed_fields: categories.iter().map(|c| c.completed_fields).sum(),
            partial_fields: count(FieldStatus::Partial),
            missing_fields: count(FieldStatus::Missing),
            disabled_fields: count(FieldStatus::Disabled),
            placeholder_fields: count(FieldStatus::Placeholder),
            generic_fields: fields.iter().filter(|f| f.is_generic).count(),
            fields_with_issues: fields.iter().filter(|f| !f.issues.is_empty()).count(),
            earned_points: categories.iter().map(|c| c.earned_points).sum(),
            possible_points: categories.iter().map(|c| c.possible_points).sum(),
        }
    }
}

// ── Recommendations ───────────────────────────────────────────────────────

fn priority(field: &FieldQualityResult, gain: u32) -> RecommendationPriority {
    let missing = field.status == FieldStatus::Missing;
    if (missing && field.importance == FieldImportance::Essential)
        || field.status == FieldStatus::Placeholder
    {
        RecommendationPriority::Critical
    } else if (missing && field.importance == FieldImportance::Recommended)
        || field.has_critical_issue()
    {
        RecommendationPriority::High
    } else if gain >= MEDIUM_GAIN_POINTS {
        RecommendationPriority::Medium
    } else {
        RecommendationPriority::Low
    }
}

fn message(field: &FieldQualityResult) -> String {
    let label = &field.label;
    match field.status {
        FieldStatus::Missing => format!("Add {label}"),
        FieldStatus::Disabled => format!("Activate {label}"),
        FieldStatus::Placeholder => format!("Replace placeholder content in {label}"),
        FieldStatus::Partial => format!("Improve {label}"),
        FieldStatus::Complete => format!("Polish {label}"),
    }
}

/// The most useful suggestion: critical issues first, then the first one.
fn suggestion(field: &FieldQualityResult) -> Option<String> {
    field
        .issues
        .iter()
        .filter(|i| i.suggestion.is_some())
        .min_by_key(|i| match i.severity {
            IssueSeverity::Critical => 0,
            IssueSeverity::Warning => 1,
            IssueSeverity::Info => 2,
        })
        .and_then(|i| i.suggestion.clone())
}

/// One recommendation per field with points left, most urgent first and
/// larger gains first within a priority.
pub fn recommendations(fields: &[FieldQualityResult]) -> Vec<Recommendation> {
    let mut recs: Vec<Recommendation> = fields
        .iter()
        .filter_map(|field| {
            let gain = field.potential_gain();
            (gain > 0).then(|| Recommendation {
                field_key: field.field_key.clone(),
                label: field.label.clone(),
                category: field.category.clone(),
                priority: priority(field, gain),
                potential_gain: gain,
                status: field.status,
                message: message(field),
                suggestion: suggestion(field),
            })
        })
        .collect();

    // Stable: ties keep catalog order.
    recs.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then(b.potential_gain.cmp(&a.potential_gain))
    });
    recs
}
