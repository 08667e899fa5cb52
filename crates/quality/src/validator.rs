//! Field quality validator.
//!
//! Scores one [`ScoreableField`] against one snapshot along three axes and
//! folds them into a weighted field score:
//!
//! ```text
//! field_score    = round(existence × 0.20 + quality × 0.50 + completeness × 0.30)
//! weighted_score = round(field_score / 100 × weight)
//! ```
//!
//! Every division is taken over a denominator clamped to at least 1 and
//! every intermediate value passes through [`finite`] so no result can carry
//! `NaN` or infinity.

use crate::classifier::{Classification, ContentClassifier};
use crate::model::{FieldQualityResult, FieldStatus, Issue, IssueCode, IssueSeverity};
use kbgauge_core::{ContentItem, FieldImportance, KbSnapshot, ScoreableField};
use tracing::debug;

const EXISTENCE_WEIGHT: f64 = 0.20;
const QUALITY_WEIGHT: f64 = 0.50;
const COMPLETENESS_WEIGHT: f64 = 0.30;

/// Score reached exactly at the minimum length or count.
const RAMP_FLOOR: f64 = 70.0;
/// Maximum points removed for missing keywords.
const KEYWORD_PENALTY: f64 = 15.0;
/// Quality ceiling for placeholder content.
const PLACEHOLDER_QUALITY_CAP: f64 = 10.0;

/// Validates fields with a shared classifier.
pub struct FieldValidator<'a> {
    classifier: &'a ContentClassifier,
    generic_penalty: f64,
}

/// What extraction found for a field.
enum Extracted<'s> {
    /// No matching item at all.
    Missing,
    /// Matching items exist but none is active.
    Inactive,
    /// First active matching text.
    Text(&'s str),
    /// Number of active matching items.
    Count(usize),
}

impl<'a> FieldValidator<'a> {
    pub fn new(classifier: &'a ContentClassifier, generic_penalty: f64) -> Self {
        Self {
            classifier,
            generic_penalty: finite(generic_penalty).max(0.0),
        }
    }

    /// Score one field against a snapshot.
    pub fn validate(&self, field: &ScoreableField, snapshot: &KbSnapshot) -> FieldQualityResult {
        let result = if field.is_business_hours() {
            validate_business_hours(field, snapshot)
        } else {
            match extract(field, snapshot) {
                Extracted::Count(count) => validate_count(field, count),
                Extracted::Text(text) => self.validate_text(field, text),
                Extracted::Missing => absent(field, FieldStatus::Missing),
                Extracted::Inactive => absent(field, FieldStatus::Disabled),
            }
        };

        debug!(
            field = %result.field_key,
            status = %result.status,
            field_score = result.field_score,
            weighted = result.weighted_score,
            max = result.max_possible_score,
            "Validated field"
        );
        result
    }

    fn validate_text(&self, field: &ScoreableField, text: &str) -> FieldQualityResult {
        let text = text.trim();
        let length = text.chars().count();
        let min = field.effective_min_length();
        let ideal = field.effective_ideal_length();
        let classification = self.classifier.classify(text);

        let mut issues = Vec::new();
        let ramp = ramp(length, min, ideal);

        let mut quality = if length == 0 { 0.0 } else { ramp };

        let missing = missing_keywords(&field.must_contain_keywords, text);
        if !missing.is_empty() && length > 0 {
            let fraction = missing.len() as f64 / field.must_contain_keywords.len().max(1) as f64;
            quality -= KEYWORD_PENALTY * fraction;
            issues.push(
                Issue::new(
                    IssueCode::MissingKeywords,
                    IssueSeverity::Warning,
                    format!("Missing expected terms: {}", missing.join(", ")),
                )
                .with_suggestion(format!("Mention {} explicitly.", missing.join(" and "))),
            );
        }

        if classification.is_generic {
            quality -= self.generic_penalty;
            issues.push(generic_issue(&classification));
        }

        if classification.is_placeholder {
            quality = quality.min(PLACEHOLDER_QUALITY_CAP);
            issues.insert(0, placeholder_issue(&classification));
        } else if length < min {
            issues.push(
                Issue::new(
                    IssueCode::TooShort,
                    IssueSeverity::Warning,
                    format!("Content has {length} characters; at least {min} are expected"),
                )
                .with_suggestion("Add more detail so the assistant can answer confidently."),
            );
        } else if length < ideal {
            issues.push(Issue::new(
                IssueCode::BelowIdealLength,
                IssueSeverity::Info,
                format!("Content has {length} characters; {ideal} or more is ideal"),
            ));
        }

        let existence = 100;
        let quality = to_score(quality);
        let completeness = if length == 0 { 0 } else { to_score(ramp) };
        let status = if classification.is_placeholder {
            FieldStatus::Placeholder
        } else {
            FieldStatus::Complete
        };

        build(
            field,
            Scores {
                existence,
                quality,
                completeness,
            },
            status,
            issues,
            &classification,
            length,
            1,
        )
    }
}

// ── Extraction ────────────────────────────────────────────────────────────

fn matches_filter(field: &ScoreableField, item: &ContentItem) -> bool {
    field
        .filter_type
        .as_deref()
        .is_none_or(|t| item.item_type.eq_ignore_ascii_case(t))
}

fn extract<'s>(field: &ScoreableField, snapshot: &'s KbSnapshot) -> Extracted<'s> {
    let Some(kind) = field.data_source.content_kind() else {
        // Locations: counted, or the first active branch name as text.
        let mut active = snapshot.locations.iter().filter(|l| l.is_active);
        if field.count_based {
            return Extracted::Count(active.count());
        }
        return match active.next() {
            Some(location) => Extracted::Text(&location.name),
            None if snapshot.locations.is_empty() => Extracted::Missing,
            None => Extracted::Inactive,
        };
    };

    let mut matching = snapshot
        .items(kind)
        .iter()
        .filter(|item| matches_filter(field, item))
        .peekable();

    if field.count_based {
        return Extracted::Count(matching.filter(|i| i.is_active).count());
    }
    if matching.peek().is_none() {
        return Extracted::Missing;
    }
    // Later active duplicates are not scored.
    match matching.find(|i| i.is_active) {
        Some(item) => Extracted::Text(&item.body),
        None => Extracted::Inactive,
    }
}

/// Keyword entries with no alternative present in `text`.
fn missing_keywords(keywords: &[String], text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    keywords
        .iter()
        .filter(|entry| {
            let mut alternatives = entry
                .split('|')
                .map(|a| a.trim().to_lowercase())
                .filter(|a| !a.is_empty())
                .peekable();
            alternatives.peek().is_some() && !alternatives.any(|a| lower.contains(&a))
        })
        .map(|entry| entry.replace('|', "/"))
        .collect()
}

// ── Special cases ─────────────────────────────────────────────────────────

fn validate_business_hours(field: &ScoreableField, snapshot: &KbSnapshot) -> FieldQualityResult {
    let with_hours = snapshot
        .locations
        .iter()
        .filter(|l| l.is_active && l.has_operating_hours())
        .count();

    if with_hours > 0 {
        let scores = Scores {
            existence: 100,
            quality: 100,
            completeness: 100,
        };
        return build(
            field,
            scores,
            FieldStatus::Complete,
            Vec::new(),
            &Classification::default(),
            0,
            with_hours,
        );
    }

    let issue = Issue::new(
        IssueCode::NoBusinessHours,
        severity_for_absence(field.importance),
        "No active location has opening hours configured",
    )
    .with_suggestion("Add the opening hours of at least one active location.");
    build(
        field,
        Scores::default(),
        FieldStatus::Missing,
        vec![issue],
        &Classification::default(),
        0,
        0,
    )
}

fn validate_count(field: &ScoreableField, count: usize) -> FieldQualityResult {
    let min = field.effective_min_count();
    let ideal = field.ideal_count();

    let existence = if count >= min {
        100
    } else if count > 0 {
        50
    } else {
        0
    };
    let quality = to_score(ramp(count, min, ideal));
    let completeness = to_score((count as f64 / min as f64).min(1.0) * 100.0);

    let mut issues = Vec::new();
    let status = if count == 0 {
        issues.push(missing_issue(field));
        FieldStatus::Missing
    } else {
        if count < min {
            issues.push(
                Issue::new(
                    IssueCode::BelowMinCount,
                    IssueSeverity::Warning,
                    format!("{count} active item(s); at least {min} expected"),
                )
                .with_suggestion(format!("Add {} more.", min - count)),
            );
        } else if count < ideal {
            issues.push(Issue::new(
                IssueCode::BelowIdealCount,
                IssueSeverity::Info,
                format!("{count} active item(s); {ideal} or more is ideal"),
            ));
        }
        FieldStatus::Complete
    };

    build(
        field,
        Scores {
            existence,
            quality,
            completeness,
        },
        status,
        issues,
        &Classification::default(),
        0,
        count,
    )
}

/// Result for a field with no active content.
fn absent(field: &ScoreableField, status: FieldStatus) -> FieldQualityResult {
    let (existence, issue) = match status {
        FieldStatus::Disabled => (
            50,
            Issue::new(
                IssueCode::Disabled,
                severity_for_absence(field.importance),
                "Content exists but is not active",
            )
            .with_suggestion("Activate the item so the assistant can use it."),
        ),
        _ => (0, missing_issue(field)),
    };
    build(
        field,
        Scores {
            existence,
            ..Scores::default()
        },
        status,
        vec![issue],
        &Classification::default(),
        0,
        0,
    )
}

// ── Issues ────────────────────────────────────────────────────────────────

fn severity_for_absence(importance: FieldImportance) -> IssueSeverity {
    match importance {
        FieldImportance::Essential => IssueSeverity::Critical,
        FieldImportance::Recommended | FieldImportance::Optional => IssueSeverity::Warning,
    }
}

fn missing_issue(field: &ScoreableField) -> Issue {
    Issue::new(
        IssueCode::Missing,
        severity_for_absence(field.importance),
        format!("{} is not configured", field.display_label()),
    )
    .with_suggestion(format!("Add {} to the knowledge base.", field.display_label()))
}

fn placeholder_issue(c: &Classification) -> Issue {
    let mut issue = Issue::new(
        IssueCode::PlaceholderContent,
        IssueSeverity::Critical,
        format!("Content looks like placeholder text (confidence {})", c.confidence),
    );
    issue.suggestion = c.suggestions.first().cloned();
    issue
}

fn generic_issue(c: &Classification) -> Issue {
    let mut issue = Issue::new(
        IssueCode::GenericContent,
        IssueSeverity::Warning,
        "Content is generic and says little about this business",
    );
    issue.suggestion = c.suggestions.first().cloned();
    issue
}

// ── Arithmetic ────────────────────────────────────────────────────────────

/// Coerce non-finite values to 0.
pub(crate) fn finite(x: f64) -> f64 {
    if x.is_finite() { x } else { 0.0 }
}

/// Round and clamp to a 0–100 score.
fn to_score(x: f64) -> u32 {
    finite(x).round().clamp(0.0, 100.0) as u32
}

/// 0→70 below `min`, 70→100 from `min` to `ideal`, 100 from `ideal` on.
/// Callers pass `1 <= min <= ideal`.
fn ramp(value: usize, min: usize, ideal: usize) -> f64 {
    let (v, min, ideal) = (value as f64, min.max(1) as f64, ideal.max(min.max(1)) as f64);
    let score = if v >= ideal {
        100.0
    } else if v < min {
        v / min * RAMP_FLOOR
    } else {
        RAMP_FLOOR + (v - min) / (ideal - min) * (100.0 - RAMP_FLOOR)
    };
    finite(score)
}

#[derive(Debug, Default, Clone, Copy)]
struct Scores {
    existence: u32,
    quality: u32,
    completeness: u32,
}

/// Combine sub-scores, derive the final status and assemble the result.
///
/// `status` is the extraction-level status; partial is derived here.
fn build(
    field: &ScoreableField,
    scores: Scores,
    status: FieldStatus,
    issues: Vec<Issue>,
    classification: &Classification,
    content_length: usize,
    item_count: usize,
) -> FieldQualityResult {
    let max = field.effective_weight();
    let field_score = to_score(
        f64::from(scores.existence) * EXISTENCE_WEIGHT
            + f64::from(scores.quality) * QUALITY_WEIGHT
            + f64::from(scores.completeness) * COMPLETENESS_WEIGHT,
    );
    let weighted = finite((f64::from(field_score) / 100.0 * f64::from(max)).round());
    let weighted_score = (weighted.max(0.0) as u32).min(max);

    let status = match status {
        FieldStatus::Complete if field_score < 50 => FieldStatus::Partial,
        other => other,
    };

    FieldQualityResult {
        field_key: field.key.clone(),
        label: field.display_label().to_string(),
        category: field.category.clone(),
        importance: field.importance,
        existence_score: scores.existence,
        quality_score: scores.quality,
        completeness_score: scores.completeness,
        field_score,
        weighted_score,
        max_possible_score: max,
        status,
        issues,
        is_placeholder: classification.is_placeholder,
        is_generic: classification.is_generic,
        content_length,
        item_count,
    }
}
