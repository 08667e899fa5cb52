//! `KbScorer`: catalog → validator → aggregator in one call.

use crate::aggregator::ScoreAggregator;
use crate::catalog::FieldCatalog;
use crate::classifier::ContentClassifier;
use crate::model::KbScoringResult;
use crate::validator::FieldValidator;
use kbgauge_config::{AppConfig, ScoringConfig};
use kbgauge_core::KbSnapshot;
use tracing::info;

/// Scores snapshots against vertical catalogs.
///
/// Holds the compiled classifier, so build it once and reuse it for every
/// tenant.
pub struct KbScorer {
    classifier: ContentClassifier,
    scoring: ScoringConfig,
}

impl KbScorer {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            classifier: ContentClassifier::new(config.classifier.clone()),
            scoring: config.scoring.clone(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(&AppConfig::default())
    }

    pub fn classifier(&self) -> &ContentClassifier {
        &self.classifier
    }

    /// Score a snapshot; `None` uses the configured default vertical.
    pub fn score(&self, snapshot: &KbSnapshot, vertical: Option<&str>) -> KbScoringResult {
        let vertical = vertical.unwrap_or(&self.scoring.default_vertical);
        self.score_fields(snapshot, &FieldCatalog::for_vertical(vertical))
    }

    /// Score a snapshot against an explicit catalog.
    pub fn score_fields(&self, snapshot: &KbSnapshot, catalog: &FieldCatalog) -> KbScoringResult {
        let validator = FieldValidator::new(&self.classifier, self.scoring.generic_penalty);
        let fields: Vec<_> = catalog
            .fields
            .iter()
            .map(|field| validator.validate(field, snapshot))
            .collect();

        let aggregate = ScoreAggregator::new(&self.scoring).aggregate(&fields);

        info!(
            vertical = %catalog.vertical,
            total_score = aggregate.total_score,
            fields = fields.len(),
            recommendations = aggregate.recommendations.len(),
            "Scored knowledge base"
        );

        KbScoringResult {
            vertical: catalog.vertical.clone(),
            total_score: aggregate.total_score,
            categories: aggregate.categories,
            fields,
            summary: aggregate.summary,
            recommendations: aggregate.recommendations,
        }
    }
}

impl Default for KbScorer {
    fn default() -> Self {
        Self::with_defaults()
    }
}
