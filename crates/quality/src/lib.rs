//! Knowledge-base quality scoring.
//!
//! Three layers, each usable on its own:
//!
//! - [`ContentClassifier`]: flags placeholder and generic text
//! - [`FieldValidator`]: scores one [`ScoreableField`](kbgauge_core::ScoreableField) against a snapshot
//! - [`ScoreAggregator`]: folds field results into category scores, a total and recommendations
//!
//! [`KbScorer`] wires them together with a vertical [`FieldCatalog`].
//! All scoring is pure and synchronous.

pub mod aggregator;
pub mod catalog;
pub mod classifier;
pub mod model;
pub mod patterns;
pub mod scorer;
pub mod validator;

pub use aggregator::{Aggregate, ScoreAggregator};
pub use catalog::FieldCatalog;
pub use classifier::{Classification, ContentClassifier};
pub use model::{
    CategoryScore, FieldQualityResult, FieldStatus, Issue, IssueCode, IssueSeverity,
    KbScoringResult, Recommendation, RecommendationPriority, ScoringSummary,
};
pub use scorer::KbScorer;
pub use validator::FieldValidator;
