//! # kbgauge core
//!
//! Domain types shared by the scoring and budgeting pipelines: the
//! read-only knowledge-base snapshot a tenant hands us per request, the
//! declarative field descriptors that say what "good" content looks like,
//! and the plan limits that bound prompt size.
//!
//! Nothing here performs I/O. Snapshots are parsed from JSON at the edges
//! and every downstream computation borrows them immutably, so one snapshot
//! can be scored and truncated from several threads at once.

pub mod category;
pub mod content;
pub mod error;
pub mod field;
pub mod plan;

pub use content::{ContentItem, ContentKind, KbContent, KbSnapshot, Location};
pub use error::{Error, Result};
pub use field::{DataSource, FieldImportance, ScoreableField};
pub use plan::PlanLimits;
