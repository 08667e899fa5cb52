//! Token estimation and plan-based budget truncation.
//!
//! [`BudgetAllocator`] decides which knowledge-base items fit the prompt
//! budget of a subscription plan; [`format`] renders the survivors exactly
//! as the [`TokenEstimator`] measured them.

pub mod allocator;
pub mod format;
pub mod plan;
pub mod priority;
pub mod token;

pub use allocator::{
    BudgetAllocator, DropInfo, KindStats, TruncatedKbContent, TruncationMetadata,
    truncate_to_budget,
};
pub use format::{format_item, render_prompt_sections};
pub use plan::PlanTable;
pub use priority::{InstructionPriorities, KIND_PRIORITY};
pub use token::TokenEstimator;
