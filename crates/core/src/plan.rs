//! Subscription plan limits.
//!
//! The plan table itself is deployment configuration; this module only
//! defines the shape and the budget arithmetic.

use serde::{Deserialize, Serialize};

/// Tokens consumed by the non-KB portion of every prompt.
pub const RESERVED_BASE_TOKENS: usize = 4000;

/// Prompt ceiling used when a plan id is unknown.
pub const DEFAULT_MAX_PROMPT_TOKENS: usize = 6000;

/// Prompt limits for one subscription plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanLimits {
    pub plan_id: String,
    pub max_prompt_tokens: usize,
}

impl PlanLimits {
    pub fn new(plan_id: impl Into<String>, max_prompt_tokens: usize) -> Self {
        Self {
            plan_id: plan_id.into(),
            max_prompt_tokens,
        }
    }

    /// Limits applied to plans nobody configured.
    pub fn default_kb_limits() -> Self {
        Self::new("default", DEFAULT_MAX_PROMPT_TOKENS)
    }

    /// Tokens the knowledge base may occupy, floored at zero.
    pub fn kb_budget(&self, reserved_base_tokens: usize) -> usize {
        self.max_prompt_tokens.saturating_sub(reserved_base_tokens)
    }
}
