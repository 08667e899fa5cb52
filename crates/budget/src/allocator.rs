//! Plan-based budget allocation for knowledge-base content.
//!
//! Fits the active content of a snapshot into the token budget a plan
//! leaves for the knowledge base:
//!
//! ```text
//! kb_budget = max(0, plan.max_prompt_tokens − reserved_base_tokens)
//! ```
//!
//! When everything fits it is returned unchanged. Otherwise the budget is
//! split across the five kinds by their configured shares and each kind is
//! filled in priority order:
//!
//! 1. **Instructions** sorted by type priority (identity, forbidden, greeting first)
//! 2. **Policies**
//! 3. **Competitors**
//! 4. **Templates**
//! 5. **Articles** get their share or everything left over, whichever is larger
//!
//! Within a kind items are taken while they fit and filling stops at the
//! first one that does not; smaller items further down are never pulled
//! ahead. Items are kept or dropped whole.
//!
//! # Determinism
//!
//! Identical inputs always produce identical outputs, and truncating
//! already-truncated content changes nothing.

use crate::plan::PlanTable;
use crate::priority::{InstructionPriorities, KIND_PRIORITY};
use crate::token::TokenEstimator;
use kbgauge_config::{AppConfig, KindShares};
use kbgauge_core::{ContentItem, ContentKind, KbContent, PlanLimits};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

// ── Types ─────────────────────────────────────────────────────────────────

/// Statistics for one content kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindStats {
    pub kind: ContentKind,
    /// Sub-budget applied; the whole KB budget when nothing was truncated.
    pub budget: usize,
    pub tokens_used: usize,
    /// Items kept.
    pub kept: usize,
    /// Active items before truncation.
    pub total: usize,
}

/// Items dropped from one kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropInfo {
    pub kind: ContentKind,
    pub items_dropped: usize,
    pub tokens_dropped: usize,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruncationMetadata {
    pub plan_id: String,
    pub max_prompt_tokens: usize,
    pub reserved_base_tokens: usize,
    pub kb_budget: usize,
    pub estimated_tokens_before: usize,
    pub estimated_tokens_after: usize,
    pub was_truncated: bool,
    /// In fill order.
    pub kinds: Vec<KindStats>,
    pub drops: Vec<DropInfo>,
}

impl TruncationMetadata {
    pub fn kind(&self, kind: ContentKind) -> Option<&KindStats> {
        self.kinds.iter().find(|s| s.kind == kind)
    }

    /// Budget utilization percentage (0.0–100.0); 0 for an empty budget.
    pub fn utilization_pct(&self) -> f32 {
        if self.kb_budget == 0 {
            return 0.0;
        }
        self.estimated_tokens_after as f32 / self.kb_budget as f32 * 100.0
    }
}

/// Content that fits the plan budget, plus how it was obtained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruncatedKbContent {
    pub content: KbContent,
    pub metadata: TruncationMetadata,
}

// ── Allocator ─────────────────────────────────────────────────────────────

/// The budget allocator. Stateless; create one and reuse it.
#[derive(Debug, Clone)]
pub struct BudgetAllocator {
    estimator: TokenEstimator,
    shares: KindShares,
    priorities: InstructionPriorities,
    plans: PlanTable,
    reserved_base_tokens: usize,
}

impl BudgetAllocator {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            estimator: TokenEstimator::from_config(&config.budget),
            shares: config.budget.kind_shares.clone(),
            priorities: InstructionPriorities::new(&config.budget.instruction_priority),
            plans: PlanTable::from_config(config),
            reserved_base_tokens: config.budget.reserved_base_tokens,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(&AppConfig::default())
    }

    pub fn estimator(&self) -> &TokenEstimator {
        &self.estimator
    }

    pub fn plans(&self) -> &PlanTable {
        &self.plans
    }

    pub fn reserved_base_tokens(&self) -> usize {
        self.reserved_base_tokens
    }

    /// Fit `content` into the budget of `plan_id`. Unknown plans use the
    /// default limits.
    pub fn truncate_to_budget(&self, content: &KbContent, plan_id: &str) -> TruncatedKbContent {
        self.truncate_with_limits(content, &self.plans.limits(plan_id))
    }

    /// Fit `content` into the budget left by explicit plan limits.
    pub fn truncate_with_limits(
        &self,
        content: &KbContent,
        limits: &PlanLimits,
    ) -> TruncatedKbContent {
        let active = content.active_only();
        let kb_budget = limits.kb_budget(self.reserved_base_tokens);
        let before = self.estimator.estimate_content(&active);

        let metadata = |kinds, drops, after, was_truncated| TruncationMetadata {
            plan_id: limits.plan_id.clone(),
            max_prompt_tokens: limits.max_prompt_tokens,
            reserved_base_tokens: self.reserved_base_tokens,
            kb_budget,
            estimated_tokens_before: before,
            estimated_tokens_after: after,
            was_truncated,
            kinds,
            drops,
        };

        // ── Fast path: everything fits ─────────────────────────────────────
        if before <= kb_budget {
            let kinds = KIND_PRIORITY
                .iter()
                .map(|kind| KindStats {
                    kind: *kind,
                    budget: kb_budget,
                    tokens_used: self.estimator.estimate_items(*kind, active.items(*kind)),
                    kept: active.items(*kind).len(),
                    total: active.items(*kind).len(),
                })
                .collect();
            debug!(plan = %limits.plan_id, before, kb_budget, "Knowledge base fits its budget");
            return TruncatedKbContent {
                content: active,
                metadata: metadata(kinds, Vec::new(), before, false),
            };
        }

        // ── Truncation path ────────────────────────────────────────────────
        let mut out = KbContent::new();
        let mut kinds = Vec::with_capacity(KIND_PRIORITY.len());
        let mut drops = Vec::new();
        let mut used_by_others = 0;

        for kind in KIND_PRIORITY {
            let mut items = active.items(kind).to_vec();
            if kind == ContentKind::Instructions {
                self.priorities.sort(&mut items);
            }

            let share = self.share_budget(kind, kb_budget);
            let budget = if kind == ContentKind::Articles {
                share.max(kb_budget.saturating_sub(used_by_others))
            } else {
                share
            };

            let (kept, stats, dropped) = self.fill(kind, items, budget);
            if kind != ContentKind::Articles {
                used_by_others += stats.tokens_used;
            }
            debug!(
                kind = %kind,
                budget,
                used = stats.tokens_used,
                kept = stats.kept,
                total = stats.total,
                "Filled kind budget"
            );

            out.set_items(kind, kept);
            kinds.push(stats);
            if let Some(d) = dropped {
                drops.push(d);
            }
        }

        let after: usize = kinds.iter().map(|s| s.tokens_used).sum();
        info!(
            plan = %limits.plan_id,
            kb_budget,
            before,
            after,
            dropped = drops.iter().map(|d| d.items_dropped).sum::<usize>(),
            "Truncated knowledge base to plan budget"
        );

        TruncatedKbContent {
            content: out,
            metadata: metadata(kinds, drops, after, true),
        }
    }

    // ── Helpers ────────────────────────────────────────────────────────────

    /// Floor of the kind's proportional share of the KB budget.
    fn share_budget(&self, kind: ContentKind, kb_budget: usize) -> usize {
        let total = u128::from(self.shares.total().max(1));
        let share = u128::from(self.shares.share(kind));
        (kb_budget as u128 * share / total) as usize
    }

    /// Keep items in order while they fit; stop at the first overflow.
    fn fill(
        &self,
        kind: ContentKind,
        items: Vec<ContentItem>,
        budget: usize,
    ) -> (Vec<ContentItem>, KindStats, Option<DropInfo>) {
        let total = items.len();
        let mut used = 0;
        let mut kept = Vec::new();
        let mut overflowed = false;
        let mut dropped = 0;
        let mut dropped_tokens = 0;

        for item in items {
            let cost = self.estimator.estimate_item(kind, &item);
            if !overflowed && used + cost <= budget {
                used += cost;
                kept.push(item);
            } else {
                overflowed = true;
                dropped += 1;
                dropped_tokens += cost;
            }
        }

        let stats = KindStats {
            kind,
            budget,
            tokens_used: used,
            kept: kept.len(),
            total,
        };
        (kept, stats, maybe_drop(kind, dropped, dropped_tokens))
    }
}

impl Default for BudgetAllocator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn maybe_drop(kind: ContentKind, count: usize, tokens: usize) -> Option<DropInfo> {
    if count > 0 {
        Some(DropInfo {
            kind,
            items_dropped: count,
            tokens_dropped: tokens,
            reason: match kind {
                ContentKind::Instructions => "Lowest-priority instruction types dropped".into(),
                _ => "Items past the kind budget dropped".into(),
            },
        })
    } else {
        None
    }
}

/// Truncate with the default configuration.
pub fn truncate_to_budget(content: &KbContent, plan_id: &str) -> TruncatedKbContent {
    BudgetAllocator::with_defaults().truncate_to_budget(content, plan_id)
}

// ── Tests ─────────────────────────────────────────────────────────────────
