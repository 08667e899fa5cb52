//! Priority tables used when content must be dropped.

use kbgauge_core::{ContentItem, ContentKind};
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Kinds in the order their sub-budgets are filled. Articles come last and
/// absorb whatever the others leave unused.
pub const KIND_PRIORITY: [ContentKind; 5] = [
    ContentKind::Instructions,
    ContentKind::Policies,
    ContentKind::Competitors,
    ContentKind::Templates,
    ContentKind::Articles,
];

/// Built-in instruction type priorities; higher survives longer.
pub const INSTRUCTION_TYPE_PRIORITY: &[(&str, u32)] = &[
    ("identity", 100),
    ("forbidden", 95),
    ("greeting", 90),
    ("tone", 70),
    ("escalation", 65),
    ("business_info", 60),
    ("response_style", 50),
    ("custom", 30),
    ("upsell", 20),
    ("tone_examples", 10),
];

/// Priority of instruction types missing from the table.
pub const UNLISTED_INSTRUCTION_PRIORITY: u32 = 40;

/// Instruction type → priority, built-ins merged with overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionPriorities {
    table: BTreeMap<String, u32>,
}

impl InstructionPriorities {
    pub fn new(overrides: &BTreeMap<String, u32>) -> Self {
        let mut table: BTreeMap<String, u32> = INSTRUCTION_TYPE_PRIORITY
            .iter()
            .map(|(t, p)| ((*t).to_string(), *p))
            .collect();
        for (t, p) in overrides {
            table.insert(t.trim().to_lowercase(), *p);
        }
        Self { table }
    }

    pub fn priority(&self, item_type: &str) -> u32 {
        self.table
            .get(&item_type.trim().to_lowercase())
            .copied()
            .unwrap_or(UNLISTED_INSTRUCTION_PRIORITY)
    }

    /// Highest priority first; equal priorities keep their input order.
    pub fn sort(&self, items: &mut [ContentItem]) {
        items.sort_by_key(|item| Reverse(self.priority(&item.item_type)));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.table.iter().map(|(t, p)| (t.as_str(), *p))
    }
}

impl Default for InstructionPriorities {
    fn default() -> Self {
        Self::new(&BTreeMap::new())
    }
}
