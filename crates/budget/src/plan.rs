//! Plan id → prompt limits.

use kbgauge_config::AppConfig;
use kbgauge_core::PlanLimits;
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub struct PlanTable {
    plans: BTreeMap<String, usize>,
    default_limits: PlanLimits,
}

impl PlanTable {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            plans: config
                .plans
                .iter()
                .map(|(id, plan)| (id.clone(), plan.max_prompt_tokens))
                .collect(),
            default_limits: PlanLimits::new(
                PlanLimits::default_kb_limits().plan_id,
                config.default_plan_limits.max_prompt_tokens,
            ),
        }
    }

    pub fn get(&self, plan_id: &str) -> Option<PlanLimits> {
        self.plans
            .get(plan_id)
            .map(|max| PlanLimits::new(plan_id, *max))
    }

    /// Limits for a plan; unknown ids get the default limits.
    pub fn limits(&self, plan_id: &str) -> PlanLimits {
        self.get(plan_id).unwrap_or_else(|| {
            warn!(plan = %plan_id, "Unknown plan, using default prompt limits");
            self.default_limits.clone()
        })
    }

    pub fn default_limits(&self) -> &PlanLimits {
        &self.default_limits
    }

    /// All known plans, by id.
    pub fn iter(&self) -> impl Iterator<Item = PlanLimits> + '_ {
        self.plans
            .iter()
            .map(|(id, max)| PlanLimits::new(id.as_str(), *max))
    }
}

impl Default for PlanTable {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}
