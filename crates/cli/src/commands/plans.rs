//! `kbgauge plans`: list plans and their knowledge-base budgets.

use super::{CmdResult, load_config};
use kbgauge_budget::BudgetAllocator;
use std::path::Path;

pub fn run(config_path: Option<&Path>) -> CmdResult {
    let config = load_config(config_path)?;
    let allocator = BudgetAllocator::new(&config);
    let reserved = allocator.reserved_base_tokens();

    println!("📦 Plans (reserved base tokens: {reserved})");
    println!("─────────────────────────────────────────────");
    println!("  {:<16} {:>12} {:>12}", "Plan", "Max prompt", "KB budget");
    for plan in allocator.plans().iter() {
        let marker = if plan.plan_id == config.default_plan { "*" } else { " " };
        println!(
            "{marker} {:<16} {:>12} {:>12}",
            plan.plan_id,
            plan.max_prompt_tokens,
            plan.kb_budget(reserved)
        );
    }

    let fallback = allocator.plans().default_limits();
    println!();
    println!(
        "  Unknown plans use {} max prompt tokens ({} for the knowledge base).",
        fallback.max_prompt_tokens,
        fallback.kb_budget(reserved)
    );
    println!("  * default plan");
    Ok(())
}
