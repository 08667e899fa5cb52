//! `kbgauge truncate`: fit a snapshot into a plan's prompt budget.

use super::{CmdResult, load_config, print_json, read_snapshot};
use kbgauge_budget::{BudgetAllocator, TruncatedKbContent, render_prompt_sections};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct TruncateOutput<'a> {
    #[serde(flatten)]
    truncated: &'a TruncatedKbContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    prompt: Option<String>,
}

pub async fn run(
    config_path: Option<&Path>,
    snapshot_path: &Path,
    plan: Option<String>,
    render: bool,
    json: bool,
) -> CmdResult {
    let config = load_config(config_path)?;
    let snapshot = read_snapshot(snapshot_path).await?;
    let plan_id = plan.unwrap_or_else(|| config.default_plan.clone());

    let allocator = BudgetAllocator::new(&config);
    let truncated = allocator.truncate_to_budget(&snapshot.content, &plan_id);
    let prompt = render.then(|| render_prompt_sections(&truncated.content));

    if json {
        return print_json(
            "truncate",
            &TruncateOutput {
                truncated: &truncated,
                prompt,
            },
        );
    }

    let m = &truncated.metadata;
    println!("✂️  Budget for plan '{}'", m.plan_id);
    println!("─────────────────────────────────────────────────────");
    println!(
        "  Max prompt: {}  Reserved: {}  KB budget: {}",
        m.max_prompt_tokens, m.reserved_base_tokens, m.kb_budget
    );
    println!(
        "  Estimated tokens: {} → {} ({:.1}% of budget)",
        m.estimated_tokens_before,
        m.estimated_tokens_after,
        m.utilization_pct()
    );
    println!(
        "  Truncated: {}",
        if m.was_truncated { "yes" } else { "no" }
    );

    println!();
    println!("{:<14} {:>8} {:>8} {:>10}", "Kind", "Budget", "Used", "Kept");
    for k in &m.kinds {
        println!(
            "{:<14} {:>8} {:>8} {:>10}",
            k.kind.as_str(),
            k.budget,
            k.tokens_used,
            format!("{}/{}", k.kept, k.total)
        );
    }

    if !m.drops.is_empty() {
        println!();
        for d in &m.drops {
            println!(
                "  ⚠️  {}: dropped {} item(s), ~{} tokens ({})",
                d.kind, d.items_dropped, d.tokens_dropped, d.reason
            );
        }
    }

    if let Some(prompt) = prompt {
        println!();
        if prompt.is_empty() {
            println!("(no knowledge-base content fits this plan)");
        } else {
            print!("{prompt}");
        }
    }

    Ok(())
}
