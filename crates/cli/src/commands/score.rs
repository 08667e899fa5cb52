//! `kbgauge score`: score a snapshot against a vertical catalog.

use super::{CmdResult, load_config, print_json, read_snapshot};
use kbgauge_quality::{FieldCatalog, FieldStatus, KbScorer, KbScoringResult};
use std::path::Path;

/// Recommendations shown in the text report.
const TOP_RECOMMENDATIONS: usize = 10;

pub async fn run(
    config_path: Option<&Path>,
    snapshot_path: &Path,
    vertical: Option<String>,
    catalog_path: Option<&Path>,
    json: bool,
) -> CmdResult {
    let config = load_config(config_path)?;
    let snapshot = read_snapshot(snapshot_path).await?;
    let scorer = KbScorer::new(&config);

    let result = match catalog_path {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .map_err(|e| format!("Failed to read catalog {}: {e}", path.display()))?;
            let catalog = FieldCatalog::from_toml(&raw)?;
            scorer.score_fields(&snapshot, &catalog)
        }
        None => scorer.score(&snapshot, vertical.as_deref()),
    };

    if json {
        return print_json("score", &result);
    }
    print_report(&result);
    Ok(())
}

fn status_icon(status: FieldStatus) -> &'static str {
    match status {
        FieldStatus::Complete => "✅",
        FieldStatus::Partial => "🟡",
        FieldStatus::Missing => "❌",
        FieldStatus::Disabled => "⏸️ ",
        FieldStatus::Placeholder => "🧪",
    }
}

fn print_report(result: &KbScoringResult) {
    println!(
        "📊 Knowledge Base Score: {}/100  (vertical: {})",
        result.total_score, result.vertical
    );
    println!("─────────────────────────────────────────────────────");

    println!("{:<16} {:>7} {:>8} {:>10}", "Category", "Weight", "Score", "Complete");
    for c in &result.categories {
        println!(
            "{:<16} {:>6.0}% {:>8} {:>10}",
            c.category,
            c.weight,
            format!("{}/100", c.score),
            format!("{}/{}", c.completed_fields, c.total_fields)
        );
    }

    println!();
    println!("Fields:");
    for f in &result.fields {
        println!(
            "  {} {:<28} {:>3}/{:<3} {}",
            status_icon(f.status),
            f.label,
            f.weighted_score,
            f.max_possible_score,
            f.status
        );
    }

    let s = &result.summary;
    println!();
    println!(
        "  {} fields · {} completed · {} missing · {} placeholder · {} generic · {}/{} points",
        s.total_fields,
        s.completed_fields,
        s.missing_fields,
        s.placeholder_fields,
        s.generic_fields,
        s.earned_points,
        s.possible_points
    );

    if result.recommendations.is_empty() {
        println!("\n  ✅ Nothing left to improve");
        return;
    }

    println!();
    println!("Recommendations:");
    for r in result.recommendations.iter().take(TOP_RECOMMENDATIONS) {
        println!("  [{:<8}] {} (+{})", r.priority.as_str(), r.message, r.potential_gain);
        if let Some(suggestion) = &r.suggestion {
            println!("             → {suggestion}");
        }
    }
    if result.recommendations.len() > TOP_RECOMMENDATIONS {
        println!(
            "  … and {} more (use --json for the full list)",
            result.recommendations.len() - TOP_RECOMMENDATIONS
        );
    }
}
