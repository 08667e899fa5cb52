//! `kbgauge catalog`: show the fields scored for a vertical.

use super::{CmdResult, load_config, print_json};
use kbgauge_quality::FieldCatalog;
use std::path::Path;

pub fn run(config_path: Option<&Path>, vertical: Option<String>, json: bool) -> CmdResult {
    let config = load_config(config_path)?;
    let vertical = vertical.unwrap_or_else(|| config.scoring.default_vertical.clone());
    let catalog = FieldCatalog::for_vertical(&vertical);

    if json {
        return print_json("catalog", &catalog);
    }

    println!("🗂️  Field catalog: {}", catalog.vertical);
    println!("─────────────────────────────────────────────────────");
    for category in catalog.categories() {
        println!(
            "{category} ({:.0}% of total)",
            config.scoring.category_weight(category)
        );
        for f in catalog.fields.iter().filter(|f| f.category == category) {
            let shape = if f.count_based {
                format!("≥{} items", f.effective_min_count())
            } else {
                format!("{}–{} chars", f.effective_min_length(), f.effective_ideal_length())
            };
            let source = serde_json::to_value(f.data_source)?;
            println!(
                "  {:<24} {:>3} pts  {:<13} {:<14} {:?}",
                f.key,
                f.weight,
                source.as_str().unwrap_or_default(),
                shape,
                f.importance
            );
        }
    }

    println!();
    let verticals: Vec<&str> = FieldCatalog::verticals().collect();
    println!("  Built-in verticals: {}", verticals.join(", "));
    Ok(())
}
