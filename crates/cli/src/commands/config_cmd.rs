//! `kbgauge config`: configuration management commands.

use super::{CmdResult, config_file, load_config};
use kbgauge_config::AppConfig;
use kbgauge_quality::FieldCatalog;
use std::path::Path;

pub fn validate(config_path: Option<&Path>) -> CmdResult {
    println!("🔍 Validating configuration...");

    match load_config(config_path) {
        Ok(config) => {
            println!("   ✅ Config parsed successfully");

            let mut warnings = Vec::new();

            if !config.plans.contains_key(&config.default_plan) {
                warnings.push(format!(
                    "Default plan '{}' is not defined; the fallback limits will apply",
                    config.default_plan
                ));
            }

            if !FieldCatalog::is_builtin(&config.scoring.default_vertical) {
                warnings.push(format!(
                    "Default vertical '{}' is not built in; the general catalog will be used",
                    config.scoring.default_vertical
                ));
            }

            for (id, plan) in &config.plans {
                if plan.max_prompt_tokens <= config.budget.reserved_base_tokens {
                    warnings.push(format!(
                        "Plan '{id}' leaves no room for knowledge-base content"
                    ));
                }
            }

            if warnings.is_empty() {
                println!("   ✅ All checks passed");
            } else {
                println!();
                for w in &warnings {
                    println!("   ⚠️  {w}");
                }
            }

            println!();
            println!("   Default plan:      {}", config.default_plan);
            println!("   Plans:             {}", config.plans.len());
            println!("   Reserved tokens:   {}", config.budget.reserved_base_tokens);
            println!("   Chars per token:   {}", config.budget.chars_per_token);
            println!("   Default vertical:  {}", config.scoring.default_vertical);
            println!(
                "   Placeholder at:    {} confidence",
                config.classifier.placeholder_threshold
            );
        }
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e);
        }
    }

    Ok(())
}

pub fn show(config_path: Option<&Path>) -> CmdResult {
    let config = load_config(config_path).map_err(|e| format!("Failed to load config: {e}"))?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

pub fn path(config_path: Option<&Path>) -> CmdResult {
    println!("{}", config_file(config_path).display());
    Ok(())
}

pub async fn init(config_path: Option<&Path>, force: bool) -> CmdResult {
    let path = config_file(config_path);
    if path.exists() && !force {
        println!("  Config file already exists: {}", path.display());
        println!("  Use --force to overwrite it.");
        return Ok(());
    }

    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir).await?;
    }
    tokio::fs::write(&path, AppConfig::default_toml()).await?;
    println!("✅ Wrote default config to {}", path.display());
    Ok(())
}
