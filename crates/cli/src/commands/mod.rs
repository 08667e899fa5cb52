//! Command implementations and the helpers they share.

pub mod catalog;
pub mod classify;
pub mod config_cmd;
pub mod plans;
pub mod score;
pub mod truncate;

use chrono::{DateTime, Utc};
use kbgauge_config::AppConfig;
use kbgauge_core::KbSnapshot;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tracing::debug;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Load from an explicit file, or the default location with env overrides.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    Ok(config)
}

pub fn config_file(path: Option<&Path>) -> PathBuf {
    path.map(Path::to_path_buf)
        .unwrap_or_else(|| AppConfig::config_dir().join("config.toml"))
}

/// Read a snapshot from a JSON file, or stdin for `-`.
pub async fn read_snapshot(path: &Path) -> Result<KbSnapshot, Box<dyn std::error::Error>> {
    let raw = if path == Path::new("-") {
        let mut raw = String::new();
        tokio::io::stdin().read_to_string(&mut raw).await?;
        raw
    } else {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read snapshot {}: {e}", path.display()))?
    };
    let snapshot = KbSnapshot::from_json(&raw)?;
    debug!(
        path = %path.display(),
        items = snapshot.content.len(),
        locations = snapshot.locations.len(),
        "Loaded snapshot"
    );
    Ok(snapshot)
}

#[derive(Serialize)]
struct Envelope<'a, T> {
    command: &'a str,
    generated_at: DateTime<Utc>,
    result: &'a T,
}

/// Print a command result as pretty JSON with a timestamp.
pub fn print_json<T: Serialize>(command: &str, result: &T) -> CmdResult {
    let envelope = Envelope {
        command,
        generated_at: Utc::now(),
        result,
    };
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_config_file_wins() {
        let path = Path::new("/tmp/kbgauge-test.toml");
        assert_eq!(config_file(Some(path)), path);
        assert!(config_file(None).ends_with("config.toml"));
    }

    #[test]
    fn envelope_has_timestamp() {
        let envelope = Envelope {
            command: "plans",
            generated_at: Utc::now(),
            result: &vec![1, 2],
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["command"], "plans");
        assert!(json["generated_at"].is_string());
        assert_eq!(json["result"], serde_json::json!([1, 2]));
    }

    #[tokio::test]
    async fn missing_snapshot_file_is_an_error() {
        let err = read_snapshot(Path::new("/definitely/not/here.json"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read snapshot"));
    }
}
