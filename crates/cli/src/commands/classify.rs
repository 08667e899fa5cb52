//! `kbgauge classify`: run the placeholder/generic classifier on text.

use super::{CmdResult, load_config, print_json};
use kbgauge_quality::{Classification, ContentClassifier};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct ClassifiedText<'a> {
    text: &'a str,
    #[serde(flatten)]
    classification: Classification,
}

pub fn run(config_path: Option<&Path>, texts: &[String], json: bool) -> CmdResult {
    let config = load_config(config_path)?;
    let classifier = ContentClassifier::new(config.classifier);

    let results: Vec<ClassifiedText<'_>> = texts
        .iter()
        .map(|text| ClassifiedText {
            text,
            classification: classifier.classify(text),
        })
        .collect();

    if json {
        return print_json("classify", &results);
    }

    for r in &results {
        let c = &r.classification;
        let verdict = if c.is_placeholder {
            format!("🧪 placeholder (confidence {})", c.confidence)
        } else if c.is_generic {
            "⚠️  generic".to_string()
        } else {
            "✅ acceptable".to_string()
        };
        println!("{:?}", r.text);
        println!("   {verdict}");
        if !c.matched_patterns.is_empty() {
            println!("   matched: {}", c.matched_patterns.join(", "));
        }
        for s in &c.suggestions {
            println!("   → {s}");
        }
    }
    Ok(())
}
