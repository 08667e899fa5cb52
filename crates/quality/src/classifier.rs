//! Placeholder and generic-content classifier.
//!
//! Decides whether a single text value is filler ("test", "asdf", "[insert
//! policy here]"), generic boilerplate ("We offer the best products") or
//! acceptable business content.
//!
//! # Tiers
//!
//! | Tier | Examples | Confidence |
//! |------|----------|------------|
//! | Critical | exact "test", lorem ipsum, bracket placeholders | 100, short-circuits |
//! | High | very short text, keyboard mash, lone generic word | 85 |
//! | Structural | `aaaa`, `jajaja`, vowel-less strings, keyboard rows | 70–80 |
//! | Suspicious | "coming soon", borderline short text | 60 |
//!
//! The final confidence is the maximum over every matched rule; content is
//! a placeholder when it reaches the configured threshold (70 by default).
//! Genericity is only evaluated for content that is not a placeholder.

use crate::patterns;
use kbgauge_config::ClassifierConfig;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

const CRITICAL_CONFIDENCE: u8 = 100;
const HIGH_CONFIDENCE: u8 = 85;
const REPEATED_CHAR_CONFIDENCE: u8 = 80;
const KEYBOARD_CONFIDENCE: u8 = 75;
const REPEATED_PAIR_CONFIDENCE: u8 = 70;
const SUSPICIOUS_CONFIDENCE: u8 = 60;

/// Below this many characters text is too short to mean anything.
const VERY_SHORT_CHARS: usize = 5;
/// Below this many characters text is borderline.
const SHORT_CHARS: usize = 15;

const PLACEHOLDER_SUGGESTION: &str =
    "Replace the test or placeholder text with real information about your business.";
const FILLER_SUGGESTION: &str =
    "Remove filler characters and write a complete sentence the assistant can use.";
const GENERIC_SUGGESTION: &str = "Personalize this content with concrete details: names, prices, schedules, locations or contact data.";
const VAGUE_SUGGESTION: &str =
    "Replace vague words like \"etc.\" or \"depends\" with the actual cases and conditions.";

/// Outcome of classifying one text value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub is_placeholder: bool,
    pub is_generic: bool,
    /// Placeholder confidence, 0–100.
    pub confidence: u8,
    /// Names of every rule that matched, prefixed with their tier.
    pub matched_patterns: Vec<String>,
    pub suggestions: Vec<String>,
}

impl Classification {
    fn placeholder(confidence: u8, matched: Vec<String>) -> Self {
        Self {
            is_placeholder: true,
            is_generic: false,
            confidence,
            matched_patterns: matched,
            suggestions: vec![PLACEHOLDER_SUGGESTION.into()],
        }
    }
}

struct Rule {
    name: &'static str,
    regex: Regex,
}

/// Compile a pattern table. Invalid patterns are logged and skipped so a
/// bad table entry degrades one rule instead of the whole classifier.
fn compile(table: &[(&'static str, &'static str)]) -> Vec<Rule> {
    table
        .iter()
        .filter_map(|&(name, pattern)| match Regex::new(pattern) {
            Ok(regex) => Some(Rule { name, regex }),
            Err(e) => {
                warn!(rule = name, error = %e, "Skipping classifier rule that does not compile");
                None
            }
        })
        .collect()
}

/// Stateless once built; share one instance across threads.
pub struct ContentClassifier {
    config: ClassifierConfig,
    critical: Vec<Rule>,
    high: Vec<Rule>,
    suspicious: Vec<Rule>,
    generic: Vec<Rule>,
    specificity: Vec<Rule>,
}

impl ContentClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            critical: compile(patterns::CRITICAL_PATTERNS),
            high: compile(patterns::HIGH_PATTERNS),
            suspicious: compile(patterns::SUSPICIOUS_PATTERNS),
            generic: compile(patterns::GENERIC_PATTERNS),
            specificity: compile(patterns::SPECIFICITY_PATTERNS),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(ClassifierConfig::default())
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify an optional value; `None` is treated like empty text.
    pub fn classify_opt(&self, text: Option<&str>) -> Classification {
        self.classify(text.unwrap_or_default())
    }

    /// Classify a text value.
    pub fn classify(&self, text: &str) -> Classification {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Classification::placeholder(CRITICAL_CONFIDENCE, vec!["critical:empty".into()]);
        }

        let lower = trimmed.to_lowercase();
        let char_len = trimmed.chars().count();

        // ── Critical tier: certain filler, stop here ──────────────────────
        let critical: Vec<String> = self
            .critical
            .iter()
            .filter(|r| r.regex.is_match(&lower))
            .map(|r| format!("critical:{}", r.name))
            .collect();
        if !critical.is_empty() {
            return Classification::placeholder(CRITICAL_CONFIDENCE, critical);
        }

        let mut confidence = 0u8;
        let mut matched = Vec::new();
        let mut hit = |name: String, score: u8| {
            confidence = confidence.max(score);
            matched.push(name);
        };

        // ── High tier ─────────────────────────────────────────────────────
        if char_len < VERY_SHORT_CHARS {
            hit("high:very_short".into(), HIGH_CONFIDENCE);
        }
        for rule in self.high.iter().filter(|r| r.regex.is_match(&lower)) {
            hit(format!("high:{}", rule.name), HIGH_CONFIDENCE);
        }

        // ── Suspicious tier ───────────────────────────────────────────────
        if (VERY_SHORT_CHARS..SHORT_CHARS).contains(&char_len) {
            hit("suspicious:short_text".into(), SUSPICIOUS_CONFIDENCE);
        }
        for rule in self.suspicious.iter().filter(|r| r.regex.is_match(&lower)) {
            hit(format!("suspicious:{}", rule.name), SUSPICIOUS_CONFIDENCE);
        }

        // ── Structural checks ─────────────────────────────────────────────
        let letters: Vec<char> = lower.chars().filter(|c| c.is_alphabetic()).collect();
        if has_identical_run(&lower, 4) {
            hit("structural:repeated_char".into(), REPEATED_CHAR_CONFIDENCE);
        }
        if has_repeated_pair(&lower, 6) {
            hit("structural:repeated_pair".into(), REPEATED_PAIR_CONFIDENCE);
        }
        if char_len <= self.config.keyboard_max_length && vowel_ratio(&letters) < 0.10 {
            hit("structural:low_vowel_ratio".into(), KEYBOARD_CONFIDENCE);
        }
        if patterns::KEYBOARD_ROWS.iter().any(|row| lower.contains(row)) {
            hit("structural:keyboard_row".into(), KEYBOARD_CONFIDENCE);
        }

        let is_placeholder = confidence >= self.config.placeholder_threshold;
        if is_placeholder {
            let mut result = Classification::placeholder(confidence, matched);
            if result.matched_patterns.iter().any(|m| m.starts_with("structural:")) {
                result.suggestions.push(FILLER_SUGGESTION.into());
            }
            return result;
        }

        // ── Genericity ────────────────────────────────────────────────────
        let mut suggestions = Vec::new();
        let mut is_generic = false;

        for rule in self.generic.iter().filter(|r| r.regex.is_match(&lower)) {
            matched.push(format!("generic:{}", rule.name));
            is_generic = true;
        }

        let vague = count_vague_indicators(&lower);
        if vague >= 2 && char_len < self.config.vague_max_length {
            matched.push(format!("generic:vague_words({vague})"));
            suggestions.push(VAGUE_SUGGESTION.to_string());
            is_generic = true;
        }

        if char_len > self.config.specificity_min_length
            && !self.specificity.iter().any(|r| r.regex.is_match(&lower))
        {
            let meaningful = count_meaningful_words(trimmed);
            if meaningful < self.config.min_meaningful_words {
                matched.push(format!("generic:unspecific({meaningful})"));
                is_generic = true;
            }
        }

        if is_generic {
            suggestions.insert(0, GENERIC_SUGGESTION.to_string());
        }

        Classification {
            is_placeholder: false,
            is_generic,
            confidence,
            matched_patterns: matched,
            suggestions,
        }
    }
}

impl Default for ContentClassifier {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ── Heuristics ────────────────────────────────────────────────────────────

/// A run of `min_run` identical letters (`aaaa`).
fn has_identical_run(text: &str, min_run: usize) -> bool {
    let mut run = 0;
    let mut prev: Option<char> = None;
    for c in text.chars() {
        if c.is_alphabetic() && Some(c) == prev {
            run += 1;
        } else {
            run = 1;
        }
        if c.is_alphabetic() && run >= min_run {
            return true;
        }
        prev = Some(c);
    }
    false
}

/// Two distinct letters alternating for at least `min_span` characters
/// (`jajaja`, `ababab`).
fn has_repeated_pair(text: &str, min_span: usize) -> bool {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() < min_span {
        return false;
    }
    chars.windows(min_span).any(|w| {
        w[0] != w[1]
            && w.iter().all(|c| c.is_alphabetic())
            && w.iter().enumerate().all(|(i, c)| *c == w[i % 2])
    })
}

/// Share of vowels among letters; text without letters is not judged.
fn vowel_ratio(letters: &[char]) -> f64 {
    if letters.is_empty() {
        return 1.0;
    }
    let vowels = letters.iter().filter(|c| patterns::VOWELS.contains(*c)).count();
    vowels as f64 / letters.len() as f64
}

fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
}

/// Distinct vague words and phrases present in lowercased text.
fn count_vague_indicators(lower: &str) -> usize {
    let mut seen: Vec<&str> = words(lower)
        .filter(|w| patterns::VAGUE_WORDS.contains(w))
        .collect();
    seen.sort_unstable();
    seen.dedup();
    let phrases = patterns::VAGUE_PHRASES
        .iter()
        .filter(|p| lower.contains(*p))
        .count();
    seen.len() + phrases
}

/// Capitalized words of three or more letters that are not stopwords.
fn count_meaningful_words(text: &str) -> usize {
    words(text)
        .filter(|w| w.chars().next().is_some_and(char::is_uppercase))
        .filter(|w| w.chars().count() >= 3)
        .filter(|w| !patterns::STOPWORDS.contains(&w.to_lowercase().as_str()))
        .count()
}
