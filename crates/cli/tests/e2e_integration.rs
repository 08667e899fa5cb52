//! End-to-end tests for the kbgauge pipeline.
//!
//! These exercise the full path a request takes: snapshot JSON in, scoring
//! report or budget-fitted prompt content out, with configuration loaded
//! from disk the way the CLI does it.

use kbgauge_budget::{BudgetAllocator, render_prompt_sections};
use kbgauge_config::AppConfig;
use kbgauge_core::{ContentKind, KbSnapshot};
use kbgauge_quality::{FieldStatus, KbScorer, RecommendationPriority};

// ── Fixtures ─────────────────────────────────────────────────────────────

const RICH_SNAPSHOT: &str = r#"{
  "instructions": [
    {"id": "i1", "type": "identity", "title": "Who we are",
     "body": "Panadería Los Olivos is a family bakery in Puebla founded in 1998. We bake sourdough, conchas and custom cakes every morning at Av. Reforma 221."},
    {"id": "i2", "type": "tone", "title": "Tone",
     "body": "Warm and brief. Use the customer's first name and answer in Spanish unless they write in English."},
    {"id": "i3", "type": "upsell", "title": "Old upsell", "body": "Offer coffee with every cake order.", "is_active": false}
  ],
  "policies": [
    {"id": "p1", "type": "refund", "title": "Refunds",
     "body": "Custom cake orders can be refunded in full up to 3 days before pickup. After that we refund 50% of the order, and same-day cancellations are not refunded. Refunds go back to the original card within 5 business days of approval."},
    {"id": "p2", "type": "payment", "title": "Payment",
     "body": "We accept cash, debit and credit card, and bank transfer for orders above 500 MXN."}
  ],
  "articles": [
    {"id": "a1", "type": "faq", "title": "Do you deliver?", "body": "Yes, within 5 km of the shop for orders over 300 MXN."},
    {"id": "a2", "type": "faq", "title": "Gluten free?", "body": "We bake gluten-free brownies on Fridays only."},
    {"id": "a3", "type": "faq", "title": "Parking", "body": "There are four spots behind the shop on Calle 5 Sur."}
  ],
  "templates": [
    {"id": "t1", "type": "greeting", "title": "Hello",
     "body": "Hola! Welcome to Los Olivos, what can we bake for you today?"}
  ],
  "competitors": [],
  "locations": [
    {"id": "l1", "name": "Centro", "is_active": true,
     "operating_hours": {"mon": "07:00-20:00", "sun": null}}
  ]
}"#;

fn many_articles(n: usize) -> KbSnapshot {
    let mut snapshot = KbSnapshot::from_json(RICH_SNAPSHOT).unwrap();
    snapshot.content.articles = (0..n)
        .map(|i| {
            kbgauge_core::ContentItem::new(
                format!("faq-{i}"),
                "faq",
                format!("Question {i}"),
                "Answer with enough words to cost a handful of tokens each time.",
            )
        })
        .collect();
    snapshot
}

fn write_config(toml: &str) -> (tempfile::TempDir, AppConfig) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, toml).unwrap();
    let config = AppConfig::load_from(&path).unwrap();
    (dir, config)
}

// ── Scoring ──────────────────────────────────────────────────────────────

#[test]
fn e2e_empty_snapshot_scores_zero_with_critical_recommendations() {
    let snapshot = KbSnapshot::from_json("{}").unwrap();
    let result = KbScorer::with_defaults().score(&snapshot, None);

    assert_eq!(result.vertical, "general");
    assert_eq!(result.total_score, 0);
    assert_eq!(result.summary.missing_fields, result.summary.total_fields);
    assert_eq!(result.summary.earned_points, 0);

    let first = &result.recommendations[0];
    assert_eq!(first.priority, RecommendationPriority::Critical);
    assert!(
        result
            .recommendations
            .windows(2)
            .all(|w| w[0].priority <= w[1].priority)
    );
}

#[test]
fn e2e_rich_snapshot_scores_better_than_empty() {
    let snapshot = KbSnapshot::from_json(RICH_SNAPSHOT).unwrap();
    let result = KbScorer::with_defaults().score(&snapshot, Some("general"));

    assert!(result.total_score > 30, "score was {}", result.total_score);
    assert!(result.total_score <= 100);

    let field = |key: &str| result.fields.iter().find(|f| f.field_key == key).unwrap();
    assert_eq!(field("business_hours").status, FieldStatus::Complete);
    assert_eq!(field("faq_articles").item_count, 3);
    assert_eq!(field("shipping_policy").status, FieldStatus::Missing);
    // Inactive upsell instruction.
    assert_eq!(field("upsell_instructions").status, FieldStatus::Disabled);

    for f in &result.fields {
        assert!(f.weighted_score <= f.max_possible_score, "{}", f.field_key);
    }
    let earned: u32 = result.categories.iter().map(|c| c.earned_points).sum();
    assert_eq!(earned, result.summary.earned_points);
}

#[test]
fn e2e_placeholder_identity_is_flagged_first() {
    let json = RICH_SNAPSHOT.replace(
        "Panadería Los Olivos is a family bakery in Puebla founded in 1998. We bake sourdough, conchas and custom cakes every morning at Av. Reforma 221.",
        "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor.",
    );
    let snapshot = KbSnapshot::from_json(&json).unwrap();
    let result = KbScorer::with_defaults().score(&snapshot, None);

    let identity = result
        .fields
        .iter()
        .find(|f| f.field_key == "business_identity")
        .unwrap();
    assert_eq!(identity.status, FieldStatus::Placeholder);
    assert!(identity.is_placeholder);

    let rec = result
        .recommendations
        .iter()
        .find(|r| r.field_key == "business_identity")
        .unwrap();
    assert_eq!(rec.priority, RecommendationPriority::Critical);
}

#[test]
fn e2e_unknown_vertical_falls_back_to_general() {
    let snapshot = KbSnapshot::from_json(RICH_SNAPSHOT).unwrap();
    let scorer = KbScorer::with_defaults();
    let general = scorer.score(&snapshot, Some("general"));
    let unknown = scorer.score(&snapshot, Some("spaceship_repair"));
    assert_eq!(unknown.vertical, "general");
    assert_eq!(unknown.total_score, general.total_score);

    let restaurant = scorer.score(&snapshot, Some("Restaurant"));
    assert_eq!(restaurant.vertical, "restaurant");
    assert!(restaurant.fields.len() > general.fields.len());
}

// ── Budget ───────────────────────────────────────────────────────────────

#[test]
fn e2e_large_plan_keeps_all_active_content() {
    let snapshot = KbSnapshot::from_json(RICH_SNAPSHOT).unwrap();
    let allocator = BudgetAllocator::with_defaults();
    let out = allocator.truncate_to_budget(&snapshot.content, "enterprise");

    assert!(!out.metadata.was_truncated);
    assert!(out.metadata.drops.is_empty());
    assert_eq!(out.content, snapshot.content.active_only());

    let prompt = render_prompt_sections(&out.content);
    assert!(prompt.starts_with("[Business Instructions]\n[IDENTITY] Who we are: "));
    assert!(prompt.contains("[POLICY:REFUND] Refunds: "));
    assert!(prompt.contains("[TEMPLATE:GREETING] Hello: "));
    assert!(!prompt.contains("Old upsell"));
    assert!(!prompt.contains("[Competitor Notes]"));
}

#[test]
fn e2e_configured_plans_bound_the_prompt() {
    let (_dir, config) = write_config(
        r#"
default_plan = "tiny"

[budget]
reserved_base_tokens = 100

[plans.tiny]
max_prompt_tokens = 400

[plans.huge]
max_prompt_tokens = 100000
"#,
    );
    let allocator = BudgetAllocator::new(&config);
    let snapshot = many_articles(200);

    let huge = allocator.truncate_to_budget(&snapshot.content, "huge");
    assert!(!huge.metadata.was_truncated);
    assert_eq!(huge.content.articles.len(), 200);

    let tiny = allocator.truncate_to_budget(&snapshot.content, &config.default_plan);
    let m = &tiny.metadata;
    assert!(m.was_truncated);
    assert_eq!(m.kb_budget, 300);
    assert!(m.estimated_tokens_after <= m.kb_budget);
    assert_eq!(
        allocator.estimator().estimate_content(&tiny.content),
        m.estimated_tokens_after
    );
    assert!(tiny.content.articles.len() < 200);
    // Kept articles are a prefix of the originals.
    assert_eq!(
        tiny.content.articles[..],
        snapshot.content.articles[..tiny.content.articles.len()]
    );
    let dropped: usize = m
        .drops
        .iter()
        .filter(|d| d.kind == ContentKind::Articles)
        .map(|d| d.items_dropped)
        .sum();
    assert_eq!(dropped, 200 - tiny.content.articles.len());
}

#[test]
fn e2e_unknown_plan_uses_default_limits() {
    let allocator = BudgetAllocator::with_defaults();
    let snapshot = many_articles(5);
    let out = allocator.truncate_to_budget(&snapshot.content, "no_such_plan");
    assert_eq!(out.metadata.plan_id, "default");
    assert_eq!(out.metadata.max_prompt_tokens, 6000);
    assert_eq!(out.metadata.kb_budget, 2000);
}

#[test]
fn e2e_reserved_budget_leaves_no_room() {
    let snapshot = KbSnapshot::from_json(RICH_SNAPSHOT).unwrap();
    let allocator = BudgetAllocator::with_defaults();
    let out = allocator.truncate_to_budget(&snapshot.content, "starter");

    assert_eq!(out.metadata.kb_budget, 0);
    assert!(out.metadata.was_truncated);
    assert!(out.content.is_empty());
    assert_eq!(out.metadata.estimated_tokens_after, 0);
    assert_eq!(render_prompt_sections(&out.content), "");
}

#[test]
fn e2e_truncation_is_idempotent() {
    let (_dir, config) = write_config(
        "[budget]\nreserved_base_tokens = 0\n\n[plans.small]\nmax_prompt_tokens = 250\n",
    );
    let allocator = BudgetAllocator::new(&config);
    let snapshot = many_articles(50);

    let once = allocator.truncate_to_budget(&snapshot.content, "small");
    let twice = allocator.truncate_to_budget(&once.content, "small");
    assert_eq!(once.content, twice.content);
    assert_eq!(
        once.metadata.estimated_tokens_after,
        twice.metadata.estimated_tokens_after
    );
}

// ── Config ───────────────────────────────────────────────────────────────

#[test]
fn e2e_invalid_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[budget]\nchars_per_token = 0.0\n").unwrap();
    assert!(AppConfig::load_from(&path).is_err());

    std::fs::write(&path, "this is = = not toml").unwrap();
    assert!(AppConfig::load_from(&path).is_err());
}

#[test]
fn e2e_missing_config_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.default_plan, "starter");
    assert_eq!(config.plans.len(), 4);
}
