//! Knowledge-base snapshot model.
//!
//! A snapshot is what the persistence layer hands over for one tenant: five
//! collections of user-authored content plus the tenant's locations. The
//! subsystem never mutates a snapshot; truncation produces a new
//! [`KbContent`] instead.
//!
//! Deserialization is forgiving on purpose: absent or `null` arrays become
//! empty, `null` text becomes the empty string and a missing `is_active`
//! flag means active. Malformed rows degrade to "empty" rather than failing
//! the whole request.

use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize `null` (or an absent field, with `#[serde(default)]`) as
/// `T::default()`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn default_true() -> bool {
    true
}

/// An `is_active` flag that is `null` counts as active.
fn null_as_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

/// Ids arrive as strings or as numeric primary keys.
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

// ── Content kinds ─────────────────────────────────────────────────────────

/// The five kinds of user-authored content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Instructions,
    Policies,
    Articles,
    Templates,
    Competitors,
}

impl ContentKind {
    /// All kinds, in snapshot order.
    pub const ALL: [ContentKind; 5] = [
        ContentKind::Instructions,
        ContentKind::Policies,
        ContentKind::Articles,
        ContentKind::Templates,
        ContentKind::Competitors,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Instructions => "instructions",
            Self::Policies => "policies",
            Self::Articles => "articles",
            Self::Templates => "templates",
            Self::Competitors => "competitors",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Items ─────────────────────────────────────────────────────────────────

/// One instruction, policy, article, template or competitor note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Stable identifier from the persistence layer.
    #[serde(default, deserialize_with = "id_as_string")]
    pub id: String,

    /// Type tag within its kind (e.g. `identity`, `greeting`, `refund`).
    #[serde(rename = "type", alias = "item_type", default, deserialize_with = "null_as_default")]
    pub item_type: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    /// The text that ends up in the prompt.
    #[serde(alias = "content", default, deserialize_with = "null_as_default")]
    pub body: String,

    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub is_active: bool,
}

impl ContentItem {
    /// Create an active item.
    pub fn new(
        id: impl Into<String>,
        item_type: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            item_type: item_type.into(),
            title: title.into(),
            body: body.into(),
            is_active: true,
        }
    }

    /// Builder-style toggle for the active flag.
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }
}

/// A physical branch of the business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, deserialize_with = "id_as_string")]
    pub id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub is_active: bool,

    /// Free-form opening-hours structure as stored by the editor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_hours: Option<serde_json::Value>,
}

impl Location {
    /// Whether the hours structure holds at least one real value.
    pub fn has_operating_hours(&self) -> bool {
        self.operating_hours.as_ref().is_some_and(is_meaningful)
    }
}

fn is_meaningful(value: &serde_json::Value) -> bool {
    use serde_json::Value;
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(_) => true,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => items.iter().any(is_meaningful),
        Value::Object(map) => map.values().any(is_meaningful),
    }
}

// ── Collections ───────────────────────────────────────────────────────────

/// The five content collections that can end up in a prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KbContent {
    #[serde(default, deserialize_with = "null_as_default")]
    pub instructions: Vec<ContentItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub policies: Vec<ContentItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub articles: Vec<ContentItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub templates: Vec<ContentItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub competitors: Vec<ContentItem>,
}

impl KbContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items of one kind.
    pub fn items(&self, kind: ContentKind) -> &[ContentItem] {
        match kind {
            ContentKind::Instructions => &self.instructions,
            ContentKind::Policies => &self.policies,
            ContentKind::Articles => &self.articles,
            ContentKind::Templates => &self.templates,
            ContentKind::Competitors => &self.competitors,
        }
    }

    /// Replace the items of one kind.
    pub fn set_items(&mut self, kind: ContentKind, items: Vec<ContentItem>) {
        match kind {
            ContentKind::Instructions => self.instructions = items,
            ContentKind::Policies => self.policies = items,
            ContentKind::Articles => self.articles = items,
            ContentKind::Templates => self.templates = items,
            ContentKind::Competitors => self.competitors = items,
        }
    }

    /// Total number of items across all kinds.
    pub fn len(&self) -> usize {
        ContentKind::ALL.iter().map(|k| self.items(*k).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A copy holding only active items, order preserved.
    pub fn active_only(&self) -> KbContent {
        let mut out = KbContent::new();
        for kind in ContentKind::ALL {
            let active = self
                .items(kind)
                .iter()
                .filter(|i| i.is_active)
                .cloned()
                .collect();
            out.set_items(kind, active);
        }
        out
    }
}

/// Everything one tenant contributes to scoring and prompt building.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KbSnapshot {
    #[serde(flatten)]
    pub content: KbContent,

    #[serde(default, deserialize_with = "null_as_default")]
    pub locations: Vec<Location>,
}

impl KbSnapshot {
    /// Parse a snapshot from its JSON representation.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json).map_err(|e| crate::Error::Snapshot(e.to_string()))
    }

    pub fn items(&self, kind: ContentKind) -> &[ContentItem] {
        self.content.items(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_and_null_arrays_default_to_empty() {
        let snap = KbSnapshot::from_json(r#"{"instructions": null}"#).unwrap();
        assert!(snap.content.is_empty());
        assert!(snap.locations.is_empty());
    }

    #[test]
    fn null_text_becomes_empty_and_active_defaults_true() {
        let snap = KbSnapshot::from_json(
            r#"{"policies": [{"id": "p1", "type": "refund", "title": null, "content": null}]}"#,
        )
        .unwrap();
        let item = &snap.content.policies[0];
        assert_eq!(item.item_type, "refund");
        assert_eq!(item.title, "");
        assert_eq!(item.body, "");
        assert!(item.is_active);
    }

    #[test]
    fn null_active_flag_counts_as_active() {
        let snap = KbSnapshot::from_json(
            r#"{
                "policies": [
                    {"id": "p1", "type": "refund", "body": "x", "is_active": null},
                    {"id": "p2", "type": "refund", "body": "y", "is_active": false}
                ],
                "locations": [{"id": "l1", "name": "Centro", "is_active": null}]
            }"#,
        )
        .unwrap();
        assert!(snap.content.policies[0].is_active);
        assert!(!snap.content.policies[1].is_active);
        assert!(snap.locations[0].is_active);
    }

    #[test]
    fn numeric_and_missing_ids_are_accepted() {
        let snap = KbSnapshot::from_json(
            r#"{
                "articles": [
                    {"id": 42, "type": "faq", "body": "a"},
                    {"id": null, "type": "faq", "body": "b"},
                    {"type": "faq", "body": "c"}
                ],
                "locations": [{"id": 7, "name": "Norte"}]
            }"#,
        )
        .unwrap();
        let ids: Vec<_> = snap.content.articles.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["42", "", ""]);
        assert_eq!(snap.locations[0].id, "7");
    }

    #[test]
    fn invalid_json_is_a_snapshot_error() {
        let err = KbSnapshot::from_json("[1, 2").unwrap_err();
        assert!(matches!(err, crate::Error::Snapshot(_)));
    }

    #[test]
    fn active_only_preserves_order() {
        let mut content = KbContent::new();
        content.articles = vec![
            ContentItem::new("a1", "faq", "A", "x"),
            ContentItem::new("a2", "faq", "B", "y").with_active(false),
            ContentItem::new("a3", "faq", "C", "z"),
        ];
        let active = content.active_only();
        let ids: Vec<_> = active.articles.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "a3"]);
        assert_eq!(content.len(), 3);
        assert_eq!(active.len(), 2);
    }

    #[test]
    fn operating_hours_detection() {
        let mut loc = Location {
            id: "l1".into(),
            name: "Centro".into(),
            is_active: true,
            operating_hours: None,
        };
        assert!(!loc.has_operating_hours());

        loc.operating_hours = Some(json!({}));
        assert!(!loc.has_operating_hours());

        loc.operating_hours = Some(json!({"monday": null, "tuesday": ""}));
        assert!(!loc.has_operating_hours());

        loc.operating_hours = Some(json!({"monday": {"open": "09:00", "close": "18:00"}}));
        assert!(loc.has_operating_hours());
    }

    #[test]
    fn kind_display_matches_serde_name() {
        for kind in ContentKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }
}
