//! Per-vertical field catalogs.
//!
//! Every vertical scores the general fields plus a handful of its own.
//! Catalogs are immutable data; unknown verticals fall back to `general`.
//! Custom catalogs can be loaded from TOML:
//!
//! ```toml
//! vertical = "spa"
//!
//! [[fields]]
//! key = "massage_menu"
//! label = "Massage menu"
//! data_source = "articles"
//! filter_type = "service"
//! count_based = true
//! min_count = 4
//! weight = 10
//! category = "knowledge"
//! importance = "essential"
//! ```

use kbgauge_core::category::{COMMUNICATION, IDENTITY, KNOWLEDGE, POLICIES, SALES};
use kbgauge_core::{DataSource, Error, FieldImportance, Result, ScoreableField};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

pub const DEFAULT_VERTICAL: &str = "general";

#[derive(Debug, Clone, Copy)]
enum Shape {
    Text { min: usize, ideal: usize },
    Count { min: usize },
}

/// Static form of a [`ScoreableField`].
#[derive(Debug, Clone, Copy)]
struct FieldDef {
    key: &'static str,
    label: &'static str,
    source: DataSource,
    filter: Option<&'static str>,
    category: &'static str,
    weight: u32,
    importance: FieldImportance,
    shape: Shape,
    keywords: &'static [&'static str],
}

impl FieldDef {
    #[allow(clippy::too_many_arguments)]
    const fn text(
        key: &'static str,
        label: &'static str,
        source: DataSource,
        filter: Option<&'static str>,
        category: &'static str,
        weight: u32,
        importance: FieldImportance,
        (min, ideal): (usize, usize),
    ) -> Self {
        Self {
            key,
            label,
            source,
            filter,
            category,
            weight,
            importance,
            shape: Shape::Text { min, ideal },
            keywords: &[],
        }
    }

    #[allow(clippy::too_many_arguments)]
    const fn count(
        key: &'static str,
        label: &'static str,
        source: DataSource,
        filter: Option<&'static str>,
        category: &'static str,
        weight: u32,
        importance: FieldImportance,
        min: usize,
    ) -> Self {
        Self {
            key,
            label,
            source,
            filter,
            category,
            weight,
            importance,
            shape: Shape::Count { min },
            keywords: &[],
        }
    }

    fn to_field(self) -> ScoreableField {
        let field = match self.shape {
            Shape::Text { min, ideal } => {
                ScoreableField::text(self.key, self.source, self.category, self.weight)
                    .with_lengths(min, ideal)
            }
            Shape::Count { min } => {
                ScoreableField::count(self.key, self.source, self.category, self.weight, min)
            }
        };
        let field = field
            .with_label(self.label)
            .with_importance(self.importance)
            .with_keywords(self.keywords.iter().copied());
        match self.filter {
            Some(filter) => field.with_filter(filter),
            None => field,
        }
    }
}

use DataSource as Src;
use FieldImportance::{Essential, Optional, Recommended};

// ── General ───────────────────────────────────────────────────────────────

#[rustfmt::skip]
const GENERAL_FIELDS: &[FieldDef] = &[
    // identity (30)
    FieldDef::text("business_identity", "Business identity", Src::Instructions, Some("identity"), IDENTITY, 10, Essential, (50, 300)),
    FieldDef::text("business_hours", "Business hours", Src::Locations, None, IDENTITY, 8, Essential, (1, 1)),
    FieldDef::count("branches", "Branches", Src::Locations, None, IDENTITY, 4, Recommended, 1),
    FieldDef::text("forbidden_topics", "Forbidden topics", Src::Instructions, Some("forbidden"), IDENTITY, 4, Recommended, (30, 200)),
    FieldDef::text("tone_of_voice", "Tone of voice", Src::Instructions, Some("tone"), IDENTITY, 4, Optional, (30, 150)),
    // policies (25)
    FieldDef::text("cancellation_policy", "Cancellation policy", Src::Policies, Some("cancellation"), POLICIES, 8, Essential, (50, 250)),
    FieldDef {
        keywords: &["día|dia|day"],
        ..FieldDef::text("refund_policy", "Refund policy", Src::Policies, Some("refund"), POLICIES, 8, Essential, (50, 250))
    },
    FieldDef::text("shipping_policy", "Shipping policy", Src::Policies, Some("shipping"), POLICIES, 5, Recommended, (50, 250)),
    FieldDef::text("privacy_policy", "Privacy policy", Src::Policies, Some("privacy"), POLICIES, 4, Optional, (50, 300)),
    // knowledge (16)
    FieldDef::count("faq_articles", "FAQ articles", Src::Articles, Some("faq"), KNOWLEDGE, 10, Essential, 3),
    FieldDef::count("product_articles", "Product articles", Src::Articles, Some("product"), KNOWLEDGE, 6, Recommended, 2),
    // communication (13)
    FieldDef::text("greeting_template", "Greeting template", Src::Templates, Some("greeting"), COMMUNICATION, 6, Essential, (20, 120)),
    FieldDef::text("farewell_template", "Farewell template", Src::Templates, Some("farewell"), COMMUNICATION, 3, Optional, (15, 100)),
    FieldDef::text("handoff_template", "Human handoff template", Src::Templates, Some("handoff"), COMMUNICATION, 4, Recommended, (20, 120)),
    // sales (11)
    FieldDef::count("competitors", "Competitor notes", Src::Competitors, None, SALES, 4, Optional, 1),
    FieldDef::text("upsell_instructions", "Upsell instructions", Src::Instructions, Some("upsell"), SALES, 4, Optional, (30, 200)),
    FieldDef {
        keywords: &["efectivo|tarjeta|transferencia|cash|card|transfer"],
        ..FieldDef::text("payment_policy", "Payment methods", Src::Policies, Some("payment"), SALES, 3, Recommended, (30, 200))
    },
];

// ── Vertical extras ───────────────────────────────────────────────────────

#[rustfmt::skip]
const RESTAURANT_FIELDS: &[FieldDef] = &[
    FieldDef::count("menu_articles", "Menu items", Src::Articles, Some("menu"), KNOWLEDGE, 10, Essential, 5),
    FieldDef::text("reservation_policy", "Reservation policy", Src::Policies, Some("reservation"), POLICIES, 6, Recommended, (40, 200)),
];

#[rustfmt::skip]
const CLINIC_FIELDS: &[FieldDef] = &[
    FieldDef {
        keywords: &["cancel"],
        ..FieldDef::text("appointment_policy", "Appointment policy", Src::Policies, Some("appointment"), POLICIES, 8, Essential, (50, 250))
    },
    FieldDef::count("service_articles", "Service descriptions", Src::Articles, Some("service"), KNOWLEDGE, 8, Essential, 3),
    FieldDef::text("emergency_instructions", "Emergency instructions", Src::Instructions, Some("emergency"), IDENTITY, 6, Essential, (30, 200)),
];

#[rustfmt::skip]
const RETAIL_FIELDS: &[FieldDef] = &[
    FieldDef::text("return_policy", "Return policy", Src::Policies, Some("return"), POLICIES, 6, Essential, (50, 250)),
    FieldDef::text("stock_instructions", "Stock availability instructions", Src::Instructions, Some("stock"), SALES, 4, Recommended, (30, 200)),
    FieldDef::text("promotion_template", "Promotion template", Src::Templates, Some("promotion"), SALES, 3, Optional, (20, 150)),
];

const VERTICALS: &[(&str, &[FieldDef])] = &[
    (DEFAULT_VERTICAL, &[]),
    ("restaurant", RESTAURANT_FIELDS),
    ("clinic", CLINIC_FIELDS),
    ("retail", RETAIL_FIELDS),
];

// ── Catalog ───────────────────────────────────────────────────────────────

/// The fields scored for one vertical, in reporting order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldCatalog {
    pub vertical: String,
    #[serde(default)]
    pub fields: Vec<ScoreableField>,
}

impl FieldCatalog {
    /// Built-in catalog for a vertical, or `general` if it is unknown.
    pub fn for_vertical(vertical: &str) -> Self {
        let wanted = vertical.trim().to_lowercase();
        let (name, extras) = match VERTICALS.iter().find(|(name, _)| *name == wanted) {
            Some(entry) => *entry,
            None => {
                warn!(vertical = %vertical, "Unknown vertical, using the general catalog");
                VERTICALS[0]
            }
        };

        Self {
            vertical: name.to_string(),
            fields: GENERAL_FIELDS
                .iter()
                .chain(extras)
                .map(|def| def.to_field())
                .collect(),
        }
    }

    pub fn general() -> Self {
        Self::for_vertical(DEFAULT_VERTICAL)
    }

    /// Names of the built-in verticals.
    pub fn verticals() -> impl Iterator<Item = &'static str> {
        VERTICALS.iter().map(|(name, _)| *name)
    }

    pub fn is_builtin(vertical: &str) -> bool {
        Self::verticals().any(|v| v == vertical.trim().to_lowercase())
    }

    /// Parse and validate a catalog from TOML.
    pub fn from_toml(source: &str) -> Result<Self> {
        let catalog: Self = toml::from_str(source).map_err(|e| Error::Catalog(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Keys must be present and unique; every field needs a category.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.key.trim().is_empty() {
                return Err(Error::Catalog("field with an empty key".into()));
            }
            if field.category.trim().is_empty() {
                return Err(Error::Catalog(format!("field '{}' has no category", field.key)));
            }
            if !seen.insert(field.key.as_str()) {
                return Err(Error::Catalog(format!("duplicate field key '{}'", field.key)));
            }
        }
        Ok(())
    }

    pub fn field(&self, key: &str) -> Option<&ScoreableField> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for field in &self.fields {
            if !out.contains(&field.category.as_str()) {
                out.push(&field.category);
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_catalog_is_valid() {
        for vertical in FieldCatalog::verticals() {
            let catalog = FieldCatalog::for_vertical(vertical);
            assert_eq!(catalog.vertical, vertical);
            catalog.validate().unwrap();
        }
    }

    #[test]
    fn general_weights_per_category() {
        let catalog = FieldCatalog::general();
        let weight = |cat: &str| -> u32 {
            catalog
                .fields
                .iter()
                .filter(|f| f.category == cat)
                .map(|f| f.weight)
                .sum()
        };
        assert_eq!(weight(IDENTITY), 30);
        assert_eq!(weight(POLICIES), 25);
        assert_eq!(weight(KNOWLEDGE), 16);
        assert_eq!(weight(COMMUNICATION), 13);
        assert_eq!(weight(SALES), 11);
    }

    #[test]
    fn verticals_extend_general() {
        let general = FieldCatalog::general();
        let restaurant = FieldCatalog::for_vertical("Restaurant ");
        assert_eq!(restaurant.vertical, "restaurant");
        assert_eq!(restaurant.len(), general.len() + RESTAURANT_FIELDS.len());
        assert!(restaurant.field("menu_articles").is_some());
        assert!(general.field("menu_articles").is_none());
    }

    #[test]
    fn unknown_vertical_falls_back_to_general() {
        let catalog = FieldCatalog::for_vertical("space_tourism");
        assert_eq!(catalog, FieldCatalog::general());
        assert!(!FieldCatalog::is_builtin("space_tourism"));
        assert!(FieldCatalog::is_builtin("clinic"));
    }

    #[test]
    fn static_definitions_convert() {
        let catalog = FieldCatalog::general();
        let refund = catalog.field("refund_policy").unwrap();
        assert_eq!(refund.filter_type.as_deref(), Some("refund"));
        assert_eq!(refund.must_contain_keywords, vec!["día|dia|day".to_string()]);
        assert_eq!((refund.min_length, refund.ideal_length), (50, 250));

        let faq = catalog.field("faq_articles").unwrap();
        assert!(faq.count_based);
        assert_eq!(faq.min_count, 3);
        assert_eq!(faq.importance, FieldImportance::Essential);

        assert!(catalog.field("business_hours").unwrap().is_business_hours());
    }

    #[test]
    fn categories_in_first_seen_order() {
        assert_eq!(
            FieldCatalog::general().categories(),
            vec![IDENTITY, POLICIES, KNOWLEDGE, COMMUNICATION, SALES]
        );
    }

    #[test]
    fn catalog_from_toml() {
        let catalog = FieldCatalog::from_toml(
            r#"
vertical = "spa"

[[fields]]
key = "massage_menu"
data_source = "articles"
filter_type = "service"
count_based = true
min_count = 4
weight = 10
category = "knowledge"
importance = "essential"

[[fields]]
key = "spa_etiquette"
data_source = "policies"
min_length = 40
ideal_length = 160
weight = 5
category = "policies"
"#,
        )
        .unwrap();
        assert_eq!(catalog.vertical, "spa");
        assert_eq!(catalog.len(), 2);
        let etiquette = catalog.field("spa_etiquette").unwrap();
        assert_eq!(etiquette.importance, FieldImportance::Optional);
        assert_eq!(etiquette.display_label(), "spa_etiquette");
    }

    #[test]
    fn duplicate_keys_rejected() {
        let err = FieldCatalog::from_toml(
            r#"
vertical = "dup"
[[fields]]
key = "a"
data_source = "policies"
weight = 1
category = "policies"
[[fields]]
key = "a"
data_source = "articles"
weight = 1
category = "knowledge"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Catalog(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn malformed_toml_is_a_catalog_error() {
        let err = FieldCatalog::from_toml("vertical = ").unwrap_err();
        assert!(matches!(err, Error::Catalog(_)));
    }
}
