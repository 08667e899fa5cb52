//! Prompt rendering for knowledge-base items.
//!
//! The estimator measures exactly what these functions produce, so the
//! budget holds for the rendered prompt.
//!
//! | Kind | Line |
//! |------|------|
//! | instructions | `[IDENTITY] Title: body` |
//! | policies | `[POLICY:REFUND] Title: body` |
//! | articles | `[ARTICLE] Title: body` |
//! | templates | `[TEMPLATE:GREETING] Title: body` |
//! | competitors | `[COMPETITOR] Title: body` |

use kbgauge_core::{ContentItem, ContentKind, KbContent};

fn type_tag(item_type: &str, fallback: &str) -> String {
    let t = item_type.trim();
    if t.is_empty() {
        fallback.to_string()
    } else {
        t.to_uppercase()
    }
}

/// The `[...]` tag that prefixes an item of `kind`.
pub fn item_tag(kind: ContentKind, item: &ContentItem) -> String {
    match kind {
        ContentKind::Instructions => format!("[{}]", type_tag(&item.item_type, "INSTRUCTION")),
        ContentKind::Policies => format!("[POLICY:{}]", type_tag(&item.item_type, "GENERAL")),
        ContentKind::Articles => "[ARTICLE]".to_string(),
        ContentKind::Templates => format!("[TEMPLATE:{}]", type_tag(&item.item_type, "GENERAL")),
        ContentKind::Competitors => "[COMPETITOR]".to_string(),
    }
}

/// Render one item as a single prompt line (without trailing newline).
pub fn format_item(kind: ContentKind, item: &ContentItem) -> String {
    let tag = item_tag(kind, item);
    let title = item.title.trim();
    let body = item.body.trim();
    match (title.is_empty(), body.is_empty()) {
        (false, false) => format!("{tag} {title}: {body}"),
        (true, false) => format!("{tag} {body}"),
        (false, true) => format!("{tag} {title}"),
        (true, true) => tag,
    }
}

pub fn section_header(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Instructions => "[Business Instructions]",
        ContentKind::Policies => "[Policies]",
        ContentKind::Articles => "[Knowledge Articles]",
        ContentKind::Templates => "[Response Templates]",
        ContentKind::Competitors => "[Competitor Notes]",
    }
}

/// Header plus one line per item; empty when there are no items.
pub fn render_section(kind: ContentKind, items: &[ContentItem]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let mut out = format!("{}\n", section_header(kind));
    for item in items {
        out.push_str(&format_item(kind, item));
        out.push('\n');
    }
    out
}

/// All non-empty sections in prompt order, separated by blank lines.
pub fn render_prompt_sections(content: &KbContent) -> String {
    ContentKind::ALL
        .iter()
        .map(|kind| render_section(*kind, content.items(*kind)))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instruction_uses_uppercased_type() {
        let item = ContentItem::new("i1", "identity", "Quiénes somos", "Panadería Lucero");
        assert_eq!(
            format_item(ContentKind::Instructions, &item),
            "[IDENTITY] Quiénes somos: Panadería Lucero"
        );
    }

    #[test]
    fn policy_and_template_tags_include_type() {
        let policy = ContentItem::new("p1", "refund", "", "30 días");
        assert_eq!(format_item(ContentKind::Policies, &policy), "[POLICY:REFUND] 30 días");
        let template = ContentItem::new("t1", "", "Saludo", "");
        assert_eq!(
            format_item(ContentKind::Templates, &template),
            "[TEMPLATE:GENERAL] Saludo"
        );
    }

    #[test]
    fn empty_item_is_just_the_tag() {
        let item = ContentItem::new("c1", "", "  ", "");
        assert_eq!(format_item(ContentKind::Competitors, &item), "[COMPETITOR]");
        assert_eq!(format_item(ContentKind::Instructions, &item), "[INSTRUCTION]");
    }

    #[test]
    fn sections_skip_empty_kinds() {
        let mut content = KbContent::new();
        content.policies = vec![ContentItem::new("p1", "refund", "", "30 días")];
        content.competitors = vec![ContentItem::new("c1", "", "Rival", "más caro")];
        let rendered = render_prompt_sections(&content);
        assert_eq!(
            rendered,
            "[Policies]\n[POLICY:REFUND] 30 días\n\n[Competitor Notes]\n[COMPETITOR] Rival: más caro\n"
        );
    }

    #[test]
    fn empty_content_renders_nothing() {
        assert!(render_prompt_sections(&KbContent::new()).is_empty());
    }
}
