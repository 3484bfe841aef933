//! Display ordering of variants within a group.

use crate::types::SuggestedTemplate;

/// Keyword synonyms (Thai/English) matched by containment.
const KEYWORD_ORDERS: &[(&[&str], u32)] = &[
    (&["front", "ด้านหน้า", "หน้า"], 0),
    (&["original", "ต้นฉบับ"], 0),
    (&["back", "ด้านหลัง", "หลัง"], 1),
    (&["copy", "สำเนา"], 2),
];

/// Lettered forms. Single letters match the whole label only.
const LETTER_ORDERS: &[(&str, u32)] = &[
    ("ก", 0),
    ("ข", 1),
    ("ค", 2),
    ("a", 0),
    ("b", 1),
    ("c", 2),
];

/// Numbered forms, Arabic and Thai digits.
const NUMBER_ORDERS: &[(&str, u32)] = &[
    ("1", 0),
    ("2", 1),
    ("3", 2),
    ("4", 3),
    ("5", 4),
    ("๑", 0),
    ("๒", 1),
    ("๓", 2),
    ("๔", 3),
    ("๕", 4),
];

/// Words that introduce a lettered or numbered label ("แบบ ก", "form 2", "v3").
const LABEL_LEADS: &[&str] = &["แบบ", "form", "version", "ver.", "ver", "no.", "v", "#"];

/// Order for a recognised variant label, if any.
pub fn known_variant_order(variant: &str) -> Option<u32> {
    let lower = variant.trim().to_lowercase();
    if lower.is_empty() {
        return None;
    }

    if let Some((_, order)) = KEYWORD_ORDERS
        .iter()
        .find(|(synonyms, _)| synonyms.iter().any(|s| lower.contains(s)))
    {
        return Some(*order);
    }

    let token = LABEL_LEADS
        .iter()
        .find_map(|lead| lower.strip_prefix(lead))
        .unwrap_or(lower.as_str())
        .trim();
    LETTER_ORDERS
        .iter()
        .chain(NUMBER_ORDERS.iter())
        .find(|(label, _)| *label == token)
        .map(|(_, order)| *order)
}

/// Ordering key for a variant; unrecognised labels sort after all known ones.
pub fn variant_order(variant: &str, default_order: u32) -> u32 {
    known_variant_order(variant).unwrap_or(default_order + 10)
}

/// Sort templates by inferred variant order and renumber densely from 0.
///
/// Ties keep their incoming order.
pub fn assign_variant_orders(templates: &mut Vec<SuggestedTemplate>) {
    let mut keyed: Vec<(u32, SuggestedTemplate)> = templates
        .drain(..)
        .enumerate()
        .map(|(i, t)| (variant_order(&t.suggested_variant, i as u32), t))
        .collect();
    keyed.sort_by_key(|(key, _)| *key);

    templates.extend(keyed.into_iter().enumerate().map(|(i, (_, mut t))| {
        t.variant_order = i;
        t
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(id: &str, variant: &str) -> SuggestedTemplate {
        SuggestedTemplate {
            id: id.to_string(),
            display_name: id.to_string(),
            filename: format!("{}.docx", id),
            suggested_variant: variant.to_string(),
            variant_order: 99,
        }
    }

    #[test]
    fn test_keywords_bilingual() {
        assert_eq!(known_variant_order("Front"), Some(0));
        assert_eq!(known_variant_order("ด้านหน้า"), Some(0));
        assert_eq!(known_variant_order("BACK side"), Some(1));
        assert_eq!(known_variant_order("หลัง"), Some(1));
        assert_eq!(known_variant_order("Tenant Copy"), Some(2));
        assert_eq!(known_variant_order("สำเนา"), Some(2));
    }

    #[test]
    fn test_lettered_and_numbered() {
        assert_eq!(known_variant_order("แบบ ก"), Some(0));
        assert_eq!(known_variant_order("แบบข"), Some(1));
        assert_eq!(known_variant_order("B"), Some(1));
        assert_eq!(known_variant_order("3"), Some(2));
        assert_eq!(known_variant_order("v2"), Some(1));
        assert_eq!(known_variant_order("แบบ ๕"), Some(4));
    }

    #[test]
    fn test_single_letter_needs_whole_label() {
        // Thai words containing ก must not read as form ก.
        assert_eq!(known_variant_order("กรอก"), None);
        assert_eq!(known_variant_order("Draft"), None);
    }

    #[test]
    fn test_unknown_sorts_last() {
        assert_eq!(variant_order("Draft", 0), 10);
        assert_eq!(variant_order("Front", 3), 0);
    }

    #[test]
    fn test_dense_renumbering() {
        let mut templates = vec![
            template("draft", "Draft"),
            template("back", "Back"),
            template("copy", "Copy"),
            template("front", "Front"),
        ];
        assign_variant_orders(&mut templates);
        let ids: Vec<&str> = templates.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["front", "back", "copy", "draft"]);
        let orders: Vec<usize> = templates.iter().map(|t| t.variant_order).collect();
        assert_eq!(orders, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let mut templates = vec![template("x", ""), template("y", ""), template("z", "")];
        assign_variant_orders(&mut templates);
        let ids: Vec<&str> = templates.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "y", "z"]);
    }
}
