//! End-to-end suggestion pass over unassigned templates.

use tracing::{debug, info};

use formsage_core::ClusterConfig;

use crate::category::{generate_code_with_limit, guess_category};
use crate::decompose::decompose_name;
use crate::merge::{merge_groups, normalize_key};
use crate::score::{confidence, EXISTING_TYPE_CONFIDENCE};
use crate::types::{ExistingDocumentType, SuggestedGroup, SuggestedTemplate, TemplateInfo};
use crate::variant::assign_variant_orders;

/// A template with its decomposed name.
#[derive(Debug, Clone)]
struct Decomposed {
    template: TemplateInfo,
    base: String,
    variant: String,
}

/// Cluster templates into suggested document types.
///
/// Result is sorted by confidence descending, then template count descending.
pub fn suggest_groups(
    templates: &[TemplateInfo],
    existing: &[ExistingDocumentType],
    config: &ClusterConfig,
) -> Vec<SuggestedGroup> {
    let mut buckets: Vec<(String, Vec<Decomposed>)> = Vec::new();

    for template in templates {
        let (base, variant) = decompose_name(template.source_name());
        let mut key = normalize_key(&base);
        if key.is_empty() {
            key = format!("#{}", template.id);
        }
        debug!("Template {} -> base '{}', variant '{}'", template.id, base, variant);

        let entry = Decomposed {
            template: template.clone(),
            base,
            variant,
        };
        match buckets.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(entry),
            None => buckets.push((key, vec![entry])),
        }
    }

    if config.merge_groups {
        buckets = merge_groups(buckets, config.min_merge_key_len);
    }

    let mut groups: Vec<SuggestedGroup> = buckets
        .into_iter()
        .map(|(key, members)| build_group(&key, members, existing, config))
        .collect();

    groups.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.templates.len().cmp(&a.templates.len()))
    });

    info!(
        "Suggested {} groups from {} templates",
        groups.len(),
        templates.len()
    );
    groups
}

fn build_group(
    key: &str,
    members: Vec<Decomposed>,
    existing: &[ExistingDocumentType],
    config: &ClusterConfig,
) -> SuggestedGroup {
    // The bucket's own base name, not one it absorbed.
    let base_name = members
        .iter()
        .find(|m| normalize_key(&m.base) == key)
        .or_else(|| members.first())
        .map(|m| m.base.clone())
        .unwrap_or_default();

    let mut templates: Vec<SuggestedTemplate> = members
        .into_iter()
        .map(|m| SuggestedTemplate {
            id: m.template.id,
            display_name: m.template.display_name,
            filename: m.template.filename,
            suggested_variant: m.variant,
            variant_order: 0,
        })
        .collect();
    assign_variant_orders(&mut templates);

    let score = confidence(&templates, &base_name);

    match find_existing(key, existing, config.min_merge_key_len) {
        Some(found) => {
            debug!("Group '{}' matches existing type {}", base_name, found.id);
            SuggestedGroup {
                suggested_name: found.name.clone(),
                suggested_code: found.code.clone(),
                suggested_category: found.category,
                confidence: EXISTING_TYPE_CONFIDENCE,
                existing_type_id: Some(found.id.clone()),
                templates,
            }
        }
        None => SuggestedGroup {
            suggested_code: generate_code_with_limit(&base_name, config.max_code_len),
            suggested_category: guess_category(&base_name),
            suggested_name: base_name,
            confidence: score,
            existing_type_id: None,
            templates,
        },
    }
}

/// Existing type whose normalized name contains the key, or is contained in it.
fn find_existing<'a>(
    key: &str,
    existing: &'a [ExistingDocumentType],
    min_len: usize,
) -> Option<&'a ExistingDocumentType> {
    if key.starts_with('#') {
        return None;
    }
    existing.iter().find(|t| {
        let name = normalize_key(&t.name);
        if name.is_empty() {
            return false;
        }
        if name == key {
            return true;
        }
        name.chars().count() >= min_len
            && key.chars().count() >= min_len
            && (name.contains(key) || key.contains(&name))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn t(id: &str, name: &str) -> TemplateInfo {
        TemplateInfo::new(id, "", name)
    }

    #[test]
    fn test_front_back_grouped() {
        let groups = suggest_groups(
            &[t("1", "ID Card Back.docx"), t("2", "ID Card Front.docx")],
            &[],
            &ClusterConfig::default(),
        );
        assert_eq!(groups.len(), 1);
        let g = &groups[0];
        assert_eq!(g.suggested_name, "ID Card");
        assert_eq!(g.suggested_code, "id_card");
        assert_eq!(g.suggested_category, Category::Identification);
        assert!(g.confidence >= 0.65);
        assert_eq!(g.templates[0].suggested_variant, "Front");
        assert_eq!(g.templates[0].variant_order, 0);
        assert_eq!(g.templates[1].suggested_variant, "Back");
        assert_eq!(g.templates[1].variant_order, 1);
    }

    #[test]
    fn test_display_name_preferred_over_filename() {
        let groups = suggest_groups(
            &[TemplateInfo::new("1", "Passport Copy", "upload_8812.docx")],
            &[],
            &ClusterConfig::default(),
        );
        assert_eq!(groups[0].suggested_name, "Passport");
        assert_eq!(groups[0].templates[0].suggested_variant, "Copy");
    }

    #[test]
    fn test_existing_type_forces_confidence() {
        let existing = vec![ExistingDocumentType {
            id: "dt-1".into(),
            name: "ID Card".into(),
            code: "national_id".into(),
            category: Category::Identification,
        }];
        let groups = suggest_groups(&[t("1", "ID Card Front.docx")], &existing, &ClusterConfig::default());
        assert_eq!(groups[0].existing_type_id.as_deref(), Some("dt-1"));
        assert_eq!(groups[0].suggested_code, "national_id");
        assert!((groups[0].confidence - 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_merge_can_be_disabled() {
        let templates = [t("1", "Lease Agreement.docx"), t("2", "Lease Agreement Extended.docx")];
        let merged = suggest_groups(&templates, &[], &ClusterConfig::default());
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].suggested_name, "Lease Agreement Extended");

        let config = ClusterConfig {
            merge_groups: false,
            ..ClusterConfig::default()
        };
        assert_eq!(suggest_groups(&templates, &[], &config).len(), 2);
    }

    #[test]
    fn test_sorted_by_confidence_then_size() {
        let groups = suggest_groups(
            &[
                t("1", "Memo.docx"),
                t("2", "Passport Front.docx"),
                t("3", "Passport Back.docx"),
            ],
            &[],
            &ClusterConfig::default(),
        );
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].suggested_name, "Passport");
        assert!(groups[0].confidence >= groups[1].confidence);
    }

    #[test]
    fn test_unnameable_templates_stay_apart() {
        let groups = suggest_groups(
            &[t("1", "---.docx"), t("2", "___.docx")],
            &[],
            &ClusterConfig::default(),
        );
        assert_eq!(groups.len(), 2);
        for g in &groups {
            assert!(!g.suggested_code.is_empty());
        }
    }
}
