//! Applying accepted suggestions to a document-type catalog.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{info, warn};

use formsage_core::{Error, Result};

use crate::types::{Category, ExistingDocumentType, SuggestedGroup, TemplateInfo};

/// Storage for document types and template assignments.
pub trait DocumentTypeCatalog {
    /// Create a document type, returning its id. Fails with
    /// [`Error::DuplicateCode`] when the code is taken.
    fn create_document_type(&self, name: &str, code: &str, category: Category) -> Result<String>;

    /// Attach a template to a document type as the given variant.
    fn assign_template(
        &self,
        template_id: &str,
        type_id: &str,
        variant: &str,
        variant_order: usize,
    ) -> Result<()>;
}

/// Outcome of a batch assignment.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssignmentReport {
    #[serde(rename = "groupsCreated")]
    pub groups_created: usize,
    #[serde(rename = "groupsReused")]
    pub groups_reused: usize,
    #[serde(rename = "templatesAssigned")]
    pub templates_assigned: usize,
    #[serde(rename = "groupsSkipped")]
    pub groups_skipped: usize,
    #[serde(rename = "skippedCodes")]
    pub skipped_codes: Vec<String>,
    pub errors: Vec<String>,
}

/// Create (or reuse) a document type per group and assign its templates.
///
/// A group whose code collides is skipped and the batch continues. Other
/// failures are recorded in the report without aborting the batch.
pub fn assign_suggestions(
    groups: &[SuggestedGroup],
    catalog: &dyn DocumentTypeCatalog,
) -> AssignmentReport {
    let mut report = AssignmentReport::default();

    for group in groups {
        let type_id = match &group.existing_type_id {
            Some(id) => {
                report.groups_reused += 1;
                id.clone()
            }
            None => match catalog.create_document_type(
                &group.suggested_name,
                &group.suggested_code,
                group.suggested_category,
            ) {
                Ok(id) => {
                    report.groups_created += 1;
                    id
                }
                Err(e) if e.is_duplicate() => {
                    warn!(
                        "Skipping group '{}': code '{}' already exists",
                        group.suggested_name, group.suggested_code
                    );
                    report.groups_skipped += 1;
                    report.skipped_codes.push(group.suggested_code.clone());
                    continue;
                }
                Err(e) => {
                    warn!("Failed to create type '{}': {}", group.suggested_name, e);
                    report.groups_skipped += 1;
                    report.errors.push(format!("{}: {}", group.suggested_code, e));
                    continue;
                }
            },
        };

        for template in &group.templates {
            match catalog.assign_template(
                &template.id,
                &type_id,
                &template.suggested_variant,
                template.variant_order,
            ) {
                Ok(()) => report.templates_assigned += 1,
                Err(e) => {
                    warn!("Failed to assign template {}: {}", template.id, e);
                    report.errors.push(format!("{}: {}", template.id, e));
                }
            }
        }
    }

    info!(
        "Assignment done: {} created, {} reused, {} skipped, {} templates assigned",
        report.groups_created, report.groups_reused, report.groups_skipped, report.templates_assigned
    );
    report
}

/// Where a template ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateAssignment {
    pub type_id: String,
    pub variant: String,
    pub variant_order: usize,
}

#[derive(Debug, Default)]
struct CatalogState {
    types: Vec<ExistingDocumentType>,
    assignments: HashMap<String, TemplateAssignment>,
}

/// Process-local catalog.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    state: Mutex<CatalogState>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog pre-populated with existing document types.
    pub fn with_types(types: Vec<ExistingDocumentType>) -> Self {
        Self {
            state: Mutex::new(CatalogState {
                types,
                assignments: HashMap::new(),
            }),
        }
    }

    pub fn document_types(&self) -> Vec<ExistingDocumentType> {
        self.state.lock().types.clone()
    }

    pub fn assignment(&self, template_id: &str) -> Option<TemplateAssignment> {
        self.state.lock().assignments.get(template_id).cloned()
    }

    /// Templates from `templates` that have no assignment yet.
    pub fn unassigned(&self, templates: &[TemplateInfo]) -> Vec<TemplateInfo> {
        let state = self.state.lock();
        templates
            .iter()
            .filter(|t| !state.assignments.contains_key(&t.id))
            .cloned()
            .collect()
    }
}

impl DocumentTypeCatalog for InMemoryCatalog {
    fn create_document_type(&self, name: &str, code: &str, category: Category) -> Result<String> {
        let mut state = self.state.lock();
        if state.types.iter().any(|t| t.code == code) {
            return Err(Error::DuplicateCode(code.to_string()));
        }
        let id = uuid::Uuid::new_v4().to_string();
        state.types.push(ExistingDocumentType {
            id: id.clone(),
            name: name.to_string(),
            code: code.to_string(),
            category,
        });
        Ok(id)
    }

    fn assign_template(
        &self,
        template_id: &str,
        type_id: &str,
        variant: &str,
        variant_order: usize,
    ) -> Result<()> {
        let mut state = self.state.lock();
        if !state.types.iter().any(|t| t.id == type_id) {
            return Err(Error::NotFound(format!("document type {}", type_id)));
        }
        state.assignments.insert(
            template_id.to_string(),
            TemplateAssignment {
                type_id: type_id.to_string(),
                variant: variant.to_string(),
                variant_order,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SuggestedTemplate;

    fn group(name: &str, code: &str, ids: &[&str]) -> SuggestedGroup {
        SuggestedGroup {
            suggested_name: name.to_string(),
            suggested_code: code.to_string(),
            suggested_category: Category::Other,
            confidence: 0.5,
            existing_type_id: None,
            templates: ids
                .iter()
                .enumerate()
                .map(|(i, id)| SuggestedTemplate {
                    id: id.to_string(),
                    display_name: id.to_string(),
                    filename: format!("{}.docx", id),
                    suggested_variant: String::new(),
                    variant_order: i,
                })
                .collect(),
        }
    }

    #[test]
    fn test_creates_and_assigns() {
        let catalog = InMemoryCatalog::new();
        let report = assign_suggestions(&[group("ID Card", "id_card", &["t1", "t2"])], &catalog);
        assert_eq!(report.groups_created, 1);
        assert_eq!(report.templates_assigned, 2);
        assert_eq!(catalog.document_types().len(), 1);

        let a = catalog.assignment("t2").unwrap();
        assert_eq!(a.variant_order, 1);
        assert_eq!(a.type_id, catalog.document_types()[0].id);
    }

    #[test]
    fn test_duplicate_code_skipped_batch_continues() {
        let catalog = InMemoryCatalog::with_types(vec![ExistingDocumentType {
            id: "dt-1".into(),
            name: "Memo".into(),
            code: "memo".into(),
            category: Category::Other,
        }]);
        let report = assign_suggestions(
            &[group("Memo", "memo", &["t1"]), group("Invoice", "invoice", &["t2"])],
            &catalog,
        );
        assert_eq!(report.groups_skipped, 1);
        assert_eq!(report.skipped_codes, vec!["memo".to_string()]);
        assert_eq!(report.groups_created, 1);
        assert!(catalog.assignment("t1").is_none());
        assert!(catalog.assignment("t2").is_some());
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_existing_type_reused() {
        let catalog = InMemoryCatalog::with_types(vec![ExistingDocumentType {
            id: "dt-1".into(),
            name: "Passport".into(),
            code: "passport".into(),
            category: Category::Identification,
        }]);
        let mut g = group("Passport", "passport", &["t1"]);
        g.existing_type_id = Some("dt-1".into());
        let report = assign_suggestions(&[g], &catalog);
        assert_eq!(report.groups_reused, 1);
        assert_eq!(report.groups_created, 0);
        assert_eq!(catalog.assignment("t1").unwrap().type_id, "dt-1");
    }

    #[test]
    fn test_missing_type_recorded_as_error() {
        let catalog = InMemoryCatalog::new();
        let mut g = group("Ghost", "ghost", &["t1"]);
        g.existing_type_id = Some("nope".into());
        let report = assign_suggestions(&[g], &catalog);
        assert_eq!(report.templates_assigned, 0);
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn test_unassigned_filters() {
        let catalog = InMemoryCatalog::new();
        assign_suggestions(&[group("Memo", "memo", &["t1"])], &catalog);
        let remaining = catalog.unassigned(&[
            TemplateInfo::new("t1", "", "memo.docx"),
            TemplateInfo::new("t2", "", "other.docx"),
        ]);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, "t2");
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let report = AssignmentReport::default();
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("groupsCreated").is_some());
        assert!(json.get("skippedCodes").is_some());
    }
}
