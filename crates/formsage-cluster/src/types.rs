//! Clustering types.

use serde::{Deserialize, Serialize};

/// A template waiting to be assigned to a document type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateInfo {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    pub filename: String,
}

impl TemplateInfo {
    pub fn new(id: &str, display_name: &str, filename: &str) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            filename: filename.to_string(),
        }
    }

    /// Name used for decomposition: the display name, or the filename if blank.
    pub fn source_name(&self) -> &str {
        if self.display_name.trim().is_empty() {
            &self.filename
        } else {
            &self.display_name
        }
    }
}

/// Coarse document category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Identification,
    Certificate,
    Contract,
    Application,
    Financial,
    Government,
    Education,
    #[default]
    Other,
}

impl Category {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Identification => "identification",
            Self::Certificate => "certificate",
            Self::Contract => "contract",
            Self::Application => "application",
            Self::Financial => "financial",
            Self::Government => "government",
            Self::Education => "education",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A document type that already exists in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingDocumentType {
    pub id: String,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub category: Category,
}

/// One template inside a suggested group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedTemplate {
    pub id: String,
    pub display_name: String,
    pub filename: String,
    pub suggested_variant: String,
    /// Dense 0-based position within the group.
    pub variant_order: usize,
}

/// A candidate document type built from one cluster of templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedGroup {
    pub suggested_name: String,
    pub suggested_code: String,
    pub suggested_category: Category,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_type_id: Option<String>,
    pub templates: Vec<SuggestedTemplate>,
}
