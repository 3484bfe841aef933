//! FormSage Cluster — groups unassigned templates into suggested document types.
//!
//! Template names are split into a base and a variant label, bases are
//! fuzzy-merged, variants ordered, and each group scored, categorised and
//! given a code. Accepted suggestions are applied through a
//! [`DocumentTypeCatalog`].

pub mod assign;
pub mod category;
pub mod decompose;
pub mod merge;
pub mod score;
pub mod suggest;
pub mod types;
pub mod variant;

pub use assign::{
    assign_suggestions, AssignmentReport, DocumentTypeCatalog, InMemoryCatalog, TemplateAssignment,
};
pub use category::{generate_code, guess_category};
pub use decompose::decompose_name;
pub use merge::{merge_groups, normalize_key};
pub use score::confidence;
pub use suggest::suggest_groups;
pub use types::*;
pub use variant::{assign_variant_orders, variant_order};
