//! FormSage Rules — typed field outcomes, administrator-configured pattern
//! rules, and the per-call rule snapshot the classifier reads.
//!
//! Rules are validated when they enter the registry; the classifier still
//! treats any rule that fails to compile as "matches nothing".

pub mod field;
pub mod registry;
pub mod rule;
pub mod types;

pub use field::{FieldDefinition, FieldMap};
pub use registry::{RuleIssue, RuleRegistry, RuleSnapshot};
pub use rule::{CompiledRule, PatternRule, RuleKind, RuleMatch, ValidationSpec};
pub use types::{DataType, Entity, InputType};
