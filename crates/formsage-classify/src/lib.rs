//! FormSage Classify — turns raw `{{placeholder}}` tokens into field definitions.
//!
//! Configured data-type rules are the primary path, legacy field rules the
//! secondary one, and the built-in cascade covers the case where no rules
//! are configured at all.

pub mod builtin;
pub mod classifier;
pub mod tables;

pub use builtin::classify_builtin;
pub use classifier::{bare_key, classify_placeholders, FieldClassifier};
