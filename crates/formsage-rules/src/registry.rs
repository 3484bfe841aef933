//! Administrator-facing rule table and the read-only snapshot handed to
//! each classification call.

use std::path::Path;

use chrono::Utc;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use formsage_core::{Error, Result};

use crate::rule::{CompiledRule, PatternRule, RuleKind};

/// Every rule family as it stood at one instant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSnapshot {
    #[serde(default)]
    pub data_type_rules: Vec<PatternRule>,
    #[serde(default)]
    pub field_rules: Vec<PatternRule>,
    #[serde(default)]
    pub entity_rules: Vec<PatternRule>,
}

/// A rule that failed validation.
#[derive(Debug, Clone, Serialize)]
pub struct RuleIssue {
    pub kind: RuleKind,
    pub code: String,
    pub message: String,
}

impl RuleSnapshot {
    /// Load a rule set from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let snapshot: RuleSnapshot = serde_json::from_str(&raw)?;
        info!(
            "Loaded rules from {}: data_type={}, field={}, entity={}",
            path.display(),
            snapshot.data_type_rules.len(),
            snapshot.field_rules.len(),
            snapshot.entity_rules.len()
        );
        Ok(snapshot)
    }

    pub fn rules(&self, kind: RuleKind) -> &[PatternRule] {
        match kind {
            RuleKind::DataType => &self.data_type_rules,
            RuleKind::Field => &self.field_rules,
            RuleKind::Entity => &self.entity_rules,
        }
    }

    fn rules_mut(&mut self, kind: RuleKind) -> &mut Vec<PatternRule> {
        match kind {
            RuleKind::DataType => &mut self.data_type_rules,
            RuleKind::Field => &mut self.field_rules,
            RuleKind::Entity => &mut self.entity_rules,
        }
    }

    /// Active rules of one family, in stored order.
    pub fn active(&self, kind: RuleKind) -> impl Iterator<Item = &PatternRule> {
        self.rules(kind).iter().filter(|r| r.is_active)
    }

    pub fn has_active(&self, kind: RuleKind) -> bool {
        self.active(kind).next().is_some()
    }

    /// Compile every rule and collect the ones that would be rejected.
    pub fn validate(&self) -> Vec<RuleIssue> {
        let mut issues = Vec::new();
        for &kind in RuleKind::all() {
            for rule in self.rules(kind) {
                if let Err(e) = CompiledRule::compile(kind, rule) {
                    issues.push(RuleIssue {
                        kind,
                        code: rule.code.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }
        issues
    }
}

/// In-memory rule table with validation on every write.
///
/// Readers take a [`RuleSnapshot`] per classification call, so an edit is
/// visible from the next call on and never mid-classification.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    inner: RwLock<RuleSnapshot>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a stored rule set, rejecting it if any rule is invalid.
    pub fn from_snapshot(snapshot: RuleSnapshot) -> Result<Self> {
        let registry = Self::new();
        for &kind in RuleKind::all() {
            for rule in snapshot.rules(kind) {
                registry.create(kind, rule.clone())?;
            }
        }
        Ok(registry)
    }

    /// Validate and store a new rule. Returns the stored rule (with its id).
    pub fn create(&self, kind: RuleKind, mut rule: PatternRule) -> Result<PatternRule> {
        CompiledRule::compile(kind, &rule)?;

        let mut inner = self.inner.write();
        let rules = inner.rules_mut(kind);
        if rules.iter().any(|r| r.code == rule.code) {
            return Err(Error::DuplicateCode(format!("{} rule '{}'", kind, rule.code)));
        }
        if rule.id.is_none() {
            rule.id = Some(Uuid::new_v4().to_string());
        }
        if rules.iter().any(|r| r.id == rule.id) {
            return Err(Error::DuplicateCode(format!(
                "{} rule id '{}'",
                kind,
                rule.id.as_deref().unwrap_or_default()
            )));
        }
        rule.updated_at = Some(Utc::now());
        rules.push(rule.clone());
        info!("Created {} rule '{}'", kind, rule.code);
        Ok(rule)
    }

    /// Validate and replace an existing rule, keeping its id.
    pub fn update(&self, kind: RuleKind, id: &str, mut rule: PatternRule) -> Result<PatternRule> {
        CompiledRule::compile(kind, &rule)?;

        let mut inner = self.inner.write();
        let rules = inner.rules_mut(kind);
        let index = rules
            .iter()
            .position(|r| r.id.as_deref() == Some(id))
            .ok_or_else(|| Error::NotFound(format!("{} rule {}", kind, id)))?;
        if rules
            .iter()
            .enumerate()
            .any(|(i, r)| i != index && r.code == rule.code)
        {
            return Err(Error::DuplicateCode(format!("{} rule '{}'", kind, rule.code)));
        }
        rule.id = Some(id.to_string());
        rule.updated_at = Some(Utc::now());
        rules[index] = rule.clone();
        info!("Updated {} rule '{}'", kind, rule.code);
        Ok(rule)
    }

    pub fn delete(&self, kind: RuleKind, id: &str) -> Result<()> {
        let mut inner = self.inner.write();
        let rules = inner.rules_mut(kind);
        let before = rules.len();
        rules.retain(|r| r.id.as_deref() != Some(id));
        if rules.len() == before {
            return Err(Error::NotFound(format!("{} rule {}", kind, id)));
        }
        info!("Deleted {} rule {}", kind, id);
        Ok(())
    }

    pub fn get(&self, kind: RuleKind, id: &str) -> Option<PatternRule> {
        self.inner
            .read()
            .rules(kind)
            .iter()
            .find(|r| r.id.as_deref() == Some(id))
            .cloned()
    }

    /// Copy of the current rules, detached from later edits.
    pub fn snapshot(&self) -> RuleSnapshot {
        self.inner.read().clone()
    }

    pub fn len(&self) -> usize {
        let inner = self.inner.read();
        RuleKind::all().iter().map(|&k| inner.rules(k).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date_rule() -> PatternRule {
        PatternRule::new("date", r"date", 10).with_data_type("date")
    }

    #[test]
    fn test_create_assigns_id() {
        let registry = RuleRegistry::new();
        let stored = registry.create(RuleKind::DataType, date_rule()).unwrap();
        assert!(stored.id.is_some());
        assert!(stored.updated_at.is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_create_rejects_invalid_pattern() {
        let registry = RuleRegistry::new();
        let bad = PatternRule::new("bad", r"(", 1).with_data_type("text");
        let err = registry.create(RuleKind::DataType, bad).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_create_rejects_unknown_code() {
        let registry = RuleRegistry::new();
        let bad = PatternRule::new("odd", r"odd", 1).with_data_type("colour");
        assert!(matches!(
            registry.create(RuleKind::DataType, bad),
            Err(Error::UnknownCode { .. })
        ));
    }

    #[test]
    fn test_duplicate_code_per_family() {
        let registry = RuleRegistry::new();
        registry.create(RuleKind::DataType, date_rule()).unwrap();
        let err = registry.create(RuleKind::DataType, date_rule()).unwrap_err();
        assert!(err.is_duplicate());
        // Same code in another family is fine.
        registry.create(RuleKind::Field, date_rule()).unwrap();
    }

    #[test]
    fn test_update_validates_and_keeps_id() {
        let registry = RuleRegistry::new();
        let stored = registry.create(RuleKind::DataType, date_rule()).unwrap();
        let id = stored.id.unwrap();

        let bad = PatternRule::new("date", r"[", 10);
        assert!(registry.update(RuleKind::DataType, &id, bad).is_err());
        assert_eq!(registry.get(RuleKind::DataType, &id).unwrap().pattern, "date");

        let good = PatternRule::new("date", r"^dt_", 20).with_data_type("date");
        let updated = registry.update(RuleKind::DataType, &id, good).unwrap();
        assert_eq!(updated.id.as_deref(), Some(id.as_str()));
        assert_eq!(registry.get(RuleKind::DataType, &id).unwrap().priority, 20);
    }

    #[test]
    fn test_update_and_delete_missing() {
        let registry = RuleRegistry::new();
        assert!(matches!(
            registry.update(RuleKind::Field, "nope", date_rule()),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            registry.delete(RuleKind::Field, "nope"),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_snapshot_is_detached() {
        let registry = RuleRegistry::new();
        let stored = registry.create(RuleKind::DataType, date_rule()).unwrap();
        let snapshot = registry.snapshot();
        registry
            .delete(RuleKind::DataType, stored.id.as_deref().unwrap())
            .unwrap();
        assert_eq!(snapshot.data_type_rules.len(), 1);
        assert!(registry.snapshot().data_type_rules.is_empty());
    }

    #[test]
    fn test_snapshot_validate_reports_out_of_band_rules() {
        let snapshot = RuleSnapshot {
            field_rules: vec![PatternRule::new("broken", r"(?P<x", 1)],
            entity_rules: vec![PatternRule::new("mother", r"^m_", 1)],
            ..RuleSnapshot::default()
        };
        let issues = snapshot.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, RuleKind::Field);
        assert_eq!(issues[0].code, "broken");
        assert!(RuleRegistry::from_snapshot(snapshot).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        std::fs::write(
            &path,
            r#"{"data_type_rules": [{"code": "d", "pattern": "date", "data_type": "date"}]}"#,
        )
        .unwrap();
        let snapshot = RuleSnapshot::load(&path).unwrap();
        assert!(snapshot.has_active(RuleKind::DataType));
        assert!(!snapshot.has_active(RuleKind::Field));
    }
}
