//! Pattern rules and their compiled form.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use formsage_core::{Error, Result};

use crate::types::{DataType, Entity, InputType};

/// Which rule family a rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Canonical data-type rules; preferred whenever any are configured.
    DataType,
    /// Legacy field rules, consulted only when no data-type rules exist.
    Field,
    /// Owner classification (child/mother/father/...).
    Entity,
}

impl RuleKind {
    pub fn all() -> &'static [RuleKind] {
        &[Self::DataType, Self::Field, Self::Entity]
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DataType => write!(f, "data_type"),
            Self::Field => write!(f, "field"),
            Self::Entity => write!(f, "entity"),
        }
    }
}

/// Structured constraints attached to a rule or a field definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
}

impl ValidationSpec {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn pattern(pattern: &str) -> Self {
        Self {
            pattern: Some(pattern.to_string()),
            ..Self::default()
        }
    }

    pub fn options<S: AsRef<str>>(options: &[S]) -> Self {
        Self {
            options: options.iter().map(|o| o.as_ref().to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn range(min: i64, max: i64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            ..Self::default()
        }
    }
}

/// An administrator-configured mapping from a placeholder-name pattern to an outcome.
///
/// Data-type, field and entity rules share this shape. Outcome codes are kept
/// as the strings the administrator entered; [`CompiledRule`] resolves them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternRule {
    #[serde(default)]
    pub id: Option<String>,
    pub code: String,
    #[serde(default)]
    pub name: String,
    pub pattern: String,
    /// Higher is tried first.
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub data_type: Option<String>,
    #[serde(default)]
    pub input_type: Option<String>,
    /// Owner code for entity rules. Falls back to `code` when absent.
    #[serde(default)]
    pub entity: Option<String>,
    /// Group name with `{prefix}` / `{suffix}` slots filled from captures.
    #[serde(default)]
    pub group_name_template: Option<String>,
    #[serde(default)]
    pub validation: ValidationSpec,
    #[serde(default)]
    pub options: Vec<String>,
    /// Joiner for merged fields.
    #[serde(default)]
    pub separator: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl PatternRule {
    /// Minimal rule: code, pattern and priority, everything else unset.
    pub fn new(code: &str, pattern: &str, priority: i32) -> Self {
        Self {
            id: None,
            code: code.to_string(),
            name: code.to_string(),
            pattern: pattern.to_string(),
            priority,
            is_active: true,
            data_type: None,
            input_type: None,
            entity: None,
            group_name_template: None,
            validation: ValidationSpec::default(),
            options: Vec::new(),
            separator: None,
            color: None,
            icon: None,
            updated_at: None,
        }
    }

    pub fn with_data_type(mut self, code: &str) -> Self {
        self.data_type = Some(code.to_string());
        self
    }

    pub fn with_input_type(mut self, code: &str) -> Self {
        self.input_type = Some(code.to_string());
        self
    }

    pub fn with_entity(mut self, code: &str) -> Self {
        self.entity = Some(code.to_string());
        self
    }

    pub fn with_group(mut self, template: &str) -> Self {
        self.group_name_template = Some(template.to_string());
        self
    }

    pub fn with_validation(mut self, validation: ValidationSpec) -> Self {
        self.validation = validation;
        self
    }

    pub fn with_options<S: AsRef<str>>(mut self, options: &[S]) -> Self {
        self.options = options.iter().map(|o| o.as_ref().to_string()).collect();
        self
    }
}

/// Capture data from a rule whose pattern matched a bare key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleMatch {
    /// Positional captures (group 1..n); `None` for groups that did not participate.
    pub captures: Vec<Option<String>>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

impl RuleMatch {
    /// First capture that parses as an integer.
    pub fn numeric_capture(&self) -> Option<u32> {
        self.captures
            .iter()
            .flatten()
            .find_map(|c| c.trim().parse::<u32>().ok())
    }

    /// Captures that participated in the match, in group order.
    pub fn matched_captures(&self) -> Vec<String> {
        self.captures.iter().flatten().cloned().collect()
    }
}

/// A rule with its pattern compiled and outcome codes resolved.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub kind: RuleKind,
    pub rule: PatternRule,
    pub regex: Regex,
    pub data_type: Option<DataType>,
    pub input_type: Option<InputType>,
    pub entity: Option<Entity>,
}

impl CompiledRule {
    /// Compile the pattern and resolve every outcome code.
    pub fn compile(kind: RuleKind, rule: &PatternRule) -> Result<Self> {
        let regex = Regex::new(&rule.pattern).map_err(|e| Error::InvalidPattern {
            code: rule.code.clone(),
            reason: e.to_string(),
        })?;

        let data_type = rule
            .data_type
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .map(DataType::from_code)
            .transpose()?;
        let input_type = rule
            .input_type
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .map(InputType::from_code)
            .transpose()?;

        let entity = match kind {
            RuleKind::Entity => {
                let code = rule.entity.as_deref().unwrap_or(&rule.code);
                Some(Entity::from_code(code)?)
            }
            RuleKind::DataType | RuleKind::Field => rule
                .entity
                .as_deref()
                .filter(|c| !c.trim().is_empty())
                .map(Entity::from_code)
                .transpose()?,
        };

        if let Some(pattern) = &rule.validation.pattern {
            Regex::new(pattern).map_err(|e| Error::InvalidPattern {
                code: format!("{}.validation", rule.code),
                reason: e.to_string(),
            })?;
        }

        Ok(Self {
            kind,
            rule: rule.clone(),
            regex,
            data_type,
            input_type,
            entity,
        })
    }

    /// Match against a bare placeholder key.
    pub fn apply(&self, key: &str) -> Option<RuleMatch> {
        let caps = self.regex.captures(key)?;
        let captures = (1..caps.len())
            .map(|i| caps.get(i).map(|m| m.as_str().to_string()))
            .collect::<Vec<_>>();
        let named = |name: &str| caps.name(name).map(|m| m.as_str().to_string());
        let prefix = named("prefix").or_else(|| captures.first().cloned().flatten());
        let suffix = named("suffix").or_else(|| captures.get(1).cloned().flatten());
        Some(RuleMatch {
            captures,
            prefix,
            suffix,
        })
    }

    pub fn priority(&self) -> i32 {
        self.rule.priority
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_resolves_codes() {
        let rule = PatternRule::new("dob", r"^(\w+)_dob$", 10)
            .with_data_type("date")
            .with_entity("mother");
        let compiled = CompiledRule::compile(RuleKind::DataType, &rule).unwrap();
        assert_eq!(compiled.data_type, Some(DataType::Date));
        assert_eq!(compiled.entity, Some(Entity::Mother));
        assert_eq!(compiled.input_type, None);
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let rule = PatternRule::new("broken", r"^(unclosed", 1);
        let err = CompiledRule::compile(RuleKind::Field, &rule).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
    }

    #[test]
    fn test_backreference_rejected() {
        let rule = PatternRule::new("backref", r"(a)\1", 1);
        assert!(CompiledRule::compile(RuleKind::Field, &rule).is_err());
    }

    #[test]
    fn test_invalid_validation_pattern_rejected() {
        let rule = PatternRule::new("v", r"^x$", 1).with_validation(ValidationSpec::pattern("[a-"));
        assert!(CompiledRule::compile(RuleKind::DataType, &rule).is_err());
    }

    #[test]
    fn test_entity_rule_falls_back_to_code() {
        let rule = PatternRule::new("father", r"^f_", 5);
        let compiled = CompiledRule::compile(RuleKind::Entity, &rule).unwrap();
        assert_eq!(compiled.entity, Some(Entity::Father));

        let unknown = PatternRule::new("uncle", r"^u_", 5);
        assert!(CompiledRule::compile(RuleKind::Entity, &unknown).is_err());
    }

    #[test]
    fn test_apply_captures() {
        let rule = PatternRule::new("digits", r"^(id)_(\d+)$", 1);
        let compiled = CompiledRule::compile(RuleKind::Field, &rule).unwrap();
        let m = compiled.apply("id_7").unwrap();
        assert_eq!(m.prefix.as_deref(), Some("id"));
        assert_eq!(m.suffix.as_deref(), Some("7"));
        assert_eq!(m.numeric_capture(), Some(7));
        assert!(compiled.apply("name").is_none());
    }

    #[test]
    fn test_named_captures_win() {
        let rule = PatternRule::new("named", r"^(?P<suffix>[a-z]+)-(?P<prefix>[a-z]+)$", 1);
        let compiled = CompiledRule::compile(RuleKind::Field, &rule).unwrap();
        let m = compiled.apply("left-right").unwrap();
        assert_eq!(m.prefix.as_deref(), Some("right"));
        assert_eq!(m.suffix.as_deref(), Some("left"));
        assert_eq!(m.numeric_capture(), None);
    }

    #[test]
    fn test_rule_json_defaults() {
        let rule: PatternRule =
            serde_json::from_str(r#"{"code": "x", "pattern": "^x$"}"#).unwrap();
        assert!(rule.is_active);
        assert_eq!(rule.priority, 0);
        assert!(rule.validation.is_empty());
    }
}
