//! Rule-driven field classification.
//!
//! Active rules of each family are compiled and priority-sorted once per
//! classifier. A rule that fails to compile is logged and skipped, so one bad
//! rule never blocks a template.

use serde::Serialize;
use tracing::{debug, warn};

use formsage_rules::{
    CompiledRule, FieldDefinition, FieldMap, InputType, RuleKind, RuleMatch, RuleSnapshot,
};

use crate::builtin::{classify_builtin, detect_entity};

/// Which source produced the data type of a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionPath {
    DataTypeRules,
    FieldRules,
    BuiltIn,
}

/// Strip placeholder delimiters: `{{ id_number }}` → `id_number`.
pub fn bare_key(placeholder: &str) -> String {
    placeholder
        .trim()
        .trim_start_matches('{')
        .trim_end_matches('}')
        .trim()
        .to_string()
}

/// Classifier bound to one rule snapshot.
#[derive(Debug, Clone)]
pub struct FieldClassifier {
    data_type_rules: Vec<CompiledRule>,
    field_rules: Vec<CompiledRule>,
    entity_rules: Vec<CompiledRule>,
    /// Whether each family has active rules, compiled or not.
    has_data_type_rules: bool,
    has_field_rules: bool,
}

impl FieldClassifier {
    pub fn new(snapshot: &RuleSnapshot) -> Self {
        Self {
            data_type_rules: compile_family(snapshot, RuleKind::DataType),
            field_rules: compile_family(snapshot, RuleKind::Field),
            entity_rules: compile_family(snapshot, RuleKind::Entity),
            has_data_type_rules: snapshot.has_active(RuleKind::DataType),
            has_field_rules: snapshot.has_active(RuleKind::Field),
        }
    }

    /// Data-type rules if any are configured, else field rules, else built-in.
    ///
    /// A family whose rules all fail to compile still owns the path; its
    /// rules just match nothing.
    pub fn detection_path(&self) -> DetectionPath {
        if self.has_data_type_rules {
            DetectionPath::DataTypeRules
        } else if self.has_field_rules {
            DetectionPath::FieldRules
        } else {
            DetectionPath::BuiltIn
        }
    }

    /// Classify a single placeholder. `order` is left at 0.
    pub fn classify(&self, placeholder: &str) -> FieldDefinition {
        let key = bare_key(placeholder);

        let mut def = match self.detection_path() {
            DetectionPath::DataTypeRules => self.classify_with(&self.data_type_rules, placeholder, &key),
            DetectionPath::FieldRules => self.classify_with(&self.field_rules, placeholder, &key),
            DetectionPath::BuiltIn => classify_builtin(placeholder, &key),
        };

        if let Some((rule, _)) = first_match(&self.entity_rules, &key) {
            if let Some(entity) = rule.entity {
                def.entity = entity;
            }
        }
        def
    }

    /// Classify placeholders in document order.
    ///
    /// Repeated keys keep their first occurrence, so `order` stays dense.
    pub fn classify_all<I, S>(&self, placeholders: I) -> FieldMap
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = FieldMap::new();
        for placeholder in placeholders {
            let placeholder = placeholder.as_ref();
            let key = bare_key(placeholder);
            if key.is_empty() {
                debug!("Skipping empty placeholder {:?}", placeholder);
                continue;
            }
            if map.contains_key(&key) {
                debug!("Skipping repeated placeholder {}", key);
                continue;
            }
            let mut def = self.classify(placeholder);
            def.order = map.len();
            map.insert(key, def);
        }
        map
    }

    fn classify_with(&self, rules: &[CompiledRule], placeholder: &str, key: &str) -> FieldDefinition {
        let mut def = FieldDefinition::text(placeholder);
        def.entity = detect_entity(key);

        match first_match(rules, key) {
            Some((rule, m)) => apply_rule(rule, &m, key, &mut def),
            None => debug!("No rule matched {}", key),
        }
        def
    }
}

/// Compile the active rules of one family, highest priority first.
fn compile_family(snapshot: &RuleSnapshot, kind: RuleKind) -> Vec<CompiledRule> {
    let mut compiled: Vec<CompiledRule> = snapshot
        .active(kind)
        .filter_map(|rule| match CompiledRule::compile(kind, rule) {
            Ok(c) => Some(c),
            Err(e) => {
                warn!("Skipping {} rule '{}': {}", kind, rule.code, e);
                None
            }
        })
        .collect();
    // Stable: equal priorities keep insertion order.
    compiled.sort_by(|a, b| b.priority().cmp(&a.priority()));
    compiled
}

fn first_match<'a>(rules: &'a [CompiledRule], key: &str) -> Option<(&'a CompiledRule, RuleMatch)> {
    rules.iter().find_map(|rule| rule.apply(key).map(|m| (rule, m)))
}

fn apply_rule(rule: &CompiledRule, m: &RuleMatch, key: &str, def: &mut FieldDefinition) {
    if let Some(data_type) = rule.data_type {
        def.set_data_type(data_type);
    }
    if let Some(input_type) = rule.input_type {
        def.input_type = input_type;
    }
    if let Some(entity) = rule.entity {
        def.entity = entity;
    }

    let mut validation = rule.rule.validation.clone();
    if validation.options.is_empty() && !rule.rule.options.is_empty() {
        validation.options = rule.rule.options.clone();
    }
    if !validation.is_empty() {
        def.validation = Some(validation);
    }

    if let Some(template) = &rule.rule.group_name_template {
        def.group = Some(resolve_group_name(template, m));
        def.group_order = m.numeric_capture();
    }

    match def.input_type {
        InputType::Radio => {
            def.is_radio_group = true;
            def.radio_group_id = Some(def.group.clone().unwrap_or_else(|| key.to_string()));
            def.radio_options = def.options().to_vec();
        }
        InputType::Merged => {
            def.is_merged = true;
            def.separator = Some(rule.rule.separator.clone().unwrap_or_else(|| " ".to_string()));
            def.merged_fields = m.matched_captures();
        }
        _ => {}
    }
}

/// Fill `{prefix}` / `{suffix}` from the match; missing captures become empty.
pub fn resolve_group_name(template: &str, m: &RuleMatch) -> String {
    template
        .replace("{prefix}", m.prefix.as_deref().unwrap_or(""))
        .replace("{suffix}", m.suffix.as_deref().unwrap_or(""))
}

/// Classify a template's placeholders against a rule snapshot.
pub fn classify_placeholders<I, S>(snapshot: &RuleSnapshot, placeholders: I) -> FieldMap
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    FieldClassifier::new(snapshot).classify_all(placeholders)
}
