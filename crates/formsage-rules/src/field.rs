//! Field definitions produced for each placeholder of a template.

use std::collections::HashMap;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::rule::ValidationSpec;
use crate::types::{DataType, Entity, InputType};

/// Classification result for one placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Original token, delimiters included.
    pub placeholder: String,
    pub data_type: DataType,
    pub entity: Entity,
    pub input_type: InputType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_order: Option<u32>,
    /// Dense 0-based document position.
    pub order: usize,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_merged: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub merged_fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_radio_group: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radio_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub radio_options: Vec<String>,
}

impl FieldDefinition {
    /// Free-text definition owned by nobody in particular.
    pub fn text(placeholder: &str) -> Self {
        Self {
            placeholder: placeholder.to_string(),
            data_type: DataType::Text,
            entity: Entity::General,
            input_type: InputType::Text,
            validation: None,
            group: None,
            group_order: None,
            order: 0,
            is_merged: false,
            merged_fields: Vec::new(),
            separator: None,
            is_radio_group: false,
            radio_group_id: None,
            radio_options: Vec::new(),
        }
    }

    /// Set data type together with its default widget.
    pub fn set_data_type(&mut self, data_type: DataType) {
        self.data_type = data_type;
        self.input_type = data_type.default_input_type();
    }

    /// Options offered by the widget, if any.
    pub fn options(&self) -> &[String] {
        self.validation
            .as_ref()
            .map(|v| v.options.as_slice())
            .unwrap_or(&[])
    }
}

/// Placeholder key → definition, kept in document order.
///
/// Serializes as a JSON object whose keys appear in document order; on the way
/// back in, order is restored from each definition's `order`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    entries: Vec<(String, FieldDefinition)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a definition. Returns `false` and keeps the first one if the key exists.
    pub fn insert(&mut self, key: String, definition: FieldDefinition) -> bool {
        if self.contains_key(&key) {
            return false;
        }
        self.entries.push((key, definition));
        true
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn get(&self, key: &str) -> Option<&FieldDefinition> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, d)| d)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDefinition)> {
        self.entries.iter().map(|(k, d)| (k.as_str(), d))
    }

    /// Definitions sharing a group, sorted by `group_order`.
    pub fn group(&self, name: &str) -> Vec<&FieldDefinition> {
        let mut members: Vec<&FieldDefinition> = self
            .entries
            .iter()
            .map(|(_, d)| d)
            .filter(|d| d.group.as_deref() == Some(name))
            .collect();
        members.sort_by_key(|d| (d.group_order.unwrap_or(u32::MAX), d.order));
        members
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, d)| (k, d)))
    }
}

impl<'de> Deserialize<'de> for FieldMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = HashMap::<String, FieldDefinition>::deserialize(deserializer)?;
        let mut entries: Vec<(String, FieldDefinition)> = raw.into_iter().collect();
        entries.sort_by(|a, b| a.1.order.cmp(&b.1.order).then_with(|| a.0.cmp(&b.0)));
        Ok(Self { entries })
    }
}
