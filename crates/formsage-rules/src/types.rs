//! Closed enumerations for field outcomes and their rule-code tables.
//!
//! Rules store outcomes as bare strings. Every accepted string is listed in
//! one of the tables below; anything else is an unknown code and is rejected
//! instead of falling back to a default.

use serde::{Deserialize, Serialize};

use formsage_core::{Error, Result};

/// Semantic kind of value a placeholder holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    #[default]
    Text,
    IdNumber,
    Date,
    Time,
    Number,
    Address,
    Province,
    District,
    Subdistrict,
    Country,
    NamePrefix,
    Name,
    Weekday,
    Phone,
    Email,
    HouseCode,
    Zodiac,
    LunarMonth,
    OfficerName,
}

/// Rule code → data type. Aliases map onto the canonical variant.
const DATA_TYPE_CODES: &[(&str, DataType)] = &[
    ("text", DataType::Text),
    ("id_number", DataType::IdNumber),
    ("id_card", DataType::IdNumber),
    ("citizen_id", DataType::IdNumber),
    ("date", DataType::Date),
    ("time", DataType::Time),
    ("number", DataType::Number),
    ("address", DataType::Address),
    ("province", DataType::Province),
    ("district", DataType::District),
    ("subdistrict", DataType::Subdistrict),
    ("sub_district", DataType::Subdistrict),
    ("country", DataType::Country),
    ("name_prefix", DataType::NamePrefix),
    ("prefix", DataType::NamePrefix),
    ("name", DataType::Name),
    ("weekday", DataType::Weekday),
    ("phone", DataType::Phone),
    ("tel", DataType::Phone),
    ("email", DataType::Email),
    ("house_code", DataType::HouseCode),
    ("zodiac", DataType::Zodiac),
    ("lunar_month", DataType::LunarMonth),
    ("officer_name", DataType::OfficerName),
];

impl DataType {
    /// Resolve a rule code (case-insensitive).
    pub fn from_code(code: &str) -> Result<Self> {
        lookup(DATA_TYPE_CODES, code).ok_or_else(|| Error::UnknownCode {
            field: "data_type",
            value: code.to_string(),
        })
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::IdNumber => "id_number",
            Self::Date => "date",
            Self::Time => "time",
            Self::Number => "number",
            Self::Address => "address",
            Self::Province => "province",
            Self::District => "district",
            Self::Subdistrict => "subdistrict",
            Self::Country => "country",
            Self::NamePrefix => "name_prefix",
            Self::Name => "name",
            Self::Weekday => "weekday",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::HouseCode => "house_code",
            Self::Zodiac => "zodiac",
            Self::LunarMonth => "lunar_month",
            Self::OfficerName => "officer_name",
        }
    }

    /// Widget used when a rule names a data type but no input type.
    pub fn default_input_type(&self) -> InputType {
        match self {
            Self::Date => InputType::Date,
            Self::Time => InputType::Time,
            Self::Number => InputType::Number,
            Self::Address => InputType::Textarea,
            Self::Province
            | Self::NamePrefix
            | Self::Weekday
            | Self::Zodiac
            | Self::LunarMonth => InputType::Select,
            Self::Text
            | Self::IdNumber
            | Self::Name
            | Self::Phone
            | Self::Email
            | Self::HouseCode
            | Self::District
            | Self::Subdistrict
            | Self::Country
            | Self::OfficerName => InputType::Text,
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Form widget rendered for a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    #[default]
    Text,
    Select,
    Date,
    Time,
    Number,
    Textarea,
    Checkbox,
    Radio,
    Merged,
}

const INPUT_TYPE_CODES: &[(&str, InputType)] = &[
    ("text", InputType::Text),
    ("select", InputType::Select),
    ("dropdown", InputType::Select),
    ("date", InputType::Date),
    ("time", InputType::Time),
    ("number", InputType::Number),
    ("textarea", InputType::Textarea),
    ("checkbox", InputType::Checkbox),
    ("radio", InputType::Radio),
    ("merged", InputType::Merged),
];

impl InputType {
    pub fn from_code(code: &str) -> Result<Self> {
        lookup(INPUT_TYPE_CODES, code).ok_or_else(|| Error::UnknownCode {
            field: "input_type",
            value: code.to_string(),
        })
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Select => "select",
            Self::Date => "date",
            Self::Time => "time",
            Self::Number => "number",
            Self::Textarea => "textarea",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Merged => "merged",
        }
    }
}

impl std::fmt::Display for InputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Role the placeholder's value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    Child,
    Mother,
    Father,
    Informant,
    Registrar,
    #[default]
    General,
}

const ENTITY_CODES: &[(&str, Entity)] = &[
    ("child", Entity::Child),
    ("mother", Entity::Mother),
    ("father", Entity::Father),
    ("informant", Entity::Informant),
    ("registrar", Entity::Registrar),
    ("general", Entity::General),
];

impl Entity {
    pub fn from_code(code: &str) -> Result<Self> {
        lookup(ENTITY_CODES, code).ok_or_else(|| Error::UnknownCode {
            field: "entity",
            value: code.to_string(),
        })
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Child => "child",
            Self::Mother => "mother",
            Self::Father => "father",
            Self::Informant => "informant",
            Self::Registrar => "registrar",
            Self::General => "general",
        }
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

fn lookup<T: Copy>(table: &[(&str, T)], code: &str) -> Option<T> {
    let code = code.trim().to_lowercase();
    table
        .iter()
        .find(|(name, _)| *name == code)
        .map(|(_, value)| *value)
}
