//! Built-in placeholder classification, used when no rules are configured.
//!
//! The cascade is ordered: entity prefix, ad-hoc prefix group, the semantic
//! checks in [`CASCADE`], then the numbered-token patterns. Later semantic
//! checks are more general and must not shadow earlier ones.

use once_cell::sync::Lazy;
use regex::Regex;

use formsage_rules::{DataType, Entity, FieldDefinition, InputType, ValidationSpec};

use crate::tables::{
    CHILD_FIELDS, ENTITY_PREFIXES, KNOWN_PATTERN_PREFIXES, LUNAR_MONTHS, NAME_PREFIXES,
    PROVINCES, WEEKDAYS, ZODIAC_SIGNS,
};

static PREFIX_GROUP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([^_\s$]+)_(.+)$").unwrap());
static FOUR_DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^4d_(\d+)$").unwrap());
static NUMBERED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^n(\d+)$").unwrap());
static DOLLAR_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\$(\d+)_(\w+)$").unwrap());
static DOLLAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\$(\d+)$").unwrap());

/// One semantic check of the cascade.
pub struct Check {
    pub name: &'static str,
    matches: fn(&str) -> bool,
    apply: fn(&mut FieldDefinition),
}

/// Semantic checks in precedence order. First match wins.
pub static CASCADE: &[Check] = &[
    Check { name: "id_number", matches: is_id_number, apply: apply_id_number },
    Check { name: "name_prefix", matches: is_name_prefix, apply: apply_name_prefix },
    Check { name: "age", matches: is_age, apply: apply_age },
    Check { name: "date", matches: is_date, apply: apply_date },
    Check { name: "time", matches: is_time, apply: apply_time },
    Check { name: "weekday", matches: is_weekday, apply: apply_weekday },
    Check { name: "province", matches: is_province, apply: apply_province },
    Check { name: "subdistrict", matches: is_subdistrict, apply: apply_subdistrict },
    Check { name: "district", matches: is_district, apply: apply_district },
    Check { name: "country", matches: is_country, apply: apply_country },
    Check { name: "address", matches: is_address, apply: apply_address },
    Check { name: "name", matches: is_name, apply: apply_name },
    Check { name: "house_code", matches: is_house_code, apply: apply_house_code },
    Check { name: "zodiac", matches: is_zodiac, apply: apply_zodiac },
    Check { name: "lunar_month", matches: is_lunar_month, apply: apply_lunar_month },
    Check { name: "registration_office", matches: is_registration_office, apply: apply_registration_office },
    Check { name: "place_of_birth", matches: is_place_of_birth, apply: apply_place_of_birth },
];

/// Classify a bare key with the fixed cascade.
pub fn classify_builtin(placeholder: &str, key: &str) -> FieldDefinition {
    let lower = key.trim().to_lowercase();
    let mut def = FieldDefinition::text(placeholder);

    def.entity = detect_entity(&lower);
    def.group = prefix_group(&lower);

    let matched = match CASCADE.iter().find(|c| (c.matches)(&lower)) {
        Some(check) => {
            (check.apply)(&mut def);
            true
        }
        None => false,
    };

    apply_numbered_groups(&lower, &mut def, matched);
    def
}

/// Owner of a key from its entity prefix or the unprefixed child-field list.
pub fn detect_entity(key: &str) -> Entity {
    let lower = key.to_lowercase();
    if let Some((_, entity)) = ENTITY_PREFIXES.iter().find(|(p, _)| lower.starts_with(p)) {
        return *entity;
    }
    if CHILD_FIELDS.contains(&lower.as_str()) {
        return Entity::Child;
    }
    Entity::General
}

/// Ad-hoc group for `prefix_rest` keys whose prefix is not otherwise meaningful.
pub fn prefix_group(key: &str) -> Option<String> {
    let caps = PREFIX_GROUP_RE.captures(key)?;
    let prefix = caps.get(1)?.as_str();
    if KNOWN_PATTERN_PREFIXES.contains(&prefix) || prefix.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(format!("prefix_{}", prefix))
}

fn apply_numbered_groups(key: &str, def: &mut FieldDefinition, matched: bool) {
    if let Some(caps) = FOUR_DIGIT_RE.captures(key) {
        def.group = Some("4d_codes".to_string());
        def.group_order = caps[1].parse().ok();
        if !matched {
            def.set_data_type(DataType::Text);
            def.validation = Some(ValidationSpec {
                pattern: Some(r"^\d{4}$".to_string()),
                min_length: Some(4),
                max_length: Some(4),
                ..ValidationSpec::default()
            });
        }
    } else if let Some(caps) = NUMBERED_RE.captures(key) {
        def.group = Some("n_fields".to_string());
        def.group_order = caps[1].parse().ok();
    } else if let Some(caps) = DOLLAR_SUFFIX_RE.captures(key) {
        def.group = Some(format!("dollar_{}", caps[2].to_uppercase()));
        def.group_order = caps[1].parse().ok();
    } else if let Some(caps) = DOLLAR_RE.captures(key) {
        def.group = Some("dollar_fields".to_string());
        def.group_order = caps[1].parse().ok();
    } else if key == "child_no" && !matched {
        def.set_data_type(DataType::Number);
        def.validation = Some(ValidationSpec::range(1, 20));
    }
}

fn contains_any(key: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| key.contains(n))
}

fn select(def: &mut FieldDefinition, data_type: DataType, options: &[&str]) {
    def.data_type = data_type;
    def.input_type = InputType::Select;
    def.validation = Some(ValidationSpec::options(options));
}

fn is_id_number(key: &str) -> bool {
    key == "id"
        || contains_any(
            key,
            &["id_number", "idcard", "id_card", "citizen_id", "national_id", "เลขประจำตัว"],
        )
}

fn apply_id_number(def: &mut FieldDefinition) {
    def.set_data_type(DataType::IdNumber);
    def.validation = Some(ValidationSpec {
        pattern: Some(r"^\d{13}$".to_string()),
        min_length: Some(13),
        max_length: Some(13),
        ..ValidationSpec::default()
    });
}

fn is_name_prefix(key: &str) -> bool {
    contains_any(key, &["prefix", "title", "คำนำหน้า"])
}

fn apply_name_prefix(def: &mut FieldDefinition) {
    select(def, DataType::NamePrefix, NAME_PREFIXES);
}

fn is_age(key: &str) -> bool {
    key == "age" || key.starts_with("age_") || key.ends_with("_age") || key.contains("อายุ")
}

fn apply_age(def: &mut FieldDefinition) {
    def.set_data_type(DataType::Number);
    def.validation = Some(ValidationSpec::range(0, 150));
}

fn is_date(key: &str) -> bool {
    contains_any(key, &["date", "dob", "วันที่", "วันเกิด"])
}

fn apply_date(def: &mut FieldDefinition) {
    def.set_data_type(DataType::Date);
}

fn is_time(key: &str) -> bool {
    contains_any(key, &["time", "เวลา"])
}

fn apply_time(def: &mut FieldDefinition) {
    def.set_data_type(DataType::Time);
}

fn is_weekday(key: &str) -> bool {
    key == "day" || key.ends_with("_day") || contains_any(key, &["weekday", "day_of_week"])
}

fn apply_weekday(def: &mut FieldDefinition) {
    select(def, DataType::Weekday, WEEKDAYS);
}

fn is_province(key: &str) -> bool {
    contains_any(key, &["province", "changwat", "จังหวัด"])
}

fn apply_province(def: &mut FieldDefinition) {
    select(def, DataType::Province, PROVINCES);
}

fn is_subdistrict(key: &str) -> bool {
    contains_any(key, &["subdistrict", "sub_district", "tambon", "ตำบล", "แขวง"])
}

fn apply_subdistrict(def: &mut FieldDefinition) {
    def.data_type = DataType::Subdistrict;
    def.input_type = InputType::Text;
}

fn is_district(key: &str) -> bool {
    contains_any(key, &["district", "amphoe", "amphur", "อำเภอ", "เขต"])
}

fn apply_district(def: &mut FieldDefinition) {
    def.data_type = DataType::District;
    def.input_type = InputType::Text;
}

fn is_country(key: &str) -> bool {
    contains_any(key, &["country", "ประเทศ"])
}

fn apply_country(def: &mut FieldDefinition) {
    def.data_type = DataType::Country;
    def.input_type = InputType::Text;
}

fn is_address(key: &str) -> bool {
    contains_any(key, &["address", "addr", "ที่อยู่"])
}

fn apply_address(def: &mut FieldDefinition) {
    def.set_data_type(DataType::Address);
}

fn is_name(key: &str) -> bool {
    key == "name"
        || key.ends_with("_name")
        || contains_any(key, &["first_name", "last_name", "maiden_name", "surname", "ชื่อ"])
}

fn apply_name(def: &mut FieldDefinition) {
    let key = def.placeholder.to_lowercase();
    let officer = def.entity == Entity::Registrar || contains_any(&key, &["officer", "registrar"]);
    def.set_data_type(if officer { DataType::OfficerName } else { DataType::Name });
}

fn is_house_code(key: &str) -> bool {
    contains_any(key, &["house_code", "house_id", "รหัสประจำบ้าน"])
}

fn apply_house_code(def: &mut FieldDefinition) {
    def.set_data_type(DataType::HouseCode);
    def.validation = Some(ValidationSpec::pattern(r"^\d{11}$"));
}

fn is_zodiac(key: &str) -> bool {
    contains_any(key, &["zodiac", "นักษัตร"])
}

fn apply_zodiac(def: &mut FieldDefinition) {
    select(def, DataType::Zodiac, ZODIAC_SIGNS);
}

fn is_lunar_month(key: &str) -> bool {
    contains_any(key, &["lunar", "thai_month", "ข้างขึ้น", "ข้างแรม"])
}

fn apply_lunar_month(def: &mut FieldDefinition) {
    select(def, DataType::LunarMonth, LUNAR_MONTHS);
}

fn is_registration_office(key: &str) -> bool {
    contains_any(key, &["registration_office", "reg_office", "office", "สำนักทะเบียน"])
}

fn apply_registration_office(def: &mut FieldDefinition) {
    def.set_data_type(DataType::Text);
    if def.entity == Entity::General {
        def.entity = Entity::Registrar;
    }
}

fn is_place_of_birth(key: &str) -> bool {
    contains_any(key, &["birth_place", "place_of_birth", "สถานที่เกิด"])
}

fn apply_place_of_birth(def: &mut FieldDefinition) {
    def.set_data_type(DataType::Address);
}
