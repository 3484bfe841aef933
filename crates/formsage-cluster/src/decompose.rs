//! Split a template name into a base name and a variant label.
//!
//! Patterns are tried in order and the first one producing a usable split
//! wins. Keyword patterns come before the generic trailing-token catch-all,
//! which would otherwise swallow meaningful labels.

use once_cell::sync::Lazy;
use regex::Regex;

static EXTENSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(docx|doc|dotx|odt|rtf|pdf)$").unwrap());

static VARIANT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // Thai front/back/copy/original
        r"^(.+?)[\s_\-]*\(?(ด้านหน้า|ด้านหลัง|หน้า|หลัง|สำเนา|ต้นฉบับ)\)?$",
        // Thai lettered or numbered forms: แบบ ก, แบบ 2
        r"^(.+?)[\s_\-]*\(?(แบบ\s*[ก-ฮ0-9๐-๙]+)\)?$",
        // version / v2 / ver.3
        r"^(.+?)[\s_\-]+((?i:version|ver\.?|v)\s*\d+(?:\.\d+)*)$",
        // trailing bare number
        r"^(.+?)[\s_\-]+(\d+)$",
        // English front/back/copy/original
        r"^(.+?)[\s_\-]+((?i:front|back|copy|original)(?i:\s+side)?)$",
        // parenthetical suffix
        r"^(.+?)\s*\(([^()]+)\)$",
        // last short token after a separator
        r"^(.+?)[\s_\-]+([^\s_\-]{1,2})$",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Remove a known document extension and surrounding whitespace.
pub fn strip_extension(name: &str) -> String {
    EXTENSION_RE.replace(name.trim(), "").trim().to_string()
}

/// Decompose a template name into `(base, variant)`.
///
/// The variant is empty when no pattern yields a base of at least two
/// characters and a non-empty variant.
pub fn decompose_name(name: &str) -> (String, String) {
    let cleaned = strip_extension(name);

    for pattern in VARIANT_PATTERNS.iter() {
        let Some(caps) = pattern.captures(&cleaned) else {
            continue;
        };
        let base = caps
            .get(1)
            .map(|m| m.as_str().trim_end_matches(|c: char| c.is_whitespace() || c == '_' || c == '-' || c == '('))
            .unwrap_or("")
            .trim();
        let variant = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
        if base.chars().count() >= 2 && !variant.is_empty() {
            return (base.to_string(), variant.to_string());
        }
    }

    (cleaned, String::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(name: &str) -> (String, String) {
        decompose_name(name)
    }

    #[test]
    fn test_english_front_back() {
        assert_eq!(split("ID Card Front.docx"), ("ID Card".into(), "Front".into()));
        assert_eq!(split("ID Card Back.DOCX"), ("ID Card".into(), "Back".into()));
        assert_eq!(split("passport_copy"), ("passport".into(), "copy".into()));
    }

    #[test]
    fn test_thai_keywords() {
        assert_eq!(
            split("บัตรประชาชน ด้านหน้า.docx"),
            ("บัตรประชาชน".into(), "ด้านหน้า".into())
        );
        assert_eq!(split("บัตรประชาชนหลัง"), ("บัตรประชาชน".into(), "หลัง".into()));
        assert_eq!(split("ทะเบียนบ้าน (สำเนา)"), ("ทะเบียนบ้าน".into(), "สำเนา".into()));
    }

    #[test]
    fn test_thai_lettered_forms() {
        assert_eq!(split("คำร้อง แบบ ก"), ("คำร้อง".into(), "แบบ ก".into()));
        assert_eq!(split("คำร้องแบบ2.docx"), ("คำร้อง".into(), "แบบ2".into()));
    }

    #[test]
    fn test_versions_and_numbers() {
        assert_eq!(split("Contract v2"), ("Contract".into(), "v2".into()));
        assert_eq!(split("Contract version 1.1"), ("Contract".into(), "version 1.1".into()));
        assert_eq!(split("Invoice_3.pdf"), ("Invoice".into(), "3".into()));
    }

    #[test]
    fn test_parenthetical() {
        assert_eq!(split("Lease (Tenant Copy)"), ("Lease".into(), "Tenant Copy".into()));
    }

    #[test]
    fn test_catch_all_short_token() {
        assert_eq!(split("Form B"), ("Form".into(), "B".into()));
    }

    #[test]
    fn test_no_variant() {
        assert_eq!(split("สูติบัตร.docx"), ("สูติบัตร".into(), String::new()));
        assert_eq!(split("ID Card"), ("ID Card".into(), String::new()));
    }

    #[test]
    fn test_short_base_rejected() {
        // "A" is too short to be a base; falls through to the whole name.
        assert_eq!(split("A 1"), ("A 1".into(), String::new()));
    }
}
