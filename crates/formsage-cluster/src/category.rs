//! Keyword-driven category inference and code (slug) generation.

use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};

use formsage_core::config::MAX_CODE_LEN;

use crate::types::Category;

/// Category → document-type keywords, checked in this order.
pub const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (Category::Identification, &[
        "บัตรประชาชน", "บัตรประจำตัว", "หนังสือเดินทาง", "ใบขับขี่", "ทะเบียนบ้าน",
        "id card", "id_card", "idcard", "passport", "driver license", "house registration",
    ]),
    (Category::Certificate, &[
        "สูติบัตร", "ใบเกิด", "มรณบัตร", "ใบมรณะ", "ทะเบียนสมรส", "ทะเบียนหย่า", "ใบรับรอง",
        "ใบสำคัญ", "certificate", "birth", "death", "marriage",
    ]),
    (Category::Contract, &[
        "สัญญา", "ข้อตกลง", "contract", "agreement", "lease",
    ]),
    (Category::Application, &[
        "ใบสมัคร", "คำร้อง", "คำขอ", "แบบฟอร์ม", "application", "request", "form",
    ]),
    (Category::Financial, &[
        "ใบเสร็จ", "ใบแจ้งหนี้", "ใบกำกับภาษี", "ธนาคาร", "invoice", "receipt", "bank", "tax",
    ]),
    (Category::Government, &[
        "หนังสือราชการ", "ราชการ", "หนังสือรับรอง", "อำเภอ", "government", "official",
    ]),
    (Category::Education, &[
        "ใบประกาศนียบัตร", "ปริญญาบัตร", "ทรานสคริปต์", "ผลการเรียน", "transcript",
        "diploma", "school", "university",
    ]),
];

static NON_SLUG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9_]+").unwrap());

/// First category whose keyword appears in the name; `Other` when none does.
pub fn guess_category(name: &str) -> Category {
    let lower = name.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or_default()
}

/// Whether the name mentions any known document-type keyword.
pub fn contains_document_keyword(name: &str) -> bool {
    let lower = name.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .flat_map(|(_, keywords)| keywords.iter())
        .any(|k| lower.contains(k))
}

/// ASCII slug for a name, at most 50 characters of `[a-z0-9_]`.
pub fn generate_code(name: &str) -> String {
    generate_code_with_limit(name, MAX_CODE_LEN)
}

/// [`generate_code`] with a tighter length limit (clamped to 1..=50).
///
/// Names with no ASCII word characters fall back to `doc_` plus the first 12
/// hex digits of the name's SHA-256.
pub fn generate_code_with_limit(name: &str, limit: usize) -> String {
    let limit = limit.clamp(1, MAX_CODE_LEN);
    let lower = name.to_lowercase();
    let slug = NON_SLUG_RE.replace_all(&lower, "_");
    let mut code: String = slug.trim_matches('_').chars().take(limit).collect();
    code = code.trim_end_matches('_').to_string();

    if code.is_empty() {
        let digest = hex::encode(Sha256::digest(name.as_bytes()));
        code = format!("doc_{}", &digest[..12]);
        code.truncate(limit);
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_safe(code: &str) -> bool {
        !code.is_empty()
            && code.len() <= 50
            && code
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    }

    #[test]
    fn test_guess_category() {
        assert_eq!(guess_category("สูติบัตร"), Category::Certificate);
        assert_eq!(guess_category("ID Card"), Category::Identification);
        assert_eq!(guess_category("สัญญาเช่า"), Category::Contract);
        assert_eq!(guess_category("Lunch menu"), Category::Other);
    }

    #[test]
    fn test_keyword_order_decides() {
        // Mentions both a certificate and an application keyword.
        assert_eq!(guess_category("คำร้องขอสูติบัตร"), Category::Certificate);
    }

    #[test]
    fn test_generate_code_ascii() {
        assert_eq!(generate_code("ID Card"), "id_card");
        assert_eq!(generate_code("  --Lease (Tenant)-- "), "lease_tenant");
        assert_eq!(generate_code("Form_A"), "form_a");
    }

    #[test]
    fn test_generate_code_thai_falls_back_to_hash() {
        let code = generate_code("บัตรประชาชน");
        assert!(code.starts_with("doc_"));
        assert_eq!(code.len(), 16);
        assert!(is_safe(&code));
        assert_eq!(code, generate_code("บัตรประชาชน"));
        assert_ne!(code, generate_code("สูติบัตร"));
    }

    #[test]
    fn test_generate_code_mixed_keeps_ascii() {
        assert_eq!(generate_code("แบบ ก Form 2"), "form_2");
    }

    #[test]
    fn test_generate_code_truncates() {
        let long = "word ".repeat(30);
        let code = generate_code(&long);
        assert!(code.len() <= 50);
        assert!(!code.ends_with('_'));
        assert!(is_safe(&code));
    }

    #[test]
    fn test_code_safety_over_assorted_inputs() {
        for input in ["", "   ", "___", "Café Résumé", "日本語", "a", "ÀÉÎ-123", "บัตรประชาชน"] {
            let code = generate_code(input);
            assert!(is_safe(&code), "{:?} -> {:?}", input, code);
        }
    }

    #[test]
    fn test_limit_applies_to_hash_fallback() {
        assert_eq!(generate_code_with_limit("สูติบัตร", 6).len(), 6);
        assert_eq!(generate_code_with_limit("Identity", 0), "i");
    }
}
