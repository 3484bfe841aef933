//! Heuristic confidence for a suggested group.

use crate::category::contains_document_keyword;
use crate::types::SuggestedTemplate;

/// Score assigned when a group matches an existing document type.
pub const EXISTING_TYPE_CONFIDENCE: f64 = 0.95;

const BASE_SCORE: f64 = 0.5;

/// Score a group from its size, base-name length, keyword hit and variant coverage.
///
/// Always within `[0.0, 1.0]`.
pub fn confidence(templates: &[SuggestedTemplate], base_name: &str) -> f64 {
    let mut score = BASE_SCORE;

    let count = templates.len();
    if count >= 2 {
        score += 0.15;
    }
    if count >= 3 {
        score += 0.10;
    }
    if count >= 4 {
        score += 0.05;
    }

    let name_len = base_name.trim().chars().count();
    if name_len > 5 {
        score += 0.10;
    }
    if name_len > 10 {
        score += 0.05;
    }

    if contains_document_keyword(base_name) {
        score += 0.15;
    }

    if !templates.is_empty()
        && templates
            .iter()
            .all(|t| !t.suggested_variant.trim().is_empty())
    {
        score += 0.10;
    }

    score.clamp(0.0, 1.0)
}
