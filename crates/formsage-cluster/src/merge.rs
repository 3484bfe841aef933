//! Fuzzy merging of groups whose base names contain one another.

use tracing::debug;

/// Lower-case and drop whitespace, underscores and dashes.
pub fn normalize_key(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .collect()
}

/// Merge groups whose keys are substrings of one another, in either direction.
///
/// Keys are visited longest first and the longer key keeps the bucket. Keys
/// shorter than `min_key_len` characters never take part in a merge. Output is ordered by
/// key length descending, ties by key.
pub fn merge_groups<T>(groups: Vec<(String, Vec<T>)>, min_key_len: usize) -> Vec<(String, Vec<T>)> {
    let mut groups = groups;
    groups.sort_by(|a, b| {
        b.0.chars()
            .count()
            .cmp(&a.0.chars().count())
            .then_with(|| a.0.cmp(&b.0))
    });

    let keys: Vec<String> = groups.iter().map(|(k, _)| k.clone()).collect();
    let mut slots: Vec<Option<Vec<T>>> = groups.into_iter().map(|(_, v)| Some(v)).collect();
    let mut merged = Vec::new();

    for i in 0..keys.len() {
        let Some(mut bucket) = slots[i].take() else {
            continue;
        };
        for j in (i + 1)..keys.len() {
            if slots[j].is_none() || !mergeable(&keys[i], &keys[j], min_key_len) {
                continue;
            }
            if let Some(absorbed) = slots[j].take() {
                debug!("Merging group '{}' into '{}'", keys[j], keys[i]);
                bucket.extend(absorbed);
            }
        }
        merged.push((keys[i].clone(), bucket));
    }
    merged
}

fn mergeable(a: &str, b: &str, min_key_len: usize) -> bool {
    if a.chars().count() < min_key_len || b.chars().count() < min_key_len {
        return false;
    }
    a.contains(b) || b.contains(a)
}
