use std::collections::BTreeMap;

/// Canonicalizes one column header: trimmed, lower-cased, spaces turned into
/// underscores and periods removed.
pub fn normalize_header(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_").replace('.', "")
}

/// Normalizes every header, keeping order and duplicates.
pub fn normalize_headers(raw_columns: &[String]) -> Vec<String> {
    raw_columns.iter().map(|c| normalize_header(c)).collect()
}

/// Names that occur more than once, in first-occurrence order.
pub fn duplicate_headers(columns: &[String]) -> Vec<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for c in columns {
        *counts.entry(c.as_str()).or_default() += 1;
    }
    let mut dups: Vec<String> = Vec::new();
    for c in columns {
        if counts.get(c.as_str()).copied().unwrap_or(0) > 1 && !dups.contains(c) {
            dups.push(c.clone());
        }
    }
    dups
}
