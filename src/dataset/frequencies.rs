//! In-memory token multisets for word-cloud renderers.

use std::collections::HashMap;

use crate::types::{AlbumRecord, Field, Metric, TagList};

/// Count tag occurrences across all albums.
///
/// Sorted by descending count, then by tag name.
pub fn tag_frequencies(tag_lists: &[TagList]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for tag in tag_lists.iter().flatten() {
        *counts.entry(tag.as_str()).or_insert(0) += 1;
    }

    let mut out: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(tag, n)| (tag.to_string(), n))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

/// The `n` rows with the highest `metric`, best first.
///
/// Rows lacking the metric, or carrying a non-finite one, are skipped. Ties
/// keep dataset order.
pub fn top_records(records: &[AlbumRecord], metric: Metric, n: usize) -> Vec<&AlbumRecord> {
    let mut scored: Vec<(f64, &AlbumRecord)> = records
        .iter()
        .filter_map(|r| r.metric(metric).filter(|v| v.is_finite()).map(|v| (v, r)))
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().take(n).map(|(_, r)| r).collect()
}

/// `(token, value)` pairs for the artist or album names of the top rows.
///
/// A name appearing in several top rows accumulates its metric values.
pub fn weighted_tokens(
    records: &[AlbumRecord],
    field: Field,
    metric: Metric,
    n: usize,
) -> Vec<(String, f64)> {
    let mut out: Vec<(String, f64)> = Vec::new();
    for record in top_records(records, metric, n) {
        let value = record.metric(metric).unwrap_or(0.0);
        let token = field.get(record);
        match out.iter_mut().find(|(t, _)| t == token) {
            Some((_, v)) => *v += value,
            None => out.push((token.to_string(), value)),
        }
    }
    out
}
