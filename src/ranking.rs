//! Frequency ranking shared by the statistics aggregator and the
//! pending-agreement ranker
//!
//! A single pre-pass accumulates count and summed value per key in
//! first-encounter order; ranking is then a stable sort over the
//! accumulated entries. Keys are never re-scanned against the source
//! collection.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How many entries a top-N ranking keeps
pub const TOP_RANK_LIMIT: usize = 10;

/// A ranked group: its key, occurrence count, summed monetary value, and
/// share of all keyed occurrences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    /// Group key (organ or city name)
    pub name: String,
    /// Occurrences of the key in the collection
    pub count: usize,
    /// Summed program value of the key's agreements
    pub value: f64,
    /// `count / total keyed occurrences * 100`; 0 when the partition is empty
    pub percentage: f64,
}

#[derive(Default)]
struct GroupAccumulator {
    count: usize,
    value: f64,
}

/// Rank items by key frequency, descending, truncated to `limit`.
///
/// Items whose key extractor returns `None` are skipped and do not count
/// toward the percentage denominator. Ties keep first-encounter order (the
/// sort is stable over an insertion-ordered map).
pub fn rank_by_frequency<T>(
    items: &[T],
    key: impl Fn(&T) -> Option<String>,
    value: impl Fn(&T) -> f64,
    limit: usize,
) -> Vec<RankedEntry> {
    let mut groups: IndexMap<String, GroupAccumulator> = IndexMap::new();
    for item in items {
        let Some(key) = key(item) else { continue };
        let group = groups.entry(key).or_default();
        group.count += 1;
        group.value += value(item);
    }

    let total: usize = groups.values().map(|group| group.count).sum();

    let mut entries: Vec<RankedEntry> = groups
        .into_iter()
        .map(|(name, group)| RankedEntry {
            name,
            count: group.count,
            value: group.value,
            percentage: percentage_of(group.count, total),
        })
        .collect();

    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(limit);
    entries
}

/// Percentage share, guarding the empty-partition case to 0
pub fn percentage_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (count as f64 / total as f64) * 100.0
    }
}
