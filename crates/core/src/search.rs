//! Item search helpers shared by every store implementation.
//!
//! Matching is literal: the user's text is never handed to a pattern engine,
//! so characters like `.`, `*` or `(` only ever match themselves.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::detection::Detection;

/// Normalize a raw `?item=` value. Returns `None` for absent or blank input.
pub fn normalize_term(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Case-insensitive literal containment. An empty needle matches everything.
pub fn item_matches(item: &str, needle: &str) -> bool {
    item.to_lowercase().contains(&needle.to_lowercase())
}

/// Most recent `timestamp` first; ties broken by newest `id`.
pub fn cmp_recent_first(a: &Detection, b: &Detection) -> Ordering {
    b.timestamp.cmp(&a.timestamp).then_with(|| b.id.cmp(&a.id))
}

/// Position within the clip ascending; ties broken by insertion order.
pub fn cmp_clip_offset(a: &Detection, b: &Detection) -> Ordering {
    a.timestamp_sec
        .cmp(&b.timestamp_sec)
        .then_with(|| a.id.cmp(&b.id))
}

/// Unique item labels in ascending code-point order.
pub fn distinct_items<'a>(items: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    items
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
