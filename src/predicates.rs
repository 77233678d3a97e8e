// Copyright 2025 Cowboy AI, LLC.

//! Primitive comparison predicates for the filter pipeline
//!
//! Every predicate is total: absent data never panics, it simply fails the
//! match (positive predicates) or passes when no bound constrains it (range
//! predicates). Bound parsing is isolated here so the filter stages operate
//! uniformly regardless of which string representation backs a criterion.

use chrono::{DateTime, NaiveDate, Utc};

/// Case-insensitive substring containment.
///
/// Returns false when either side is absent.
pub fn contains_ci(haystack: Option<&str>, needle: Option<&str>) -> bool {
    match (haystack, needle) {
        (Some(haystack), Some(needle)) => {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        }
        _ => false,
    }
}

/// Numeric range test with independent optional bounds.
///
/// A missing value fails only when at least one bound is supplied; absent
/// bounds impose no constraint. Bounds are inclusive: `value >= lower` and
/// `value <= upper`.
pub fn in_numeric_range(value: Option<f64>, lower: Option<f64>, upper: Option<f64>) -> bool {
    match value {
        Some(value) => {
            lower.map_or(true, |lower| value >= lower)
                && upper.map_or(true, |upper| value <= upper)
        }
        None => lower.is_none() && upper.is_none(),
    }
}

/// Chronological range test with independent optional bounds.
///
/// Bounds are EXCLUSIVE on both ends: the value must be strictly after the
/// lower bound and strictly before the upper bound, so the boundary dates
/// themselves never match. A missing value fails only when a bound is
/// supplied.
pub fn in_date_range(
    value: Option<DateTime<Utc>>,
    lower: Option<DateTime<Utc>>,
    upper: Option<DateTime<Utc>>,
) -> bool {
    match value {
        Some(value) => {
            lower.map_or(true, |lower| value > lower)
                && upper.map_or(true, |upper| value < upper)
        }
        None => lower.is_none() && upper.is_none(),
    }
}

/// Existential combinator over a bounded list.
///
/// Short-circuits on the first match. An empty list never matches.
pub fn any_match<T>(items: &[T], predicate: impl Fn(&T) -> bool) -> bool {
    for item in items {
        if predicate(item) {
            return true;
        }
    }
    false
}

/// Parse a numeric filter bound.
///
/// Malformed or non-finite input is treated as "bound not supplied" rather
/// than an error, keeping the pipeline total.
pub fn parse_numeric_bound(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parse a date filter bound (RFC 3339 or `YYYY-MM-DD`).
///
/// Malformed input is dropped as unset; the HTTP boundary is expected to
/// have validated it first, so a warning is logged.
pub fn parse_date_bound(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Some(parsed) = parse_plain_date(trimmed, "%Y-%m-%d") {
        return Some(parsed);
    }
    tracing::warn!(bound = trimmed, "unparseable date bound dropped as unset");
    None
}

/// Parse an accountability validity range: `"<start> a <end>"`.
///
/// Splits on the literal `" a "` separator and parses each half
/// independently (`dd/MM/yyyy` as written by the upstream platform, or ISO).
/// Returns `None` unless both halves parse.
pub fn parse_validity(raw: &str) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let (start_raw, end_raw) = raw.split_once(" a ")?;
    let start = parse_validity_date(start_raw.trim())?;
    let end = parse_validity_date(end_raw.trim())?;
    Some((start, end))
}

fn parse_validity_date(raw: &str) -> Option<DateTime<Utc>> {
    parse_plain_date(raw, "%d/%m/%Y")
        .or_else(|| parse_plain_date(raw, "%Y-%m-%d"))
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.with_timezone(&Utc)))
}

fn parse_plain_date(raw: &str, format: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(raw, format)
        .ok()?
        .and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
}
