//! Pending-agreement ranking
//!
//! An agreement is pending when its accountability limit date has passed.
//! The ranker narrows the collection to those agreements and ranks the
//! owning cities by overdue frequency, exposing the monetary exposure of
//! each city alongside its share.

use chrono::{DateTime, Utc};

use crate::agreement::Agreement;
use crate::ranking::{rank_by_frequency, RankedEntry, TOP_RANK_LIMIT};

/// Rank cities by overdue agreements at the current instant
pub fn find_pending_agreements(agreements: &[Agreement]) -> Vec<RankedEntry> {
    build_pending_agreements(agreements, Utc::now())
}

/// Rank cities by overdue agreements against an explicit clock.
///
/// Retains agreements whose accountability limit date is strictly before
/// `now` (timestamps are already UTC-normalized); agreements without a
/// limit date are not pending. Returns the top ten cities by frequency,
/// each with the summed program value of its overdue agreements and its
/// share of all overdue occurrences.
pub fn build_pending_agreements(agreements: &[Agreement], now: DateTime<Utc>) -> Vec<RankedEntry> {
    let overdue: Vec<&Agreement> = agreements
        .iter()
        .filter(|agreement| agreement.limit_date().is_some_and(|limit| limit < now))
        .collect();

    tracing::debug!(
        total = agreements.len(),
        overdue = overdue.len(),
        "pending agreements ranked"
    );

    rank_by_frequency(
        &overdue,
        |agreement| agreement.city().map(|city| city.name.clone()),
        |agreement| agreement.total_program_value(),
        TOP_RANK_LIMIT,
    )
}
