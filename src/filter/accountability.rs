// Copyright 2025 Cowboy AI, LLC.

//! Accountability filter stage
//!
//! Criteria over the financial closeout report: identifying substrings,
//! the combined "start a end" validity range, the limit date, and the four
//! monetary figures.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{populated, RangeBounds};
use crate::agreement::{AccountabilityData, Agreement};
use crate::predicates::{contains_ci, in_date_range, in_numeric_range, parse_validity};

/// Criteria over the accountability phase of an agreement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountabilityFilter {
    /// Granting organ substring
    pub organ: Option<String>,
    /// Convenient party substring
    pub convenient: Option<String>,
    /// Document number substring
    pub document_number: Option<String>,
    /// Modality substring
    pub modality: Option<String>,
    /// Status substring
    pub status: Option<String>,
    /// Report number substring
    pub number: Option<String>,
    /// Validity range; halves of the combined string compare independently
    pub validity: Option<RangeBounds>,
    /// Limit date range
    pub limit_date: Option<RangeBounds>,
    /// Total value range
    pub total_value: Option<RangeBounds>,
    /// Transfer value range
    pub transfer_value: Option<RangeBounds>,
    /// Counterpart value range
    pub counterpart_value: Option<RangeBounds>,
    /// Yield value range
    pub yield_value: Option<RangeBounds>,
}

pub(super) fn apply(
    mut agreements: Vec<Agreement>,
    criteria: Option<&AccountabilityFilter>,
) -> Vec<Agreement> {
    let Some(criteria) = criteria else {
        return agreements;
    };

    retain_substring(&mut agreements, &criteria.organ, |data| data.organ.as_deref());
    retain_substring(&mut agreements, &criteria.convenient, |data| {
        data.convenient.as_deref()
    });
    retain_substring(&mut agreements, &criteria.document_number, |data| {
        data.document_number.as_deref()
    });
    retain_substring(&mut agreements, &criteria.modality, |data| {
        data.modality.as_deref()
    });
    retain_substring(&mut agreements, &criteria.status, |data| data.status.as_deref());
    retain_substring(&mut agreements, &criteria.number, |data| data.number.as_deref());

    if let Some(bounds) = criteria.validity.as_ref() {
        let (lower, upper) = bounds.date_bounds();
        if lower.is_some() || upper.is_some() {
            agreements.retain(|agreement| {
                let parsed = agreement
                    .accountability_data()
                    .and_then(|data| data.validity.as_deref())
                    .and_then(parse_validity);
                match parsed {
                    Some((start, end)) => {
                        in_date_range(Some(start), lower, None)
                            && in_date_range(Some(end), None, upper)
                    }
                    None => false,
                }
            });
        }
    }

    if let Some(bounds) = criteria.limit_date.as_ref() {
        let (lower, upper) = bounds.date_bounds();
        if lower.is_some() || upper.is_some() {
            agreements.retain(|agreement| in_date_range(agreement.limit_date(), lower, upper));
        }
    }

    retain_numeric_range(&mut agreements, criteria.total_value.as_ref(), |data| {
        data.total_value
    });
    retain_numeric_range(&mut agreements, criteria.transfer_value.as_ref(), |data| {
        data.transfer_value
    });
    retain_numeric_range(&mut agreements, criteria.counterpart_value.as_ref(), |data| {
        data.counterpart_value
    });
    retain_numeric_range(&mut agreements, criteria.yield_value.as_ref(), |data| {
        data.yield_value
    });

    agreements
}

fn retain_substring(
    agreements: &mut Vec<Agreement>,
    criterion: &Option<String>,
    field: impl Fn(&AccountabilityData) -> Option<&str>,
) {
    let Some(needle) = populated(criterion) else { return };
    agreements.retain(|agreement| {
        contains_ci(
            agreement.accountability_data().and_then(|data| field(data)),
            Some(needle),
        )
    });
}

fn retain_numeric_range(
    agreements: &mut Vec<Agreement>,
    bounds: Option<&RangeBounds>,
    field: impl Fn(&AccountabilityData) -> Option<f64>,
) {
    let Some(bounds) = bounds else { return };
    let (lower, upper) = bounds.numeric_bounds();
    if lower.is_none() && upper.is_none() {
        return;
    }
    agreements.retain(|agreement| {
        in_numeric_range(
            agreement.accountability_data().and_then(|data| field(data)),
            lower,
            upper,
        )
    });
}
