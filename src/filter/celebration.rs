// Copyright 2025 Cowboy AI, LLC.

//! Celebration (proposal/award) filter stage

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{populated, RangeBounds};
use crate::agreement::Agreement;
use crate::predicates::{contains_ci, in_date_range, in_numeric_range};

/// Criteria over the celebration phase of an agreement
///
/// Substring criteria match against the nested proposal fields; the date
/// ranges compare against the proposal/bidding/homologation dates and the
/// value range against the agreement's summed program value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CelebrationFilter {
    /// Agreement business identifier substring
    pub agreement_id: Option<String>,
    /// Modality substring
    pub modality: Option<String>,
    /// Administrative process identifier substring
    pub process_id: Option<String>,
    /// Proposal identifier substring
    pub proposal_id: Option<String>,
    /// Proposal date range
    pub proposal_date: Option<RangeBounds>,
    /// Bidding date range
    pub bidding_date: Option<RangeBounds>,
    /// Homologation date range
    pub homologation_date: Option<RangeBounds>,
    /// Legal foundation substring
    pub legal_foundation: Option<String>,
    /// Justification substring
    pub description: Option<String>,
    /// Object substring
    pub object: Option<String>,
    /// Total program value range
    pub total_value: Option<RangeBounds>,
}

pub(super) fn apply(
    mut agreements: Vec<Agreement>,
    criteria: Option<&CelebrationFilter>,
) -> Vec<Agreement> {
    let Some(criteria) = criteria else {
        return agreements;
    };

    if let Some(needle) = populated(&criteria.agreement_id) {
        agreements.retain(|agreement| contains_ci(agreement.agreement_id.as_deref(), Some(needle)));
    }
    if let Some(needle) = populated(&criteria.modality) {
        agreements.retain(|agreement| {
            contains_ci(
                agreement.celebration().and_then(|data| data.modality.as_deref()),
                Some(needle),
            )
        });
    }
    if let Some(needle) = populated(&criteria.process_id) {
        agreements.retain(|agreement| {
            contains_ci(
                agreement.celebration().and_then(|data| data.process_id.as_deref()),
                Some(needle),
            )
        });
    }
    if let Some(needle) = populated(&criteria.proposal_id) {
        agreements.retain(|agreement| {
            contains_ci(
                agreement.celebration().and_then(|data| data.proposal_id.as_deref()),
                Some(needle),
            )
        });
    }

    retain_date_range(&mut agreements, criteria.proposal_date.as_ref(), |agreement| {
        agreement.celebration().and_then(|data| data.proposal_date)
    });
    retain_date_range(&mut agreements, criteria.bidding_date.as_ref(), |agreement| {
        agreement.celebration().and_then(|data| data.bidding_date)
    });
    retain_date_range(
        &mut agreements,
        criteria.homologation_date.as_ref(),
        |agreement| agreement.celebration().and_then(|data| data.homologation_date),
    );

    if let Some(needle) = populated(&criteria.legal_foundation) {
        agreements.retain(|agreement| {
            contains_ci(
                agreement
                    .celebration()
                    .and_then(|data| data.legal_foundation.as_deref()),
                Some(needle),
            )
        });
    }
    if let Some(needle) = populated(&criteria.description) {
        agreements.retain(|agreement| {
            contains_ci(
                agreement
                    .celebration()
                    .and_then(|data| data.justification.as_deref()),
                Some(needle),
            )
        });
    }
    if let Some(needle) = populated(&criteria.object) {
        agreements.retain(|agreement| {
            contains_ci(
                agreement.celebration().and_then(|data| data.object.as_deref()),
                Some(needle),
            )
        });
    }

    if let Some(bounds) = criteria.total_value.as_ref() {
        let (lower, upper) = bounds.numeric_bounds();
        if lower.is_some() || upper.is_some() {
            agreements.retain(|agreement| {
                in_numeric_range(agreement.summed_program_value(), lower, upper)
            });
        }
    }

    agreements
}

fn retain_date_range(
    agreements: &mut Vec<Agreement>,
    bounds: Option<&RangeBounds>,
    field: impl Fn(&Agreement) -> Option<chrono::DateTime<chrono::Utc>>,
) {
    let Some(bounds) = bounds else { return };
    let (lower, upper) = bounds.date_bounds();
    if lower.is_none() && upper.is_none() {
        return;
    }
    agreements.retain(|agreement| in_date_range(field(agreement), lower, upper));
}
