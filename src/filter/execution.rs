// Copyright 2025 Cowboy AI, LLC.

//! Execution filter stage
//!
//! Criteria here quantify existentially over an agreement's execution
//! processes: a criterion matches the agreement when ANY attached process
//! satisfies it. Distinct criteria still AND together, so two criteria may
//! be satisfied by two different processes of the same agreement.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{populated, RangeBounds};
use crate::agreement::{Agreement, ExecutionProcess};
use crate::predicates::{any_match, contains_ci, in_date_range};

/// Criteria over the execution processes of an agreement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ExecutionFilter {
    /// Execution identifier substring
    pub execution_id: Option<String>,
    /// Process type substring
    pub process_type: Option<String>,
    /// Process registration date range
    pub date: Option<RangeBounds>,
    /// Administrative process identifier substring
    pub process_id: Option<String>,
    /// Process status substring
    pub status: Option<String>,
    /// Origin-system status substring
    pub system_status: Option<String>,
    /// Origin-system name substring
    pub system_name: Option<String>,
    /// Acceptance flag substring
    pub accepted: Option<String>,
}

pub(super) fn apply(
    mut agreements: Vec<Agreement>,
    criteria: Option<&ExecutionFilter>,
) -> Vec<Agreement> {
    let Some(criteria) = criteria else {
        return agreements;
    };

    retain_any_process(&mut agreements, &criteria.execution_id, |process| {
        process.execution_id.as_deref()
    });
    retain_any_process(&mut agreements, &criteria.process_type, |process| {
        process.process_type.as_deref()
    });

    if let Some(bounds) = criteria.date.as_ref() {
        let (lower, upper) = bounds.date_bounds();
        if lower.is_some() || upper.is_some() {
            agreements.retain(|agreement| {
                any_match(agreement.execution_processes(), |process| {
                    in_date_range(process.date, lower, upper)
                })
            });
        }
    }

    retain_any_process(&mut agreements, &criteria.process_id, |process| {
        process.process_id.as_deref()
    });
    retain_any_process(&mut agreements, &criteria.status, |process| {
        process.status.as_deref()
    });
    retain_any_process(&mut agreements, &criteria.system_status, |process| {
        process.system_status.as_deref()
    });
    retain_any_process(&mut agreements, &criteria.system_name, |process| {
        process.system_name.as_deref()
    });
    retain_any_process(&mut agreements, &criteria.accepted, |process| {
        process.accepted.as_deref()
    });

    agreements
}

fn retain_any_process(
    agreements: &mut Vec<Agreement>,
    criterion: &Option<String>,
    field: impl Fn(&ExecutionProcess) -> Option<&str>,
) {
    let Some(needle) = populated(criterion) else { return };
    agreements.retain(|agreement| {
        any_match(agreement.execution_processes(), |process| {
            contains_ci(field(process), Some(needle))
        })
    });
}
