// Copyright 2025 Cowboy AI, LLC.

//! Composable agreement filtering
//!
//! A [`FilterSpec`] carries up to four optional criteria groups. The
//! orchestrator applies them as fixed-order narrowing stages — scope,
//! celebration, execution, accountability — each consuming the previous
//! stage's output. Present criteria combine with logical AND; the collection
//! narrows monotonically and preserves encounter order (stable filter,
//! never a re-sort).

mod accountability;
mod celebration;
mod execution;
mod scope;

pub use accountability::AccountabilityFilter;
pub use celebration::CelebrationFilter;
pub use execution::ExecutionFilter;
pub use scope::{FilterPreset, ScopeFilter};

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::agreement::Agreement;
use crate::predicates::{parse_date_bound, parse_numeric_bound};

/// Filter criteria for an agreement query
///
/// Each group is optional; an absent group is a no-op stage. Within a group,
/// each criterion key narrows the collection only when present (non-empty
/// string, or at least one populated slot of a range tuple).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    /// Company scope and preset narrowings
    pub scope: Option<ScopeFilter>,
    /// Celebration (proposal/award) phase criteria
    pub celebration: Option<CelebrationFilter>,
    /// Execution phase criteria (existential over processes)
    pub execution: Option<ExecutionFilter>,
    /// Accountability phase criteria
    pub accountability: Option<AccountabilityFilter>,
}

/// A two-slot range criterion: `[lowerBound, upperBound]`
///
/// Either, both, or neither slot may be supplied; each populated slot is an
/// independent narrowing step. Slots hold raw strings from the wire;
/// malformed bounds degrade to "not supplied" rather than erroring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RangeBounds(
    /// Lower bound slot
    pub Option<String>,
    /// Upper bound slot
    pub Option<String>,
);

impl RangeBounds {
    /// Build a range from raw bound strings
    pub fn new(lower: Option<&str>, upper: Option<&str>) -> Self {
        Self(lower.map(str::to_string), upper.map(str::to_string))
    }

    /// Whether at least one slot is populated with a non-empty string
    pub fn is_present(&self) -> bool {
        populated(&self.0).is_some() || populated(&self.1).is_some()
    }

    /// Parsed numeric bounds; malformed slots are unset
    pub fn numeric_bounds(&self) -> (Option<f64>, Option<f64>) {
        (
            populated(&self.0).and_then(parse_numeric_bound),
            populated(&self.1).and_then(parse_numeric_bound),
        )
    }

    /// Parsed date bounds; malformed slots are unset
    pub fn date_bounds(&self) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        (
            populated(&self.0).and_then(parse_date_bound),
            populated(&self.1).and_then(parse_date_bound),
        )
    }
}

/// A criterion string counts as present only when non-empty
pub(crate) fn populated(slot: &Option<String>) -> Option<&str> {
    slot.as_deref().filter(|value| !value.is_empty())
}

/// Apply the full filter pipeline at the current instant.
///
/// Stage order is fixed: scope, celebration, execution, accountability.
/// Each stage is an AND-narrowing predicate set, so the order does not
/// affect which agreements survive — only the sequence of narrowing.
pub fn filter_agreements(agreements: Vec<Agreement>, spec: &FilterSpec) -> Vec<Agreement> {
    filter_agreements_at(agreements, spec, Utc::now())
}

/// Apply the full filter pipeline against an explicit clock.
///
/// `now` only matters to the completed-contracts preset; passing it keeps
/// the pipeline deterministic under test.
pub fn filter_agreements_at(
    agreements: Vec<Agreement>,
    spec: &FilterSpec,
    now: DateTime<Utc>,
) -> Vec<Agreement> {
    let total = agreements.len();

    let narrowed = scope::apply(agreements, spec.scope.as_ref(), now);
    tracing::debug!(total, retained = narrowed.len(), stage = "scope", "filter stage applied");

    let narrowed = celebration::apply(narrowed, spec.celebration.as_ref());
    tracing::debug!(retained = narrowed.len(), stage = "celebration", "filter stage applied");

    let narrowed = execution::apply(narrowed, spec.execution.as_ref());
    tracing::debug!(retained = narrowed.len(), stage = "execution", "filter stage applied");

    let narrowed = accountability::apply(narrowed, spec.accountability.as_ref());
    tracing::debug!(
        total,
        retained = narrowed.len(),
        stage = "accountability",
        "agreement filter pipeline complete"
    );

    narrowed
}
