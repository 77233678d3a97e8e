// Copyright 2025 Cowboy AI, LLC.

//! Company scope and preset narrowings
//!
//! The scope stage narrows by recipient attributes (sphere, state, city)
//! and by preset categories that bundle the common modality/status
//! combinations clients ask for.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::populated;
use crate::agreement::Agreement;
use crate::predicates::contains_ci;

/// Scope criteria: recipient attributes and preset narrowings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ScopeFilter {
    /// Government sphere, matched exactly
    pub sphere: Option<String>,
    /// State code substring
    pub uf: Option<String>,
    /// City name substring
    pub city: Option<String>,
    /// City record identifiers; agreements outside the set are dropped
    pub city_ids: Vec<String>,
    /// Preset narrowing applied after the scalar criteria
    pub preset: Option<FilterPreset>,
}

/// Preset narrowings bundling the common modality/status combinations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum FilterPreset {
    /// Modality contains "Convênio"
    Agreements,
    /// Modality contains "Convênio" and status contains "Em execução"
    AgreementsInExecution,
    /// Modality contains "Contrato de repasse"
    TransferContracts,
    /// Modality contains "Contrato de repasse" and status contains "Em execução"
    TransferContractsInExecution,
    /// Some execution process classified as "Licitação"
    CompletedBiddings,
    /// Some contract ended strictly before now
    CompletedContracts,
}

impl FilterPreset {
    fn matches(self, agreement: &Agreement, now: DateTime<Utc>) -> bool {
        match self {
            FilterPreset::Agreements => agreement.modality_contains("Convênio"),
            FilterPreset::AgreementsInExecution => {
                agreement.modality_contains("Convênio")
                    && agreement.status_contains("Em execução")
            }
            FilterPreset::TransferContracts => {
                agreement.modality_contains("Contrato de repasse")
            }
            FilterPreset::TransferContractsInExecution => {
                agreement.modality_contains("Contrato de repasse")
                    && agreement.status_contains("Em execução")
            }
            FilterPreset::CompletedBiddings => agreement.has_process_classified("Licitação"),
            FilterPreset::CompletedContracts => agreement.has_contract_ended_by(now),
        }
    }
}

pub(super) fn apply(
    mut agreements: Vec<Agreement>,
    criteria: Option<&ScopeFilter>,
    now: DateTime<Utc>,
) -> Vec<Agreement> {
    let Some(criteria) = criteria else {
        return agreements;
    };

    if let Some(sphere) = populated(&criteria.sphere) {
        agreements.retain(|agreement| {
            agreement
                .company
                .as_ref()
                .and_then(|company| company.sphere.as_deref())
                == Some(sphere)
        });
    }
    if let Some(uf) = populated(&criteria.uf) {
        agreements.retain(|agreement| {
            contains_ci(agreement.city().map(|city| city.uf.as_str()), Some(uf))
        });
    }
    if let Some(city) = populated(&criteria.city) {
        agreements.retain(|agreement| {
            contains_ci(agreement.city().map(|city| city.name.as_str()), Some(city))
        });
    }
    if !criteria.city_ids.is_empty() {
        agreements.retain(|agreement| {
            agreement
                .company
                .as_ref()
                .and_then(|company| company.city_id.as_deref())
                .is_some_and(|city_id| criteria.city_ids.iter().any(|id| id == city_id))
        });
    }
    if let Some(preset) = criteria.preset {
        agreements.retain(|agreement| preset.matches(agreement, now));
    }

    agreements
}
