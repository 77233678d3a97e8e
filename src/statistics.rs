// Copyright 2025 Cowboy AI, LLC.

//! Statistics aggregation over a filtered agreement collection
//!
//! The aggregator is a read-side projection: one pass per rollup over an
//! immutable collection, producing named count/value totals, a top-ten
//! organ ranking, a counterpart classification, and the accountability
//! trimester buckets for the current calendar year.

use chrono::{DateTime, Datelike, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::agreement::Agreement;
use crate::ranking::{rank_by_frequency, RankedEntry, TOP_RANK_LIMIT};

/// A category rollup: how many agreements matched and their summed
/// program value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    /// Matched agreement count
    pub count: usize,
    /// Summed program value of the matched agreements
    pub value: f64,
}

/// Counterpart classification buckets
///
/// Buckets are NOT mutually exclusive at the agreement level: the test is
/// existential per program, so an agreement with one financial-positive
/// program and one assets-positive program appears in both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CounterpartBreakdown {
    /// Some program carries a positive financial counterpart
    pub financial: CategoryTotal,
    /// Some program carries a positive assets-and-services counterpart
    pub assets_and_services: CategoryTotal,
    /// No program carries either kind of counterpart
    pub empty: CategoryTotal,
}

/// The statistics object returned alongside a filtered collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsReport {
    /// Whole collection
    pub total: CategoryTotal,
    /// Modality contains "Convênio"
    pub agreements: CategoryTotal,
    /// Modality contains "Contrato de repasse"
    pub transfer_contracts: CategoryTotal,
    /// Status contains "Em execução"
    pub in_execution: CategoryTotal,
    /// Status contains "Concluído"
    pub completed: CategoryTotal,
    /// Status contains "Pendente"
    pub pending: CategoryTotal,
    /// Status contains "Paralisado"
    pub interrupted: CategoryTotal,
    /// Some execution process classified as "Licitação"
    pub procedural: CategoryTotal,
    /// Top ten granting organs by agreement frequency
    pub top_organs: Vec<RankedEntry>,
    /// Counterpart funding classification
    pub counterpart: CounterpartBreakdown,
    /// Accountability limit dates in the current year, bucketed by
    /// trimester (months 1-3, 4-6, 7-9, 10-12)
    pub accountability_trimesters: [u32; 4],
}

/// Build the statistics report at the current instant
pub fn build_statistics(agreements: &[Agreement]) -> StatisticsReport {
    build_statistics_at(agreements, Utc::now())
}

/// Build the statistics report against an explicit clock.
///
/// `now` determines the calendar year of the trimester bucketing.
pub fn build_statistics_at(agreements: &[Agreement], now: DateTime<Utc>) -> StatisticsReport {
    let report = StatisticsReport {
        total: category_total(agreements, |_| true),
        agreements: category_total(agreements, |a| a.modality_contains("Convênio")),
        transfer_contracts: category_total(agreements, |a| {
            a.modality_contains("Contrato de repasse")
        }),
        in_execution: category_total(agreements, |a| a.status_contains("Em execução")),
        completed: category_total(agreements, |a| a.status_contains("Concluído")),
        pending: category_total(agreements, |a| a.status_contains("Pendente")),
        interrupted: category_total(agreements, |a| a.status_contains("Paralisado")),
        procedural: category_total(agreements, |a| a.has_process_classified("Licitação")),
        top_organs: rank_organs(agreements),
        counterpart: counterpart_breakdown(agreements),
        accountability_trimesters: trimester_buckets(agreements, now),
    };

    tracing::debug!(
        total = report.total.count,
        organs = report.top_organs.len(),
        "agreement statistics built"
    );

    report
}

fn category_total(agreements: &[Agreement], predicate: impl Fn(&Agreement) -> bool) -> CategoryTotal {
    let mut total = CategoryTotal::default();
    for agreement in agreements.iter().filter(|agreement| predicate(agreement)) {
        total.count += 1;
        total.value += agreement.total_program_value();
    }
    total
}

/// Rank granting organs by agreement frequency.
///
/// Organ names arrive as "<code> - <name>"; the leading code is dropped at
/// the first " - " so the same organ groups under one key regardless of
/// which code variant a record carries.
fn rank_organs(agreements: &[Agreement]) -> Vec<RankedEntry> {
    rank_by_frequency(
        agreements,
        |agreement| {
            agreement
                .accountability_data()
                .and_then(|data| data.organ.as_deref())
                .map(organ_group_name)
        },
        Agreement::total_program_value,
        TOP_RANK_LIMIT,
    )
}

fn organ_group_name(organ: &str) -> String {
    organ
        .split_once(" - ")
        .map(|(_, name)| name)
        .unwrap_or(organ)
        .to_string()
}

fn counterpart_breakdown(agreements: &[Agreement]) -> CounterpartBreakdown {
    CounterpartBreakdown {
        financial: category_total(agreements, Agreement::has_financial_counterpart),
        assets_and_services: category_total(agreements, Agreement::has_assets_counterpart),
        empty: category_total(agreements, |agreement| {
            !agreement.has_financial_counterpart() && !agreement.has_assets_counterpart()
        }),
    }
}

fn trimester_buckets(agreements: &[Agreement], now: DateTime<Utc>) -> [u32; 4] {
    let mut buckets = [0u32; 4];
    for limit_date in agreements.iter().filter_map(Agreement::limit_date) {
        if limit_date.year() != now.year() {
            continue;
        }
        let bucket = match limit_date.month() {
            1..=3 => 0,
            4..=6 => 1,
            7..=9 => 2,
            _ => 3,
        };
        buckets[bucket] += 1;
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agreement::{
        Accountability, AccountabilityData, CelebrationData, CounterpartValues, ProposalData,
        Program, ProposalStatus,
    };
    use chrono::TimeZone;

    fn agreement(modality: &str, status: &str, organ: Option<&str>, value: f64) -> Agreement {
        Agreement {
            agreement_id: None,
            name: None,
            proposal_data: Some(ProposalData {
                data: Some(CelebrationData {
                    modality: Some(modality.to_string()),
                    process_id: None,
                    proposal_id: None,
                    proposal_date: None,
                    bidding_date: None,
                    homologation_date: None,
                    legal_foundation: None,
                    object: None,
                    justification: None,
                    status: Some(ProposalStatus {
                        value: Some(status.to_string()),
                        date: None,
                    }),
                }),
                programs: vec![Program {
                    name: None,
                    value: Some(value),
                    counterpart_values: None,
                }],
            }),
            convenient_execution: None,
            accountability: organ.map(|organ| Accountability {
                data: Some(AccountabilityData {
                    organ: Some(organ.to_string()),
                    convenient: None,
                    document_number: None,
                    modality: None,
                    status: None,
                    number: None,
                    validity: None,
                    limit_date: None,
                    total_value: None,
                    transfer_value: None,
                    counterpart_value: None,
                    yield_value: None,
                }),
            }),
            company: None,
        }
    }

    /// Test category totals count and sum exactly the matched agreements
    #[test]
    fn test_category_totals_sum_consistency() {
        let agreements = vec![
            agreement("Convênio", "Em execução", None, 100.0),
            agreement("Convênio", "Concluído", None, 200.0),
            agreement("Contrato de Repasse", "Em execução", None, 400.0),
        ];
        let report = build_statistics_at(&agreements, Utc::now());

        assert_eq!(report.total.count, 3);
        assert_eq!(report.total.value, 700.0);
        assert_eq!(report.agreements.count, 2);
        assert_eq!(report.agreements.value, 300.0);
        assert_eq!(report.transfer_contracts.count, 1);
        assert_eq!(report.transfer_contracts.value, 400.0);
        assert_eq!(report.in_execution.count, 2);
        assert_eq!(report.in_execution.value, 500.0);
        assert_eq!(report.completed.count, 1);
        assert_eq!(report.pending.count, 0);
        assert_eq!(report.pending.value, 0.0);
    }

    /// Test organ ranking drops the leading code and ranks by frequency
    #[test]
    fn test_top_organs_ranking() {
        let agreements = vec![
            agreement("Convênio", "x", Some("20501 - Ministério da Saúde"), 10.0),
            agreement("Convênio", "x", Some("26000 - Ministério da Educação"), 20.0),
            agreement("Convênio", "x", Some("20501 - Ministério da Saúde"), 30.0),
            agreement("Convênio", "x", None, 99.0),
        ];
        let report = build_statistics_at(&agreements, Utc::now());

        assert_eq!(report.top_organs.len(), 2);
        assert_eq!(report.top_organs[0].name, "Ministério da Saúde");
        assert_eq!(report.top_organs[0].count, 2);
        assert_eq!(report.top_organs[0].value, 40.0);
        assert!((report.top_organs[0].percentage - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(report.top_organs[1].name, "Ministério da Educação");
    }

    /// Test counterpart buckets are existential per program and overlap
    ///
    /// ```mermaid
    /// graph TD
    ///     A[agreement] -->|program 1: financial > 0| B[financial bucket]
    ///     A -->|program 2: assets > 0| C[assetsAndServices bucket]
    /// ```
    #[test]
    fn test_counterpart_non_exclusive() {
        let mut both = agreement("Convênio", "x", None, 0.0);
        both.proposal_data.as_mut().unwrap().programs = vec![
            Program {
                name: None,
                value: Some(100.0),
                counterpart_values: Some(CounterpartValues {
                    financial: Some(100.0),
                    assets_and_services: None,
                }),
            },
            Program {
                name: None,
                value: Some(50.0),
                counterpart_values: Some(CounterpartValues {
                    financial: None,
                    assets_and_services: Some(50.0),
                }),
            },
        ];
        let none = agreement("Convênio", "x", None, 75.0);

        let report = build_statistics_at(&[both, none], Utc::now());
        assert_eq!(report.counterpart.financial.count, 1);
        assert_eq!(report.counterpart.financial.value, 150.0);
        assert_eq!(report.counterpart.assets_and_services.count, 1);
        assert_eq!(report.counterpart.empty.count, 1);
        assert_eq!(report.counterpart.empty.value, 75.0);
    }

    /// Test zero counterpart values land in the empty bucket
    #[test]
    fn test_zero_counterpart_is_empty() {
        let mut zeroed = agreement("Convênio", "x", None, 10.0);
        zeroed.proposal_data.as_mut().unwrap().programs[0].counterpart_values =
            Some(CounterpartValues {
                financial: Some(0.0),
                assets_and_services: Some(0.0),
            });
        let report = build_statistics_at(&[zeroed], Utc::now());
        assert_eq!(report.counterpart.financial.count, 0);
        assert_eq!(report.counterpart.empty.count, 1);
    }

    /// Test trimester buckets only count the current calendar year
    #[test]
    fn test_trimester_buckets() {
        let now = Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap();
        let with_limit = |y: i32, m: u32| {
            let mut a = agreement("Convênio", "x", Some("1 - Organ"), 0.0);
            a.accountability
                .as_mut()
                .unwrap()
                .data
                .as_mut()
                .unwrap()
                .limit_date = Some(Utc.with_ymd_and_hms(y, m, 15, 0, 0, 0).unwrap());
            a
        };

        let agreements = vec![
            with_limit(2024, 1),
            with_limit(2024, 3),
            with_limit(2024, 6),
            with_limit(2024, 10),
            with_limit(2023, 6),
            with_limit(2025, 2),
        ];
        let report = build_statistics_at(&agreements, now);
        assert_eq!(report.accountability_trimesters, [2, 1, 0, 1]);
    }

    /// Test the empty collection produces an all-zero report
    #[test]
    fn test_empty_collection() {
        let report = build_statistics_at(&[], Utc::now());
        assert_eq!(report.total, CategoryTotal::default());
        assert!(report.top_organs.is_empty());
        assert_eq!(report.accountability_trimesters, [0, 0, 0, 0]);
    }

    /// Test the report serializes with camelCase keys
    #[test]
    fn test_report_wire_shape() {
        let report = build_statistics_at(&[], Utc::now());
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("transferContracts").is_some());
        assert!(json.get("topOrgans").is_some());
        assert!(json.get("accountabilityTrimesters").is_some());
        assert!(json["counterpart"].get("assetsAndServices").is_some());
    }
}
