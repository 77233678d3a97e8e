//! Property tests for the filter pipeline and ranking invariants.

use agreements_domain::{
    build_statistics_at, filter_agreements_at, rank_by_frequency, Agreement, CelebrationData,
    CelebrationFilter, City, Company, FilterSpec, ProposalData, ProposalStatus, Program,
    RangeBounds,
};
use chrono::{DateTime, TimeZone, Utc};
use proptest::option;
use proptest::prelude::*;

fn day(days: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(days * 86_400, 0).unwrap()
}

fn build_agreement(
    agreement_id: Option<String>,
    modality: Option<&str>,
    status: Option<&str>,
    proposal_date: Option<DateTime<Utc>>,
    program_values: Vec<Option<f64>>,
    city: Option<&str>,
) -> Agreement {
    Agreement {
        agreement_id,
        name: None,
        proposal_data: Some(ProposalData {
            data: Some(CelebrationData {
                modality: modality.map(str::to_string),
                process_id: None,
                proposal_id: None,
                proposal_date,
                bidding_date: None,
                homologation_date: None,
                legal_foundation: None,
                object: None,
                justification: None,
                status: Some(ProposalStatus {
                    value: status.map(str::to_string),
                    date: None,
                }),
            }),
            programs: program_values
                .into_iter()
                .map(|value| Program {
                    name: None,
                    value,
                    counterpart_values: None,
                })
                .collect(),
        }),
        convenient_execution: None,
        accountability: None,
        company: city.map(|city| Company {
            sphere: None,
            city_id: None,
            city: Some(City::new(city, "AL", "0000000")),
        }),
    }
}

fn arb_agreement() -> impl Strategy<Value = Agreement> {
    (
        option::of("[A-Z]{2}[0-9]{4}"),
        option::of(prop::sample::select(vec![
            "Convênio",
            "Contrato de Repasse",
        ])),
        option::of(prop::sample::select(vec![
            "Em execução",
            "Concluído",
            "Pendente",
        ])),
        option::of(0i64..20_000),
        prop::collection::vec(option::of(0.0..1_000_000.0f64), 0..3),
        option::of(prop::sample::select(vec!["Maceió", "Campestre", "Arapiraca"])),
    )
        .prop_map(|(id, modality, status, proposal_day, values, city)| {
            build_agreement(id, modality, status, proposal_day.map(day), values, city)
        })
}

fn arb_spec() -> impl Strategy<Value = FilterSpec> {
    (
        option::of(prop::sample::select(vec!["conv", "repasse", "xyz", ""])),
        option::of((0i64..20_000).prop_map(|d| day(d).format("%Y-%m-%d").to_string())),
        option::of((0i64..20_000).prop_map(|d| day(d).format("%Y-%m-%d").to_string())),
        option::of((0.0..1_000_000.0f64).prop_map(|v| format!("{v:.2}"))),
    )
        .prop_map(|(modality, date_lower, date_upper, value_lower)| FilterSpec {
            celebration: Some(CelebrationFilter {
                modality: modality.map(str::to_string),
                proposal_date: Some(RangeBounds(date_lower, date_upper)),
                total_value: Some(RangeBounds(value_lower, None)),
                ..Default::default()
            }),
            ..Default::default()
        })
}

fn is_subsequence(result: &[Agreement], input: &[Agreement]) -> bool {
    let mut remaining = input.iter();
    result
        .iter()
        .all(|item| remaining.any(|candidate| candidate == item))
}

proptest! {
    /// The filtered collection never grows and keeps the input's relative
    /// order (stable narrowing, never a re-sort).
    #[test]
    fn filtering_narrows_and_preserves_order(
        agreements in prop::collection::vec(arb_agreement(), 0..24),
        spec in arb_spec(),
    ) {
        let now = day(20_000);
        let filtered = filter_agreements_at(agreements.clone(), &spec, now);

        prop_assert!(filtered.len() <= agreements.len());
        prop_assert!(is_subsequence(&filtered, &agreements));
    }

    /// The empty spec is the identity.
    #[test]
    fn empty_spec_is_identity(
        agreements in prop::collection::vec(arb_agreement(), 0..24),
    ) {
        let filtered = filter_agreements_at(agreements.clone(), &FilterSpec::default(), day(0));
        prop_assert_eq!(filtered, agreements);
    }

    /// Applying the same spec twice changes nothing: every stage is an
    /// AND-narrowing predicate set.
    #[test]
    fn filtering_is_idempotent(
        agreements in prop::collection::vec(arb_agreement(), 0..24),
        spec in arb_spec(),
    ) {
        let now = day(20_000);
        let once = filter_agreements_at(agreements, &spec, now);
        let twice = filter_agreements_at(once.clone(), &spec, now);
        prop_assert_eq!(twice, once);
    }

    /// Every category value equals the program-value sum of the agreements
    /// it counted; total always covers the whole collection.
    #[test]
    fn category_totals_are_consistent(
        agreements in prop::collection::vec(arb_agreement(), 0..24),
    ) {
        let report = build_statistics_at(&agreements, day(20_000));

        prop_assert_eq!(report.total.count, agreements.len());
        let expected: f64 = agreements.iter().map(Agreement::total_program_value).sum();
        prop_assert!((report.total.value - expected).abs() < 1e-6);

        for category in [
            &report.agreements,
            &report.in_execution,
            &report.completed,
            &report.pending,
        ] {
            prop_assert!(category.count <= report.total.count);
            prop_assert!(category.value <= report.total.value + 1e-6);
        }
    }

    /// Ranked percentages stay within [0, 100] and, over the whole
    /// partition, sum to 100 (within floating-point tolerance).
    #[test]
    fn ranking_percentages_partition(
        items in prop::collection::vec(
            (option::of(prop::sample::select(vec!["a", "b", "c", "d", "e"])), 0.0..100.0f64),
            0..40,
        ),
    ) {
        let full = rank_by_frequency(
            &items,
            |item| item.0.map(str::to_string),
            |item| item.1,
            usize::MAX,
        );

        for entry in &full {
            prop_assert!(entry.percentage >= 0.0);
            prop_assert!(entry.percentage <= 100.0);
        }

        let keyed = items.iter().filter(|item| item.0.is_some()).count();
        let sum: f64 = full.iter().map(|entry| entry.percentage).sum();
        if keyed == 0 {
            prop_assert!(full.is_empty());
        } else {
            prop_assert!((sum - 100.0).abs() < 1e-9);
        }
    }
}
