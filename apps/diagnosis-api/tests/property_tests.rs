//! Property-based tests for the diagnosis API domain.
//!
//! Exercises the fine engine and shared types the API is built on using
//! proptest-generated submissions.

use proptest::prelude::*;
use rust_decimal::Decimal;
use shared_types::{AnswerSheet, CompanyCategory, DiagnosisInput, Severity};

fn any_category() -> impl Strategy<Value = CompanyCategory> {
    prop_oneof![
        Just(CompanyCategory::Micro),
        Just(CompanyCategory::Small),
        Just(CompanyCategory::General),
    ]
}

fn any_answer() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("no".to_string()),
        Just("No".to_string()),
        Just("NO".to_string()),
        Just("yes".to_string()),
        Just("si".to_string()),
        "[a-z]{1,8}",
    ]
}

fn any_sheet() -> impl Strategy<Value = AnswerSheet> {
    proptest::collection::vec(("q[0-9]{1,2}", any_answer()), 0..30)
        .prop_map(|pairs| pairs.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // ============================================================
    // Engine invariants
    // ============================================================

    #[test]
    fn diagnose_never_fails_and_never_charges_negative(
        category in any_category(),
        worker_count in 0u32..10_000,
        answers in any_sheet(),
    ) {
        let engine = fine_engine::FineEngine::new();
        let result = engine
            .diagnose(&DiagnosisInput { company_category: category, worker_count, answers })
            .unwrap();

        prop_assert!(result.fine_amount >= Decimal::ZERO);
        prop_assert_eq!(result.max_severity, result.counts.max_severity());
        prop_assert_eq!(result.counts.total() as usize, result.violations.len());
    }

    #[test]
    fn no_workers_always_means_no_fine(
        category in any_category(),
        answers in any_sheet(),
    ) {
        let engine = fine_engine::FineEngine::new();
        let result = engine
            .diagnose(&DiagnosisInput { company_category: category, worker_count: 0, answers })
            .unwrap();

        prop_assert_eq!(result.fine_amount, Decimal::ZERO);
    }

    #[test]
    fn fine_equals_the_sum_of_counted_rates(
        category in any_category(),
        worker_count in 1u32..2_000,
        answers in any_sheet(),
    ) {
        let engine = fine_engine::FineEngine::new();
        let result = engine
            .diagnose(&DiagnosisInput { company_category: category, worker_count, answers })
            .unwrap();

        let mut expected = Decimal::ZERO;
        if result.counts.total() > 0 {
            for severity in Severity::ALL {
                expected += Decimal::from(result.counts.get(severity))
                    * engine.rate(category, worker_count, severity).unwrap();
            }
        }
        prop_assert_eq!(result.fine_amount, expected);
    }

    #[test]
    fn rates_never_fall_as_the_workforce_grows(
        category in any_category(),
        worker_count in 1u32..3_000,
        severity in prop_oneof![
            Just(Severity::Minor),
            Just(Severity::Serious),
            Just(Severity::VerySerious),
        ],
    ) {
        let engine = fine_engine::FineEngine::new();
        let here = engine.rate(category, worker_count, severity).unwrap();
        let next = engine.rate(category, worker_count + 1, severity).unwrap();
        prop_assert!(here <= next);
    }

    // ============================================================
    // Shared-type invariants
    // ============================================================

    #[test]
    fn answer_sheets_round_trip_in_order(
        ids in proptest::collection::hash_set("q[0-9]{1,3}", 0..20),
    ) {
        let pairs: Vec<(String, String)> = ids
            .into_iter()
            .map(|id| (id, "no".to_string()))
            .collect();
        let sheet: AnswerSheet = pairs.clone().into_iter().collect();

        let encoded = serde_json::to_string(&sheet).unwrap();
        let decoded: AnswerSheet = serde_json::from_str(&encoded).unwrap();

        let original: Vec<&str> = pairs.iter().map(|(id, _)| id.as_str()).collect();
        let survived: Vec<&str> = decoded.iter().map(|(id, _)| id).collect();
        prop_assert_eq!(original, survived);
    }

    #[test]
    fn category_strings_round_trip(category in any_category()) {
        let parsed: CompanyCategory = category.to_string().parse().unwrap();
        prop_assert_eq!(parsed, category);
    }

    #[test]
    fn arbitrary_category_strings_never_panic(raw in "[a-z_]{0,16}") {
        // Parsing either succeeds on the three known values or reports the
        // offending string back.
        match raw.parse::<CompanyCategory>() {
            Ok(category) => prop_assert_eq!(category.to_string(), raw),
            Err(err) => prop_assert!(err.to_string().contains(&raw)),
        }
    }
}
