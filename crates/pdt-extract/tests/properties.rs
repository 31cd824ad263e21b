//! Purity and robustness properties of the engine.

use std::collections::HashSet;

use pdt_extract::analyze;
use pdt_model::Period;
use proptest::prelude::*;

/// Text built from the vocabulary schedules are made of.
fn schedule_like() -> impl Strategy<Value = String> {
    let token = prop_oneof![
        "[0-9]{1,2}/[0-9]{1,2}/20[0-9]{2}",
        "[0-9]{1,2}\\.[0-9]{1,2}\\.[0-9]{2}",
        "[0-9]{1,3}",
        Just("jour off".to_string()),
        Just("6ème jour de tournage".to_string()),
        Just("Jour de tournage".to_string()),
        Just("Octobre".to_string()),
        Just("Mar".to_string()),
        Just("Lun Mar Mer Jeu Ven".to_string()),
        Just("INT.".to_string()),
        Just("\n".to_string()),
        "[a-zA-Zéè]{1,8}",
    ];
    prop::collection::vec(token, 0..60).prop_map(|tokens| tokens.join(" "))
}

proptest! {
    #[test]
    fn analysis_is_idempotent(text in schedule_like(), year in 2020i32..2030) {
        prop_assert_eq!(analyze(&text, year), analyze(&text, year));
    }

    #[test]
    fn arbitrary_text_never_panics(text in any::<String>()) {
        let result = analyze(&text, 2024);
        prop_assert_eq!(result.sequence_count, result.sequences.len());
    }

    #[test]
    fn counts_match_detected_dates(text in schedule_like()) {
        let result = analyze(&text, 2024);
        let unique: HashSet<_> = result.dates.iter().map(|d| d.date).collect();
        prop_assert_eq!(unique.len(), result.dates.len());
        match result.period {
            Period::Sequential => prop_assert!(result.dates.len() < 2),
            Period::Unknown => prop_assert_eq!(result.date_count, 0),
            Period::Range { start, end } => {
                prop_assert_eq!(result.date_count, result.dates.len());
                prop_assert!(start <= end);
            }
        }
    }
}
