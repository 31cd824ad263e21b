pub mod analysis;
pub mod calendar;
pub mod detection;
pub mod error;
pub mod schedule;
pub mod trace;

pub use analysis::{
    AnalysisResult, AnalysisSource, AuditWarning, Period, SEQUENTIAL_PERIOD_LABEL,
    STANDARD_START_INFO, UNKNOWN_PERIOD_LABEL,
};
pub use calendar::{
    DISPLAY_FORMAT, format_display, inclusive_span_days, is_weekend, parse_display,
    subtract_working_days,
};
pub use detection::{DateStrategy, DetectedDate, SceneMarker, SequenceMatch, SequenceToken};
pub use error::PdtError;
pub use schedule::{DayType, PdtDay, PdtSequence};
pub use trace::{Strategy, Trace, TraceEvent, TraceReason};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_result_is_empty() {
        let result = AnalysisResult::unknown();
        assert_eq!(result.date_count, 0);
        assert_eq!(result.sequence_count, 0);
        assert_eq!(result.period, Period::Unknown);
        assert!(!result.has_date_range());
    }

    #[test]
    fn period_parse_errors() {
        assert_eq!(
            "04/11/2024".parse::<Period>(),
            Err(PdtError::InvalidPeriod("04/11/2024".to_string()))
        );
        assert_eq!(
            "04/11/2024 - 31/11/2024".parse::<Period>(),
            Err(PdtError::InvalidDate("31/11/2024".to_string()))
        );
        insta::assert_snapshot!(
            PdtError::InvalidPeriod("demain".to_string()).to_string(),
            @"invalid period: demain"
        );
    }

    #[test]
    fn result_serializes_camel_case() {
        let result = AnalysisResult::unknown();
        let json = serde_json::to_value(&result).expect("serialize result");
        assert_eq!(json["dateCount"], 0);
        assert_eq!(json["period"], "unknown");
        assert_eq!(json["startDayOffset"], 0);
        let round: AnalysisResult = serde_json::from_value(json).expect("deserialize result");
        assert_eq!(round, result);
    }
}
