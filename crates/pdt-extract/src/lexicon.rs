//! French (and English) month and weekday vocabulary.
//!
//! The textual date pattern never contains the bare stem `mar`: in schedules
//! it is far more often `Mar.` for *Mardi* than an abbreviation of *Mars*.
//! Grid month rows do accept `mar`, but only after weekday header rows have
//! been filtered out.

use std::sync::LazyLock;

use regex::Regex;

/// `<day> <month name>`; capture 1 is the day, capture 2 the month token.
pub(crate) static FRENCH_DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b([0-9]{1,2})\s+(janvier|février|fevrier|mars|avril|mai|juin|juillet|août|aout|septembre|octobre|novembre|décembre|decembre|janv|févr|fevr|avr|juil|sept|jan|feb|apr|may|jun|jul|aug|sep|oct|nov|dec|déc)\b",
    )
    .expect("Invalid French date regex")
});

/// Month tokens as they appear in grid month rows.
pub(crate) static MONTH_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:janvier|février|fevrier|mars|avril|mai|juin|juillet|août|aout|septembre|octobre|novembre|décembre|decembre|janv|févr|fevr|fév|fev|avr|juil|sept|déc|jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)\b",
    )
    .expect("Invalid month token regex")
});

/// Weekday names and abbreviations (French and English).
pub(crate) static WEEKDAY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:lundi|mardi|mercredi|jeudi|vendredi|samedi|dimanche|lun|mar|mer|jeu|ven|sam|dim|mon|tue|wed|thu|fri|sat|sun)\b",
    )
    .expect("Invalid weekday regex")
});

/// Map a month token (full name or abbreviation) to its number.
pub(crate) fn month_number(token: &str) -> Option<u32> {
    let lower = token.trim().to_lowercase();
    let starts = |prefixes: &[&str]| prefixes.iter().any(|p| lower.starts_with(p));
    let month = if starts(&["jan"]) {
        1
    } else if starts(&["fév", "fev", "feb"]) {
        2
    } else if starts(&["mar"]) {
        3
    } else if starts(&["avr", "apr"]) {
        4
    } else if starts(&["mai", "may"]) {
        5
    } else if starts(&["juin", "jun"]) {
        6
    } else if starts(&["juil", "jul"]) {
        7
    } else if starts(&["aoû", "aou", "aug"]) {
        8
    } else if starts(&["sep"]) {
        9
    } else if starts(&["oct"]) {
        10
    } else if starts(&["nov"]) {
        11
    } else if starts(&["déc", "dec"]) {
        12
    } else {
        return None;
    };
    Some(month)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_numbers_cover_french_and_english() {
        assert_eq!(month_number("Janvier"), Some(1));
        assert_eq!(month_number("févr"), Some(2));
        assert_eq!(month_number("MARS"), Some(3));
        assert_eq!(month_number("juin"), Some(6));
        assert_eq!(month_number("Juillet"), Some(7));
        assert_eq!(month_number("août"), Some(8));
        assert_eq!(month_number("sept"), Some(9));
        assert_eq!(month_number("déc"), Some(12));
        assert_eq!(month_number("lundi"), None);
    }

    #[test]
    fn textual_pattern_ignores_weekday_stem() {
        assert!(!FRENCH_DATE_REGEX.is_match("Mardi 9"));
        assert!(!FRENCH_DATE_REGEX.is_match("9 Mar"));
        assert!(!FRENCH_DATE_REGEX.is_match("9 Mardi"));
        assert!(FRENCH_DATE_REGEX.is_match("9 Mars 2021"));
    }

    #[test]
    fn abbreviations_need_a_word_boundary() {
        let caps = FRENCH_DATE_REGEX.captures("le 4 janv.").unwrap();
        assert_eq!(&caps[2], "janv");
        assert!(!FRENCH_DATE_REGEX.is_match("4 octogone"));
    }

    #[test]
    fn weekday_row_is_recognised() {
        assert_eq!(WEEKDAY_REGEX.find_iter("Lun Mar Mer Jeu Ven").count(), 5);
        assert_eq!(MONTH_TOKEN_REGEX.find_iter("Oct Oct Nov").count(), 3);
    }
}
