use chrono::NaiveDate;

use crate::scoring::semester::{SemesterKey, SemesterKeyError, Term};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[test]
fn legacy_spellings_parse_to_the_same_key() {
    let expected = SemesterKey::new(Term::First, 2025);

    for raw in ["hoc_ky_1_2025", "hoc_ky_1-2025", "hoc_ky_12025", " hoc_ky_1_2025 "] {
        assert_eq!(SemesterKey::parse(raw), Ok(expected), "parsing {raw}");
    }
    assert_eq!(expected.token(), "hoc_ky_1_2025");
    assert_eq!(expected.label(), "HK1 2025-2026");
}

#[test]
fn rejects_malformed_tokens() {
    for raw in ["", "hk1_2025", "hoc_ky_3_2025", "hoc_ky_1_25", "hoc_ky_1_2025x", "hoc_ky_1__2025"] {
        match SemesterKey::parse(raw) {
            Err(SemesterKeyError::Malformed(value)) => assert_eq!(value, raw),
            other => panic!("expected malformed error for {raw:?}, got {other:?}"),
        }
    }
}

#[test]
fn from_parts_accepts_year_or_consecutive_span() {
    let second = SemesterKey::new(Term::Second, 2024);

    assert_eq!(SemesterKey::from_parts("hoc_ky_2", "2024"), Ok(second));
    assert_eq!(SemesterKey::from_parts("hoc_ky_2", "2024-2025"), Ok(second));
    assert_eq!(
        SemesterKey::from_parts("hoc_ky_2", "2024-2026"),
        Err(SemesterKeyError::YearMismatch {
            first: 2024,
            second: 2026
        })
    );
    assert!(matches!(
        SemesterKey::from_parts("hoc_ky_3", "2024"),
        Err(SemesterKeyError::Malformed(_))
    ));
}

#[test]
fn containing_maps_calendar_months_onto_terms() {
    let cases = [
        (date(2025, 7, 1), SemesterKey::new(Term::First, 2025)),
        (date(2025, 11, 30), SemesterKey::new(Term::First, 2025)),
        (date(2025, 12, 1), SemesterKey::new(Term::Second, 2025)),
        (date(2026, 1, 15), SemesterKey::new(Term::Second, 2025)),
        (date(2026, 4, 30), SemesterKey::new(Term::Second, 2025)),
        (date(2026, 5, 10), SemesterKey::new(Term::First, 2026)),
        (date(2026, 6, 30), SemesterKey::new(Term::First, 2026)),
    ];

    for (day, expected) in cases {
        assert_eq!(SemesterKey::containing(day), Ok(expected), "resolving {day}");
    }
}

#[test]
fn window_covers_the_term_months() {
    let first = SemesterKey::new(Term::First, 2025).window();
    assert_eq!(first.starts_on, date(2025, 7, 1));
    assert_eq!(first.ends_on, date(2025, 11, 30));

    let second = SemesterKey::new(Term::Second, 2025).window();
    assert!(second.contains(date(2026, 2, 28)));
    assert!(!second.contains(date(2026, 5, 1)));
}

#[test]
fn deserializes_legacy_tokens_and_serializes_canonical() {
    let key: SemesterKey = serde_json::from_str("\"hoc_ky_2-2024\"").expect("legacy token parses");

    assert_eq!(key, SemesterKey::new(Term::Second, 2024));
    assert_eq!(
        serde_json::to_string(&key).expect("serializes"),
        "\"hoc_ky_2_2024\""
    );
    assert!(serde_json::from_str::<SemesterKey>("\"spring-2024\"").is_err());
}

#[test]
fn keys_order_by_year_then_term() {
    let mut keys = vec![
        SemesterKey::new(Term::First, 2025),
        SemesterKey::new(Term::Second, 2024),
        SemesterKey::new(Term::First, 2024),
    ];
    keys.sort();

    assert_eq!(
        keys,
        vec![
            SemesterKey::new(Term::First, 2024),
            SemesterKey::new(Term::Second, 2024),
            SemesterKey::new(Term::First, 2025),
        ]
    );
    assert_eq!(SemesterKey::terms_of(2024), [keys[0], keys[1]]);
}
