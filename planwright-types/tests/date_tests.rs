use chrono::TimeDelta;
use planwright_types::{Error, PlanDate};
use proptest::prelude::*;

// ── Construction ─────────────────────────────────────────────────

#[test]
fn now_has_whole_seconds() {
    let d = PlanDate::now();
    assert_eq!(d.as_naive().and_utc().timestamp_subsec_nanos(), 0);
}

#[test]
fn from_ymd_is_midnight() {
    let d = PlanDate::from_ymd(2024, 3, 1).unwrap();
    assert_eq!(d.to_string(), "2024-03-01T00:00:00");
}

#[test]
fn from_ymd_rejects_invalid_day() {
    let err = PlanDate::from_ymd(2023, 2, 29).unwrap_err();
    assert!(matches!(err, Error::InvalidDate(_)));
    assert!(err.to_string().contains("2023-02-29"));
}

#[test]
fn from_ymd_hms_rejects_invalid_time() {
    assert!(PlanDate::from_ymd_hms(2024, 1, 1, 24, 0, 0).is_err());
}

#[test]
fn infinite_bounds_are_ordered() {
    let past = PlanDate::infinite_past();
    let future = PlanDate::infinite_future();
    assert!(past < future);
    assert_eq!(past.to_string(), "1971-01-01T00:00:00");
    assert_eq!(future.to_string(), "2030-12-31T23:59:59");
}

// ── Parsing & formatting ─────────────────────────────────────────

#[test]
fn parses_iso_form() {
    let d: PlanDate = "2024-06-15T08:30:00".parse().unwrap();
    assert_eq!(d, PlanDate::from_ymd_hms(2024, 6, 15, 8, 30, 0).unwrap());
}

#[test]
fn parses_space_separated_form() {
    let d: PlanDate = "2024-06-15 08:30:00".parse().unwrap();
    assert_eq!(d.to_string(), "2024-06-15T08:30:00");
}

#[test]
fn parses_bare_date() {
    let d: PlanDate = " 2024-06-15 ".parse().unwrap();
    assert_eq!(d, PlanDate::from_ymd(2024, 6, 15).unwrap());
}

#[test]
fn rejects_garbage() {
    let err = "next tuesday".parse::<PlanDate>().unwrap_err();
    assert!(err.to_string().contains("next tuesday"));
}

#[test]
fn serializes_as_string() {
    let d = PlanDate::from_ymd(2024, 1, 2).unwrap();
    let json = serde_json::to_string(&d).unwrap();
    assert_eq!(json, "\"2024-01-02T00:00:00\"");
    let back: PlanDate = serde_json::from_str(&json).unwrap();
    assert_eq!(back, d);
}

#[test]
fn deserialize_rejects_bad_text() {
    assert!(serde_json::from_str::<PlanDate>("\"2024-13-01\"").is_err());
}

// ── Arithmetic ───────────────────────────────────────────────────

#[test]
fn add_days_moves_forward_and_backward() {
    let d = PlanDate::from_ymd(2024, 2, 28).unwrap();
    assert_eq!(d.add_days(1).unwrap(), PlanDate::from_ymd(2024, 2, 29).unwrap());
    assert_eq!(d.add_days(-28).unwrap(), PlanDate::from_ymd(2024, 1, 31).unwrap());
}

#[test]
fn add_days_out_of_range_is_none() {
    let d = PlanDate::from_ymd(2024, 1, 1).unwrap();
    assert!(d.add_days(i64::MAX).is_none());
}

#[test]
fn checked_shift_within_range() {
    let d = PlanDate::from_ymd(2024, 3, 1).unwrap();
    let hours = TimeDelta::try_hours(36).unwrap();
    assert_eq!(
        d.checked_add(hours).unwrap(),
        PlanDate::from_ymd_hms(2024, 3, 2, 12, 0, 0).unwrap()
    );
    assert_eq!(
        d.checked_sub(hours).unwrap(),
        PlanDate::from_ymd_hms(2024, 2, 28, 12, 0, 0).unwrap()
    );
}

#[test]
fn checked_shift_out_of_range_is_none() {
    let d = PlanDate::from_ymd(2024, 1, 1).unwrap();
    let far = TimeDelta::try_days(100_000_000).unwrap();
    assert!(d.checked_add(far).is_none());
    assert!(d.checked_sub(far).is_none());
}

#[test]
#[should_panic]
fn operator_add_panics_out_of_range() {
    let _ = PlanDate::from_ymd(2024, 1, 1).unwrap() + TimeDelta::try_days(100_000_000).unwrap();
}

#[test]
fn days_until_is_signed() {
    let a = PlanDate::from_ymd(2024, 1, 1).unwrap();
    let b = PlanDate::from_ymd(2024, 1, 11).unwrap();
    assert_eq!(a.days_until(&b), 10);
    assert_eq!(b.days_until(&a), -10);
}

#[test]
fn is_before() {
    let a = PlanDate::from_ymd(2024, 1, 1).unwrap();
    let b = PlanDate::from_ymd(2024, 1, 2).unwrap();
    assert!(a.is_before(&b));
    assert!(!b.is_before(&a));
    assert!(!a.is_before(&a));
}

proptest! {
    #[test]
    fn display_parse_is_identity(days in -10_000i64..10_000, secs in 0i64..86_400) {
        let base = PlanDate::from_ymd(2000, 1, 1).unwrap();
        let d = base.add_days(days).unwrap() + chrono::TimeDelta::seconds(secs);
        let parsed: PlanDate = d.to_string().parse().unwrap();
        prop_assert_eq!(parsed, d);
    }

    #[test]
    fn add_days_then_days_until(days in -5_000i64..5_000) {
        let base = PlanDate::from_ymd(2020, 6, 1).unwrap();
        let shifted = base.add_days(days).unwrap();
        prop_assert_eq!(base.days_until(&shifted), days);
    }
}
