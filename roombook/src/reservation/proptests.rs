//! Property-based tests for reservation intervals and statuses.

use super::{ReservationDetails, ReservationStatus};
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

// Dates within a few years of 2024 so intervals collide often.
fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..1500).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(offset)
    })
}

// Non-empty half-open intervals.
fn interval_strategy() -> impl Strategy<Value = (NaiveDate, NaiveDate)> {
    (date_strategy(), 1i64..60).prop_map(|(start, len)| (start, start + Duration::days(len)))
}

fn status_strategy() -> impl Strategy<Value = ReservationStatus> {
    prop_oneof![
        Just(ReservationStatus::Pending),
        Just(ReservationStatus::Approved),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Overlap does not depend on which side is stored
    #[test]
    fn overlap_is_symmetric(a in interval_strategy(), b in interval_strategy()) {
        let left = ReservationDetails::new(1, 5, a.0, a.1);
        let right = ReservationDetails::new(2, 5, b.0, b.1);
        prop_assert_eq!(left.overlaps(b.0, b.1), right.overlaps(a.0, a.1));
    }

    // Overlap holds exactly when some day belongs to both intervals
    #[test]
    fn overlap_matches_shared_day(a in interval_strategy(), b in interval_strategy()) {
        let stored = ReservationDetails::new(1, 5, a.0, a.1);
        let shared = a.0.max(b.0) < a.1.min(b.1);
        prop_assert_eq!(stored.overlaps(b.0, b.1), shared);
    }

    // Back-to-back bookings never conflict
    #[test]
    fn adjacent_intervals_never_overlap(a in interval_strategy(), len in 1i64..60) {
        let stored = ReservationDetails::new(1, 5, a.0, a.1);
        prop_assert!(!stored.overlaps(a.1, a.1 + Duration::days(len)));
        prop_assert!(!stored.overlaps(a.0 - Duration::days(len), a.0));
    }

    // Every non-empty interval overlaps itself
    #[test]
    fn interval_overlaps_itself(a in interval_strategy()) {
        let stored = ReservationDetails::new(1, 5, a.0, a.1);
        prop_assert!(stored.overlaps(a.0, a.1));
        prop_assert!(stored.check_date_order().is_ok());
    }

    // Display output parses back to the same status in any case
    #[test]
    fn status_display_parses_back(status in status_strategy(), lower in any::<bool>()) {
        let text = if lower { status.to_string().to_lowercase() } else { status.to_string() };
        prop_assert_eq!(text.parse::<ReservationStatus>().unwrap(), status);
    }
}
