//! Property tests for progress and time-period classification.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use stablehold_core::{
    classify, compute_progress, resolve_timezone, ProgressSettings, TimePeriod,
    REFERENCE_TIMEZONE,
};

const MINUTES_IN_200_DAYS: i64 = 200 * 24 * 60;

proptest! {
    #[test]
    fn progress_never_decreases(
        a in 0i64..MINUTES_IN_200_DAYS,
        b in 0i64..MINUTES_IN_200_DAYS,
        offset in 0u8..=100,
    ) {
        let tz = resolve_timezone(REFERENCE_TIMEZONE).unwrap();
        let epoch = ProgressSettings::default().epoch_instant().unwrap();
        let (earlier, later) = if a <= b { (a, b) } else { (b, a) };

        let p1 = compute_progress(epoch, epoch + Duration::minutes(earlier), offset, tz).unwrap();
        let p2 = compute_progress(epoch, epoch + Duration::minutes(later), offset, tz).unwrap();
        prop_assert!(p1 <= p2);
    }

    #[test]
    fn progress_stays_between_offset_and_one_hundred(
        minutes in -MINUTES_IN_200_DAYS..MINUTES_IN_200_DAYS,
        offset in 0u8..=100,
    ) {
        let tz = resolve_timezone(REFERENCE_TIMEZONE).unwrap();
        let epoch = ProgressSettings::default().epoch_instant().unwrap();
        let p = compute_progress(epoch, epoch + Duration::minutes(minutes), offset, tz).unwrap();
        prop_assert!(p >= offset);
        prop_assert!(p <= 100);
    }

    #[test]
    fn progress_is_deterministic(minutes in 0i64..MINUTES_IN_200_DAYS) {
        let tz = resolve_timezone(REFERENCE_TIMEZONE).unwrap();
        let epoch = ProgressSettings::default().epoch_instant().unwrap();
        let now = epoch + Duration::minutes(minutes);
        prop_assert_eq!(
            compute_progress(epoch, now, 20, tz).unwrap(),
            compute_progress(epoch, now, 20, tz).unwrap()
        );
    }

    #[test]
    fn classify_agrees_with_local_hour(seconds in 0i64..(4 * 365 * 86_400)) {
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(seconds);
        let tz = resolve_timezone(REFERENCE_TIMEZONE).unwrap();
        let hour = chrono::Timelike::hour(&instant.with_timezone(&tz));
        prop_assert_eq!(classify(instant, REFERENCE_TIMEZONE).unwrap(), TimePeriod::from_hour(hour));
    }
}

#[test]
fn documented_examples_hold() {
    let tz = resolve_timezone(REFERENCE_TIMEZONE).unwrap();
    let epoch = ProgressSettings::default().epoch_instant().unwrap();
    assert_eq!(compute_progress(epoch, epoch, 20, tz).unwrap(), 20);
    assert_eq!(compute_progress(epoch, epoch + Duration::days(5), 20, tz).unwrap(), 25);
    assert_eq!(compute_progress(epoch, epoch + Duration::days(80), 20, tz).unwrap(), 100);
}

#[test]
fn every_hour_of_an_eastern_day_is_classified_once() {
    // 2025-01-15 00:00 EST == 05:00 UTC; no DST change that day.
    let midnight = Utc.with_ymd_and_hms(2025, 1, 15, 5, 0, 0).unwrap();
    let expected = [
        TimePeriod::Night, TimePeriod::Night, TimePeriod::Night, TimePeriod::Night,
        TimePeriod::Night, TimePeriod::Morning, TimePeriod::Morning, TimePeriod::Morning,
        TimePeriod::Morning, TimePeriod::Morning, TimePeriod::Morning, TimePeriod::Day,
        TimePeriod::Day, TimePeriod::Day, TimePeriod::Day, TimePeriod::Day,
        TimePeriod::Day, TimePeriod::Day, TimePeriod::Sunset, TimePeriod::Night,
        TimePeriod::Night, TimePeriod::Night, TimePeriod::Night, TimePeriod::Night,
    ];
    for (hour, period) in expected.iter().enumerate() {
        let instant = midnight + Duration::hours(hour as i64);
        assert_eq!(classify(instant, REFERENCE_TIMEZONE).unwrap(), *period, "hour {hour}");
    }
}
