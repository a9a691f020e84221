//! Timestamp value generators.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use mock_core::MockValue;
use rand::Rng;

/// Generate the current UTC timestamp.
///
/// This is NOT deterministic - each call returns the current time.
pub fn generate_timestamp_now() -> MockValue {
    MockValue::DateTime(Utc::now())
}

/// Generate a random instant within the last `days` days, up to now.
pub fn generate_recent_timestamp<R: Rng>(rng: &mut R, days: u32) -> MockValue {
    MockValue::DateTime(recent_instant(rng, days))
}

/// Generate a random date within the last `days` days.
pub fn generate_recent_date<R: Rng>(rng: &mut R, days: u32) -> MockValue {
    MockValue::Date(recent_instant(rng, days).date_naive())
}

/// Random instant in `[now - days, now]` at second precision.
pub fn recent_instant<R: Rng>(rng: &mut R, days: u32) -> DateTime<Utc> {
    let now = Utc::now();
    let window = i64::from(days) * 24 * 60 * 60;
    if window == 0 {
        return now;
    }
    now - Duration::seconds(rng.random_range(0..=window))
}

/// Generate a random timestamp in the given range.
///
/// The start and end should be ISO 8601 formatted timestamps or dates.
pub fn generate_timestamp_range<R: Rng>(rng: &mut R, start: &str, end: &str) -> MockValue {
    let start_dt = parse_timestamp(start);
    let end_dt = parse_timestamp(end);

    match (start_dt, end_dt) {
        (Some(start), Some(end)) => {
            let start_ts = start.timestamp();
            let end_ts = end.timestamp();

            if start_ts >= end_ts {
                MockValue::DateTime(start)
            } else {
                let random_ts = rng.random_range(start_ts..=end_ts);
                let dt = DateTime::from_timestamp(random_ts, 0).unwrap_or(start);
                MockValue::DateTime(dt)
            }
        }
        (Some(dt), None) | (None, Some(dt)) => MockValue::DateTime(dt),
        (None, None) => MockValue::DateTime(Utc::now()),
    }
}

/// Parse a timestamp string in various formats.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    // Try RFC 3339 / ISO 8601
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    // Try common date-only format
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_recent_timestamp_within_window() {
        let mut rng = StdRng::seed_from_u64(42);
        let before = Utc::now() - Duration::days(365);

        for _ in 0..50 {
            if let MockValue::DateTime(dt) = generate_recent_timestamp(&mut rng, 365) {
                assert!(dt >= before - Duration::seconds(1));
                assert!(dt <= Utc::now());
            } else {
                panic!("Expected DateTime value");
            }
        }
    }

    #[test]
    fn test_zero_window_is_now() {
        let mut rng = StdRng::seed_from_u64(42);
        let dt = recent_instant(&mut rng, 0);
        assert!(Utc::now() - dt < Duration::seconds(5));
    }

    #[test]
    fn test_generate_timestamp_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let value = generate_timestamp_range(&mut rng, "2024-01-01", "2024-12-31");

        if let MockValue::DateTime(dt) = value {
            assert_eq!(dt.year(), 2024);
        } else {
            panic!("Expected DateTime value");
        }
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2024-06-15T10:30:00Z").is_some());
        assert!(parse_timestamp("2024-06-15").is_some());
        assert!(parse_timestamp("June 15th").is_none());
    }
}
