//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
///
/// `now()` truncates to microseconds, the resolution Postgres stores, so a
/// value read back from storage compares equal to the one written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now().trunc_subsecs(6))
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Midnight UTC at the start of `date`.
    pub fn start_of_day(date: NaiveDate) -> Self {
        Self(date.and_time(chrono::NaiveTime::MIN).and_utc())
    }

    /// The last stored instant of `date` (23:59:59.999999 UTC).
    pub fn end_of_day(date: NaiveDate) -> Self {
        let start = Self::start_of_day(date).0;
        Self(start + Duration::days(1) - Duration::microseconds(1))
    }

    /// Creates a new timestamp by adding the specified number of seconds.
    pub fn plus_secs(&self, secs: i64) -> Self {
        Self(self.0 + Duration::seconds(secs))
    }

    /// Returns `self` if it is strictly after `previous`, otherwise one
    /// microsecond past `previous`.
    ///
    /// Version stamps compared with compare-and-swap must always move forward.
    pub fn advanced_past(self, previous: &Timestamp) -> Self {
        if self.0 > previous.0 {
            self
        } else {
            Self(previous.0 + Duration::microseconds(1))
        }
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn ordering_helpers_agree_with_ord() {
        let ts1 = Timestamp::now();
        let ts2 = ts1.plus_secs(5);

        assert!(ts1.is_before(&ts2));
        assert!(ts2.is_after(&ts1));
        assert!(ts1 < ts2);
    }

    #[test]
    fn day_bounds_cover_the_whole_day() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let start = Timestamp::start_of_day(date);
        let end = Timestamp::end_of_day(date);

        assert_eq!(start.as_datetime().hour(), 0);
        assert_eq!(end.as_datetime().day(), 9);
        assert_eq!(end.as_datetime().hour(), 23);
        assert!(start.is_before(&end));
    }

    #[test]
    fn now_has_microsecond_resolution() {
        assert_eq!(Timestamp::now().as_datetime().nanosecond() % 1_000, 0);
    }

    #[test]
    fn advanced_past_always_moves_forward() {
        let ts = Timestamp::now();
        assert!(ts.advanced_past(&ts).is_after(&ts));
        let later = ts.plus_secs(1);
        assert_eq!(later.advanced_past(&ts), later);
    }

    #[test]
    fn timestamp_serializes_to_rfc3339() {
        let dt = DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let json = serde_json::to_string(&Timestamp::from_datetime(dt)).unwrap();
        assert!(json.contains("2024-01-15"));
    }
}
