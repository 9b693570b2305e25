use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// A date/time leaf value.
///
/// Each variant lives on its own axis: instants and local date-times are
/// measured from the Unix epoch, dates in whole days, and times of day from
/// midnight. Values on different axes never compare equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Temporal {
    /// A point in time with a known offset, normalized to UTC.
    Instant(DateTime<Utc>),
    /// A calendar date.
    Date(NaiveDate),
    /// A wall-clock time of day.
    Time(NaiveTime),
    /// A date and time without an offset.
    Local(NaiveDateTime),
}

/// The axis a [`Temporal`] value is measured on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemporalAxis {
    Instant,
    Date,
    Time,
    Local,
}

/// Granularity for truncating temporal values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Millis,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// Length of one unit in milliseconds.
    pub const fn as_millis(self) -> i64 {
        match self {
            Self::Millis => 1,
            Self::Seconds => 1_000,
            Self::Minutes => 60_000,
            Self::Hours => 3_600_000,
            Self::Days => 86_400_000,
        }
    }
}

const MILLIS_PER_DAY: i64 = 86_400_000;

impl Temporal {
    /// The axis this value is measured on.
    pub fn axis(&self) -> TemporalAxis {
        match self {
            Self::Instant(_) => TemporalAxis::Instant,
            Self::Date(_) => TemporalAxis::Date,
            Self::Time(_) => TemporalAxis::Time,
            Self::Local(_) => TemporalAxis::Local,
        }
    }

    /// Position on the value's own axis, in milliseconds.
    pub fn axis_millis(&self) -> i64 {
        match self {
            Self::Instant(dt) => dt.timestamp_millis(),
            Self::Local(dt) => dt.and_utc().timestamp_millis(),
            Self::Date(d) => i64::from(d.num_days_from_ce()) * MILLIS_PER_DAY,
            Self::Time(t) => {
                i64::from(t.num_seconds_from_midnight()) * 1_000
                    + i64::from(t.nanosecond() / 1_000_000)
            }
        }
    }

    /// Absolute distance to `other` in milliseconds, or `None` when the two
    /// values live on different axes.
    pub fn distance_millis(&self, other: &Self) -> Option<i64> {
        if self.axis() != other.axis() {
            return None;
        }
        Some((self.axis_millis() - other.axis_millis()).abs())
    }

    /// Returns `true` if both values fall into the same `unit` bucket.
    pub fn truncated_eq(&self, other: &Self, unit: TimeUnit) -> bool {
        if self.axis() != other.axis() {
            return false;
        }
        let step = unit.as_millis();
        self.axis_millis().div_euclid(step) == other.axis_millis().div_euclid(step)
    }
}

impl fmt::Display for Temporal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instant(dt) => write!(f, "{}", dt.to_rfc3339()),
            Self::Date(d) => write!(f, "{d}"),
            Self::Time(t) => write!(f, "{t}"),
            Self::Local(dt) => write!(f, "{dt}"),
        }
    }
}

impl From<DateTime<Utc>> for Temporal {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Instant(dt)
    }
}

impl From<NaiveDate> for Temporal {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<NaiveTime> for Temporal {
    fn from(t: NaiveTime) -> Self {
        Self::Time(t)
    }
}

impl From<NaiveDateTime> for Temporal {
    fn from(dt: NaiveDateTime) -> Self {
        Self::Local(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant(h: u32, m: u32, s: u32, ms: u32) -> Temporal {
        let dt = Utc
            .with_ymd_and_hms(2024, 3, 1, h, m, s)
            .unwrap()
            .checked_add_signed(chrono::Duration::milliseconds(i64::from(ms)))
            .unwrap();
        Temporal::Instant(dt)
    }

    #[test]
    fn distance_on_same_axis() {
        let a = instant(10, 0, 0, 0);
        let b = instant(10, 0, 1, 500);
        assert_eq!(a.distance_millis(&b), Some(1_500));
        assert_eq!(b.distance_millis(&a), Some(1_500));
    }

    #[test]
    fn distance_across_axes_is_undefined() {
        let a = instant(10, 0, 0, 0);
        let b = Temporal::Date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(a.distance_millis(&b), None);
        assert!(!a.truncated_eq(&b, TimeUnit::Days));
    }

    #[test]
    fn truncation_buckets() {
        let a = instant(10, 15, 59, 999);
        let b = instant(10, 15, 0, 0);
        let c = instant(10, 16, 0, 0);
        assert!(a.truncated_eq(&b, TimeUnit::Minutes));
        assert!(!a.truncated_eq(&c, TimeUnit::Minutes));
        assert!(a.truncated_eq(&c, TimeUnit::Hours));
        assert!(!a.truncated_eq(&b, TimeUnit::Seconds));
    }

    #[test]
    fn dates_and_times_use_their_own_axes() {
        let d1 = Temporal::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let d2 = Temporal::Date(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert_eq!(d1.distance_millis(&d2), Some(2 * MILLIS_PER_DAY));

        let t1 = Temporal::Time(NaiveTime::from_hms_milli_opt(8, 0, 0, 250).unwrap());
        let t2 = Temporal::Time(NaiveTime::from_hms_opt(8, 0, 1).unwrap());
        assert_eq!(t1.distance_millis(&t2), Some(750));
    }

    #[test]
    fn serde_roundtrip() {
        let t = instant(1, 2, 3, 4);
        let json = serde_json::to_string(&t).unwrap();
        let parsed: Temporal = serde_json::from_str(&json).unwrap();
        assert_eq!(t, parsed);
    }
}
