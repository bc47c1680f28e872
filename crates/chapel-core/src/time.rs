//! Timestamps for CMS event records.
//!
//! The CMS hands out datetimes as strings in several ISO-8601 flavours, some
//! with an offset and some without. [`Timestamp`] is the single parse of such
//! a string that every formatter and the query engine share, so an
//! unparsable value is classified once and handled the same way everywhere.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Offset-less datetime layouts accepted from the CMS, tried in order.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// A datetime field of a CMS record after parsing.
///
/// There are three outcomes:
/// - **At**: an absolute instant (stored as UTC)
/// - **Invalid**: a non-empty string that is not a recognisable datetime
/// - **Missing**: the field was absent or blank
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Timestamp {
    /// A parsed instant, stored in UTC.
    At(DateTime<Utc>),
    /// The raw text that failed to parse.
    Invalid(String),
    /// No value was supplied.
    #[default]
    Missing,
}

impl Timestamp {
    /// Parses a CMS datetime string.
    ///
    /// Values carrying an offset (`Z`, `+11:00`) are absolute. Values without
    /// one are wall-clock times in `zone`; a bare date is midnight in `zone`.
    /// Local times that fall into a DST gap are `Invalid`, and times in a DST
    /// fold resolve to the earlier instant.
    pub fn parse(raw: &str, zone: Tz) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Missing;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Self::At(dt.with_timezone(&Utc));
        }

        let naive = NAIVE_DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            });

        match naive.and_then(|n| zone.from_local_datetime(&n).earliest()) {
            Some(local) => Self::At(local.with_timezone(&Utc)),
            None => Self::Invalid(trimmed.to_string()),
        }
    }

    /// Parses an optional field; `None` becomes [`Timestamp::Missing`].
    pub fn parse_opt(raw: Option<&str>, zone: Tz) -> Self {
        raw.map_or(Self::Missing, |s| Self::parse(s, zone))
    }

    /// Creates a timestamp from an instant.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self::At(dt)
    }

    /// Returns the instant if the value parsed.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::At(dt) => Some(*dt),
            Self::Invalid(_) | Self::Missing => None,
        }
    }

    /// Returns the instant rendered in `zone`.
    pub fn in_zone(&self, zone: Tz) -> Option<DateTime<Tz>> {
        self.instant().map(|dt| dt.with_timezone(&zone))
    }

    /// Returns `true` if the value parsed.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::At(_))
    }

    /// Returns `true` if no value was supplied.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Returns `true` if both timestamps parsed and `self` is strictly later.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        match (self.instant(), other.instant()) {
            (Some(a), Some(b)) => a > b,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    mod parsing {
        use super::*;

        #[test]
        fn rfc3339_with_zulu() {
            let ts = Timestamp::parse("2025-03-01T10:00:00.000Z", Tz::UTC);
            assert_eq!(ts, Timestamp::At(utc(2025, 3, 1, 10, 0, 0)));
        }

        #[test]
        fn rfc3339_with_offset_ignores_site_zone() {
            let ts = Timestamp::parse("2025-03-01T10:00:00+11:00", Tz::America__New_York);
            assert_eq!(ts.instant(), Some(utc(2025, 2, 28, 23, 0, 0)));
        }

        #[test]
        fn naive_minutes_only_uses_site_zone() {
            let ts = Timestamp::parse("2025-03-01T10:00", Tz::Australia__Sydney);
            // AEDT is UTC+11 in March.
            assert_eq!(ts.instant(), Some(utc(2025, 2, 28, 23, 0, 0)));
        }

        #[test]
        fn naive_with_seconds_and_space_separator() {
            assert_eq!(
                Timestamp::parse("2025-03-01 10:00:30", Tz::UTC).instant(),
                Some(utc(2025, 3, 1, 10, 0, 30))
            );
            assert_eq!(
                Timestamp::parse("2025-03-01T10:00:30.250", Tz::UTC).instant(),
                Some(utc(2025, 3, 1, 10, 0, 30) + chrono::Duration::milliseconds(250))
            );
        }

        #[test]
        fn bare_date_is_local_midnight() {
            let ts = Timestamp::parse("2025-01-05", Tz::UTC);
            assert_eq!(ts.instant(), Some(utc(2025, 1, 5, 0, 0, 0)));
        }

        #[test]
        fn surrounding_whitespace_is_ignored() {
            let ts = Timestamp::parse("  2025-01-05T08:00:00Z \n", Tz::UTC);
            assert_eq!(ts.instant(), Some(utc(2025, 1, 5, 8, 0, 0)));
        }

        #[test]
        fn blank_is_missing() {
            assert_eq!(Timestamp::parse("", Tz::UTC), Timestamp::Missing);
            assert_eq!(Timestamp::parse("   ", Tz::UTC), Timestamp::Missing);
            assert_eq!(Timestamp::parse_opt(None, Tz::UTC), Timestamp::Missing);
        }

        #[test]
        fn garbage_is_invalid() {
            let ts = Timestamp::parse("next sunday", Tz::UTC);
            assert_eq!(ts, Timestamp::Invalid("next sunday".to_string()));
            assert!(!ts.is_valid());
            assert!(ts.instant().is_none());
        }

        #[test]
        fn out_of_range_fields_are_invalid() {
            assert!(!Timestamp::parse("2025-13-01T10:00", Tz::UTC).is_valid());
            assert!(!Timestamp::parse("2025-02-30", Tz::UTC).is_valid());
        }

        #[test]
        fn dst_gap_is_invalid() {
            // Clocks jump from 02:00 to 03:00 in Sydney on 2025-10-05.
            let ts = Timestamp::parse("2025-10-05T02:30", Tz::Australia__Sydney);
            assert!(matches!(ts, Timestamp::Invalid(_)));
        }

        #[test]
        fn dst_fold_takes_earliest() {
            // Clocks fall back from 03:00 to 02:00 in Sydney on 2025-04-06.
            let ts = Timestamp::parse("2025-04-06T02:30", Tz::Australia__Sydney);
            assert_eq!(ts.instant(), Some(utc(2025, 4, 5, 15, 30, 0)));
        }
    }

    mod comparison {
        use super::*;

        #[test]
        fn is_after_requires_both_valid() {
            let early = Timestamp::from_utc(utc(2025, 3, 1, 9, 0, 0));
            let late = Timestamp::from_utc(utc(2025, 3, 1, 10, 0, 0));
            assert!(late.is_after(&early));
            assert!(!early.is_after(&late));
            assert!(!late.is_after(&late));
            assert!(!late.is_after(&Timestamp::Missing));
            assert!(!Timestamp::Invalid("x".into()).is_after(&early));
        }

        #[test]
        fn in_zone_converts() {
            let ts = Timestamp::from_utc(utc(2025, 3, 1, 0, 0, 0));
            let local = ts.in_zone(Tz::Australia__Sydney).unwrap();
            assert_eq!(local.format("%H:%M").to_string(), "11:00");
        }

        #[test]
        fn serde_roundtrip() {
            let ts = Timestamp::from_utc(utc(2025, 3, 1, 10, 0, 0));
            let json = serde_json::to_string(&ts).unwrap();
            let back: Timestamp = serde_json::from_str(&json).unwrap();
            assert_eq!(ts, back);
        }
    }
}
