//! Date and time formatting for event display.
//!
//! [`EventTimeFormatter`] renders [`Timestamp`]s in the site's time zone in
//! the fixed English layouts the pages use:
//! - **Clock**: `9:05AM`, `12:00PM`
//! - **Day/month**: `05 March` (list cards)
//! - **Month/year**: `March 2025` (group headings)
//! - **Full date**: `5 March 2025` (detail page)
//! - **Numeric**: `05.03.2025` (carousel)
//!
//! Every function returns an empty string for a missing or unparsable
//! timestamp, except [`EventTimeFormatter::schedule_label`] which says `TBA`.
//!
//! The module also renders query results as plain text for the CLI.

#[cfg(test)]
mod golden_tests;

use chrono::{DateTime, Datelike, Timelike};
use chrono_tz::Tz;

use crate::event::EventGroup;
use crate::time::Timestamp;

/// English month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Label shown in place of a schedule when an event has no usable start.
pub const UNSCHEDULED_LABEL: &str = "TBA";

/// Formats event timestamps in a fixed time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventTimeFormatter {
    zone: Tz,
}

impl Default for EventTimeFormatter {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}

impl EventTimeFormatter {
    /// Creates a formatter rendering in `zone`.
    pub fn new(zone: Tz) -> Self {
        Self { zone }
    }

    /// Returns the zone used for rendering and for parsing offset-less values.
    pub fn zone(&self) -> Tz {
        self.zone
    }

    /// Parses a CMS datetime string in this formatter's zone.
    pub fn parse(&self, raw: &str) -> Timestamp {
        Timestamp::parse(raw, self.zone)
    }

    fn local(&self, ts: &Timestamp) -> Option<DateTime<Tz>> {
        ts.in_zone(self.zone)
    }

    /// 12-hour clock time without a space before the suffix (`9:05AM`).
    pub fn clock_time(&self, ts: &Timestamp) -> String {
        self.local(ts).map(|dt| clock(&dt)).unwrap_or_default()
    }

    /// Start clock time, followed by ` - ` and the end clock time when the
    /// end parses and is strictly later than the start.
    pub fn time_range(&self, start: &Timestamp, end: Option<&Timestamp>) -> String {
        let Some(start_local) = self.local(start) else {
            return String::new();
        };
        let from = clock(&start_local);
        match end.filter(|e| e.is_after(start)).and_then(|e| self.local(e)) {
            Some(end_local) => format!("{} - {}", from, clock(&end_local)),
            None => from,
        }
    }

    /// Zero-padded day and full month name (`05 March`).
    pub fn day_month(&self, ts: &Timestamp) -> String {
        self.local(ts)
            .map(|dt| format!("{:02} {}", dt.day(), month_name(&dt)))
            .unwrap_or_default()
    }

    /// Full month name and year (`March 2025`).
    pub fn month_year(&self, ts: &Timestamp) -> String {
        self.local(ts)
            .map(|dt| format!("{} {}", month_name(&dt), dt.year()))
            .unwrap_or_default()
    }

    /// Unpadded day, full month name and year (`5 March 2025`).
    pub fn full_date(&self, ts: &Timestamp) -> String {
        self.local(ts)
            .map(|dt| format!("{} {} {}", dt.day(), month_name(&dt), dt.year()))
            .unwrap_or_default()
    }

    /// Dotted numeric date (`05.03.2025`).
    pub fn numeric_date(&self, ts: &Timestamp) -> String {
        self.local(ts)
            .map(|dt| format!("{:02}.{:02}.{}", dt.day(), dt.month(), dt.year()))
            .unwrap_or_default()
    }

    /// Carousel schedule line (`05.03.2025 at 9:05AM - 10:00AM`), or `TBA`.
    pub fn schedule_label(&self, start: &Timestamp, end: Option<&Timestamp>) -> String {
        if !start.is_valid() {
            return UNSCHEDULED_LABEL.to_string();
        }
        format!(
            "{} at {}",
            self.numeric_date(start),
            self.time_range(start, end)
        )
    }
}

fn clock(dt: &DateTime<Tz>) -> String {
    let (is_pm, hour) = dt.hour12();
    let suffix = if is_pm { "PM" } else { "AM" };
    format!("{}:{:02}{}", hour, dt.minute(), suffix)
}

fn month_name(dt: &DateTime<Tz>) -> &'static str {
    MONTH_NAMES[dt.month0() as usize]
}

/// Renders grouped events as plain text, one heading per group.
///
/// Each event line shows the day, the time range and the title; an event
/// without a usable start shows only its title.
pub fn format_groups_text(formatter: &EventTimeFormatter, groups: &[EventGroup]) -> String {
    let mut out = String::new();
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&group.label);
        out.push('\n');
        for event in &group.items {
            let day = formatter.day_month(&event.start);
            let time = formatter.time_range(&event.start, event.valid_end());
            let line = match (day.is_empty(), time.is_empty()) {
                (true, _) => format!("  {}", event.title),
                (false, true) => format!("  {}  {}", day, event.title),
                (false, false) => format!("  {}  {}  {}", day, time, event.title),
            };
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

/// Escapes text for HTML display.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> Timestamp {
        Timestamp::from_utc(Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap())
    }

    fn utc_formatter() -> EventTimeFormatter {
        EventTimeFormatter::new(Tz::UTC)
    }

    mod clock_time {
        use super::*;

        #[test]
        fn morning_with_padded_minutes() {
            assert_eq!(utc_formatter().clock_time(&at(2025, 3, 5, 9, 5)), "9:05AM");
        }

        #[test]
        fn noon_and_midnight() {
            let f = utc_formatter();
            assert_eq!(f.clock_time(&at(2025, 3, 5, 12, 0)), "12:00PM");
            assert_eq!(f.clock_time(&at(2025, 3, 5, 0, 30)), "12:30AM");
        }

        #[test]
        fn afternoon_subtracts_twelve() {
            assert_eq!(utc_formatter().clock_time(&at(2025, 3, 5, 18, 45)), "6:45PM");
            assert_eq!(utc_formatter().clock_time(&at(2025, 3, 5, 23, 59)), "11:59PM");
        }

        #[test]
        fn unusable_values_are_empty() {
            let f = utc_formatter();
            assert_eq!(f.clock_time(&Timestamp::Missing), "");
            assert_eq!(f.clock_time(&Timestamp::Invalid("nope".into())), "");
        }

        #[test]
        fn renders_in_site_zone() {
            let f = EventTimeFormatter::new(Tz::Australia__Sydney);
            // 23:00 UTC on 28 Feb is 10:00 AEDT on 1 March.
            assert_eq!(f.clock_time(&at(2025, 2, 28, 23, 0)), "10:00AM");
            assert_eq!(f.day_month(&at(2025, 2, 28, 23, 0)), "01 March");
        }
    }

    mod time_range {
        use super::*;

        #[test]
        fn with_later_end() {
            let f = utc_formatter();
            assert_eq!(
                f.time_range(&at(2025, 3, 5, 9, 0), Some(&at(2025, 3, 5, 10, 30))),
                "9:00AM - 10:30AM"
            );
        }

        #[test]
        fn end_not_after_start_is_omitted() {
            let f = utc_formatter();
            let start = at(2025, 3, 5, 9, 0);
            assert_eq!(f.time_range(&start, Some(&start)), "9:00AM");
            assert_eq!(f.time_range(&start, Some(&at(2025, 3, 5, 8, 0))), "9:00AM");
        }

        #[test]
        fn invalid_end_is_omitted() {
            let f = utc_formatter();
            let end = Timestamp::Invalid("later".into());
            assert_eq!(f.time_range(&at(2025, 3, 5, 9, 0), Some(&end)), "9:00AM");
            assert_eq!(f.time_range(&at(2025, 3, 5, 9, 0), None), "9:00AM");
        }

        #[test]
        fn invalid_start_is_empty() {
            let f = utc_formatter();
            assert_eq!(f.time_range(&Timestamp::Missing, Some(&at(2025, 3, 5, 9, 0))), "");
            assert_eq!(f.time_range(&Timestamp::Invalid("x".into()), None), "");
        }
    }

    mod dates {
        use super::*;

        #[test]
        fn day_month_pads_day() {
            assert_eq!(utc_formatter().day_month(&at(2025, 3, 5, 9, 0)), "05 March");
            assert_eq!(utc_formatter().day_month(&at(2025, 12, 25, 9, 0)), "25 December");
        }

        #[test]
        fn month_year() {
            assert_eq!(utc_formatter().month_year(&at(2025, 3, 5, 9, 0)), "March 2025");
            assert_eq!(utc_formatter().month_year(&at(2024, 1, 31, 9, 0)), "January 2024");
        }

        #[test]
        fn full_date_does_not_pad() {
            assert_eq!(utc_formatter().full_date(&at(2025, 10, 25, 9, 0)), "25 October 2025");
            assert_eq!(utc_formatter().full_date(&at(2025, 3, 5, 9, 0)), "5 March 2025");
        }

        #[test]
        fn numeric_date() {
            assert_eq!(utc_formatter().numeric_date(&at(2025, 3, 5, 9, 0)), "05.03.2025");
        }

        #[test]
        fn unusable_values_are_empty() {
            let f = utc_formatter();
            let bad = Timestamp::Invalid("soon".into());
            assert_eq!(f.day_month(&bad), "");
            assert_eq!(f.month_year(&Timestamp::Missing), "");
            assert_eq!(f.full_date(&bad), "");
            assert_eq!(f.numeric_date(&Timestamp::Missing), "");
        }
    }

    mod schedule_label {
        use super::*;

        #[test]
        fn start_only() {
            assert_eq!(
                utc_formatter().schedule_label(&at(2025, 3, 5, 9, 5), None),
                "05.03.2025 at 9:05AM"
            );
        }

        #[test]
        fn start_and_end() {
            assert_eq!(
                utc_formatter().schedule_label(&at(2025, 3, 5, 9, 5), Some(&at(2025, 3, 5, 10, 0))),
                "05.03.2025 at 9:05AM - 10:00AM"
            );
        }

        #[test]
        fn unscheduled_is_tba() {
            let f = utc_formatter();
            assert_eq!(f.schedule_label(&Timestamp::Missing, None), "TBA");
            assert_eq!(f.schedule_label(&Timestamp::Invalid("x".into()), None), "TBA");
        }
    }

    #[test]
    fn parse_uses_formatter_zone() {
        let f = EventTimeFormatter::new(Tz::Australia__Sydney);
        assert_eq!(f.parse("2025-03-01T10:00"), at(2025, 2, 28, 23, 0));
        assert_eq!(f.parse(""), Timestamp::Missing);
    }

    #[test]
    fn html_escape_escapes_special_chars() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(html_escape("it's"), "it&#x27;s");
    }
}
