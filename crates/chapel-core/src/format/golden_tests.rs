//! Golden tests for the plain-text event listing.
//!
//! These tests use insta inline snapshots to pin the output layout.
//! Run with `cargo insta review` to update them after intentional changes.

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::event::Event;
use crate::format::{EventTimeFormatter, format_groups_text};
use crate::query::EventQueryEngine;
use crate::time::Timestamp;

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn event(id: i64, title: &str, start: DateTime<Utc>, minutes: i64) -> Event {
    let mut event = Event::new(id, format!("event-{id}"), title, Timestamp::from_utc(start));
    if minutes > 0 {
        event = event.with_end(Timestamp::from_utc(start + chrono::Duration::minutes(minutes)));
    }
    event
}

/// A season of events spanning two months plus one broken record.
fn season() -> Vec<Event> {
    vec![
        event(1, "Prayer Breakfast", utc(2025, 3, 1, 8, 0), 90),
        event(2, "Youth Night", utc(2025, 3, 14, 18, 30), 120),
        event(3, "Palm Sunday Service", utc(2025, 4, 13, 10, 0), 0),
        event(4, "Choir Rehearsal", utc(2025, 1, 9, 19, 0), 60).with_tags("Music"),
        Event::new(5, "event-5", "Mystery Picnic", Timestamp::Invalid("TBD".into())),
        Event::new(6, "event-6", "Unscheduled Retreat", Timestamp::Missing),
    ]
}

fn render(zone: Tz, events: &[Event], search: &str, ministry: &str) -> String {
    let formatter = EventTimeFormatter::new(zone);
    let groups = EventQueryEngine::new(formatter).query(events, search, ministry);
    format_groups_text(&formatter, &groups).trim_end().to_string()
}

#[test]
fn golden_empty() {
    assert_eq!(render(Tz::UTC, &[], "", ""), "");
}

#[test]
fn golden_full_season() {
    insta::assert_snapshot!(render(Tz::UTC, &season(), "", ""), @r"
    April 2025
      13 April  10:00AM  Palm Sunday Service

    March 2025
      14 March  6:30PM - 8:30PM  Youth Night
      01 March  8:00AM - 9:30AM  Prayer Breakfast

    January 2025
      09 January  7:00PM - 8:00PM  Choir Rehearsal

    Other
      Mystery Picnic
    ");
}

#[test]
fn golden_title_search() {
    insta::assert_snapshot!(render(Tz::UTC, &season(), "night", ""), @r"
    March 2025
      14 March  6:30PM - 8:30PM  Youth Night
    ");
}

#[test]
fn golden_ministry_filter() {
    insta::assert_snapshot!(render(Tz::UTC, &season(), "", "music"), @r"
    January 2025
      09 January  7:00PM - 8:00PM  Choir Rehearsal
    ");
}

#[test]
fn golden_sydney_zone() {
    let events = vec![event(1, "Dawn Service", utc(2025, 3, 31, 19, 30), 60)];
    insta::assert_snapshot!(render(Tz::Australia__Sydney, &events, "", ""), @r"
    April 2025
      01 April  6:30AM - 7:30AM  Dawn Service
    ");
}
