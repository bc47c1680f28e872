//! RawEvent to Event conversion.
//!
//! Every missing field gets its display fallback here, so the rest of the
//! system works with complete [`Event`]s:
//! - text fields default to `""`
//! - `endDatetime` stays `None` when absent or blank
//! - `location` and `city` stay `None` when absent or blank
//! - the image is kept only if it is a JSON object

use chapel_core::{Event, ImagePayload, Timestamp};
use chrono_tz::Tz;

use crate::raw::RawEvent;

/// Converts a [`RawEvent`] to an [`Event`], reading offset-less datetimes
/// in `zone`.
pub fn normalize_event(raw: &RawEvent, zone: Tz) -> Event {
    let start = Timestamp::parse_opt(raw.start_datetime.as_deref(), zone);
    let end = match Timestamp::parse_opt(raw.end_datetime.as_deref(), zone) {
        Timestamp::Missing => None,
        parsed => Some(parsed),
    };

    Event {
        id: raw.id.unwrap_or_default(),
        document_id: raw.document_id.clone().unwrap_or_default(),
        slug: raw.slug.clone().unwrap_or_default(),
        title: raw.title.clone().unwrap_or_default(),
        start,
        end,
        tags: raw.tags.clone().unwrap_or_default(),
        description: raw.description.clone().unwrap_or_default(),
        location: non_blank(raw.location.as_deref()),
        city: non_blank(raw.city.as_deref()),
        image: raw.image.as_ref().and_then(ImagePayload::from_value),
    }
}

/// Normalizes a list of raw events, preserving order.
pub fn normalize_events(raws: &[RawEvent], zone: Tz) -> Vec<Event> {
    raws.iter().map(|raw| normalize_event(raw, zone)).collect()
}

fn non_blank(s: Option<&str>) -> Option<String> {
    s.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
