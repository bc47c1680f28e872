//! Display-ready projections of events.
//!
//! The web layer never formats timestamps or resolves images itself; it
//! renders these structs, which carry every string already computed.

use serde::Serialize;

use crate::event::{Event, EventGroup};
use crate::format::EventTimeFormatter;
use crate::image::ImageUrlResolver;

/// Title shown on the detail page when the CMS record has none.
pub const FALLBACK_EVENT_TITLE: &str = "Event";

/// One entry of the events list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventCard {
    pub id: i64,
    pub title: String,
    pub href: String,
    /// Zero-padded day of month, empty if the start is unusable.
    pub day: String,
    /// Full month name, empty if the start is unusable.
    pub month: String,
    pub time_text: String,
    pub tags: Vec<String>,
    pub description: String,
    pub image_url: Option<String>,
}

impl EventCard {
    pub fn build(event: &Event, formatter: &EventTimeFormatter, images: &ImageUrlResolver) -> Self {
        let day_month = formatter.day_month(&event.start);
        let (day, month) = day_month
            .split_once(' ')
            .map(|(d, m)| (d.to_string(), m.to_string()))
            .unwrap_or_default();

        Self {
            id: event.id,
            title: event.title.clone(),
            href: event.href(),
            day,
            month,
            time_text: formatter.time_range(&event.start, event.valid_end()),
            tags: event.tag_list(),
            description: event.description.clone(),
            image_url: images.resolve(event.image.as_ref()),
        }
    }
}

/// A month heading with its cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventGroupView {
    pub label: String,
    pub cards: Vec<EventCard>,
}

impl EventGroupView {
    pub fn build(
        group: &EventGroup,
        formatter: &EventTimeFormatter,
        images: &ImageUrlResolver,
    ) -> Self {
        Self {
            label: group.label.clone(),
            cards: group
                .items
                .iter()
                .map(|e| EventCard::build(e, formatter, images))
                .collect(),
        }
    }

    /// Builds views for a whole query result.
    pub fn build_all(
        groups: &[EventGroup],
        formatter: &EventTimeFormatter,
        images: &ImageUrlResolver,
    ) -> Vec<Self> {
        groups
            .iter()
            .map(|g| Self::build(g, formatter, images))
            .collect()
    }
}

/// Everything the event detail page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDetail {
    pub title: String,
    /// `5 March 2025`, empty if the start is unusable.
    pub full_date: String,
    pub time_text: String,
    pub tags: Vec<String>,
    pub city: Option<String>,
    pub location: Option<String>,
    pub description: String,
    pub image_url: Option<String>,
    /// The record has an image payload but no URL could be resolved from it.
    pub has_unresolved_image: bool,
}

impl EventDetail {
    pub fn build(event: &Event, formatter: &EventTimeFormatter, images: &ImageUrlResolver) -> Self {
        let image_url = images.resolve(event.image.as_ref());
        let title = if event.title.trim().is_empty() {
            FALLBACK_EVENT_TITLE.to_string()
        } else {
            event.title.clone()
        };

        Self {
            title,
            full_date: formatter.full_date(&event.start),
            time_text: formatter.time_range(&event.start, event.valid_end()),
            tags: event.tag_list(),
            city: event.city.clone().filter(|c| !c.trim().is_empty()),
            location: event.location.clone().filter(|l| !l.trim().is_empty()),
            description: event.description.clone(),
            has_unresolved_image: event.image.is_some() && image_url.is_none(),
            image_url,
        }
    }
}

/// A featured event on the home page carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarouselSlide {
    pub title: String,
    pub href: String,
    /// `05.03.2025 at 9:05AM - 10:00AM`, or `TBA`.
    pub schedule: String,
    pub image_url: Option<String>,
}

impl CarouselSlide {
    pub fn build(event: &Event, formatter: &EventTimeFormatter, images: &ImageUrlResolver) -> Self {
        Self {
            title: event.title.clone(),
            href: event.href(),
            schedule: formatter.schedule_label(&event.start, event.valid_end()),
            image_url: images.resolve(event.image.as_ref()),
        }
    }
}
