//! Event types for the church calendar.
//!
//! This module provides:
//! - [`Event`]: one calendar entry as published by the CMS
//! - [`EventGroup`]: a run of consecutive events sharing a month label

use serde::{Deserialize, Serialize};

use crate::image::ImagePayload;
use crate::time::Timestamp;

/// A calendar entry.
///
/// Events are built once per request from CMS data and never modified
/// afterwards; every optional CMS field already has its fallback applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Numeric identifier assigned by the CMS.
    pub id: i64,
    /// Version-independent document identifier (may be empty).
    pub document_id: String,
    /// URL-safe unique identifier.
    pub slug: String,
    /// Human label.
    pub title: String,
    /// When the event starts.
    pub start: Timestamp,
    /// When the event ends, if the CMS supplied a value.
    pub end: Option<Timestamp>,
    /// Free-text labels separated by `,`, `/` or `|`.
    pub tags: String,
    /// Free-text description.
    pub description: String,
    /// Venue, if any.
    pub location: Option<String>,
    /// City the event takes place in, if any.
    pub city: Option<String>,
    /// Cover image reference.
    pub image: Option<ImagePayload>,
}

impl Event {
    /// Creates an event with the required fields.
    pub fn new(
        id: i64,
        slug: impl Into<String>,
        title: impl Into<String>,
        start: Timestamp,
    ) -> Self {
        Self {
            id,
            document_id: String::new(),
            slug: slug.into(),
            title: title.into(),
            start,
            end: None,
            tags: String::new(),
            description: String::new(),
            location: None,
            city: None,
            image: None,
        }
    }

    /// Builder method to set the document identifier.
    pub fn with_document_id(mut self, document_id: impl Into<String>) -> Self {
        self.document_id = document_id.into();
        self
    }

    /// Builder method to set the end time.
    pub fn with_end(mut self, end: Timestamp) -> Self {
        self.end = Some(end);
        self
    }

    /// Builder method to set the tags string.
    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder method to set the city.
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Builder method to set the image.
    pub fn with_image(mut self, image: ImagePayload) -> Self {
        self.image = Some(image);
        self
    }

    /// Returns the end time only if it is strictly after a valid start.
    pub fn valid_end(&self) -> Option<&Timestamp> {
        self.end.as_ref().filter(|end| end.is_after(&self.start))
    }

    /// Returns the display tags: `tags` split on commas, trimmed, empties dropped.
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Returns `tags` with every run of `,`, `/` and `|` replaced by a space.
    pub fn searchable_tags(&self) -> String {
        let mut out = String::with_capacity(self.tags.len());
        let mut in_delimiter = false;
        for ch in self.tags.chars() {
            if matches!(ch, ',' | '/' | '|') {
                if !in_delimiter {
                    out.push(' ');
                }
                in_delimiter = true;
            } else {
                out.push(ch);
                in_delimiter = false;
            }
        }
        out
    }

    /// Returns the path of the event's detail page.
    pub fn href(&self) -> String {
        format!("/events/{}", urlencoding::encode(&self.slug))
    }
}

/// Consecutive events that share a month label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventGroup {
    /// Group heading, e.g. `"March 2025"`.
    pub label: String,
    /// Events in display order.
    pub items: Vec<Event>,
}

impl EventGroup {
    /// Creates a group with a single event.
    pub fn new(label: impl Into<String>, first: Event) -> Self {
        Self {
            label: label.into(),
            items: vec![first],
        }
    }

    /// Returns the number of events in the group.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the group holds no events.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
