//! Search, filter and month grouping of events.
//!
//! [`EventQueryEngine::query`] is the whole pipeline behind the events page:
//! newest first, fuzzy title search, fuzzy ministry filter on tags, then
//! adjacent events with the same month label are folded into one group.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::event::{Event, EventGroup};
use crate::format::EventTimeFormatter;
use crate::search::fuzzy_match;
use crate::time::Timestamp;

/// Heading for events whose start could not be parsed.
pub const OTHER_GROUP_LABEL: &str = "Other";

/// Search box values, as sent in `?q=…&ministry=…`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventFilter {
    /// Matched against event titles.
    #[serde(rename = "q", alias = "search")]
    pub search: String,
    /// Matched against event tags.
    pub ministry: String,
}

impl EventFilter {
    /// Creates a filter from both search strings.
    pub fn new(search: impl Into<String>, ministry: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ministry: ministry.into(),
        }
    }

    /// Returns `true` if neither box has any text.
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty() && self.ministry.trim().is_empty()
    }
}

/// Stateless query pipeline over a list of events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventQueryEngine {
    formatter: EventTimeFormatter,
}

impl EventQueryEngine {
    /// Creates an engine that labels groups with `formatter`.
    pub fn new(formatter: EventTimeFormatter) -> Self {
        Self { formatter }
    }

    /// Returns the formatter used for group labels.
    pub fn formatter(&self) -> &EventTimeFormatter {
        &self.formatter
    }

    /// Sorts, filters and groups `events`.
    ///
    /// Events without a start value are dropped at the grouping step; events
    /// with an unparsable start sort last and are grouped under `"Other"`.
    pub fn query(&self, events: &[Event], search: &str, ministry: &str) -> Vec<EventGroup> {
        let mut sorted: Vec<&Event> = events.iter().collect();
        // Stable: equal instants keep their input order, None sorts last.
        sorted.sort_by(|a, b| b.start.instant().cmp(&a.start.instant()));

        let filter_ministry = !ministry.trim().is_empty();
        let mut groups: Vec<EventGroup> = Vec::new();

        for event in sorted {
            if !fuzzy_match(search, &event.title) {
                continue;
            }
            if filter_ministry && !fuzzy_match(ministry, &event.searchable_tags()) {
                continue;
            }
            let label = match &event.start {
                Timestamp::Missing => continue,
                Timestamp::Invalid(_) => OTHER_GROUP_LABEL.to_string(),
                start @ Timestamp::At(_) => self.formatter.month_year(start),
            };
            match groups.last_mut() {
                Some(group) if group.label == label => group.items.push(event.clone()),
                _ => groups.push(EventGroup::new(label, event.clone())),
            }
        }

        trace!(
            input = events.len(),
            groups = groups.len(),
            "grouped events"
        );
        groups
    }

    /// Runs [`query`](Self::query) with the values of `filter`.
    pub fn query_with(&self, events: &[Event], filter: &EventFilter) -> Vec<EventGroup> {
        self.query(events, &filter.search, &filter.ministry)
    }
}
