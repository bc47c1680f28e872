//! Typed access to the site's CMS content.
//!
//! [`ContentRepository`] knows which API path serves each piece of content
//! and turns the JSON into page and event types. It does not cache or retry;
//! a failed fetch is returned to the caller as is.

use std::sync::Arc;

use chapel_core::Event;
use chrono_tz::Tz;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::CmsResult;
use crate::normalize::normalize_events;
use crate::pages::{AboutContent, EventsPageContent, HomeContent, MinistriesContent};
use crate::raw::events_from_envelope;
use crate::source::ContentSource;

pub const HOME_PATH: &str = "/api/home-page?populate=*";
pub const ABOUT_PATH: &str = "/api/about-page?populate=*";
pub const MINISTRIES_PATH: &str = "/api/ministries-page?populate=*";
pub const EVENTS_PAGE_PATH: &str = "/api/events-page?populate=heroImage";
pub const EVENTS_PATH: &str = "/api/events?sort=startDatetime:asc&populate=image";
pub const FEATURED_EVENTS_PATH: &str =
    "/api/events?populate=*&pagination[pageSize]=100&sort=startDatetime:desc";

/// Returns the path that looks up one event by slug.
pub fn event_by_slug_path(slug: &str) -> String {
    format!(
        "/api/events?filters[slug][$eq]={}&populate=image",
        urlencoding::encode(slug)
    )
}

/// Reads site content from a [`ContentSource`].
#[derive(Clone)]
pub struct ContentRepository {
    source: Arc<dyn ContentSource>,
    zone: Tz,
}

impl std::fmt::Debug for ContentRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentRepository")
            .field("source", &self.source.name())
            .field("zone", &self.zone)
            .finish()
    }
}

impl ContentRepository {
    /// Creates a repository; offset-less event times are read in `zone`.
    pub fn new(source: Arc<dyn ContentSource>, zone: Tz) -> Self {
        Self { source, zone }
    }

    /// Returns the zone event times are read in.
    pub fn zone(&self) -> Tz {
        self.zone
    }

    async fn fetch(&self, path: &str) -> CmsResult<Value> {
        debug!(source = self.source.name(), path, "fetching content");
        self.source.fetch_json(path).await
    }

    async fn fetch_events(&self, path: &str) -> CmsResult<Vec<Event>> {
        let envelope = self.fetch(path).await?;
        let raws = events_from_envelope(&envelope);
        debug!(count = raws.len(), path, "fetched events");
        Ok(normalize_events(&raws, self.zone))
    }

    /// Home page content; `None` if the CMS has no home page document.
    #[instrument(skip(self))]
    pub async fn home(&self) -> CmsResult<Option<HomeContent>> {
        Ok(HomeContent::from_envelope(&self.fetch(HOME_PATH).await?))
    }

    #[instrument(skip(self))]
    pub async fn about(&self) -> CmsResult<Option<AboutContent>> {
        Ok(AboutContent::from_envelope(&self.fetch(ABOUT_PATH).await?))
    }

    #[instrument(skip(self))]
    pub async fn ministries(&self) -> CmsResult<Option<MinistriesContent>> {
        Ok(MinistriesContent::from_envelope(
            &self.fetch(MINISTRIES_PATH).await?,
        ))
    }

    #[instrument(skip(self))]
    pub async fn events_page(&self) -> CmsResult<Option<EventsPageContent>> {
        Ok(EventsPageContent::from_envelope(
            &self.fetch(EVENTS_PAGE_PATH).await?,
        ))
    }

    /// All events, oldest first as the CMS sorts them.
    #[instrument(skip(self))]
    pub async fn events(&self) -> CmsResult<Vec<Event>> {
        self.fetch_events(EVENTS_PATH).await
    }

    /// Up to 100 events, newest first, for the home page carousel.
    #[instrument(skip(self))]
    pub async fn featured_events(&self) -> CmsResult<Vec<Event>> {
        self.fetch_events(FEATURED_EVENTS_PATH).await
    }

    /// The first event whose slug equals `slug`.
    #[instrument(skip(self))]
    pub async fn event_by_slug(&self, slug: &str) -> CmsResult<Option<Event>> {
        let events = self.fetch_events(&event_by_slug_path(slug)).await?;
        Ok(events.into_iter().next())
    }
}
