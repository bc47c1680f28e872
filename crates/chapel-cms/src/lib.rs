//! Headless CMS access for the chapel site.
//!
//! - [`ContentSource`] - the trait every content backend implements
//! - [`StrapiClient`] - the HTTP backend for a Strapi instance
//! - [`RawEvent`] and [`normalize_event`] - lenient record parsing into [`chapel_core::Event`]
//! - [`ContentRepository`] - typed page and event queries
//! - [`CmsError`] - error type for all of the above
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐
//! │  Strapi REST    │    │  StaticSource   │
//! └────────┬────────┘    └────────┬────────┘
//!          │    ContentSource     │
//!          └──────────┬───────────┘
//!                     ▼
//!           ┌───────────────────┐
//!           │ ContentRepository │
//!           └─────────┬─────────┘
//!                     ▼ events_from_envelope() + normalize_event()
//!              ┌─────────────┐
//!              │    Event    │
//!              └─────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use chapel_cms::{ContentRepository, StrapiClient, StrapiConfig};
//!
//! let client = StrapiClient::new(StrapiConfig::new("http://localhost:1337"))?;
//! let repo = ContentRepository::new(Arc::new(client), chrono_tz::Tz::UTC);
//! let events = repo.events().await?;
//! ```

pub mod client;
pub mod error;
pub mod normalize;
pub mod pages;
pub mod raw;
pub mod repository;
pub mod source;

pub use client::{DEFAULT_TIMEOUT, StrapiClient, StrapiConfig};
pub use error::{CmsError, CmsErrorCode, CmsResult};
pub use normalize::{normalize_event, normalize_events};
pub use pages::{AboutContent, EventsPageContent, HomeContent, MinistriesContent, Ministry, Section};
pub use raw::{RawEvent, events_from_envelope, single_from_envelope};
pub use repository::ContentRepository;
pub use source::{BoxFuture, ContentSource, StaticSource};
