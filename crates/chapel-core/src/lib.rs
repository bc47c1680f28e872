//! Core types: events, timestamps, image URLs, search, grouping, formatting

pub mod event;
pub mod format;
pub mod image;
pub mod query;
pub mod search;
pub mod time;
pub mod tracing;
pub mod view;

pub use event::{Event, EventGroup};
pub use format::{EventTimeFormatter, MONTH_NAMES, format_groups_text, html_escape};
pub use image::{ImageData, ImageEntry, ImageFile, ImageFormat, ImageFormats, ImagePayload, ImageUrlResolver};
pub use query::{EventFilter, EventQueryEngine, OTHER_GROUP_LABEL};
pub use search::{fuzzy_match, normalize_for_search};
pub use time::Timestamp;
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
pub use view::{CarouselSlide, EventCard, EventDetail, EventGroupView};
