//! CMS image payloads and URL resolution.
//!
//! Depending on the CMS version and the `populate` parameters of a request, an
//! image field arrives in one of several shapes:
//!
//! ```text
//! { "url": "/uploads/a.png" }
//! { "formats": { "large": { "url": "/uploads/large_a.png" } } }
//! { "data": { "attributes": { "url": "/uploads/a.png" } } }
//! { "data": { "url": "/uploads/a.png" } }
//! { "data": [ { "attributes": { "url": "/uploads/a.png" } }, ... ] }
//! ```
//!
//! [`ImagePayload`] captures all of them and [`ImageUrlResolver`] reduces one
//! to a single absolute URL.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The `formats.large` rendition of an uploaded file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFormat {
    pub url: Option<String>,
}

/// Resized renditions of an uploaded file. Only `large` is used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFormats {
    pub large: Option<ImageFormat>,
}

/// The file record itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFile {
    pub url: Option<String>,
    pub formats: Option<ImageFormats>,
    pub alternative_text: Option<String>,
}

/// One element of a `data` wrapper: either `{ attributes: {...} }` or a flat
/// `{ url }` record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageEntry {
    pub attributes: Option<ImageFile>,
    pub url: Option<String>,
    pub alternative_text: Option<String>,
}

impl ImageFormats {
    fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let large = obj
            .get("large")
            .and_then(Value::as_object)
            .map(|large| ImageFormat {
                url: string_field(large, "url"),
            });
        Some(Self { large })
    }
}

impl ImageFile {
    fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            url: string_field(obj, "url"),
            formats: obj.get("formats").and_then(ImageFormats::from_value),
            alternative_text: string_field(obj, "alternativeText"),
        })
    }
}

impl ImageEntry {
    fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };
        Self {
            attributes: obj.get("attributes").and_then(ImageFile::from_value),
            url: string_field(obj, "url"),
            alternative_text: string_field(obj, "alternativeText"),
        }
    }

    /// `attributes.url`, falling back to the flat `url`.
    fn url(&self) -> Option<&str> {
        self.attributes
            .as_ref()
            .and_then(|a| non_empty(a.url.as_deref()))
            .or_else(|| non_empty(self.url.as_deref()))
    }

    fn alternative_text(&self) -> Option<&str> {
        self.attributes
            .as_ref()
            .and_then(|a| non_empty(a.alternative_text.as_deref()))
            .or_else(|| non_empty(self.alternative_text.as_deref()))
    }
}

/// The content of a `data` wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageData {
    /// `data: [ ... ]` (multiple media field).
    Many(Vec<ImageEntry>),
    /// `data: { ... }` (single media field).
    Single(ImageEntry),
}

impl ImageData {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => {
                Some(Self::Many(items.iter().map(ImageEntry::from_value).collect()))
            }
            Value::Object(_) => Some(Self::Single(ImageEntry::from_value(value))),
            _ => None,
        }
    }

    fn first(&self) -> Option<&ImageEntry> {
        match self {
            Self::Single(entry) => Some(entry),
            Self::Many(entries) => entries.first(),
        }
    }
}

/// A CMS image reference in any of its known shapes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    pub data: Option<ImageData>,
    pub url: Option<String>,
    pub formats: Option<ImageFormats>,
    pub alternative_text: Option<String>,
}

impl ImagePayload {
    /// Creates a payload holding a direct URL.
    pub fn direct(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Reads a payload from loosely typed JSON.
    ///
    /// Returns `None` for `null` and non-objects. Each known field is read on
    /// its own: a field of the wrong type is treated as absent and never hides
    /// its siblings. Non-object `data` list elements become empty entries so
    /// the first element keeps its position.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            data: obj.get("data").and_then(ImageData::from_value),
            url: string_field(obj, "url"),
            formats: obj.get("formats").and_then(ImageFormats::from_value),
            alternative_text: string_field(obj, "alternativeText"),
        })
    }

    /// Returns the alternative text of the image, or `fallback`.
    pub fn alt_text<'a>(&'a self, fallback: &'a str) -> &'a str {
        non_empty(self.alternative_text.as_deref())
            .or_else(|| self.data.as_ref().and_then(|d| d.first()?.alternative_text()))
            .unwrap_or(fallback)
    }
}

/// Turns [`ImagePayload`]s into absolute URLs.
///
/// Relative upload paths are joined onto the CMS base URL the resolver was
/// created with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrlResolver {
    base_url: String,
}

impl ImageUrlResolver {
    /// Creates a resolver for the CMS at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Returns the base URL relative paths are joined to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Extracts the URL of an image.
    ///
    /// Lookups, first usable one wins:
    /// 1. single `data` entry: `data.attributes.url`, then `data.url`
    /// 2. non-empty `data` list: the same on its first element
    /// 3. `url`
    /// 4. `formats.large.url`
    pub fn resolve(&self, payload: Option<&ImagePayload>) -> Option<String> {
        let payload = payload?;

        let from_data = match &payload.data {
            Some(ImageData::Single(entry)) => entry.url(),
            Some(ImageData::Many(entries)) => entries.first().and_then(ImageEntry::url),
            None => None,
        };

        from_data
            .or_else(|| non_empty(payload.url.as_deref()))
            .or_else(|| {
                payload
                    .formats
                    .as_ref()
                    .and_then(|f| f.large.as_ref())
                    .and_then(|l| non_empty(l.url.as_deref()))
            })
            .map(|url| self.absolutize(url))
    }

    /// Resolves straight from loosely typed JSON.
    pub fn resolve_value(&self, value: &Value) -> Option<String> {
        self.resolve(ImagePayload::from_value(value).as_ref())
    }

    /// Joins a relative path onto the base URL; absolute URLs pass through.
    ///
    /// A path without a leading `/` gets one, so `uploads/a.png` and
    /// `/uploads/a.png` resolve to the same URL.
    pub fn absolutize(&self, url: &str) -> String {
        if url.starts_with("http") {
            url.to_string()
        } else if url.starts_with('/') {
            format!("{}{}", self.base_url, url)
        } else {
            format!("{}/{}", self.base_url, url)
        }
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}
