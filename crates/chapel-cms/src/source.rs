//! ContentSource trait definition.
//!
//! A [`ContentSource`] answers a CMS API path (including its query string)
//! with the decoded JSON body. [`StrapiClient`](crate::client::StrapiClient)
//! does this over HTTP; [`StaticSource`] serves canned documents.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use crate::error::{CmsError, CmsResult};

/// A boxed future for async trait methods.
///
/// Boxed futures keep [`ContentSource`] usable as `Arc<dyn ContentSource>`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Read access to the headless CMS.
pub trait ContentSource: Send + Sync {
    /// Returns a short name for logs (e.g., "strapi").
    fn name(&self) -> &str;

    /// Fetches `path` (e.g. `/api/events?populate=image`) and decodes the
    /// body as JSON.
    fn fetch_json(&self, path: &str) -> BoxFuture<'_, CmsResult<Value>>;
}

/// A content source backed by an in-memory map of path to document.
///
/// Paths without a document answer with a not-found error.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    documents: HashMap<String, Value>,
}

impl StaticSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to register the document served for `path`.
    pub fn with_document(mut self, path: impl Into<String>, document: Value) -> Self {
        self.documents.insert(path.into(), document);
        self
    }

    /// Returns the number of registered documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns `true` if no documents are registered.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl ContentSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch_json(&self, path: &str) -> BoxFuture<'_, CmsResult<Value>> {
        let result = self
            .documents
            .get(path)
            .cloned()
            .ok_or_else(|| CmsError::not_found("no document registered").with_path(path));
        Box::pin(async move { result })
    }
}
