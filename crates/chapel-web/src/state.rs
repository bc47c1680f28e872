//! Shared, immutable request state.

use std::sync::Arc;

use chapel_cms::{ContentRepository, StrapiClient, StrapiConfig};
use chapel_core::{EventQueryEngine, EventTimeFormatter, ImageUrlResolver};
use tracing::{info, warn};

use crate::config::{DEFAULT_FROM_EMAIL, DEFAULT_REVALIDATE_SECS, SiteConfig};
use crate::contact::ContactRelay;
use crate::error::WebResult;
use crate::mail::ResendMailer;
use crate::render;

/// Everything a request handler needs.
#[derive(Debug, Clone)]
pub struct AppState {
    pub site_name: String,
    pub repository: ContentRepository,
    pub engine: EventQueryEngine,
    pub images: ImageUrlResolver,
    pub revalidate_secs: u64,
    pub contact: ContactRelay,
}

impl AppState {
    /// Creates state around `repository`; images resolve against `cms_base`.
    pub fn new(repository: ContentRepository, cms_base: impl Into<String>) -> Self {
        let engine = EventQueryEngine::new(EventTimeFormatter::new(repository.zone()));
        Self {
            site_name: render::DEFAULT_SITE_NAME.to_string(),
            repository,
            engine,
            images: ImageUrlResolver::new(cms_base),
            revalidate_secs: DEFAULT_REVALIDATE_SECS,
            contact: ContactRelay::new(DEFAULT_FROM_EMAIL),
        }
    }

    /// Builds the production state: Strapi client, Resend mailer.
    pub fn from_config(config: &SiteConfig) -> WebResult<Self> {
        let zone = config.zone()?;

        let mut cms = StrapiConfig::new(config.cms.base_url.trim()).with_timeout(config.cms_timeout());
        if let Some(token) = config.cms_token()? {
            cms = cms.with_api_token(token);
        }
        let client = StrapiClient::new(cms)?;
        let cms_base = client.base_url().to_string();
        let repository = ContentRepository::new(Arc::new(client), zone);

        let mut contact = ContactRelay::new(config.contact.from_email.trim());
        match config.resend_api_key()? {
            Some(key) => contact = contact.with_mailer(Arc::new(ResendMailer::new(key)?)),
            None => warn!("RESEND_API_KEY is not set; the contact form will not send mail"),
        }
        if let Some(to) = config.contact_recipient() {
            contact = contact.with_recipient(to);
        }

        info!(cms = %cms_base, zone = %zone, "site state ready");

        Ok(Self::new(repository, cms_base)
            .with_site_name(config.site.name.clone())
            .with_revalidate_secs(config.server.revalidate_secs)
            .with_contact(contact))
    }

    pub fn with_site_name(mut self, name: impl Into<String>) -> Self {
        self.site_name = name.into();
        self
    }

    pub fn with_revalidate_secs(mut self, secs: u64) -> Self {
        self.revalidate_secs = secs;
        self
    }

    pub fn with_contact(mut self, contact: ContactRelay) -> Self {
        self.contact = contact;
        self
    }

    /// The formatter shared by the query engine and the views.
    pub fn formatter(&self) -> &EventTimeFormatter {
        self.engine.formatter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;

    #[test]
    fn from_default_config() {
        let state = AppState::from_config(&SiteConfig::default()).unwrap();
        assert_eq!(state.images.base_url(), "http://localhost:1337");
        assert_eq!(state.revalidate_secs, 300);
        assert_eq!(state.formatter().zone(), Tz::UTC);
    }

    #[test]
    fn zone_comes_from_site_settings() {
        let mut config = SiteConfig::default();
        config.site.timezone = "Australia/Sydney".into();
        config.site.name = "St Mark's".into();
        let state = AppState::from_config(&config).unwrap();
        assert_eq!(state.formatter().zone(), Tz::Australia__Sydney);
        assert_eq!(state.site_name, "St Mark's");
    }

    #[test]
    fn bad_zone_fails() {
        let mut config = SiteConfig::default();
        config.site.timezone = "Nowhere/Else".into();
        assert!(AppState::from_config(&config).is_err());
    }
}
