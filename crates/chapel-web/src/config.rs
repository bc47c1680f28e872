//! Site configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/chapel/config.toml` by default. Every field has a default, so
//! an absent file is a valid (local development) configuration.
//!
//! After the file is read, environment variables override it:
//!
//! | Variable                          | Field                     |
//! |-----------------------------------|---------------------------|
//! | `CHAPEL_CMS_URL`, `STRAPI_URL`    | `cms.base_url`            |
//! | `CHAPEL_CMS_TOKEN`                | `cms.api_token`           |
//! | `CHAPEL_BIND`                     | `server.bind`             |
//! | `CHAPEL_TIMEZONE`                 | `site.timezone`           |
//! | `RESEND_API_KEY`                  | `contact.resend_api_key`  |
//! | `CONTACT_TO_EMAIL`                | `contact.to_email`        |
//! | `CONTACT_FROM_EMAIL`              | `contact.from_email`      |
//!
//! `cms.api_token` and `contact.resend_api_key` accept secret references
//! (`env::VAR`, `file::path`), see [`crate::secret`].

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{WebError, WebResult};
use crate::render;
use crate::secret;

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_CMS_URL: &str = "http://localhost:1337";
pub const DEFAULT_REVALIDATE_SECS: u64 = 300;
pub const DEFAULT_FROM_EMAIL: &str = "no-reply@example.com";

/// Configuration for the chapel site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub server: ServerSettings,
    pub cms: CmsSettings,
    pub site: SiteSettings,
    pub contact: ContactSettings,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Address to listen on.
    pub bind: String,
    /// Seconds shared caches may serve a page before re-fetching it.
    pub revalidate_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            revalidate_secs: DEFAULT_REVALIDATE_SECS,
        }
    }
}

/// Headless CMS connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsSettings {
    /// Base URL of the CMS; also the base for relative image paths.
    pub base_url: String,
    /// API token (plain text or secret reference).
    pub api_token: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for CmsSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CMS_URL.to_string(),
            api_token: None,
            timeout_secs: 10,
        }
    }
}

/// Presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Name shown in the page header and titles.
    pub name: String,
    /// IANA zone used to read and display event times.
    pub timezone: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            name: render::DEFAULT_SITE_NAME.to_string(),
            timezone: "UTC".to_string(),
        }
    }
}

/// Contact form relay settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSettings {
    /// Resend API key (plain text or secret reference).
    pub resend_api_key: Option<String>,
    /// Recipient of contact form messages.
    pub to_email: Option<String>,
    /// Sender address of contact form messages.
    pub from_email: String,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            resend_api_key: None,
            to_email: None,
            from_email: DEFAULT_FROM_EMAIL.to_string(),
        }
    }
}

impl SiteConfig {
    /// Loads configuration from the default path, falling back to defaults
    /// if the file does not exist.
    pub fn load() -> WebResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> WebResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            WebError::config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> WebResult<Self> {
        toml::from_str(content).map_err(|e| WebError::config(format!("failed to parse config: {}", e)))
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> WebResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| WebError::config(format!("failed to serialize config: {}", e)))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("chapel")
    }

    /// Applies overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides using `lookup` to read variables; blank values are
    /// ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get("CHAPEL_CMS_URL").or_else(|| get("STRAPI_URL")) {
            self.cms.base_url = url;
        }
        if let Some(token) = get("CHAPEL_CMS_TOKEN") {
            self.cms.api_token = Some(token);
        }
        if let Some(bind) = get("CHAPEL_BIND") {
            self.server.bind = bind;
        }
        if let Some(tz) = get("CHAPEL_TIMEZONE") {
            self.site.timezone = tz;
        }
        if let Some(key) = get("RESEND_API_KEY") {
            self.contact.resend_api_key = Some(key);
        }
        if let Some(to) = get("CONTACT_TO_EMAIL") {
            self.contact.to_email = Some(to);
        }
        if let Some(from) = get("CONTACT_FROM_EMAIL") {
            self.contact.from_email = from;
        }
    }

    /// Parses the site time zone.
    pub fn zone(&self) -> WebResult<Tz> {
        self.site.timezone.trim().parse::<Tz>().map_err(|_| {
            WebError::config(format!("unknown time zone '{}'", self.site.timezone))
        })
    }

    /// Parses the listen address.
    pub fn bind_addr(&self) -> WebResult<SocketAddr> {
        self.server.bind.trim().parse().map_err(|e| {
            WebError::config(format!("invalid bind address '{}': {}", self.server.bind, e))
        })
    }

    /// Returns the CMS request timeout.
    pub fn cms_timeout(&self) -> Duration {
        Duration::from_secs(self.cms.timeout_secs)
    }

    /// Resolves the CMS API token, if one is configured.
    pub fn cms_token(&self) -> WebResult<Option<String>> {
        secret::resolve_opt(self.cms.api_token.as_deref())
            .map_err(|e| WebError::config(format!("cms.api_token: {}", e)))
    }

    /// Resolves the Resend API key, if one is configured.
    pub fn resend_api_key(&self) -> WebResult<Option<String>> {
        secret::resolve_opt(self.contact.resend_api_key.as_deref())
            .map_err(|e| WebError::config(format!("contact.resend_api_key: {}", e)))
    }

    /// Returns the recipient address, if one is configured.
    pub fn contact_recipient(&self) -> Option<String> {
        self.contact
            .to_email
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    /// Lists every problem with the configuration.
    ///
    /// Missing contact settings are not problems: the contact relay answers
    /// with an explanatory error instead.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        match Url::parse(self.cms.base_url.trim()) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => problems.push(format!(
                "cms.base_url must use http or https, got '{}'",
                url.scheme()
            )),
            Err(e) => problems.push(format!("cms.base_url '{}' is invalid: {}", self.cms.base_url, e)),
        }
        if self.cms.timeout_secs == 0 {
            problems.push("cms.timeout_secs must be greater than zero".to_string());
        }
        for result in [self.zone().map(drop), self.bind_addr().map(drop)] {
            if let Err(e) = result {
                problems.push(config_message(e));
            }
        }
        for result in [self.cms_token().map(drop), self.resend_api_key().map(drop)] {
            if let Err(e) = result {
                problems.push(config_message(e));
            }
        }
        problems
    }

    /// Fails with all problems joined if the configuration is unusable.
    pub fn validate(&self) -> WebResult<()> {
        let problems = self.problems();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(WebError::config(problems.join("; ")))
        }
    }
}

fn config_message(err: WebError) -> String {
    match err {
        WebError::Config { message } => message,
        other => other.to_string(),
    }
}
