//! Single-type page documents: home, about, ministries and the events hero.
//!
//! Each type is read from the `data` object of its response with the same
//! fallbacks the pages display when an editor leaves a field empty. A
//! response without a `data` object yields `None`, which the web layer
//! shows as a load error.

use chapel_core::ImagePayload;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::raw::{single_from_envelope, text};

/// Alt text fallbacks for the three home page images.
pub const HOME_HERO_ALT: &str = "Church";
pub const HOME_MINISTRIES_ALT: &str = "Ministries";
pub const HOME_GIVING_ALT: &str = "Giving";

/// Default headings of the about page sections.
pub const ABOUT_DEFAULT_TITLES: [&str; 3] = ["About Us", "Our Mission", "Our Vision"];

/// Default heading of the events page hero.
pub const EVENTS_DEFAULT_HERO_TITLE: &str = "Upcoming Events";

/// A text block with an optional picture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: String,
    pub description: String,
    pub image: Option<ImagePayload>,
}

/// Home page: hero, ministries teaser and giving call-out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HomeContent {
    pub hero_description: String,
    pub hero_image: Option<ImagePayload>,
    pub ministries_description: String,
    pub ministries_image: Option<ImagePayload>,
    pub giving_description: String,
    pub giving_image: Option<ImagePayload>,
}

impl HomeContent {
    pub fn from_envelope(envelope: &Value) -> Option<Self> {
        let data = single_from_envelope(envelope)?;
        Some(Self {
            hero_description: text_or_default(data, "heroDescription"),
            hero_image: image(data, "heroImg"),
            ministries_description: text_or_default(data, "ministriesDescription"),
            ministries_image: image(data, "ministriesImg"),
            giving_description: text_or_default(data, "givingDescription"),
            giving_image: image(data, "givingImg"),
        })
    }

    pub fn hero_alt(&self) -> &str {
        alt(&self.hero_image, HOME_HERO_ALT)
    }

    pub fn ministries_alt(&self) -> &str {
        alt(&self.ministries_image, HOME_MINISTRIES_ALT)
    }

    pub fn giving_alt(&self) -> &str {
        alt(&self.giving_image, HOME_GIVING_ALT)
    }
}

/// About page: three titled sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AboutContent {
    pub sections: [Section; 3],
}

impl AboutContent {
    pub fn from_envelope(envelope: &Value) -> Option<Self> {
        let data = single_from_envelope(envelope)?;
        let section = |n: usize| Section {
            title: non_empty(data, &format!("title{n}"))
                .unwrap_or_else(|| ABOUT_DEFAULT_TITLES[n - 1].to_string()),
            description: text_or_default(data, &format!("title{n}Description")),
            image: image(data, &format!("img{n}")),
        };
        Some(Self {
            sections: [section(1), section(2), section(3)],
        })
    }
}

/// One ministry block on the ministries page.
pub type Ministry = Section;

/// Ministries page: an introduction and up to four ministries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MinistriesContent {
    pub intro: String,
    pub intro_image: Option<ImagePayload>,
    /// Sections 2 to 5 in order, skipping those without a title.
    pub ministries: Vec<Ministry>,
}

impl MinistriesContent {
    pub fn from_envelope(envelope: &Value) -> Option<Self> {
        let data = single_from_envelope(envelope)?;
        let ministries = (2..=5)
            .filter_map(|n| {
                let title = non_empty(data, &format!("title{n}"))?;
                Some(Ministry {
                    title,
                    description: text_or_default(data, &format!("title{n}Description")),
                    image: image(data, &format!("img{n}")),
                })
            })
            .collect();

        Some(Self {
            intro: text_or_default(data, "title1Description"),
            intro_image: image(data, "img1"),
            ministries,
        })
    }
}

/// Hero block of the events page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventsPageContent {
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_image: Option<ImagePayload>,
}

impl Default for EventsPageContent {
    fn default() -> Self {
        Self {
            hero_title: EVENTS_DEFAULT_HERO_TITLE.to_string(),
            hero_subtitle: String::new(),
            hero_image: None,
        }
    }
}

impl EventsPageContent {
    pub fn from_envelope(envelope: &Value) -> Option<Self> {
        let data = single_from_envelope(envelope)?;
        Some(Self {
            hero_title: non_empty(data, "heroTitle")
                .unwrap_or_else(|| EVENTS_DEFAULT_HERO_TITLE.to_string()),
            hero_subtitle: text_or_default(data, "heroSubtitle"),
            hero_image: image(data, "heroImage"),
        })
    }

    /// The hero title split on newlines, for rendering with line breaks.
    pub fn hero_title_lines(&self) -> Vec<&str> {
        self.hero_title.lines().collect()
    }
}

fn text_or_default(data: &Map<String, Value>, key: &str) -> String {
    text(data, key).unwrap_or_default()
}

fn non_empty(data: &Map<String, Value>, key: &str) -> Option<String> {
    text(data, key).filter(|s| !s.trim().is_empty())
}

fn image(data: &Map<String, Value>, key: &str) -> Option<ImagePayload> {
    data.get(key).and_then(ImagePayload::from_value)
}

fn alt<'a>(image: &'a Option<ImagePayload>, fallback: &'a str) -> &'a str {
    image.as_ref().map_or(fallback, |i| i.alt_text(fallback))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    mod home {
        use super::*;

        #[test]
        fn reads_fields_and_alt_text() {
            let home = HomeContent::from_envelope(&json!({
                "data": {
                    "heroDescription": "Welcome",
                    "heroImg": {"url": "/uploads/hero.jpg", "alternativeText": "Our building"},
                    "ministriesImg": {"url": "/uploads/m.jpg"},
                    "givingDescription": "Give"
                }
            }))
            .unwrap();

            assert_eq!(home.hero_description, "Welcome");
            assert_eq!(home.hero_alt(), "Our building");
            assert_eq!(home.ministries_alt(), "Ministries");
            assert_eq!(home.giving_alt(), "Giving");
            assert_eq!(home.ministries_description, "");
            assert!(home.giving_image.is_none());
        }

        #[test]
        fn missing_data_is_none() {
            assert!(HomeContent::from_envelope(&json!({"data": null})).is_none());
            assert!(HomeContent::from_envelope(&json!({"error": {}})).is_none());
        }
    }

    mod about {
        use super::*;

        #[test]
        fn default_titles() {
            let about = AboutContent::from_envelope(&json!({
                "data": {"title2": "What we do", "title3": "", "title1Description": "Hi"}
            }))
            .unwrap();
            let titles: Vec<_> = about.sections.iter().map(|s| s.title.as_str()).collect();
            assert_eq!(titles, vec!["About Us", "What we do", "Our Vision"]);
            assert_eq!(about.sections[0].description, "Hi");
        }
    }

    mod ministries {
        use super::*;

        #[test]
        fn skips_untitled_sections() {
            let page = MinistriesContent::from_envelope(&json!({
                "data": {
                    "title1Description": "Serving together",
                    "img1": {"url": "/uploads/intro.jpg"},
                    "title2": "Kids",
                    "title2Description": "Sunday school",
                    "title3": " ",
                    "title4": "Youth",
                    "img4": {"data": {"attributes": {"url": "/uploads/y.jpg"}}}
                }
            }))
            .unwrap();

            assert_eq!(page.intro, "Serving together");
            assert!(page.intro_image.is_some());
            let titles: Vec<_> = page.ministries.iter().map(|m| m.title.as_str()).collect();
            assert_eq!(titles, vec!["Kids", "Youth"]);
            assert!(page.ministries[1].image.is_some());
        }
    }

    mod events_page {
        use super::*;

        #[test]
        fn hero_defaults() {
            let page = EventsPageContent::from_envelope(&json!({"data": {}})).unwrap();
            assert_eq!(page, EventsPageContent::default());
            assert_eq!(page.hero_title, "Upcoming Events");
        }

        #[test]
        fn multiline_title() {
            let page = EventsPageContent::from_envelope(&json!({
                "data": {"heroTitle": "Join\nUs", "heroSubtitle": "Every week"}
            }))
            .unwrap();
            assert_eq!(page.hero_title_lines(), vec!["Join", "Us"]);
            assert_eq!(page.hero_subtitle, "Every week");
        }
    }
}
