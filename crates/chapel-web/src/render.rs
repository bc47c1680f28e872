//! Server-side HTML for every page.
//!
//! Pages are plain `format!` templates around a shared [`build_page`]
//! layout. Everything interpolated from the CMS or the request passes
//! through [`html_escape`].

use chapel_cms::{AboutContent, EventsPageContent, HomeContent, MinistriesContent, Section};
use chapel_core::{CarouselSlide, EventDetail, EventFilter, EventGroupView, ImageUrlResolver, html_escape};

/// Site name used where no configuration is at hand.
pub const DEFAULT_SITE_NAME: &str = "Chapel";

/// Text shown in place of an image that could not be resolved.
pub const IMAGE_PLACEHOLDER: &str = "Image not available";

/// Home page: hero, featured events, ministries teaser, giving.
pub fn home_page(
    site: &str,
    home: &HomeContent,
    slides: &[CarouselSlide],
    images: &ImageUrlResolver,
) -> String {
    let hero_img = images
        .resolve(home.hero_image.as_ref())
        .map(|url| img(&url, home.hero_alt(), "hero-img"))
        .unwrap_or_default();

    let events = if slides.is_empty() {
        r#"<section class="container"><p class="empty">No events available</p></section>"#.to_string()
    } else {
        let cards: String = slides.iter().map(render_slide).collect();
        format!(
            r#"<section class="container"><h2>Events</h2><div class="carousel">{cards}</div></section>"#
        )
    };

    let ministries_img = images
        .resolve(home.ministries_image.as_ref())
        .map(|url| img(&url, home.ministries_alt(), "feature-img"))
        .unwrap_or_default();
    let giving_img = images
        .resolve(home.giving_image.as_ref())
        .map(|url| img(&url, home.giving_alt(), "feature-img"))
        .unwrap_or_default();

    let content = format!(
        r#"<section class="hero">{hero_img}<div class="hero-overlay"><p>{hero_text}</p><a class="btn" href="/about">Visit</a></div></section>
{events}
<section class="container feature"><h2>Ministries</h2><div class="feature-body"><div><p class="text">{ministries_text}</p><a class="btn" href="/ministries">Visit</a></div>{ministries_img}</div></section>
<section class="container feature"><h2>Giving</h2><div class="feature-body">{giving_img}<p class="text">{giving_text}</p></div></section>"#,
        hero_text = html_escape(&home.hero_description),
        ministries_text = html_escape(&home.ministries_description),
        giving_text = html_escape(&home.giving_description),
    );

    build_page(site, "Home", &content)
}

fn render_slide(slide: &CarouselSlide) -> String {
    let image = image_or_placeholder(slide.image_url.as_deref(), &slide.title, "slide-img");
    format!(
        r#"<a class="slide" href="{href}">{image}<h3>{title}</h3><p class="meta">{schedule}</p></a>"#,
        href = html_escape(&slide.href),
        title = html_escape(&slide.title),
        schedule = html_escape(&slide.schedule),
    )
}

/// About page: three sections, the first as the page heading.
pub fn about_page(site: &str, about: &AboutContent, images: &ImageUrlResolver) -> String {
    let content: String = about
        .sections
        .iter()
        .enumerate()
        .map(|(i, section)| render_section(section, images, if i == 0 { "h1" } else { "h2" }))
        .collect();
    build_page(site, "About us", &format!(r#"<div class="container">{content}</div>"#))
}

/// Ministries page: introduction, then one block per ministry.
pub fn ministries_page(site: &str, page: &MinistriesContent, images: &ImageUrlResolver) -> String {
    let intro_img = images
        .resolve(page.intro_image.as_ref())
        .map(|url| img(&url, "Ministries", "feature-img"))
        .unwrap_or_default();

    let blocks: String = page
        .ministries
        .iter()
        .map(|m| render_section(m, images, "h2"))
        .collect();

    let content = format!(
        r#"<div class="container"><h1>Ministries</h1><section class="section">{intro_img}<p class="text">{intro}</p></section>{blocks}</div>"#,
        intro = html_escape(&page.intro),
    );
    build_page(site, "Ministries", &content)
}

fn render_section(section: &Section, images: &ImageUrlResolver, heading: &str) -> String {
    let image = images
        .resolve(section.image.as_ref())
        .map(|url| {
            let alt = section
                .image
                .as_ref()
                .map_or(section.title.as_str(), |i| i.alt_text(&section.title));
            img(&url, alt, "feature-img")
        })
        .unwrap_or_default();
    format!(
        r#"<section class="section"><{heading}>{title}</{heading}>{image}<p class="text">{description}</p></section>"#,
        title = html_escape(&section.title),
        description = html_escape(&section.description),
    )
}

/// Events page: hero, search form and the grouped list.
pub fn events_page(
    site: &str,
    page: &EventsPageContent,
    filter: &EventFilter,
    groups: &[EventGroupView],
    images: &ImageUrlResolver,
) -> String {
    let hero_title = page
        .hero_title_lines()
        .iter()
        .map(|line| html_escape(line))
        .collect::<Vec<_>>()
        .join("<br>");
    let hero_img = images
        .resolve(page.hero_image.as_ref())
        .map(|url| img(&url, &page.hero_title, "hero-side-img"))
        .unwrap_or_default();

    let list = if groups.is_empty() {
        r#"<p class="empty">No events found.</p>"#.to_string()
    } else {
        groups.iter().map(render_group).collect()
    };

    let content = format!(
        r#"<div class="container">
<section class="events-hero"><div><h1>{hero_title}</h1><p class="text">{subtitle}</p></div>{hero_img}</section>
<section><h2>Events</h2>
<form class="search" method="get" action="/events">
<input type="search" name="q" value="{q}" placeholder="Search by Event title">
<input type="search" name="ministry" value="{ministry}" placeholder="Filter by tags">
<button class="btn" type="submit">Search</button>
</form>
<div class="groups">{list}</div>
</section>
</div>"#,
        subtitle = html_escape(&page.hero_subtitle),
        q = html_escape(&filter.search),
        ministry = html_escape(&filter.ministry),
    );
    build_page(site, "Events", &content)
}

fn render_group(group: &EventGroupView) -> String {
    let cards: String = group
        .cards
        .iter()
        .map(|card| {
            let tags: String = card
                .tags
                .iter()
                .map(|t| format!(r#"<span class="tag">{}</span>"#, html_escape(t)))
                .collect();
            let time = if card.time_text.is_empty() {
                String::new()
            } else {
                format!(r#"<p class="meta">{}</p>"#, html_escape(&card.time_text))
            };
            format!(
                r#"<a class="card" href="{href}"><div class="date"><div class="day">{day}</div><div>{month}</div></div><div class="card-body"><div>{tags}</div><h3>{title}</h3>{time}<p class="text">{description}</p></div></a>"#,
                href = html_escape(&card.href),
                day = html_escape(&card.day),
                month = html_escape(&card.month),
                title = html_escape(&card.title),
                description = html_escape(&card.description),
            )
        })
        .collect();

    format!(
        r#"<div class="group"><h3 class="group-label">{label}</h3>{cards}</div>"#,
        label = html_escape(&group.label),
    )
}

/// Detail page of a single event.
pub fn event_detail_page(site: &str, detail: &EventDetail) -> String {
    let tags: String = detail
        .tags
        .iter()
        .map(|t| format!(r#"<span class="tag">{}</span>"#, html_escape(t)))
        .collect();

    let mut facts = String::new();
    for (label, value) in [
        ("Date", Some(detail.full_date.as_str())),
        ("Time", Some(detail.time_text.as_str())),
        ("Location", detail.location.as_deref()),
        ("City", detail.city.as_deref()),
    ] {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            facts.push_str(&format!(
                "<dt>{label}</dt><dd>{}</dd>",
                html_escape(value)
            ));
        }
    }

    let content = format!(
        r#"<div class="container detail">
<a class="back" href="/events">Back to events</a>
{image}
<div>{tags}</div>
<h1>{title}</h1>
<dl class="facts">{facts}</dl>
<p class="text">{description}</p>
</div>"#,
        image = image_or_placeholder(detail.image_url.as_deref(), &detail.title, "detail-img"),
        title = html_escape(&detail.title),
        description = html_escape(&detail.description),
    );
    build_page(site, &detail.title, &content)
}

/// Shown when no event has the requested slug or the lookup failed.
pub fn event_not_found_page(site: &str, slug: &str, error: Option<&str>) -> String {
    let error = error
        .map(|e| format!(r#"<p class="error">Error from the CMS: {}</p>"#, html_escape(e)))
        .unwrap_or_default();
    let content = format!(
        r#"<div class="container detail">
<a class="back" href="/events">Back to events</a>
<section><h1>Event not found</h1><p>We couldn't find an event with slug: <code>{slug}</code></p>{error}</section>
</div>"#,
        slug = html_escape(slug),
    );
    build_page(site, "Event not found", &content)
}

/// Contact page with a form that posts JSON to `/api/contact`.
pub fn contact_page(site: &str) -> String {
    let content = r#"<div class="container">
<h1>Contact</h1>
<form id="contact-form" class="contact">
<label>Full name<input name="fullName" placeholder="Your full name" required></label>
<label>Email<input name="email" type="email" placeholder="you@example.com" required></label>
<label>Message<textarea name="message" rows="6" placeholder="Tell us how we can help..." required></textarea></label>
<button class="btn" type="submit">Submit</button>
<p id="contact-status" class="meta"></p>
</form>
</div>
<script>
const form = document.getElementById('contact-form');
const status = document.getElementById('contact-status');
form.addEventListener('submit', async (e) => {
    e.preventDefault();
    const button = form.querySelector('button');
    button.disabled = true;
    button.textContent = 'Sending...';
    status.textContent = '';
    try {
        const body = Object.fromEntries(new FormData(form).entries());
        const res = await fetch('/api/contact', {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify(body),
        });
        const data = await res.json().catch(() => ({}));
        if (!res.ok) throw new Error(data.error || 'Something went wrong.');
        form.reset();
        status.textContent = 'Thank you! Your message has been sent.';
    } catch (err) {
        status.textContent = err.message || 'Something went wrong.';
    } finally {
        button.disabled = false;
        button.textContent = 'Submit';
    }
});
</script>"#;
    build_page(site, "Contact", content)
}

/// Page shown when CMS content could not be loaded.
pub fn load_error_page(site: &str, heading: &str, message: Option<&str>) -> String {
    let message = message
        .map(|m| format!(r#"<p class="error">{}</p>"#, html_escape(m)))
        .unwrap_or_default();
    let content = format!(
        r#"<div class="container"><h1 class="error">{heading}</h1>{message}</div>"#,
        heading = html_escape(heading),
    );
    build_page(site, heading, &content)
}

fn img(src: &str, alt: &str, class: &str) -> String {
    format!(
        r#"<img class="{class}" src="{}" alt="{}">"#,
        html_escape(src),
        html_escape(alt)
    )
}

fn image_or_placeholder(src: Option<&str>, alt: &str, class: &str) -> String {
    match src {
        Some(src) => img(src, alt, class),
        None => format!(r#"<div class="{class} placeholder"><p>{IMAGE_PLACEHOLDER}</p></div>"#),
    }
}

/// Wraps `content` in the site layout.
pub fn build_page(site: &str, title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | {site}</title>
<style>
*{{margin:0;padding:0;box-sizing:border-box;}}
body{{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;color:#111;background:#fff;}}
.header{{padding:16px 24px;display:flex;align-items:center;justify-content:space-between;border-bottom:1px solid #eee;}}
.header h1{{font-size:20px;font-weight:700;}}
.header nav a{{color:#333;text-decoration:none;margin-left:20px;font-size:14px;text-transform:uppercase;}}
.header nav a:hover{{color:#00a6d1;}}
.container{{max-width:1200px;margin:0 auto;padding:32px 24px;}}
h1{{font-size:40px;margin-bottom:16px;}}
h2{{font-size:32px;margin-bottom:16px;}}
.text{{white-space:pre-line;line-height:1.6;color:#444;}}
.meta{{font-size:12px;color:#666;margin:4px 0;}}
.empty{{text-align:center;color:#888;padding:40px;}}
.error{{color:#c62828;}}
.btn{{display:inline-block;background:#00b7e3;color:#000;font-weight:600;padding:12px 40px;border-radius:999px;border:none;text-decoration:none;cursor:pointer;margin-top:16px;}}
.btn:hover{{background:#00a6d1;}}
.hero{{position:relative;max-width:1330px;height:620px;margin:32px auto;border-radius:30px;overflow:hidden;background:#222;}}
.hero-img{{position:absolute;inset:0;width:100%;height:100%;object-fit:cover;}}
.hero-overlay{{position:relative;height:100%;display:flex;flex-direction:column;align-items:center;justify-content:center;text-align:center;background:rgba(0,0,0,.5);color:#fff;padding:24px;}}
.carousel{{display:flex;gap:16px;overflow-x:auto;padding-bottom:8px;}}
.slide{{flex:0 0 280px;color:#111;text-decoration:none;}}
.slide-img,.feature-img,.detail-img,.hero-side-img{{width:100%;border-radius:24px;object-fit:cover;}}
.slide-img{{height:200px;}}
.placeholder{{background:#e5e5e5;display:flex;align-items:center;justify-content:center;min-height:200px;color:#666;font-size:14px;}}
.feature{{background:#fafafa;border-radius:24px;margin-top:32px;}}
.feature-body{{display:flex;gap:48px;align-items:center;flex-wrap:wrap;}}
.feature-body>*{{flex:1 1 320px;}}
.section{{margin-bottom:48px;}}
.events-hero{{display:flex;gap:32px;align-items:center;flex-wrap:wrap;margin-bottom:48px;}}
.events-hero>*{{flex:1 1 320px;}}
.search{{display:flex;gap:12px;flex-wrap:wrap;margin-bottom:32px;}}
.search input{{flex:1 1 240px;padding:10px 16px;border:1px solid #ccc;border-radius:999px;}}
.search .btn{{margin-top:0;}}
.group{{margin-bottom:32px;}}
.group-label{{font-size:12px;text-transform:uppercase;letter-spacing:.05em;color:#777;margin-bottom:12px;}}
.card{{display:flex;border-radius:24px;box-shadow:0 1px 3px rgba(0,0,0,.1);margin-bottom:16px;color:#111;text-decoration:none;overflow:hidden;}}
.card:hover{{background:#22d3ee;}}
.card .date{{width:140px;text-align:center;padding:24px;}}
.card .day{{font-size:28px;font-weight:700;}}
.card-body{{flex:1;padding:16px 24px;}}
.tag{{display:inline-block;padding:2px 12px;border-radius:999px;font-size:12px;background:#fff;box-shadow:0 1px 2px rgba(0,0,0,.15);margin:0 6px 6px 0;}}
.back{{display:inline-block;font-size:12px;color:#666;margin-bottom:16px;}}
.detail .facts{{display:grid;grid-template-columns:auto 1fr;gap:6px 16px;margin:16px 0;font-size:14px;}}
.detail .facts dt{{color:#888;}}
.detail-img{{max-height:480px;margin-bottom:24px;}}
.contact{{display:grid;gap:16px;max-width:640px;}}
.contact label{{display:grid;gap:6px;font-size:14px;}}
.contact input,.contact textarea{{padding:10px 14px;border:1px solid #ccc;border-radius:12px;font:inherit;}}
.footer{{border-top:1px solid #eee;padding:24px;text-align:center;font-size:12px;color:#888;margin-top:48px;}}
</style>
</head>
<body>
<div class="header">
    <h1><a href="/" style="color:inherit;text-decoration:none;">{site}</a></h1>
    <nav><a href="/">Home</a><a href="/about">About us</a><a href="/ministries">Ministries</a><a href="/events">Events</a><a href="/contact">Contact</a></nav>
</div>
{content}
<div class="footer">{site}</div>
</body>
</html>"#,
        title = html_escape(title),
        site = html_escape(site),
    )
}
