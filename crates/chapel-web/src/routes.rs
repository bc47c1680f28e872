//! HTTP routes.
//!
//! Pages are rendered on every request from fresh CMS content; the
//! `Cache-Control` header lets a shared cache serve them for
//! `revalidate_secs` before coming back.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use chapel_cms::{CmsResult, EventsPageContent};
use chapel_core::{CarouselSlide, EventDetail, EventFilter, EventGroupView};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::contact;
use crate::render;
use crate::state::AppState;

/// The `Cache-Control` value for pages.
pub fn cache_control(revalidate_secs: u64) -> String {
    format!(
        "public, max-age=0, s-maxage={}, stale-while-revalidate",
        revalidate_secs
    )
}

/// Builds the site router.
pub fn router(state: Arc<AppState>) -> Router {
    let cache = HeaderValue::from_str(&cache_control(state.revalidate_secs))
        .unwrap_or_else(|_| HeaderValue::from_static("no-cache"));

    let pages = Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/ministries", get(ministries))
        .route("/events", get(events))
        .route("/events/{slug}", get(event_detail))
        .route("/contact", get(contact_form))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            move |response: &Response| response.status().is_success().then(|| cache.clone()),
        ));

    let api = Router::new()
        .route("/health", get(health))
        .route("/api/contact", post(contact::submit))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ));

    pages
        .merge(api)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
}

/// Renders a page, or the load error page with a 502 if the content is
/// missing or could not be fetched.
fn page_or_error<T>(
    state: &AppState,
    result: CmsResult<Option<T>>,
    heading: &str,
    render: impl FnOnce(&T) -> String,
) -> Response {
    match result {
        Ok(Some(content)) => Html(render(&content)).into_response(),
        Ok(None) => {
            warn!(heading, "CMS returned no content");
            load_error(state, heading, None)
        }
        Err(e) => {
            warn!(heading, error = %e, "CMS request failed");
            load_error(state, heading, Some(&e.to_string()))
        }
    }
}

fn load_error(state: &AppState, heading: &str, message: Option<&str>) -> Response {
    (
        StatusCode::BAD_GATEWAY,
        Html(render::load_error_page(&state.site_name, heading, message)),
    )
        .into_response()
}

async fn home(State(state): State<Arc<AppState>>) -> Response {
    let (home, featured) = tokio::join!(
        state.repository.home(),
        state.repository.featured_events()
    );

    let events = featured.unwrap_or_else(|e| {
        warn!(error = %e, "failed to load featured events");
        Vec::new()
    });
    let slides: Vec<CarouselSlide> = events
        .iter()
        .map(|e| CarouselSlide::build(e, state.formatter(), &state.images))
        .collect();

    page_or_error(&state, home, "Error loading home page", |home| {
        render::home_page(&state.site_name, home, &slides, &state.images)
    })
}

async fn about(State(state): State<Arc<AppState>>) -> Response {
    let about = state.repository.about().await;
    page_or_error(&state, about, "Error loading page", |about| {
        render::about_page(&state.site_name, about, &state.images)
    })
}

async fn ministries(State(state): State<Arc<AppState>>) -> Response {
    let page = state.repository.ministries().await;
    page_or_error(&state, page, "Error loading ministries", |page| {
        render::ministries_page(&state.site_name, page, &state.images)
    })
}

async fn events(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<EventFilter>,
) -> Response {
    let (page, events) = tokio::join!(state.repository.events_page(), state.repository.events());

    let events = match events {
        Ok(events) => events,
        Err(e) => {
            warn!(error = %e, "failed to load events");
            return load_error(&state, "Error loading events", Some(&e.to_string()));
        }
    };
    let page = page.unwrap_or_else(|e| {
        warn!(error = %e, "failed to load events page content");
        None
    });
    let page = page.unwrap_or_else(EventsPageContent::default);

    let groups = state.engine.query_with(&events, &filter);
    debug!(
        events = events.len(),
        groups = groups.len(),
        search = %filter.search,
        ministry = %filter.ministry,
        "events queried"
    );
    let views = EventGroupView::build_all(&groups, state.formatter(), &state.images);

    Html(render::events_page(
        &state.site_name,
        &page,
        &filter,
        &views,
        &state.images,
    ))
    .into_response()
}

async fn event_detail(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Response {
    match state.repository.event_by_slug(&slug).await {
        Ok(Some(event)) => {
            let detail = EventDetail::build(&event, state.formatter(), &state.images);
            if detail.has_unresolved_image {
                debug!(slug, "event image payload has no usable URL");
            }
            Html(render::event_detail_page(&state.site_name, &detail)).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Html(render::event_not_found_page(&state.site_name, &slug, None)),
        )
            .into_response(),
        Err(e) => {
            warn!(slug, error = %e, "failed to load event");
            (
                StatusCode::BAD_GATEWAY,
                Html(render::event_not_found_page(
                    &state.site_name,
                    &slug,
                    Some(&e.to_string()),
                )),
            )
                .into_response()
        }
    }
}

async fn contact_form(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render::contact_page(&state.site_name))
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
