//! `chapel events`: print the grouped event list.

use std::sync::Arc;

use chapel_core::{EventFilter, EventGroupView, format_groups_text};
use tracing::debug;

use crate::error::WebResult;
use crate::state::AppState;

/// Fetches events from the CMS and prints them grouped by month.
pub async fn run(state: Arc<AppState>, filter: EventFilter, json: bool) -> WebResult<()> {
    let events = state.repository.events().await?;
    let groups = state.engine.query_with(&events, &filter);
    debug!(events = events.len(), groups = groups.len(), "events queried");

    if json {
        let views = EventGroupView::build_all(&groups, state.formatter(), &state.images);
        println!("{}", serde_json::to_string_pretty(&views)?);
    } else if groups.is_empty() {
        println!("No events found.");
    } else {
        print!("{}", format_groups_text(state.formatter(), &groups));
    }
    Ok(())
}
