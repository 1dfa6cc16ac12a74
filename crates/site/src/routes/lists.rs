//! Public confirmed-guest lists.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tracing::instrument;

use soiree_core::{EventKind, confirmed_for};

use crate::config::VenueConfig;
use crate::db::GuestRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;

/// Confirmed-guest list page.
#[derive(Template, WebTemplate)]
#[template(path = "lists/confirmed.html")]
pub struct ConfirmedListTemplate {
    pub title: String,
    pub venue: VenueConfig,
    pub guest_names: Vec<String>,
}

/// Render the confirmed list for one event.
///
/// GET /lists/{event}
///
/// Only approved guests attending the event appear, whatever their flags
/// say while pending or rejected.
#[instrument(skip(state))]
pub async fn confirmed(
    State(state): State<AppState>,
    Path(event): Path<String>,
) -> Result<ConfirmedListTemplate> {
    let event: EventKind = event
        .parse()
        .map_err(|_| AppError::NotFound(format!("no such event: {event}")))?;

    let repo = GuestRepository::new(state.pool());
    let guests = repo.list_all().await?;
    let guest_names = confirmed_for(&guests, event)
        .into_iter()
        .map(soiree_core::Guest::full_name)
        .collect();

    let venue = state.config().event.venue(event).clone();
    let title = match event {
        EventKind::Dinner => format!("Confirmed for dinner - {}", venue.name),
        EventKind::Party => format!("Confirmed for the party - {}", venue.name),
    };

    Ok(ConfirmedListTemplate {
        title,
        venue,
        guest_names,
    })
}
