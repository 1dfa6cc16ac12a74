//! Invitation pages and RSVP handling.
//!
//! The open invitation carries the RSVP form; submitting it lands on a
//! confirmation or correction page. The personalized page at `/inv/{email}`
//! resolves the guest's approval state into one of four outcomes; "not
//! found" shares its copy with "not approved" so the URL cannot be used to
//! probe which emails are registered.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tracing::instrument;

use soiree_core::{Email, InvitationOutcome, RsvpRequest, invitation_outcome};

use crate::config::VenueConfig;
use crate::db::{GuestRepository, RepositoryError};
use crate::error::Result;
use crate::filters;
use crate::state::AppState;

/// Open invitation page with the RSVP form.
#[derive(Template, WebTemplate)]
#[template(path = "invitation/page.html")]
pub struct InvitationPageTemplate {
    pub host_name: String,
    pub date_text: String,
    pub dinner: VenueConfig,
    pub party: VenueConfig,
}

/// Confirmation page after a successful RSVP.
#[derive(Template, WebTemplate)]
#[template(path = "invitation/rsvp_success.html")]
pub struct RsvpSuccessTemplate {
    pub name: String,
    pub host_name: String,
}

/// Correction page after a failed RSVP; the message is user-correctable.
#[derive(Template, WebTemplate)]
#[template(path = "invitation/rsvp_error.html")]
pub struct RsvpErrorTemplate {
    pub message: String,
}

/// Personalized invitation for an approved guest.
#[derive(Template, WebTemplate)]
#[template(path = "invitation/personal.html")]
pub struct PersonalInvitationTemplate {
    pub host_name: String,
    pub guest_name: String,
    /// Self-deletion endpoint with the email percent-encoded into the path.
    pub delete_path: String,
    pub dinner: Option<VenueConfig>,
    pub party: Option<VenueConfig>,
}

/// Status page for the pending / rejected / unknown outcomes.
#[derive(Template, WebTemplate)]
#[template(path = "invitation/status.html")]
pub struct InvitationStatusTemplate {
    pub host_name: String,
    pub message: String,
}

/// RSVP form data.
#[derive(Debug, Deserialize)]
pub struct RsvpForm {
    pub name: String,
    pub lastname: String,
    pub email: String,
    #[serde(default)]
    pub diner: bool,
    #[serde(default)]
    pub party: bool,
}

/// Render the open invitation.
///
/// GET /invitation
pub async fn page(State(state): State<AppState>) -> InvitationPageTemplate {
    let config = state.config();
    InvitationPageTemplate {
        host_name: config.host_name.clone(),
        date_text: config.event.date_text.clone(),
        dinner: config.event.dinner.clone(),
        party: config.event.party.clone(),
    }
}

/// Submit an RSVP.
///
/// POST /invitation/rsvp
///
/// Validation failures and duplicate registrations are user-correctable:
/// their messages are rendered verbatim on the correction page. Anything
/// else becomes a generic retry prompt.
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn submit_rsvp(
    State(state): State<AppState>,
    Form(form): Form<RsvpForm>,
) -> impl IntoResponse {
    let rsvp = match RsvpRequest::new(&form.name, &form.lastname, &form.email, form.diner, form.party)
    {
        Ok(rsvp) => rsvp,
        Err(e) => {
            return RsvpErrorTemplate {
                message: e.to_string(),
            }
            .into_response();
        }
    };

    let repo = GuestRepository::new(state.pool());
    match repo.insert(&rsvp).await {
        Ok(id) => {
            tracing::info!(guest_id = %id, email = %rsvp.email, "RSVP registered");
            RsvpSuccessTemplate {
                name: rsvp.name,
                host_name: state.config().host_name.clone(),
            }
            .into_response()
        }
        Err(e @ RepositoryError::DuplicateEmail) => RsvpErrorTemplate {
            message: e.to_string(),
        }
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "RSVP registration failed");
            RsvpErrorTemplate {
                message: "Something went wrong. Please try again.".to_string(),
            }
            .into_response()
        }
    }
}

/// Render the personalized invitation.
///
/// GET /inv/{email}
///
/// The email arrives percent-encoded in the path; axum decodes it before
/// it reaches the handler, so addresses round-trip unchanged.
#[instrument(skip(state))]
pub async fn personalized(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<axum::response::Response> {
    let config = state.config();

    // An unparseable address gets the same copy as an unknown one.
    let Ok(email) = Email::parse(&email) else {
        return Ok(status_response(&state, InvitationOutcome::Unknown));
    };

    let repo = GuestRepository::new(state.pool());
    let guest = repo.find_by_email(&email).await?;

    match invitation_outcome(guest.as_ref()) {
        InvitationOutcome::Approved(guest) => Ok(PersonalInvitationTemplate {
            host_name: config.host_name.clone(),
            guest_name: guest.full_name(),
            delete_path: format!(
                "/inv/{}/delete",
                urlencoding::encode(guest.email.as_str())
            ),
            dinner: guest.diner.then(|| config.event.dinner.clone()),
            party: guest.party.then(|| config.event.party.clone()),
        }
        .into_response()),
        outcome => Ok(status_response(&state, outcome)),
    }
}

/// Guest self-service deletion from the personalized page.
///
/// POST /inv/{email}/delete
///
/// Permanent and unconditional; deleting an address that is no longer
/// registered is a no-op. Redirects to the landing page either way.
#[instrument(skip(state))]
pub async fn self_delete(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Redirect> {
    if let Ok(email) = Email::parse(&email) {
        let repo = GuestRepository::new(state.pool());
        if let Some(guest) = repo.find_by_email(&email).await? {
            let deleted = repo.delete(guest.id).await?;
            if deleted {
                tracing::info!(guest_id = %guest.id, "Guest removed their registration");
            }
        }
    }

    Ok(Redirect::to("/"))
}

/// Render the status page for a non-approved outcome.
fn status_response(state: &AppState, outcome: InvitationOutcome<'_>) -> axum::response::Response {
    let host_name = state.config().host_name.clone();
    let message = match outcome {
        InvitationOutcome::Pending => {
            "Your RSVP is registered but has not been approved yet... you'll hear from us soon!"
                .to_string()
        }
        InvitationOutcome::Rejected => format!(
            "Your RSVP could not be approved. Please contact {host_name} directly."
        ),
        // Covers both "never registered" and "not approved" on purpose.
        InvitationOutcome::Approved(_) | InvitationOutcome::Unknown => {
            "No invitation was found for this address, or it has not been approved.".to_string()
        }
    };

    InvitationStatusTemplate { host_name, message }.into_response()
}
