//! Admin panel: login and the guest dashboard.
//!
//! Every mutation redirects back to the dashboard, which re-fetches the
//! whole list; there is no client-side state to merge. Notices (including
//! a failed notification dispatch) travel in the redirect query string.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
};
use secrecy::ExposeSecret;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tower_sessions::Session;
use tracing::instrument;

use soiree_core::{Approval, Guest, GuestId, sort_for_admin};

use crate::db::{GuestRepository, RepositoryError};
use crate::error::Result;
use crate::filters;
use crate::middleware::{RequireAdminAuth, clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::state::AppState;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/login.html")]
pub struct LoginPageTemplate {
    pub error: Option<String>,
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub guests: Vec<Guest>,
    pub notice: Option<String>,
}

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    pub password: String,
}

/// Notice carried across the post-mutation redirect.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub notice: Option<String>,
}

/// Render the login page.
///
/// GET /admin/login
pub async fn login_page() -> LoginPageTemplate {
    LoginPageTemplate { error: None }
}

/// Check the shared admin password and mark the session.
///
/// POST /admin/login
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> impl IntoResponse {
    if !password_matches(&form.password, state.config().admin_password.expose_secret()) {
        tracing::warn!("Failed admin login attempt");
        return LoginPageTemplate {
            error: Some("Incorrect password.".to_string()),
        }
        .into_response();
    }

    if let Err(e) = set_current_admin(&session, &CurrentAdmin::now()).await {
        tracing::error!(error = %e, "Failed to store admin session");
        return LoginPageTemplate {
            error: Some("Session error, please try again.".to_string()),
        }
        .into_response();
    }

    Redirect::to("/admin").into_response()
}

/// Logout and clear the session.
///
/// POST /admin/logout
pub async fn logout(session: Session) -> Redirect {
    let _ = clear_current_admin(&session).await;
    Redirect::to("/admin/login")
}

/// Render the dashboard: every guest, pending first, newest first within
/// each approval group.
///
/// GET /admin
#[instrument(skip(state, _admin))]
pub async fn dashboard(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
    Query(query): Query<DashboardQuery>,
) -> Result<DashboardTemplate> {
    let repo = GuestRepository::new(state.pool());
    let mut guests = repo.list_all().await?;
    sort_for_admin(&mut guests);

    Ok(DashboardTemplate {
        guests,
        notice: query.notice,
    })
}

/// Approve a guest, then dispatch the invitation email.
///
/// POST /admin/guests/{id}/approve
///
/// The approval is persisted first; the store is authoritative. A dispatch
/// failure (or an unconfigured mailer) only changes the notice shown back
/// on the dashboard.
#[instrument(skip(state, _admin))]
pub async fn approve(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
    Path(id): Path<i64>,
) -> Result<Redirect> {
    let id = GuestId::new(id);
    let repo = GuestRepository::new(state.pool());

    let Some(mut guest) = repo.get(id).await? else {
        tracing::warn!(guest_id = %id, "Approve targeted a missing guest");
        return Ok(Redirect::to("/admin?notice=That+guest+no+longer+exists."));
    };

    repo.set_approval(id, Approval::Approved).await?;
    guest.approval = Approval::Approved;

    let notice = match state.notifier() {
        Some(notifier) => {
            if notifier.notify_approved(&guest).await {
                "Guest approved and invitation email sent."
            } else {
                "Guest approved, but the invitation email failed to send. Approve again to retry."
            }
        }
        None => "Guest approved. No mailer is configured, so no email was sent.",
    };

    Ok(Redirect::to(&format!(
        "/admin?notice={}",
        urlencoding::encode(notice)
    )))
}

/// Reject a guest.
///
/// POST /admin/guests/{id}/reject
#[instrument(skip(state, _admin))]
pub async fn reject(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
    Path(id): Path<i64>,
) -> Result<Redirect> {
    set_approval_or_log(&state, GuestId::new(id), Approval::Rejected).await?;
    Ok(Redirect::to("/admin"))
}

/// Move a guest back to pending.
///
/// POST /admin/guests/{id}/pending
#[instrument(skip(state, _admin))]
pub async fn set_pending(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
    Path(id): Path<i64>,
) -> Result<Redirect> {
    set_approval_or_log(&state, GuestId::new(id), Approval::Pending).await?;
    Ok(Redirect::to("/admin"))
}

/// Delete a guest permanently.
///
/// POST /admin/guests/{id}/delete
///
/// Deleting an id that is already gone is a no-op.
#[instrument(skip(state, _admin))]
pub async fn delete(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
    Path(id): Path<i64>,
) -> Result<Redirect> {
    let id = GuestId::new(id);
    let repo = GuestRepository::new(state.pool());

    let deleted = repo.delete(id).await?;
    if !deleted {
        tracing::debug!(guest_id = %id, "Delete targeted a missing guest");
    }

    Ok(Redirect::to("/admin"))
}

/// Apply an approval transition; a missing id is benign and only logged.
async fn set_approval_or_log(
    state: &AppState,
    id: GuestId,
    approval: Approval,
) -> Result<()> {
    let repo = GuestRepository::new(state.pool());
    match repo.set_approval(id, approval).await {
        Ok(()) => Ok(()),
        Err(RepositoryError::NotFound) => {
            tracing::warn!(guest_id = %id, %approval, "Transition targeted a missing guest");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Compare the submitted password with the configured one.
///
/// Digests are compared instead of the strings so the comparison does not
/// leak the candidate's length.
fn password_matches(candidate: &str, expected: &str) -> bool {
    Sha256::digest(candidate.as_bytes()) == Sha256::digest(expected.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_matches() {
        assert!(password_matches("hunter2-but-long", "hunter2-but-long"));
        assert!(!password_matches("wrong", "hunter2-but-long"));
        assert!(!password_matches("", "hunter2-but-long"));
    }
}
