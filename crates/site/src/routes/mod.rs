//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Landing page
//! GET  /health                 - Health check
//!
//! # Invitation
//! GET  /invitation             - Open invitation with the RSVP form
//! POST /invitation/rsvp        - Submit an RSVP (returns a fragment)
//! GET  /inv/{email}            - Personalized invitation
//! POST /inv/{email}/delete     - Guest self-service deletion
//!
//! # Public lists
//! GET  /lists/{event}          - Confirmed guests for "dinner" or "party"
//!
//! # Admin
//! GET  /admin/login            - Login page
//! POST /admin/login            - Login action
//! POST /admin/logout           - Logout action
//! GET  /admin                  - Dashboard (requires auth)
//! POST /admin/guests/{id}/approve  - Approve and notify
//! POST /admin/guests/{id}/reject   - Reject
//! POST /admin/guests/{id}/pending  - Back to pending
//! POST /admin/guests/{id}/delete   - Delete permanently
//! ```

pub mod admin;
pub mod home;
pub mod invitation;
pub mod lists;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the invitation routes router.
pub fn invitation_routes() -> Router<AppState> {
    Router::new()
        .route("/invitation", get(invitation::page))
        .route("/invitation/rsvp", post(invitation::submit_rsvp))
        .route("/inv/{email}", get(invitation::personalized))
        .route("/inv/{email}/delete", post(invitation::self_delete))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::dashboard))
        .route("/login", get(admin::login_page).post(admin::login))
        .route("/logout", post(admin::logout))
        .route("/guests/{id}/approve", post(admin::approve))
        .route("/guests/{id}/reject", post(admin::reject))
        .route("/guests/{id}/pending", post(admin::set_pending))
        .route("/guests/{id}/delete", post(admin::delete))
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Landing page
        .route("/", get(home::landing))
        // Invitation and RSVP
        .merge(invitation_routes())
        // Public confirmed lists
        .route("/lists/{event}", get(lists::confirmed))
        // Admin panel
        .nest("/admin", admin_routes())
}
