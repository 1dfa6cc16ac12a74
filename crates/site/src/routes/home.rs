//! Landing page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use crate::filters;
use crate::state::AppState;

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct LandingTemplate {
    pub host_name: String,
    pub date_text: String,
}

/// Render the landing page.
///
/// GET /
pub async fn landing(State(state): State<AppState>) -> LandingTemplate {
    LandingTemplate {
        host_name: state.config().host_name.clone(),
        date_text: state.config().event.date_text.clone(),
    }
}
