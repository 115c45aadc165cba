//! Admin login and logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::auth::{clear_current_admin, set_current_admin};
use crate::services::CredentialGate;
use crate::state::AppState;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    /// Error message from a failed attempt, if any.
    pub error: Option<&'static str>,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Display the login page.
pub async fn login_page() -> LoginTemplate {
    LoginTemplate { error: None }
}

/// Handle a login attempt.
///
/// POST /auth/login
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<axum::response::Response> {
    let gate = CredentialGate::new(&state.config().admin_users);
    match gate.verify(&form.email, &form.password) {
        Some(admin) => {
            // Rotate the session id on privilege change.
            session.cycle_id().await?;
            set_current_admin(&session, &admin).await?;
            tracing::info!(email = %admin.email, role = %admin.role, "admin logged in");
            Ok(Redirect::to("/").into_response())
        }
        None => {
            tracing::warn!("failed admin login attempt");
            Ok((
                StatusCode::UNAUTHORIZED,
                LoginTemplate {
                    error: Some("Invalid email or password."),
                },
            )
                .into_response())
        }
    }
}

/// Handle logout.
///
/// POST /auth/logout
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_current_admin(&session).await?;
    Ok(Redirect::to("/auth/login"))
}
