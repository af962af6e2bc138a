//! Authentication route handlers.
//!
//! A successful login or registration records the user in the persisted
//! auth store; logout clears it.

use axum::{Json, extract::State, http::StatusCode};
use enzobay_core::User;
use secrecy::SecretString;
use serde::Deserialize;
use tracing::instrument;

use crate::checkout::RegistrationForm;
use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::state::AppState;

/// Login request body.
///
/// Implements `Debug` manually to redact the password.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Create an account and sign in.
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn register(
    State(state): State<AppState>,
    Json(form): Json<RegistrationForm>,
) -> Result<(StatusCode, Json<User>)> {
    let user = state.accounts().register(form).await?;
    sign_in(&state, user.clone());
    Ok((StatusCode::CREATED, Json(user)))
}

#[instrument(skip(state, request), fields(email = %request.email))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<User>> {
    let password = SecretString::from(request.password);
    let user = state
        .accounts()
        .login(&request.email, &password)
        .await
        .inspect_err(|e| tracing::warn!("Login failed: {}", e))?;
    sign_in(&state, user.clone());
    Ok(Json(user))
}

#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> StatusCode {
    if state.auth().sign_out() {
        clear_sentry_user();
    }
    StatusCode::NO_CONTENT
}

/// The signed-in user.
pub async fn me(State(state): State<AppState>) -> Result<Json<User>> {
    state
        .auth()
        .current_user()
        .map(Json)
        .ok_or_else(|| AppError::Unauthorized("not signed in".to_string()))
}

fn sign_in(state: &AppState, user: User) {
    set_sentry_user(&user.id, Some(&user.email));
    state.auth().sign_in(user);
}
