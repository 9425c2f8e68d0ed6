//! Authentication handlers: register, login, logout, who-am-i.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header::SET_COOKIE},
    response::{AppendHeaders, IntoResponse},
};
use serde::Serialize;
use tracing::{info, instrument};

use crate::account::models::{LoginRequest, RegisterRequest};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::auth::{CurrentUser, clear_session_cookie, session_cookie};

/// Plain message response body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

/// Username-only response body. The token never appears in a body.
#[derive(Debug, Serialize)]
pub struct UsernameResponse {
    pub username: String,
}

/// Register endpoint.
///
/// Succeeds without issuing a session; the client logs in separately.
#[instrument(skip(state, request))]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    let (Some(sequence_id), Some(username), Some(secret)) =
        (request.sequence_id, request.username, request.secret)
    else {
        return Err(ApiError::validation("All fields are required"));
    };

    if username.is_empty() || secret.is_empty() {
        return Err(ApiError::validation("All fields are required"));
    }

    state.accounts.register(sequence_id, &username, &secret).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

/// Login endpoint. Sets the session cookie on success.
///
/// Unknown usernames and wrong secrets produce the identical error so the
/// response never confirms whether an account exists.
#[instrument(skip(state, request))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let (Some(username), Some(secret)) = (request.username, request.secret) else {
        return Err(ApiError::InvalidCredentials);
    };

    let account = state
        .accounts
        .verify_credentials(&username, &secret)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    let token = state.auth.issue_token(account.id, &account.username)?;
    let cookie = session_cookie(&token, state.auth.production_mode());

    info!(account_id = account.id, "Account logged in");

    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(UsernameResponse {
            username: account.username,
        }),
    ))
}

/// Logout endpoint. Instructs the client to drop the session cookie.
///
/// Tokens are stateless and carry no server-side revocation: a token copied
/// before logout stays valid until its natural expiry.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let cookie = clear_session_cookie(state.auth.production_mode());

    (
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(MessageResponse::new("Logged out successfully")),
    )
}

/// Who-am-i endpoint for the authenticated principal.
///
/// The account is re-fetched: a structurally valid token whose account has
/// since been deleted yields 404, not a phantom identity.
#[instrument(skip(state))]
pub async fn me(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<UsernameResponse>> {
    let account = state
        .accounts
        .get(user.account_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(UsernameResponse {
        username: account.username,
    }))
}
