//! Account handlers: login, create-account, refresh-token, whoami.

use axum::Json;
use axum::extract::State;

use loggy_core::error::AppError;

use crate::dto::request::CredentialsRequest;
use crate::dto::response::{TokenResponse, WhoAmIResponse};
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CredentialsRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = state.account_service.login(&req.email, &req.password).await?;
    Ok(Json(TokenResponse { token }))
}

/// POST /api/create-account
pub async fn create_account(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CredentialsRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = state
        .account_service
        .create_account(&req.email, &req.password)
        .await?;
    Ok(Json(TokenResponse { token }))
}

/// GET /api/refresh-token
pub async fn refresh_token(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Json<TokenResponse> {
    Json(TokenResponse {
        token: state.account_service.refresh_token(auth.context()),
    })
}

/// GET /api/whoami
pub async fn whoami(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<WhoAmIResponse>, AppError> {
    let person = state.account_service.whoami(auth.context()).await?;
    Ok(Json(person.into()))
}
