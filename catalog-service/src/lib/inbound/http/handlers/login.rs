use axum::extract::State;
use axum::http::StatusCode;
use axum::Form;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::MessageKey;
use crate::inbound::http::router::AppState;

/// Form body of `POST /token` (OAuth2 password-style login).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub access_token: String,
    pub token_type: String,
}

pub async fn login(
    State(state): State<AppState>,
    Form(body): Form<LoginRequest>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let issued = state
        .user_service
        .login(&body.username, &body.password)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageKey::LoginSuccess,
        LoginResponseData {
            access_token: issued.access_token,
            token_type: "bearer".to_string(),
        },
    ))
}
