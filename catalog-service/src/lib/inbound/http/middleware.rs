use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type carrying the resolved caller through protected handlers.
///
/// Deliberately excludes the password digest.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub disabled: bool,
    pub superuser: bool,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.as_str().to_string(),
            email: user.email.as_ref().map(|e| e.as_str().to_string()),
            full_name: user.full_name.clone(),
            disabled: user.disabled,
            superuser: user.superuser,
        }
    }
}

/// Bearer-token gate for every protected route.
///
/// Walks one request from token extraction through subject resolution and
/// attaches the resolved user on success. Every failure mode - missing
/// header, bad signature, expired token, unknown subject, disabled account -
/// produces the same 401 `NOT_AUTHENTICATED` envelope, so a caller cannot
/// probe which check failed.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(&req).ok_or_else(rejection)?;

    let subject = state.token_service.verify(token).map_err(|e| {
        tracing::warn!(error = %e, "Token verification failed");
        rejection()
    })?;

    let username = Username::new(subject).map_err(|_| rejection())?;

    let user = state
        .user_service
        .resolve_subject(&username)
        .await
        .map_err(|e| {
            tracing::warn!(username = %username, error = %e, "Token subject did not resolve");
            rejection()
        })?;

    if user.disabled {
        tracing::warn!(username = %username, "Disabled account rejected");
        return Err(rejection());
    }

    req.extensions_mut().insert(CurrentUser::from(&user));

    Ok(next.run(req).await)
}

/// Layered behind [`authenticate`] on superuser-only routes.
///
/// Uses the same envelope as the rest of the gate: a caller cannot tell
/// "not privileged" apart from "not logged in".
pub async fn require_superuser(req: Request, next: Next) -> Result<Response, Response> {
    match req.extensions().get::<CurrentUser>() {
        Some(user) if user.superuser => Ok(next.run(req).await),
        _ => Err(rejection()),
    }
}

fn rejection() -> Response {
    ApiError::NotAuthenticated.into_response()
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let header = req.headers().get(http::header::AUTHORIZATION)?.to_str().ok()?;
    header.strip_prefix("Bearer ")
}
