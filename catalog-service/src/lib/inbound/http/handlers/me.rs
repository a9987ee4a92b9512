use axum::http::StatusCode;
use axum::Extension;

use super::register::UserData;
use super::ApiError;
use super::ApiSuccess;
use super::MessageKey;
use crate::inbound::http::middleware::CurrentUser;

pub async fn me(
    Extension(current_user): Extension<CurrentUser>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageKey::UserFetched,
        UserData {
            username: current_user.username,
            email: current_user.email,
            full_name: current_user.full_name,
            disabled: current_user.disabled,
        },
    ))
}
