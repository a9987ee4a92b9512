use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::MessageKey;
use crate::domain::book::models::BookId;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteBookResponseData {
    pub id: String,
}

pub async fn delete_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> Result<ApiSuccess<DeleteBookResponseData>, ApiError> {
    let book_id = BookId::from_string(&book_id)
        .map_err(|e| ApiError::validation("book_id", e.to_string()))?;

    state
        .book_service
        .delete_book(&book_id)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                MessageKey::BookDeleted,
                DeleteBookResponseData {
                    id: book_id.to_string(),
                },
            )
        })
}
