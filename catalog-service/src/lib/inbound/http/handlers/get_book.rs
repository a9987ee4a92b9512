use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::create_book::BookData;
use super::ApiError;
use super::ApiSuccess;
use super::MessageKey;
use crate::domain::book::models::BookId;
use crate::inbound::http::router::AppState;

pub async fn get_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> Result<ApiSuccess<BookData>, ApiError> {
    let book_id = BookId::from_string(&book_id)
        .map_err(|e| ApiError::validation("book_id", e.to_string()))?;

    state
        .book_service
        .get_book(&book_id)
        .await
        .map_err(ApiError::from)
        .map(|ref book| ApiSuccess::new(StatusCode::OK, MessageKey::BookFetched, book.into()))
}
