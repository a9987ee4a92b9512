use axum::extract::State;
use axum::http::StatusCode;

use super::create_book::BookData;
use super::ApiError;
use super::ApiSuccess;
use super::MessageKey;
use crate::inbound::http::router::AppState;

pub async fn list_books(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<BookData>>, ApiError> {
    state
        .book_service
        .list_books()
        .await
        .map_err(ApiError::from)
        .map(|books| {
            let data = books.iter().map(BookData::from).collect();
            ApiSuccess::new(StatusCode::OK, MessageKey::BooksFetched, data)
        })
}
