use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::create_book::BookData;
use super::create_book::BookRequest;
use super::ApiError;
use super::ApiSuccess;
use super::MessageKey;
use crate::domain::book::models::BookId;
use crate::domain::book::models::UpdateBookCommand;
use crate::inbound::http::router::AppState;

pub async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
    Json(body): Json<BookRequest>,
) -> Result<ApiSuccess<BookData>, ApiError> {
    let book_id = BookId::from_string(&book_id)
        .map_err(|e| ApiError::validation("book_id", e.to_string()))?;

    // PUT semantics: the same validated fields as create, replacing all of
    // them at once.
    let create = body.try_into_command()?;
    let command = UpdateBookCommand {
        title: create.title,
        author: create.author,
        description: create.description,
        year: create.year,
    };

    state
        .book_service
        .update_book(&book_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref book| ApiSuccess::new(StatusCode::OK, MessageKey::BookUpdated, book.into()))
}
