use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::MessageKey;
use crate::book::errors::AuthorError;
use crate::book::errors::DescriptionError;
use crate::book::errors::TitleError;
use crate::book::errors::YearError;
use crate::domain::book::models::AuthorName;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookDescription;
use crate::domain::book::models::BookTitle;
use crate::domain::book::models::CreateBookCommand;
use crate::domain::book::models::PublicationYear;
use crate::inbound::http::router::AppState;

/// JSON body of `POST /books/` and `PUT /books/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BookRequest {
    pub title: String,
    pub author: String,
    pub description: String,
    pub year: i32,
}

#[derive(Debug, Clone, Error)]
pub enum ParseBookRequestError {
    #[error("Invalid title: {0}")]
    Title(#[from] TitleError),

    #[error("Invalid author: {0}")]
    Author(#[from] AuthorError),

    #[error("Invalid description: {0}")]
    Description(#[from] DescriptionError),

    #[error("Invalid year: {0}")]
    Year(#[from] YearError),
}

impl BookRequest {
    pub fn try_into_command(self) -> Result<CreateBookCommand, ParseBookRequestError> {
        Ok(CreateBookCommand {
            title: BookTitle::new(self.title)?,
            author: AuthorName::new(self.author)?,
            description: BookDescription::new(self.description)?,
            year: PublicationYear::new(self.year)?,
        })
    }
}

impl From<ParseBookRequestError> for ApiError {
    fn from(err: ParseBookRequestError) -> Self {
        match err {
            ParseBookRequestError::Title(e) => ApiError::validation("title", e.to_string()),
            ParseBookRequestError::Author(e) => ApiError::validation("author", e.to_string()),
            ParseBookRequestError::Description(e) => {
                ApiError::validation("description", e.to_string())
            }
            ParseBookRequestError::Year(e) => ApiError::validation("year", e.to_string()),
        }
    }
}

/// Serialized book view shared by every book endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookData {
    pub id: String,
    pub title: String,
    pub author: String,
    pub description: String,
    pub year: i32,
}

impl From<&Book> for BookData {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.to_string(),
            title: book.title.as_str().to_string(),
            author: book.author.as_str().to_string(),
            description: book.description.as_str().to_string(),
            year: book.year.value(),
        }
    }
}

pub async fn create_book(
    State(state): State<AppState>,
    Json(body): Json<BookRequest>,
) -> Result<ApiSuccess<BookData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .book_service
        .create_book(command)
        .await
        .map_err(ApiError::from)
        .map(|ref book| ApiSuccess::new(StatusCode::CREATED, MessageKey::BookCreated, book.into()))
}
