use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::book::errors::BookError;
use crate::book::import::ImportError;
use crate::user::errors::UserError;

pub mod create_book;
pub mod delete_book;
pub mod get_book;
pub mod import_csv;
pub mod list_books;
pub mod login;
pub mod me;
pub mod register;
pub mod update_book;

/// Stable machine-readable tokens carried in every response envelope.
///
/// Clients key localization off these; they are part of the API contract
/// and never contain human sentences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageKey {
    LoginSuccess,
    InvalidCredentials,
    NotAuthenticated,
    RegisterSuccess,
    UsernameExists,
    UserFetched,
    BooksFetched,
    BookCreated,
    BookFetched,
    BookUpdated,
    BookDeleted,
    BookNotFound,
    TitleExists,
    FileMustBeCsv,
    CsvImported,
    EmptyImport,
    DuplicateEntries,
    TooManyRows,
    InvalidRow,
    ValidationError,
    InternalError,
}

/// Uniform wrapper around every API response body.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    pub message_key: MessageKey,
    pub data: Option<T>,
    pub errors: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<Envelope<T>>);

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(status: StatusCode, message_key: MessageKey, data: T) -> Self {
        ApiSuccess(
            status,
            Json(Envelope {
                success: true,
                message_key,
                data: Some(data),
                errors: None,
            }),
        )
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Typed failure carried from handlers (and middleware) to the boundary.
///
/// Each variant corresponds to one envelope shape; nothing internal leaks
/// through `Internal`.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    NotAuthenticated,
    InvalidCredentials,
    UsernameExists(String),
    TitleExists(String),
    BookNotFound(String),
    FileMustBeCsv,
    EmptyImport,
    DuplicateEntries,
    TooManyRows { count: usize, limit: usize },
    InvalidRow { line: usize, reason: String },
    Validation(serde_json::Value),
    Internal(String),
}

impl ApiError {
    /// Field-level validation failure (422).
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        ApiError::Validation(json!([{ "field": field, "message": message.into() }]))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message_key, errors) = match self {
            ApiError::NotAuthenticated => (StatusCode::UNAUTHORIZED, MessageKey::NotAuthenticated, None),
            ApiError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, MessageKey::InvalidCredentials, None)
            }
            ApiError::UsernameExists(username) => (
                StatusCode::BAD_REQUEST,
                MessageKey::UsernameExists,
                Some(json!({ "username": username })),
            ),
            ApiError::TitleExists(title) => (
                StatusCode::BAD_REQUEST,
                MessageKey::TitleExists,
                Some(json!({ "title": title })),
            ),
            ApiError::BookNotFound(id) => (
                StatusCode::NOT_FOUND,
                MessageKey::BookNotFound,
                Some(json!({ "id": id })),
            ),
            ApiError::FileMustBeCsv => (StatusCode::BAD_REQUEST, MessageKey::FileMustBeCsv, None),
            ApiError::EmptyImport => (StatusCode::BAD_REQUEST, MessageKey::EmptyImport, None),
            ApiError::DuplicateEntries => {
                (StatusCode::BAD_REQUEST, MessageKey::DuplicateEntries, None)
            }
            ApiError::TooManyRows { count, limit } => (
                StatusCode::BAD_REQUEST,
                MessageKey::TooManyRows,
                Some(json!({ "count": count, "limit": limit })),
            ),
            ApiError::InvalidRow { line, reason } => (
                StatusCode::BAD_REQUEST,
                MessageKey::InvalidRow,
                Some(json!({ "line": line, "reason": reason })),
            ),
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                MessageKey::ValidationError,
                Some(errors),
            ),
            ApiError::Internal(detail) => {
                // Logged here, never sent to the caller.
                tracing::error!(detail = %detail, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, MessageKey::InternalError, None)
            }
        };

        let body: Envelope<()> = Envelope {
            success: false,
            message_key,
            data: None,
            errors,
        };

        (status, Json(body)).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::UsernameTaken(username) => ApiError::UsernameExists(username),
            UserError::InvalidCredentials => ApiError::InvalidCredentials,
            UserError::NotFound(_) => ApiError::NotAuthenticated,
            UserError::InvalidUsername(e) => ApiError::validation("username", e.to_string()),
            UserError::InvalidEmail(e) => ApiError::validation("email", e.to_string()),
            UserError::Password(detail)
            | UserError::Token(detail)
            | UserError::DatabaseError(detail)
            | UserError::Unknown(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<BookError> for ApiError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::NotFound(id) => ApiError::BookNotFound(id),
            BookError::TitleTaken(title) => ApiError::TitleExists(title),
            BookError::InvalidId(e) => ApiError::validation("book_id", e.to_string()),
            BookError::InvalidTitle(e) => ApiError::validation("title", e.to_string()),
            BookError::InvalidAuthor(e) => ApiError::validation("author", e.to_string()),
            BookError::InvalidDescription(e) => ApiError::validation("description", e.to_string()),
            BookError::InvalidYear(e) => ApiError::validation("year", e.to_string()),
            BookError::DatabaseError(detail) | BookError::Unknown(detail) => {
                ApiError::Internal(detail)
            }
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Empty => ApiError::EmptyImport,
            ImportError::DuplicateEntries => ApiError::DuplicateEntries,
            ImportError::TooManyRows { count, limit } => ApiError::TooManyRows { count, limit },
            ImportError::InvalidRow { line, reason } => ApiError::InvalidRow { line, reason },
            ImportError::Book(e) => ApiError::from(e),
        }
    }
}
