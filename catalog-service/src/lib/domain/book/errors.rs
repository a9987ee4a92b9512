use thiserror::Error;

/// Error for BookId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for BookTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TitleError {
    #[error("Title must not be empty")]
    Empty,

    #[error("Title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for AuthorName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorError {
    #[error("Author must not be empty")]
    Empty,

    #[error("Author too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for BookDescription validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DescriptionError {
    #[error("Description too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Description too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for PublicationYear validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum YearError {
    #[error("Year out of range: must be between {min} and {max}, got {actual}")]
    OutOfRange { min: i32, max: i32, actual: i32 },
}

/// Top-level error for all book-related operations
#[derive(Debug, Clone, Error)]
pub enum BookError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid book ID: {0}")]
    InvalidId(#[from] BookIdError),

    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] TitleError),

    #[error("Invalid author: {0}")]
    InvalidAuthor(#[from] AuthorError),

    #[error("Invalid description: {0}")]
    InvalidDescription(#[from] DescriptionError),

    #[error("Invalid year: {0}")]
    InvalidYear(#[from] YearError),

    // Domain-level errors
    #[error("Book not found: {0}")]
    NotFound(String),

    #[error("Book title already exists: {0}")]
    TitleTaken(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
