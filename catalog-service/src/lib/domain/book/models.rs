use std::fmt;

use uuid::Uuid;

use crate::book::errors::AuthorError;
use crate::book::errors::BookIdError;
use crate::book::errors::DescriptionError;
use crate::book::errors::TitleError;
use crate::book::errors::YearError;

/// Book catalog entry.
///
/// Ids are generated server-side; titles are unique across the collection.
#[derive(Debug, Clone)]
pub struct Book {
    pub id: BookId,
    pub title: BookTitle,
    pub author: AuthorName,
    pub description: BookDescription,
    pub year: PublicationYear,
}

/// Book unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookId(pub Uuid);

impl BookId {
    /// Generate a new random book ID (UUID v4).
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a book ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, BookIdError> {
        Uuid::parse_str(s)
            .map(BookId)
            .map_err(|e| BookIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Book title value type, 1-100 characters, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookTitle(String);

impl BookTitle {
    const MAX_LENGTH: usize = 100;

    /// Create a validated title. Surrounding whitespace is trimmed first.
    ///
    /// # Errors
    /// * `Empty` - nothing left after trimming
    /// * `TooLong` - more than 100 characters
    pub fn new(title: String) -> Result<Self, TitleError> {
        let title = title.trim().to_string();
        let length = title.chars().count();
        if length == 0 {
            Err(TitleError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(TitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(title))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Author name value type, 1-50 characters, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorName(String);

impl AuthorName {
    const MAX_LENGTH: usize = 50;

    /// # Errors
    /// * `Empty` - nothing left after trimming
    /// * `TooLong` - more than 50 characters
    pub fn new(author: String) -> Result<Self, AuthorError> {
        let author = author.trim().to_string();
        let length = author.chars().count();
        if length == 0 {
            Err(AuthorError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(AuthorError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(author))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Book description value type, 10-1000 characters, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDescription(String);

impl BookDescription {
    const MIN_LENGTH: usize = 10;
    const MAX_LENGTH: usize = 1000;

    /// # Errors
    /// * `TooShort` - fewer than 10 characters after trimming
    /// * `TooLong` - more than 1000 characters
    pub fn new(description: String) -> Result<Self, DescriptionError> {
        let description = description.trim().to_string();
        let length = description.chars().count();
        if length < Self::MIN_LENGTH {
            Err(DescriptionError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(DescriptionError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(description))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Publication year value type, 0-2100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicationYear(i32);

impl PublicationYear {
    const MIN: i32 = 0;
    const MAX: i32 = 2100;

    /// # Errors
    /// * `OutOfRange` - outside 0..=2100
    pub fn new(year: i32) -> Result<Self, YearError> {
        if (Self::MIN..=Self::MAX).contains(&year) {
            Ok(Self(year))
        } else {
            Err(YearError::OutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: year,
            })
        }
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

/// Command to create a book; all fields already validated.
#[derive(Debug)]
pub struct CreateBookCommand {
    pub title: BookTitle,
    pub author: AuthorName,
    pub description: BookDescription,
    pub year: PublicationYear,
}

/// Command to replace every mutable field of an existing book (PUT semantics).
#[derive(Debug)]
pub struct UpdateBookCommand {
    pub title: BookTitle,
    pub author: AuthorName,
    pub description: BookDescription,
    pub year: PublicationYear,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_is_trimmed() {
        let title = BookTitle::new("  Dune  ".to_string()).unwrap();
        assert_eq!(title.as_str(), "Dune");
    }

    #[test]
    fn test_title_rejects_whitespace_only() {
        assert!(matches!(
            BookTitle::new("   ".to_string()),
            Err(TitleError::Empty)
        ));
    }

    #[test]
    fn test_title_rejects_over_100_chars() {
        let result = BookTitle::new("x".repeat(101));
        assert!(matches!(result, Err(TitleError::TooLong { .. })));
    }

    #[test]
    fn test_author_rejects_over_50_chars() {
        let result = AuthorName::new("x".repeat(51));
        assert!(matches!(result, Err(AuthorError::TooLong { .. })));
    }

    #[test]
    fn test_description_rejects_under_10_chars() {
        let result = BookDescription::new("too short".to_string());
        assert!(matches!(result, Err(DescriptionError::TooShort { .. })));
    }

    #[test]
    fn test_year_bounds() {
        assert!(PublicationYear::new(0).is_ok());
        assert!(PublicationYear::new(2100).is_ok());
        assert!(matches!(
            PublicationYear::new(-1),
            Err(YearError::OutOfRange { .. })
        ));
        assert!(matches!(
            PublicationYear::new(2101),
            Err(YearError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_book_id_parse_roundtrip() {
        let id = BookId::new();
        let parsed = BookId::from_string(&id.to_string()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_book_id_rejects_garbage() {
        assert!(BookId::from_string("not-a-uuid").is_err());
    }
}
