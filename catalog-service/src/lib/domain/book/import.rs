use serde::Deserialize;
use thiserror::Error;

use crate::book::errors::BookError;
use crate::domain::book::models::AuthorName;
use crate::domain::book::models::BookDescription;
use crate::domain::book::models::BookId;
use crate::domain::book::models::BookTitle;
use crate::domain::book::models::CreateBookCommand;
use crate::domain::book::models::PublicationYear;

/// Outcome of a completed CSV import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub ids: Vec<BookId>,
}

/// Failure modes of the CSV import pipeline.
///
/// `InvalidRow` aborts the import mid-stream; rows inserted before the
/// offending one stay persisted (no compensating rollback).
#[derive(Debug, Clone, Error)]
pub enum ImportError {
    #[error("Row {line} is invalid: {reason}")]
    InvalidRow { line: usize, reason: String },

    #[error("No rows were imported")]
    Empty,

    #[error("Duplicate generated ids in import")]
    DuplicateEntries,

    #[error("Imported {count} rows, limit is {limit}")]
    TooManyRows { count: usize, limit: usize },

    #[error(transparent)]
    Book(#[from] BookError),
}

/// One CSV data row as read from the file, mapped by header name.
///
/// `year` stays a string here so that an unparseable value is an explicit
/// row rejection rather than a silent zero.
#[derive(Debug, Deserialize)]
pub struct RawBookRow {
    pub title: String,
    pub author: String,
    pub description: String,
    pub year: String,
}

impl RawBookRow {
    /// Validate and normalize this row into a create command.
    ///
    /// Fields are trimmed and run through the same value objects as a
    /// single-book create. `line` is the 1-based file line, used in the
    /// rejection message.
    ///
    /// # Errors
    /// * `InvalidRow` - any field fails validation, or `year` is missing
    ///   or not an integer
    pub fn into_command(self, line: usize) -> Result<CreateBookCommand, ImportError> {
        let invalid = |reason: String| ImportError::InvalidRow { line, reason };

        let title = BookTitle::new(self.title).map_err(|e| invalid(e.to_string()))?;
        let author = AuthorName::new(self.author).map_err(|e| invalid(e.to_string()))?;
        let description =
            BookDescription::new(self.description).map_err(|e| invalid(e.to_string()))?;

        let year = self
            .year
            .trim()
            .parse::<i32>()
            .map_err(|_| invalid(format!("Year is not an integer: {:?}", self.year.trim())))?;
        let year = PublicationYear::new(year).map_err(|e| invalid(e.to_string()))?;

        Ok(CreateBookCommand {
            title,
            author,
            description,
            year,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(title: &str, author: &str, description: &str, year: &str) -> RawBookRow {
        RawBookRow {
            title: title.to_string(),
            author: author.to_string(),
            description: description.to_string(),
            year: year.to_string(),
        }
    }

    #[test]
    fn test_row_is_trimmed_and_validated() {
        let command = row("  Dune ", " Frank Herbert ", " Spice and sandworms. ", " 1965 ")
            .into_command(2)
            .unwrap();

        assert_eq!(command.title.as_str(), "Dune");
        assert_eq!(command.author.as_str(), "Frank Herbert");
        assert_eq!(command.description.as_str(), "Spice and sandworms.");
        assert_eq!(command.year.value(), 1965);
    }

    #[test]
    fn test_unparseable_year_rejects_the_row() {
        let result = row("Dune", "Frank Herbert", "Spice and sandworms.", "199x").into_command(4);

        match result {
            Err(ImportError::InvalidRow { line, reason }) => {
                assert_eq!(line, 4);
                assert!(reason.contains("not an integer"));
            }
            other => panic!("expected InvalidRow, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_year_rejects_the_row() {
        let result = row("Dune", "Frank Herbert", "Spice and sandworms.", "2200").into_command(2);
        assert!(matches!(result, Err(ImportError::InvalidRow { .. })));
    }

    #[test]
    fn test_invalid_field_carries_line_number() {
        let result = row("", "Frank Herbert", "Spice and sandworms.", "1965").into_command(7);
        assert!(matches!(
            result,
            Err(ImportError::InvalidRow { line: 7, .. })
        ));
    }
}
