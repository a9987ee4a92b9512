use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::book::errors::BookError;
use crate::book::import::ImportError;
use crate::book::import::ImportReport;
use crate::book::import::RawBookRow;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookId;
use crate::domain::book::models::CreateBookCommand;
use crate::domain::book::models::UpdateBookCommand;
use crate::domain::book::ports::BookRepository;
use crate::domain::book::ports::BookServicePort;

/// Domain service for book CRUD and the CSV import pipeline.
pub struct BookService<BR>
where
    BR: BookRepository,
{
    repository: Arc<BR>,
    max_import_rows: usize,
}

impl<BR> BookService<BR>
where
    BR: BookRepository,
{
    pub fn new(repository: Arc<BR>, max_import_rows: usize) -> Self {
        Self {
            repository,
            max_import_rows,
        }
    }
}

#[async_trait]
impl<BR> BookServicePort for BookService<BR>
where
    BR: BookRepository,
{
    async fn create_book(&self, command: CreateBookCommand) -> Result<Book, BookError> {
        // Pre-write lookup; the unique title index in the store closes the
        // remaining race between concurrent writers.
        if self.repository.find_by_title(&command.title).await?.is_some() {
            tracing::warn!(title = %command.title, "Book creation rejected, duplicate title");
            return Err(BookError::TitleTaken(command.title.to_string()));
        }

        let book = Book {
            id: BookId::new(),
            title: command.title,
            author: command.author,
            description: command.description,
            year: command.year,
        };

        let created = self.repository.create(book).await?;
        tracing::info!(id = %created.id, title = %created.title, "Book created");

        Ok(created)
    }

    async fn get_book(&self, id: &BookId) -> Result<Book, BookError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(BookError::NotFound(id.to_string()))
    }

    async fn list_books(&self) -> Result<Vec<Book>, BookError> {
        self.repository.list_all().await
    }

    async fn update_book(
        &self,
        id: &BookId,
        command: UpdateBookCommand,
    ) -> Result<Book, BookError> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(BookError::NotFound(id.to_string()));
        }

        // Re-using its own title is fine; only a different record holding
        // the new title is a conflict.
        if self
            .repository
            .find_by_title_excluding(&command.title, id)
            .await?
            .is_some()
        {
            tracing::warn!(id = %id, title = %command.title, "Book update rejected, duplicate title");
            return Err(BookError::TitleTaken(command.title.to_string()));
        }

        let book = Book {
            id: *id,
            title: command.title,
            author: command.author,
            description: command.description,
            year: command.year,
        };

        let updated = self.repository.update(book).await?;
        tracing::info!(id = %id, "Book updated");

        Ok(updated)
    }

    async fn delete_book(&self, id: &BookId) -> Result<(), BookError> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(BookError::NotFound(id.to_string()));
        }

        self.repository.delete(id).await?;
        tracing::info!(id = %id, "Book deleted");

        Ok(())
    }

    async fn import_books(&self, data: &[u8]) -> Result<ImportReport, ImportError> {
        let mut reader = csv::Reader::from_reader(data);
        let headers = reader
            .headers()
            .map_err(|e| ImportError::InvalidRow {
                line: 1,
                reason: e.to_string(),
            })?
            .clone();
        let mut ids: Vec<BookId> = Vec::new();

        for result in reader.records() {
            let record = result.map_err(|e| ImportError::InvalidRow {
                line: e.position().map_or(0, |p| p.line() as usize),
                reason: e.to_string(),
            })?;
            // Physical line where the record starts; a quoted field can
            // span several lines, so this is not the record index.
            let line = record.position().map_or(0, |p| p.line() as usize);

            let raw: RawBookRow = record
                .deserialize(Some(&headers))
                .map_err(|e| ImportError::InvalidRow {
                    line,
                    reason: e.to_string(),
                })?;
            let command = raw.into_command(line)?;

            let book = Book {
                id: BookId::new(),
                title: command.title,
                author: command.author,
                description: command.description,
                year: command.year,
            };

            // Inserted immediately, not batched; rows written before a
            // later failure stay persisted.
            let created = self.repository.create(book).await?;
            ids.push(created.id);
        }

        if ids.is_empty() {
            tracing::warn!("CSV import produced no rows");
            return Err(ImportError::Empty);
        }

        // UUID collision is vanishingly rare, but the duplicate check must
        // run before the count limit.
        let unique: HashSet<&BookId> = ids.iter().collect();
        if unique.len() != ids.len() {
            tracing::warn!("CSV import produced duplicate ids");
            return Err(ImportError::DuplicateEntries);
        }

        if ids.len() > self.max_import_rows {
            tracing::warn!(
                count = ids.len(),
                limit = self.max_import_rows,
                "CSV import exceeded row limit"
            );
            return Err(ImportError::TooManyRows {
                count: ids.len(),
                limit: self.max_import_rows,
            });
        }

        tracing::info!(imported = ids.len(), "CSV import completed");
        Ok(ImportReport {
            imported: ids.len(),
            ids,
        })
    }
}
