use async_trait::async_trait;

use crate::book::errors::BookError;
use crate::book::import::ImportError;
use crate::book::import::ImportReport;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookId;
use crate::domain::book::models::BookTitle;
use crate::domain::book::models::CreateBookCommand;
use crate::domain::book::models::UpdateBookCommand;

/// Port for book domain service operations.
///
/// Every mutating operation follows existence check, conflict check,
/// mutate, respond.
#[async_trait]
pub trait BookServicePort: Send + Sync + 'static {
    /// Create a new book with a server-generated id.
    ///
    /// # Errors
    /// * `TitleTaken` - another book already holds this title
    /// * `DatabaseError` - store operation failed
    async fn create_book(&self, command: CreateBookCommand) -> Result<Book, BookError>;

    /// Retrieve a book by id.
    ///
    /// # Errors
    /// * `NotFound` - no book with this id
    /// * `DatabaseError` - store operation failed
    async fn get_book(&self, id: &BookId) -> Result<Book, BookError>;

    /// Retrieve every book. Order is unspecified (insertion order in
    /// practice).
    ///
    /// # Errors
    /// * `DatabaseError` - store operation failed
    async fn list_books(&self) -> Result<Vec<Book>, BookError>;

    /// Replace all mutable fields of an existing book.
    ///
    /// # Errors
    /// * `NotFound` - no book with this id
    /// * `TitleTaken` - a different book already holds the new title
    /// * `DatabaseError` - store operation failed
    async fn update_book(&self, id: &BookId, command: UpdateBookCommand)
        -> Result<Book, BookError>;

    /// Delete a book by id.
    ///
    /// # Errors
    /// * `NotFound` - no book with this id
    /// * `DatabaseError` - store operation failed
    async fn delete_book(&self, id: &BookId) -> Result<(), BookError>;

    /// Run the CSV bulk import pipeline over raw file contents.
    ///
    /// Rows are validated and inserted one at a time in file order;
    /// post-conditions (empty import, duplicate generated ids, row limit)
    /// are checked only after all rows are written. A mid-stream failure
    /// leaves previously inserted rows persisted.
    async fn import_books(&self, data: &[u8]) -> Result<ImportReport, ImportError>;
}

/// Persistence operations for the books collection.
#[async_trait]
pub trait BookRepository: Send + Sync + 'static {
    /// Persist a new book.
    ///
    /// # Errors
    /// * `TitleTaken` - unique title index rejected the insert
    /// * `DatabaseError` - store operation failed
    async fn create(&self, book: Book) -> Result<Book, BookError>;

    /// Retrieve a book by id.
    ///
    /// # Errors
    /// * `DatabaseError` - store operation failed
    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, BookError>;

    /// Retrieve a book by exact title.
    ///
    /// # Errors
    /// * `DatabaseError` - store operation failed
    async fn find_by_title(&self, title: &BookTitle) -> Result<Option<Book>, BookError>;

    /// Retrieve a book holding `title` whose id differs from `excluded`.
    ///
    /// # Errors
    /// * `DatabaseError` - store operation failed
    async fn find_by_title_excluding(
        &self,
        title: &BookTitle,
        excluded: &BookId,
    ) -> Result<Option<Book>, BookError>;

    /// Retrieve all books.
    ///
    /// # Errors
    /// * `DatabaseError` - store operation failed
    async fn list_all(&self) -> Result<Vec<Book>, BookError>;

    /// Replace an existing book's mutable fields.
    ///
    /// # Errors
    /// * `NotFound` - no book with this id
    /// * `TitleTaken` - unique title index rejected the update
    /// * `DatabaseError` - store operation failed
    async fn update(&self, book: Book) -> Result<Book, BookError>;

    /// Remove a book.
    ///
    /// # Errors
    /// * `NotFound` - no book with this id
    /// * `DatabaseError` - store operation failed
    async fn delete(&self, id: &BookId) -> Result<(), BookError>;
}
