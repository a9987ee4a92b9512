use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::book::errors::BookError;
use crate::domain::book::models::AuthorName;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookDescription;
use crate::domain::book::models::BookId;
use crate::domain::book::models::BookTitle;
use crate::domain::book::models::PublicationYear;
use crate::domain::book::ports::BookRepository;

pub struct PostgresBookRepository {
    pool: PgPool,
}

impl PostgresBookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_book(row: &PgRow) -> Result<Book, BookError> {
    let db_err = |e: sqlx::Error| BookError::DatabaseError(e.to_string());

    Ok(Book {
        id: BookId(row.try_get::<Uuid, _>("id").map_err(db_err)?),
        title: BookTitle::new(row.try_get::<String, _>("title").map_err(db_err)?)?,
        author: AuthorName::new(row.try_get::<String, _>("author").map_err(db_err)?)?,
        description: BookDescription::new(
            row.try_get::<String, _>("description").map_err(db_err)?,
        )?,
        year: PublicationYear::new(row.try_get::<i32, _>("year").map_err(db_err)?)?,
    })
}

#[async_trait]
impl BookRepository for PostgresBookRepository {
    async fn create(&self, book: Book) -> Result<Book, BookError> {
        sqlx::query(
            r#"
            INSERT INTO books (id, title, author, description, year)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(book.id.0)
        .bind(book.title.as_str())
        .bind(book.author.as_str())
        .bind(book.description.as_str())
        .bind(book.year.value())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                // Unique index on title closes the check-then-insert race
                if db_err.is_unique_violation() {
                    return BookError::TitleTaken(book.title.as_str().to_string());
                }
            }
            BookError::DatabaseError(e.to_string())
        })?;

        Ok(book)
    }

    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, BookError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, author, description, year
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        row.as_ref().map(row_to_book).transpose()
    }

    async fn find_by_title(&self, title: &BookTitle) -> Result<Option<Book>, BookError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, author, description, year
            FROM books
            WHERE title = $1
            "#,
        )
        .bind(title.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        row.as_ref().map(row_to_book).transpose()
    }

    async fn find_by_title_excluding(
        &self,
        title: &BookTitle,
        excluded: &BookId,
    ) -> Result<Option<Book>, BookError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, author, description, year
            FROM books
            WHERE title = $1 AND id <> $2
            "#,
        )
        .bind(title.as_str())
        .bind(excluded.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        row.as_ref().map(row_to_book).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Book>, BookError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, author, description, year
            FROM books
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        rows.iter().map(row_to_book).collect()
    }

    async fn update(&self, book: Book) -> Result<Book, BookError> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = $2, author = $3, description = $4, year = $5
            WHERE id = $1
            "#,
        )
        .bind(book.id.0)
        .bind(book.title.as_str())
        .bind(book.author.as_str())
        .bind(book.description.as_str())
        .bind(book.year.value())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return BookError::TitleTaken(book.title.as_str().to_string());
                }
            }
            BookError::DatabaseError(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            return Err(BookError::NotFound(book.id.to_string()));
        }

        Ok(book)
    }

    async fn delete(&self, id: &BookId) -> Result<(), BookError> {
        let result = sqlx::query(
            r#"
            DELETE FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(BookError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
