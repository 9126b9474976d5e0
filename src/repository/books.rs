//! Books repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::BookRepository;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookRecord, PageRequest},
};

/// Name of the unique constraint on `books.isbn` (see migrations)
const ISBN_CONSTRAINT: &str = "books_isbn_key";

#[derive(Clone)]
pub struct PgBookRepository {
    pool: Pool<Postgres>,
}

impl PgBookRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Translate a unique violation on the isbn constraint into `DuplicateKey`
fn map_write_error(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() && db_err.constraint() == Some(ISBN_CONSTRAINT) {
            return AppError::duplicate_isbn();
        }
    }
    AppError::Database(err)
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn store(&self, record: &BookRecord) -> AppResult<Book> {
        match record.id {
            None => sqlx::query_as::<_, Book>(
                r#"
                INSERT INTO books (title, author, published_date, isbn)
                VALUES ($1, $2, $3, $4)
                RETURNING id, title, author, published_date, isbn
                "#,
            )
            .bind(&record.title)
            .bind(&record.author)
            .bind(record.published_date)
            .bind(&record.isbn)
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error),
            Some(id) => sqlx::query_as::<_, Book>(
                r#"
                UPDATE books
                SET title = $2, author = $3, published_date = $4, isbn = $5
                WHERE id = $1
                RETURNING id, title, author, published_date, isbn
                "#,
            )
            .bind(id)
            .bind(&record.title)
            .bind(&record.author)
            .bind(record.published_date)
            .bind(&record.isbn)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)?
            // Removed between the caller's existence check and the write
            .ok_or_else(AppError::book_not_found),
        }
    }

    async fn fetch(&self, id: i64) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT id, title, author, published_date, isbn FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }

    async fn fetch_page(&self, page: PageRequest) -> AppResult<(Vec<Book>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;

        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, published_date, isbn
            FROM books
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.size)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok((books, total))
    }

    async fn fetch_by_author_or_title_prefix(&self, prefix: &str) -> AppResult<Vec<Book>> {
        // starts_with() keeps % and _ in the search text literal
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, published_date, isbn
            FROM books
            WHERE starts_with(author, $1) OR starts_with(title, $1)
            ORDER BY id
            "#,
        )
        .bind(prefix)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    async fn remove(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
