//! Repository layer for database operations

pub mod books;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::book::{Book, BookRecord, PageRequest},
};

/// Data access for book records.
///
/// Existence is not checked by `remove`; callers decide "not found" first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Insert the record (no id) or replace the record with the given id.
    /// Fails with `AppError::DuplicateKey` when another book owns the isbn.
    async fn store(&self, record: &BookRecord) -> AppResult<Book>;

    async fn fetch(&self, id: i64) -> AppResult<Option<Book>>;

    /// One page of books ordered by id, plus the total number of books
    async fn fetch_page(&self, page: PageRequest) -> AppResult<(Vec<Book>, i64)>;

    /// Books whose author or title starts with `prefix` (case-sensitive)
    async fn fetch_by_author_or_title_prefix(&self, prefix: &str) -> AppResult<Vec<Book>>;

    async fn remove(&self, id: i64) -> AppResult<()>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct holding the data access objects
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookRepository>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self::with_books(Arc::new(books::PgBookRepository::new(pool)))
    }

    /// Repository keeping every record in process memory
    pub fn in_memory() -> Self {
        Self::with_books(Arc::new(memory::MemoryBookRepository::new()))
    }

    pub fn with_books(books: Arc<dyn BookRepository>) -> Self {
        Self { books }
    }
}
