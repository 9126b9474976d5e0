//! Book record service

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookInput, BookPage, BookRecord, PageRequest},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

/// Check required fields in order: title, author, published date, isbn.
/// Only the first failure is reported.
pub fn validate(input: &BookInput, id: Option<i64>) -> AppResult<BookRecord> {
    fn required(value: &Option<String>, message: &str) -> AppResult<String> {
        match value {
            Some(v) if !v.is_empty() => Ok(v.clone()),
            _ => Err(AppError::Validation(message.to_string())),
        }
    }

    let title = required(&input.title, "Title cannot be null or empty")?;
    let author = required(&input.author, "Author cannot be null or empty")?;
    let published_date = input
        .published_date
        .ok_or_else(|| AppError::Validation("Published Date cannot be null".to_string()))?;
    let isbn = required(&input.isbn, "ISBN cannot be null or empty")?;

    Ok(BookRecord {
        id,
        title,
        author,
        published_date,
        isbn,
    })
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a new book. Isbn uniqueness is left to the store.
    pub async fn create(&self, input: &BookInput) -> AppResult<Book> {
        let record = validate(input, None)?;
        let book = self.repository.books.store(&record).await?;
        tracing::info!("Created book id={} isbn={}", book.id, book.isbn);
        Ok(book)
    }

    /// List one page of books
    pub async fn list_page(&self, page: PageRequest) -> AppResult<BookPage> {
        let (books, total) = self.repository.books.fetch_page(page).await?;
        Ok(BookPage::new(books, page, total))
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        self.repository
            .books
            .fetch(id)
            .await?
            .ok_or_else(AppError::book_not_found)
    }

    /// Replace every field of an existing book; the id comes from the path
    pub async fn update_by_id(&self, id: i64, input: &BookInput) -> AppResult<Book> {
        let record = validate(input, Some(id))?;
        self.get_by_id(id).await?;

        let book = self.repository.books.store(&record).await?;
        tracing::info!("Updated book id={}", book.id);
        Ok(book)
    }

    pub async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        self.get_by_id(id).await?;
        self.repository.books.remove(id).await?;
        tracing::info!("Deleted book id={}", id);
        Ok(())
    }

    /// Books whose author or title starts with `text`. Never fails on no match.
    pub async fn search(&self, text: &str) -> AppResult<Vec<Book>> {
        self.repository.books.fetch_by_author_or_title_prefix(text).await
    }
}
