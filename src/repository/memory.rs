//! In-memory book repository

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::BookRepository;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookRecord, PageRequest},
};

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    books: BTreeMap<i64, Book>,
}

/// Book store held in process memory. Identifiers are never reused.
#[derive(Debug, Default)]
pub struct MemoryBookRepository {
    inner: RwLock<Inner>,
}

impl MemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn store(&self, record: &BookRecord) -> AppResult<Book> {
        let mut inner = self.inner.write().await;

        if inner
            .books
            .values()
            .any(|b| b.isbn == record.isbn && Some(b.id) != record.id)
        {
            return Err(AppError::duplicate_isbn());
        }

        let id = match record.id {
            Some(id) if inner.books.contains_key(&id) => id,
            Some(_) => return Err(AppError::book_not_found()),
            None => {
                inner.next_id += 1;
                inner.next_id
            }
        };

        let book = record.clone().into_book(id);
        inner.books.insert(id, book.clone());
        Ok(book)
    }

    async fn fetch(&self, id: i64) -> AppResult<Option<Book>> {
        Ok(self.inner.read().await.books.get(&id).cloned())
    }

    async fn fetch_page(&self, page: PageRequest) -> AppResult<(Vec<Book>, i64)> {
        let inner = self.inner.read().await;
        let books = inner
            .books
            .values()
            .skip(page.offset() as usize)
            .take(page.size as usize)
            .cloned()
            .collect();
        Ok((books, inner.books.len() as i64))
    }

    async fn fetch_by_author_or_title_prefix(&self, prefix: &str) -> AppResult<Vec<Book>> {
        Ok(self
            .inner
            .read()
            .await
            .books
            .values()
            .filter(|b| b.author.starts_with(prefix) || b.title.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn remove(&self, id: i64) -> AppResult<()> {
        self.inner.write().await.books.remove(&id);
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
