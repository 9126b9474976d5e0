//! Business logic services

pub mod books;

use crate::{error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            books: books::BooksService::new(repository.clone()),
            repository,
        }
    }

    /// Check that storage is reachable
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.books.ping().await
    }
}
