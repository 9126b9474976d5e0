//! Book model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 2000;

/// Stored book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    /// Publication date (YYYY-MM-DD)
    pub published_date: NaiveDate,
    /// Unique across all books
    pub isbn: String,
}

/// Create / update book request.
///
/// Fields are optional so that missing values surface as validation
/// messages instead of JSON decoding failures. `id` is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookInput {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub published_date: Option<NaiveDate>,
    pub isbn: Option<String>,
}

/// Validated book fields ready to be persisted.
/// `id` is `None` for a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    pub id: Option<i64>,
    pub title: String,
    pub author: String,
    pub published_date: NaiveDate,
    pub isbn: String,
}

impl BookRecord {
    pub fn into_book(self, id: i64) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            published_date: self.published_date,
            isbn: self.isbn,
        }
    }
}

/// Pagination query parameters
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Zero-based page number (default: 0)
    pub page: Option<i64>,
    /// Page size (default: 20, max: 2000)
    pub size: Option<i64>,
}

/// Normalized page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
}

impl PageRequest {
    pub fn new(page: i64, size: i64) -> Self {
        PageQuery {
            page: Some(page),
            size: Some(size),
        }
        .into()
    }

    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }
}

impl From<PageQuery> for PageRequest {
    fn from(query: PageQuery) -> Self {
        let page = query.page.unwrap_or(0).max(0);
        let size = match query.size {
            Some(size) if size < 1 => DEFAULT_PAGE_SIZE,
            Some(size) => size.min(MAX_PAGE_SIZE),
            None => DEFAULT_PAGE_SIZE,
        };
        Self { page, size }
    }
}

/// One page of books with pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPage {
    pub content: Vec<Book>,
    /// Current page number (zero-based)
    pub number: i64,
    /// Requested page size
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
    pub number_of_elements: i64,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl BookPage {
    pub fn new(content: Vec<Book>, request: PageRequest, total_elements: i64) -> Self {
        let total_pages = if request.size > 0 {
            (total_elements + request.size - 1) / request.size
        } else {
            0
        };
        let number_of_elements = content.len() as i64;
        Self {
            number: request.page,
            size: request.size,
            total_elements,
            total_pages,
            number_of_elements,
            first: request.page == 0,
            last: request.page.saturating_add(1) >= total_pages,
            empty: content.is_empty(),
            content,
        }
    }
}

/// Author/title prefix search parameters
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Prefix matched against author and title (case-sensitive)
    #[serde(rename = "searchText")]
    pub search_text: String,
}
