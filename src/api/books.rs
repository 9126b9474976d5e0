//! Book endpoints
//!
//! Successful responses carry JSON books, except delete which answers with a
//! plain-text confirmation. Every error answers with a JSON `ErrorResponse`.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};

use crate::{
    error::{AppResult, ErrorResponse},
    models::book::{Book, BookInput, BookPage, PageQuery, SearchQuery},
};

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookInput,
    responses(
        (status = 200, description = "Book created", body = Book),
        (status = 400, description = "Invalid input or duplicate ISBN", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    payload: Result<Json<BookInput>, JsonRejection>,
) -> AppResult<Json<Book>> {
    let Json(input) = payload?;
    let book = state.services.books.create(&input).await?;
    Ok(Json(book))
}

/// List books with pagination
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of books", body = BookPage),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<BookPage>> {
    let page = state.services.books.list_page(query.into()).await?;
    Ok(Json(page))
}

/// Get book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.get_by_id(id).await?;
    Ok(Json(book))
}

/// Replace a book's details
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    request_body = BookInput,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid input or duplicate ISBN", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<BookInput>, JsonRejection>,
) -> AppResult<Json<Book>> {
    let Json(input) = payload?;
    let book = state.services.books.update_by_id(id, &input).await?;
    Ok(Json(book))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted, plain-text body \"Book Deleted\"",
            body = String, content_type = "text/plain"),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<&'static str> {
    state.services.books.delete_by_id(id).await?;
    Ok("Book Deleted")
}

/// Search books by author or title prefix
#[utoipa::path(
    get,
    path = "/search",
    tag = "books",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching books, possibly empty", body = Vec<Book>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn search_books(
    State(state): State<crate::AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.search(&query.search_text).await?;
    Ok(Json(books))
}
