//! In-process router tests over the in-memory repository

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use bookshelf_server::{api::create_router, repository::Repository, AppState};

fn app() -> Router {
    create_router(AppState::new(Repository::in_memory()))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app.clone().oneshot(request).await.expect("Failed to send request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    (status, bytes.to_vec())
}

async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let value = serde_json::from_slice(&bytes).expect("Failed to parse response");
    (status, value)
}

fn learn_java() -> Value {
    json!({
        "author": "Yogesh",
        "title": "Learn Java",
        "publishedDate": "2025-01-25",
        "isbn": "12345"
    })
}

fn core_java() -> Value {
    json!({
        "author": "Mohit",
        "title": "Core Java",
        "publishedDate": "2024-06-01",
        "isbn": "123456"
    })
}

#[tokio::test]
async fn test_book_lifecycle() {
    let app = app();

    let (status, created) = send_json(&app, Method::POST, "/api/books", Some(learn_java())).await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_i64().expect("No book ID");
    assert_eq!(created["title"], "Learn Java");
    assert_eq!(created["publishedDate"], "2025-01-25");

    let (status, fetched) = send_json(&app, Method::GET, &format!("/api/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let mut changed = learn_java();
    changed["author"] = json!("Yogesh Updated");
    let (status, updated) =
        send_json(&app, Method::PUT, &format!("/api/books/{}", id), Some(changed)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id);
    assert_eq!(updated["author"], "Yogesh Updated");
    assert_eq!(updated["isbn"], "12345");

    let (status, body) = send(&app, Method::DELETE, &format!("/api/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), "Book Deleted");

    let (status, error) = send_json(&app, Method::GET, &format!("/api/books/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["message"], "Book not found");
}

#[tokio::test]
async fn test_duplicate_isbn_is_bad_request() {
    let app = app();
    send_json(&app, Method::POST, "/api/books", Some(learn_java())).await;

    let mut duplicate = core_java();
    duplicate["isbn"] = json!("12345");
    let (status, error) = send_json(&app, Method::POST, "/api/books", Some(duplicate)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["message"], "Book with the same ISBN already exists");
}

#[tokio::test]
async fn test_update_to_taken_isbn_is_bad_request() {
    let app = app();
    send_json(&app, Method::POST, "/api/books", Some(learn_java())).await;
    let (_, second) = send_json(&app, Method::POST, "/api/books", Some(core_java())).await;

    let mut body = core_java();
    body["isbn"] = json!("12345");
    let uri = format!("/api/books/{}", second["id"]);
    let (status, error) = send_json(&app, Method::PUT, &uri, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "Duplicate");
}

#[tokio::test]
async fn test_invalid_input_message() {
    let app = app();
    let mut body = learn_java();
    body["author"] = json!("");

    let (status, error) = send_json(&app, Method::POST, "/api/books", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["message"], "Author cannot be null or empty");
}

#[tokio::test]
async fn test_malformed_date_is_bad_request() {
    let app = app();
    let mut body = learn_java();
    body["publishedDate"] = json!("25/01/2025");

    let (status, error) = send_json(&app, Method::POST, "/api/books", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "BadValue");
}

#[tokio::test]
async fn test_update_missing_book() {
    let app = app();
    let (status, error) = send_json(&app, Method::PUT, "/api/books/99", Some(learn_java())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["message"], "Book not found");

    let (_, page) = send_json(&app, Method::GET, "/api/books", None).await;
    assert_eq!(page["totalElements"], 0);
}

#[tokio::test]
async fn test_delete_missing_book() {
    let (status, _) = send_json(&app(), Method::DELETE, "/api/books/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_books_page() {
    let app = app();
    send_json(&app, Method::POST, "/api/books", Some(learn_java())).await;
    send_json(&app, Method::POST, "/api/books", Some(core_java())).await;

    let (status, page) = send_json(&app, Method::GET, "/api/books?page=0&size=5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["content"][0]["author"], "Yogesh");
    assert_eq!(page["content"][1]["author"], "Mohit");
    assert_eq!(page["totalElements"], 2);
    assert_eq!(page["number"], 0);
    assert_eq!(page["size"], 5);

    let (_, page) = send_json(&app, Method::GET, "/api/books?page=1&size=1", None).await;
    assert_eq!(page["content"].as_array().unwrap().len(), 1);
    assert_eq!(page["content"][0]["author"], "Mohit");
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["last"], true);
}

#[tokio::test]
async fn test_list_books_past_last_page() {
    let app = app();
    send_json(&app, Method::POST, "/api/books", Some(learn_java())).await;
    send_json(&app, Method::POST, "/api/books", Some(core_java())).await;

    let uri = format!("/api/books?page={}&size=5", i64::MAX);
    let (status, page) = send_json(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page["content"].as_array().unwrap().is_empty());
    assert_eq!(page["number"], i64::MAX);
    assert_eq!(page["totalElements"], 2);
    assert_eq!(page["last"], true);
    assert_eq!(page["empty"], true);
}

#[tokio::test]
async fn test_search() {
    let app = app();
    send_json(&app, Method::POST, "/api/books", Some(learn_java())).await;
    send_json(&app, Method::POST, "/api/books", Some(core_java())).await;

    let (status, hits) = send_json(&app, Method::GET, "/api/search?searchText=Yo", None).await;
    assert_eq!(status, StatusCode::OK);
    let hits = hits.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["title"], "Learn Java");

    let (_, hits) = send_json(&app, Method::GET, "/api/search?searchText=", None).await;
    assert_eq!(hits.as_array().unwrap().len(), 2);

    let (status, hits) = send_json(&app, Method::GET, "/api/search?searchText=zzz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(hits.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_health_and_readiness() {
    let app = app();
    let (status, body) = send_json(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send_json(&app, Method::GET, "/api/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}
