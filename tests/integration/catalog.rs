//! Reader catalog against the mocked API

use mini_library::{
    cli::{dispatch, Command, SelfServiceArgs},
    error::ClientError,
    models::CatalogSort,
    AppState,
};
use serde_json::json;
use wiremock::{
    matchers::{body_json, method, path, query_param},
    Mock, ResponseTemplate,
};

use crate::common::spawn;

#[tokio::test]
async fn search_sends_keyword_and_sort() {
    let app = spawn().await;
    Mock::given(method("GET"))
        .and(path("/api/books"))
        .and(query_param("keyword", "rust"))
        .and(query_param("sort", "year"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "title": "The Rust Book", "author": "Klabnik", "publisher": "No Starch", "year": 2019, "available": true },
            { "id": 2, "title": "Rust in Action", "author": "McNamara", "publisher": "Manning", "year": 2021, "available": false }
        ])))
        .expect(1)
        .mount(&app.server)
        .await;

    let books = app
        .services
        .catalog
        .search(Some("  rust "), Some(CatalogSort::Year))
        .await
        .unwrap();

    assert_eq!(books.len(), 2);
    assert_eq!(books[0].publish.as_deref(), Some("No Starch"));
    assert!(!books[1].is_available());
}

#[tokio::test]
async fn search_accepts_paged_listing() {
    let app = spawn().await;
    Mock::given(method("GET"))
        .and(path("/api/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{ "id": 3, "title": "Dune" }],
            "page": { "number": 0, "size": 10, "totalPages": 1, "totalElements": 1 }
        })))
        .mount(&app.server)
        .await;

    let books = app.services.catalog.search(None, None).await.unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title.as_deref(), Some("Dune"));
}

#[tokio::test]
async fn detail_accepts_wrapped_book_and_builds_image_url() {
    let app = spawn().await;
    Mock::given(method("GET"))
        .and(path("/api/books/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "book": { "id": 5, "title": "Dune", "bookImg": "/uploads/dune.png", "price": 12000 }
        })))
        .mount(&app.server)
        .await;

    let detail = app.services.catalog.detail(5).await.unwrap();
    assert_eq!(detail.book.id, 5);
    assert_eq!(
        detail.image_url,
        Some(format!("{}/uploads/dune.png", app.server.uri()))
    );
}

#[tokio::test]
async fn borrow_posts_then_refreshes_detail() {
    let app = spawn().await;
    Mock::given(method("POST"))
        .and(path("/api/borrow"))
        .and(body_json(json!({ "bookId": 5, "userId": 7 })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/books/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5, "title": "Dune", "available": false
        })))
        .expect(1)
        .mount(&app.server)
        .await;

    let detail = app.services.catalog.borrow(5, Some(7)).await.unwrap();
    assert!(!detail.book.is_available());
}

#[tokio::test]
async fn return_without_user_omits_it() {
    let app = spawn().await;
    Mock::given(method("POST"))
        .and(path("/api/return"))
        .and(body_json(json!({ "bookId": 5 })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/books/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 5, "available": true })))
        .mount(&app.server)
        .await;

    let detail = app.services.catalog.give_back(5, None).await.unwrap();
    assert!(detail.book.is_available());
}

#[tokio::test]
async fn backend_errors_are_mapped() {
    let app = spawn().await;
    Mock::given(method("POST"))
        .and(path("/api/borrow"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({ "message": "already on loan" })))
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/books/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/books"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database down"))
        .mount(&app.server)
        .await;

    let err = app.services.catalog.borrow(1, None).await.unwrap_err();
    assert!(matches!(err, ClientError::Conflict(ref m) if m == "already on loan"));

    let err = app.services.catalog.detail(404).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));

    let err = app.services.catalog.search(None, None).await.unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "database down");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn borrow_command_reuses_the_guard_session() {
    let app = spawn().await;
    Mock::given(method("GET"))
        .and(path("/api/user/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": { "id": 7, "username": "kim", "role": "USER" }
        })))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/borrow"))
        .and(body_json(json!({ "bookId": 5, "userId": 7 })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/books/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 5, "title": "Dune", "available": false })))
        .mount(&app.server)
        .await;

    let state = AppState::new(app.config.clone()).unwrap();
    let output = dispatch(
        Command::Borrow(SelfServiceArgs {
            book_id: 5,
            user: None,
        }),
        &state,
    )
    .await
    .unwrap();
    assert!(output.starts_with("Book borrowed."));
}
