//! Book management against the mocked API

use mini_library::{
    error::ClientError,
    forms::BookField,
    models::SearchField,
    services::books::SaveOutcome,
    table::{BookColumn, SortDirection, SortState},
};
use serde_json::json;
use wiremock::{
    matchers::{any, body_json, body_string_contains, method, path, query_param},
    Mock, ResponseTemplate,
};

use crate::common::spawn;

fn page_body() -> serde_json::Value {
    json!({
        "content": [
            { "id": 1, "title": "Dune", "author": "Herbert", "publish": "Ace", "publishDate": "1965-08-01", "price": 9000 },
            { "id": 2, "title": "Emma", "author": "Austen", "publish": "Murray", "publishDate": "1815-12-23", "price": 15000 },
            { "id": 3, "title": "Beloved", "author": "Morrison", "publish": "Knopf", "publishDate": "1987-09-02", "price": 12000 }
        ],
        "page": { "number": 1, "size": 3, "totalPages": 4, "totalElements": 11 }
    })
}

#[tokio::test]
async fn list_fetches_page_and_sorts_it_locally() {
    let app = spawn().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/books"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body()))
        .expect(1)
        .mount(&app.server)
        .await;

    let mut table = app
        .services
        .books
        .list(1, SortState::by(BookColumn::Price, SortDirection::Desc))
        .await
        .unwrap();

    let ids: Vec<i64> = table.books.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![2, 3, 1]);
    assert_eq!(table.pager.current(), 1);
    assert_eq!(table.pager.prev(), Some(0));
    assert_eq!(table.pager.last(), Some(3));

    table.sort_by_header(BookColumn::Title);
    let titles: Vec<&str> = table.books.iter().filter_map(|b| b.title.as_deref()).collect();
    assert_eq!(titles, vec!["Beloved", "Dune", "Emma"]);
}

#[tokio::test]
async fn search_starts_from_first_page() {
    let app = spawn().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/books"))
        .and(query_param("keyword", "dune"))
        .and(query_param("searchBy", "title"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{ "id": 1, "title": "Dune" }],
            "page": { "number": 0, "size": 10, "totalPages": 1, "totalElements": 1 }
        })))
        .expect(1)
        .mount(&app.server)
        .await;

    let table = app
        .services
        .books
        .search(Some(SearchField::Title), "dune", SortState::default())
        .await
        .unwrap();
    assert_eq!(table.books.len(), 1);
    assert!(!table.pager.is_visible());
}

#[tokio::test]
async fn invalid_form_sends_nothing() {
    let app = spawn().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.server)
        .await;

    let mut editor = app.services.books.open_new();
    editor.set(BookField::Title, "Dune");
    editor.set(BookField::PublishDate, "next year");

    let err = app.services.books.save(&mut editor).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert!(editor.errors.get("author").is_some());
    assert!(editor.errors.get("publish_date").is_some());
    assert!(editor.errors.get("title").is_none());

    editor.set(BookField::Author, "Herbert");
    assert!(editor.errors.get("author").is_none());
}

#[tokio::test]
async fn new_book_is_posted() {
    let app = spawn().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/books"))
        .and(body_json(json!({
            "title": "Dune",
            "author": "Herbert",
            "publish": "Ace",
            "bookImg": "",
            "publishDate": "1965-08-01",
            "price": 9000
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&app.server)
        .await;

    let mut editor = app.services.books.open_new();
    editor.set(BookField::Title, " Dune ");
    editor.set(BookField::Author, "Herbert");
    editor.set(BookField::Publish, "Ace");
    editor.set(BookField::PublishDate, "1965-08-01");
    editor.set(BookField::Price, "9000.7");

    let outcome = app.services.books.save(&mut editor).await.unwrap();
    assert_eq!(outcome, SaveOutcome::Created);
    assert!(editor.errors.is_empty());
}

#[tokio::test]
async fn edit_prefills_and_puts_changes() {
    let app = spawn().await;
    Mock::given(method("GET"))
        .and(path("/api/books/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 2, "title": "Emma", "author": "Austen", "publish": "Murray",
            "publishDate": "1815-12-23", "price": 15000, "bookImg": "/uploads/emma.png"
        })))
        .mount(&app.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/admin/books/2"))
        .and(body_json(json!({
            "title": "Emma",
            "author": "Austen",
            "publish": "Murray",
            "bookImg": "",
            "publishDate": "1815-12-23",
            "price": 16000
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.server)
        .await;

    let mut editor = app.services.books.open_edit(2).await.unwrap();
    assert_eq!(editor.form.title, "Emma");
    assert!(!editor.image_changed());

    editor.set(BookField::Price, "16000");
    editor.form.remove_image();
    assert!(editor.image_changed());

    let outcome = app.services.books.save(&mut editor).await.unwrap();
    assert_eq!(outcome, SaveOutcome::Updated(2));
}

#[tokio::test]
async fn delete_needs_confirmation() {
    let app = spawn().await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/books/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&app.server)
        .await;

    let err = app.services.books.delete(3, false).await.unwrap_err();
    assert!(matches!(err, ClientError::NotConfirmed(_)));

    app.services.books.delete(3, true).await.unwrap();
}

#[tokio::test]
async fn upload_puts_stored_path_on_form() {
    let app = spawn().await;
    Mock::given(method("POST"))
        .and(path("/api/files/upload"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("cover.png"))
        .respond_with(ResponseTemplate::new(200).set_body_string("/uploads/2024/cover.png\n"))
        .expect(1)
        .mount(&app.server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let cover = dir.path().join("cover.png");
    std::fs::write(&cover, b"not really a png").unwrap();

    let mut editor = app.services.books.open_new();
    let stored = app.services.books.upload_image(&mut editor, &cover).await.unwrap();
    assert_eq!(stored, "/uploads/2024/cover.png");
    assert_eq!(editor.form.book_img, "/uploads/2024/cover.png");
}
