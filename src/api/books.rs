//! Book catalog endpoints

use reqwest::Method;
use serde::Deserialize;

use crate::error::ClientResult;
use crate::models::{Book, BookPayload, BookQuery, BorrowRequest, Listing, Page};

use super::ApiClient;

/// Detail endpoint answers with the book itself or wrapped in `book`
#[derive(Deserialize)]
#[serde(untagged)]
enum BookEnvelope {
    Wrapped { book: Book },
    Bare(Book),
}

impl ApiClient {
    /// Reader catalog search
    pub async fn search_books(&self, query: &BookQuery) -> ClientResult<Vec<Book>> {
        let listing: Listing<Book> = self.get_json_with("/books", query).await?;
        Ok(listing.into_items())
    }

    pub async fn get_book(&self, id: i64) -> ClientResult<Book> {
        let envelope: BookEnvelope = self.get_json(&format!("/books/{}", id)).await?;
        Ok(match envelope {
            BookEnvelope::Wrapped { book } => book,
            BookEnvelope::Bare(book) => book,
        })
    }

    pub async fn borrow_book(&self, request: &BorrowRequest) -> ClientResult<()> {
        self.send_json(Method::POST, "/borrow", request).await
    }

    pub async fn return_book(&self, request: &BorrowRequest) -> ClientResult<()> {
        self.send_json(Method::POST, "/return", request).await
    }

    /// Administrative paginated listing
    pub async fn list_books(&self, query: &BookQuery) -> ClientResult<Page<Book>> {
        self.get_json_with("/admin/books", query).await
    }

    pub async fn create_book(&self, payload: &BookPayload) -> ClientResult<()> {
        self.send_json(Method::POST, "/admin/books", payload).await
    }

    pub async fn update_book(&self, id: i64, payload: &BookPayload) -> ClientResult<()> {
        self.send_json(Method::PUT, &format!("/admin/books/{}", id), payload)
            .await
    }

    pub async fn delete_book(&self, id: i64) -> ClientResult<()> {
        self.send_empty(Method::DELETE, &format!("/admin/books/{}", id))
            .await
    }
}
