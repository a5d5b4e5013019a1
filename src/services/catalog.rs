//! Reader catalog: search, book detail, self-service borrow and return

use crate::{
    api::ApiClient,
    error::ClientResult,
    models::{Book, BookQuery, BorrowRequest, CatalogSort},
};

/// Book detail view
#[derive(Debug, Clone, PartialEq)]
pub struct BookDetail {
    pub book: Book,
    pub image_url: Option<String>,
}

#[derive(Clone)]
pub struct CatalogService {
    client: ApiClient,
    asset_base_url: String,
}

impl CatalogService {
    pub fn new(client: ApiClient, asset_base_url: String) -> Self {
        Self {
            client,
            asset_base_url,
        }
    }

    /// Search by keyword (title, author or publisher), ordered by the server
    pub async fn search(&self, keyword: Option<&str>, sort: Option<CatalogSort>) -> ClientResult<Vec<Book>> {
        let query = BookQuery {
            sort,
            ..BookQuery::keyword(keyword)
        };
        let books = self.client.search_books(&query).await?;
        tracing::debug!(count = books.len(), "catalog search");
        Ok(books)
    }

    pub async fn detail(&self, id: i64) -> ClientResult<BookDetail> {
        let book = self.client.get_book(id).await?;
        let image_url = book.image_url(&self.asset_base_url);
        Ok(BookDetail { book, image_url })
    }

    /// Borrow a book and return its refreshed detail
    pub async fn borrow(&self, book_id: i64, user_id: Option<i64>) -> ClientResult<BookDetail> {
        self.client
            .borrow_book(&BorrowRequest { book_id, user_id })
            .await?;
        tracing::info!(book_id, "book borrowed");
        self.detail(book_id).await
    }

    /// Return a book and return its refreshed detail
    pub async fn give_back(&self, book_id: i64, user_id: Option<i64>) -> ClientResult<BookDetail> {
        self.client
            .return_book(&BorrowRequest { book_id, user_id })
            .await?;
        tracing::info!(book_id, "book returned");
        self.detail(book_id).await
    }
}
