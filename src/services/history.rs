//! Borrow history

use crate::{api::ApiClient, error::ClientResult, models::BorrowRecord};

#[derive(Clone)]
pub struct HistoryService {
    client: ApiClient,
}

impl HistoryService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// History filtered by member name or book title; empty keyword lists everything
    pub async fn search(&self, keyword: &str) -> ClientResult<Vec<BorrowRecord>> {
        self.client.borrow_history(keyword).await
    }
}
