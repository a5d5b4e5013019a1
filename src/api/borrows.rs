//! Borrow history endpoint

use serde::Serialize;

use crate::error::ClientResult;
use crate::models::{BorrowRecord, Listing};

use super::ApiClient;

#[derive(Serialize)]
struct HistoryQuery<'a> {
    keyword: &'a str,
}

impl ApiClient {
    /// Borrow history, optionally filtered by member name or book title
    pub async fn borrow_history(&self, keyword: &str) -> ClientResult<Vec<BorrowRecord>> {
        let query = HistoryQuery {
            keyword: keyword.trim(),
        };
        let listing: Listing<BorrowRecord> = self.get_json_with("/admin/borrows", &query).await?;
        Ok(listing.into_items())
    }
}
