//! Loan desk endpoints

use reqwest::Method;

use crate::error::ClientResult;
use crate::models::{Listing, Loan, LoanRequest, ReturnRequest};

use super::ApiClient;

impl ApiClient {
    pub async fn list_loans(&self) -> ClientResult<Vec<Loan>> {
        let listing: Listing<Loan> = self.get_json("/loan").await?;
        Ok(listing.into_items())
    }

    pub async fn loans_by_user(&self, user_id: i64) -> ClientResult<Vec<Loan>> {
        let listing: Listing<Loan> = self.get_json(&format!("/loan/user/{}", user_id)).await?;
        Ok(listing.into_items())
    }

    pub async fn loans_by_book(&self, book_id: i64) -> ClientResult<Vec<Loan>> {
        let listing: Listing<Loan> = self.get_json(&format!("/loan/book/{}", book_id)).await?;
        Ok(listing.into_items())
    }

    pub async fn create_loan(&self, request: &LoanRequest) -> ClientResult<()> {
        self.send_json(Method::POST, "/loan", request).await
    }

    pub async fn return_loan(&self, request: &ReturnRequest) -> ClientResult<()> {
        self.send_json(Method::PUT, "/loan/return", request).await
    }
}
