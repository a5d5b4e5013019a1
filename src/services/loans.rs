//! Loan and return desk

use chrono::NaiveDate;

use crate::{
    api::ApiClient,
    error::ClientResult,
    forms::DeskForm,
    models::{Loan, LoanRequest, ReturnRequest},
};

#[derive(Clone)]
pub struct LoanDeskService {
    client: ApiClient,
}

impl LoanDeskService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Lend a book, dated `today`
    pub async fn loan(&self, form: DeskForm, today: NaiveDate) -> ClientResult<()> {
        form.check()?;
        let request = LoanRequest {
            user_id: form.user_id,
            book_id: form.book_id,
            loan_date: today,
        };
        self.client.create_loan(&request).await?;
        tracing::info!(user_id = form.user_id, book_id = form.book_id, "loan recorded");
        Ok(())
    }

    /// Take a book back, dated `today`
    pub async fn give_back(&self, form: DeskForm, today: NaiveDate) -> ClientResult<()> {
        form.check()?;
        let request = ReturnRequest {
            user_id: form.user_id,
            book_id: form.book_id,
            return_date: today,
        };
        self.client.return_loan(&request).await?;
        tracing::info!(user_id = form.user_id, book_id = form.book_id, "return recorded");
        Ok(())
    }

    /// Every loan of a book, with overdue loans flagged as of `today`
    pub async fn book_loans(&self, book_id: i64, today: NaiveDate) -> ClientResult<Vec<Loan>> {
        let loans = self.client.loans_by_book(book_id).await?;
        Ok(loans
            .into_iter()
            .map(|loan| loan.with_effective_status(today))
            .collect())
    }

    /// All loans, with overdue loans flagged as of `today`
    pub async fn all(&self, today: NaiveDate) -> ClientResult<Vec<Loan>> {
        let loans = self.client.list_loans().await?;
        Ok(loans
            .into_iter()
            .map(|loan| loan.with_effective_status(today))
            .collect())
    }
}
