//! Loan (borrow) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::parse_day;

/// Loan state as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatus {
    Loaning,
    Returned,
    Late,
    ReturnLate,
    #[default]
    #[serde(other)]
    Unknown,
}

impl LoanStatus {
    pub fn label(&self) -> &'static str {
        match self {
            LoanStatus::Loaning => "On loan",
            LoanStatus::Returned => "Returned",
            LoanStatus::Late => "Overdue",
            LoanStatus::ReturnLate => "Returned late",
            LoanStatus::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Loan record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub loan_id: i64,
    #[serde(default)]
    pub book_id: Option<i64>,
    #[serde(default)]
    pub book_title: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub loan_date: Option<String>,
    #[serde(default)]
    pub return_expire_date: Option<String>,
    #[serde(default)]
    pub return_date: Option<String>,
    #[serde(default)]
    pub status: LoanStatus,
}

impl Loan {
    /// Status to display on `today`.
    ///
    /// A loan past its due date that has not been returned shows as `Late`,
    /// whatever the backend recorded.
    pub fn effective_status(&self, today: NaiveDate) -> LoanStatus {
        let overdue = self
            .return_expire_date
            .as_deref()
            .and_then(parse_day)
            .is_some_and(|due| due < today);

        if overdue && self.status != LoanStatus::Returned {
            LoanStatus::Late
        } else {
            self.status
        }
    }

    /// Copy of this loan carrying its effective status
    pub fn with_effective_status(mut self, today: NaiveDate) -> Self {
        self.status = self.effective_status(today);
        self
    }
}

/// Loan desk request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRequest {
    pub user_id: i64,
    pub book_id: i64,
    pub loan_date: NaiveDate,
}

/// Return desk request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequest {
    pub user_id: i64,
    pub book_id: i64,
    pub return_date: NaiveDate,
}

/// Self-service borrow/return request from the reader catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRequest {
    pub book_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

/// Borrow history row for administrators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRecord {
    pub id: i64,
    #[serde(default)]
    pub book_title: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub borrow_date: Option<String>,
    #[serde(default)]
    pub return_date: Option<String>,
    /// Display status, already localized by the backend
    #[serde(default)]
    pub status: String,
}

/// Coarse classification of a borrow history status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryTone {
    Overdue,
    Borrowed,
    Settled,
}

impl BorrowRecord {
    pub fn tone(&self) -> HistoryTone {
        match self.status.trim() {
            "연체" => HistoryTone::Overdue,
            "대출 중" => HistoryTone::Borrowed,
            _ => HistoryTone::Settled,
        }
    }
}
