//! Data models exchanged with the library API

pub mod book;
pub mod loan;
pub mod page;
pub mod user;

// Re-export commonly used types
pub use book::{Book, BookPayload, BookQuery, CatalogSort, SearchField};
pub use loan::{BorrowRecord, BorrowRequest, Loan, LoanRequest, LoanStatus, ReturnRequest};
pub use page::{Listing, Page, PageMeta};
pub use user::{CurrentUser, LoginRequest, MeResponse, Role, User, UserPayload};

use chrono::NaiveDate;

/// Parse the calendar day at the start of a backend date string.
///
/// Accepts `2024-03-01` as well as `2024-03-01T10:00:00`.
pub fn parse_day(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let day = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}
