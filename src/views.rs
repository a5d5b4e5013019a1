//! Plain-text rendering of the application screens

use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use crate::{
    forms::FormErrors,
    models::{loan::HistoryTone, parse_day, Book, BorrowRecord, Loan, User},
    routes::MenuEntry,
    services::{books::BookTable, catalog::BookDetail, users::UserDetail},
    table::{BookColumn, Pager},
};

const MISSING: &str = "-";

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn text(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(MISSING)
        .to_string()
}

/// `12000` → `12,000원`
pub fn format_price(price: Option<i64>) -> String {
    let Some(price) = price else {
        return MISSING.to_string();
    };

    let digits = price.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if price < 0 { "-" } else { "" };
    format!("{}{}원", sign, grouped)
}

/// Dates are shown as `YYYY. M. D.`, or verbatim when unparseable
pub fn format_date(value: Option<&str>) -> String {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => MISSING.to_string(),
        Some(raw) => parse_day(raw)
            .map(|d: NaiveDate| d.format("%Y. %-m. %-d.").to_string())
            .unwrap_or_else(|| raw.to_string()),
    }
}

fn availability(book: &Book) -> &'static str {
    if book.is_available() {
        "Available"
    } else {
        "On loan"
    }
}

/// Reader catalog results
pub fn catalog(books: &[Book]) -> String {
    if books.is_empty() {
        return "No books found.".to_string();
    }

    let mut table = new_table();
    table.set_header(vec!["ID", "Title", "Author", "Publisher", "Year", "Status", "Action"]);
    for book in books {
        let action = if book.is_available() { "borrow" } else { "return" };
        table.add_row(vec![
            book.id.to_string(),
            text(book.title.as_deref()),
            text(book.author.as_deref()),
            text(book.publish.as_deref()),
            book.publication_year()
                .map(|y| y.to_string())
                .unwrap_or_else(|| MISSING.to_string()),
            availability(book).to_string(),
            action.to_string(),
        ]);
    }
    table.to_string()
}

pub fn book_detail(detail: &BookDetail) -> String {
    let book = &detail.book;
    let mut table = new_table();
    table.set_header(vec![text(book.title.as_deref()), String::new()]);
    table.add_row(vec!["Author".to_string(), text(book.author.as_deref())]);
    table.add_row(vec!["Publisher".to_string(), text(book.publish.as_deref())]);
    table.add_row(vec!["Published".to_string(), text(book.publish_date.as_deref())]);
    table.add_row(vec!["Price".to_string(), format_price(book.price)]);
    table.add_row(vec!["Book ID".to_string(), book.id.to_string()]);
    table.add_row(vec!["Status".to_string(), availability(book).to_string()]);
    table.add_row(vec![
        "Image".to_string(),
        detail.image_url.clone().unwrap_or_else(|| "No image".to_string()),
    ]);
    table.to_string()
}

/// Book management table with sort markers and pager
pub fn book_table(view: &BookTable) -> String {
    let mut out = String::new();
    if view.books.is_empty() {
        out.push_str("No books registered.");
    } else {
        let mut table = new_table();
        let mut header: Vec<String> = BookColumn::ALL
            .iter()
            .map(|c| format!("{} {}", c.header(), view.sort.marker(*c)))
            .collect();
        header.push("Action".to_string());
        table.set_header(header);

        for book in &view.books {
            table.add_row(vec![
                book.id.to_string(),
                text(book.title.as_deref()),
                text(book.author.as_deref()),
                text(book.publish.as_deref()),
                text(book.publish_date.as_deref()),
                format_price(book.price),
                format!("edit {0} | delete {0}", book.id),
            ]);
        }
        out.push_str(&table.to_string());
    }

    if let Some(line) = pager(&view.pager) {
        out.push('\n');
        out.push_str(&line);
    }
    out
}

/// Pager line, `None` for single-page listings.
///
/// Disabled controls are bracketed, the current page starred.
pub fn pager(pager: &Pager) -> Option<String> {
    if !pager.is_visible() {
        return None;
    }

    let control = |label: &str, target: Option<u32>| match target {
        Some(page) => format!("{}({})", label, page + 1),
        None => format!("[{}]", label),
    };

    let mut parts = vec![control("first", pager.first()), control("prev", pager.prev())];
    for page in pager.page_numbers() {
        if page == pager.current() {
            parts.push(format!("*{}*", page + 1));
        } else {
            parts.push((page + 1).to_string());
        }
    }
    parts.push(control("next", pager.next()));
    parts.push(control("last", pager.last()));

    Some(format!(
        "{}   (page {} of {}, {} total)",
        parts.join(" "),
        pager.current() + 1,
        pager.meta.total_pages,
        pager.meta.total_elements
    ))
}

pub fn users(users: &[User]) -> String {
    if users.is_empty() {
        return "No users registered.".to_string();
    }

    let mut table = new_table();
    table.set_header(vec!["ID", "Name", "Phone", "Memo"]);
    for user in users {
        table.add_row(vec![
            user.id.to_string(),
            text(user.display_name()),
            text(user.phone.as_deref()),
            text(user.notes()),
        ]);
    }
    table.to_string()
}

pub fn loans(loans: &[Loan]) -> String {
    if loans.is_empty() {
        return "No loans.".to_string();
    }

    let mut table = new_table();
    table.set_header(vec!["Loan ID", "Book", "Loaned", "Due", "Returned", "Status"]);
    for loan in loans {
        table.add_row(vec![
            loan.loan_id.to_string(),
            text(loan.book_title.as_deref()),
            format_date(loan.loan_date.as_deref()),
            format_date(loan.return_expire_date.as_deref()),
            format_date(loan.return_date.as_deref()),
            loan.status.label().to_string(),
        ]);
    }
    table.to_string()
}

pub fn user_detail(detail: &UserDetail) -> String {
    let user = &detail.user;
    let mut profile = new_table();
    profile.set_header(vec![
        text(user.display_name()),
        user.role.map(|r| r.to_string()).unwrap_or_else(|| MISSING.to_string()),
    ]);
    profile.add_row(vec!["ID".to_string(), user.id.to_string()]);
    profile.add_row(vec!["Phone".to_string(), text(user.phone.as_deref())]);
    profile.add_row(vec!["Department".to_string(), text(user.dept.as_deref())]);
    profile.add_row(vec![
        "Memo".to_string(),
        user.notes().unwrap_or("No memo").to_string(),
    ]);

    let mut out = profile.to_string();
    out.push_str("\n\nLoan history\n");
    out.push_str(&loans(&detail.loans.content));
    if let Some(line) = pager(&detail.pager) {
        out.push('\n');
        out.push_str(&line);
    }
    out
}

pub fn history(records: &[BorrowRecord]) -> String {
    if records.is_empty() {
        return "No borrow history.".to_string();
    }

    let mut table = new_table();
    table.set_header(vec!["Book", "User", "Borrowed", "Returned", "Status"]);
    for record in records {
        let marker = match record.tone() {
            HistoryTone::Overdue => "!",
            HistoryTone::Borrowed => "~",
            HistoryTone::Settled => "",
        };
        table.add_row(vec![
            text(record.book_title.as_deref()),
            text(record.user_name.as_deref()),
            text(record.borrow_date.as_deref()),
            record
                .return_date
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .unwrap_or("반납 안됨")
                .to_string(),
            format!("{}{}", marker, record.status),
        ]);
    }
    table.to_string()
}

pub fn form_errors(errors: &FormErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("  {}: {}", field, message))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn menu(entries: &[MenuEntry]) -> String {
    if entries.is_empty() {
        return "Not logged in. Run `mini-library login`.".to_string();
    }
    entries
        .iter()
        .map(|e| format!("{:<20} {:<16} mini-library {}", e.label, e.route.to_string(), e.command))
        .collect::<Vec<_>>()
        .join("\n")
}
