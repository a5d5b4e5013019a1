//! Client-side table sorting and pagination controls

use std::ops::RangeInclusive;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{parse_day, Book, PageMeta};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Sortable column of the book management table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BookColumn {
    Id,
    Title,
    Author,
    Publish,
    PublishDate,
    Price,
}

impl BookColumn {
    pub const ALL: [BookColumn; 6] = [
        BookColumn::Id,
        BookColumn::Title,
        BookColumn::Author,
        BookColumn::Publish,
        BookColumn::PublishDate,
        BookColumn::Price,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            BookColumn::Id => "ID",
            BookColumn::Title => "Title",
            BookColumn::Author => "Author",
            BookColumn::Publish => "Publisher",
            BookColumn::PublishDate => "Published",
            BookColumn::Price => "Price",
        }
    }
}

impl std::str::FromStr for BookColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "id" => Ok(BookColumn::Id),
            "title" => Ok(BookColumn::Title),
            "author" => Ok(BookColumn::Author),
            "publish" | "publisher" => Ok(BookColumn::Publish),
            "publishdate" | "date" => Ok(BookColumn::PublishDate),
            "price" => Ok(BookColumn::Price),
            _ => Err(format!("Invalid column: {}", s)),
        }
    }
}

/// Active sort of a table. `field == None` means server order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub field: Option<BookColumn>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn by(field: BookColumn, direction: SortDirection) -> Self {
        Self {
            field: Some(field),
            direction,
        }
    }

    /// Header click: the active column flips from ascending to descending,
    /// anything else starts ascending.
    pub fn toggle(self, field: BookColumn) -> Self {
        let direction = if self.field == Some(field) && self.direction == SortDirection::Asc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        Self::by(field, direction)
    }

    /// Marker drawn next to a column header
    pub fn marker(&self, column: BookColumn) -> &'static str {
        match (self.field == Some(column), self.direction) {
            (false, _) => "↕",
            (true, SortDirection::Asc) => "▲",
            (true, SortDirection::Desc) => "▼",
        }
    }

    pub fn apply(&self, books: &mut [Book]) {
        if let Some(field) = self.field {
            sort_books(books, field, self.direction);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Number(i64),
    Date(Option<NaiveDate>),
    Text(String),
}

fn text_key(value: Option<&str>) -> SortKey {
    SortKey::Text(value.map(str::trim).unwrap_or_default().to_string())
}

fn sort_key(book: &Book, field: BookColumn) -> SortKey {
    match field {
        BookColumn::Id => SortKey::Number(book.id),
        BookColumn::Price => SortKey::Number(book.price.unwrap_or(0)),
        BookColumn::PublishDate => SortKey::Date(book.publish_date.as_deref().and_then(parse_day)),
        BookColumn::Title => text_key(book.title.as_deref()),
        BookColumn::Author => text_key(book.author.as_deref()),
        BookColumn::Publish => text_key(book.publish.as_deref()),
    }
}

/// Stable in-place sort of the rows currently shown
pub fn sort_books(books: &mut [Book], field: BookColumn, direction: SortDirection) {
    books.sort_by(|a, b| {
        let ordering = sort_key(a, field).cmp(&sort_key(b, field));
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Navigation state for a paginated table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub meta: PageMeta,
    pub window: u32,
}

impl Pager {
    pub fn new(meta: PageMeta, window: u32) -> Self {
        Self { meta, window }
    }

    pub fn current(&self) -> u32 {
        self.meta.number
    }

    /// Controls are only drawn for multi-page listings
    pub fn is_visible(&self) -> bool {
        self.meta.total_pages > 1
    }

    /// 0-based page numbers shown around the current page
    pub fn page_numbers(&self) -> RangeInclusive<u32> {
        let start = self.current().saturating_sub(self.window);
        let Some(last_page) = self.meta.total_pages.checked_sub(1) else {
            // Empty range
            return 1..=0;
        };
        let end = last_page.min(self.current().saturating_add(self.window));
        start..=end
    }

    pub fn first(&self) -> Option<u32> {
        (!self.meta.is_first()).then_some(0)
    }

    pub fn prev(&self) -> Option<u32> {
        if self.meta.is_first() {
            return None;
        }
        self.current().checked_sub(1)
    }

    pub fn next(&self) -> Option<u32> {
        (!self.meta.is_last()).then(|| self.current() + 1)
    }

    pub fn last(&self) -> Option<u32> {
        if self.meta.is_last() {
            return None;
        }
        self.meta.total_pages.checked_sub(1)
    }
}
