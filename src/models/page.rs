//! Paginated listings

use serde::{Deserialize, Serialize};

/// Pagination metadata sent next to a page of content.
///
/// `first`/`last` are not always present; they are derived from the page
/// number when missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<bool>,
}

impl PageMeta {
    pub fn is_first(&self) -> bool {
        self.first.unwrap_or(self.number == 0)
    }

    pub fn is_last(&self) -> bool {
        self.last
            .unwrap_or(self.number.saturating_add(1) >= self.total_pages)
    }
}

/// One page of a server-side paginated listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: PageMeta,
}

impl<T: Clone> Page<T> {
    /// Cut page `number` (0-based) out of an unpaginated list
    pub fn from_slice(items: &[T], number: u32, size: u32) -> Self {
        let size = size.max(1);
        let total_elements = items.len() as u64;
        let total_pages = items.len().div_ceil(size as usize) as u32;
        let number = number.min(total_pages.saturating_sub(1));
        let start = number as usize * size as usize;
        let content = items.iter().skip(start).take(size as usize).cloned().collect();

        Page {
            content,
            page: PageMeta {
                number,
                size,
                total_pages,
                total_elements,
                first: Some(number == 0),
                last: Some(number + 1 >= total_pages),
            },
        }
    }
}

/// Listing endpoints answer either with a bare array or with a page
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Paged(Page<T>),
    Items(Vec<T>),
}

impl<T> Listing<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Listing::Paged(page) => page.content,
            Listing::Items(items) => items,
        }
    }
}
