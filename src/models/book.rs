//! Book (catalog entry) model and related types

use serde::{Deserialize, Serialize};

/// Book as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    /// Publisher; the catalog search endpoint names it `publisher`
    #[serde(default, alias = "publisher")]
    pub publish: Option<String>,
    #[serde(default)]
    pub book_img: Option<String>,
    #[serde(default)]
    pub publish_date: Option<String>,
    /// Publication year, only sent by the catalog search endpoint
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub available: Option<bool>,
}

impl Book {
    /// Books without an explicit flag count as available
    pub fn is_available(&self) -> bool {
        self.available.unwrap_or(true)
    }

    /// Publication year, from `year` or the leading part of `publishDate`
    pub fn publication_year(&self) -> Option<i32> {
        self.year.or_else(|| {
            self.publish_date
                .as_deref()
                .and_then(|d| d.trim().get(..4))
                .and_then(|y| y.parse().ok())
        })
    }

    /// Absolute image URL, joined onto the asset origin
    pub fn image_url(&self, asset_base_url: &str) -> Option<String> {
        let path = self.book_img.as_deref().map(str::trim).filter(|p| !p.is_empty())?;
        if path.starts_with("http://") || path.starts_with("https://") {
            return Some(path.to_string());
        }
        Some(format!("{}{}", asset_base_url.trim_end_matches('/'), path))
    }
}

/// Body sent when creating or updating a book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    pub title: String,
    pub author: String,
    pub publish: String,
    pub book_img: String,
    pub publish_date: String,
    pub price: i64,
}

/// Field an administrator searches books by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchField {
    Title,
    Author,
    Publish,
}

impl SearchField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Author => "author",
            SearchField::Publish => "publish",
        }
    }
}

impl std::str::FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" => Ok(SearchField::Title),
            "author" => Ok(SearchField::Author),
            "publish" | "publisher" => Ok(SearchField::Publish),
            _ => Err(format!("Invalid search field: {}", s)),
        }
    }
}

/// Server-side ordering offered by the reader catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSort {
    Title,
    Author,
    Publisher,
    Year,
}

impl CatalogSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogSort::Title => "title",
            CatalogSort::Author => "author",
            CatalogSort::Publisher => "publisher",
            CatalogSort::Year => "year",
        }
    }
}

impl std::str::FromStr for CatalogSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" => Ok(CatalogSort::Title),
            "author" => Ok(CatalogSort::Author),
            "publisher" => Ok(CatalogSort::Publisher),
            "year" => Ok(CatalogSort::Year),
            _ => Err(format!("Invalid sort key: {}", s)),
        }
    }
}

/// Query parameters for book listings. Empty values are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_by: Option<SearchField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<CatalogSort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl BookQuery {
    pub fn keyword(keyword: Option<&str>) -> Self {
        Self {
            keyword: keyword
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string),
            ..Self::default()
        }
    }
}
