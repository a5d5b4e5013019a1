//! Form state and validation for the administrative editors

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{ClientError, ClientResult};
use crate::models::{parse_day, Book, BookPayload, User, UserPayload};

/// Field name → message, in form order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(IndexMap<String, String>);

impl FormErrors {
    /// Collect validator errors following the order of `fields`
    fn from_validation(errors: &ValidationErrors, fields: &[&str]) -> Self {
        let by_field = errors.field_errors();
        let mut out = IndexMap::new();

        for field in fields {
            let message = by_field
                .iter()
                .find(|(name, _)| name.to_string() == *field)
                .and_then(|(_, errs)| errs.first())
                .map(|err| {
                    err.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string())
                });
            if let Some(message) = message {
                out.insert(field.to_string(), message);
            }
        }

        FormErrors(out)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self, field: &str) {
        self.0.shift_remove(field);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
        write!(f, "{}", parts.join("; "))
    }
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("required", "This field is required"));
    }
    Ok(())
}

fn valid_publish_date(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("required", "Please enter the publication date"));
    }
    if parse_day(value).is_none() {
        return Err(error("date", "Use the YYYY-MM-DD format"));
    }
    Ok(())
}

fn valid_price(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(error("required", "Please enter a price"));
    }
    match value.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(()),
        _ => Err(error("price", "Please enter a valid price")),
    }
}

/// Book editor. Fields hold raw input until submission.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct BookForm {
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    pub author: String,
    #[validate(custom(function = "not_blank"))]
    pub publish: String,
    pub book_img: String,
    #[validate(custom(function = "valid_publish_date"))]
    pub publish_date: String,
    #[validate(custom(function = "valid_price"))]
    pub price: String,
}

const BOOK_FIELDS: &[&str] = &["title", "author", "publish", "publish_date", "price"];

/// Editable book field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookField {
    Title,
    Author,
    Publish,
    BookImg,
    PublishDate,
    Price,
}

impl BookField {
    pub fn key(&self) -> &'static str {
        match self {
            BookField::Title => "title",
            BookField::Author => "author",
            BookField::Publish => "publish",
            BookField::BookImg => "book_img",
            BookField::PublishDate => "publish_date",
            BookField::Price => "price",
        }
    }
}

impl BookForm {
    /// Prefill the editor from an existing book
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone().unwrap_or_default(),
            author: book.author.clone().unwrap_or_default(),
            publish: book.publish.clone().unwrap_or_default(),
            book_img: book.book_img.clone().unwrap_or_default(),
            publish_date: book.publish_date.clone().unwrap_or_default(),
            price: book.price.map(|p| p.to_string()).unwrap_or_default(),
        }
    }

    /// Change one field; its pending error, if any, goes away
    pub fn set(&mut self, field: BookField, value: impl Into<String>, errors: &mut FormErrors) {
        let value = value.into();
        match field {
            BookField::Title => self.title = value,
            BookField::Author => self.author = value,
            BookField::Publish => self.publish = value,
            BookField::BookImg => self.book_img = value,
            BookField::PublishDate => self.publish_date = value,
            BookField::Price => self.price = value,
        }
        errors.clear(field.key());
    }

    pub fn remove_image(&mut self) {
        self.book_img.clear();
    }

    pub fn check(&self) -> Result<(), FormErrors> {
        self.validate()
            .map_err(|e| FormErrors::from_validation(&e, BOOK_FIELDS))
    }

    /// Validate and build the request body: strings trimmed, price truncated to an integer
    pub fn to_payload(&self) -> ClientResult<BookPayload> {
        self.check().map_err(ClientError::Validation)?;

        let price = self.price.trim().parse::<f64>().unwrap_or_default().trunc() as i64;

        Ok(BookPayload {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            publish: self.publish.trim().to_string(),
            book_img: self.book_img.trim().to_string(),
            publish_date: self.publish_date.trim().to_string(),
            price,
        })
    }
}

/// Member editor
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct UserForm {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(custom(function = "not_blank"))]
    pub phone: String,
    pub memo: String,
}

const USER_FIELDS: &[&str] = &["name", "phone"];

impl UserForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone().or_else(|| user.username.clone()).unwrap_or_default(),
            phone: user.phone.clone().unwrap_or_default(),
            memo: user.notes().unwrap_or_default().to_string(),
        }
    }

    pub fn to_payload(&self) -> ClientResult<UserPayload> {
        self.validate()
            .map_err(|e| ClientError::Validation(FormErrors::from_validation(&e, USER_FIELDS)))?;

        Ok(UserPayload {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            memo: self.memo.trim().to_string(),
        })
    }
}

/// Loan/return desk input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Validate)]
pub struct DeskForm {
    #[validate(range(min = 1, message = "Please enter a user ID"))]
    pub user_id: i64,
    #[validate(range(min = 1, message = "Please enter a book ID"))]
    pub book_id: i64,
}

impl DeskForm {
    pub fn new(user_id: i64, book_id: i64) -> Self {
        Self { user_id, book_id }
    }

    pub fn check(&self) -> ClientResult<()> {
        self.validate()
            .map_err(|e| ClientError::Validation(FormErrors::from_validation(&e, &["user_id", "book_id"])))
    }
}
