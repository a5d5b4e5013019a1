//! Book management for administrators

use std::path::Path;

use crate::{
    api::ApiClient,
    error::{ClientError, ClientResult},
    forms::{BookField, BookForm, FormErrors},
    models::{Book, BookQuery, SearchField},
    table::{BookColumn, Pager, SortState},
};

/// One rendered page of the book table
#[derive(Debug, Clone)]
pub struct BookTable {
    pub books: Vec<Book>,
    pub sort: SortState,
    pub pager: Pager,
}

impl BookTable {
    /// Re-sort the rows on screen after a header click
    pub fn sort_by_header(&mut self, column: BookColumn) {
        self.sort = self.sort.toggle(column);
        self.sort.apply(&mut self.books);
    }
}

/// State of the add/edit dialog
#[derive(Debug, Clone, Default)]
pub struct BookEditor {
    /// Book being edited; `None` when adding
    pub editing: Option<i64>,
    pub form: BookForm,
    pub errors: FormErrors,
    /// Image path the book had when the editor opened
    pub original_img: String,
}

impl BookEditor {
    pub fn set(&mut self, field: BookField, value: impl Into<String>) {
        self.form.set(field, value, &mut self.errors);
    }

    pub fn image_changed(&self) -> bool {
        self.form.book_img.trim() != self.original_img.trim()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated(i64),
}

#[derive(Clone)]
pub struct BookAdminService {
    client: ApiClient,
    window: u32,
}

impl BookAdminService {
    pub fn new(client: ApiClient, window: u32) -> Self {
        Self { client, window }
    }

    async fn fetch(&self, query: BookQuery, sort: SortState) -> ClientResult<BookTable> {
        let page = self.client.list_books(&query).await?;
        let mut books = page.content;
        sort.apply(&mut books);

        Ok(BookTable {
            books,
            sort,
            pager: Pager::new(page.page, self.window),
        })
    }

    /// Fetch a page and sort it with the active column
    pub async fn list(&self, page: u32, sort: SortState) -> ClientResult<BookTable> {
        let query = BookQuery {
            page: Some(page),
            ..BookQuery::default()
        };
        self.fetch(query, sort).await
    }

    /// Search always starts over from the first page
    pub async fn search(
        &self,
        field: Option<SearchField>,
        keyword: &str,
        sort: SortState,
    ) -> ClientResult<BookTable> {
        let mut query = BookQuery::keyword(Some(keyword));
        query.search_by = field;
        query.page = Some(0);
        self.fetch(query, sort).await
    }

    pub fn open_new(&self) -> BookEditor {
        BookEditor::default()
    }

    /// Open the editor prefilled from the current server copy
    pub async fn open_edit(&self, id: i64) -> ClientResult<BookEditor> {
        let book = self.client.get_book(id).await?;
        let form = BookForm::from_book(&book);
        Ok(BookEditor {
            editing: Some(id),
            original_img: form.book_img.clone(),
            form,
            errors: FormErrors::default(),
        })
    }

    /// Validate and submit. Validation errors stay on the editor.
    pub async fn save(&self, editor: &mut BookEditor) -> ClientResult<SaveOutcome> {
        let payload = match editor.form.to_payload() {
            Ok(payload) => payload,
            Err(ClientError::Validation(errors)) => {
                editor.errors = errors.clone();
                return Err(ClientError::Validation(errors));
            }
            Err(e) => return Err(e),
        };
        editor.errors = FormErrors::default();

        match editor.editing {
            Some(id) => {
                self.client.update_book(id, &payload).await?;
                tracing::info!(id, "book updated");
                Ok(SaveOutcome::Updated(id))
            }
            None => {
                self.client.create_book(&payload).await?;
                tracing::info!(title = %payload.title, "book created");
                Ok(SaveOutcome::Created)
            }
        }
    }

    pub async fn delete(&self, id: i64, confirmed: bool) -> ClientResult<()> {
        if !confirmed {
            return Err(ClientError::NotConfirmed(format!(
                "deleting book {} needs confirmation",
                id
            )));
        }
        self.client.delete_book(id).await?;
        tracing::info!(id, "book deleted");
        Ok(())
    }

    /// Upload a cover image and put its stored path on the form
    pub async fn upload_image(&self, editor: &mut BookEditor, path: &Path) -> ClientResult<String> {
        let stored = self.client.upload_file(path).await?;
        tracing::info!(file = %path.display(), stored = %stored, "image uploaded");
        editor.set(BookField::BookImg, stored.clone());
        Ok(stored)
    }
}
