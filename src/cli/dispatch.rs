//! Command execution

use chrono::{Local, NaiveDate};

use crate::{
    error::{ClientError, ClientResult},
    forms::{BookField, DeskForm, UserForm},
    routes::{menu, AuthState, Route},
    services::books::{BookEditor, SaveOutcome},
    session::SavedSession,
    table::{SortDirection, SortState},
    views, AppState,
};

use super::{AdminBooksCommand, AdminCommand, BookFields, BooksCommand, Command, SortArgs, UsersCommand};

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Screen a command belongs to; the guard runs against it first
fn route_of(command: &Command) -> Route {
    match command {
        Command::Login { .. } | Command::Logout | Command::Whoami | Command::Menu => Route::Login,
        Command::Books(BooksCommand::Show { id }) => Route::BookDetail(*id),
        Command::Books(BooksCommand::Search { .. }) | Command::Borrow(_) | Command::Return(_) => {
            Route::UserHome
        }
        Command::Admin(AdminCommand::Users(UsersCommand::Show { id, .. })) => Route::UserDetail(*id),
        Command::Admin(AdminCommand::Users(_)) => Route::AdminUsers,
        Command::Admin(AdminCommand::Books(_)) => Route::AdminBooks,
        Command::Admin(AdminCommand::History { .. }) => Route::AdminBorrows,
        Command::Admin(AdminCommand::Loan(_))
        | Command::Admin(AdminCommand::Return(_))
        | Command::Admin(AdminCommand::Loans) => Route::AdminLoans,
    }
}

/// Process exit code for a failed command
pub fn exit_code(error: &ClientError) -> i32 {
    match error {
        ClientError::AccessDenied { .. } | ClientError::Unauthorized(_) | ClientError::Forbidden(_) => 3,
        ClientError::Validation(_) | ClientError::NotConfirmed(_) => 2,
        _ => 1,
    }
}

fn sort_state(args: &SortArgs) -> SortState {
    match args.sort {
        Some(column) => SortState::by(
            column,
            if args.desc {
                SortDirection::Desc
            } else {
                SortDirection::Asc
            },
        ),
        None => SortState::default(),
    }
}

/// 1-based page from the command line to the API's 0-based numbering
fn page_index(page: u32) -> u32 {
    page.saturating_sub(1)
}

/// Run one command and return what should be printed
pub async fn dispatch(command: Command, state: &AppState) -> ClientResult<String> {
    let route = route_of(&command);
    let services = &state.services;
    let auth = services.auth.authorize(route).await?;
    tracing::debug!(%route, "dispatching command");

    match command {
        Command::Login { username, password } => {
            let landing = services.auth.login(&username, &password).await?;
            Ok(format!("Logged in as {}. Start at {}.", username, landing))
        }
        Command::Logout => {
            services.auth.logout().await?;
            Ok("Logged out.".to_string())
        }
        Command::Whoami => Ok(match services.auth.current_user().await {
            Some(user) => format!("{} ({})", user.username, user.role),
            None => match services.auth.saved_session() {
                Some(saved) => expired_session_hint(&saved),
                None => "Not logged in.".to_string(),
            },
        }),
        Command::Menu => {
            let auth = services.auth.check_auth().await;
            Ok(views::menu(&menu(auth.role())))
        }
        Command::Books(BooksCommand::Search { keyword, sort }) => {
            let books = services.catalog.search(keyword.as_deref(), sort).await?;
            Ok(views::catalog(&books))
        }
        Command::Books(BooksCommand::Show { id }) => {
            let detail = services.catalog.detail(id).await?;
            Ok(views::book_detail(&detail))
        }
        Command::Borrow(args) => {
            let user = args.user.or(auth.user_id());
            let detail = services.catalog.borrow(args.book_id, user).await?;
            Ok(format!("Book borrowed.\n{}", views::book_detail(&detail)))
        }
        Command::Return(args) => {
            let user = args.user.or(auth.user_id());
            let detail = services.catalog.give_back(args.book_id, user).await?;
            Ok(format!("Book returned.\n{}", views::book_detail(&detail)))
        }
        Command::Admin(admin) => run_admin(admin, state, &auth).await,
    }
}

/// `whoami` when the backend no longer accepts the saved cookie
fn expired_session_hint(saved: &SavedSession) -> String {
    let account = match (&saved.username, saved.role) {
        (Some(name), Some(role)) => format!("{} ({})", name, role),
        (Some(name), None) => name.clone(),
        _ => "the last account".to_string(),
    };
    format!(
        "Not logged in. The saved session for {} has expired; run `mini-library login`.",
        account
    )
}

async fn run_admin(command: AdminCommand, state: &AppState, auth: &AuthState) -> ClientResult<String> {
    let services = &state.services;
    if let AuthState::Authenticated { name, .. } = auth {
        tracing::debug!(admin = %name, "admin command");
    }

    match command {
        AdminCommand::Users(users) => run_users(users, state).await,
        AdminCommand::Books(books) => run_books(books, state).await,
        AdminCommand::History { keyword } => {
            let records = services
                .history
                .search(keyword.as_deref().unwrap_or_default())
                .await?;
            Ok(views::history(&records))
        }
        AdminCommand::Loan(args) => {
            services
                .loans
                .loan(DeskForm::new(args.user, args.book), today())
                .await?;
            Ok("Loan completed.".to_string())
        }
        AdminCommand::Return(args) => {
            services
                .loans
                .give_back(DeskForm::new(args.user, args.book), today())
                .await?;
            Ok("Return completed.".to_string())
        }
        AdminCommand::Loans => Ok(views::loans(&services.loans.all(today()).await?)),
    }
}

async fn run_users(command: UsersCommand, state: &AppState) -> ClientResult<String> {
    let users = &state.services.users;

    match command {
        UsersCommand::List => Ok(views::users(&users.list().await?)),
        UsersCommand::Show { id, page } => {
            let detail = users.detail(id, page_index(page), today()).await?;
            Ok(views::user_detail(&detail))
        }
        UsersCommand::Add { name, phone, memo } => {
            users.save(&UserForm { name, phone, memo }, None).await?;
            Ok("User created.".to_string())
        }
        UsersCommand::Edit {
            id,
            name,
            phone,
            memo,
        } => {
            users.edit(id, name, phone, memo).await?;
            Ok(format!("User {} updated.", id))
        }
        UsersCommand::Delete { id, yes } => {
            users.delete(id, yes).await?;
            Ok(format!("User {} deleted.", id))
        }
    }
}

/// Copy command line values into the editor, uploading the image if given
async fn fill_editor(editor: &mut BookEditor, fields: BookFields, state: &AppState) -> ClientResult<()> {
    let values = [
        (BookField::Title, fields.title),
        (BookField::Author, fields.author),
        (BookField::Publish, fields.publish),
        (BookField::PublishDate, fields.publish_date),
        (BookField::Price, fields.price),
    ];
    for (field, value) in values {
        if let Some(value) = value {
            editor.set(field, value);
        }
    }

    if fields.remove_image {
        editor.form.remove_image();
    }
    if let Some(path) = fields.image {
        state.services.books.upload_image(editor, &path).await?;
    }
    Ok(())
}

async fn run_books(command: AdminBooksCommand, state: &AppState) -> ClientResult<String> {
    let books = &state.services.books;

    match command {
        AdminBooksCommand::List { page, sort } => {
            let view = books.list(page_index(page), sort_state(&sort)).await?;
            Ok(views::book_table(&view))
        }
        AdminBooksCommand::Search { keyword, by, sort } => {
            let view = books.search(by, &keyword, sort_state(&sort)).await?;
            Ok(views::book_table(&view))
        }
        AdminBooksCommand::Add(fields) => {
            let mut editor = books.open_new();
            fill_editor(&mut editor, fields, state).await?;
            save_book(state, &mut editor).await
        }
        AdminBooksCommand::Edit { id, fields } => {
            let mut editor = books.open_edit(id).await?;
            fill_editor(&mut editor, fields, state).await?;
            if editor.image_changed() {
                tracing::debug!(id, "cover image changed");
            }
            save_book(state, &mut editor).await
        }
        AdminBooksCommand::Delete { id, yes } => {
            books.delete(id, yes).await?;
            Ok(format!("Book {} deleted.", id))
        }
        AdminBooksCommand::Upload { path } => {
            let mut editor = books.open_new();
            let stored = books.upload_image(&mut editor, &path).await?;
            Ok(stored)
        }
        AdminBooksCommand::Loans { id } => {
            let loans = state.services.loans.book_loans(id, today()).await?;
            Ok(views::loans(&loans))
        }
    }
}

async fn save_book(state: &AppState, editor: &mut BookEditor) -> ClientResult<String> {
    Ok(match state.services.books.save(editor).await? {
        SaveOutcome::Created => "Book registered.".to_string(),
        SaveOutcome::Updated(id) => format!("Book {} updated.", id),
    })
}
