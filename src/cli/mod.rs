//! Command-line interface

mod dispatch;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::models::{CatalogSort, SearchField};
use crate::table::BookColumn;

pub use dispatch::{dispatch, exit_code};

#[derive(Parser, Debug)]
#[command(
    name = "mini-library",
    version,
    about = "Mini Library client: search the catalog, borrow books and run the library desk"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and keep the session for later commands
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "MINILIB_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// End the session
    Logout,
    /// Show the logged in account
    Whoami,
    /// List the screens available to the logged in account
    Menu,
    /// Reader catalog
    #[command(subcommand)]
    Books(BooksCommand),
    /// Borrow a book
    Borrow(SelfServiceArgs),
    /// Return a borrowed book
    Return(SelfServiceArgs),
    /// Administration
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Subcommand, Debug)]
pub enum BooksCommand {
    /// Search by title, author or publisher
    Search {
        keyword: Option<String>,
        #[arg(long)]
        sort: Option<CatalogSort>,
    },
    /// Show one book
    Show { id: i64 },
}

#[derive(Args, Debug)]
pub struct SelfServiceArgs {
    pub book_id: i64,
    /// Member ID; defaults to the logged in account
    #[arg(long)]
    pub user: Option<i64>,
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// Member management
    #[command(subcommand)]
    Users(UsersCommand),
    /// Book management
    #[command(subcommand)]
    Books(AdminBooksCommand),
    /// Borrow history
    History {
        /// Member name or book title
        keyword: Option<String>,
    },
    /// Lend a book at the desk
    Loan(DeskArgs),
    /// Take a book back at the desk
    Return(DeskArgs),
    /// Every loan on record
    Loans,
}

#[derive(Args, Debug)]
pub struct DeskArgs {
    #[arg(long)]
    pub user: i64,
    #[arg(long)]
    pub book: i64,
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    List,
    /// Member profile and loan history
    Show {
        id: i64,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long, default_value = "")]
        memo: String,
    },
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        memo: Option<String>,
    },
    Delete {
        id: i64,
        /// Skip the confirmation
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct SortArgs {
    /// Column to sort the page by
    #[arg(long)]
    pub sort: Option<BookColumn>,
    #[arg(long, requires = "sort")]
    pub desc: bool,
}

#[derive(Args, Debug, Default)]
pub struct BookFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub author: Option<String>,
    #[arg(long)]
    pub publish: Option<String>,
    /// Publication date, YYYY-MM-DD
    #[arg(long)]
    pub publish_date: Option<String>,
    #[arg(long)]
    pub price: Option<String>,
    /// Cover image to upload
    #[arg(long, conflicts_with = "remove_image")]
    pub image: Option<PathBuf>,
    /// Drop the current cover image
    #[arg(long)]
    pub remove_image: bool,
}

#[derive(Subcommand, Debug)]
pub enum AdminBooksCommand {
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[command(flatten)]
        sort: SortArgs,
    },
    Search {
        keyword: String,
        /// Field to search in
        #[arg(long)]
        by: Option<SearchField>,
        #[command(flatten)]
        sort: SortArgs,
    },
    Add(BookFields),
    Edit {
        id: i64,
        #[command(flatten)]
        fields: BookFields,
    },
    Delete {
        id: i64,
        #[arg(long)]
        yes: bool,
    },
    /// Upload an image and print its stored path
    Upload { path: PathBuf },
    /// Loans of one book
    Loans { id: i64 },
}
