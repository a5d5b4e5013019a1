//! Application routes, role guard and navigation menu

use std::fmt;

use crate::models::Role;

/// Every screen of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    BookDetail(i64),
    /// Reader catalog search
    UserHome,
    /// Member management, the administrator landing page
    AdminUsers,
    AdminBooks,
    AdminBorrows,
    AdminLoans,
    UserDetail(i64),
    NotFound,
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim().trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            ["login"] => Route::Login,
            ["book", id] => id.parse().map(Route::BookDetail).unwrap_or(Route::NotFound),
            ["user"] => Route::UserHome,
            ["user", id] => id.parse().map(Route::UserDetail).unwrap_or(Route::NotFound),
            ["admin"] => Route::AdminUsers,
            ["admin", "books"] => Route::AdminBooks,
            ["admin", "borrows"] => Route::AdminBorrows,
            ["admin", "loans"] => Route::AdminLoans,
            _ => Route::NotFound,
        }
    }

    /// Who may open the route
    pub fn access(&self) -> Access {
        match self {
            Route::Login | Route::BookDetail(_) => Access::Public,
            Route::UserHome => Access::Role(Role::User),
            Route::AdminUsers
            | Route::AdminBooks
            | Route::AdminBorrows
            | Route::AdminLoans
            | Route::UserDetail(_) => Access::Role(Role::Admin),
            Route::NotFound => Access::Never,
        }
    }
}

/// Access rule of a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Role(Role),
    /// Nobody; always redirected
    Never,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Login => write!(f, "/login"),
            Route::BookDetail(id) => write!(f, "/book/{}", id),
            Route::UserHome => write!(f, "/user"),
            Route::AdminUsers => write!(f, "/admin"),
            Route::AdminBooks => write!(f, "/admin/books"),
            Route::AdminBorrows => write!(f, "/admin/borrows"),
            Route::AdminLoans => write!(f, "/admin/loans"),
            Route::UserDetail(id) => write!(f, "/user/{}", id),
            Route::NotFound => write!(f, "*"),
        }
    }
}

/// What the client knows about the current session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Loading,
    Anonymous,
    Authenticated {
        id: Option<i64>,
        name: String,
        role: Role,
    },
}

impl AuthState {
    pub fn role(&self) -> Option<Role> {
        match self {
            AuthState::Authenticated { role, .. } => Some(*role),
            _ => None,
        }
    }

    /// Member id of the session, when the backend reported one
    pub fn user_id(&self) -> Option<i64> {
        match self {
            AuthState::Authenticated { id, .. } => *id,
            _ => None,
        }
    }
}

/// Outcome of resolving a route against the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Session check still in flight
    Wait,
    Render(Route),
    /// Replace the current location
    Redirect(Route),
}

/// Decide whether `route` may be shown for `auth`
pub fn guard(route: Route, auth: &AuthState) -> Navigation {
    if *auth == AuthState::Loading {
        return Navigation::Wait;
    }

    match route.access() {
        Access::Public => Navigation::Render(route),
        Access::Role(required) if auth.role() == Some(required) => Navigation::Render(route),
        Access::Role(_) | Access::Never => Navigation::Redirect(Route::Login),
    }
}

/// Where a freshly logged in account lands
pub fn landing(role: Role) -> Route {
    match role {
        Role::Admin => Route::AdminUsers,
        _ => Route::UserHome,
    }
}

/// Sidebar entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: &'static str,
    pub route: Route,
    /// CLI invocation that opens the entry
    pub command: &'static str,
}

pub fn menu(role: Option<Role>) -> Vec<MenuEntry> {
    match role {
        Some(Role::User) => vec![MenuEntry {
            label: "Book search",
            route: Route::UserHome,
            command: "books search",
        }],
        Some(Role::Admin) => vec![
            MenuEntry {
                label: "User management",
                route: Route::AdminUsers,
                command: "admin users list",
            },
            MenuEntry {
                label: "Book management",
                route: Route::AdminBooks,
                command: "admin books list",
            },
            MenuEntry {
                label: "Borrow history",
                route: Route::AdminBorrows,
                command: "admin history",
            },
            MenuEntry {
                label: "Loan / return desk",
                route: Route::AdminLoans,
                command: "admin loan",
            },
        ],
        _ => Vec::new(),
    }
}
