//! Screen-level orchestration on top of the API client

pub mod auth;
pub mod books;
pub mod catalog;
pub mod history;
pub mod loans;
pub mod users;

use crate::{api::ApiClient, config::AppConfig, error::ClientResult, session::SessionStore};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub books: books::BookAdminService,
    pub users: users::UserAdminService,
    pub loans: loans::LoanDeskService,
    pub history: history::HistoryService,
}

impl Services {
    /// Create all services sharing one client, restoring any saved session
    pub fn new(config: &AppConfig) -> ClientResult<Self> {
        let client = ApiClient::new(&config.api)?;
        let store = SessionStore::new(config.session_path());
        if store.restore_into(&client).is_some() {
            tracing::debug!(path = %store.path().display(), "restored saved session");
        }

        Ok(Self::with_client(client, store, config))
    }

    pub fn with_client(client: ApiClient, store: SessionStore, config: &AppConfig) -> Self {
        let window = config.pagination.window as u32;
        let page_size = config.pagination.page_size as u32;

        Self {
            auth: auth::AuthService::new(client.clone(), store),
            catalog: catalog::CatalogService::new(client.clone(), config.api.asset_base_url.clone()),
            books: books::BookAdminService::new(client.clone(), window),
            users: users::UserAdminService::new(client.clone(), page_size, window),
            loans: loans::LoanDeskService::new(client.clone()),
            history: history::HistoryService::new(client),
        }
    }
}
