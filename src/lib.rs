//! Mini Library client
//!
//! Command-line client for the Mini Library REST API: catalog search,
//! borrowing and returning, and administration of books, members and loans.
//! All business rules live on the server; this crate handles sessions,
//! role checks, form validation and table presentation.

use std::sync::Arc;

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod table;
pub mod views;

pub use api::ApiClient;
pub use config::AppConfig;
pub use error::{ClientError, ClientResult};

/// Application state shared by all commands
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    pub fn new(config: AppConfig) -> ClientResult<Self> {
        let services = services::Services::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            services: Arc::new(services),
        })
    }
}
