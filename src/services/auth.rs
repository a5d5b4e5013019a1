//! Authentication and session service

use crate::{
    api::ApiClient,
    error::{ClientError, ClientResult},
    models::CurrentUser,
    routes::{guard, landing, Access, AuthState, Navigation, Route},
    session::{SavedSession, SessionStore},
};

#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
    store: SessionStore,
}

impl AuthService {
    pub fn new(client: ApiClient, store: SessionStore) -> Self {
        Self { client, store }
    }

    /// Account behind the session, `None` when not logged in
    pub async fn current_user(&self) -> Option<CurrentUser> {
        match self.client.me().await {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::debug!("session check failed: {}", e);
                None
            }
        }
    }

    /// Ask the backend who we are. Any failure means anonymous.
    pub async fn check_auth(&self) -> AuthState {
        match self.current_user().await {
            Some(user) => AuthState::Authenticated {
                id: user.id,
                name: user.username,
                role: user.role,
            },
            None => AuthState::Anonymous,
        }
    }

    /// Log in, persist the session cookie and return the landing route
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<Route> {
        self.client.login(username, password).await?;

        let user = self.client.me().await.map_err(|e| {
            tracing::warn!("login accepted but session check failed: {}", e);
            ClientError::Unauthorized("session was not established".to_string())
        })?;

        self.store
            .capture(&self.client, Some(user.username.clone()), Some(user.role))?;
        tracing::info!(username = %user.username, role = %user.role, "logged in");

        Ok(landing(user.role))
    }

    /// Session saved by the last login, whether or not the backend still accepts it
    pub fn saved_session(&self) -> Option<SavedSession> {
        self.store.load()
    }

    /// Log out on the backend and forget the local session either way
    pub async fn logout(&self) -> ClientResult<()> {
        if let Err(e) = self.client.logout().await {
            tracing::warn!("backend logout failed: {}", e);
        }
        self.store.clear()
    }

    /// Resolve the session and check it may open `route`
    pub async fn authorize(&self, route: Route) -> ClientResult<AuthState> {
        let auth = if route.access() == Access::Public {
            AuthState::Anonymous
        } else {
            self.check_auth().await
        };

        match guard(route, &auth) {
            Navigation::Render(_) => Ok(auth),
            Navigation::Redirect(target) => {
                tracing::info!(%route, %target, "route guard redirect");
                Err(ClientError::AccessDenied {
                    route: route.to_string(),
                })
            }
            Navigation::Wait => Err(ClientError::Unauthorized(
                "session state unknown".to_string(),
            )),
        }
    }
}
