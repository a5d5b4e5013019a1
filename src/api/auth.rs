//! Authentication endpoints

use reqwest::Method;

use crate::error::ClientResult;
use crate::models::{CurrentUser, LoginRequest, MeResponse};

use super::ApiClient;

impl ApiClient {
    /// Log in; the backend answers with a session cookie
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<()> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.send_json(Method::POST, "/login", &request).await
    }

    pub async fn logout(&self) -> ClientResult<()> {
        self.send_empty(Method::GET, "/user/logout").await
    }

    /// Account behind the current session cookie
    pub async fn me(&self) -> ClientResult<CurrentUser> {
        let response: MeResponse = self.get_json("/user/auth/me").await?;
        Ok(response.user)
    }
}
