//! Member management endpoints

use reqwest::Method;
use serde::Deserialize;

use crate::error::ClientResult;
use crate::models::{Listing, User, UserPayload};

use super::ApiClient;

#[derive(Deserialize)]
#[serde(untagged)]
enum UserEnvelope {
    Wrapped { user: User },
    Bare(User),
}

impl ApiClient {
    pub async fn list_users(&self) -> ClientResult<Vec<User>> {
        let listing: Listing<User> = self.get_json("/admin/users").await?;
        Ok(listing.into_items())
    }

    pub async fn create_user(&self, payload: &UserPayload) -> ClientResult<()> {
        self.send_json(Method::POST, "/admin/users", payload).await
    }

    pub async fn update_user(&self, id: i64, payload: &UserPayload) -> ClientResult<()> {
        self.send_json(Method::PUT, &format!("/admin/users/{}", id), payload)
            .await
    }

    pub async fn delete_user(&self, id: i64) -> ClientResult<()> {
        self.send_empty(Method::DELETE, &format!("/admin/users/{}", id))
            .await
    }

    pub async fn get_user(&self, id: i64) -> ClientResult<User> {
        let envelope: UserEnvelope = self.get_json(&format!("/user/{}", id)).await?;
        Ok(match envelope {
            UserEnvelope::Wrapped { user } => user,
            UserEnvelope::Bare(user) => user,
        })
    }
}
