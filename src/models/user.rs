//! User model and related types

use serde::{Deserialize, Serialize};

/// Account role as issued by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
            Role::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Login request body
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Authenticated account, as reported by `/user/auth/me`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    #[serde(default = "unknown_role")]
    pub role: Role,
}

fn unknown_role() -> Role {
    Role::Unknown
}

#[derive(Debug, Clone, Deserialize)]
pub struct MeResponse {
    pub user: CurrentUser,
}

/// Library member as managed by administrators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub dept: Option<String>,
    /// Free-form notes as sent by the member listing
    #[serde(default)]
    pub memo: Option<String>,
    /// Free-form notes as sent by the member detail
    #[serde(default)]
    pub info: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

impl User {
    /// Display name: `username`, falling back to `name`
    pub fn display_name(&self) -> Option<&str> {
        [self.username.as_deref(), self.name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|n| !n.is_empty())
    }

    /// Notes: `memo`, falling back to `info`
    pub fn notes(&self) -> Option<&str> {
        [self.memo.as_deref(), self.info.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|n| !n.is_empty())
    }
}

/// Body sent when creating or updating a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPayload {
    pub name: String,
    pub phone: String,
    pub memo: String,
}
