//! Session persistence between command invocations
//!
//! The backend keeps the JWT in a cookie. The cookie header for the API
//! origin is written to a small JSON file after login and loaded back into
//! the client's jar on the next run.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::models::Role;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSession {
    /// API the cookie belongs to
    pub base_url: String,
    pub cookie: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved session, if any. Unreadable files count as no session.
    pub fn load(&self) -> Option<SavedSession> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "ignoring corrupt session file: {}", e);
                None
            }
        }
    }

    pub fn save(&self, session: &SavedSession) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(session)?;
        write_private(&self.path, raw.as_bytes())?;
        tracing::debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    pub fn clear(&self) -> ClientResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Load the saved cookie into `client` when it was issued by the same API
    pub fn restore_into(&self, client: &ApiClient) -> Option<SavedSession> {
        let session = self.load()?;
        if session.base_url != client.base_url() {
            tracing::debug!(saved = %session.base_url, "saved session belongs to another API");
            return None;
        }
        client.restore_cookie(&session.cookie);
        Some(session)
    }

    /// Capture the client's current cookie; nothing is written without one
    pub fn capture(
        &self,
        client: &ApiClient,
        username: Option<String>,
        role: Option<Role>,
    ) -> ClientResult<bool> {
        let Some(cookie) = client.session_cookie() else {
            tracing::warn!("login response carried no session cookie");
            return Ok(false);
        };
        self.save(&SavedSession {
            base_url: client.base_url().to_string(),
            cookie,
            username,
            role,
        })?;
        Ok(true)
    }
}

/// Write `contents` readable by the owner only; the file holds a live credential
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    // Files created by older versions keep their mode on open
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(contents)
}
