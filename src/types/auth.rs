// src/types/auth.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::utils::read_file_content;

/// Current user as supplied by the authentication collaborator.
///
/// Read-only for the profile pipeline: `email` seeds the form when the
/// backend has none, `access_token` authorizes every request.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub access_token: String,
    #[serde(default)]
    pub is_profile_complete: bool,
}

impl AuthUser {
    /// Load a saved session (JSON) from disk
    pub async fn load_from_file(path: &Path) -> Result<Self> {
        let content = read_file_content(path).await?;
        let user: AuthUser = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse session file: {}", path.display()))?;

        if user.access_token.trim().is_empty() {
            anyhow::bail!("Session file {} has an empty access token", path.display());
        }

        Ok(user)
    }

    pub fn token(&self) -> &str {
        &self.access_token
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

// Keeps the token out of logs
impl fmt::Debug for AuthUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthUser")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("name", &self.name)
            .field("access_token", &"<redacted>")
            .field("is_profile_complete", &self.is_profile_complete)
            .finish()
    }
}
