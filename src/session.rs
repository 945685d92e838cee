//! Persisted login session.
//!
//! The token lives in a small JSON file under the platform data dir, keyed
//! by the same `ashramAdmin` name the web dashboard used in local storage.
//! Only the login flow writes it; everything else reads it once when the
//! HTTP client is constructed.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::api::Credentials;

const STORAGE_KEY: &str = "ashramAdmin";

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(rename = "ashramAdmin", default)]
    session: Option<Session>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub admin_name: String,
}

impl Session {
    /// Where the session file lives
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(env_path) = std::env::var("ASHRAM_ADMIN_SESSION") {
            return Ok(PathBuf::from(env_path));
        }

        let data_dir = dirs::data_dir()
            .context("Could not determine data directory")?
            .join("ashram-admin");

        Ok(data_dir.join("session.json"))
    }

    /// Load the stored session, if any
    pub fn load() -> Result<Option<Session>> {
        let path = Self::default_path()?;
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path).context("Failed to read session file")?;
        let file: SessionFile =
            serde_json::from_str(&content).context("Failed to parse session file")?;
        Ok(file.session)
    }

    /// Persist this session under the fixed storage key
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create data directory")?;
        }

        let file = SessionFile {
            session: Some(self.clone()),
        };
        let content =
            serde_json::to_string_pretty(&file).context("Failed to serialize session")?;
        std::fs::write(&path, content).context("Failed to write session file")?;

        tracing::debug!(key = STORAGE_KEY, path = %path.display(), "session saved");
        Ok(())
    }

    /// Remove the stored session
    pub fn clear() -> Result<()> {
        let path = Self::default_path()?;
        if path.exists() {
            std::fs::remove_file(&path).context("Failed to remove session file")?;
        }
        Ok(())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.token.clone())
    }
}
