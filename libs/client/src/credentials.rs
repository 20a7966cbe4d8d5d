//! Persisted credential storage
//!
//! The bearer credential is the only durable state the client owns. It lives
//! in a single file under a fixed path, read once at application start and
//! written on login/logout.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::error::ClientResult;

/// File-backed store for the bearer credential
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the stored credential. A missing or empty file means no
    /// credential is stored.
    pub fn load(&self) -> ClientResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim().to_string();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token))
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Persist a credential, creating parent directories as needed
    pub fn save(&self, token: &str) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)?;
        debug!("Credential persisted to {}", self.path.display());
        Ok(())
    }

    /// Erase the stored credential. The file is truncated rather than
    /// removed, matching the write-empty behavior of the login flow.
    pub fn clear(&self) -> ClientResult<()> {
        if self.path.exists() {
            fs::write(&self.path, "")?;
            debug!("Credential cleared at {}", self.path.display());
        }
        Ok(())
    }
}
