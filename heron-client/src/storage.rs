//! Session persistence
//!
//! One file per session key under the session directory:
//! `access_token` and `refresh_token` hold the raw token text,
//! `current_user.json` holds the serialized user profile. Clearing the
//! session removes all three.

use std::path::PathBuf;

use thiserror::Error;

use shared::client::{SessionTokens, UserInfo};

const ACCESS_TOKEN_FILE: &str = "access_token";
const REFRESH_TOKEN_FILE: &str = "refresh_token";
const CURRENT_USER_FILE: &str = "current_user.json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// File-backed session storage
#[derive(Debug, Clone)]
pub struct SessionStorage {
    dir: PathBuf,
}

impl SessionStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn access_token_path(&self) -> PathBuf {
        self.dir.join(ACCESS_TOKEN_FILE)
    }

    pub fn refresh_token_path(&self) -> PathBuf {
        self.dir.join(REFRESH_TOKEN_FILE)
    }

    pub fn current_user_path(&self) -> PathBuf {
        self.dir.join(CURRENT_USER_FILE)
    }

    fn ensure_dir(&self) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    /// Persist both tokens. A missing refresh token removes its file so
    /// a stale value never outlives the session that wrote it.
    pub fn save_tokens(&self, tokens: &SessionTokens) -> Result<(), StorageError> {
        self.ensure_dir()?;
        std::fs::write(self.access_token_path(), &tokens.access)?;

        match &tokens.refresh {
            Some(refresh) => std::fs::write(self.refresh_token_path(), refresh)?,
            None => {
                let path = self.refresh_token_path();
                if path.exists() {
                    std::fs::remove_file(&path)?;
                }
            }
        }
        Ok(())
    }

    /// Load the persisted token pair, `None` when no access token is on
    /// disk. An empty token file counts as absent.
    pub fn load_tokens(&self) -> Result<Option<SessionTokens>, StorageError> {
        let access_path = self.access_token_path();
        if !access_path.exists() {
            return Ok(None);
        }

        let access = std::fs::read_to_string(&access_path)?;
        let access = access.trim().to_string();
        if access.is_empty() {
            return Ok(None);
        }

        let refresh_path = self.refresh_token_path();
        let refresh = if refresh_path.exists() {
            let value = std::fs::read_to_string(&refresh_path)?;
            let value = value.trim().to_string();
            (!value.is_empty()).then_some(value)
        } else {
            None
        };

        Ok(Some(SessionTokens { access, refresh }))
    }

    pub fn save_user(&self, user: &UserInfo) -> Result<(), StorageError> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(user)?;
        std::fs::write(self.current_user_path(), content)?;
        Ok(())
    }

    /// Load the persisted user profile.
    ///
    /// A corrupt file reads back as `None` instead of an error; the
    /// profile can always be re-fetched from the backend.
    pub fn load_user(&self) -> Result<Option<UserInfo>, StorageError> {
        let path = self.current_user_path();
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)?;
        match serde_json::from_str(&content) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!("Discarding unreadable user profile: {}", e);
                let _ = std::fs::remove_file(&path);
                Ok(None)
            }
        }
    }

    /// Remove every persisted session file
    pub fn clear(&self) -> Result<(), StorageError> {
        for path in [
            self.access_token_path(),
            self.refresh_token_path(),
            self.current_user_path(),
        ] {
            if path.exists() {
                std::fs::remove_file(&path)?;
            }
        }
        Ok(())
    }
}
