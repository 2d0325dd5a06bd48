//! Session store and its persistence
//!
//! The store holds the authenticated user and bearer token. It is passed
//! explicitly to the client; repositories only ever read it, and only
//! login/logout mutate it.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use shared::models::{Role, User};

use crate::error::{ClientError, ClientResult};

/// Session data: the authenticated user and token
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    pub user: Option<User>,
    pub token: Option<String>,
}

impl SessionData {
    pub fn new(user: User, token: impl Into<String>) -> Self {
        Self {
            user: Some(user),
            token: Some(token.into()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }
}

/// Session persistence as a JSON file
#[derive(Debug, Clone)]
pub struct SessionStorage {
    path: PathBuf,
}

impl SessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Make sure the parent directory exists
    pub fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    pub fn save(&self, session: &SessionData) -> std::io::Result<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json)
    }

    /// Missing or unreadable files load as `None`
    pub fn load(&self) -> Option<SessionData> {
        if !self.path.exists() {
            return None;
        }
        let json = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&json) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!("Ignoring unreadable session file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn delete(&self) -> std::io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Shared handle to the current session
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<SessionData>>,
    storage: Option<SessionStorage>,
}

impl SessionStore {
    /// In-memory store with nothing persisted
    pub fn new() -> Self {
        Self::default()
    }

    /// Store backed by `storage`, rehydrated from it
    pub fn restore(storage: SessionStorage) -> Self {
        let data = storage.load().unwrap_or_default();
        if data.token().is_some() {
            tracing::debug!("Restored session from {}", storage.path().display());
        }
        Self {
            inner: Arc::new(RwLock::new(data)),
            storage: Some(storage),
        }
    }

    pub fn storage(&self) -> Option<&SessionStorage> {
        self.storage.as_ref()
    }

    /// Replace the session and persist it
    pub fn set_user(&self, user: User, token: impl Into<String>) -> ClientResult<()> {
        let data = SessionData::new(user, token);
        if let Some(storage) = &self.storage {
            storage.save(&data)?;
        }
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = data;
        Ok(())
    }

    /// Clear user and token, in memory and in storage
    pub fn logout(&self) -> ClientResult<()> {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = SessionData::default();
        if let Some(storage) = &self.storage {
            storage.delete()?;
        }
        Ok(())
    }

    pub fn snapshot(&self) -> SessionData {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn user(&self) -> Option<User> {
        self.snapshot().user
    }

    /// Token from memory, falling back to persistent storage
    pub fn token(&self) -> Option<String> {
        if let Some(token) = self
            .inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .token()
        {
            return Some(token.to_string());
        }

        let stored = self.storage.as_ref()?.load()?;
        let token = stored.token()?.to_string();
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = stored;
        Some(token)
    }

    /// Token for an authenticated request, or [`ClientError::Unauthenticated`]
    pub fn bearer(&self) -> ClientResult<String> {
        self.token().ok_or(ClientError::Unauthenticated)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .user()
            .is_some_and(|u| u.role == role)
    }

    pub fn user_id(&self) -> Option<i64> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .user()
            .map(|u| u.id)
    }
}
