//! Process-wide session store.
//!
//! Holds the bearer token and display name handed out by the backend at
//! login. The values are a client-side copy only: presence of a token is
//! treated as "authenticated" with no expiry or validity check.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::AppResult;

pub const TOKEN_KEY: &str = "token";
pub const USERNAME_KEY: &str = "username";

pub struct SessionStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl SessionStore {
    /// Open the store backed by `path`, loading any previously saved keys.
    pub fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let json = fs::read_to_string(&path)?;
            serde_json::from_str(&json)?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// In-memory state only changes once the file write succeeded.
    pub fn set(&self, token: &str, username: &str) -> AppResult<()> {
        self.replace(|entries| {
            entries.insert(TOKEN_KEY.to_string(), token.to_string());
            entries.insert(USERNAME_KEY.to_string(), username.to_string());
        })?;
        tracing::info!("Session stored for {}", username);
        Ok(())
    }

    pub fn clear(&self) -> AppResult<()> {
        self.replace(|entries| {
            entries.remove(TOKEN_KEY);
            entries.remove(USERNAME_KEY);
        })?;
        tracing::info!("Session cleared");
        Ok(())
    }

    fn replace(&self, edit: impl FnOnce(&mut BTreeMap<String, String>)) -> AppResult<()> {
        let mut entries = self.write();
        let mut next = entries.clone();
        edit(&mut next);
        persist(&self.path, &next)?;
        *entries = next;
        Ok(())
    }

    pub fn token(&self) -> Option<String> {
        self.read().get(TOKEN_KEY).cloned()
    }

    pub fn username(&self) -> Option<String> {
        self.read().get(USERNAME_KEY).cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().contains_key(TOKEN_KEY)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, String>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, String>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn persist(path: &Path, entries: &BTreeMap<String, String>) -> AppResult<()> {
    if entries.is_empty() {
        if path.exists() {
            fs::remove_file(path)?;
        }
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(entries)?)?;
    Ok(())
}
