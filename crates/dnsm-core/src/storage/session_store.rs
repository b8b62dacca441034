use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use super::{KeyValueStore, StoreError};
use crate::models::{RememberedUser, UserInfo};

/// Key suffix for the bearer token
pub const TOKEN_KEY: &str = "token";

/// Key suffix for the JSON-serialized `UserInfo`
pub const USER_INFO_KEY: &str = "user_info";

/// Key suffix for the JSON-serialized `RememberedUser`
pub const REMEMBERED_LOGIN_KEY: &str = "remembered_login";

/// Default prefix applied to every key
pub const DEFAULT_NAMESPACE: &str = "dnsm_";

/// Typed access to the persisted session keys.
///
/// Reads never fail: a missing, unreadable or corrupt value is reported as
/// absent. Writes and removals surface `StoreError`.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn KeyValueStore>,
    namespace: String,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn KeyValueStore>, namespace: impl Into<String>) -> Self {
        Self {
            backend,
            namespace: namespace.into(),
        }
    }

    fn key(&self, name: &str) -> String {
        format!("{}{}", self.namespace, name)
    }

    fn get_raw(&self, name: &str) -> Option<String> {
        match self.backend.get_item(&self.key(name)) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = name, error = %e, "Failed to read stored value");
                None
            }
        }
    }

    fn get_json<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let raw = self.get_raw(name)?;
        if raw.is_empty() || raw == "undefined" || raw == "null" {
            return None;
        }
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key = name, error = %e, "Ignoring corrupt stored value");
                None
            }
        }
    }

    fn set_json<T: Serialize>(&self, name: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        self.backend.set_item(&self.key(name), &raw)
    }

    // ===== Token =====

    pub fn set_token(&self, token: &str) -> Result<(), StoreError> {
        self.backend.set_item(&self.key(TOKEN_KEY), token)
    }

    pub fn get_token(&self) -> Option<String> {
        self.get_raw(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn remove_token(&self) -> Result<(), StoreError> {
        self.backend.remove_item(&self.key(TOKEN_KEY))
    }

    // ===== User info =====

    pub fn set_user_info(&self, user_info: &UserInfo) -> Result<(), StoreError> {
        self.set_json(USER_INFO_KEY, user_info)
    }

    pub fn get_user_info(&self) -> Option<UserInfo> {
        self.get_json(USER_INFO_KEY)
    }

    pub fn remove_user_info(&self) -> Result<(), StoreError> {
        self.backend.remove_item(&self.key(USER_INFO_KEY))
    }

    // ===== Remembered login =====

    pub fn set_remembered_user(&self, user: &RememberedUser) -> Result<(), StoreError> {
        self.set_json(REMEMBERED_LOGIN_KEY, user)
    }

    pub fn get_remembered_user(&self) -> Option<RememberedUser> {
        self.get_json(REMEMBERED_LOGIN_KEY)
    }

    pub fn remove_remembered_user(&self) -> Result<(), StoreError> {
        self.backend.remove_item(&self.key(REMEMBERED_LOGIN_KEY))
    }
}
