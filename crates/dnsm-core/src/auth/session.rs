use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::models::UserInfo;
use crate::storage::{SessionStore, StoreError};

/// Shared session state. One per process, passed explicitly to the API
/// client, the navigation guard and the auth workflow.
pub type SessionHandle = Arc<RwLock<Session>>;

/// The authenticated half of the session: token and identity, never one
/// without the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub token: String,
    pub user_info: UserInfo,
}

pub struct Session {
    store: SessionStore,
    data: Option<SessionData>,
}

impl Session {
    /// Build the session from whatever the store holds.
    ///
    /// A half-persisted session (token without user info or the reverse)
    /// is treated as anonymous.
    pub fn initialize(store: SessionStore) -> Self {
        let data = match (store.get_token(), store.get_user_info()) {
            (Some(token), Some(user_info)) => Some(SessionData { token, user_info }),
            (None, None) => None,
            (token, user_info) => {
                warn!(
                    has_token = token.is_some(),
                    has_user_info = user_info.is_some(),
                    "Discarding partially stored session"
                );
                None
            }
        };
        debug!(authenticated = data.is_some(), "Session initialized");
        Self { store, data }
    }

    pub fn into_handle(self) -> SessionHandle {
        Arc::new(RwLock::new(self))
    }

    /// Persist and adopt a new authenticated session.
    ///
    /// On a storage failure nothing changes in memory and the stored token
    /// is put back to what memory still holds.
    pub fn set_authenticated(
        &mut self,
        token: String,
        user_info: UserInfo,
    ) -> Result<(), StoreError> {
        self.store.set_token(&token)?;
        if let Err(e) = self.store.set_user_info(&user_info) {
            let rollback = match self.token() {
                Some(previous) => self.store.set_token(previous),
                None => self.store.remove_token(),
            };
            if let Err(rollback) = rollback {
                warn!(error = %rollback, "Failed to roll back stored token");
            }
            return Err(e);
        }

        info!(user_id = user_info.id, username = %user_info.username, "Session authenticated");
        self.data = Some(SessionData { token, user_info });
        Ok(())
    }

    /// Drop the session in memory and in storage. Safe to call repeatedly.
    pub fn logout(&mut self) {
        let was_authenticated = self.data.take().is_some();

        if let Err(e) = self.store.remove_token() {
            warn!(error = %e, "Failed to remove stored token");
        }
        if let Err(e) = self.store.remove_user_info() {
            warn!(error = %e, "Failed to remove stored user info");
        }

        if was_authenticated {
            info!("Session cleared");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.data.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.token.as_str())
    }

    pub fn user_info(&self) -> Option<&UserInfo> {
        self.data.as_ref().map(|d| &d.user_info)
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore};

    fn user() -> UserInfo {
        UserInfo {
            id: 1,
            username: "a".to_string(),
        }
    }

    fn memory_store() -> (Arc<MemoryStore>, SessionStore) {
        let backend = Arc::new(MemoryStore::new());
        let store = SessionStore::new(backend.clone(), "dnsm_");
        (backend, store)
    }

    /// Accepts everything except writes to keys ending in `fail_suffix`
    struct FailingStore {
        inner: MemoryStore,
        fail_suffix: &'static str,
    }

    impl KeyValueStore for FailingStore {
        fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get_item(key)
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
            if key.ends_with(self.fail_suffix) {
                return Err(StoreError::Unavailable("disk full".to_string()));
            }
            self.inner.set_item(key, value)
        }

        fn remove_item(&self, key: &str) -> Result<(), StoreError> {
            self.inner.remove_item(key)
        }
    }

    #[test]
    fn test_initialize_empty_is_anonymous() {
        let (_, store) = memory_store();
        let session = Session::initialize(store);
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
        assert_eq!(session.user_info(), None);
    }

    #[test]
    fn test_initialize_restores_persisted_session() {
        let (_, store) = memory_store();
        let mut first = Session::initialize(store.clone());
        first.set_authenticated("T".to_string(), user()).unwrap();

        let reloaded = Session::initialize(store);
        assert!(reloaded.is_authenticated());
        assert_eq!(reloaded.token(), Some("T"));
        assert_eq!(reloaded.user_info(), Some(&user()));
    }

    #[test]
    fn test_initialize_discards_half_session() {
        let (_, store) = memory_store();
        store.set_token("T").unwrap();

        let session = Session::initialize(store);
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_logout_clears_memory_and_storage() {
        let (backend, store) = memory_store();
        let mut session = Session::initialize(store.clone());
        session.set_authenticated("T".to_string(), user()).unwrap();

        session.logout();
        assert!(!session.is_authenticated());
        assert_eq!(store.get_token(), None);
        assert_eq!(store.get_user_info(), None);
        assert!(backend.is_empty());

        // Second logout is a no-op
        session.logout();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_logout_keeps_remembered_login() {
        let (_, store) = memory_store();
        store
            .set_remembered_user(&crate::models::RememberedUser {
                username: "a".to_string(),
            })
            .unwrap();
        let mut session = Session::initialize(store.clone());
        session.set_authenticated("T".to_string(), user()).unwrap();
        session.logout();

        assert!(store.get_remembered_user().is_some());
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let backend = Arc::new(FailingStore {
            inner: MemoryStore::new(),
            fail_suffix: "user_info",
        });
        let store = SessionStore::new(backend.clone(), "dnsm_");
        let mut session = Session::initialize(store.clone());

        let result = session.set_authenticated("T".to_string(), user());
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
        assert!(!session.is_authenticated());
        assert_eq!(store.get_token(), None);
        assert!(backend.inner.is_empty());
    }

    #[test]
    fn test_failed_write_keeps_previous_session() {
        let backend = Arc::new(FailingStore {
            inner: MemoryStore::new(),
            fail_suffix: "token",
        });
        let store = SessionStore::new(backend, "dnsm_");
        let mut session = Session::initialize(store);

        assert!(session.set_authenticated("T".to_string(), user()).is_err());
        assert!(!session.is_authenticated());
    }
}
