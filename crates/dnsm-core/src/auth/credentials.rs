use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{Context, Result};
use keyring::Entry;

/// Keychain service name remembered passwords are filed under
pub const SERVICE_NAME: &str = "dnsm";

/// Where remembered passwords live, keyed by username.
///
/// The session store only records which username is remembered; the
/// password itself never touches the storage file.
pub trait CredentialStore: Send + Sync {
    /// Store the password for a username, replacing any previous one
    fn store(&self, username: &str, password: &str) -> Result<()>;

    /// The stored password, or `None` when nothing is stored
    fn get_password(&self, username: &str) -> Result<Option<String>>;

    /// Delete the stored password. Deleting a missing entry is not an error.
    fn delete(&self, username: &str) -> Result<()>;
}

/// Passwords in the OS keychain
pub struct KeyringCredentials {
    service: String,
}

impl KeyringCredentials {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, username: &str) -> Result<Entry> {
        Entry::new(&self.service, username).context("Failed to create keyring entry")
    }
}

impl Default for KeyringCredentials {
    fn default() -> Self {
        Self::new(SERVICE_NAME)
    }
}

impl CredentialStore for KeyringCredentials {
    fn store(&self, username: &str, password: &str) -> Result<()> {
        self.entry(username)?
            .set_password(password)
            .context("Failed to store password in keychain")
    }

    fn get_password(&self, username: &str) -> Result<Option<String>> {
        match self.entry(username)?.get_password() {
            Ok(password) => Ok(Some(password)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e).context("Failed to retrieve password from keychain"),
        }
    }

    fn delete(&self, username: &str) -> Result<()> {
        match self.entry(username)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).context("Failed to delete credential from keychain"),
        }
    }
}

/// Passwords held in process memory. For tests and hosts without a keychain.
#[derive(Default)]
pub struct MemoryCredentials {
    passwords: Mutex<HashMap<String, String>>,
}

impl MemoryCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.passwords.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CredentialStore for MemoryCredentials {
    fn store(&self, username: &str, password: &str) -> Result<()> {
        self.lock().insert(username.to_string(), password.to_string());
        Ok(())
    }

    fn get_password(&self, username: &str) -> Result<Option<String>> {
        Ok(self.lock().get(username).cloned())
    }

    fn delete(&self, username: &str) -> Result<()> {
        self.lock().remove(username);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_credentials() {
        let creds = MemoryCredentials::new();
        assert_eq!(creds.get_password("a").unwrap(), None);

        creds.store("a", "pw").unwrap();
        creds.store("a", "pw2").unwrap();
        assert_eq!(creds.get_password("a").unwrap().as_deref(), Some("pw2"));
        assert_eq!(creds.len(), 1);

        creds.delete("a").unwrap();
        creds.delete("a").unwrap();
        assert!(creds.is_empty());
    }
}
