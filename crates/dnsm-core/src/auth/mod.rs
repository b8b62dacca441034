//! Authentication state and workflow.
//!
//! This module provides:
//! - `Session`: the in-memory authenticated/anonymous state, backed by `SessionStore`
//! - `SessionHandle`: the shared handle every other component is constructed with
//! - `Auth`: login/logout orchestration with user-facing outcomes
//! - `CredentialStore`: the keychain holding remembered passwords
//!
//! Token and user info are always set and cleared together.

pub mod credentials;
pub mod error;
pub mod session;
pub mod workflow;

pub use credentials::{CredentialStore, KeyringCredentials, MemoryCredentials};
pub use error::AuthError;
pub use session::{Session, SessionData, SessionHandle};
pub use workflow::Auth;
