//! Core library for dnsm, a console for managing DNS domains and records
//! against a remote HTTP API.
//!
//! The pieces fit together leaf first:
//! - `storage`: durable key-value storage and the persisted session keys
//! - `auth`: the in-memory session state and the login/logout workflow
//! - `api`: the single outbound request pipeline and the DNS endpoints
//! - `router`: the route table and the navigation guard
//!
//! Everything shares one explicitly constructed `SessionHandle`; nothing
//! reaches for global state.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod router;
pub mod storage;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use auth::{Auth, Session, SessionHandle};
pub use config::Config;
pub use router::{NavigationGuard, Router};
