//! HTTP client pipeline for the DNS management API.
//!
//! Every call goes through `ApiClient::send`, which composes three steps:
//! `authorize` attaches the bearer token, the `Transport` performs the
//! exchange, and `interpret` unwraps the `{code, data, message}` envelope or
//! classifies the failure. Failures then drive user notifications and, on
//! session expiry, local logout plus scheduled navigation `Effect`s.

pub mod client;
pub mod dns;
pub mod effects;
pub mod error;
pub mod request;
pub mod response;
pub mod transport;
pub mod user;

pub use client::ApiClient;
pub use effects::{
    effect_channel, Effect, EffectReceiver, EffectSender, Level, Notice, Notifier,
    EXPIRY_REDIRECT_DELAY,
};
pub use error::ApiError;
pub use request::{authorize, Method, OutboundRequest, LOGIN_PATH, LOGOUT_PATH};
pub use response::{interpret, Envelope, Exchange};
pub use transport::{HttpTransport, Transport};
