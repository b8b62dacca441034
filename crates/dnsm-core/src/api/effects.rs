//! User-facing side effects of API calls.
//!
//! Notifications go straight to a `Notifier`. Navigation and view resets are
//! emitted as `Effect`s on a channel so the front-end decides when to apply
//! them and tests can assert on them without waiting on timers.

use std::time::Duration;

use tokio::sync::mpsc;

use super::ApiError;

/// Delay before redirecting after session expiry, so the notice is seen first
pub const EXPIRY_REDIRECT_DELAY: Duration = Duration::from_secs(1);

pub type EffectSender = mpsc::UnboundedSender<Effect>;
pub type EffectReceiver = mpsc::UnboundedReceiver<Effect>;

pub fn effect_channel() -> (EffectSender, EffectReceiver) {
    mpsc::unbounded_channel()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Navigate to `to` once `after` has elapsed
    Navigate { to: String, after: Duration },
    /// Re-run the current view from scratch
    Reload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Warning,
    Error,
}

/// A transient message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            text: text.into(),
        }
    }

    /// The message shown for a failed, non-auth call
    pub fn for_error(error: &ApiError) -> Self {
        let text = match error {
            ApiError::Transport(_) => {
                "Network connection failed, please check your network".to_string()
            }
            ApiError::Protocol { status, reason } => {
                format!("Request failed: {} ({})", reason, status)
            }
            ApiError::Expired => "Session expired, please log in again".to_string(),
            ApiError::Business { code, message } if message.is_empty() => {
                format!("Request failed: {}", code)
            }
            ApiError::Business { message, .. } => message.clone(),
            ApiError::InvalidResponse(_) | ApiError::Encode(_) => {
                "The request failed with an unknown error".to_string()
            }
        };
        Self::error(text)
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_notice_uses_server_message() {
        let notice = Notice::for_error(&ApiError::Business {
            code: 500,
            message: "record exists".to_string(),
        });
        assert_eq!(notice, Notice::error("record exists"));
    }

    #[test]
    fn test_business_notice_falls_back_to_code() {
        let notice = Notice::for_error(&ApiError::Business {
            code: 418,
            message: String::new(),
        });
        assert_eq!(notice.text, "Request failed: 418");
    }

    #[test]
    fn test_protocol_notice() {
        let notice = Notice::for_error(&ApiError::Protocol {
            status: 502,
            reason: "Bad Gateway".to_string(),
        });
        assert_eq!(notice.text, "Request failed: Bad Gateway (502)");
    }

    #[test]
    fn test_effect_channel_preserves_order() {
        let (tx, mut rx) = effect_channel();
        tx.send(Effect::Navigate {
            to: "/".to_string(),
            after: EXPIRY_REDIRECT_DELAY,
        })
        .unwrap();
        tx.send(Effect::Reload).unwrap();

        assert!(matches!(rx.try_recv(), Ok(Effect::Navigate { .. })));
        assert_eq!(rx.try_recv(), Ok(Effect::Reload));
    }
}
