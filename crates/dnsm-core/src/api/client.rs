//! The single outbound channel for API calls.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::effects::{Effect, EffectSender, Notice, Notifier, EXPIRY_REDIRECT_DELAY};
use super::request::{authorize, OutboundRequest};
use super::response::interpret;
use super::transport::Transport;
use super::ApiError;
use crate::auth::SessionHandle;
use crate::router::LOGIN_ROUTE;

/// API client shared by the navigation guard, the auth workflow and the views.
/// Clone is cheap - every field is reference counted.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: SessionHandle,
    notifier: Arc<dyn Notifier>,
    effects: EffectSender,
}

impl ApiClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        session: SessionHandle,
        notifier: Arc<dyn Notifier>,
        effects: EffectSender,
    ) -> Self {
        Self {
            transport,
            session,
            notifier,
            effects,
        }
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub(crate) fn notify(&self, notice: Notice) {
        self.notifier.notify(notice);
    }

    /// Queue an effect for the front-end. A closed channel means nobody is
    /// listening anymore, which is not an error for the caller.
    pub(crate) fn schedule(&self, effect: Effect) {
        if let Err(e) = self.effects.send(effect) {
            debug!(effect = ?e.0, "No effect listener, dropping effect");
        }
    }

    /// Run one call through the pipeline and return the unwrapped `data`.
    pub async fn send(&self, request: OutboundRequest) -> Result<Value, ApiError> {
        let token = self.session.read().await.token().map(str::to_owned);
        let request = authorize(request, token.as_deref());

        debug!(method = %request.method, path = %request.path, authenticated = request.bearer.is_some(), "Dispatching request");
        let exchange = self.transport.dispatch(&request).await;

        match interpret(exchange) {
            Ok(data) => Ok(data),
            Err(error) => {
                self.on_failure(&request, &error).await;
                Err(error)
            }
        }
    }

    /// `send`, then decode `data` into `T`.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        request: OutboundRequest,
    ) -> Result<T, ApiError> {
        let path = request.path.clone();
        let data = self.send(request).await?;
        serde_json::from_value(data).map_err(|e| {
            warn!(path = %path, error = %e, "Failed to decode response data");
            ApiError::InvalidResponse(format!("Failed to decode data from {}: {}", path, e))
        })
    }

    async fn on_failure(&self, request: &OutboundRequest, error: &ApiError) {
        let auth_endpoint = request.is_auth_endpoint();
        warn!(
            method = %request.method,
            path = %request.path,
            error = %error,
            auth_endpoint,
            "Request failed"
        );

        // Auth endpoint failures are reported by the login workflow itself
        if auth_endpoint {
            return;
        }

        self.notify(Notice::for_error(error));

        if error.is_expired() {
            self.session.write().await.logout();
            self.schedule(Effect::Navigate {
                to: LOGIN_ROUTE.to_string(),
                after: EXPIRY_REDIRECT_DELAY,
            });
            self.schedule(Effect::Reload);
        }
    }
}
